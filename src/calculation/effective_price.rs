//! Effective price resolution.
//!
//! A line item can carry several monthly price fields at once. The
//! effective price is the first strictly positive value in a fixed,
//! per-context precedence list; zero or negative values mean "not yet
//! negotiated" and are skipped. The precedence lists below are the only
//! place the order is defined.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PriceField, PriceInputs, PricingContext, ResolvedPrice};

/// Price precedence for plan line items.
pub const PLAN_PRICE_PRECEDENCE: [PriceField; 4] = [
    PriceField::NegotiatedPrice,
    PriceField::NegotiatedRate,
    PriceField::SalesPrice,
    PriceField::CardRate,
];

/// Price precedence for campaign line items.
pub const CAMPAIGN_PRICE_PRECEDENCE: [PriceField; 3] = [
    PriceField::NegotiatedRate,
    PriceField::FinalPrice,
    PriceField::CardRate,
];

/// Returns the price precedence for a document context, highest first.
pub fn price_precedence(context: PricingContext) -> &'static [PriceField] {
    match context {
        PricingContext::Plan => &PLAN_PRICE_PRECEDENCE,
        PricingContext::Campaign => &CAMPAIGN_PRICE_PRECEDENCE,
    }
}

/// A named price value offered to [`first_positive_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceCandidate {
    /// The field the value comes from.
    pub field: PriceField,
    /// The stored value, if any.
    pub value: Option<Decimal>,
}

/// Picks the first candidate holding a value strictly greater than zero.
///
/// Falls back to a zero price with no source when no candidate qualifies.
pub fn first_positive_price<I>(candidates: I) -> ResolvedPrice
where
    I: IntoIterator<Item = PriceCandidate>,
{
    candidates
        .into_iter()
        .find_map(|candidate| {
            candidate
                .value
                .filter(|value| *value > Decimal::ZERO)
                .map(|price| ResolvedPrice {
                    price,
                    source: Some(candidate.field),
                })
        })
        .unwrap_or(ResolvedPrice {
            price: Decimal::ZERO,
            source: None,
        })
}

/// Lists the candidates of `inputs` in the precedence order of `context`.
pub fn price_candidates(inputs: &PriceInputs, context: PricingContext) -> Vec<PriceCandidate> {
    price_precedence(context)
        .iter()
        .map(|field| PriceCandidate {
            field: *field,
            value: inputs.value(*field),
        })
        .collect()
}

/// Resolves the effective monthly rate of a line item.
///
/// # Example
///
/// ```
/// use ooh_pricing_engine::calculation::resolve_effective_price;
/// use ooh_pricing_engine::models::{PriceField, PriceInputs, PricingContext};
/// use rust_decimal::Decimal;
///
/// let inputs = PriceInputs {
///     negotiated_price: Some(Decimal::ZERO),
///     sales_price: Some(Decimal::from(4200)),
///     card_rate: Some(Decimal::from(5000)),
///     ..Default::default()
/// };
/// let resolved = resolve_effective_price(&inputs, PricingContext::Plan);
/// assert_eq!(resolved.price, Decimal::from(4200));
/// assert_eq!(resolved.source, Some(PriceField::SalesPrice));
/// ```
pub fn resolve_effective_price(inputs: &PriceInputs, context: PricingContext) -> ResolvedPrice {
    first_positive_price(price_candidates(inputs, context))
}

/// Returns the effective monthly rate of a plan line item.
pub fn get_effective_plan_price(inputs: &PriceInputs) -> Decimal {
    resolve_effective_price(inputs, PricingContext::Plan).price
}

/// Returns the effective monthly rate of a campaign line item.
pub fn get_effective_campaign_price(inputs: &PriceInputs) -> Decimal {
    resolve_effective_price(inputs, PricingContext::Campaign).price
}

/// Lists the higher-precedence fields that were set but skipped for being
/// zero or negative.
pub fn ignored_overrides(
    inputs: &PriceInputs,
    context: PricingContext,
    resolved: &ResolvedPrice,
) -> Vec<PriceCandidate> {
    price_candidates(inputs, context)
        .into_iter()
        .take_while(|candidate| Some(candidate.field) != resolved.source)
        .filter(|candidate| candidate.value.is_some_and(|value| value <= Decimal::ZERO))
        .collect()
}

/// The result of resolving a line item's price, including the audit step.
#[derive(Debug, Clone)]
pub struct EffectivePriceResult {
    /// The resolved price and its source.
    pub resolved: ResolvedPrice,
    /// Fields that were set to zero or less and skipped.
    pub ignored: Vec<PriceCandidate>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves a line item's price and records the decision.
pub fn resolve_with_audit(
    inputs: &PriceInputs,
    context: PricingContext,
    item_id: &str,
    step_number: u32,
) -> EffectivePriceResult {
    let resolved = resolve_effective_price(inputs, context);
    let ignored = ignored_overrides(inputs, context, &resolved);

    let candidates: serde_json::Map<String, serde_json::Value> = price_candidates(inputs, context)
        .into_iter()
        .map(|candidate| {
            let value = candidate
                .value
                .map(|v| serde_json::Value::String(v.to_string()))
                .unwrap_or(serde_json::Value::Null);
            (candidate.field.to_string(), value)
        })
        .collect();

    let source = resolved
        .source
        .map(|field| field.to_string())
        .unwrap_or_else(|| "none".to_string());

    let reasoning = match resolved.source {
        Some(field) => format!(
            "Using {} ${} as the first positive price in {} precedence",
            field, resolved.price, context
        ),
        None => format!("No positive price set for this {} item; price is $0", context),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "effective_price".to_string(),
        rule_name: "Effective Price Resolution".to_string(),
        item_id: Some(item_id.to_string()),
        input: serde_json::json!({
            "context": context.to_string(),
            "candidates": candidates,
        }),
        output: serde_json::json!({
            "price": resolved.price.to_string(),
            "source": source,
            "ignored": ignored.iter().map(|c| c.field.to_string()).collect::<Vec<_>>(),
        }),
        reasoning,
    };

    EffectivePriceResult {
        resolved,
        ignored,
        audit_step,
    }
}
