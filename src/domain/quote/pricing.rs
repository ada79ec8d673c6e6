use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::value_objects::{MarkupPercent, Money, PricingTier, Quantity};

/// Compute a line item's subtotal: `round2(quantity * unit_price)`.
pub fn compute_subtotal(quantity: Quantity, unit_price: Money) -> Money {
  unit_price.multiply(quantity.value())
}

// Tier configuration - static, not user-editable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierConfig {
  pub material_multiplier: Decimal,
  pub labor_multiplier: Decimal,
}

impl TierConfig {
  pub fn of(tier: PricingTier) -> Self {
    match tier {
      PricingTier::Standard => Self {
        material_multiplier: dec!(1.00),
        labor_multiplier: dec!(1.00),
      },
      PricingTier::Premium => Self {
        material_multiplier: dec!(1.15),
        labor_multiplier: dec!(1.10),
      },
      PricingTier::Elite => Self {
        material_multiplier: dec!(1.30),
        labor_multiplier: dec!(1.20),
      },
    }
  }
}

/// Tier-adjusted pricing breakdown. Derived, never persisted as a source of
/// truth; always recomputed from the base figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPricing {
  pub materials: Money,
  pub labor: Money,
  pub markup: Money,
  pub total: Money,
}

/// Apply a tier's multipliers to the base materials and labor figures.
///
/// Markup is recomputed from the tier-adjusted materials amount, not the
/// base amount, so higher tiers raise markup proportionally. Inputs are the
/// untiered base figures held by the draft; a previously multiplied value
/// must never be fed back in, or repeated tier switches would compound.
pub fn compute_tier_pricing(
  tier: PricingTier,
  materials_subtotal: Money,
  labor_total: Money,
  markup_percent: MarkupPercent,
) -> TierPricing {
  let config = TierConfig::of(tier);

  let materials = materials_subtotal.multiply(config.material_multiplier);
  let labor = labor_total.multiply(config.labor_multiplier);
  let markup = materials.multiply(markup_percent.as_fraction());
  let total = materials.add(labor).add(markup);

  TierPricing {
    materials,
    labor,
    markup,
    total,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn money(v: Decimal) -> Money {
    Money::new(v).unwrap()
  }

  #[test]
  fn test_subtotal_rounds_standard() {
    let subtotal = compute_subtotal(Quantity::new(dec!(1.5)), money(dec!(3.33)));
    assert_eq!(subtotal.value(), dec!(5.00)); // 4.995 rounds up, not truncates

    let subtotal = compute_subtotal(Quantity::new(dec!(3)), money(dec!(19.99)));
    assert_eq!(subtotal.value(), dec!(59.97));
  }

  #[test]
  fn test_subtotal_of_clamped_quantity_is_zero() {
    let subtotal = compute_subtotal(Quantity::new(dec!(-2)), money(dec!(100)));
    assert_eq!(subtotal, Money::zero());
  }

  #[test]
  fn test_tier_pricing_worked_example() {
    // materials $1000, labor 4h x $85 = $340, markup 25%
    let standard = compute_tier_pricing(
      PricingTier::Standard,
      money(dec!(1000)),
      money(dec!(340)),
      MarkupPercent::new(dec!(25)),
    );
    assert_eq!(standard.materials.value(), dec!(1000.00));
    assert_eq!(standard.labor.value(), dec!(340.00));
    assert_eq!(standard.markup.value(), dec!(250.00));
    assert_eq!(standard.total.value(), dec!(1590.00));

    let premium = compute_tier_pricing(
      PricingTier::Premium,
      money(dec!(1000)),
      money(dec!(340)),
      MarkupPercent::new(dec!(25)),
    );
    assert_eq!(premium.materials.value(), dec!(1150.00));
    assert_eq!(premium.labor.value(), dec!(374.00));
    assert_eq!(premium.markup.value(), dec!(287.50));
    assert_eq!(premium.total.value(), dec!(1811.50));
  }

  #[test]
  fn test_tier_pricing_is_pure() {
    let a = compute_tier_pricing(
      PricingTier::Elite,
      money(dec!(812.37)),
      money(dec!(255)),
      MarkupPercent::new(dec!(12.5)),
    );
    let b = compute_tier_pricing(
      PricingTier::Elite,
      money(dec!(812.37)),
      money(dec!(255)),
      MarkupPercent::new(dec!(12.5)),
    );
    assert_eq!(a, b);
  }

  #[test]
  fn test_switching_back_to_standard_has_no_drift() {
    let materials = money(dec!(1234.56));
    let labor = money(dec!(680));
    let markup = MarkupPercent::new(dec!(18));

    let baseline = compute_tier_pricing(PricingTier::Standard, materials, labor, markup);

    // Any sequence of tier switches recomputes from base figures, so
    // coming back to standard reproduces the original total exactly.
    for tier in [
      PricingTier::Premium,
      PricingTier::Elite,
      PricingTier::Premium,
      PricingTier::Standard,
    ] {
      let _ = compute_tier_pricing(tier, materials, labor, markup);
    }
    let again = compute_tier_pricing(PricingTier::Standard, materials, labor, markup);
    assert_eq!(again, baseline);
  }

  #[test]
  fn test_zero_markup_and_zero_labor() {
    let pricing = compute_tier_pricing(
      PricingTier::Premium,
      money(dec!(200)),
      Money::zero(),
      MarkupPercent::zero(),
    );
    assert_eq!(pricing.labor, Money::zero());
    assert_eq!(pricing.markup, Money::zero());
    assert_eq!(pricing.total.value(), dec!(230.00));
  }
}
