use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid markup: {0}")]
  InvalidMarkup(String),
  #[error("Invalid quote number: {0}")]
  InvalidQuoteNumber(String),
  #[error("Invalid quote status: {0}")]
  InvalidStatus(String),
  #[error("Invalid pricing tier: {0}")]
  InvalidTier(String),
  #[error("Invalid line item name: {0}")]
  InvalidItemName(String),
}

/// Round a raw decimal to two places using standard (midpoint away from
/// zero) rounding. Truncation would drift on repeated currency math.
pub fn round_currency(value: Decimal) -> Decimal {
  value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// Money - non-negative currency amount, two-decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
  pub fn new(amount: Decimal) -> Result<Self, ValueObjectError> {
    if amount.is_sign_negative() {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    Ok(Self(round_currency(amount)))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn add(&self, other: Money) -> Money {
    Money(self.0 + other.0)
  }

  pub fn multiply(&self, factor: Decimal) -> Money {
    Money(round_currency(self.0 * factor))
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "${:.2}", self.0)
  }
}

// Quantity - non-negative rational, clamped at zero
//
// A decrement below zero resolves to exactly zero; the constructor never
// fails so UI-driven edits cannot leave a negative figure behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Self {
    Self(value.max(Decimal::ZERO))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn one() -> Self {
    Self(Decimal::ONE)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

// Markup percent - non-negative, applied to materials only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupPercent(Decimal);

impl MarkupPercent {
  pub fn new(value: Decimal) -> Self {
    Self(value.max(Decimal::ZERO))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_fraction(&self) -> Decimal {
    self.0 / Decimal::from(100)
  }
}

// Quote number - durable human-readable identity, allocated by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteNumber(String);

impl QuoteNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidQuoteNumber(
        "Quote number cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for QuoteNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Quote status
//
// Deliberately permissive: any status may be set from any other, including
// backward moves such as accepted -> draft. There is no workflow guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
  #[default]
  Draft,
  Sent,
  Accepted,
  Rejected,
}

impl QuoteStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      QuoteStatus::Draft => "draft",
      QuoteStatus::Sent => "sent",
      QuoteStatus::Accepted => "accepted",
      QuoteStatus::Rejected => "rejected",
    }
  }
}

impl FromStr for QuoteStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "draft" => Ok(QuoteStatus::Draft),
      "sent" => Ok(QuoteStatus::Sent),
      "accepted" => Ok(QuoteStatus::Accepted),
      "rejected" => Ok(QuoteStatus::Rejected),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown status: {}",
        s
      ))),
    }
  }
}

// Pricing tier - named preset of material/labor multipliers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
  #[default]
  Standard,
  Premium,
  Elite,
}

impl PricingTier {
  pub fn as_str(&self) -> &'static str {
    match self {
      PricingTier::Standard => "standard",
      PricingTier::Premium => "premium",
      PricingTier::Elite => "elite",
    }
  }
}

impl FromStr for PricingTier {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "standard" => Ok(PricingTier::Standard),
      "premium" => Ok(PricingTier::Premium),
      "elite" => Ok(PricingTier::Elite),
      _ => Err(ValueObjectError::InvalidTier(format!("Unknown tier: {}", s))),
    }
  }
}

// Line item name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemName(String);

impl ItemName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidItemName(
        "Name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidItemName(
        "Name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_money_rounds_to_two_places() {
    let money = Money::new(dec!(10.005)).unwrap();
    assert_eq!(money.value(), dec!(10.01)); // midpoint rounds away from zero

    let money = Money::new(dec!(10.004)).unwrap();
    assert_eq!(money.value(), dec!(10.00));
  }

  #[test]
  fn test_money_rejects_negative() {
    assert!(Money::new(dec!(-0.01)).is_err());
    assert!(Money::new(dec!(0)).is_ok());
  }

  #[test]
  fn test_money_multiply_rounds() {
    let money = Money::new(dec!(0.10)).unwrap();
    assert_eq!(money.multiply(dec!(0.333)).value(), dec!(0.03));
  }

  #[test]
  fn test_quantity_clamps_at_zero() {
    assert_eq!(Quantity::new(dec!(-3)).value(), Decimal::ZERO);
    assert_eq!(Quantity::new(dec!(1.5)).value(), dec!(1.5));
  }

  #[test]
  fn test_markup_clamps_at_zero() {
    assert_eq!(MarkupPercent::new(dec!(-10)).value(), Decimal::ZERO);
    assert_eq!(MarkupPercent::new(dec!(25)).as_fraction(), dec!(0.25));
  }

  #[test]
  fn test_quote_number() {
    assert!(QuoteNumber::new("Q-1001".to_string()).is_ok());
    assert!(QuoteNumber::new("  ".to_string()).is_err());
    assert_eq!(
      QuoteNumber::new("Q-1001".to_string()).unwrap().to_string(),
      "Q-1001"
    );
  }

  #[test]
  fn test_status_moves_freely() {
    // No workflow guard: parsing covers all four states and callers may
    // assign any of them in any order.
    assert_eq!(QuoteStatus::from_str("accepted").unwrap(), QuoteStatus::Accepted);
    assert_eq!(QuoteStatus::from_str("DRAFT").unwrap(), QuoteStatus::Draft);
    assert!(QuoteStatus::from_str("paid").is_err());
    assert_eq!(QuoteStatus::default(), QuoteStatus::Draft);
  }

  #[test]
  fn test_pricing_tier_parse() {
    assert_eq!(PricingTier::from_str("premium").unwrap(), PricingTier::Premium);
    assert_eq!(PricingTier::default(), PricingTier::Standard);
    assert!(PricingTier::from_str("platinum").is_err());
  }

  #[test]
  fn test_item_name() {
    assert!(ItemName::new("Cedar picket".to_string()).is_ok());
    assert!(ItemName::new("".to_string()).is_err());
  }
}
