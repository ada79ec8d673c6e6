use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::entities::{LineItem, QuoteDraft};
use super::errors::QuoteError;
use super::value_objects::{ItemName, MarkupPercent, Money, Quantity};

/// A quick-package template: a named starting point that pre-populates a
/// new draft with typical line items and labor.
pub struct QuickPackage {
  pub key: &'static str,
  pub label: &'static str,
  items: &'static [(&'static str, Decimal, Decimal, &'static str)],
  labor_hours: Decimal,
  labor_rate: Decimal,
  markup_percent: Decimal,
}

// (name, quantity, unit price, unit label)
const PACKAGES: &[QuickPackage] = &[
  QuickPackage {
    key: "service-call",
    label: "Service call",
    items: &[("Service call-out", dec!(1), dec!(95.00), "each")],
    labor_hours: dec!(1),
    labor_rate: dec!(85),
    markup_percent: dec!(0),
  },
  QuickPackage {
    key: "standard-install",
    label: "Standard installation",
    items: &[
      ("Materials allowance", dec!(1), dec!(450.00), "lot"),
      ("Disposal & haul-off", dec!(1), dec!(75.00), "each"),
    ],
    labor_hours: dec!(6),
    labor_rate: dec!(85),
    markup_percent: dec!(15),
  },
  QuickPackage {
    key: "full-replacement",
    label: "Full replacement",
    items: &[
      ("Materials allowance", dec!(1), dec!(1800.00), "lot"),
      ("Equipment rental", dec!(1), dec!(250.00), "day"),
      ("Disposal & haul-off", dec!(1), dec!(150.00), "each"),
    ],
    labor_hours: dec!(16),
    labor_rate: dec!(85),
    markup_percent: dec!(20),
  },
];

impl QuickPackage {
  pub fn all() -> &'static [QuickPackage] {
    PACKAGES
  }

  pub fn find(key: &str) -> Option<&'static QuickPackage> {
    PACKAGES.iter().find(|package| package.key == key)
  }

  /// Build a fresh draft pre-populated from this package.
  pub fn new_draft(&self) -> Result<QuoteDraft, QuoteError> {
    let mut draft = QuoteDraft::new();
    for (name, quantity, unit_price, unit_label) in self.items {
      let mut item = LineItem::custom(ItemName::new((*name).to_string())?);
      item.set_quantity(Quantity::new(*quantity));
      item.set_unit_price(Money::new(*unit_price)?);
      item.unit_label = (*unit_label).to_string();
      draft.add_line_item(item);
    }
    draft.labor_hours = Quantity::new(self.labor_hours);
    draft.labor_rate = Money::new(self.labor_rate)?;
    draft.markup_percent = MarkupPercent::new(self.markup_percent);
    Ok(draft)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_find_known_package() {
    assert!(QuickPackage::find("standard-install").is_some());
    assert!(QuickPackage::find("no-such-package").is_none());
  }

  #[test]
  fn test_package_draft_is_priced() {
    let draft = QuickPackage::find("standard-install")
      .unwrap()
      .new_draft()
      .unwrap();
    assert_eq!(draft.line_items.len(), 2);
    assert_eq!(draft.materials_subtotal().value(), dec!(525.00));
    assert_eq!(draft.labor_total().value(), dec!(510.00));
    // A package draft still needs a customer before it can persist.
    assert!(!draft.customer.is_persistable());
  }
}
