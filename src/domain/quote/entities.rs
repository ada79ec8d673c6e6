use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::QuoteError;
use super::ports::SuggestedItem;
use super::pricing::{TierPricing, compute_subtotal, compute_tier_pricing};
use super::value_objects::{
  ItemName, MarkupPercent, Money, PricingTier, Quantity, QuoteNumber, QuoteStatus,
};

// Line item - one billable material or service unit
//
// `subtotal` is derived and never independently set; every mutation to
// quantity or unit price recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub id: Uuid,
  /// Catalog reference; `None` for ad-hoc/custom items.
  pub source_ref: Option<String>,
  pub name: String,
  pub quantity: Quantity,
  pub unit_price: Money,
  pub unit_label: String,
  pub subtotal: Money,
}

impl LineItem {
  pub fn custom(name: ItemName) -> Self {
    let mut item = Self {
      id: Uuid::new_v4(),
      source_ref: None,
      name: name.value().to_string(),
      quantity: Quantity::one(),
      unit_price: Money::zero(),
      unit_label: "each".to_string(),
      subtotal: Money::zero(),
    };
    item.recompute_subtotal();
    item
  }

  /// Add from the material catalog. The name is copied at add time and is
  /// immutable afterwards; only custom items rename.
  pub fn from_catalog(
    source_ref: String,
    name: ItemName,
    unit_price: Money,
    unit_label: String,
  ) -> Self {
    let mut item = Self {
      id: Uuid::new_v4(),
      source_ref: Some(source_ref),
      name: name.value().to_string(),
      quantity: Quantity::one(),
      unit_price,
      unit_label,
      subtotal: Money::zero(),
    };
    item.recompute_subtotal();
    item
  }

  pub fn is_custom(&self) -> bool {
    self.source_ref.is_none()
  }

  pub fn set_quantity(&mut self, quantity: Quantity) {
    self.quantity = quantity;
    self.recompute_subtotal();
  }

  pub fn set_unit_price(&mut self, unit_price: Money) {
    self.unit_price = unit_price;
    self.recompute_subtotal();
  }

  pub fn rename(&mut self, name: ItemName) -> Result<(), QuoteError> {
    if !self.is_custom() {
      return Err(QuoteError::CannotRenameCatalogItem(self.id));
    }
    self.name = name.value().to_string();
    Ok(())
  }

  fn recompute_subtotal(&mut self) {
    self.subtotal = compute_subtotal(self.quantity, self.unit_price);
  }
}

// Customer details on a draft - free text, optionally linked to a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
  pub customer_id: Option<Uuid>,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
}

impl CustomerInfo {
  /// Persistence requires at minimum a non-empty customer name.
  pub fn is_persistable(&self) -> bool {
    !self.name.trim().is_empty()
  }
}

// Durable identity, allocated by the store at first insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteIdentity {
  pub id: Uuid,
  pub number: QuoteNumber,
}

/// Partial update for one line item; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemPatch {
  pub name: Option<String>,
  pub quantity: Option<Decimal>,
  pub unit_price: Option<Decimal>,
  pub unit_label: Option<String>,
}

/// Derived totals. `markup_amount` is the base (untiered) markup figure;
/// the tier-adjusted breakdown lives in `pricing`, whose `total` is the
/// grand total shown and exported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
  pub materials_subtotal: Money,
  pub labor_total: Money,
  pub markup_amount: Money,
  pub pricing: TierPricing,
}

impl QuoteTotals {
  pub fn grand_total(&self) -> Money {
    self.pricing.total
  }
}

// Quote draft - the aggregate root being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDraft {
  /// `None` until the store allocates an identity on first insert.
  pub identity: Option<QuoteIdentity>,
  pub customer: CustomerInfo,
  pub line_items: Vec<LineItem>,
  pub labor_hours: Quantity,
  pub labor_rate: Money,
  pub markup_percent: MarkupPercent,
  pub pricing_tier: PricingTier,
  pub status: QuoteStatus,
  pub notes: String,
}

impl Default for QuoteDraft {
  fn default() -> Self {
    Self::new()
  }
}

impl QuoteDraft {
  pub fn new() -> Self {
    Self {
      identity: None,
      customer: CustomerInfo::default(),
      line_items: Vec::new(),
      labor_hours: Quantity::zero(),
      labor_rate: Money::zero(),
      markup_percent: MarkupPercent::zero(),
      pricing_tier: PricingTier::Standard,
      status: QuoteStatus::Draft,
      notes: String::new(),
    }
  }

  // Line item collection - insertion order, keyed by id

  pub fn add_line_item(&mut self, item: LineItem) -> Uuid {
    let id = item.id;
    self.line_items.push(item);
    id
  }

  pub fn update_line_item(&mut self, id: Uuid, patch: LineItemPatch) -> Result<(), QuoteError> {
    let item = self
      .line_items
      .iter_mut()
      .find(|item| item.id == id)
      .ok_or(QuoteError::LineItemNotFound(id))?;

    if let Some(name) = patch.name {
      item.rename(ItemName::new(name)?)?;
    }
    if let Some(quantity) = patch.quantity {
      item.set_quantity(Quantity::new(quantity));
    }
    if let Some(unit_price) = patch.unit_price {
      item.set_unit_price(Money::new(unit_price)?);
    }
    if let Some(unit_label) = patch.unit_label {
      item.unit_label = unit_label;
    }
    Ok(())
  }

  pub fn remove_line_item(&mut self, id: Uuid) -> Result<(), QuoteError> {
    let before = self.line_items.len();
    self.line_items.retain(|item| item.id != id);
    if self.line_items.len() == before {
      return Err(QuoteError::LineItemNotFound(id));
    }
    Ok(())
  }

  /// Fold an accepted suggestion list into the draft: each suggestion
  /// becomes a new custom line item priced at zero (manual pricing
  /// required), and labor hours are set to the midpoint of the returned
  /// range when one is present.
  pub fn fold_suggestions(
    &mut self,
    items: &[SuggestedItem],
    labor_hours_range: Option<(Decimal, Decimal)>,
  ) -> Result<(), QuoteError> {
    for suggestion in items {
      let mut item = LineItem::custom(ItemName::new(suggestion.name.clone())?);
      item.set_quantity(Quantity::new(suggestion.quantity));
      item.unit_label = suggestion.unit.clone();
      self.add_line_item(item);
    }
    if let Some((low, high)) = labor_hours_range {
      self.labor_hours = Quantity::new((low + high) / Decimal::from(2));
    }
    Ok(())
  }

  // Derived figures - always recomputed from base inputs

  pub fn materials_subtotal(&self) -> Money {
    self
      .line_items
      .iter()
      .fold(Money::zero(), |acc, item| acc.add(item.subtotal))
  }

  pub fn labor_total(&self) -> Money {
    self.labor_rate.multiply(self.labor_hours.value())
  }

  pub fn totals(&self) -> QuoteTotals {
    let materials_subtotal = self.materials_subtotal();
    let labor_total = self.labor_total();
    let markup_amount = materials_subtotal.multiply(self.markup_percent.as_fraction());
    let pricing = compute_tier_pricing(
      self.pricing_tier,
      materials_subtotal,
      labor_total,
      self.markup_percent,
    );

    QuoteTotals {
      materials_subtotal,
      labor_total,
      markup_amount,
      pricing,
    }
  }

  /// Copy-then-insert source: same customer, items, labor, markup and
  /// notes; no identity, status reset to draft. The store allocates a
  /// fresh identity when the copy is first persisted.
  pub fn duplicate(&self) -> QuoteDraft {
    QuoteDraft {
      identity: None,
      status: QuoteStatus::Draft,
      ..self.clone()
    }
  }

  /// Serialize the full draft for an upsert. The snapshot carries the last
  /// computed subtotal and grand total so historical listings can show
  /// them without replaying the pricing rules.
  pub fn to_record(&self) -> QuoteRecord {
    let totals = self.totals();
    QuoteRecord {
      id: self.identity.as_ref().map(|identity| identity.id),
      quote_number: self
        .identity
        .as_ref()
        .map(|identity| identity.number.value().to_string()),
      customer: self.customer.clone(),
      line_items: self.line_items.clone(),
      labor_hours: self.labor_hours,
      labor_rate: self.labor_rate,
      markup_percent: self.markup_percent,
      pricing_tier: self.pricing_tier,
      status: self.status,
      notes: self.notes.clone(),
      materials_subtotal: totals.materials_subtotal,
      grand_total: totals.grand_total(),
      updated_at: Utc::now(),
    }
  }

  /// Rebuild a draft from a persisted snapshot. Base fields are the source
  /// of truth; the stored totals are historical display values only.
  pub fn from_record(record: QuoteRecord) -> Result<Self, QuoteError> {
    let identity = match (record.id, record.quote_number) {
      (Some(id), Some(number)) => Some(QuoteIdentity {
        id,
        number: QuoteNumber::new(number)?,
      }),
      _ => None,
    };

    Ok(Self {
      identity,
      customer: record.customer,
      line_items: record.line_items,
      labor_hours: record.labor_hours,
      labor_rate: record.labor_rate,
      markup_percent: record.markup_percent,
      pricing_tier: record.pricing_tier,
      status: record.status,
      notes: record.notes,
    })
  }
}

// Persisted quote snapshot - the wire/store representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
  pub id: Option<Uuid>,
  pub quote_number: Option<String>,
  pub customer: CustomerInfo,
  pub line_items: Vec<LineItem>,
  pub labor_hours: Quantity,
  pub labor_rate: Money,
  pub markup_percent: MarkupPercent,
  pub pricing_tier: PricingTier,
  pub status: QuoteStatus,
  pub notes: String,
  pub materials_subtotal: Money,
  pub grand_total: Money,
  pub updated_at: DateTime<Utc>,
}
