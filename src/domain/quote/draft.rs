use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use super::entities::{
  CustomerInfo, LineItem, LineItemPatch, QuoteDraft, QuoteIdentity, QuoteRecord, QuoteTotals,
};
use super::errors::QuoteError;
use super::ports::SuggestedItem;
use super::value_objects::{
  ItemName, MarkupPercent, Money, PricingTier, Quantity, QuoteStatus,
};

/// A single edit to the draft. All mutations funnel through here so the
/// controller can recompute derived totals and track dirty state in one
/// place, mirroring the synchronous run-to-completion editing loop.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftOp {
  SetCustomer {
    customer: CustomerInfo,
  },
  AddCustomItem {
    name: String,
  },
  AddCatalogItem {
    source_ref: String,
    name: String,
    unit_price: Decimal,
    unit_label: String,
  },
  UpdateLineItem {
    id: Uuid,
    #[serde(flatten)]
    patch: LineItemPatch,
  },
  RemoveLineItem {
    id: Uuid,
  },
  SetLabor {
    hours: Decimal,
    rate: Decimal,
  },
  SetMarkup {
    percent: Decimal,
  },
  SetTier {
    tier: PricingTier,
  },
  SetNotes {
    notes: String,
  },
  SetStatus {
    status: QuoteStatus,
  },
  ApplySuggestions {
    items: Vec<SuggestedItem>,
    labor_hours_range: Option<(Decimal, Decimal)>,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
  Idle,
  Saving,
  Saved,
  Error,
}

fn default_enabled() -> bool {
  true
}

fn default_debounce_ms() -> u64 {
  5000
}

fn default_max_delay_ms() -> u64 {
  30_000
}

fn default_poll_interval_ms() -> u64 {
  1000
}

/// Quiet-period settings for the debounced remote save.
#[derive(Debug, Clone, Deserialize)]
pub struct AutosaveConfig {
  #[serde(default = "default_enabled")]
  pub enabled: bool,
  /// After an edit, wait this long before saving. Further edits restart
  /// the wait.
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
  /// Under continuous editing, force a save once this much time has
  /// passed since the first unsaved edit.
  #[serde(default = "default_max_delay_ms")]
  pub max_delay_ms: u64,
  #[serde(default = "default_poll_interval_ms")]
  pub poll_interval_ms: u64,
}

impl Default for AutosaveConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      debounce_ms: default_debounce_ms(),
      max_delay_ms: default_max_delay_ms(),
      poll_interval_ms: default_poll_interval_ms(),
    }
  }
}

/// Snapshot handed to the store. `revision` identifies which edits the
/// snapshot covers so completion can tell whether newer edits arrived
/// while the save was in flight.
#[derive(Debug, Clone)]
pub struct PendingSave {
  pub record: QuoteRecord,
  pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveBlocked {
  /// Minimum viable draft not met: persistence requires a customer name.
  MissingCustomerName,
  SaveInFlight,
}

/// Tracks a draft's unsaved edits and mediates every save.
///
/// Local state is the source of truth between saves: a completed save
/// contributes only the allocated identity, never field values, so a
/// stale response cannot clobber edits made while it was in flight.
#[derive(Debug)]
pub struct DraftController {
  draft: QuoteDraft,
  revision: u64,
  saved_revision: u64,
  save_status: SaveStatus,
  last_change: Option<Instant>,
  first_unsaved: Option<Instant>,
}

impl DraftController {
  pub fn new(draft: QuoteDraft) -> Self {
    Self {
      draft,
      revision: 0,
      saved_revision: 0,
      save_status: SaveStatus::Idle,
      last_change: None,
      first_unsaved: None,
    }
  }

  pub fn draft(&self) -> &QuoteDraft {
    &self.draft
  }

  pub fn identity(&self) -> Option<&QuoteIdentity> {
    self.draft.identity.as_ref()
  }

  pub fn totals(&self) -> QuoteTotals {
    self.draft.totals()
  }

  pub fn save_status(&self) -> SaveStatus {
    self.save_status
  }

  pub fn is_dirty(&self) -> bool {
    self.revision > self.saved_revision
  }

  /// Apply one edit, recompute totals, and mark the controller dirty.
  pub fn apply(&mut self, op: DraftOp) -> Result<QuoteTotals, QuoteError> {
    match op {
      DraftOp::SetCustomer { customer } => {
        self.draft.customer = customer;
      }
      DraftOp::AddCustomItem { name } => {
        self.draft.add_line_item(LineItem::custom(ItemName::new(name)?));
      }
      DraftOp::AddCatalogItem {
        source_ref,
        name,
        unit_price,
        unit_label,
      } => {
        self.draft.add_line_item(LineItem::from_catalog(
          source_ref,
          ItemName::new(name)?,
          Money::new(unit_price)?,
          unit_label,
        ));
      }
      DraftOp::UpdateLineItem { id, patch } => {
        self.draft.update_line_item(id, patch)?;
      }
      DraftOp::RemoveLineItem { id } => {
        self.draft.remove_line_item(id)?;
      }
      DraftOp::SetLabor { hours, rate } => {
        self.draft.labor_hours = Quantity::new(hours);
        self.draft.labor_rate = Money::new(rate)?;
      }
      DraftOp::SetMarkup { percent } => {
        self.draft.markup_percent = MarkupPercent::new(percent);
      }
      DraftOp::SetTier { tier } => {
        self.draft.pricing_tier = tier;
      }
      DraftOp::SetNotes { notes } => {
        self.draft.notes = notes;
      }
      DraftOp::SetStatus { status } => {
        // Permissive by design: any status can be set from any other.
        self.draft.status = status;
      }
      DraftOp::ApplySuggestions {
        items,
        labor_hours_range,
      } => {
        self.draft.fold_suggestions(&items, labor_hours_range)?;
      }
    }

    self.mark_dirty();
    Ok(self.draft.totals())
  }

  fn mark_dirty(&mut self) {
    let now = Instant::now();
    self.revision += 1;
    self.last_change = Some(now);
    if self.first_unsaved.is_none() {
      self.first_unsaved = Some(now);
    }
  }

  /// Whether the quiet-period save should fire now.
  pub fn should_autosave(&self, config: &AutosaveConfig) -> bool {
    if !config.enabled
      || !self.is_dirty()
      || self.save_status == SaveStatus::Saving
      || !self.draft.customer.is_persistable()
    {
      return false;
    }

    let since_last = self
      .last_change
      .map(|t| t.elapsed().as_millis() as u64)
      .unwrap_or(0);
    let since_first = self
      .first_unsaved
      .map(|t| t.elapsed().as_millis() as u64)
      .unwrap_or(0);

    since_last >= config.debounce_ms || since_first >= config.max_delay_ms
  }

  /// Take the serialized snapshot for an upsert. Used by both the quiet
  /// period expiry and manual save actions (which bypass the timer).
  pub fn begin_save(&mut self) -> Result<PendingSave, SaveBlocked> {
    if self.save_status == SaveStatus::Saving {
      return Err(SaveBlocked::SaveInFlight);
    }
    if !self.draft.customer.is_persistable() {
      return Err(SaveBlocked::MissingCustomerName);
    }

    self.save_status = SaveStatus::Saving;
    Ok(PendingSave {
      record: self.draft.to_record(),
      revision: self.revision,
    })
  }

  /// Adopt the store's response for a save started at `revision`.
  ///
  /// Only the identity is adopted, and only if none is held yet; field
  /// values from the response are discarded. Dirty state clears only when
  /// no edit arrived after the snapshot was taken.
  pub fn complete_save(&mut self, revision: u64, identity: QuoteIdentity) {
    if self.draft.identity.is_none() {
      self.draft.identity = Some(identity);
    }
    self.saved_revision = self.saved_revision.max(revision);
    self.save_status = SaveStatus::Saved;

    if self.is_dirty() {
      // Newer edits arrived mid-flight; restart the quiet window so they
      // get their own save instead of inheriting the old one's age.
      self.first_unsaved = self.last_change;
    } else {
      self.last_change = None;
      self.first_unsaved = None;
    }
  }

  /// A failed save leaves the draft dirty; the next qualifying edit or
  /// manual save retries. Nothing is thrown past this boundary.
  pub fn fail_save(&mut self) {
    self.save_status = SaveStatus::Error;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::quote::value_objects::QuoteNumber;
  use rust_decimal_macros::dec;
  use std::thread;
  use std::time::Duration;

  fn named_controller() -> DraftController {
    let mut controller = DraftController::new(QuoteDraft::new());
    controller
      .apply(DraftOp::SetCustomer {
        customer: CustomerInfo {
          name: "Dana Whitfield".to_string(),
          ..Default::default()
        },
      })
      .unwrap();
    controller
  }

  fn identity(number: &str) -> QuoteIdentity {
    QuoteIdentity {
      id: Uuid::new_v4(),
      number: QuoteNumber::new(number.to_string()).unwrap(),
    }
  }

  fn fast_config() -> AutosaveConfig {
    AutosaveConfig {
      enabled: true,
      debounce_ms: 20,
      max_delay_ms: 200,
      poll_interval_ms: 5,
    }
  }

  #[test]
  fn test_new_controller_is_clean() {
    let controller = DraftController::new(QuoteDraft::new());
    assert!(!controller.is_dirty());
    assert_eq!(controller.save_status(), SaveStatus::Idle);
  }

  #[test]
  fn test_apply_marks_dirty_and_returns_totals() {
    let mut controller = named_controller();
    let totals = controller
      .apply(DraftOp::SetLabor {
        hours: dec!(4),
        rate: dec!(85),
      })
      .unwrap();
    assert!(controller.is_dirty());
    assert_eq!(totals.labor_total.value(), dec!(340.00));
  }

  #[test]
  fn test_autosave_waits_for_quiet_period() {
    let mut controller = named_controller();
    let config = fast_config();

    // Just edited: inside the quiet period.
    assert!(!controller.should_autosave(&config));

    thread::sleep(Duration::from_millis(30));
    assert!(controller.should_autosave(&config));

    // A fresh edit restarts the wait.
    controller
      .apply(DraftOp::SetNotes {
        notes: "call before arrival".to_string(),
      })
      .unwrap();
    assert!(!controller.should_autosave(&config));
  }

  #[test]
  fn test_autosave_blocked_without_customer_name() {
    let mut controller = DraftController::new(QuoteDraft::new());
    controller
      .apply(DraftOp::SetMarkup { percent: dec!(10) })
      .unwrap();
    let config = fast_config();

    thread::sleep(Duration::from_millis(30));
    assert!(!controller.should_autosave(&config));
    assert_eq!(
      controller.begin_save().unwrap_err(),
      SaveBlocked::MissingCustomerName
    );
  }

  #[test]
  fn test_max_delay_forces_save_under_continuous_editing() {
    let mut controller = named_controller();
    let config = AutosaveConfig {
      debounce_ms: 50,
      max_delay_ms: 80,
      ..fast_config()
    };

    // Keep editing faster than the debounce window.
    for _ in 0..5 {
      thread::sleep(Duration::from_millis(20));
      controller
        .apply(DraftOp::SetMarkup { percent: dec!(11) })
        .unwrap();
    }
    assert!(controller.should_autosave(&config));
  }

  #[test]
  fn test_begin_save_while_saving_is_blocked() {
    let mut controller = named_controller();
    controller.begin_save().unwrap();
    assert_eq!(controller.begin_save().unwrap_err(), SaveBlocked::SaveInFlight);
    assert!(!controller.should_autosave(&fast_config()));
  }

  #[test]
  fn test_in_flight_edit_survives_save_completion() {
    let mut controller = named_controller();
    let pending = controller.begin_save().unwrap();

    // An edit lands after the snapshot was sent.
    controller
      .apply(DraftOp::SetNotes {
        notes: "gate code 4411".to_string(),
      })
      .unwrap();

    controller.complete_save(pending.revision, identity("Q-100"));

    // The newer edit wins; the stale response contributes only identity.
    assert_eq!(controller.draft().notes, "gate code 4411");
    assert_eq!(
      controller.identity().unwrap().number.value(),
      "Q-100"
    );
    assert!(controller.is_dirty());
    assert_eq!(controller.save_status(), SaveStatus::Saved);
  }

  #[test]
  fn test_identity_assigned_exactly_once() {
    let mut controller = named_controller();
    let pending = controller.begin_save().unwrap();
    controller.complete_save(pending.revision, identity("Q-100"));
    assert!(!controller.is_dirty());

    controller
      .apply(DraftOp::SetMarkup { percent: dec!(5) })
      .unwrap();
    let pending = controller.begin_save().unwrap();
    // A confused store response cannot reassign the number.
    controller.complete_save(pending.revision, identity("Q-999"));
    assert_eq!(controller.identity().unwrap().number.value(), "Q-100");
  }

  #[test]
  fn test_failed_save_leaves_dirty_and_error_status() {
    let mut controller = named_controller();
    let _pending = controller.begin_save().unwrap();
    controller.fail_save();

    assert!(controller.is_dirty());
    assert_eq!(controller.save_status(), SaveStatus::Error);

    // The next manual attempt goes through.
    let pending = controller.begin_save().unwrap();
    controller.complete_save(pending.revision, identity("Q-101"));
    assert!(!controller.is_dirty());
    assert_eq!(controller.save_status(), SaveStatus::Saved);
  }

  #[test]
  fn test_snapshot_carries_current_figures() {
    let mut controller = named_controller();
    controller
      .apply(DraftOp::AddCustomItem {
        name: "Trenching".to_string(),
      })
      .unwrap();
    let item_id = controller.draft().line_items[0].id;
    controller
      .apply(DraftOp::UpdateLineItem {
        id: item_id,
        patch: LineItemPatch {
          quantity: Some(dec!(10)),
          unit_price: Some(dec!(100)),
          ..Default::default()
        },
      })
      .unwrap();

    let pending = controller.begin_save().unwrap();
    assert_eq!(pending.record.materials_subtotal.value(), dec!(1000.00));
    assert_eq!(pending.record.grand_total.value(), dec!(1000.00));
  }
}
