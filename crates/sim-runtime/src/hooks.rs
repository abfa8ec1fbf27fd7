//! Fire-and-forget observers invoked after the ledgers are written.
//!
//! Observers only ever see shared references, so nothing they do can change
//! the numbers of the advance that triggered them.

use rust_decimal::Decimal;
use serde::Serialize;
use sim_econ::Settlement;
use tracing::info;

use crate::state::GameState;

/// Narrative events emitted during an advance.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    MonthAdvanced { month: u8, age: u32 },
    OperationalSetback { message: String },
    Bankruptcy { reason: String },
    QuarterClosed { net_profit: Decimal },
    EducationCompleted { program: String },
}

/// Receives narrative events.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: &Notification);
}

/// Runs once the financial results are committed, e.g. achievement checks.
pub trait PostCommitHook: Send + Sync {
    fn after_commit(&self, state: &GameState, settlement: &Settlement);
}

/// Writes every notification to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: &Notification) {
        info!(?event, "notification");
    }
}
