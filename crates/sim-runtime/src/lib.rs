#![deny(warnings)]

//! Runtime for the tycoon simulation.
//!
//! Wires the pure economic models in `sim-econ` to the ledgers in `sim-core`:
//! a [`Simulation`] owns one game's [`GameState`], advances it by whole
//! months, and hands back a [`QuarterlyReport`].

pub mod hooks;
pub mod report;
pub mod setback;
pub mod simulation;
pub mod state;

pub use hooks::{Notification, NotificationSink, PostCommitHook, TracingSink};
pub use report::{CompanyStatus, QuarterlyReport, ReportData};
pub use simulation::Simulation;
pub use state::GameState;

use sim_core::{ConfigError, ValidationError};
use thiserror::Error;

/// Errors surfaced to callers of [`Simulation`]. None of them leave a
/// partially applied advance behind.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// Another call holds the game.
    #[error("an advance is already in progress")]
    Busy,
    /// A previous call panicked while holding the game.
    #[error("game state lock poisoned")]
    Poisoned,
    #[error("scenario could not be loaded: {0}")]
    Scenario(String),
}
