//! Best-effort notifications sent after each ledger mutation.
//!
//! A [`Notifier`] knows how to tell an outside system that a transaction was
//! added or deleted. The [`dispatch::Dispatcher`] runs notifiers on background
//! tasks so the ledger never waits on them.

use std::fmt;

use async_trait::async_trait;
use log::info;

use crate::error::NotifyError;
use crate::models::transaction::Transaction;

pub mod calendar;
pub mod dispatch;

pub use calendar::CalendarNotifier;
pub use dispatch::{Dispatcher, NotifyOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Added,
    Deleted,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Added => "Added",
            Action::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, transaction: &Transaction, action: Action) -> Result<(), NotifyError>;
}

/// Stands in when no calendar credential is configured.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, transaction: &Transaction, action: Action) -> Result<(), NotifyError> {
        info!(
            "Calendar logging disabled, skipping {} notification for transaction {}",
            action, transaction.id
        );
        Ok(())
    }
}
