use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::NotifyError;
use crate::models::transaction::Transaction;

use super::{Action, Notifier};

/// Result of one background notification, reported back to the UI.
#[derive(Debug)]
pub struct NotifyOutcome {
    pub transaction: Transaction,
    pub action: Action,
    pub result: Result<(), NotifyError>,
}

#[derive(Clone)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    outcomes: UnboundedSender<NotifyOutcome>,
}

impl Dispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> (Self, UnboundedReceiver<NotifyOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { notifier, outcomes: tx }, rx)
    }

    /// Spawns the notification and returns immediately. Must be called
    /// from within a tokio runtime.
    pub fn dispatch(&self, transaction: Transaction, action: Action) -> JoinHandle<()> {
        debug!("Dispatching {} notification for transaction {}", action, transaction.id);
        let notifier = Arc::clone(&self.notifier);
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            let result = notifier.notify(&transaction, action).await;
            // receiver gone means the app is shutting down
            let _ = outcomes.send(NotifyOutcome { transaction, action, result });
        })
    }
}
