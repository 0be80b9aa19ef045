pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod ui;

// Re-export commonly used items
pub use models::transaction::Transaction;
pub use models::category::Category;
pub use ledger::{Ledger, Totals};
pub use ui::app::App;
pub use error::{NotifyError, ValidationError};
