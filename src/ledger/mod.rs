pub mod store;
pub mod totals;

pub use store::Ledger;
pub use totals::{Totals, TotalsMemo};
