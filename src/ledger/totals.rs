use rust_decimal::Decimal;

use crate::models::{category::Category, transaction::Transaction};

use super::store::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income = saturating_sum(transactions.iter().map(|t| t.amount).filter(|a| *a > Decimal::ZERO));
        let expense = saturating_sum(transactions.iter().map(|t| t.amount).filter(|a| *a < Decimal::ZERO));

        // opposite signs, cannot overflow
        Totals {
            income,
            expense,
            balance: income + expense,
        }
    }
}

/// Sums same-signed amounts, clamping at the `Decimal` range instead of panicking.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).unwrap_or(if amount > Decimal::ZERO {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
    })
}

/// Caches the active tab's totals until the tab or the ledger changes.
#[derive(Debug, Default)]
pub struct TotalsMemo {
    key: Option<(Category, u64)>,
    totals: Totals,
}

impl TotalsMemo {
    pub fn get(&mut self, ledger: &Ledger) -> Totals {
        let key = (ledger.active_category(), ledger.revision());
        if self.key != Some(key) {
            self.totals = Totals::from_transactions(ledger.active_transactions());
            self.key = Some(key);
        }
        self.totals
    }
}
