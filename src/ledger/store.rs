use std::collections::HashMap;
use std::str::FromStr;

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;

use crate::error::{Field, ValidationError};
use crate::models::{category::Category, transaction::Transaction};

/// Parses user-entered amounts. Accepts `,` as the decimal separator and
/// exponent forms such as `1e3`.
pub fn parse_amount(amount: &str) -> Result<Decimal, ValidationError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(Field::Amount));
    }
    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized.to_lowercase()))
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))
}

fn require(value: &str, field: Field) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Per-category transaction lists plus the active tab.
#[derive(Debug, Clone)]
pub struct Ledger {
    entries: HashMap<Category, Vec<Transaction>>,
    active: Category,
    last_id: u64,
    revision: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::empty()
    }
}

impl Ledger {
    pub fn empty() -> Self {
        Ledger {
            entries: Category::all().into_iter().map(|c| (c, Vec::new())).collect(),
            active: Category::Daily,
            last_id: 0,
            revision: 0,
        }
    }

    pub fn seeded() -> Self {
        let seed: [(Category, [(&str, i64, &str); 3]); 3] = [
            (Category::Daily, [
                ("Breakfast - Cafe Latte", -5, "2024-12-11"),
                ("Taxi to Work", -12, "2024-12-11"),
                ("Groceries", -25, "2024-12-11"),
            ]),
            (Category::Weekly, [
                ("Freelance Income", 500, "2024-12-08"),
                ("Electricity Bill", -100, "2024-12-09"),
                ("Shopping - Clothes", -200, "2024-12-09"),
            ]),
            (Category::Monthly, [
                ("Rent", -800, "2024-12-01"),
                ("Salary", 5000, "2024-12-01"),
                ("Internet Bill", -50, "2024-12-02"),
            ]),
        ];

        let mut ledger = Ledger::empty();
        for (category, rows) in seed {
            let list = ledger.entries.entry(category).or_default();
            for (i, (description, amount, date)) in rows.into_iter().enumerate() {
                list.push(Transaction::new(i as u64 + 1, description, Decimal::new(amount, 0), date));
            }
        }
        ledger
    }

    pub fn active_category(&self) -> Category {
        self.active
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn transactions(&self, category: Category) -> &[Transaction] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_transactions(&self) -> &[Transaction] {
        self.transactions(self.active)
    }

    pub fn select_category(&mut self, category: Category) {
        self.active = category;
    }

    pub fn add_transaction(
        &mut self,
        category: Category,
        description: &str,
        amount: &str,
        date: &str,
    ) -> Result<Transaction, ValidationError> {
        let description = require(description, Field::Description)?;
        let amount = parse_amount(amount)?;
        let date = require(date, Field::Date)?;

        let transaction = Transaction::new(self.next_id(), description, amount, date);
        self.entries.entry(category).or_default().push(transaction.clone());
        self.revision += 1;

        info!(
            "Added transaction {} to {}: {} {}",
            transaction.id, category, transaction.description, transaction.amount
        );
        Ok(transaction)
    }

    /// Removes the first transaction with `id`; `None` if there is none.
    pub fn remove_transaction(&mut self, category: Category, id: u64) -> Option<Transaction> {
        let list = self.entries.get_mut(&category)?;
        let position = list.iter().position(|t| t.id == id)?;
        let removed = list.remove(position);
        self.revision += 1;

        info!("Removed transaction {} from {}: {}", removed.id, category, removed.description);
        Some(removed)
    }

    // Millisecond timestamp, bumped when two adds land in the same millisecond.
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }
}
