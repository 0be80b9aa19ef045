use rust_decimal::Decimal;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    pub amount: Decimal,
    pub date: String,
}

impl Transaction {
    pub fn new(id: u64, description: &str, amount: Decimal, date: &str) -> Self {
        Transaction {
            id,
            description: description.to_string(),
            amount,
            date: date.to_string(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// `+ $500` for income, `- $5` for everything else.
    pub fn display_amount(&self) -> String {
        if self.is_income() {
            format!("+ ${}", self.amount)
        } else {
            format!("- ${}", self.amount.abs())
        }
    }

    pub fn to_list_item(&self) -> ListItem<'static> {
        let amount_style = if self.is_income() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };

        ListItem::new(Line::from(vec![
            Span::raw(format!("{:<30} ", self.description)),
            Span::styled(format!("{:>12} ", self.display_amount()), amount_style),
            Span::raw(self.date.clone()),
        ]))
    }
}
