use async_trait::async_trait;
use log::{debug, error};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::NotifyError;
use crate::models::transaction::Transaction;

use super::{Action, Notifier};

pub const DEFAULT_CALENDAR_URL: &str =
    "https://www.googleapis.com/calendar/v3/calendars/primary/events";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDate {
    pub date: String,
}

/// All-day calendar event body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDate,
    pub end: EventDate,
}

impl CalendarEvent {
    pub fn for_transaction(transaction: &Transaction, action: Action) -> Self {
        let sign = if transaction.amount > Decimal::ZERO { "+" } else { "" };
        CalendarEvent {
            summary: format!("{} Transaction: {}", action, transaction.description),
            description: format!(
                "Amount: {}${}\nDate: {}",
                sign, transaction.amount, transaction.date
            ),
            start: EventDate { date: transaction.date.clone() },
            end: EventDate { date: transaction.date.clone() },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarNotifier {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl CalendarNotifier {
    pub fn new(url: &str, token: &str) -> Self {
        CalendarNotifier {
            client: reqwest::Client::new(),
            url: url.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for CalendarNotifier {
    async fn notify(&self, transaction: &Transaction, action: Action) -> Result<(), NotifyError> {
        let event = CalendarEvent::for_transaction(transaction, action);
        debug!("Posting calendar event '{}' to {}", event.summary, self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&event)
            .send()
            .await
            .map_err(|e| {
                error!("Network error while logging transaction {}: {}", transaction.id, e);
                NotifyError::from(e)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Calendar API error {} for transaction {}: {}", status, transaction.id, body);
        Err(NotifyError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::CalendarEvent;
    use crate::models::transaction::Transaction;
    use crate::notify::Action;

    #[test]
    fn income_event_has_plus_sign() {
        let t = Transaction::new(7, "Freelance Income", Decimal::new(500, 0), "2024-12-08");
        let event = CalendarEvent::for_transaction(&t, Action::Added);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": "Added Transaction: Freelance Income",
                "description": "Amount: +$500\nDate: 2024-12-08",
                "start": { "date": "2024-12-08" },
                "end": { "date": "2024-12-08" },
            })
        );
    }

    #[test]
    fn expense_event_keeps_the_minus_after_the_dollar() {
        let t = Transaction::new(2, "Taxi to Work", Decimal::new(-12, 0), "2024-12-11");
        let event = CalendarEvent::for_transaction(&t, Action::Deleted);
        assert_eq!(event.summary, "Deleted Transaction: Taxi to Work");
        assert_eq!(event.description, "Amount: $-12\nDate: 2024-12-11");
    }
}
