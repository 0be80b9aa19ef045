//! Application state and input handling.
//!
//! `App` is the single owner of UI state. Its methods are the only way the
//! ledger is mutated, and every successful add or delete is followed by a
//! background notification whose outcome comes back through
//! [`App::poll_notifications`].

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::ledger::{Ledger, Totals, TotalsMemo};
use crate::models::category::Category;
use crate::navigation::{NavigateHome, Navigator, Screen};
use crate::notify::{Action, Dispatcher, Notifier, NotifyOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    Date,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Description => FormField::Amount,
            FormField::Amount => FormField::Date,
            FormField::Date => FormField::Description,
        }
    }

    pub fn previous(&self) -> FormField {
        match self {
            FormField::Description => FormField::Date,
            FormField::Amount => FormField::Description,
            FormField::Date => FormField::Amount,
        }
    }
}

/// Local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub field: FormField,
}

impl Default for TransactionForm {
    fn default() -> Self {
        TransactionForm {
            description: String::new(),
            amount: String::new(),
            date: today(),
            field: FormField::Description,
        }
    }
}

impl TransactionForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Description => &mut self.description,
            FormField::Amount => &mut self.amount,
            FormField::Date => &mut self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub navigator: Navigator,
    ledger: Ledger,
    pub form: TransactionForm,
    pub input_mode: InputMode,
    pub list_state: ListState,
    pub home_selection: usize,
    pub alerts: VecDeque<Alert>,
    pub running: bool,
    totals: TotalsMemo,
    dispatcher: Dispatcher,
    outcomes: UnboundedReceiver<NotifyOutcome>,
}

impl App {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_ledger(Ledger::seeded(), notifier)
    }

    pub fn with_ledger(ledger: Ledger, notifier: Arc<dyn Notifier>) -> Self {
        let (dispatcher, outcomes) = Dispatcher::new(notifier);
        let mut list_state = ListState::default();
        if !ledger.active_transactions().is_empty() {
            list_state.select(Some(0));
        }

        App {
            navigator: Navigator::default(),
            ledger,
            form: TransactionForm::default(),
            input_mode: InputMode::Normal,
            list_state,
            home_selection: 0,
            alerts: VecDeque::new(),
            running: true,
            totals: TotalsMemo::default(),
            dispatcher,
            outcomes,
        }
    }

    /// Read-only view; mutations go through `submit_form` and `delete_selected`.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn totals(&mut self) -> Totals {
        self.totals.get(&self.ledger)
    }

    pub fn alert(&mut self, title: &str, message: &str) {
        self.alerts.push_back(Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn select_category(&mut self, category: Category) {
        self.ledger.select_category(category);
        let selected = if self.ledger.active_transactions().is_empty() { None } else { Some(0) };
        self.list_state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.ledger.active_transactions().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.ledger.active_transactions().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Adds the form contents to the active category. Returns whether the
    /// transaction was stored.
    pub fn submit_form(&mut self) -> bool {
        let category = self.ledger.active_category();
        let result = self.ledger.add_transaction(
            category,
            &self.form.description,
            &self.form.amount,
            &self.form.date,
        );

        match result {
            Ok(transaction) => {
                self.dispatcher.dispatch(transaction, Action::Added);
                self.form = TransactionForm::default();
                self.input_mode = InputMode::Normal;
                let len = self.ledger.active_transactions().len();
                self.list_state.select(Some(len - 1));
                true
            }
            Err(e) => {
                warn!("Rejected new transaction: {}", e);
                self.alert("Error", e.user_message());
                false
            }
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(id) = self.ledger.active_transactions().get(index).map(|t| t.id) else {
            return;
        };

        let category = self.ledger.active_category();
        if let Some(removed) = self.ledger.remove_transaction(category, id) {
            self.dispatcher.dispatch(removed, Action::Deleted);
        }

        let len = self.ledger.active_transactions().len();
        self.list_state.select(if len == 0 { None } else { Some(index.min(len - 1)) });
    }

    /// Drains finished notifications, raising an alert for each failure.
    pub fn poll_notifications(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            match outcome.result {
                Ok(()) => debug!(
                    "{} notification delivered for transaction {}",
                    outcome.action, outcome.transaction.id
                ),
                Err(e) => self.alert("Calendar Error", e.user_message()),
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        if !self.alerts.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alerts.pop_front();
            }
            return;
        }

        match self.navigator.current() {
            Screen::Home => self.handle_home_key(key.code),
            Screen::Login | Screen::Signup => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.navigator.go_back();
                }
                KeyCode::Char('q') => self.running = false,
                _ => {}
            },
            Screen::ExpenseHome => match self.input_mode {
                InputMode::Normal => self.handle_expense_key(key.code),
                InputMode::Editing => self.handle_form_key(key.code),
            },
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        let menu = Screen::menu();
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Up => {
                self.home_selection = if self.home_selection == 0 {
                    menu.len() - 1
                } else {
                    self.home_selection - 1
                };
            }
            KeyCode::Down => self.home_selection = (self.home_selection + 1) % menu.len(),
            KeyCode::Enter => {
                if let Some(screen) = menu.get(self.home_selection) {
                    self.navigator.navigate(*screen);
                }
            }
            _ => {}
        }
    }

    fn handle_expense_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Esc | KeyCode::Char('h') => self.navigator.navigate_home(),
            KeyCode::Tab | KeyCode::Right => {
                self.select_category(self.ledger.active_category().next())
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.select_category(self.ledger.active_category().previous())
            }
            KeyCode::Char('1') => self.select_category(Category::Daily),
            KeyCode::Char('2') => self.select_category(Category::Weekly),
            KeyCode::Char('3') => self.select_category(Category::Monthly),
            KeyCode::Up => self.previous(),
            KeyCode::Down => self.next(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') => self.input_mode = InputMode::Editing,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                self.submit_form();
            }
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab => self.form.field = self.form.field.next(),
            KeyCode::BackTab => self.form.field = self.form.field.previous(),
            KeyCode::Backspace => {
                self.form.focused_mut().pop();
            }
            KeyCode::Char(c) => self.form.focused_mut().push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    use super::{App, FormField, InputMode};
    use crate::error::NotifyError;
    use crate::ledger::Ledger;
    use crate::models::{category::Category, transaction::Transaction};
    use crate::navigation::Screen;
    use crate::notify::{Action, DisabledNotifier, Notifier};

    struct RejectingNotifier;

    #[async_trait]
    impl Notifier for RejectingNotifier {
        async fn notify(&self, _: &Transaction, _: Action) -> Result<(), NotifyError> {
            Err(NotifyError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: "{\"error\":\"invalid_token\"}".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(Transaction, Action)>>,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<(Transaction, Action)> {
            self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, transaction: &Transaction, action: Action) -> Result<(), NotifyError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push((transaction.clone(), action));
            }
            Ok(())
        }
    }

    async fn settle_notifications(app: &mut App) {
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.poll_notifications();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn open_expenses(app: &mut App) {
        press(app, KeyCode::Down);
        press(app, KeyCode::Down);
        press(app, KeyCode::Enter);
        assert_eq!(app.navigator.current(), Screen::ExpenseHome);
    }

    async fn wait_for_alert(app: &mut App) {
        for _ in 0..200 {
            app.poll_notifications();
            if !app.alerts.is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn typed_transaction_lands_in_active_tab() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        open_expenses(&mut app);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Editing);
        type_text(&mut app, "Coffee");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "-4");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.field, FormField::Date);
        app.form.date = "2024-12-12".to_string();
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.ledger().transactions(Category::Daily).len(), 4);
        assert!(app.form.description.is_empty());
        assert!(app.form.amount.is_empty());
        assert_eq!(app.list_state.selected(), Some(3));

        let totals = app.totals();
        assert_eq!(totals.expense, Decimal::new(-46, 0));
        assert_eq!(totals.balance, Decimal::new(-46, 0));
    }

    #[tokio::test]
    async fn empty_description_raises_error_alert() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        app.form.amount = "-4".to_string();

        assert!(!app.submit_form());
        assert_eq!(app.ledger().transactions(Category::Daily).len(), 3);
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].title, "Error");
        assert_eq!(app.alerts[0].message, "Please fill out all fields, including the date.");
        assert_eq!(app.form.amount, "-4");
    }

    #[tokio::test]
    async fn non_numeric_amount_is_reported() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        app.form.description = "Lunch".to_string();
        app.form.amount = "twelve".to_string();

        assert!(!app.submit_form());
        assert_eq!(app.alerts[0].message, "Amount must be a valid number.");
    }

    #[tokio::test]
    async fn failed_notification_alerts_but_keeps_the_transaction() {
        let mut app = App::new(Arc::new(RejectingNotifier));
        app.form.description = "Coffee".to_string();
        app.form.amount = "-4".to_string();
        app.form.date = "2024-12-12".to_string();

        assert!(app.submit_form());
        wait_for_alert(&mut app).await;

        assert_eq!(app.ledger().transactions(Category::Daily).len(), 4);
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].title, "Calendar Error");
        assert_eq!(app.alerts[0].message, "Failed to log transaction.");

        press(&mut app, KeyCode::Enter);
        assert!(app.alerts.is_empty());
    }

    #[tokio::test]
    async fn delete_key_removes_selected_weekly_income() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        open_expenses(&mut app);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.ledger().active_category(), Category::Weekly);
        assert_eq!(app.list_state.selected(), Some(0));

        press(&mut app, KeyCode::Char('d'));

        let weekly = app.ledger().transactions(Category::Weekly);
        assert_eq!(weekly.len(), 2);
        assert!(weekly.iter().all(|t| t.id != 1));
        let totals = app.totals();
        assert_eq!(totals.income, Decimal::ZERO);
        assert_eq!(totals.expense, Decimal::new(-300, 0));
        assert_eq!(totals.balance, Decimal::new(-300, 0));
    }

    #[tokio::test]
    async fn tab_switching_leaves_sequences_alone() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        open_expenses(&mut app);
        let revision = app.ledger().revision();

        for key in [KeyCode::Tab, KeyCode::Tab, KeyCode::Char('1'), KeyCode::Left] {
            press(&mut app, key);
        }

        assert_eq!(app.ledger().active_category(), Category::Monthly);
        assert_eq!(app.ledger().revision(), revision);
        assert_eq!(app.totals().balance, Decimal::new(4150, 0));
    }

    #[tokio::test]
    async fn escape_navigates_home_and_q_quits() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        open_expenses(&mut app);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.navigator.current(), Screen::Home);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn login_screen_goes_back_on_escape() {
        let mut app = App::new(Arc::new(DisabledNotifier));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.navigator.current(), Screen::Login);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.navigator.current(), Screen::Home);
    }

    #[tokio::test]
    async fn delete_sends_deleted_notification_for_removed_row() {
        let recorder = Arc::new(RecordingNotifier::default());
        let mut app = App::new(recorder.clone());
        open_expenses(&mut app);
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('d'));
        settle_notifications(&mut app).await;

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, Action::Deleted);
        assert_eq!(sent[0].0.id, 1);
        assert_eq!(sent[0].0.description, "Freelance Income");
        assert_eq!(sent[0].0.amount, Decimal::new(500, 0));
        assert_eq!(app.ledger().transactions(Category::Weekly).len(), 2);
        assert!(app.alerts.is_empty());
    }

    #[tokio::test]
    async fn failed_delete_notification_alerts_but_row_stays_deleted() {
        let mut app = App::new(Arc::new(RejectingNotifier));
        open_expenses(&mut app);
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('d'));
        wait_for_alert(&mut app).await;

        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].title, "Calendar Error");
        assert_eq!(app.alerts[0].message, "Failed to log transaction.");
        let weekly = app.ledger().transactions(Category::Weekly);
        assert_eq!(weekly.len(), 2);
        assert!(weekly.iter().all(|t| t.id != 1));
    }

    #[tokio::test]
    async fn delete_on_empty_tab_sends_nothing() {
        let recorder = Arc::new(RecordingNotifier::default());
        let mut app = App::with_ledger(Ledger::empty(), recorder.clone());
        open_expenses(&mut app);
        assert_eq!(app.list_state.selected(), None);

        press(&mut app, KeyCode::Char('d'));
        settle_notifications(&mut app).await;

        assert!(recorder.sent().is_empty());
        assert_eq!(app.ledger().revision(), 0);
        assert!(app.alerts.is_empty());
    }
}
