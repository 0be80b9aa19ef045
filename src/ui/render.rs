use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::ledger::Totals;
use crate::models::category::Category;
use crate::navigation::Screen;

use super::app::{App, FormField, InputMode};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(size);

    match app.navigator.current() {
        Screen::Home => render_home(f, app, chunks[0]),
        Screen::Login | Screen::Signup => render_placeholder(f, app.navigator.current(), chunks[0]),
        Screen::ExpenseHome => render_expenses(f, app, chunks[0]),
    }

    render_help_panel(f, app, chunks[1]);

    if let Some(alert) = app.alerts.front() {
        render_alert(f, &alert.title, &alert.message, size);
    }
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Screen::menu()
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            let style = if i == app.home_selection {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(screen.title(), style)]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(Screen::Home.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(list, area);
}

fn render_placeholder(f: &mut Frame, screen: Screen, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(format!("{} is not available in this build.", screen.title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" back"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(screen.title()).borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_expenses(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(5),
        ])
        .split(area);

    render_tabs(f, app.ledger().active_category(), chunks[0]);
    let totals = app.totals();
    render_totals(f, &totals, chunks[1]);
    render_transaction_list(f, app, chunks[2]);
    render_form(f, app, chunks[3]);
}

fn render_tabs(f: &mut Frame, active: Category, area: Rect) {
    let titles: Vec<Line> = Category::all().iter().map(|c| Line::from(c.title())).collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().title("Expense App").borders(Borders::ALL))
        .select(active.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn render_totals(f: &mut Frame, totals: &Totals, area: Rect) {
    let text = vec![
        Line::from(format!("Balance: ${:.2}", totals.balance)),
        Line::from(Span::styled(
            format!("Income: ${:.2}", totals.income),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("Expenses: ${:.2}", totals.expense),
            Style::default().fg(Color::Red),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title("Totals")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightGreen)),
    );

    f.render_widget(paragraph, area);
}

fn render_transaction_list(f: &mut Frame, app: &mut App, area: Rect) {
    let transactions = app.ledger().active_transactions();
    let items: Vec<ListItem> = transactions.iter().map(|t| t.to_list_item()).collect();

    let header = format!(
        "{} transactions ({})",
        app.ledger().active_category().title(),
        transactions.len()
    );

    let list = List::new(items)
        .block(Block::default().title(header).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let fields = [
        (FormField::Description, "Description", &app.form.description, "Description"),
        (FormField::Amount, "Amount", &app.form.amount, "e.g. -50 or 100"),
        (FormField::Date, "Date", &app.form.date, "YYYY-MM-DD"),
    ];

    let text: Vec<Line> = fields
        .iter()
        .map(|(field, label, value, placeholder)| {
            let focused = editing && app.form.field == *field;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_span = if value.is_empty() {
                Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(value.to_string())
            };
            Line::from(vec![Span::styled(format!("{:<13}", label), label_style), value_span])
        })
        .collect();

    let title = if editing {
        "Add Transaction (Tab next field, Enter add, Esc cancel)"
    } else {
        "Add Transaction (a to edit)"
    };
    let border = if editing { Color::Yellow } else { Color::DarkGray };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );

    f.render_widget(paragraph, area);
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

fn render_help_panel(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match (app.navigator.current(), app.input_mode) {
        (Screen::Home, _) => vec![("↑/↓", " Move • "), ("Enter", " Open • "), ("q", " Quit")],
        (Screen::Login | Screen::Signup, _) => vec![("Esc", " Back • "), ("q", " Quit")],
        (Screen::ExpenseHome, InputMode::Normal) => vec![
            ("Tab/←/→", " Period • "),
            ("↑/↓", " Move • "),
            ("a", " Add • "),
            ("d", " Delete • "),
            ("Esc", " Home • "),
            ("q", " Quit"),
        ],
        (Screen::ExpenseHome, InputMode::Editing) => vec![
            ("Tab", " Next field • "),
            ("Enter", " Add • "),
            ("Esc", " Cancel"),
        ],
    };

    let spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, label)| key_hint(key, label))
        .collect();

    let help = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Help "),
        )
        .alignment(Alignment::Center);

    f.render_widget(help, area);
}

fn render_alert(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" dismiss"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let popup_area = centered_rect(50, 30, area);
    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(layout[1])[1]
}
