// ============================================================================
// Account - Profil, sécurité, staking et exchanges
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::models::Snapshot;
use crate::ui::chart;
use crate::ui::dashboard::{key_style, split_columns, titled_block};

/// Dessine l'écran Account
pub fn render_account(frame: &mut Frame, app: &App, snapshot: &Snapshot, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(0),
        ])
        .split(area)
        .to_vec();

    let top = split_columns(rows[0], 50);
    render_profile(frame, snapshot, top[0]);
    render_security(frame, app, snapshot, top[1]);

    let middle = split_columns(rows[1], 50);
    render_staking(frame, snapshot, middle[0]);
    render_exchanges(frame, snapshot, middle[1]);

    chart::render_series_chart(frame, rows[2], "Gains", &snapshot.earnings, Color::Yellow);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), key_style(Color::Cyan)),
        Span::raw(value),
    ])
}

fn render_profile(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let user = &snapshot.user;
    let lines = vec![
        Line::from(Span::styled(
            format!("[{}] {}", user.initials(), user.name),
            key_style(Color::Green),
        )),
        Line::from(""),
        field("Email", user.email.clone()),
        field("Identifiant", user.id.to_string()),
        field("Solde total", format!("${:.2}", user.total_balance)),
    ];

    frame.render_widget(Paragraph::new(lines).block(titled_block("Profil")), area);
}

/// Statut de sécurité + informations de session
fn render_security(frame: &mut Frame, app: &App, snapshot: &Snapshot, area: Rect) {
    let security = &snapshot.user.security;

    let two_factor = if security.two_factor_enabled {
        Span::styled("activée ✓", key_style(Color::Green))
    } else {
        Span::styled("désactivée ✗", key_style(Color::Red))
    };

    let session_since = app
        .session
        .logged_in_at()
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<16}", "2FA"), key_style(Color::Cyan)),
            two_factor,
        ]),
        field(
            "Dernier login",
            security.last_login.format("%d/%m/%Y %H:%M").to_string(),
        ),
        Line::from(""),
        field(
            "Session",
            app.session.username().unwrap_or("-").to_string(),
        ),
        field("Connecté depuis", session_since),
    ];

    frame.render_widget(Paragraph::new(lines).block(titled_block("Sécurité")), area);
}

fn render_staking(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = snapshot
        .staking
        .iter()
        .map(|s| {
            Row::new(vec![
                s.asset.clone(),
                format!("{:.2}", s.amount),
                format!("{:.2}%", s.apy),
                format!("${:.2}", s.earnings),
            ])
        })
        .collect();

    let title = format!("Staking - gains ${:.2}", snapshot.staking_earnings());
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(vec!["Actif", "Montant", "APY", "Gains"]).style(key_style(Color::Yellow)))
    .style(Style::default().fg(Color::White))
    .block(titled_block(&title));

    frame.render_widget(table, area);
}

fn render_exchanges(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = snapshot
        .exchanges
        .iter()
        .map(|e| {
            Row::new(vec![
                e.name.clone(),
                format!("${:.0}", e.volume_24h),
                e.trades_24h.to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(vec!["Exchange", "Volume 24h", "Trades 24h"]).style(key_style(Color::Yellow)),
    )
    .block(titled_block("Exchanges"));

    frame.render_widget(table, area);
}
