// ============================================================================
// Transactions - Liste filtrable
// ============================================================================
//   ┌ Filtres ─────────────────────────────┐
//   ┌ Résumé : N transactions, volume $X ──┐
//   ┌ Liste (sélection)     ┐┌ Volume/jour ┐
//
// CONCEPTS RATATUI :
// 1. TableState : la ligne sélectionnée est surlignée et suivie au scroll
// 2. render_stateful_widget : widget + état de sélection
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::metrics::{daily_volume, TransactionSummary};
use crate::models::Transaction;
use crate::ui::chart;
use crate::ui::dashboard::{key_style, kind_color, split_columns, titled_block};

/// Dessine l'écran Transactions
pub fn render_transactions(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area)
        .to_vec();

    // Un seul calcul de la vue filtrée par frame
    let filtered = app.filtered_transactions();

    render_filters(frame, app, rows[0]);
    render_summary(frame, &TransactionSummary::from_filtered(&filtered), rows[1]);

    let bottom = split_columns(rows[2], 65);
    render_list(frame, app, &filtered, bottom[0]);

    let volume = daily_volume(&filtered);
    chart::render_series_chart(frame, bottom[1], "Volume", &volume, Color::Magenta);
}

/// Ligne des filtres actifs
fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let search = if app.search.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", app.search)
    };
    let kind = app
        .kind_filter
        .map(|k| k.label().to_string())
        .unwrap_or_else(|| "all".to_string());
    let asset = app.asset_filter.as_deref().unwrap_or("all");

    let line = Line::from(vec![
        Span::styled("Recherche: ", key_style(Color::Cyan)),
        Span::raw(format!("{}  ", search)),
        Span::styled("Type [t]: ", key_style(Color::Cyan)),
        Span::raw(format!("{}  ", kind)),
        Span::styled("Actif [a]: ", key_style(Color::Cyan)),
        Span::raw(format!("{}  ", asset)),
        Span::styled("Dates [r/d]: ", key_style(Color::Cyan)),
        Span::raw(app.date_preset.label()),
    ]);

    frame.render_widget(Paragraph::new(line).block(titled_block("Filtres")), area);
}

fn render_summary(frame: &mut Frame, summary: &TransactionSummary, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!("{}", summary.count), key_style(Color::Yellow)),
        Span::raw(" transactions  •  volume "),
        Span::styled(format!("${:.2}", summary.volume), key_style(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line).block(titled_block("Résumé")), area);
}

/// Tableau des transactions filtrées, ligne sélectionnée surlignée
fn render_list(frame: &mut Frame, app: &App, filtered: &[&Transaction], area: Rect) {
    if filtered.is_empty() {
        chart::render_no_data(
            frame,
            area,
            "Transactions",
            "Aucune transaction ne correspond aux filtres",
        );
        return;
    }

    let rows: Vec<Row> = filtered
        .iter()
        .map(|t| {
            Row::new(vec![
                t.date.format("%d/%m/%Y %H:%M").to_string(),
                t.kind.label().to_string(),
                t.asset.clone(),
                format!("{:.4}", t.amount),
                format!("${:.2}", t.price),
                format!("${:.2}", t.value),
                format!("${:.2}", t.fees),
                t.status.label().to_string(),
            ])
            .style(Style::default().fg(kind_color(t.kind)))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Min(9),
        ],
    )
    .header(
        Row::new(vec![
            "Date", "Type", "Actif", "Quantité", "Prix", "Valeur", "Frais", "Statut",
        ])
        .style(key_style(Color::Yellow)),
    )
    .block(titled_block("Transactions"))
    .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
    .highlight_symbol("▶ ");

    // CONCEPT RUST : État local
    // - App reste immuable pendant le rendu
    // - On reconstruit un TableState à partir de selected_index
    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(filtered.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}
