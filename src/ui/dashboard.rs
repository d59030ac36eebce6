// ============================================================================
// Dashboard - Cadre commun et vue d'ensemble
// ============================================================================
// Deux rôles :
// 1. render() : routeur vers l'écran courant + header/footer communs
// 2. render_dashboard_screen() : l'écran Dashboard lui-même
//
// CONCEPTS RUST :
// 1. Routing avec match sur enum : un écran = un variant
// 2. Emprunts : toutes les vues reçoivent &App et &Snapshot
// 3. Builder pattern : construction fluide des widgets
//
// CONCEPTS RATATUI :
// 1. Tabs : barre d'onglets dans le header
// 2. Layout : découpage de l'espace en zones
// 3. Table : lignes/colonnes avec en-tête
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::app::{App, Screen};
use crate::metrics::{allocations, total_value};
use crate::models::{Snapshot, TransactionKind};
use crate::ui::{account, chart, login, portfolio, transactions};

/// Nombre de transactions récentes affichées (Dashboard et Portfolio)
pub(crate) const RECENT_TRANSACTIONS: usize = 5;

/// Largeur max d'une barre de composition
const BAR_WIDTH: usize = 24;

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Login occupe tout l'écran (pas d'onglets sans session)
/// - Les autres écrans partagent header et footer
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();
    if app.current_screen == Screen::Login {
        login::render_login(frame, app, size);
        return;
    }

    let chunks = create_layout(size);

    render_header(frame, app, chunks[0]);

    // Pas encore de Snapshot : le worker est en train de générer
    match &app.snapshot {
        Some(snapshot) => match app.current_screen {
            Screen::Dashboard => render_dashboard_screen(frame, snapshot, chunks[1]),
            Screen::Portfolio => portfolio::render_portfolio(frame, snapshot, chunks[1]),
            Screen::Transactions => transactions::render_transactions(frame, app, chunks[1]),
            Screen::Account => account::render_account(frame, app, snapshot, chunks[1]),
            Screen::Login => {}
        },
        None => {
            let message = app
                .loading_message
                .as_deref()
                .unwrap_or("Génération des données...");
            chart::render_no_data(frame, chunks[1], app.current_screen.title(), message);
        }
    }

    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : onglets
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : raccourcis ou saisie
        ])
        .split(area)
        .to_vec() // Convertit Rc<[Rect]> en Vec<Rect>
}

// ============================================================================
// Header : onglets
// ============================================================================

/// Dessine la barre d'onglets avec la fenêtre d'historique courante
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let screens = Screen::tabs();
    let titles: Vec<Line> = screens
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.title())))
        .collect();

    let selected = screens
        .iter()
        .position(|s| *s == app.current_screen)
        .unwrap_or(0);

    let loading = if app.is_loading_data() { " ⟳" } else { "" };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" TradeWave - {} jours{} ", app.window_days, loading))
                .title_alignment(Alignment::Center),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

// ============================================================================
// Footer : raccourcis, confirmation, saisie
// ============================================================================

pub(crate) fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Dessine le footer
///
/// Priorité : saisie > confirmation de quit > message de statut > raccourcis
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_active {
        render_input_footer(frame, app, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_quit_confirmation() {
        // CONCEPT : Style avec BLINK pour attirer l'attention
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key_style(Color::Yellow)),
            Span::styled(
                "[q]",
                key_style(Color::Red).add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                key_style(Color::Yellow),
            ),
        ])
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(status.as_str(), key_style(Color::Green)))
    } else {
        let mut spans = vec![
            Span::styled("[q]", key_style(Color::Yellow)),
            Span::raw(" Quit  "),
            Span::styled("[Tab / 1-4]", key_style(Color::Yellow)),
            Span::raw(" Onglets  "),
            Span::styled("[ [ ] ]", key_style(Color::Yellow)),
            Span::raw(" Fenêtre  "),
            Span::styled("[g]", key_style(Color::Green)),
            Span::raw(" Régénérer  "),
        ];

        // Raccourcis propres à la vue Transactions
        if app.current_screen == Screen::Transactions {
            spans.extend([
                Span::styled("[/]", key_style(Color::Cyan)),
                Span::raw(" Recherche  "),
                Span::styled("[t a r]", key_style(Color::Cyan)),
                Span::raw(" Filtres  "),
                Span::styled("[d]", key_style(Color::Cyan)),
                Span::raw(" Plage  "),
                Span::styled("[c]", key_style(Color::Cyan)),
                Span::raw(" Effacer  "),
                Span::styled("[e]", key_style(Color::Cyan)),
                Span::raw(" Export  "),
            ]);
        }

        spans.extend([
            Span::styled("[x]", key_style(Color::Red)),
            Span::raw(" Logout"),
        ]);
        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le footer en mode saisie (recherche ou plage de dates)
///
/// CONCEPT : Modal input (Vim-like)
/// - ESC annule, Enter valide
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" [Enter] Valider  [ESC] Annuler ");

    let input_line = Line::from(vec![
        Span::styled(&app.input_prompt, key_style(Color::Cyan)),
        Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let paragraph = Paragraph::new(vec![input_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Écran Dashboard
// ============================================================================
//   ┌ Bienvenue ┐┌ Solde ┐┌ Activité ┐
//   ┌ Transactions récentes ┐┌ Composition ┐
//   ┌ Performance           ┐┌ Top holdings ┐
// ============================================================================

/// Dessine l'écran Dashboard
pub fn render_dashboard_screen(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(45),
            Constraint::Min(0),
        ])
        .split(area)
        .to_vec();

    render_summary_cards(frame, snapshot, rows[0]);

    let middle = split_columns(rows[1], 60);
    render_recent_transactions(frame, snapshot, middle[0]);
    render_composition(frame, snapshot, middle[1]);

    let bottom = split_columns(rows[2], 60);
    chart::render_series_chart(
        frame,
        bottom[0],
        "Performance",
        &snapshot.performance,
        Color::Green,
    );
    render_top_holdings(frame, snapshot, bottom[1]);
}

/// Découpe une zone en deux colonnes (gauche = `left_percent`%)
pub(crate) fn split_columns(area: Rect, left_percent: u16) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area)
        .to_vec()
}

/// Bloc standard avec titre
pub(crate) fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
}

/// Couleur associée à un type de transaction
pub(crate) fn kind_color(kind: TransactionKind) -> Color {
    match kind {
        TransactionKind::Buy => Color::Green,
        TransactionKind::Sell => Color::Red,
        TransactionKind::Transfer => Color::Blue,
    }
}

/// Bienvenue, solde total, activité récente
fn render_summary_cards(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area)
        .to_vec();

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("👋 Bienvenue, {}", snapshot.user.name),
            key_style(Color::Green),
        )),
        Line::from(Span::styled(
            snapshot.user.email.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(titled_block("Compte"));

    let balance = Paragraph::new(Line::from(Span::styled(
        format!("${:.2}", snapshot.user.total_balance),
        key_style(Color::Yellow),
    )))
    .block(titled_block("Solde total"))
    .alignment(Alignment::Center);

    let activity = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} transactions", snapshot.transactions_in_last_days(7)),
            key_style(Color::Cyan),
        )),
        Line::from(Span::styled(
            "sur les 7 derniers jours",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(titled_block("Activité récente"))
    .alignment(Alignment::Center);

    frame.render_widget(welcome, cards[0]);
    frame.render_widget(balance, cards[1]);
    frame.render_widget(activity, cards[2]);
}

/// Les 5 transactions les plus récentes
pub(crate) fn render_recent_transactions(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = snapshot
        .recent_transactions(RECENT_TRANSACTIONS)
        .into_iter()
        .map(|t| {
            Row::new(vec![
                t.date.format("%d/%m %H:%M").to_string(),
                t.kind.label().to_string(),
                t.asset.clone(),
                format!("{:.4}", t.amount),
                format!("${:.2}", t.value),
            ])
            .style(Style::default().fg(kind_color(t.kind)))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Date", "Type", "Actif", "Quantité", "Valeur"])
            .style(key_style(Color::Yellow)),
    )
    .block(titled_block("Transactions récentes"));

    frame.render_widget(table, area);
}

/// Barres de composition du portefeuille
///
/// CONCEPT : Barre en texte
/// - Longueur proportionnelle à l'allocation (0..=BAR_WIDTH blocs)
fn render_composition(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let total = total_value(&snapshot.assets);

    let mut lines = vec![Line::from(Span::styled(
        format!("Valeur totale : ${:.2}", total),
        key_style(Color::Yellow),
    ))];

    for (asset, allocation) in allocations(&snapshot.assets) {
        let filled = ((allocation / 100.0) * BAR_WIDTH as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(format!("{:<5} ", asset.symbol), key_style(Color::White)),
            Span::styled("█".repeat(filled.min(BAR_WIDTH)), Style::default().fg(Color::Cyan)),
            Span::styled(
                "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(format!(" {:>5.1}%", allocation)),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(titled_block("Composition"));
    frame.render_widget(paragraph, area);
}

/// Actifs triés par valeur décroissante
fn render_top_holdings(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut holdings: Vec<_> = snapshot.assets.iter().collect();
    holdings.sort_by(|a, b| b.value.total_cmp(&a.value));

    let rows: Vec<Row> = holdings
        .into_iter()
        .map(|asset| {
            let color = if asset.is_positive() {
                Color::Green
            } else {
                Color::Red
            };
            Row::new(vec![
                asset.symbol.clone(),
                format!("${:.2}", asset.value),
                asset.change_display(),
            ])
            .style(Style::default().fg(color))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(vec!["Actif", "Valeur", "24h"]).style(key_style(Color::Yellow)))
    .block(titled_block("Top holdings"));

    frame.render_widget(table, area);
}
