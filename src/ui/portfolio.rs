// ============================================================================
// Portfolio - Avoirs détaillés et métriques de performance
// ============================================================================
// Haut   : ROI, gain net, variation 24h, valeur totale
// Gauche : tableau des avoirs avec allocation, transactions récentes
// Droite : graphique de performance
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use crate::metrics::{allocations, performance_change, total_value, weighted_change_24h};
use crate::models::Snapshot;
use crate::ui::chart;
use crate::ui::dashboard::{
    key_style, render_recent_transactions, split_columns, titled_block,
};

/// Vert si positif, rouge sinon
fn signed_color(value: f64) -> Color {
    if value >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

/// Dessine l'écran Portfolio
pub fn render_portfolio(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area)
        .to_vec();

    render_metrics(frame, snapshot, rows[0]);

    let bottom = split_columns(rows[1], 55);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(bottom[0])
        .to_vec();

    render_holdings(frame, snapshot, left[0]);
    render_recent_transactions(frame, snapshot, left[1]);
    chart::render_series_chart(
        frame,
        bottom[1],
        "Performance",
        &snapshot.performance,
        Color::Green,
    );
}

/// Cartes de métriques
///
/// ROI et gain net comparent le premier et le dernier point de la série
/// de performance. Série vide => "N/A".
fn render_metrics(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area)
        .to_vec();

    let change = performance_change(&snapshot.performance);

    let roi = match change {
        Some(c) => Span::styled(format!("{:+.2}%", c.percent), key_style(signed_color(c.percent))),
        None => Span::styled("N/A", Style::default().fg(Color::Gray)),
    };
    let net_gain = match change {
        Some(c) => Span::styled(
            format!("{:+.2} $", c.absolute),
            key_style(signed_color(c.absolute)),
        ),
        None => Span::styled("N/A", Style::default().fg(Color::Gray)),
    };

    let change_24h = weighted_change_24h(&snapshot.assets);
    let day = Span::styled(
        format!("{:+.2}%", change_24h),
        key_style(signed_color(change_24h)),
    );
    let total = Span::styled(
        format!("${:.2}", total_value(&snapshot.assets)),
        key_style(Color::Yellow),
    );

    let roi_title = format!("ROI ({} j)", snapshot.window_days);
    for (span, title, card) in [
        (roi, roi_title.as_str(), cards[0]),
        (net_gain, "Gain net", cards[1]),
        (day, "Variation 24h", cards[2]),
        (total, "Valeur totale", cards[3]),
    ] {
        let paragraph = Paragraph::new(Line::from(span))
            .block(titled_block(title))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, card);
    }
}

/// Tableau des avoirs avec part de chaque actif dans le total
fn render_holdings(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = allocations(&snapshot.assets)
        .into_iter()
        .map(|(asset, allocation)| {
            Row::new(vec![
                format!("{} ({})", asset.name, asset.symbol),
                format!("{:.4}", asset.amount),
                format!("${:.2}", asset.current_price),
                format!("${:.2}", asset.value),
                format!("{:.1}%", allocation),
                asset.change_display(),
            ])
            .style(Style::default().fg(signed_color(asset.price_change_24h)))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Actif", "Quantité", "Prix", "Valeur", "Alloc", "24h"])
            .style(key_style(Color::Yellow)),
    )
    .block(titled_block("Avoirs"));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_signed_color() {
        assert_eq!(signed_color(1.5), Color::Green);
        assert_eq!(signed_color(0.0), Color::Green);
        assert_eq!(signed_color(-0.1), Color::Red);
    }

    #[test]
    fn test_portfolio_shows_recent_transactions() {
        let snapshot = MockGenerator::with_seed(5).snapshot(30).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.size();
                render_portfolio(frame, &snapshot, area);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Avoirs"));
        assert!(screen.contains("Transactions récentes"));

        let latest = &snapshot.recent_transactions(1)[0];
        assert!(screen.contains(&latest.date.format("%d/%m %H:%M").to_string()));
    }
}
