// ============================================================================
// Chart - Graphiques ligne des séries temporelles
// ============================================================================
// Un seul renderer pour toutes les séries (performance, gains, volume)
//
// CONCEPTS RUST :
// 1. Généricité : render_series_chart<P: SeriesPoint>
// 2. Iterator chaining : transformer les points en (x, y)
// 3. fold() : min et max en un seul passage
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::SeriesPoint;

/// Bornes Y avec une marge de 5% pour que le graphique respire
///
/// Retourne None pour une série vide
pub fn y_bounds(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let (min, max) = values
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &y| (min.min(y), max.max(y)));

    // Série plate : on ouvre artificiellement l'axe
    let margin = if max > min { (max - min) * 0.05 } else { max.abs().max(1.0) * 0.05 };
    Some(((min - margin).max(0.0), max + margin))
}

/// Dessine une série datée en graphique ligne
///
/// # Arguments
/// * `title` - Titre du bloc
/// * `series` - Points (date, y) dans l'ordre chronologique
/// * `color` - Couleur de la ligne
pub fn render_series_chart<P: SeriesPoint>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[P],
    color: Color,
) {
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.y()))
        .collect();

    let values: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
    let Some((y_min, y_max)) = y_bounds(&values) else {
        render_no_data(frame, area, title, "Pas de données à afficher");
        return;
    };

    // CONCEPT RATATUI : Marker Braille pour une ligne fine
    let datasets = vec![Dataset::default()
        .name(title)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let first_label = series
        .first()
        .map(|p| p.date().format("%d/%m").to_string())
        .unwrap_or_default();
    let last_label = series
        .last()
        .map(|p| p.date().format("%d/%m").to_string())
        .unwrap_or_default();

    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);
    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(vec![Span::raw(first_label), Span::raw(last_label)]);

    let y_axis = Axis::default()
        .title("$")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.0}", y_min)),
            Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" 📈 {} - {} jours ", title, series.len())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Affiche un message quand il n'y a pas de données à afficher
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[]), None);

        let (min, max) = y_bounds(&[100.0, 200.0]).unwrap();
        assert!((min - 95.0).abs() < 1e-9);
        assert!((max - 205.0).abs() < 1e-9);

        // Série plate : l'axe reste ouvert
        let (min, max) = y_bounds(&[50.0, 50.0]).unwrap();
        assert!(min < 50.0 && max > 50.0);
    }
}
