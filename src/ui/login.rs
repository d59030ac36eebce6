// ============================================================================
// Login - Porte d'entrée de l'application
// ============================================================================
// Seul écran accessible sans session. Aucune vérification réelle :
// n'importe quel nom non vide ouvre le Dashboard.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::dashboard::key_style;

/// Dessine l'écran de connexion centré dans `area`
pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 11, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🔐 TradeWave - Connexion ")
        .title_alignment(Alignment::Center);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Tableau de bord crypto (données simulées)",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Nom d'utilisateur : ", key_style(Color::Cyan)),
            Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
            Span::styled(
                "█",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
        Line::from(""),
    ];

    // Erreur éventuelle (ex: écriture de session impossible)
    if let Some(status) = &app.status_message {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("[Enter]", key_style(Color::Green)),
        Span::raw(" Se connecter  "),
        Span::styled("[ESC]", key_style(Color::Red)),
        Span::raw(" Quitter"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, popup);
}

/// Rectangle centré : `percent_x`% de la largeur, `height` lignes
///
/// CONCEPT RATATUI : Layout imbriqués
/// - Un split vertical pour centrer en hauteur
/// - Puis un split horizontal dans la bande du milieu
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 11, area);

        assert_eq!(popup.height, 11);
        assert!(popup.x > 0 && popup.right() < area.right());
        assert!(popup.y > 0 && popup.bottom() < area.bottom());
    }
}
