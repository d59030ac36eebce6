// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching avec matches! : un helper par raccourci
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (pour animations, rafraîchissement)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick toutes les 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release
                // On ne garde que Press pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Vérifie si l'événement correspond à l'un des codes donnés
fn is_key(event: &Event, codes: &[KeyCode]) -> bool {
    if let Event::Key(key) = event {
        codes.contains(&key.code)
    } else {
        false
    }
}

/// 'q' : quitter (avec confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('q'), KeyCode::Char('Q')])
}

pub fn is_escape_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Esc])
}

pub fn is_enter_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Enter])
}

pub fn is_backspace_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Backspace])
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('K')])
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('J')])
}

/// Tab : onglet suivant
pub fn is_next_tab_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Tab, KeyCode::Right, KeyCode::Char('l')])
}

/// Shift+Tab : onglet précédent
pub fn is_previous_tab_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::BackTab, KeyCode::Left, KeyCode::Char('h')])
}

/// ']' : fenêtre d'historique suivante
pub fn is_next_window_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char(']')])
}

/// '[' : fenêtre d'historique précédente
pub fn is_previous_window_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('[')])
}

/// 'g' : régénérer le Snapshot
pub fn is_refresh_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('g'), KeyCode::Char('G')])
}

/// '/' : recherche (vue Transactions)
pub fn is_search_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('/')])
}

/// 't' : cycle du filtre de type
pub fn is_kind_filter_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('t'), KeyCode::Char('T')])
}

/// 'a' : cycle du filtre d'actif
pub fn is_asset_filter_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('a'), KeyCode::Char('A')])
}

/// 'r' : cycle de la plage de dates
pub fn is_date_filter_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('r'), KeyCode::Char('R')])
}

/// 'd' : saisir une plage de dates personnalisée
pub fn is_custom_range_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('d'), KeyCode::Char('D')])
}

/// 'c' : effacer les filtres
pub fn is_clear_filters_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('c'), KeyCode::Char('C')])
}

/// 'e' : exporter la vue filtrée
pub fn is_export_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('e'), KeyCode::Char('E')])
}

/// 'x' : se déconnecter
pub fn is_logout_event(event: &Event) -> bool {
    is_key(event, &[KeyCode::Char('x'), KeyCode::Char('X')])
}

/// '1'..'4' : accès direct à un onglet (index 0..3)
pub fn get_tab_index_from_event(event: &Event) -> Option<usize> {
    match get_char_from_event(event)? {
        c @ '1'..='4' => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Caractère imprimable accepté dans les champs de saisie
pub fn is_text_char_event(event: &Event) -> bool {
    matches!(
        get_char_from_event(event),
        Some(c) if c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | '@' | ' ')
    )
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, event::KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_filter_shortcuts() {
        assert!(is_custom_range_event(&key(KeyCode::Char('d'))));
        assert!(is_date_filter_event(&key(KeyCode::Char('r'))));
        assert!(!is_custom_range_event(&key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_tab_index() {
        assert_eq!(get_tab_index_from_event(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(get_tab_index_from_event(&key(KeyCode::Char('4'))), Some(3));
        assert_eq!(get_tab_index_from_event(&key(KeyCode::Char('5'))), None);
        assert_eq!(get_tab_index_from_event(&Event::Tick), None);
    }

    #[test]
    fn test_text_chars() {
        assert!(is_text_char_event(&key(KeyCode::Char('a'))));
        assert!(is_text_char_event(&key(KeyCode::Char('@'))));
        assert!(!is_text_char_event(&key(KeyCode::Char('/'))));
        assert!(!is_text_char_event(&key(KeyCode::Enter)));
    }
}
