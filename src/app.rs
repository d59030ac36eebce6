// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède la Session et le Snapshot courant
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les vues ne reçoivent que &App : le Snapshot n'est jamais modifié
// ============================================================================

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::metrics::{filter_transactions, DateRange, TransactionFilter};
use crate::mock::DEFAULT_WINDOW_DAYS;
use crate::models::{Snapshot, Transaction, TransactionKind};
use crate::session::Session;

/// Fenêtres d'historique proposées (touches [ et ])
pub const WINDOW_PRESETS: [u32; 3] = [7, 30, 90];

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Login est le seul écran accessible sans session
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Porte d'entrée : saisie du nom d'utilisateur
    Login,

    /// Vue d'ensemble : solde, activité, composition, performance
    Dashboard,

    /// Avoirs détaillés avec allocation et métriques de performance
    Portfolio,

    /// Liste filtrable des transactions
    Transactions,

    /// Profil, sécurité, staking, exchanges
    Account,
}

impl Screen {
    /// Écrans accessibles une fois connecté, dans l'ordre des onglets
    pub fn tabs() -> [Screen; 4] {
        [
            Screen::Dashboard,
            Screen::Portfolio,
            Screen::Transactions,
            Screen::Account,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Dashboard => "Dashboard",
            Screen::Portfolio => "Portfolio",
            Screen::Transactions => "Transactions",
            Screen::Account => "Account",
        }
    }
}

/// Préréglages de plage de dates du filtre Transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreset {
    /// Toutes les dates
    All,
    /// 7 derniers jours
    Last7Days,
    /// 30 derniers jours (valeur initiale de la vue)
    #[default]
    Last30Days,
    /// Plage saisie par l'utilisateur (touche 'd')
    Custom(DateRange),
}

impl DatePreset {
    pub fn label(&self) -> String {
        match self {
            DatePreset::All => "all dates".to_string(),
            DatePreset::Last7Days => "last 7 days".to_string(),
            DatePreset::Last30Days => "last 30 days".to_string(),
            DatePreset::Custom(range) => {
                let bound = |date: Option<DateTime<Utc>>| {
                    date.map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "…".to_string())
                };
                format!("{} → {}", bound(range.from), bound(range.to))
            }
        }
    }

    /// Préréglage suivant (cycle)
    ///
    /// Une plage personnalisée retourne au début du cycle
    pub fn next(&self) -> DatePreset {
        match self {
            DatePreset::All => DatePreset::Last7Days,
            DatePreset::Last7Days => DatePreset::Last30Days,
            DatePreset::Last30Days | DatePreset::Custom(_) => DatePreset::All,
        }
    }

    /// Plage de dates correspondante, ancrée sur `now`
    pub fn range(&self, now: DateTime<Utc>) -> DateRange {
        match self {
            DatePreset::All => DateRange::unbounded(),
            DatePreset::Last7Days => DateRange::last_days(7, now),
            DatePreset::Last30Days => DateRange::last_days(30, now),
            DatePreset::Custom(range) => *range,
        }
    }
}

/// Destination de la saisie en cours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTarget {
    /// Texte de recherche ('/')
    #[default]
    Search,
    /// Plage de dates personnalisée ('d')
    DateRange,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Session explicite (remplace un flag global)
    pub session: Session,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Dernier Snapshot généré (None tant que le worker n'a pas répondu)
    pub snapshot: Option<Snapshot>,

    /// Fenêtre d'historique demandée au générateur
    pub window_days: u32,

    /// Index de la ligne sélectionnée dans la liste des transactions
    pub selected_index: usize,

    // --- Filtres de la vue Transactions ---
    pub search: String,
    pub kind_filter: Option<TransactionKind>,
    pub asset_filter: Option<String>,
    pub date_preset: DatePreset,

    /// Two-step quit : première pression de 'q' => confirmation
    pub confirm_quit: bool,

    /// Indique si un Snapshot est en cours de génération
    pub is_loading: bool,

    pub loading_message: Option<String>,

    /// Mode saisie (recherche ou plage) : les touches vont dans input_buffer
    /// Sur l'écran Login, la saisie est toujours active
    pub input_active: bool,

    pub input_target: InputTarget,

    pub input_buffer: String,

    pub input_prompt: String,

    /// Message affiché dans le footer (export réussi, erreur, etc.)
    pub status_message: Option<String>,
}

impl App {
    /// Crée l'App à partir d'une session chargée
    ///
    /// CONCEPT : Gate d'authentification
    /// - Session active => Dashboard directement
    /// - Sinon => écran Login
    pub fn new(session: Session, window_days: u32) -> Self {
        let current_screen = if session.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Login
        };

        Self {
            running: true,
            session,
            current_screen,
            snapshot: None,
            window_days: window_days.max(1),
            selected_index: 0,
            search: String::new(),
            kind_filter: None,
            asset_filter: None,
            date_preset: DatePreset::default(),
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            input_active: false,
            input_target: InputTarget::default(),
            input_buffer: String::new(),
            input_prompt: String::new(),
            status_message: None,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Connecte l'utilisateur et ouvre le Dashboard
    ///
    /// # Erreurs
    /// Échec d'écriture du fichier de session
    pub fn login(&mut self, username: &str) -> Result<()> {
        self.session.login(username)?;
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        Ok(())
    }

    /// Déconnecte l'utilisateur, oublie le Snapshot et retourne au Login
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.snapshot = None;
        self.current_screen = Screen::Login;
        self.reset_filters();
        Ok(())
    }

    // ========================================================================
    // Navigation entre écrans
    // ========================================================================

    /// Change d'écran (refusé sans session, sauf vers Login)
    pub fn show(&mut self, screen: Screen) {
        if screen != Screen::Login && !self.is_authenticated() {
            return;
        }
        self.current_screen = screen;
        self.selected_index = 0;
    }

    /// Onglet suivant (Tab)
    pub fn next_tab(&mut self) {
        let tabs = Screen::tabs();
        if let Some(pos) = tabs.iter().position(|s| *s == self.current_screen) {
            self.show(tabs[(pos + 1) % tabs.len()]);
        }
    }

    /// Onglet précédent (Shift+Tab)
    pub fn previous_tab(&mut self) {
        let tabs = Screen::tabs();
        if let Some(pos) = tabs.iter().position(|s| *s == self.current_screen) {
            self.show(tabs[(pos + tabs.len() - 1) % tabs.len()]);
        }
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current_screen == screen
    }

    // ========================================================================
    // Snapshot et fenêtre d'historique
    // ========================================================================

    /// Remplace le Snapshot courant (résultat du worker)
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.selected_index = 0;

        // L'actif filtré peut ne plus exister dans le nouveau Snapshot
        if let Some(asset) = &self.asset_filter {
            let still_present = self
                .snapshot
                .as_ref()
                .map(|s| s.transactions.iter().any(|t| &t.asset == asset))
                .unwrap_or(false);
            if !still_present {
                self.asset_filter = None;
            }
        }
    }

    /// Passe à la fenêtre suivante (7 → 30 → 90 → 7)
    pub fn next_window(&mut self) {
        self.window_days = WINDOW_PRESETS
            .iter()
            .copied()
            .find(|days| *days > self.window_days)
            .unwrap_or(WINDOW_PRESETS[0]);
    }

    /// Passe à la fenêtre précédente (90 → 30 → 7 → 90)
    pub fn previous_window(&mut self) {
        self.window_days = WINDOW_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|days| *days < self.window_days)
            .unwrap_or(WINDOW_PRESETS[WINDOW_PRESETS.len() - 1]);
    }

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Filtres de la vue Transactions
    // ========================================================================

    /// Construit le filtre courant
    ///
    /// La plage de dates est ancrée sur la date de génération du Snapshot,
    /// pas sur l'horloge : un Snapshot affiché longtemps garde le même filtre
    pub fn transaction_filter(&self) -> TransactionFilter {
        let anchor = self
            .snapshot
            .as_ref()
            .map(|s| s.generated_at)
            .unwrap_or_else(Utc::now);

        TransactionFilter {
            search: self.search.clone(),
            date_range: self.date_preset.range(anchor),
            kind: self.kind_filter,
            asset: self.asset_filter.clone(),
        }
    }

    /// Transactions visibles avec les filtres courants
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        match &self.snapshot {
            Some(snapshot) => filter_transactions(&snapshot.transactions, &self.transaction_filter()),
            None => Vec::new(),
        }
    }

    /// Cycle du filtre de type : tous → buy → sell → transfer → tous
    pub fn cycle_kind_filter(&mut self) {
        self.kind_filter = match self.kind_filter {
            None => Some(TransactionKind::Buy),
            Some(TransactionKind::Buy) => Some(TransactionKind::Sell),
            Some(TransactionKind::Sell) => Some(TransactionKind::Transfer),
            Some(TransactionKind::Transfer) => None,
        };
        self.selected_index = 0;
    }

    /// Cycle du filtre d'actif : tous → chaque symbole présent → tous
    pub fn cycle_asset_filter(&mut self) {
        let symbols = self
            .snapshot
            .as_ref()
            .map(|s| s.transaction_assets())
            .unwrap_or_default();

        self.asset_filter = match &self.asset_filter {
            None => symbols.first().cloned(),
            Some(current) => symbols
                .iter()
                .position(|s| s == current)
                .and_then(|pos| symbols.get(pos + 1))
                .cloned(),
        };
        self.selected_index = 0;
    }

    /// Cycle de la plage de dates
    pub fn cycle_date_preset(&mut self) {
        self.date_preset = self.date_preset.next();
        self.selected_index = 0;
    }

    /// Remet tous les filtres à leur valeur neutre (sauf la plage par défaut)
    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.kind_filter = None;
        self.asset_filter = None;
        self.date_preset = DatePreset::default();
        self.selected_index = 0;
    }

    /// Navigue vers le haut dans la liste des transactions
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans la liste des transactions
    pub fn navigate_down(&mut self) {
        let max_index = self.filtered_transactions().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    // ========================================================================
    // Quit et messages
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode saisie pour la recherche (pré-rempli avec la recherche courante)
    pub fn start_search(&mut self) {
        self.input_active = true;
        self.input_target = InputTarget::Search;
        self.input_buffer = self.search.clone();
        self.input_prompt = "Search: ".to_string();
    }

    /// Annule la saisie sans toucher à la recherche courante
    pub fn cancel_input(&mut self) {
        self.input_active = false;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Valide la saisie : le buffer devient le texte de recherche
    pub fn submit_search(&mut self) {
        self.search = std::mem::take(&mut self.input_buffer);
        self.cancel_input();
        self.selected_index = 0;
    }

    /// Entre en mode saisie pour une plage de dates personnalisée
    pub fn start_date_range_input(&mut self) {
        self.input_active = true;
        self.input_target = InputTarget::DateRange;
        self.input_buffer.clear();
        self.input_prompt = "Dates (YYYY-MM-DD YYYY-MM-DD, '-' = ouvert): ".to_string();
    }

    /// Valide la plage saisie
    ///
    /// La saisie est fermée dans tous les cas ; en cas d'erreur le filtre
    /// de dates courant est conservé
    pub fn submit_date_range(&mut self) -> Result<()> {
        let parsed = DateRange::parse(&self.input_buffer);
        self.cancel_input();

        self.date_preset = DatePreset::Custom(parsed?);
        self.selected_index = 0;
        Ok(())
    }

    /// Récupère le buffer (saisie du Login) et le vide
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer)
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Vérifie si les touches doivent aller dans le buffer
    pub fn is_in_input_mode(&self) -> bool {
        self.input_active || self.current_screen == Screen::Login
    }

    /// Tick : appelé à chaque itération de la boucle
    pub fn tick(&mut self) {}
}

impl Default for App {
    fn default() -> Self {
        Self::new(Session::anonymous("session.json"), DEFAULT_WINDOW_DAYS)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;

    fn logged_in_app(dir: &tempfile::TempDir) -> App {
        let mut app = App::new(Session::load(dir.path().join("session.json")), 30);
        app.login("ada").unwrap();
        app.set_snapshot(MockGenerator::with_seed(1).snapshot(30).unwrap());
        app
    }

    #[test]
    fn test_app_starts_on_login_without_session() {
        let app = App::default();
        assert!(app.is_running());
        assert!(app.is_on(Screen::Login));
        assert!(app.is_in_input_mode());
    }

    #[test]
    fn test_gate_blocks_navigation_when_logged_out() {
        let mut app = App::default();
        app.show(Screen::Portfolio);
        assert!(app.is_on(Screen::Login));
    }

    #[test]
    fn test_login_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        assert!(app.is_on(Screen::Dashboard));
        assert!(app.snapshot.is_some());

        app.logout().unwrap();
        assert!(app.is_on(Screen::Login));
        assert!(app.snapshot.is_none());
        assert!(!app.is_authenticated());
    }

    #[test]
    fn test_persisted_session_opens_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        Session::load(&path).login("ada").unwrap();

        let app = App::new(Session::load(&path), 30);
        assert!(app.is_on(Screen::Dashboard));
    }

    #[test]
    fn test_tab_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);

        app.next_tab();
        assert!(app.is_on(Screen::Portfolio));
        app.next_tab();
        app.next_tab();
        assert!(app.is_on(Screen::Account));
        app.next_tab();
        assert!(app.is_on(Screen::Dashboard));
        app.previous_tab();
        assert!(app.is_on(Screen::Account));
    }

    #[test]
    fn test_window_cycle() {
        let mut app = App::default();
        assert_eq!(app.window_days, 30);

        app.next_window();
        assert_eq!(app.window_days, 90);
        app.next_window();
        assert_eq!(app.window_days, 7);

        app.previous_window();
        assert_eq!(app.window_days, 90);

        // Une fenêtre hors préréglages rejoint le cycle
        app.window_days = 14;
        app.next_window();
        assert_eq!(app.window_days, 30);
    }

    #[test]
    fn test_noop_filters_show_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        app.date_preset = DatePreset::All;

        assert!(app.transaction_filter().is_noop());
        assert_eq!(app.filtered_transactions().len(), 20);
    }

    #[test]
    fn test_kind_filter_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);

        app.cycle_kind_filter();
        assert_eq!(app.kind_filter, Some(TransactionKind::Buy));
        assert!(app
            .filtered_transactions()
            .iter()
            .all(|t| t.kind == TransactionKind::Buy));

        app.cycle_kind_filter();
        app.cycle_kind_filter();
        app.cycle_kind_filter();
        assert_eq!(app.kind_filter, None);
    }

    #[test]
    fn test_asset_filter_cycle_visits_every_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        let symbols = app.snapshot.as_ref().unwrap().transaction_assets();

        for symbol in &symbols {
            app.cycle_asset_filter();
            assert_eq!(app.asset_filter.as_ref(), Some(symbol));
        }
        app.cycle_asset_filter();
        assert_eq!(app.asset_filter, None);
    }

    #[test]
    fn test_search_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        app.show(Screen::Transactions);

        app.start_search();
        assert!(app.is_in_input_mode());
        for c in "buy".chars() {
            app.append_char(c);
        }
        app.submit_search();

        assert!(!app.is_in_input_mode());
        assert_eq!(app.search, "buy");
        assert!(app
            .filtered_transactions()
            .iter()
            .all(|t| t.kind == TransactionKind::Buy || t.id.to_string().contains("buy")));
    }

    #[test]
    fn test_custom_date_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        let mut dates: Vec<_> = app
            .snapshot
            .as_ref()
            .unwrap()
            .transactions
            .iter()
            .map(|t| t.date.date_naive())
            .collect();
        dates.sort();
        let day = dates[dates.len() / 2];

        app.start_date_range_input();
        assert_eq!(app.input_target, InputTarget::DateRange);
        for c in format!("{} {}", day, day).chars() {
            app.append_char(c);
        }
        app.submit_date_range().unwrap();

        assert!(!app.is_in_input_mode());
        assert!(matches!(app.date_preset, DatePreset::Custom(_)));
        let filtered = app.filtered_transactions();
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|t| t.date.date_naive() == day));

        // Saisie invalide : erreur, filtre précédent conservé
        let before = app.date_preset;
        app.start_date_range_input();
        for c in "demain".chars() {
            app.append_char(c);
        }
        assert!(app.submit_date_range().is_err());
        assert_eq!(app.date_preset, before);
        assert!(!app.is_in_input_mode());

        app.cycle_date_preset();
        assert_eq!(app.date_preset, DatePreset::All);
    }

    #[test]
    fn test_date_preset_is_anchored_on_generation_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Session::load(dir.path().join("session.json")), 30);
        app.login("ada").unwrap();

        // Snapshot généré il y a 90 jours : toutes ses dates sont anciennes
        let generated_at = Utc::now() - chrono::Duration::days(90);
        app.set_snapshot(MockGenerator::with_seed(3).snapshot_at(30, generated_at).unwrap());

        assert_eq!(app.date_preset, DatePreset::Last30Days);
        assert_eq!(app.transaction_filter().date_range.to, Some(generated_at));
        assert_eq!(app.filtered_transactions().len(), 20);
    }

    #[test]
    fn test_search_keeps_text_as_typed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);

        app.start_search();
        for c in " btc ".chars() {
            app.append_char(c);
        }
        app.submit_search();
        assert_eq!(app.search, " btc ");
    }

    #[test]
    fn test_navigation_is_bounded_by_filtered_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = logged_in_app(&dir);
        app.date_preset = DatePreset::All;

        app.navigate_up();
        assert_eq!(app.selected_index, 0);

        for _ in 0..50 {
            app.navigate_down();
        }
        assert_eq!(app.selected_index, 19);
    }
}
