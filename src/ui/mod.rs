// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// Un fichier par écran, dashboard.rs route vers le bon écran
// ============================================================================

pub mod events;       // Gestion des événements clavier
pub mod dashboard;    // Routeur + cadre commun (onglets, footer) + écran Dashboard
pub mod chart;        // Graphiques ligne des séries temporelles
pub mod login;        // Écran de connexion
pub mod portfolio;    // Avoirs et métriques de performance
pub mod transactions; // Liste filtrable des transactions
pub mod account;      // Profil, sécurité, staking, exchanges

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
