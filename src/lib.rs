// ============================================================================
// TradeWave - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Source de données async (générateur simulé)
pub mod app;       // État de l'application
pub mod config;    // Configuration (variables d'environnement)
pub mod export;    // Export JSON des transactions filtrées
pub mod metrics;   // Calculs dérivés : allocation, performance, filtres
pub mod mock;      // Générateur de données simulées
pub mod models;    // Structures de données
pub mod session;   // Session persistée (connecté / déconnecté)
pub mod ui;        // Interface utilisateur
