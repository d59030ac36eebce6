// ============================================================================
// Module : api
// ============================================================================
// Sources de données du dashboard. Aujourd'hui une seule : le générateur
// simulé, exposé derrière une fonction async pour que le worker puisse
// l'appeler comme un vrai backend.
// ============================================================================

pub mod mock;  // Source simulée (aucun réseau)

// Re-export des fonctions principales
pub use mock::fetch_snapshot;
