// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données du portefeuille
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod asset;       // CryptoAsset, StakingPosition
pub mod market;      // Séries temporelles + statistiques d'exchanges
pub mod snapshot;    // Snapshot (agrégat complet)
pub mod transaction; // Transaction, TransactionKind, TransactionStatus
pub mod user;        // User, SecurityStatus

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use tradewave::models::asset::CryptoAsset;
// On peut faire : use tradewave::models::CryptoAsset;
pub use asset::{CryptoAsset, StakingPosition};
pub use market::{EarningsPoint, ExchangeStat, PerformancePoint, SeriesPoint, VolumePoint};
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use user::{SecurityStatus, User};
