// ============================================================================
// Module : mock
// ============================================================================
// Générateur de données simulées pour le portefeuille
//
// Il n'y a pas de backend : chaque Snapshot est tiré au hasard dans des
// plages fixes. Le générateur est seedable pour rendre les tests
// déterministes.
// ============================================================================

pub mod assets;    // Builder d'actifs à noms uniques
pub mod generator; // MockGenerator + générateurs d'entités
pub mod series;    // Séries temporelles (performance, gains)
pub mod snapshot;  // Assemblage du Snapshot complet

pub use generator::MockGenerator;
pub use series::series_dates;
pub use snapshot::build_snapshot;

/// Fenêtre d'historique par défaut (en jours)
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Nombre d'actifs détenus dans un Snapshot
pub const ASSET_COUNT: usize = 5;

/// Nombre de transactions dans un Snapshot
pub const TRANSACTION_COUNT: usize = 20;

/// Nombre de positions de staking dans un Snapshot
pub const STAKING_COUNT: usize = 3;

/// Pool de cryptomonnaies candidates : (nom, symbole)
///
/// CONCEPT : Taille du pool = borne du builder d'unicité
/// - On ne peut pas demander plus d'actifs uniques que de candidats
pub const CRYPTO_CANDIDATES: [(&str, &str); 5] = [
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("Cardano", "ADA"),
    ("Binance Coin", "BNB"),
    ("Solana", "SOL"),
];

/// Exchanges suivis (une statistique par nom, dans cet ordre)
pub const EXCHANGES: [&str; 5] = ["Binance", "Coinbase", "Kraken", "Huobi", "KuCoin"];
