// ============================================================================
// Séries temporelles et statistiques d'exchanges
// ============================================================================
// Points datés (performance, gains) consommés par les graphiques ligne
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valeur du portefeuille à une date donnée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Gains réalisés à une date donnée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsPoint {
    pub date: DateTime<Utc>,
    pub amount: f64,
}

/// Volume des transactions sur une journée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: DateTime<Utc>,
    pub volume: f64,
}

/// Volume et nombre de trades sur 24h pour un exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeStat {
    /// Nom de l'exchange (ex: "Kraken")
    pub name: String,

    /// Volume échangé sur 24h en dollars
    pub volume_24h: f64,

    /// Nombre de trades sur 24h
    pub trades_24h: u64,
}

/// Trait commun aux séries affichables dans un graphique
///
/// CONCEPT RUST : Trait
/// - Le renderer de graphique est générique sur ce trait
/// - Il accepte aussi bien les points de performance que de gains
pub trait SeriesPoint {
    fn date(&self) -> DateTime<Utc>;
    fn y(&self) -> f64;
}

impl SeriesPoint for PerformancePoint {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn y(&self) -> f64 {
        self.value
    }
}

impl SeriesPoint for EarningsPoint {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn y(&self) -> f64 {
        self.amount
    }
}

impl SeriesPoint for VolumePoint {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn y(&self) -> f64 {
        self.volume
    }
}
