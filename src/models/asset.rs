// ============================================================================
// Structures : CryptoAsset et StakingPosition
// ============================================================================
// Les avoirs du portefeuille : actifs détenus et positions en staking
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Un actif crypto détenu dans le portefeuille
///
/// CONCEPT : Unicité
/// - Dans une collection générée, `name` est unique (un seul "Bitcoin")
/// - Garanti par le builder, pas par le type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub id: Uuid,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// Symbole (ex: "BTC")
    pub symbol: String,

    /// Quantité détenue
    pub amount: f64,

    /// Prix unitaire actuel en dollars
    pub current_price: f64,

    /// Valeur de la position en dollars
    pub value: f64,

    /// Variation sur 24h en pourcentage (signée)
    pub price_change_24h: f64,
}

impl CryptoAsset {
    /// Retourne true si l'actif est en hausse sur 24h
    pub fn is_positive(&self) -> bool {
        self.price_change_24h >= 0.0
    }

    /// Variation 24h formatée avec flèche (ex: "▲ +2.11%")
    pub fn change_display(&self) -> String {
        let arrow = if self.is_positive() { "▲" } else { "▼" };
        format!("{} {:+.2}%", arrow, self.price_change_24h)
    }
}

/// Position de staking (actif bloqué rapportant un rendement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingPosition {
    /// Symbole de l'actif staké
    pub asset: String,

    /// Quantité stakée
    pub amount: f64,

    /// Rendement annuel en pourcentage
    pub apy: f64,

    /// Gains accumulés en dollars
    pub earnings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_display() {
        let mut asset = CryptoAsset {
            id: Uuid::new_v4(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            amount: 1.0,
            current_price: 42_000.0,
            value: 42_000.0,
            price_change_24h: 2.5,
        };
        assert!(asset.is_positive());
        assert_eq!(asset.change_display(), "▲ +2.50%");

        asset.price_change_24h = -1.0;
        assert!(!asset.is_positive());
        assert_eq!(asset.change_display(), "▼ -1.00%");
    }
}
