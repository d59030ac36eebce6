// ============================================================================
// Métriques du portefeuille
// ============================================================================
// CONCEPTS RUST :
// 1. Slices &[T] : les fonctions acceptent Vec, tableaux, sous-parties
// 2. Iterator::sum() : agrégation sans boucle explicite
// 3. Option : "pas de métrique" plutôt qu'un NaN silencieux
// ============================================================================

use crate::models::{CryptoAsset, SeriesPoint};

/// Valeur totale des actifs détenus
pub fn total_value(assets: &[CryptoAsset]) -> f64 {
    assets.iter().map(|asset| asset.value).sum()
}

/// Part de l'actif dans le portefeuille, en pourcentage
///
/// CONCEPT : Division par zéro
/// - Un total nul (ou négatif, ou non fini) donnerait NaN / inf
/// - On retourne 0.0 : "aucune allocation" est la seule lecture sensée
pub fn compute_allocation(asset: &CryptoAsset, total: f64) -> f64 {
    if !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    asset.value / total * 100.0
}

/// Allocation de chaque actif, dans l'ordre d'origine
pub fn allocations(assets: &[CryptoAsset]) -> Vec<(&CryptoAsset, f64)> {
    let total = total_value(assets);
    assets
        .iter()
        .map(|asset| (asset, compute_allocation(asset, total)))
        .collect()
}

/// Variation de la valeur du portefeuille sur 24h, pondérée par la valeur
/// de chaque position
///
/// Retourne 0.0 pour un portefeuille vide ou de valeur nulle
pub fn weighted_change_24h(assets: &[CryptoAsset]) -> f64 {
    allocations(assets)
        .into_iter()
        .map(|(asset, share)| asset.price_change_24h * share / 100.0)
        .sum()
}

/// Évolution entre le premier et le dernier point d'une série
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceChange {
    /// Valeur au début de la fenêtre
    pub start: f64,

    /// Valeur à la fin de la fenêtre
    pub end: f64,

    /// Gain (ou perte) absolu : end - start
    pub absolute: f64,

    /// Rendement en pourcentage (ROI), 0.0 si start vaut 0
    pub percent: f64,
}

/// Calcule le ROI d'une série (premier point → dernier point)
///
/// CONCEPT RUST : Option chaining avec ?
/// - first()? / last()? : None si la série est vide
pub fn performance_change<P: SeriesPoint>(series: &[P]) -> Option<PerformanceChange> {
    let start = series.first()?.y();
    let end = series.last()?.y();
    let absolute = end - start;
    let percent = if start == 0.0 {
        0.0
    } else {
        absolute / start * 100.0
    };

    Some(PerformanceChange {
        start,
        end,
        absolute,
        percent,
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;
    use crate::models::PerformancePoint;
    use chrono::Utc;
    use uuid::Uuid;

    fn asset(name: &str, value: f64, change: f64) -> CryptoAsset {
        CryptoAsset {
            id: Uuid::new_v4(),
            name: name.to_string(),
            symbol: name.to_uppercase(),
            amount: 1.0,
            current_price: value,
            value,
            price_change_24h: change,
        }
    }

    #[test]
    fn test_total_value() {
        let assets = vec![asset("a", 100.0, 0.0), asset("b", 250.5, 0.0)];
        assert_eq!(total_value(&assets), 350.5);
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn test_allocations_sum_to_100() {
        let mut generator = MockGenerator::with_seed(17);
        let assets = generator.crypto_assets(5).unwrap();

        let sum: f64 = allocations(&assets).iter().map(|(_, pct)| pct).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_with_zero_total() {
        let assets = vec![asset("a", 0.0, 1.0), asset("b", 0.0, -1.0)];
        for (_, pct) in allocations(&assets) {
            assert_eq!(pct, 0.0);
        }
        assert_eq!(compute_allocation(&assets[0], f64::NAN), 0.0);
    }

    #[test]
    fn test_compute_allocation() {
        let btc = asset("btc", 25.0, 0.0);
        assert_eq!(compute_allocation(&btc, 100.0), 25.0);
    }

    #[test]
    fn test_weighted_change() {
        // 75% à +4%, 25% à -4% => +2%
        let assets = vec![asset("a", 300.0, 4.0), asset("b", 100.0, -4.0)];
        assert!((weighted_change_24h(&assets) - 2.0).abs() < 1e-9);
        assert_eq!(weighted_change_24h(&[]), 0.0);
    }

    #[test]
    fn test_performance_change() {
        let now = Utc::now();
        let series = vec![
            PerformancePoint { date: now, value: 200.0 },
            PerformancePoint { date: now, value: 150.0 },
            PerformancePoint { date: now, value: 250.0 },
        ];

        let change = performance_change(&series).unwrap();
        assert_eq!(change.absolute, 50.0);
        assert_eq!(change.percent, 25.0);

        let empty: Vec<PerformancePoint> = Vec::new();
        assert!(performance_change(&empty).is_none());
    }
}
