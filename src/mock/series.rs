// ============================================================================
// Séries temporelles (performance et gains)
// ============================================================================
// CONVENTION DE DATES (unique pour les deux séries) :
// - start = end - (days - 1) jours
// - point i = start + i jours
// - le dernier point tombe sur `end`, les dates sont strictement croissantes
//
// Les valeurs sont tirées indépendamment (pas de tendance, pas d'autocorrélation).
// La série est matérialisée d'un coup dans un Vec de taille exacte `days`.
// ============================================================================

use chrono::{DateTime, Duration, Utc};

use crate::mock::MockGenerator;
use crate::models::{EarningsPoint, PerformancePoint};

/// Calcule les `days` dates quotidiennes se terminant à `end`
///
/// CONCEPT RUST : Range + map
/// - (0..days) produit 0, 1, ..., days-1
/// - Chaque index devient un décalage en jours depuis start
pub fn series_dates(days: u32, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    if days == 0 {
        return Vec::new();
    }

    let start = end - Duration::days(i64::from(days) - 1);
    (0..days)
        .map(|offset| start + Duration::days(i64::from(offset)))
        .collect()
}

impl MockGenerator {
    /// Historique de la valeur du portefeuille sur `days` jours
    pub fn performance_series(&mut self, days: u32, end: DateTime<Utc>) -> Vec<PerformancePoint> {
        series_dates(days, end)
            .into_iter()
            .map(|date| self.performance_point(date))
            .collect()
    }

    /// Historique des gains sur `days` jours
    pub fn earnings_series(&mut self, days: u32, end: DateTime<Utc>) -> Vec<EarningsPoint> {
        series_dates(days, end)
            .into_iter()
            .map(|date| self.earnings_point(date))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_dates_anchor_on_end() {
        let end = Utc::now();
        let dates = series_dates(7, end);

        assert_eq!(dates.len(), 7);
        assert_eq!(dates[6], end);
        assert_eq!(dates[0], end - Duration::days(6));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn test_series_dates_edge_sizes() {
        let end = Utc::now();
        assert!(series_dates(0, end).is_empty());
        assert_eq!(series_dates(1, end), vec![end]);
    }

    #[test]
    fn test_series_lengths_and_ranges() {
        let end = Utc::now();
        let mut generator = MockGenerator::with_seed(21);

        let performance = generator.performance_series(30, end);
        assert_eq!(performance.len(), 30);
        assert!(performance.windows(2).all(|w| w[0].date < w[1].date));
        assert!(performance
            .iter()
            .all(|p| (10_000.0..=100_000.0).contains(&p.value)));

        let earnings = generator.earnings_series(30, end);
        assert_eq!(earnings.len(), 30);
        assert!(earnings.windows(2).all(|w| w[0].date < w[1].date));
        assert!(earnings.iter().all(|p| (100.0..=10_000.0).contains(&p.amount)));
    }
}
