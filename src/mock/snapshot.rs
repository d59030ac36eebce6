// ============================================================================
// Assemblage du Snapshot
// ============================================================================
// Point d'entrée unique : appelle les générateurs dans un ordre fixe
//   1. utilisateur
//   2. 5 actifs uniques
//   3. 20 transactions
//   4. série de performance  (fenêtre)
//   5. série de gains        (fenêtre)
//   6. statistiques des 5 exchanges
//   7. 3 positions de staking
// ============================================================================

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::mock::{MockGenerator, ASSET_COUNT, STAKING_COUNT, TRANSACTION_COUNT};
use crate::models::Snapshot;

impl MockGenerator {
    /// Génère un Snapshot complet pour une fenêtre de `window_days` jours
    ///
    /// # Erreurs
    /// `window_days` doit valoir au moins 1.
    pub fn snapshot(&mut self, window_days: u32) -> Result<Snapshot> {
        self.snapshot_at(window_days, Utc::now())
    }

    /// Comme `snapshot()` mais avec une date de référence explicite
    #[instrument(skip(self))]
    pub fn snapshot_at(&mut self, window_days: u32, now: DateTime<Utc>) -> Result<Snapshot> {
        ensure!(window_days >= 1, "La fenêtre doit couvrir au moins 1 jour");

        let user = self.user(now);
        let assets = self.crypto_assets(ASSET_COUNT)?;
        let transactions = (0..TRANSACTION_COUNT)
            .map(|_| self.transaction(now, window_days))
            .collect();
        let performance = self.performance_series(window_days, now);
        let earnings = self.earnings_series(window_days, now);
        let exchanges = self.exchange_stats();
        let staking = (0..STAKING_COUNT).map(|_| self.staking_position()).collect();

        debug!(window_days, "Snapshot generated");

        Ok(Snapshot {
            window_days,
            generated_at: now,
            user,
            assets,
            transactions,
            performance,
            earnings,
            exchanges,
            staking,
        })
    }
}

/// Génère un Snapshot avec un générateur à seed aléatoire
///
/// Deux appels produisent des contenus indépendants mais la même forme.
pub fn build_snapshot(window_days: u32) -> Result<Snapshot> {
    MockGenerator::new().snapshot(window_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::EXCHANGES;

    #[test]
    fn test_snapshot_shape() {
        let snapshot = build_snapshot(7).unwrap();

        assert_eq!(snapshot.window_days, 7);
        assert_eq!(snapshot.performance.len(), 7);
        assert_eq!(snapshot.earnings.len(), 7);
        assert_eq!(snapshot.assets.len(), 5);
        assert_eq!(snapshot.transactions.len(), 20);
        assert_eq!(snapshot.exchanges.len(), EXCHANGES.len());
        assert_eq!(snapshot.staking.len(), 3);
    }

    #[test]
    fn test_two_snapshots_are_independent() {
        let first = build_snapshot(7).unwrap();
        let second = build_snapshot(7).unwrap();

        // Même forme...
        assert_eq!(first.performance.len(), second.performance.len());
        assert_eq!(first.transactions.len(), second.transactions.len());
        // ...contenu différent (uuid v4 aléatoires)
        assert_ne!(first.user.id, second.user.id);
    }

    #[test]
    fn test_default_window() {
        let mut generator = MockGenerator::with_seed(30);
        let snapshot = generator.snapshot(crate::mock::DEFAULT_WINDOW_DAYS).unwrap();
        assert_eq!(snapshot.performance.len(), 30);
        assert_eq!(snapshot.earnings.len(), 30);
    }

    #[test]
    fn test_series_end_on_generation_date() {
        let now = Utc::now();
        let mut generator = MockGenerator::with_seed(2);
        let snapshot = generator.snapshot_at(14, now).unwrap();

        assert_eq!(snapshot.generated_at, now);
        assert_eq!(snapshot.performance.last().map(|p| p.date), Some(now));
        assert_eq!(snapshot.earnings.last().map(|p| p.date), Some(now));
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let mut generator = MockGenerator::with_seed(0);
        assert!(generator.snapshot(0).is_err());
    }
}
