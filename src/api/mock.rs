// ============================================================================
// Source de données : générateur simulé
// ============================================================================
// Façade async au-dessus de `mock::MockGenerator`
//
// CONCEPTS RUST :
// 1. async fn : le worker l'appelle comme un client HTTP
// 2. spawn_blocking : la génération est CPU-bound, on ne bloque pas le
//    runtime pendant le tirage
// 3. #[instrument] : chaque appel ouvre un span avec la fenêtre demandée
// ============================================================================

use anyhow::{bail, Context, Result};
use tracing::{debug, info, instrument};

use crate::mock::MockGenerator;
use crate::models::Snapshot;

/// Récupère un Snapshot complet pour une fenêtre de `window_days` jours
///
/// # Arguments
/// * `window_days` - Nombre de jours d'historique (>= 1)
/// * `seed` - Seed optionnelle (données reproductibles)
///
/// # Exemple
/// let snapshot = fetch_snapshot(30, None).await?;
/// println!("{} actifs", snapshot.assets.len());
#[instrument]
pub async fn fetch_snapshot(window_days: u32, seed: Option<u64>) -> Result<Snapshot> {
    if window_days == 0 {
        bail!("Fenêtre invalide : au moins 1 jour d'historique est requis");
    }

    debug!("Generating snapshot");

    // CONCEPT : Chaque appel possède son propre générateur
    // - Pas d'état partagé entre deux régénérations
    let snapshot = tokio::task::spawn_blocking(move || {
        let mut generator = match seed {
            Some(seed) => MockGenerator::with_seed(seed),
            None => MockGenerator::new(),
        };
        generator.snapshot(window_days)
    })
    .await
    .context("La tâche de génération a été interrompue")??;

    info!(
        assets = snapshot.assets.len(),
        transactions = snapshot.transactions.len(),
        points = snapshot.performance.len(),
        "Snapshot ready"
    );

    Ok(snapshot)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // CONCEPT RUST : #[tokio::test]
    // - Macro qui setup un runtime tokio pour le test
    #[tokio::test]
    async fn test_fetch_snapshot_shape() {
        let snapshot = fetch_snapshot(7, None).await.unwrap();
        assert_eq!(snapshot.window_days, 7);
        assert_eq!(snapshot.performance.len(), 7);
        assert_eq!(snapshot.earnings.len(), 7);
        assert_eq!(snapshot.assets.len(), 5);
        assert_eq!(snapshot.transactions.len(), 20);
        assert_eq!(snapshot.exchanges.len(), 5);
        assert_eq!(snapshot.staking.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_snapshot_with_seed_is_reproducible() {
        let a = fetch_snapshot(5, Some(99)).await.unwrap();
        let b = fetch_snapshot(5, Some(99)).await.unwrap();

        // Les dates dépendent de l'horloge, les tirages non
        assert_eq!(a.user.id, b.user.id);
        assert_eq!(a.user.name, b.user.name);
        assert_eq!(a.assets, b.assets);
    }

    #[tokio::test]
    async fn test_fetch_snapshot_rejects_empty_window() {
        assert!(fetch_snapshot(0, None).await.is_err());
    }
}
