// ============================================================================
// Builder d'actifs à noms uniques
// ============================================================================
// Produit exactement N actifs dont les noms sont deux à deux distincts,
// tirés dans le pool CRYPTO_CANDIDATES.
//
// ALGORITHME : rejection sampling
// - On tire un candidat au hasard
// - S'il est déjà dans l'ensemble des noms utilisés, on retire
// - Sinon on l'ajoute et on génère l'actif
//
// La boucle n'a pas de borne d'itérations : si N > taille du pool, elle ne
// terminerait jamais. La précondition est donc vérifiée AVANT de boucler.
// ============================================================================

use std::collections::HashSet;

use anyhow::{ensure, Result};
use tracing::debug;

use crate::mock::{MockGenerator, CRYPTO_CANDIDATES};
use crate::models::CryptoAsset;

impl MockGenerator {
    /// Génère `count` actifs aux noms uniques
    ///
    /// # Erreurs
    /// Retourne une erreur si `count` dépasse la taille du pool de candidats
    /// (la boucle de tirage ne pourrait pas terminer).
    pub fn crypto_assets(&mut self, count: usize) -> Result<Vec<CryptoAsset>> {
        ensure!(
            count <= CRYPTO_CANDIDATES.len(),
            "Impossible de générer {} actifs uniques : seulement {} candidats",
            count,
            CRYPTO_CANDIDATES.len()
        );

        // CONCEPT RUST : HashSet<&'static str>
        // - Les noms viennent d'une constante, pas besoin d'allouer
        let mut used: HashSet<&'static str> = HashSet::with_capacity(count);
        let mut assets = Vec::with_capacity(count);
        let mut rejected = 0usize;

        while assets.len() < count {
            let (name, symbol) = CRYPTO_CANDIDATES[self.random_index(CRYPTO_CANDIDATES.len())];

            // insert() retourne false si le nom était déjà présent
            if !used.insert(name) {
                rejected += 1;
                continue;
            }

            assets.push(self.crypto_asset(name, symbol));
        }

        debug!(count, rejected, "Generated unique crypto assets");
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_for_every_size() {
        for count in 0..=CRYPTO_CANDIDATES.len() {
            for seed in 0..50 {
                let mut generator = MockGenerator::with_seed(seed);
                let assets = generator.crypto_assets(count).unwrap();
                assert_eq!(assets.len(), count);

                let names: HashSet<&str> = assets.iter().map(|a| a.name.as_str()).collect();
                assert_eq!(names.len(), count, "doublon avec seed {}", seed);
            }
        }
    }

    #[test]
    fn test_full_pool_contains_every_candidate() {
        let mut generator = MockGenerator::with_seed(123);
        let assets = generator.crypto_assets(CRYPTO_CANDIDATES.len()).unwrap();

        for (name, symbol) in CRYPTO_CANDIDATES {
            let asset = assets.iter().find(|a| a.name == name).unwrap();
            assert_eq!(asset.symbol, symbol);
        }
    }

    #[test]
    fn test_asset_ranges() {
        let mut generator = MockGenerator::with_seed(8);
        for asset in generator.crypto_assets(5).unwrap() {
            assert!((0.1..=100.0).contains(&asset.amount));
            assert!((100.0..=50_000.0).contains(&asset.current_price));
            assert!((1_000.0..=100_000.0).contains(&asset.value));
            assert!((-10.0..=10.0).contains(&asset.price_change_24h));
        }
    }

    #[test]
    fn test_count_above_pool_fails_fast() {
        let mut generator = MockGenerator::with_seed(0);
        let err = generator
            .crypto_assets(CRYPTO_CANDIDATES.len() + 1)
            .unwrap_err();
        assert!(err.to_string().contains("candidats"));
    }
}
