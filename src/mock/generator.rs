// ============================================================================
// MockGenerator : générateurs d'entités
// ============================================================================
// Chaque méthode retourne UN enregistrement complet, tiré dans des plages
// fixes. Aucune erreur possible : seule la source aléatoire est consommée.
//
// CONCEPTS RUST :
// 1. StdRng : générateur seedable (reproductible en test)
// 2. &mut self : chaque tirage fait avancer l'état du générateur
// 3. Plusieurs blocs impl : les builders vivent dans assets.rs, series.rs
//    et snapshot.rs mais étendent la même structure
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::mock::{CRYPTO_CANDIDATES, EXCHANGES};
use crate::models::{
    CryptoAsset, EarningsPoint, ExchangeStat, PerformancePoint, SecurityStatus, StakingPosition,
    Transaction, TransactionKind, TransactionStatus, User,
};

const FIRST_NAMES: [&str; 10] = [
    "Ada", "Alan", "Grace", "Linus", "Margaret", "Dennis", "Barbara", "Ken", "Radia", "Edsger",
];

const LAST_NAMES: [&str; 10] = [
    "Lovelace", "Turing", "Hopper", "Torvalds", "Hamilton", "Ritchie", "Liskov", "Thompson",
    "Perlman", "Dijkstra",
];

const EMAIL_DOMAINS: [&str; 4] = ["example.com", "mail.test", "tradewave.dev", "inbox.test"];

/// Générateur de données simulées
pub struct MockGenerator {
    rng: StdRng,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    /// Crée un générateur avec une seed aléatoire
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Crée un générateur avec une seed fixe (données reproductibles)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ========================================================================
    // Primitives de tirage
    // ========================================================================

    /// Montant dans [min, max] arrondi à `decimals` décimales
    ///
    /// CONCEPT : Arrondi décimal
    /// - 10^decimals, arrondi, puis division
    /// - Les bornes ont au plus `decimals` décimales, le résultat reste dedans
    pub fn random_amount(&mut self, min: f64, max: f64, decimals: i32) -> f64 {
        let raw = self.rng.gen_range(min..=max);
        let factor = 10f64.powi(decimals);
        (raw * factor).round() / factor
    }

    /// Identifiant v4 tiré depuis le générateur (reproductible avec une seed)
    pub fn random_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Index uniforme dans [0, len)
    pub(crate) fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Date uniforme dans les `days` jours précédant `end`
    pub fn random_date_within(&mut self, end: DateTime<Utc>, days: u32) -> DateTime<Utc> {
        let max_seconds = i64::from(days) * 24 * 60 * 60;
        let offset = self.rng.gen_range(0..=max_seconds);
        end - Duration::seconds(offset)
    }

    fn random_symbol(&mut self) -> String {
        let (_, symbol) = CRYPTO_CANDIDATES[self.random_index(CRYPTO_CANDIDATES.len())];
        symbol.to_string()
    }

    // ========================================================================
    // Entités
    // ========================================================================

    /// Génère l'utilisateur du compte
    ///
    /// Solde dans [10 000, 1 000 000], dernière connexion dans les 24h
    pub fn user(&mut self, now: DateTime<Utc>) -> User {
        let first = FIRST_NAMES[self.random_index(FIRST_NAMES.len())];
        let last = LAST_NAMES[self.random_index(LAST_NAMES.len())];
        let domain = EMAIL_DOMAINS[self.random_index(EMAIL_DOMAINS.len())];

        User {
            id: self.random_uuid(),
            name: format!("{} {}", first, last),
            email: format!("{}.{}@{}", first, last, domain).to_lowercase(),
            total_balance: self.random_amount(10_000.0, 1_000_000.0, 2),
            security: SecurityStatus {
                two_factor_enabled: self.rng.gen_bool(0.5),
                last_login: self.random_date_within(now, 1),
            },
        }
    }

    /// Génère une transaction datée dans la fenêtre `window_days` avant `now`
    ///
    /// Les champs value / price / amount sont tirés indépendamment
    pub fn transaction(&mut self, now: DateTime<Utc>, window_days: u32) -> Transaction {
        let kinds = TransactionKind::all();
        let statuses = TransactionStatus::all();

        Transaction {
            id: self.random_uuid(),
            date: self.random_date_within(now, window_days),
            kind: kinds[self.random_index(kinds.len())],
            asset: self.random_symbol(),
            amount: self.random_amount(0.1, 10.0, 6),
            price: self.random_amount(100.0, 50_000.0, 2),
            value: self.random_amount(100.0, 10_000.0, 2),
            fees: self.random_amount(1.0, 50.0, 2),
            status: statuses[self.random_index(statuses.len())],
        }
    }

    /// Génère un actif pour un candidat (nom, symbole) déjà choisi
    ///
    /// L'unicité des noms est gérée par `crypto_assets()`
    pub fn crypto_asset(&mut self, name: &str, symbol: &str) -> CryptoAsset {
        CryptoAsset {
            id: self.random_uuid(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            amount: self.random_amount(0.1, 100.0, 8),
            current_price: self.random_amount(100.0, 50_000.0, 2),
            value: self.random_amount(1_000.0, 100_000.0, 2),
            price_change_24h: self.random_amount(-10.0, 10.0, 2),
        }
    }

    /// Génère une position de staking
    pub fn staking_position(&mut self) -> StakingPosition {
        StakingPosition {
            asset: self.random_symbol(),
            amount: self.random_amount(1.0, 1_000.0, 2),
            apy: self.random_amount(1.0, 20.0, 2),
            earnings: self.random_amount(0.1, 100.0, 2),
        }
    }

    /// Génère les statistiques 24h, une par exchange suivi
    pub fn exchange_stats(&mut self) -> Vec<ExchangeStat> {
        EXCHANGES
            .iter()
            .map(|name| ExchangeStat {
                name: name.to_string(),
                volume_24h: self.random_amount(1_000_000.0, 10_000_000.0, 0),
                trades_24h: self.rng.gen_range(10_000..=1_000_000),
            })
            .collect()
    }

    /// Point de performance (valeur du portefeuille) à une date
    pub fn performance_point(&mut self, date: DateTime<Utc>) -> PerformancePoint {
        PerformancePoint {
            date,
            value: self.random_amount(10_000.0, 100_000.0, 2),
        }
    }

    /// Point de gains à une date
    pub fn earnings_point(&mut self, date: DateTime<Utc>) -> EarningsPoint {
        EarningsPoint {
            date,
            amount: self.random_amount(100.0, 10_000.0, 2),
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
