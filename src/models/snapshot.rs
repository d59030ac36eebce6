// ============================================================================
// Structure : Snapshot
// ============================================================================
// Un lot complet de données générées pour une fenêtre donnée :
// utilisateur, avoirs, transactions, séries, exchanges, staking
//
// CONCEPT : Données en lecture seule
// - Les vues reçoivent &Snapshot et ne le modifient jamais
// - Un nouveau Snapshot remplace l'ancien à chaque régénération
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    CryptoAsset, EarningsPoint, ExchangeStat, PerformancePoint, StakingPosition, Transaction,
    User,
};

/// Snapshot complet du portefeuille
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nombre de jours d'historique couverts par les séries
    pub window_days: u32,

    /// Date de référence de la génération (dernier point des séries)
    pub generated_at: DateTime<Utc>,

    pub user: User,
    pub assets: Vec<CryptoAsset>,
    pub transactions: Vec<Transaction>,
    pub performance: Vec<PerformancePoint>,
    pub earnings: Vec<EarningsPoint>,
    pub exchanges: Vec<ExchangeStat>,
    pub staking: Vec<StakingPosition>,
}

impl Snapshot {
    /// Les N transactions les plus récentes (ordre chronologique inverse)
    ///
    /// CONCEPT RUST : Tri sur une copie de références
    /// - On trie des &Transaction, le snapshot n'est pas modifié
    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }

    /// Transactions dont la date tombe dans les `days` derniers jours
    pub fn transactions_in_last_days(&self, days: i64) -> usize {
        let since = self.generated_at - chrono::Duration::days(days);
        self.transactions.iter().filter(|t| t.date >= since).count()
    }

    /// Symboles des actifs présents dans les transactions (triés, sans doublon)
    pub fn transaction_assets(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.transactions.iter().map(|t| t.asset.clone()).collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    /// Total des gains de staking accumulés
    pub fn staking_earnings(&self) -> f64 {
        self.staking.iter().map(|s| s.earnings).sum()
    }
}
