// ============================================================================
// Vue filtrée des transactions
// ============================================================================
// Un filtre = conjonction de 4 prédicats :
// 1. recherche texte (sous-chaîne, insensible à la casse) sur actif, type, id
// 2. plage de dates inclusive
// 3. type exact, sauf si "tous" (None)
// 4. actif exact, sauf si "tous" (None)
//
// CONCEPT : Valeur "no-op"
// - Chaque prédicat a une valeur neutre (texte vide, plage ouverte, None)
// - TransactionFilter::default() ne filtre rien : l'entrée ressort intacte
// ============================================================================

use std::collections::BTreeMap;

use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionKind, VolumePoint};

/// Plage de dates inclusive, chaque borne est optionnelle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Plage ouverte (aucune contrainte)
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Plage [from, to] bornée des deux côtés
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Les `days` derniers jours jusqu'à `now` inclus
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self::between(now - Duration::days(days), now)
    }

    /// Vérifie si une date est dans la plage (bornes incluses)
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        let after_from = self.from.map_or(true, |from| *date >= from);
        let before_to = self.to.map_or(true, |to| *date <= to);
        after_from && before_to
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Parse une plage saisie sous la forme `DEBUT FIN` (dates YYYY-MM-DD)
    ///
    /// - `-` pour une borne ouverte : `2024-01-01 -`
    /// - Les deux jours sont inclus : FIN couvre toute la journée
    ///
    /// # Erreurs
    /// Format invalide, date inexistante, ou DEBUT après FIN
    pub fn parse(input: &str) -> Result<Self> {
        let bounds: Vec<&str> = input.split_whitespace().collect();
        ensure!(
            bounds.len() == 2,
            "Format attendu : DEBUT FIN (YYYY-MM-DD, '-' pour une borne ouverte)"
        );

        let from = parse_bound(bounds[0])?
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|start| start.and_utc());
        let to = parse_bound(bounds[1])?
            .and_then(|day| day.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .map(|end| end.and_utc());

        if let (Some(from), Some(to)) = (from, to) {
            ensure!(from <= to, "La date de début doit précéder la date de fin");
        }

        Ok(Self { from, to })
    }
}

/// Une borne : `-` (ouverte) ou une date YYYY-MM-DD
fn parse_bound(bound: &str) -> Result<Option<NaiveDate>> {
    if bound == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(bound, "%Y-%m-%d")
        .map(Some)
        .with_context(|| format!("Date invalide : {}", bound))
}

/// Ensemble des prédicats de la vue Transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Texte recherché (vide = pas de filtre)
    pub search: String,

    pub date_range: DateRange,

    /// Type exact (None = tous les types)
    pub kind: Option<TransactionKind>,

    /// Symbole exact (None = tous les actifs)
    pub asset: Option<String>,
}

impl TransactionFilter {
    /// Vrai si tous les prédicats sont à leur valeur neutre
    pub fn is_noop(&self) -> bool {
        self.search.is_empty()
            && self.date_range.is_unbounded()
            && self.kind.is_none()
            && self.asset.is_none()
    }

    /// Évalue la conjonction des 4 prédicats pour une transaction
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && self.date_range.contains(&transaction.date)
            && self.kind.map_or(true, |kind| transaction.kind == kind)
            && self
                .asset
                .as_deref()
                .map_or(true, |asset| transaction.asset == asset)
    }

    /// Sous-chaîne insensible à la casse sur actif, type ou identifiant
    fn matches_search(&self, transaction: &Transaction) -> bool {
        // Texte tel que saisi : les espaces font partie de la recherche
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        transaction.asset.to_lowercase().contains(&needle)
            || transaction.kind.label().contains(&needle)
            || transaction.id.to_string().contains(&needle)
    }
}

/// Retourne les transactions qui satisfont le filtre, dans l'ordre d'origine
///
/// CONCEPT RUST : Vec<&T>
/// - On retourne des références : pas de copie, pas de mutation
/// - La durée de vie du résultat est liée à celle de `transactions`
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Somme des valeurs d'un sous-ensemble filtré
pub fn volume_total(transactions: &[&Transaction]) -> f64 {
    transactions.iter().map(|t| t.value).sum()
}

/// Volume agrégé par jour calendaire, du plus ancien au plus récent
///
/// CONCEPT RUST : BTreeMap
/// - Les clés (NaiveDate) restent triées : la série sort déjà ordonnée
pub fn daily_volume(transactions: &[&Transaction]) -> Vec<VolumePoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for transaction in transactions {
        *by_day.entry(transaction.date.date_naive()).or_insert(0.0) += transaction.value;
    }

    by_day
        .into_iter()
        .filter_map(|(day, volume)| {
            day.and_hms_opt(0, 0, 0).map(|midnight| VolumePoint {
                date: midnight.and_utc(),
                volume,
            })
        })
        .collect()
}

/// Résumé affiché au-dessus de la liste filtrée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionSummary {
    pub count: usize,
    pub volume: f64,
}

impl TransactionSummary {
    pub fn from_filtered(transactions: &[&Transaction]) -> Self {
        Self {
            count: transactions.len(),
            volume: volume_total(transactions),
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;
    use crate::models::TransactionStatus;
    use uuid::Uuid;

    fn tx(asset: &str, kind: TransactionKind, value: f64, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date,
            kind,
            asset: asset.to_string(),
            amount: 1.0,
            price: 100.0,
            value,
            fees: 1.0,
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_noop_filter_returns_input_unchanged() {
        let mut generator = MockGenerator::with_seed(4);
        let now = Utc::now();
        let transactions: Vec<Transaction> =
            (0..20).map(|_| generator.transaction(now, 30)).collect();

        let filter = TransactionFilter::default();
        assert!(filter.is_noop());

        let filtered = filter_transactions(&transactions, &filter);
        assert_eq!(filtered.len(), transactions.len());
        for (kept, original) in filtered.iter().zip(&transactions) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn test_filter_by_kind_and_volume() {
        let now = Utc::now();
        let transactions = vec![
            tx("BTC", TransactionKind::Buy, 100.0, now),
            tx("ETH", TransactionKind::Sell, 200.0, now),
        ];

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Sell),
            ..Default::default()
        };

        let filtered = filter_transactions(&transactions, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].asset, "ETH");
        assert_eq!(filtered[0].kind, TransactionKind::Sell);
        assert_eq!(volume_total(&filtered), 200.0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let now = Utc::now();
        let transactions = vec![
            tx("BTC", TransactionKind::Buy, 100.0, now),
            tx("ETH", TransactionKind::Transfer, 200.0, now),
        ];

        let by_asset = TransactionFilter {
            search: "btc".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&transactions, &by_asset).len(), 1);

        let by_kind = TransactionFilter {
            search: "TRANS".to_string(),
            ..Default::default()
        };
        let filtered = filter_transactions(&transactions, &by_kind);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].asset, "ETH");

        let id_fragment = transactions[1].id.to_string()[..8].to_uppercase();
        let by_id = TransactionFilter {
            search: id_fragment,
            ..Default::default()
        };
        assert_eq!(filter_transactions(&transactions, &by_id)[0].asset, "ETH");
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let now = Utc::now();
        let old = now - Duration::days(10);
        let transactions = vec![
            tx("BTC", TransactionKind::Buy, 1.0, old),
            tx("BTC", TransactionKind::Buy, 2.0, now),
        ];

        let exact = TransactionFilter {
            date_range: DateRange::between(old, now),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&transactions, &exact).len(), 2);

        let recent = TransactionFilter {
            date_range: DateRange::last_days(7, now),
            ..Default::default()
        };
        let filtered = filter_transactions(&transactions, &recent);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].value, 2.0);
    }

    #[test]
    fn test_predicates_are_combined() {
        let now = Utc::now();
        let transactions = vec![
            tx("BTC", TransactionKind::Buy, 1.0, now),
            tx("BTC", TransactionKind::Sell, 2.0, now),
            tx("ETH", TransactionKind::Sell, 4.0, now),
            tx("ETH", TransactionKind::Buy, 8.0, now),
        ];

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Sell),
            asset: Some("ETH".to_string()),
            ..Default::default()
        };

        let filtered = filter_transactions(&transactions, &filter);
        let summary = TransactionSummary::from_filtered(&filtered);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.volume, 4.0);
    }

    #[test]
    fn test_order_is_preserved() {
        let now = Utc::now();
        let transactions = vec![
            tx("SOL", TransactionKind::Buy, 3.0, now),
            tx("BTC", TransactionKind::Buy, 1.0, now),
            tx("SOL", TransactionKind::Buy, 2.0, now),
        ];

        let filter = TransactionFilter {
            asset: Some("SOL".to_string()),
            ..Default::default()
        };

        let values: Vec<f64> = filter_transactions(&transactions, &filter)
            .iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(values, vec![3.0, 2.0]);
    }

    #[test]
    fn test_daily_volume_groups_by_day() {
        let now = Utc::now();
        let yesterday = now - Duration::days(1);
        let transactions = vec![
            tx("BTC", TransactionKind::Buy, 10.0, now),
            tx("ETH", TransactionKind::Sell, 5.0, yesterday),
            tx("SOL", TransactionKind::Buy, 2.5, now),
        ];
        let refs: Vec<&Transaction> = transactions.iter().collect();

        let series = daily_volume(&refs);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].volume, 5.0);
        assert_eq!(series[1].volume, 12.5);
        assert!(series[0].date < series[1].date);

        assert!(daily_volume(&[]).is_empty());
    }

    #[test]
    fn test_search_is_matched_as_typed() {
        let now = Utc::now();
        let transactions = vec![tx("BTC", TransactionKind::Buy, 1.0, now)];

        let padded = TransactionFilter {
            search: " btc ".to_string(),
            ..Default::default()
        };
        assert!(filter_transactions(&transactions, &padded).is_empty());

        let blank = TransactionFilter {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert!(!blank.is_noop());
    }

    #[test]
    fn test_parse_date_range() {
        let range = DateRange::parse("2024-01-01 2024-01-31").unwrap();
        let inside = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(18, 0, 0))
            .unwrap()
            .and_utc();
        let after = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
            .and_utc();
        assert!(range.contains(&inside));
        assert!(!range.contains(&after));

        let open_end = DateRange::parse("2024-01-01 -").unwrap();
        assert!(open_end.from.is_some() && open_end.to.is_none());

        assert!(DateRange::parse("2024-02-01 2024-01-01").is_err());
        assert!(DateRange::parse("2024-13-01 -").is_err());
        assert!(DateRange::parse("2024-01-01").is_err());
    }
}
