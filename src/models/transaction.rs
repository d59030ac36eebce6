// ============================================================================
// Structure : Transaction
// ============================================================================
// Représente une opération sur le portefeuille (achat, vente, transfert)
//
// CONCEPTS RUST :
// 1. Enums fermés : le type et le statut ne peuvent prendre que 3 valeurs
//    (le compilateur refuse "swap" ou "cancelled")
// 2. #[serde(rename_all = "lowercase")] : "buy" dans le JSON, Buy en Rust
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type de transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
    Transfer,
}

impl TransactionKind {
    /// Label utilisé pour l'affichage et la recherche texte
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Sell => "sell",
            TransactionKind::Transfer => "transfer",
        }
    }

    /// Tous les types, dans l'ordre du sélecteur de filtre
    pub fn all() -> [TransactionKind; 3] {
        [
            TransactionKind::Buy,
            TransactionKind::Sell,
            TransactionKind::Transfer,
        ]
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Statut d'exécution d'une transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn all() -> [TransactionStatus; 3] {
        [
            TransactionStatus::Completed,
            TransactionStatus::Pending,
            TransactionStatus::Failed,
        ]
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Une transaction du portefeuille
///
/// Les champs `amount`, `price` et `value` sont générés indépendamment :
/// `value` n'est PAS forcément égal à `amount * price` (données simulées).
/// Voir `implied_value()` pour le produit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,

    /// Date d'exécution
    pub date: DateTime<Utc>,

    /// Type (sérialisé sous la clé "type" comme dans les exports)
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Symbole de l'actif (ex: "BTC")
    pub asset: String,

    /// Quantité échangée (>= 0)
    pub amount: f64,

    /// Prix unitaire en dollars (>= 0)
    pub price: f64,

    /// Valeur totale en dollars (>= 0)
    pub value: f64,

    /// Frais en dollars (>= 0)
    pub fees: f64,

    pub status: TransactionStatus,
}

impl Transaction {
    /// Produit quantité × prix unitaire
    pub fn implied_value(&self) -> f64 {
        self.amount * self.price
    }

    /// Formatte la transaction pour une ligne de tableau
    ///
    /// Format : "2024-05-01 14:02  buy       BTC     1.250000   $2500.00"
    pub fn display(&self) -> String {
        format!(
            "{:<17} {:<9} {:<6} {:>12.6} {:>12}",
            self.date.format("%Y-%m-%d %H:%M"),
            self.kind.label(),
            self.asset,
            self.amount,
            format!("${:.2}", self.value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Transfer).unwrap();
        assert_eq!(json, "\"transfer\"");

        let status: TransactionStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, TransactionStatus::Pending);
    }

    #[test]
    fn test_transaction_uses_type_key() {
        let tx = Transaction {
            id: Uuid::nil(),
            date: Utc::now(),
            kind: TransactionKind::Sell,
            asset: "ETH".to_string(),
            amount: 2.0,
            price: 1500.0,
            value: 200.0,
            fees: 1.5,
            status: TransactionStatus::Completed,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "sell");
        assert_eq!(json["status"], "completed");

        // value reste indépendante du produit amount * price
        assert_eq!(tx.implied_value(), 3000.0);
        assert_eq!(tx.value, 200.0);
    }

    #[test]
    fn test_display_contains_fields() {
        let tx = Transaction {
            id: Uuid::nil(),
            date: Utc::now(),
            kind: TransactionKind::Buy,
            asset: "BTC".to_string(),
            amount: 1.25,
            price: 100.0,
            value: 2500.0,
            fees: 3.0,
            status: TransactionStatus::Pending,
        };

        let line = tx.display();
        assert!(line.contains("buy"));
        assert!(line.contains("BTC"));
        assert!(line.contains("1.250000"));
        assert!(line.contains("$2500.00"));
    }
}
