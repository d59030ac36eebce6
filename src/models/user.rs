// ============================================================================
// Structure : User
// ============================================================================
// Représente le titulaire du compte affiché dans le dashboard
//
// CONCEPTS RUST :
// 1. Composition : User contient un SecurityStatus
// 2. Uuid : identifiant unique typé (pas une simple String)
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Statut de sécurité du compte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityStatus {
    /// Authentification à deux facteurs activée
    pub two_factor_enabled: bool,

    /// Date de la dernière connexion
    pub last_login: DateTime<Utc>,
}

/// Utilisateur (titulaire du portefeuille)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Nom complet (ex: "Ada Lovelace")
    pub name: String,

    pub email: String,

    /// Solde total du compte en dollars (toujours >= 0)
    pub total_balance: f64,

    pub security: SecurityStatus,
}

impl User {
    /// Initiales pour l'avatar de l'écran Account (ex: "AL")
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - split_whitespace() découpe sur les espaces
    /// - filter_map() garde la première lettre de chaque mot
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: "ada@example.com".to_string(),
            total_balance: 12_345.67,
            security: SecurityStatus {
                two_factor_enabled: true,
                last_login: Utc::now(),
            },
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(user("Ada Lovelace").initials(), "AL");
        assert_eq!(user("grace brewster hopper").initials(), "GB");
        assert_eq!(user("").initials(), "");
    }
}
