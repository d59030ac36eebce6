// ============================================================================
// Configuration
// ============================================================================
// Tous les réglages viennent de variables d'environnement (ou d'un fichier
// .env chargé par dotenvy). Valeur absente ou invalide => valeur par défaut.
//
// | Variable               | Défaut                              |
// |------------------------|-------------------------------------|
// | TRADEWAVE_WINDOW_DAYS  | 30                                  |
// | TRADEWAVE_LOG_DIR      | ./logs                              |
// | TRADEWAVE_DATA_DIR     | <data_dir>/tradewave (ou ./data)    |
// | TRADEWAVE_SEED         | aucune (données aléatoires)         |
// ============================================================================

use std::path::PathBuf;

use crate::mock::DEFAULT_WINDOW_DAYS;

/// Configuration de l'application, chargée une fois au démarrage
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fenêtre d'historique initiale (en jours, >= 1)
    pub window_days: u32,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,

    /// Répertoire de la session persistée et des exports
    pub data_dir: PathBuf,

    /// Seed optionnelle pour des données reproductibles
    pub seed: Option<u64>,
}

impl Config {
    /// Charge la configuration depuis l'environnement
    ///
    /// CONCEPT : 12-factor
    /// - dotenvy::dotenv().ok() : le fichier .env est optionnel
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let window_days = parse_env("TRADEWAVE_WINDOW_DAYS", DEFAULT_WINDOW_DAYS).max(1);

        let log_dir = std::env::var("TRADEWAVE_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./logs"));

        let data_dir = std::env::var("TRADEWAVE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let seed = std::env::var("TRADEWAVE_SEED")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            window_days,
            log_dir,
            data_dir,
            seed,
        }
    }

    /// Chemin du fichier de session
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Répertoire des exports
    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            log_dir: PathBuf::from("./logs"),
            data_dir: default_data_dir(),
            seed: None,
        }
    }
}

/// Répertoire de données de la plateforme
/// - Linux : ~/.local/share/tradewave
/// - macOS : ~/Library/Application Support/tradewave
/// - Windows : C:\Users\<user>\AppData\Roaming\tradewave
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tradewave"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Parse une variable d'environnement, `default` si absente ou invalide
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window_days, 30);
        assert!(config.seed.is_none());
        assert!(config.session_path().ends_with("session.json"));
        assert!(config.export_dir().ends_with("exports"));
    }

    #[test]
    fn test_parse_env_falls_back_on_missing_key() {
        let value: u32 = parse_env("TRADEWAVE_TEST_KEY_THAT_IS_NEVER_SET", 12);
        assert_eq!(value, 12);
    }
}
