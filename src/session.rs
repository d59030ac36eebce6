// ============================================================================
// Session : "l'utilisateur est-il connecté ?"
// ============================================================================
// Objet explicite passé à l'App (pas d'état global). Cycle de vie :
// - login(name)  : authentifié, flag persisté
// - logout()     : flag effacé, persisté
//
// Le seul état persisté de l'application est ce flag, stocké en JSON
// dans <data_dir>/session.json. Aucune sécurité réelle : c'est une démo.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Contenu persisté de la session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionState {
    logged_in: bool,
    username: Option<String>,
    logged_in_at: Option<DateTime<Utc>>,
}

/// Session de l'utilisateur, adossée à un fichier JSON
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    state: SessionState,
}

impl Session {
    /// Charge la session depuis `path`
    ///
    /// Fichier absent ou illisible => session déconnectée (pas une erreur)
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = ?path, error = %e, "Corrupted session file, starting logged out");
                SessionState::default()
            }),
            Err(_) => {
                debug!(path = ?path, "No session file, starting logged out");
                SessionState::default()
            }
        };

        Self { path, state }
    }

    /// Session en mémoire uniquement (jamais écrite sur disque tant que
    /// `save()` n'est pas appelée)
    pub fn anonymous(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: SessionState::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.logged_in
    }

    pub fn username(&self) -> Option<&str> {
        self.state.username.as_deref()
    }

    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.state.logged_in_at
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Connecte l'utilisateur et persiste le flag
    pub fn login(&mut self, username: &str) -> Result<()> {
        self.state = SessionState {
            logged_in: true,
            username: Some(username.to_string()),
            logged_in_at: Some(Utc::now()),
        };
        info!(username = %username, "User logged in");
        self.save()
    }

    /// Déconnecte l'utilisateur et persiste le flag
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::default();
        info!("User logged out");
        self.save()
    }

    /// Écrit l'état courant dans le fichier de session
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Échec de la création du répertoire {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.state)
            .context("Échec de la sérialisation de la session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Échec de l'écriture de {}", self.path.display()))?;

        debug!(path = ?self.path, logged_in = self.state.logged_in, "Session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(dir.path().join("session.json"));
        assert!(!session.is_authenticated());
        assert!(session.username().is_none());
    }

    #[test]
    fn test_login_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = Session::load(&path);
        session.login("ada").unwrap();
        assert!(session.is_authenticated());

        let reloaded = Session::load(&path);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.username(), Some("ada"));
        assert!(reloaded.logged_in_at().is_some());
    }

    #[test]
    fn test_logout_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = Session::load(&path);
        session.login("ada").unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());

        assert!(!Session::load(&path).is_authenticated());
    }

    #[test]
    fn test_corrupted_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(!Session::load(&path).is_authenticated());
    }
}
