// ============================================================================
// Export des transactions filtrées
// ============================================================================
// Écrit la vue filtrée courante en JSON lisible :
//   <export_dir>/transactions-YYYYMMDD-HHMMSS-mmm.json
//
// Un export n'écrase jamais un fichier existant : si le nom est pris
// (deux exports dans la même milliseconde), on ajoute un suffixe -1, -2...
// ============================================================================

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::metrics::TransactionSummary;
use crate::models::Transaction;

/// Document exporté : résumé + lignes
#[derive(Debug, Serialize)]
struct TransactionExport<'a> {
    exported_at: chrono::DateTime<Utc>,
    count: usize,
    volume: f64,
    transactions: &'a [&'a Transaction],
}

/// Exporte les transactions dans `dir` et retourne le chemin du fichier créé
#[instrument(skip(transactions), fields(count = transactions.len()))]
pub fn export_transactions(dir: &Path, transactions: &[&Transaction]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Échec de la création du répertoire {}", dir.display()))?;

    let now = Utc::now();
    let summary = TransactionSummary::from_filtered(transactions);
    let document = TransactionExport {
        exported_at: now,
        count: summary.count,
        volume: summary.volume,
        transactions,
    };

    let json = serde_json::to_string_pretty(&document)
        .context("Échec de la sérialisation de l'export")?;

    let stem = format!("transactions-{}", now.format("%Y%m%d-%H%M%S-%3f"));
    let (path, mut file) = create_unique(dir, &stem)?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

    info!(path = ?path, "Transactions exported");
    Ok(path)
}

/// Crée `<stem>.json`, ou `<stem>-N.json` si le nom est déjà pris
///
/// CONCEPT RUST : create_new(true)
/// - L'ouverture échoue avec AlreadyExists au lieu d'écraser
/// - Le test d'existence et la création sont atomiques
fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            format!("{}.json", stem)
        } else {
            format!("{}-{}.json", stem, attempt)
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = ?path, "Export file name taken, trying next suffix");
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Échec de la création de {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGenerator;

    #[test]
    fn test_export_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = MockGenerator::with_seed(6);
        let now = Utc::now();
        let transactions: Vec<Transaction> =
            (0..3).map(|_| generator.transaction(now, 7)).collect();
        let refs: Vec<&Transaction> = transactions.iter().collect();

        let path = export_transactions(dir.path(), &refs).unwrap();
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["count"], 3);
        assert_eq!(value["transactions"].as_array().map(|a| a.len()), Some(3));

        let parsed: Vec<Transaction> =
            serde_json::from_value(value["transactions"].clone()).unwrap();
        assert_eq!(parsed, transactions);
    }

    #[test]
    fn test_back_to_back_exports_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = MockGenerator::with_seed(8);
        let now = Utc::now();
        let transactions: Vec<Transaction> =
            (0..3).map(|_| generator.transaction(now, 7)).collect();
        let all: Vec<&Transaction> = transactions.iter().collect();

        let first = export_transactions(dir.path(), &all).unwrap();
        let second = export_transactions(dir.path(), &all[..1]).unwrap();
        assert_ne!(first, second);

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);

        let content = fs::read_to_string(&first).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_create_unique_adds_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let (a, _) = create_unique(dir.path(), "transactions-x").unwrap();
        let (b, _) = create_unique(dir.path(), "transactions-x").unwrap();

        assert!(a.ends_with("transactions-x.json"));
        assert!(b.ends_with("transactions-x-1.json"));
    }
}
