use std::{fs, path::Path};

use crate::{config::tmp_path, errors::LedgerError, ledger::LedgerSnapshot};

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &LedgerSnapshot, path: &Path) -> Result<(), LedgerError> {
    let tmp = tmp_path(path);
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<LedgerSnapshot, LedgerError> {
    let data = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
    tracing::debug!(
        path = %path.display(),
        accounts = snapshot.accounts.len(),
        cards = snapshot.cards.len(),
        "loaded ledger snapshot"
    );
    Ok(snapshot)
}
