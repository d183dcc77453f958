//! Pre-edit backups and their SHA-256 sidecars.
//!
//! For a source `P` the backup is `P.bak` and the sidecar `P.bak.sha256`
//! holds `<hex digest>  <backup path>\n`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use sha2::{Digest, Sha256};

use crate::core_api::{CoreError, CoreErrorCode};

const BACKUP_SUFFIX: &str = ".bak";
const SIDECAR_SUFFIX: &str = ".bak.sha256";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub backup_path: PathBuf,
    pub sidecar_path: PathBuf,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupVerification {
    pub backup_path: PathBuf,
    pub expected: String,
    pub actual: String,
}

impl BackupVerification {
    pub fn matches(&self) -> bool {
        self.expected.eq_ignore_ascii_case(&self.actual)
    }
}

/// Lowercase hex SHA-256.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

pub fn backup_path(source: &Path) -> PathBuf {
    with_suffix(source, BACKUP_SUFFIX)
}

pub fn sidecar_path(source: &Path) -> PathBuf {
    with_suffix(source, SIDECAR_SUFFIX)
}

pub fn sidecar_line(hash: &str, backup: &Path) -> String {
    format!("{hash}  {}\n", backup.display())
}

/// Writes `original` to the backup path and its digest to the sidecar.
pub fn write_backup(source: &Path, original: &[u8]) -> Result<BackupRecord, CoreError> {
    let backup_path = backup_path(source);
    let sidecar_path = sidecar_path(source);
    let sha256 = content_hash(original);

    fs::write(&backup_path, original).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to write backup {}: {e}", backup_path.display()),
        )
    })?;
    fs::write(&sidecar_path, sidecar_line(&sha256, &backup_path)).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to write hash file {}: {e}", sidecar_path.display()),
        )
    })?;

    info!("backup written to {} ({sha256})", backup_path.display());
    Ok(BackupRecord {
        backup_path,
        sidecar_path,
        sha256,
    })
}

/// Splits a sidecar line into `(hash, backup path)`.
pub fn parse_sidecar(contents: &str) -> Result<(String, PathBuf), CoreError> {
    let line = contents.lines().next().unwrap_or_default();
    let (hash, path) = line.split_once("  ").ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::Load,
            format!("malformed hash sidecar line: {line:?}"),
        )
    })?;
    let hash = hash.trim();
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::new(
            CoreErrorCode::Load,
            format!("malformed SHA-256 digest in sidecar: {hash:?}"),
        ));
    }
    Ok((hash.to_string(), PathBuf::from(path)))
}

/// Re-hashes the backup of `source` and compares it with its sidecar.
pub fn verify_backup(source: &Path) -> Result<BackupVerification, CoreError> {
    let sidecar = sidecar_path(source);
    let contents = fs::read_to_string(&sidecar).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to read hash file {}: {e}", sidecar.display()),
        )
    })?;
    let (expected, backup_path) = parse_sidecar(&contents)?;
    let bytes = fs::read(&backup_path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to read backup {}: {e}", backup_path.display()),
        )
    })?;

    Ok(BackupVerification {
        backup_path,
        expected,
        actual: content_hash(&bytes),
    })
}
