//! The edit-and-persist protocol.
//!
//! [`WriteTransaction::prepare`] loads and checks the source, applies every
//! edit in memory and recomputes the checksum. Nothing touches the disk until
//! [`PreparedTransaction::commit`], which backs up the original, writes the
//! destination and re-reads it to confirm the checksum. A verification
//! failure is reported, not rolled back; the backup is left in place.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::backup::{self, BackupRecord};
use crate::checksum;
use crate::core_api::{CoreError, CoreErrorCode, Edit, Engine, PlannedChange};
use crate::image::SaveImage;
use crate::integrity::IntegrityReport;
use crate::profile::{GameVersion, LayoutProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionConfig {
    pub destination: PathBuf,
    pub version_hint: Option<GameVersion>,
}

impl TransactionConfig {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            version_hint: None,
        }
    }

    pub fn with_version_hint(mut self, version: Option<GameVersion>) -> Self {
        self.version_hint = version;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WriteTransaction {
    config: TransactionConfig,
}

#[derive(Debug, Clone)]
pub struct PreparedTransaction {
    source: PathBuf,
    config: TransactionConfig,
    profile: LayoutProfile,
    report: IntegrityReport,
    original: Vec<u8>,
    modified: Vec<u8>,
    plan: Vec<PlannedChange>,
    old_checksum: u8,
    new_checksum: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub destination: PathBuf,
    pub backup: BackupRecord,
    /// Version of the layout the edit was written with.
    pub version: GameVersion,
    /// Version reported by structural detection on the source.
    pub detected: GameVersion,
    pub old_checksum: u8,
    pub new_checksum: u8,
    pub changes: Vec<PlannedChange>,
}

impl WriteTransaction {
    pub fn new(config: TransactionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    pub fn prepare(&self, source: &Path, edits: &[Edit]) -> Result<PreparedTransaction, CoreError> {
        let original = fs::read(source).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read save file {}: {e}", source.display()),
            )
        })?;
        self.prepare_bytes(source, original, edits)
    }

    /// Same as [`prepare`](Self::prepare) with the source bytes already in hand.
    pub fn prepare_bytes(
        &self,
        source: &Path,
        original: Vec<u8>,
        edits: &[Edit],
    ) -> Result<PreparedTransaction, CoreError> {
        debug!("loading {}", source.display());
        let mut session = Engine::new().open_bytes(original, self.config.version_hint)?;

        let report = session.integrity().clone();
        if !report.is_valid {
            return Err(CoreError::load(format!(
                "cannot modify corrupted save file: {}",
                report.errors.join("; ")
            )));
        }
        debug!("integrity check passed, detected {}", report.version);

        let old_checksum = session.stored_checksum();
        let plan = session.plan(edits)?;
        session.apply_all(edits)?;
        let modified = session.to_bytes_modified()?;
        let new_checksum = session.stored_checksum();

        Ok(PreparedTransaction {
            source: source.to_path_buf(),
            config: self.config.clone(),
            profile: *session.profile(),
            report,
            original: session.to_bytes_unmodified(),
            modified,
            plan,
            old_checksum,
            new_checksum,
        })
    }

    pub fn run(&self, source: &Path, edits: &[Edit]) -> Result<TransactionOutcome, CoreError> {
        self.prepare(source, edits)?.commit()
    }
}

impl PreparedTransaction {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.config.destination
    }

    pub fn report(&self) -> &IntegrityReport {
        &self.report
    }

    /// Layout in use; differs from the detected version when a hint overrides detection.
    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn plan(&self) -> &[PlannedChange] {
        &self.plan
    }

    pub fn old_checksum(&self) -> u8 {
        self.old_checksum
    }

    pub fn new_checksum(&self) -> u8 {
        self.new_checksum
    }

    pub fn original_bytes(&self) -> &[u8] {
        &self.original
    }

    pub fn modified_bytes(&self) -> &[u8] {
        &self.modified
    }

    pub fn commit(self) -> Result<TransactionOutcome, CoreError> {
        let backup = backup::write_backup(&self.source, &self.original)?;

        let destination = self.config.destination;
        fs::write(&destination, &self.modified).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to write save file {}: {e}", destination.display()),
            )
        })?;
        info!("wrote {} bytes to {}", self.modified.len(), destination.display());

        verify_written(&destination, self.profile)?;
        info!("verified checksum 0x{:02X} in {}", self.new_checksum, destination.display());

        Ok(TransactionOutcome {
            destination,
            backup,
            version: self.profile.version,
            detected: self.report.version,
            old_checksum: self.old_checksum,
            new_checksum: self.new_checksum,
            changes: self.plan,
        })
    }
}

/// Re-reads `path` and checks only its checksum.
pub fn verify_written(path: &Path, profile: LayoutProfile) -> Result<(), CoreError> {
    let verification_failed = |detail: String| {
        CoreError::new(
            CoreErrorCode::VerificationFailed,
            format!("verification of {} failed: {detail}", path.display()),
        )
    };

    let bytes = fs::read(path).map_err(|e| verification_failed(e.to_string()))?;
    let image = SaveImage::load(bytes, profile).map_err(|e| verification_failed(e.message))?;
    if !checksum::is_valid(&image) {
        return Err(verification_failed(format!(
            "checksum invalid after write (stored 0x{:02X}, calculated 0x{:02X})",
            checksum::stored(&image),
            checksum::computed(&image)
        )));
    }
    Ok(())
}
