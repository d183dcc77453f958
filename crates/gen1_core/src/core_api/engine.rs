use log::debug;

use crate::backup;
use crate::bag;
use crate::checksum;
use crate::image::SaveImage;
use crate::integrity::{self, IntegrityReport};
use crate::money;
use crate::profile::{self, GameVersion, LayoutProfile};

use super::error::{CoreError, CoreErrorCode};
use super::item_catalog::item_name;
use super::types::{BagItemEntry, Edit, PlannedChange, Snapshot};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// One loaded image plus the integrity report taken at load time. Edits are
/// refused unless that report was valid.
#[derive(Debug, Clone)]
pub struct Session {
    image: SaveImage,
    original: Vec<u8>,
    report: IntegrityReport,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Without a hint the layout is detected; if nothing matches, the default
    /// profile supplies the offsets and the report says so.
    pub fn open_bytes<B: Into<Vec<u8>>>(
        &self,
        bytes: B,
        hint: Option<GameVersion>,
    ) -> Result<Session, CoreError> {
        let bytes = bytes.into();
        let original = bytes.clone();

        let image = match hint {
            Some(version) => SaveImage::load(bytes, *profile::for_version(version))?,
            None => {
                let candidate = SaveImage::load(bytes, profile::DEFAULT)?;
                let detected = integrity::detect_version(&candidate);
                let selected = profile::for_version(detected);
                if selected == candidate.profile() {
                    candidate
                } else {
                    SaveImage::load(candidate.into_bytes(), *selected)?
                }
            }
        };
        debug!("opened save with profile {}", image.profile().name);

        let report = integrity::check(&image);
        Ok(Session {
            image,
            original,
            report,
        })
    }
}

impl Session {
    pub fn profile(&self) -> &LayoutProfile {
        self.image.profile()
    }

    /// Detection result; [`profile`](Self::profile) is the layout actually in use.
    pub fn version(&self) -> GameVersion {
        self.report.version
    }

    pub fn image(&self) -> &SaveImage {
        &self.image
    }

    /// Report taken when the session was opened.
    pub fn integrity(&self) -> &IntegrityReport {
        &self.report
    }

    /// Fresh report over the current (possibly edited) bytes.
    pub fn recheck(&self) -> IntegrityReport {
        integrity::check(&self.image)
    }

    pub fn is_editable(&self) -> bool {
        self.report.is_valid
    }

    pub fn money(&self) -> u32 {
        money::balance(&self.image)
    }

    pub fn bag_items(&self) -> Vec<BagItemEntry> {
        bag::entries(&self.image)
            .into_iter()
            .map(|entry| BagItemEntry {
                id: entry.id,
                quantity: entry.quantity,
                name: item_name(entry.id),
            })
            .collect()
    }

    pub fn stored_checksum(&self) -> u8 {
        checksum::stored(&self.image)
    }

    pub fn calculated_checksum(&self) -> u8 {
        checksum::computed(&self.image)
    }

    pub fn sha256(&self) -> String {
        backup::content_hash(self.image.as_bytes())
    }

    pub fn original_sha256(&self) -> String {
        backup::content_hash(&self.original)
    }

    pub fn matches_hash(&self, expected: &str) -> bool {
        self.sha256().eq_ignore_ascii_case(expected.trim())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version(),
            profile_name: self.profile().name.to_string(),
            size: self.image.len(),
            stored_checksum: self.stored_checksum(),
            calculated_checksum: self.calculated_checksum(),
            money: self.money(),
            bag: self.bag_items(),
            bag_capacity: self.profile().max_bag_items,
            sha256: self.sha256(),
        }
    }

    /// Describes what `edits` would do, applying them to a scratch copy so
    /// later edits see earlier ones. Fails on the first edit that would fail.
    pub fn plan(&self, edits: &[Edit]) -> Result<Vec<PlannedChange>, CoreError> {
        self.ensure_editable()?;
        let mut scratch = self.image.clone();
        edits
            .iter()
            .map(|edit| -> Result<PlannedChange, CoreError> {
                let change = describe(&scratch, edit)?;
                apply_to_image(&mut scratch, edit)?;
                Ok(change)
            })
            .collect()
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<(), CoreError> {
        self.ensure_editable()?;
        debug!("applying {edit:?}");
        apply_to_image(&mut self.image, edit)
    }

    pub fn apply_all(&mut self, edits: &[Edit]) -> Result<(), CoreError> {
        edits.iter().try_for_each(|edit| self.apply(edit))
    }

    pub fn set_money(&mut self, amount: u32) -> Result<(), CoreError> {
        self.apply(&Edit::SetMoney { amount })
    }

    pub fn set_item_quantity(&mut self, id: u8, quantity: u8) -> Result<(), CoreError> {
        self.apply(&Edit::SetItem { id, quantity })
    }

    pub fn remove_item(&mut self, id: u8) -> Result<(), CoreError> {
        self.apply(&Edit::RemoveItem { id })
    }

    pub fn to_bytes_unmodified(&self) -> Vec<u8> {
        self.original.clone()
    }

    /// Recomputes the checksum and returns the bytes to persist.
    pub fn to_bytes_modified(&mut self) -> Result<Vec<u8>, CoreError> {
        let checksum = checksum::recalculate_and_store(&mut self.image)?;
        debug!("checksum recalculated: 0x{checksum:02X}");
        Ok(self.image.as_bytes().to_vec())
    }

    fn ensure_editable(&self) -> Result<(), CoreError> {
        if self.report.is_valid {
            return Ok(());
        }
        Err(CoreError::new(
            CoreErrorCode::Load,
            format!(
                "cannot modify corrupted save file: {}",
                self.report.errors.join("; ")
            ),
        ))
    }
}

fn describe(image: &SaveImage, edit: &Edit) -> Result<PlannedChange, CoreError> {
    match *edit {
        Edit::SetMoney { amount } => Ok(PlannedChange::Money {
            from: money::balance(image),
            to: amount,
        }),
        Edit::SetItem { id, quantity } => Ok(PlannedChange::SetItem {
            id,
            name: item_name(id),
            from: bag::quantity_of(image, id),
            to: quantity,
        }),
        Edit::RemoveItem { id } => {
            let quantity = bag::quantity_of(image, id).ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::NotFound,
                    format!("{} not found in bag", item_name(id)),
                )
            })?;
            Ok(PlannedChange::RemoveItem {
                id,
                name: item_name(id),
                quantity,
            })
        }
    }
}

fn apply_to_image(image: &mut SaveImage, edit: &Edit) -> Result<(), CoreError> {
    match *edit {
        Edit::SetMoney { amount } => money::set_balance(image, amount),
        Edit::SetItem { id, quantity } => bag::set_or_add(image, id, quantity),
        Edit::RemoveItem { id } => bag::remove(image, id).map(|_| ()),
    }
}
