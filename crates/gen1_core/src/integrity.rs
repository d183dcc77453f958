use log::debug;
use serde::{Deserialize, Serialize};

use crate::bag;
use crate::checksum;
use crate::image::SaveImage;
use crate::money;
use crate::profile::{self, GameVersion, LayoutProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub version: GameVersion,
    pub checksum_valid: bool,
    pub bag_valid: bool,
    pub money_valid: bool,
}

impl IntegrityReport {
    fn error(&mut self, message: String) {
        self.errors.push(message);
        self.is_valid = false;
    }
}

/// Runs every structural check; none of them stops the others.
pub fn check(image: &SaveImage) -> IntegrityReport {
    let profile = image.profile();
    let mut report = IntegrityReport {
        is_valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
        version: detect_version(image),
        checksum_valid: checksum::is_valid(image),
        bag_valid: true,
        money_valid: true,
    };

    if !report.checksum_valid {
        report.error(format!(
            "Invalid checksum: stored 0x{:02X}, calculated 0x{:02X}",
            checksum::stored(image),
            checksum::computed(image)
        ));
    }

    let count = bag::stored_count(image);
    if usize::from(count) > profile.max_bag_items {
        report.bag_valid = false;
        report.error(format!(
            "Bag count {count} exceeds maximum {}",
            profile.max_bag_items
        ));
    } else if usize::from(count) < profile.max_bag_items {
        let terminator_offset =
            profile.bag_items_offset + usize::from(count) * profile::ENTRY_WIDTH;
        if image.get_byte(terminator_offset) != bag::TERMINATOR {
            report
                .warnings
                .push("Missing bag terminator byte (0xFF)".to_string());
        }
    }

    for (index, byte) in money::invalid_bytes(image) {
        report.money_valid = false;
        report.error(format!("Invalid digit encoding in money byte {index}: 0x{byte:02X}"));
    }

    if report.version == GameVersion::Unknown {
        report
            .warnings
            .push("Unknown version: no known layout matched, offsets may be incorrect".to_string());
    }

    for message in &report.warnings {
        debug!("{message}");
    }

    report
}

/// First known profile whose checksum, bag bound and money digits all hold.
pub fn detect_version(image: &SaveImage) -> GameVersion {
    profile::KNOWN
        .iter()
        .find(|candidate| structure_matches(image, candidate))
        .map(|candidate| candidate.version)
        .unwrap_or(GameVersion::Unknown)
}

fn structure_matches(image: &SaveImage, candidate: &LayoutProfile) -> bool {
    image.len() == candidate.image_size
        && checksum::is_valid_for(image, candidate)
        && usize::from(bag::stored_count_for(image, candidate)) <= candidate.max_bag_items
        && money::invalid_bytes_for(image, candidate).is_empty()
}
