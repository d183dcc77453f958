//! Layout profiles: the byte offsets and limits of one save-format variant.
//!
//! Detection walks [`KNOWN`] in order, so two variants with byte-identical
//! layouts (Yellow and Red/Blue) can only ever resolve to the first one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_api::CoreError;

pub const SAVE_SIZE: usize = 0x8000;
pub const ENTRY_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVersion {
    Unknown,
    YellowNa,
    RedBlueNa,
}

impl GameVersion {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::YellowNa => "Pokémon Yellow (North America)",
            Self::RedBlueNa => "Pokémon Red/Blue (North America)",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses the short names accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "yellow" | "yellow-na" | "y" => Some(Self::YellowNa),
            "red" | "blue" | "red-blue" | "redblue" | "red-blue-na" | "rb" => Some(Self::RedBlueNa),
            _ => None,
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn inclusive(start: usize, last: usize) -> Self {
        Self {
            start,
            end: last + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Last offset inside the range.
    pub fn last(&self) -> usize {
        self.end.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutProfile {
    pub version: GameVersion,
    pub name: &'static str,
    pub image_size: usize,
    pub checksum_range: ByteRange,
    pub checksum_offset: usize,
    pub bag_count_offset: usize,
    pub bag_items_offset: usize,
    pub max_bag_items: usize,
    pub max_item_quantity: u8,
    pub money_offset: usize,
    pub money_width: usize,
    pub max_money: u32,
}

pub const YELLOW_NA: LayoutProfile = LayoutProfile {
    version: GameVersion::YellowNa,
    name: "Pokémon Yellow (North America)",
    image_size: SAVE_SIZE,
    checksum_range: ByteRange::inclusive(0x2598, 0x3522),
    checksum_offset: 0x3523,
    bag_count_offset: 0x25C9,
    bag_items_offset: 0x25CA,
    max_bag_items: 20,
    max_item_quantity: 99,
    money_offset: 0x25F3,
    money_width: 3,
    max_money: 999_999,
};

pub const RED_BLUE_NA: LayoutProfile = LayoutProfile {
    version: GameVersion::RedBlueNa,
    name: "Pokémon Red/Blue (North America)",
    ..YELLOW_NA
};

/// Offsets used when no known profile matches.
pub const DEFAULT: LayoutProfile = YELLOW_NA;

/// Detection priority order.
pub const KNOWN: [LayoutProfile; 2] = [YELLOW_NA, RED_BLUE_NA];

pub fn for_version(version: GameVersion) -> &'static LayoutProfile {
    KNOWN
        .iter()
        .find(|profile| profile.version == version)
        .unwrap_or(&DEFAULT)
}

impl LayoutProfile {
    /// Byte range occupied by the bag: entries plus the sentinel slot after a full list.
    pub fn bag_region(&self) -> ByteRange {
        ByteRange {
            start: self.bag_items_offset,
            end: self.bag_items_offset + self.max_bag_items * ENTRY_WIDTH + 1,
        }
    }

    pub fn money_range(&self) -> ByteRange {
        ByteRange {
            start: self.money_offset,
            end: self.money_offset + self.money_width,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.checksum_range.is_empty() {
            return Err(CoreError::load(format!(
                "{}: checksum range is empty",
                self.name
            )));
        }
        if self.checksum_range.end > self.image_size {
            return Err(CoreError::load(format!(
                "{}: checksum range ends at {:#06X}, image size {:#06X}",
                self.name, self.checksum_range.end, self.image_size
            )));
        }
        if self.checksum_range.contains(self.checksum_offset) {
            return Err(CoreError::load(format!(
                "{}: checksum offset {:#06X} lies inside its own range {:#06X}..={:#06X}",
                self.name,
                self.checksum_offset,
                self.checksum_range.start,
                self.checksum_range.last()
            )));
        }

        for (label, offset, len) in [
            ("checksum", self.checksum_offset, 1),
            ("bag count", self.bag_count_offset, 1),
            ("bag items", self.bag_items_offset, self.bag_region().len()),
            ("money", self.money_offset, self.money_width),
        ] {
            if offset + len > self.image_size {
                return Err(CoreError::load(format!(
                    "{}: {label} field {:#06X}+{len} exceeds image size {:#06X}",
                    self.name, offset, self.image_size
                )));
            }
        }

        let bag = self.bag_region();
        let money = self.money_range();
        for (label, range) in [("bag", bag), ("money", money)] {
            if !self.checksum_range.contains(range.start) || !self.checksum_range.contains(range.last()) {
                return Err(CoreError::load(format!(
                    "{}: {label} field lies outside the checksummed range",
                    self.name
                )));
            }
        }
        if bag.start < money.end && money.start < bag.end {
            return Err(CoreError::load(format!(
                "{}: bag and money fields overlap",
                self.name
            )));
        }

        if self.bag_count_offset >= self.bag_items_offset {
            return Err(CoreError::load(format!(
                "{}: bag count must precede the bag entries",
                self.name
            )));
        }
        if self.max_bag_items > usize::from(u8::MAX) {
            return Err(CoreError::load(format!(
                "{}: bag capacity {} does not fit the count byte",
                self.name, self.max_bag_items
            )));
        }
        if self.money_width == 0 || self.money_width > 4 {
            return Err(CoreError::load(format!(
                "{}: unsupported money width {}",
                self.name, self.money_width
            )));
        }
        let capacity = 100u64.pow(self.money_width as u32) - 1;
        if u64::from(self.max_money) > capacity {
            return Err(CoreError::load(format!(
                "{}: money field of {} bytes cannot hold {}",
                self.name, self.money_width, self.max_money
            )));
        }

        Ok(())
    }
}
