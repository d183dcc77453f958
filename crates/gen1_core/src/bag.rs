//! The item bag: a count byte followed by a dense list of `(id, quantity)`
//! pairs. The count is authoritative; the `0xFF` after the last entry is only
//! a convention the game maintains.

use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};
use crate::image::SaveImage;
use crate::profile::{ENTRY_WIDTH, LayoutProfile};

pub const TERMINATOR: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BagEntry {
    pub id: u8,
    pub quantity: u8,
}

pub fn stored_count(image: &SaveImage) -> u8 {
    stored_count_for(image, image.profile())
}

pub fn stored_count_for(image: &SaveImage, profile: &LayoutProfile) -> u8 {
    image.get_byte(profile.bag_count_offset)
}

fn entry_offset(profile: &LayoutProfile, index: usize) -> usize {
    profile.bag_items_offset + index * ENTRY_WIDTH
}

/// Entries for display. A count above capacity is clamped here, never repaired.
pub fn entries(image: &SaveImage) -> Vec<BagEntry> {
    let profile = image.profile();
    let count = usize::from(stored_count(image)).min(profile.max_bag_items);

    (0..count)
        .map(|index| {
            let offset = entry_offset(profile, index);
            BagEntry {
                id: image.get_byte(offset),
                quantity: image.get_byte(offset + 1),
            }
        })
        .collect()
}

/// Scans the stored count as-is; images with an over-capacity count must be
/// rejected by the integrity check first.
pub fn find_index(image: &SaveImage, id: u8) -> Option<usize> {
    let profile = image.profile();
    (0..usize::from(stored_count(image))).find(|&index| image.get_byte(entry_offset(profile, index)) == id)
}

pub fn quantity_of(image: &SaveImage, id: u8) -> Option<u8> {
    find_index(image, id).map(|index| image.get_byte(entry_offset(image.profile(), index) + 1))
}

/// Overwrites the quantity of an existing entry, or appends a new one.
pub fn set_or_add(image: &mut SaveImage, id: u8, quantity: u8) -> Result<(), CoreError> {
    let profile = *image.profile();
    if quantity > profile.max_item_quantity {
        return Err(CoreError::invalid_value(format!(
            "quantity {quantity} exceeds maximum {}",
            profile.max_item_quantity
        )));
    }

    if let Some(index) = find_index(image, id) {
        return image.set_byte(entry_offset(&profile, index) + 1, quantity);
    }

    let count = stored_count(image);
    if usize::from(count) >= profile.max_bag_items {
        return Err(CoreError::new(
            CoreErrorCode::ListFull,
            format!("bag is full (max {} items)", profile.max_bag_items),
        ));
    }

    let offset = entry_offset(&profile, usize::from(count));
    image.set_bytes(offset, &[id, quantity, TERMINATOR])?;
    image.set_byte(profile.bag_count_offset, count + 1)
}

/// Removes an entry, shifting later entries down to keep the list dense.
pub fn remove(image: &mut SaveImage, id: u8) -> Result<BagEntry, CoreError> {
    let profile = *image.profile();
    let index = find_index(image, id).ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::NotFound,
            format!("item 0x{id:02X} not found in bag"),
        )
    })?;

    let count = usize::from(stored_count(image));
    let removed_offset = entry_offset(&profile, index);
    let removed = BagEntry {
        id: image.get_byte(removed_offset),
        quantity: image.get_byte(removed_offset + 1),
    };

    let tail_start = entry_offset(&profile, index + 1);
    let tail_len = (count - index - 1) * ENTRY_WIDTH;
    let tail = image
        .get_bytes(tail_start, tail_len)
        .ok_or_else(|| CoreError::out_of_bounds(tail_start, tail_len, image.len()))?;
    image.set_bytes(removed_offset, &tail)?;

    let new_count = count - 1;
    image.set_byte(entry_offset(&profile, new_count), TERMINATOR)?;
    image.set_byte(profile.bag_count_offset, new_count as u8)?;

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::YELLOW_NA;

    #[test]
    fn append_writes_terminator_after_entry() {
        let mut image = SaveImage::fresh(YELLOW_NA).expect("fresh image");
        set_or_add(&mut image, 0x28, 99).expect("add rare candy");

        assert_eq!(stored_count(&image), 1);
        assert_eq!(
            image.get_bytes(YELLOW_NA.bag_items_offset, 3),
            Some(vec![0x28, 99, TERMINATOR])
        );
    }

    #[test]
    fn remove_compacts_and_moves_terminator() {
        let mut image = SaveImage::fresh(YELLOW_NA).expect("fresh image");
        for (id, qty) in [(1, 5), (2, 6), (3, 7)] {
            set_or_add(&mut image, id, qty).expect("add");
        }

        let removed = remove(&mut image, 1).expect("remove first");
        assert_eq!(removed, BagEntry { id: 1, quantity: 5 });
        assert_eq!(
            entries(&image),
            vec![BagEntry { id: 2, quantity: 6 }, BagEntry { id: 3, quantity: 7 }]
        );
        assert_eq!(image.get_byte(YELLOW_NA.bag_items_offset + 4), TERMINATOR);
    }
}
