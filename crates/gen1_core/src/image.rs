use crate::bag;
use crate::checksum;
use crate::core_api::CoreError;
use crate::profile::LayoutProfile;

/// A fixed-size save image bound to one layout profile for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveImage {
    bytes: Vec<u8>,
    profile: LayoutProfile,
}

impl SaveImage {
    pub fn load(bytes: Vec<u8>, profile: LayoutProfile) -> Result<Self, CoreError> {
        profile.validate()?;
        if bytes.len() != profile.image_size {
            return Err(CoreError::load(format!(
                "invalid save file size: expected {} bytes, got {} bytes",
                profile.image_size,
                bytes.len()
            )));
        }
        Ok(Self { bytes, profile })
    }

    /// All-zero image of the profile's size.
    pub fn zeroed(profile: LayoutProfile) -> Self {
        Self {
            bytes: vec![0; profile.image_size],
            profile,
        }
    }

    /// Zeroed image with an empty terminated bag, zero money and a valid checksum.
    pub fn fresh(profile: LayoutProfile) -> Result<Self, CoreError> {
        profile.validate()?;
        let mut image = Self::zeroed(profile);
        image.set_byte(profile.bag_count_offset, 0)?;
        image.set_byte(profile.bag_items_offset, bag::TERMINATOR)?;
        image.set_bytes(profile.money_offset, &vec![0; profile.money_width])?;
        checksum::recalculate_and_store(&mut image)?;
        Ok(image)
    }

    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Reads outside the image yield 0.
    pub fn get_byte(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    pub fn set_byte(&mut self, offset: usize, value: u8) -> Result<(), CoreError> {
        let size = self.bytes.len();
        let slot = self
            .bytes
            .get_mut(offset)
            .ok_or_else(|| CoreError::out_of_bounds(offset, 1, size))?;
        *slot = value;
        Ok(())
    }

    pub fn get_bytes(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end).map(<[u8]>::to_vec)
    }

    /// Writes the whole slice or nothing.
    pub fn set_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), CoreError> {
        let size = self.bytes.len();
        let end = offset
            .checked_add(data.len())
            .filter(|&end| end <= size)
            .ok_or_else(|| CoreError::out_of_bounds(offset, data.len(), size))?;
        self.bytes[offset..end].copy_from_slice(data);
        Ok(())
    }
}
