use crate::core_api::CoreError;
use crate::image::SaveImage;
use crate::profile::{ByteRange, LayoutProfile};

/// Bitwise NOT of the wrapping 8-bit sum of `range`.
pub fn calculate(image: &SaveImage, range: ByteRange) -> u8 {
    let sum = (range.start..range.end).fold(0u8, |acc, offset| acc.wrapping_add(image.get_byte(offset)));
    !sum
}

pub fn stored(image: &SaveImage) -> u8 {
    image.get_byte(image.profile().checksum_offset)
}

pub fn computed(image: &SaveImage) -> u8 {
    calculate(image, image.profile().checksum_range)
}

pub fn is_valid(image: &SaveImage) -> bool {
    is_valid_for(image, image.profile())
}

/// Checks the bytes against another profile's offsets.
pub fn is_valid_for(image: &SaveImage, profile: &LayoutProfile) -> bool {
    calculate(image, profile.checksum_range) == image.get_byte(profile.checksum_offset)
}

pub fn recalculate_and_store(image: &mut SaveImage) -> Result<u8, CoreError> {
    let checksum = computed(image);
    let offset = image.profile().checksum_offset;
    image.set_byte(offset, checksum)?;
    Ok(checksum)
}
