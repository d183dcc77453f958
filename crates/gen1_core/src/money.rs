use crate::core_api::CoreError;
use crate::digits;
use crate::image::SaveImage;
use crate::profile::LayoutProfile;

/// Decoded balance; 0 if the field is somehow out of the image.
pub fn balance(image: &SaveImage) -> u32 {
    let profile = image.profile();
    image
        .get_bytes(profile.money_offset, profile.money_width)
        .map(|bytes| digits::decode_field(&bytes))
        .unwrap_or(0)
}

pub fn set_balance(image: &mut SaveImage, amount: u32) -> Result<(), CoreError> {
    let profile = *image.profile();
    if amount > profile.max_money {
        return Err(CoreError::invalid_value(format!(
            "amount {amount} exceeds maximum {}",
            profile.max_money
        )));
    }

    let bytes = digits::encode_field(amount, profile.money_width);
    image.set_bytes(profile.money_offset, &bytes)
}

/// `(index within field, raw byte)` for every byte holding a nibble above 9.
pub fn invalid_bytes(image: &SaveImage) -> Vec<(usize, u8)> {
    invalid_bytes_for(image, image.profile())
}

pub fn invalid_bytes_for(image: &SaveImage, profile: &LayoutProfile) -> Vec<(usize, u8)> {
    let Some(bytes) = image.get_bytes(profile.money_offset, profile.money_width) else {
        return Vec::new();
    };
    bytes
        .into_iter()
        .enumerate()
        .filter(|&(_, b)| !digits::pair_is_valid(b))
        .collect()
}

/// `¥123,456`
pub fn format_money(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}
