use super::error::{CoreError, CoreErrorCode};
use super::well_known_items;

/// Lowercase alphanumerics only, so `Rare Candy`, `rare_candy` and
/// `rarecandy` share a key.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == 'é' || c == 'É' { 'e' } else { c })
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn item_name(id: u8) -> String {
    well_known_items::lookup(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown Item (0x{id:02X})"))
}

pub fn item_id(name: &str) -> Option<u8> {
    let key = normalize_name(name);
    if key.is_empty() {
        return None;
    }
    well_known_items::lookup_by_key(&key)
}

/// Accepts an item name, a decimal id or a `0x`-prefixed hex id.
pub fn resolve_item(arg: &str) -> Result<u8, CoreError> {
    let trimmed = arg.trim();
    let numeric = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(u8::from_str_radix(hex, 16))
    } else if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Some(trimmed.parse::<u8>())
    } else {
        None
    };

    match numeric {
        Some(Ok(id)) => Ok(id),
        Some(Err(_)) => Err(CoreError::new(
            CoreErrorCode::InvalidValue,
            format!("item id '{arg}' is not a byte value"),
        )),
        None => item_id(trimmed).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NotFound,
                format!("unknown item: {arg}"),
            )
        }),
    }
}

pub fn known_items() -> Vec<(u8, &'static str)> {
    let mut items: Vec<_> = well_known_items::all().collect();
    items.sort_by_key(|&(id, _)| id);
    items
}
