//! Built-in Generation 1 item table (bag item ids as stored in the save).
//! Badges, HMs and TMs are left out; they render as unknown ids.

struct WellKnownItem {
    id: u8,
    name: &'static str,
}

#[rustfmt::skip]
const WELL_KNOWN_ITEMS: &[WellKnownItem] = &[
    // Balls
    WellKnownItem { id: 0x01, name: "Master Ball" },
    WellKnownItem { id: 0x02, name: "Ultra Ball" },
    WellKnownItem { id: 0x03, name: "Great Ball" },
    WellKnownItem { id: 0x04, name: "Poké Ball" },
    WellKnownItem { id: 0x08, name: "Safari Ball" },

    // Key items
    WellKnownItem { id: 0x05, name: "Town Map" },
    WellKnownItem { id: 0x06, name: "Bicycle" },
    WellKnownItem { id: 0x09, name: "Pokédex" },
    WellKnownItem { id: 0x1F, name: "Old Amber" },
    WellKnownItem { id: 0x29, name: "Dome Fossil" },
    WellKnownItem { id: 0x2A, name: "Helix Fossil" },
    WellKnownItem { id: 0x2B, name: "Secret Key" },
    WellKnownItem { id: 0x2D, name: "Bike Voucher" },
    WellKnownItem { id: 0x30, name: "Card Key" },
    WellKnownItem { id: 0x3F, name: "S.S. Ticket" },
    WellKnownItem { id: 0x40, name: "Gold Teeth" },
    WellKnownItem { id: 0x45, name: "Coin Case" },
    WellKnownItem { id: 0x46, name: "Oak's Parcel" },
    WellKnownItem { id: 0x47, name: "Itemfinder" },
    WellKnownItem { id: 0x48, name: "Silph Scope" },
    WellKnownItem { id: 0x49, name: "Poké Flute" },
    WellKnownItem { id: 0x4A, name: "Lift Key" },
    WellKnownItem { id: 0x4B, name: "Exp. All" },
    WellKnownItem { id: 0x4C, name: "Old Rod" },
    WellKnownItem { id: 0x4D, name: "Good Rod" },
    WellKnownItem { id: 0x4E, name: "Super Rod" },

    // Evolution stones
    WellKnownItem { id: 0x0A, name: "Moon Stone" },
    WellKnownItem { id: 0x20, name: "Fire Stone" },
    WellKnownItem { id: 0x21, name: "Thunder Stone" },
    WellKnownItem { id: 0x22, name: "Water Stone" },
    WellKnownItem { id: 0x2F, name: "Leaf Stone" },

    // Medicine
    WellKnownItem { id: 0x0B, name: "Antidote" },
    WellKnownItem { id: 0x0C, name: "Burn Heal" },
    WellKnownItem { id: 0x0D, name: "Ice Heal" },
    WellKnownItem { id: 0x0E, name: "Awakening" },
    WellKnownItem { id: 0x0F, name: "Parlyz Heal" },
    WellKnownItem { id: 0x10, name: "Full Restore" },
    WellKnownItem { id: 0x11, name: "Max Potion" },
    WellKnownItem { id: 0x12, name: "Hyper Potion" },
    WellKnownItem { id: 0x13, name: "Super Potion" },
    WellKnownItem { id: 0x14, name: "Potion" },
    WellKnownItem { id: 0x34, name: "Full Heal" },
    WellKnownItem { id: 0x35, name: "Revive" },
    WellKnownItem { id: 0x36, name: "Max Revive" },
    WellKnownItem { id: 0x3C, name: "Fresh Water" },
    WellKnownItem { id: 0x3D, name: "Soda Pop" },
    WellKnownItem { id: 0x3E, name: "Lemonade" },
    WellKnownItem { id: 0x50, name: "Ether" },
    WellKnownItem { id: 0x51, name: "Max Ether" },
    WellKnownItem { id: 0x52, name: "Elixer" },
    WellKnownItem { id: 0x53, name: "Max Elixer" },

    // Vitamins
    WellKnownItem { id: 0x23, name: "HP Up" },
    WellKnownItem { id: 0x24, name: "Protein" },
    WellKnownItem { id: 0x25, name: "Iron" },
    WellKnownItem { id: 0x26, name: "Carbos" },
    WellKnownItem { id: 0x27, name: "Calcium" },
    WellKnownItem { id: 0x28, name: "Rare Candy" },
    WellKnownItem { id: 0x4F, name: "PP Up" },

    // Battle items
    WellKnownItem { id: 0x2E, name: "X Accuracy" },
    WellKnownItem { id: 0x37, name: "Guard Spec." },
    WellKnownItem { id: 0x3A, name: "Dire Hit" },
    WellKnownItem { id: 0x41, name: "X Attack" },
    WellKnownItem { id: 0x42, name: "X Defend" },
    WellKnownItem { id: 0x43, name: "X Speed" },
    WellKnownItem { id: 0x44, name: "X Special" },
    WellKnownItem { id: 0x33, name: "Poké Doll" },

    // Field items
    WellKnownItem { id: 0x1D, name: "Escape Rope" },
    WellKnownItem { id: 0x1E, name: "Repel" },
    WellKnownItem { id: 0x38, name: "Super Repel" },
    WellKnownItem { id: 0x39, name: "Max Repel" },
    WellKnownItem { id: 0x31, name: "Nugget" },
];

pub fn lookup(id: u8) -> Option<&'static str> {
    WELL_KNOWN_ITEMS
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name)
}

pub fn lookup_by_key(key: &str) -> Option<u8> {
    WELL_KNOWN_ITEMS
        .iter()
        .find(|item| super::item_catalog::normalize_name(item.name) == key)
        .map(|item| item.id)
}

pub fn all() -> impl Iterator<Item = (u8, &'static str)> {
    WELL_KNOWN_ITEMS.iter().map(|item| (item.id, item.name))
}
