use gen1_core::bag;
use gen1_core::checksum;
use gen1_core::image::SaveImage;
use gen1_core::integrity::{self, IntegrityReport};
use gen1_core::money;
use gen1_core::profile::{GameVersion, YELLOW_NA};

fn fresh() -> SaveImage {
    SaveImage::fresh(YELLOW_NA).expect("fresh image should build")
}

fn checked_after(mut image: SaveImage, edit: impl FnOnce(&mut SaveImage)) -> IntegrityReport {
    edit(&mut image);
    integrity::check(&image)
}

#[test]
fn fresh_image_is_clean() {
    let report = integrity::check(&fresh());

    assert!(report.is_valid);
    assert!(report.checksum_valid);
    assert!(report.bag_valid);
    assert!(report.money_valid);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.version, GameVersion::YellowNa);
}

#[test]
fn stale_checksum_is_an_error() {
    let report = checked_after(fresh(), |image| {
        let offset = YELLOW_NA.checksum_range.start + 0x40;
        image.set_byte(offset, 0x01).expect("in range");
    });

    assert!(!report.is_valid);
    assert!(!report.checksum_valid);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0], "Invalid checksum: stored 0x00, calculated 0xFF");
    assert_eq!(report.version, GameVersion::Unknown);
}

#[test]
fn bytes_outside_checksum_domain_do_not_matter() {
    let report = checked_after(fresh(), |image| {
        image.set_byte(0x0000, 0x99).expect("in range");
        image.set_byte(YELLOW_NA.image_size - 1, 0x42).expect("in range");
    });
    assert!(report.is_valid);
}

#[test]
fn over_capacity_count_is_an_error() {
    let report = checked_after(fresh(), |image| {
        image.set_byte(YELLOW_NA.bag_count_offset, 21).expect("in range");
        checksum::recalculate_and_store(image).expect("store checksum");
    });

    assert!(!report.is_valid);
    assert!(!report.bag_valid);
    assert!(report.checksum_valid);
    assert_eq!(report.errors, vec!["Bag count 21 exceeds maximum 20".to_string()]);
}

#[test]
fn missing_terminator_is_only_a_warning() {
    let report = checked_after(fresh(), |image| {
        image.set_byte(YELLOW_NA.bag_items_offset, 0x00).expect("in range");
        checksum::recalculate_and_store(image).expect("store checksum");
    });

    assert!(report.is_valid);
    assert!(report.bag_valid);
    assert_eq!(report.warnings, vec!["Missing bag terminator byte (0xFF)".to_string()]);
}

#[test]
fn full_bag_needs_no_terminator() {
    let mut image = fresh();
    for id in 1..=20u8 {
        bag::set_or_add(&mut image, id, 3).expect("fill bag");
    }
    // The slot after the last entry is where the terminator would sit.
    let after_last = YELLOW_NA.bag_items_offset + 20 * 2;
    image.set_byte(after_last, 0x00).expect("in range");
    checksum::recalculate_and_store(&mut image).expect("store checksum");

    let report = integrity::check(&image);
    assert!(report.is_valid);
    assert!(report.warnings.is_empty());
}

#[test]
fn each_bad_money_byte_is_reported() {
    let report = checked_after(fresh(), |image| {
        image.set_byte(YELLOW_NA.money_offset, 0xAF).expect("in range");
        image.set_byte(YELLOW_NA.money_offset + 2, 0x0A).expect("in range");
        checksum::recalculate_and_store(image).expect("store checksum");
    });

    assert!(!report.is_valid);
    assert!(!report.money_valid);
    assert_eq!(
        report.errors,
        vec![
            "Invalid digit encoding in money byte 0: 0xAF".to_string(),
            "Invalid digit encoding in money byte 2: 0x0A".to_string(),
        ]
    );
}

#[test]
fn independent_failures_accumulate() {
    let report = checked_after(fresh(), |image| {
        image.set_byte(YELLOW_NA.bag_count_offset, 30).expect("in range");
        image.set_byte(YELLOW_NA.money_offset + 1, 0xFA).expect("in range");
    });

    assert!(!report.checksum_valid);
    assert!(!report.bag_valid);
    assert!(!report.money_valid);
    assert_eq!(report.errors.len(), 3);
    assert!(report.warnings.iter().any(|w| w.starts_with("Unknown version")));
}

#[test]
fn money_field_encodes_digit_pairs() {
    let mut image = fresh();
    money::set_balance(&mut image, 123_456).expect("in range");

    assert_eq!(
        image.get_bytes(YELLOW_NA.money_offset, 3),
        Some(vec![0x12, 0x34, 0x56])
    );
    assert_eq!(money::balance(&image), 123_456);
    assert!(money::set_balance(&mut image, 1_000_000).is_err());
    assert_eq!(money::balance(&image), 123_456);
}

#[test]
fn detection_tracks_structure() {
    let image = fresh();
    assert_eq!(integrity::detect_version(&image), GameVersion::YellowNa);

    let mut corrupted = image.clone();
    corrupted
        .set_byte(YELLOW_NA.checksum_offset, 0x5A)
        .expect("in range");
    assert_eq!(integrity::detect_version(&corrupted), GameVersion::Unknown);
}
