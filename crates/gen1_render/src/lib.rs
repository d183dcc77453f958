use std::fmt::Write as _;
use std::path::Path;

use gen1_core::backup::BackupVerification;
use gen1_core::core_api::{BagItemEntry, PlannedChange, Session};
use gen1_core::integrity::IntegrityReport;
use gen1_core::money::format_money;
use gen1_core::profile::GameVersion;
use gen1_core::transaction::TransactionOutcome;
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    pub verbose: bool,
}

/// Outcome of comparing the loaded bytes against a caller-supplied digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCheck {
    pub expected: String,
    pub matches: bool,
}

impl HashCheck {
    pub fn against(session: &Session, expected: &str) -> Self {
        Self {
            expected: expected.trim().to_string(),
            matches: session.matches_hash(expected),
        }
    }
}

pub fn render_inspect_json(session: &Session, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(inspect_json(session)),
    }
}

pub fn render_report_json(
    session: &Session,
    hash_check: Option<&HashCheck>,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(report_json(session, hash_check)),
    }
}

fn inspect_json(session: &Session) -> JsonMap<String, JsonValue> {
    let snapshot = session.snapshot();
    let mut out = JsonMap::new();

    out.insert(
        "version".to_string(),
        JsonValue::String(version_key(snapshot.version).to_string()),
    );
    out.insert(
        "profile".to_string(),
        JsonValue::String(snapshot.profile_name.clone()),
    );
    out.insert("size".to_string(), JsonValue::from(snapshot.size));

    let mut checksum = JsonMap::new();
    checksum.insert(
        "stored".to_string(),
        JsonValue::from(snapshot.stored_checksum),
    );
    checksum.insert(
        "calculated".to_string(),
        JsonValue::from(snapshot.calculated_checksum),
    );
    checksum.insert(
        "valid".to_string(),
        JsonValue::Bool(snapshot.stored_checksum == snapshot.calculated_checksum),
    );
    out.insert("checksum".to_string(), JsonValue::Object(checksum));

    out.insert("money".to_string(), JsonValue::from(snapshot.money));

    let mut bag = JsonMap::new();
    bag.insert("count".to_string(), JsonValue::from(snapshot.bag.len()));
    bag.insert(
        "capacity".to_string(),
        JsonValue::from(snapshot.bag_capacity),
    );
    bag.insert("items".to_string(), bag_items_to_json(&snapshot.bag));
    out.insert("bag".to_string(), JsonValue::Object(bag));

    out.insert("sha256".to_string(), JsonValue::String(snapshot.sha256));
    out.insert(
        "integrity".to_string(),
        JsonValue::Object(integrity_json(session.integrity())),
    );

    out
}

fn report_json(session: &Session, hash_check: Option<&HashCheck>) -> JsonMap<String, JsonValue> {
    let report = session.integrity();
    let mut out = JsonMap::new();

    out.insert(
        "version".to_string(),
        JsonValue::String(version_key(report.version).to_string()),
    );
    out.insert("size".to_string(), JsonValue::from(session.image().len()));
    out.extend(integrity_json(report));
    out.insert("sha256".to_string(), JsonValue::String(session.sha256()));
    if let Some(check) = hash_check {
        let mut m = JsonMap::new();
        m.insert(
            "expected".to_string(),
            JsonValue::String(check.expected.clone()),
        );
        m.insert("matches".to_string(), JsonValue::Bool(check.matches));
        out.insert("hash_check".to_string(), JsonValue::Object(m));
    }

    out
}

fn integrity_json(report: &IntegrityReport) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();
    out.insert("is_valid".to_string(), JsonValue::Bool(report.is_valid));
    out.insert(
        "checksum_valid".to_string(),
        JsonValue::Bool(report.checksum_valid),
    );
    out.insert("bag_valid".to_string(), JsonValue::Bool(report.bag_valid));
    out.insert(
        "money_valid".to_string(),
        JsonValue::Bool(report.money_valid),
    );
    out.insert("errors".to_string(), strings_to_json(&report.errors));
    out.insert("warnings".to_string(), strings_to_json(&report.warnings));
    out
}

fn bag_items_to_json(items: &[BagItemEntry]) -> JsonValue {
    JsonValue::Array(
        items
            .iter()
            .map(|item| {
                let mut m = JsonMap::new();
                m.insert("id".to_string(), JsonValue::from(item.id));
                m.insert("name".to_string(), JsonValue::String(item.name.clone()));
                m.insert("quantity".to_string(), JsonValue::from(item.quantity));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn strings_to_json(values: &[String]) -> JsonValue {
    JsonValue::Array(values.iter().cloned().map(JsonValue::String).collect())
}

fn version_key(version: GameVersion) -> &'static str {
    match version {
        GameVersion::YellowNa => "yellow_na",
        GameVersion::RedBlueNa => "red_blue_na",
        GameVersion::Unknown => "unknown",
    }
}

pub fn render_inspect_text(session: &Session, source: &Path, options: TextRenderOptions) -> String {
    let snapshot = session.snapshot();
    let mut out = String::new();

    write_header(&mut out, session, source);
    if options.verbose {
        writeln!(&mut out, "Profile: {}", snapshot.profile_name)
            .expect("writing to String cannot fail");
        writeln!(&mut out, "SHA256: {}", snapshot.sha256).expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    write_checksum_block(
        &mut out,
        snapshot.stored_checksum,
        snapshot.calculated_checksum,
        "Invalid (file may be corrupted)",
    );

    writeln!(&mut out, "Money: {}", format_money(snapshot.money))
        .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    writeln!(
        &mut out,
        "Bag ({}/{} items):",
        snapshot.bag.len(),
        snapshot.bag_capacity
    )
    .expect("writing to String cannot fail");
    if snapshot.bag.is_empty() {
        writeln!(&mut out, "  (empty)").expect("writing to String cannot fail");
    }
    for item in &snapshot.bag {
        let line = if options.verbose {
            format!("{} (0x{:02X}) x{}", item.name, item.id, item.quantity)
        } else {
            format!("{} x{}", item.name, item.quantity)
        };
        writeln!(&mut out, "  - {line}").expect("writing to String cannot fail");
    }

    if !session.integrity().is_valid {
        writeln!(&mut out).expect("writing to String cannot fail");
        write_messages(&mut out, "Errors:", "x", &session.integrity().errors);
    }

    out
}

pub fn render_report_text(
    session: &Session,
    source: &Path,
    hash_check: Option<&HashCheck>,
) -> String {
    let report = session.integrity();
    let mut out = String::new();

    write_header(&mut out, session, source);
    if report.version == GameVersion::Unknown {
        writeln!(&mut out, "  Warning: offsets may be incorrect")
            .expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    write_checksum_block(
        &mut out,
        session.stored_checksum(),
        session.calculated_checksum(),
        "Invalid",
    );
    write_status_block(&mut out, "Bag Structure:", report.bag_valid, "Valid", "Invalid");
    write_status_block(
        &mut out,
        "Money Format:",
        report.money_valid,
        "Valid digit encoding",
        "Invalid digit encoding",
    );

    writeln!(&mut out, "SHA256: {}", session.sha256()).expect("writing to String cannot fail");
    if let Some(check) = hash_check {
        let status = if check.matches {
            "Hash matches expected value"
        } else {
            "Hash does NOT match"
        };
        write_label(&mut out, "Status:", status);
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    if !report.errors.is_empty() {
        write_messages(&mut out, "Errors:", "x", &report.errors);
        writeln!(&mut out).expect("writing to String cannot fail");
    }
    if !report.warnings.is_empty() {
        write_messages(&mut out, "Warnings:", "!", &report.warnings);
        writeln!(&mut out).expect("writing to String cannot fail");
    }

    let overall = if report.is_valid {
        "VALID - Safe to modify"
    } else {
        "INVALID - Do NOT modify this save!"
    };
    writeln!(&mut out, "Overall Status: {overall}").expect("writing to String cannot fail");

    out
}

/// One line per change, as shown before confirmation.
pub fn describe_change(change: &PlannedChange) -> String {
    match change {
        PlannedChange::Money { from, to } => {
            format!("Money: {} -> {}", format_money(*from), format_money(*to))
        }
        PlannedChange::SetItem {
            name,
            from: None,
            to,
            ..
        } => format!("Add {name} x{to}"),
        PlannedChange::SetItem {
            name,
            from: Some(from),
            to,
            ..
        } => format!("Update {name}: x{from} -> x{to}"),
        PlannedChange::RemoveItem { name, quantity, .. } => {
            format!("Remove {name} (was x{quantity})")
        }
    }
}

pub fn render_plan_text(plan: &[PlannedChange], old_checksum: u8) -> String {
    let mut out = String::new();
    writeln!(&mut out, "The following changes will be made:")
        .expect("writing to String cannot fail");
    if plan.is_empty() {
        writeln!(&mut out, "  (none)").expect("writing to String cannot fail");
    }
    for change in plan {
        writeln!(&mut out, "  * {}", describe_change(change))
            .expect("writing to String cannot fail");
    }
    writeln!(
        &mut out,
        "Checksum: 0x{old_checksum:02X} -> (will recalculate)"
    )
    .expect("writing to String cannot fail");
    out
}

pub fn render_outcome_text(outcome: &TransactionOutcome) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "Backup: {}",
        outcome.backup.backup_path.display()
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out, "Backup SHA256: {}", outcome.backup.sha256)
        .expect("writing to String cannot fail");
    for change in &outcome.changes {
        writeln!(&mut out, "  * {}", describe_change(change))
            .expect("writing to String cannot fail");
    }
    writeln!(
        &mut out,
        "Checksum: 0x{:02X} -> 0x{:02X}",
        outcome.old_checksum, outcome.new_checksum
    )
    .expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "Wrote {} ({})",
        outcome.destination.display(),
        outcome.version
    )
    .expect("writing to String cannot fail");
    out
}

pub fn render_backup_verification_text(verification: &BackupVerification) -> String {
    let mut out = String::new();
    writeln!(&mut out, "Backup: {}", verification.backup_path.display())
        .expect("writing to String cannot fail");
    write_label(&mut out, "Expected:", &verification.expected);
    write_label(&mut out, "Actual:", &verification.actual);
    let status = if verification.matches() {
        "Backup intact"
    } else {
        "Backup does NOT match its recorded hash"
    };
    write_label(&mut out, "Status:", status);
    out
}

fn write_header(out: &mut String, session: &Session, source: &Path) {
    writeln!(out, "Save File: {}", source.display()).expect("writing to String cannot fail");
    writeln!(out, "Size: {} KB", session.image().len() / 1024)
        .expect("writing to String cannot fail");
    writeln!(out, "Detected Version: {}", session.version())
        .expect("writing to String cannot fail");
    let layout = session.profile();
    if session.version() != GameVersion::Unknown && layout.version != session.version() {
        writeln!(out, "Layout: {}", layout.name).expect("writing to String cannot fail");
    }
}

fn write_checksum_block(out: &mut String, stored: u8, calculated: u8, invalid_label: &str) {
    writeln!(out, "Checksum:").expect("writing to String cannot fail");
    write_label(out, "Stored:", &format!("0x{stored:02X}"));
    write_label(out, "Calculated:", &format!("0x{calculated:02X}"));
    let status = if stored == calculated {
        "Valid"
    } else {
        invalid_label
    };
    write_label(out, "Status:", status);
    writeln!(out).expect("writing to String cannot fail");
}

fn write_status_block(out: &mut String, title: &str, ok: bool, valid: &str, invalid: &str) {
    writeln!(out, "{title}").expect("writing to String cannot fail");
    write_label(out, "Status:", if ok { valid } else { invalid });
    writeln!(out).expect("writing to String cannot fail");
}

fn write_label(out: &mut String, label: &str, value: &str) {
    writeln!(out, "  {label:<LABEL_WIDTH$}{value}").expect("writing to String cannot fail");
}

fn write_messages(out: &mut String, title: &str, marker: &str, messages: &[String]) {
    writeln!(out, "{title}").expect("writing to String cannot fail");
    for message in messages {
        writeln!(out, "  {marker} {message}").expect("writing to String cannot fail");
    }
}
