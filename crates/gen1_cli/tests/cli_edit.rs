use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use gen1_core::backup;
use gen1_core::core_api::{Engine, Session};
use gen1_core::image::SaveImage;
use gen1_core::profile::YELLOW_NA;
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gen1-se"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run gen1-se CLI")
}

fn run_cli_with_input(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gen1-se"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn gen1-se CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for gen1-se CLI")
}

fn fresh_save(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("yellow.sav");
    let image = SaveImage::fresh(YELLOW_NA).expect("fresh image should build");
    fs::write(&path, image.as_bytes()).expect("write fixture");
    path
}

fn open(path: &Path) -> Session {
    let bytes = fs::read(path).expect("read save");
    Engine::new()
        .open_bytes(bytes, None)
        .expect("save should open")
}

fn s(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn set_money_with_force_writes_and_backs_up() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let original = fs::read(&source).expect("fixture");
    let out = dir.path().join("edited.sav");

    let output = run_cli(&[
        "set-money",
        &s(&source),
        "--amount",
        "999999",
        "--out",
        &s(&out),
        "--force",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Money: ¥0 -> ¥999,999"));
    assert!(stdout.contains("(will recalculate)"));
    assert!(stdout.contains(&format!("Wrote {}", out.display())));

    let edited = open(&out);
    assert!(edited.integrity().is_valid);
    assert_eq!(edited.money(), 999_999);

    assert_eq!(fs::read(&source).expect("source"), original);
    assert_eq!(
        fs::read(backup::backup_path(&source)).expect("backup"),
        original
    );
    let verification = backup::verify_backup(&source).expect("sidecar");
    assert!(verification.matches());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let out = dir.path().join("edited.sav");

    let output = run_cli(&[
        "set-item",
        &s(&source),
        "--item",
        "rare_candy",
        "--qty",
        "50",
        "--out",
        &s(&out),
        "--dry-run",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Add Rare Candy x50"));
    assert!(stdout.contains("[DRY RUN] No changes written"));
    assert!(!out.exists());
    assert!(!backup::backup_path(&source).exists());
}

#[test]
fn confirmation_requires_yes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let original = fs::read(&source).expect("fixture");
    let args = [
        "set-item",
        &s(&source),
        "--item",
        "Potion",
        "--qty",
        "7",
        "--out",
        &s(&source),
    ];

    let output = run_cli_with_input(&args, "no\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Operation cancelled"));
    assert_eq!(fs::read(&source).expect("source"), original);

    let output = run_cli_with_input(&args, "YES\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Type 'yes' to continue"));
    let edited = open(&source);
    assert_eq!(edited.bag_items()[0].name, "Potion");
    assert_eq!(edited.bag_items()[0].quantity, 7);
    assert_eq!(
        fs::read(backup::backup_path(&source)).expect("backup"),
        original
    );
}

#[test]
fn set_items_applies_batch_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    let output = run_cli(&[
        "set-items",
        &s(&source),
        "--item",
        "rare_candy",
        "--qty",
        "99",
        "--item",
        "0x01",
        "--qty",
        "3",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert!(output.status.success());

    let items = open(&source).bag_items();
    let summary: Vec<(u8, u8)> = items.iter().map(|item| (item.id, item.quantity)).collect();
    assert_eq!(summary, vec![(0x28, 99), (0x01, 3)]);
}

#[test]
fn set_items_with_mismatched_pairs_is_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let original = fs::read(&source).expect("fixture");

    let output = run_cli(&[
        "set-items",
        &s(&source),
        "--item",
        "rare_candy",
        "--item",
        "potion",
        "--qty",
        "5",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("same number of times"));
    assert_eq!(fs::read(&source).expect("source"), original);
}

#[test]
fn out_of_range_quantity_is_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    for qty in ["0", "100"] {
        let output = run_cli(&[
            "set-item",
            &s(&source),
            "--item",
            "potion",
            "--qty",
            qty,
            "--out",
            &s(&source),
            "--force",
        ]);
        assert_eq!(output.status.code(), Some(2), "qty {qty}");
    }
    assert!(!backup::backup_path(&source).exists());
}

#[test]
fn missing_out_is_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    let output = run_cli(&["set-money", &s(&source), "--amount", "5", "--force"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_item_is_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    let output = run_cli(&[
        "set-item",
        &s(&source),
        "--item",
        "masterball_deluxe",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown item: masterball_deluxe"));
}

#[test]
fn removing_absent_item_fails_without_writing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let original = fs::read(&source).expect("fixture");

    let output = run_cli(&[
        "remove-item",
        &s(&source),
        "--item",
        "potion",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found in bag"));
    assert_eq!(fs::read(&source).expect("source"), original);
    assert!(!backup::backup_path(&source).exists());
}

#[test]
fn remove_item_after_set_item() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    for args in [
        vec!["set-item", "--item", "potion", "--qty", "4"],
        vec!["set-item", "--item", "antidote", "--qty", "2"],
        vec!["remove-item", "--item", "potion"],
    ] {
        let mut full: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        full.insert(1, s(&source));
        full.extend(["--out".to_string(), s(&source), "--force".to_string()]);
        let refs: Vec<&str> = full.iter().map(String::as_str).collect();
        let output = run_cli(&refs);
        assert!(
            output.status.success(),
            "{args:?}: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let items = open(&source).bag_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Antidote");
}

#[test]
fn corrupted_save_is_not_edited() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);
    let mut bytes = fs::read(&source).expect("fixture");
    bytes[YELLOW_NA.checksum_offset] ^= 0x01;
    fs::write(&source, &bytes).expect("corrupt fixture");

    let output = run_cli(&[
        "set-money",
        &s(&source),
        "--amount",
        "1",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot modify corrupted save file"));
    assert_eq!(fs::read(&source).expect("source"), bytes);
}

#[test]
fn verify_backup_detects_tampering() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    let output = run_cli(&[
        "set-money",
        &s(&source),
        "--amount",
        "10",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert!(output.status.success());

    let output = run_cli(&["verify-backup", &s(&source)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Backup intact"));

    fs::write(backup::backup_path(&source), b"tampered").expect("tamper");
    let output = run_cli(&["verify-backup", &s(&source)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("does NOT match"));
}

#[test]
fn game_hint_is_named_as_the_layout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = fresh_save(&dir);

    let output = run_cli(&[
        "set-money",
        &s(&source),
        "--amount",
        "42",
        "--game",
        "red",
        "--out",
        &s(&source),
        "--force",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "Layout: Pokémon Red/Blue (North America) (detected: Pokémon Yellow (North America))"
    ));
    assert!(stdout.contains(&format!(
        "Wrote {} (Pokémon Red/Blue (North America))",
        source.display()
    )));
}
