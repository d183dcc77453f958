use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use gen1_core::backup;
use gen1_core::core_api::{CoreError, Edit, Engine, Session, resolve_item};
use gen1_core::profile::GameVersion;
use gen1_core::transaction::{PreparedTransaction, TransactionConfig, WriteTransaction};
use gen1_render::{
    HashCheck, JsonStyle, TextRenderOptions, render_backup_verification_text,
    render_inspect_json, render_inspect_text, render_outcome_text, render_plan_text,
    render_report_json, render_report_text,
};
use log::{LevelFilter, debug};
use serde_json::Value as JsonValue;

const MAX_MONEY: i64 = 999_999;
const MAX_QTY: i64 = 99;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log each step to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show money, bag contents and checksum status.
    Inspect(InspectArgs),
    /// Run every integrity check without modifying the file.
    Verify(VerifyArgs),
    /// Set the money balance.
    SetMoney(SetMoneyArgs),
    /// Add an item to the bag or update its quantity.
    SetItem(SetItemArgs),
    /// Add or update several items as one all-or-nothing batch.
    SetItems(SetItemsArgs),
    /// Remove an item from the bag.
    RemoveItem(RemoveItemArgs),
    /// Check SAVE.bak against the digest in SAVE.bak.sha256.
    VerifyBackup(VerifyBackupArgs),
}

#[derive(Debug, Args)]
struct GameArg {
    /// Skip detection and use this layout.
    #[arg(long, value_name = "yellow|red|blue", value_parser = parse_game_version)]
    game: Option<GameVersion>,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    game: GameArg,
}

#[derive(Debug, Args)]
struct VerifyArgs {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    #[arg(long = "expected-hash", value_name = "SHA256")]
    expected_hash: Option<String>,
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    game: GameArg,
}

#[derive(Debug, Args)]
struct WriteArgs {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    /// Destination file; may equal SAVE.
    #[arg(short, long, value_name = "PATH")]
    out: PathBuf,
    /// Show the change plan and stop.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Skip the confirmation prompt.
    #[arg(long)]
    force: bool,
    #[command(flatten)]
    game: GameArg,
}

impl WriteArgs {
    fn transaction_config(&self) -> TransactionConfig {
        TransactionConfig::new(&self.out).with_version_hint(self.game.game)
    }
}

#[derive(Debug, Args)]
struct SetMoneyArgs {
    #[command(flatten)]
    write: WriteArgs,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_MONEY))]
    amount: u32,
}

#[derive(Debug, Args)]
struct SetItemArgs {
    #[command(flatten)]
    write: WriteArgs,
    /// Item name (rare_candy, "Rare Candy") or id (40, 0x28).
    #[arg(long, value_name = "ITEM")]
    item: String,
    #[arg(long, default_value_t = 99, value_parser = clap::value_parser!(u8).range(1..=MAX_QTY))]
    qty: u8,
}

#[derive(Debug, Args)]
struct SetItemsArgs {
    #[command(flatten)]
    write: WriteArgs,
    /// Repeat once per item; paired with --qty by position.
    #[arg(long = "item", value_name = "ITEM", required = true)]
    items: Vec<String>,
    #[arg(
        long = "qty",
        required = true,
        value_parser = clap::value_parser!(u8).range(1..=MAX_QTY)
    )]
    quantities: Vec<u8>,
}

#[derive(Debug, Args)]
struct RemoveItemArgs {
    #[command(flatten)]
    write: WriteArgs,
    #[arg(long, value_name = "ITEM")]
    item: String,
}

#[derive(Debug, Args)]
struct VerifyBackupArgs {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect(args) => run_inspect(&args, cli.verbose),
        Command::Verify(args) => run_verify(&args),
        Command::SetMoney(args) => {
            let edits = vec![Edit::SetMoney {
                amount: args.amount,
            }];
            run_edit(&args.write, &edits);
        }
        Command::SetItem(args) => {
            let id = resolve_item_or_exit(&args.item);
            let edits = vec![Edit::SetItem {
                id,
                quantity: args.qty,
            }];
            run_edit(&args.write, &edits);
        }
        Command::SetItems(args) => {
            let edits = batch_edits(&args.items, &args.quantities).unwrap_or_else(|message| {
                eprintln!("{message}");
                process::exit(2);
            });
            run_edit(&args.write, &edits);
        }
        Command::RemoveItem(args) => {
            let id = resolve_item_or_exit(&args.item);
            run_edit(&args.write, &[Edit::RemoveItem { id }]);
        }
        Command::VerifyBackup(args) => run_verify_backup(&args.path),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run_inspect(args: &InspectArgs, verbose: bool) {
    let session = open_session(&args.path, args.game.game);

    if args.json {
        print_json(&render_inspect_json(&session, JsonStyle::CanonicalV1));
        return;
    }

    print!(
        "{}",
        render_inspect_text(&session, &args.path, TextRenderOptions { verbose })
    );
}

fn run_verify(args: &VerifyArgs) {
    let session = open_session(&args.path, args.game.game);
    let hash_check = args
        .expected_hash
        .as_deref()
        .map(|expected| HashCheck::against(&session, expected));

    if args.json {
        print_json(&render_report_json(
            &session,
            hash_check.as_ref(),
            JsonStyle::CanonicalV1,
        ));
    } else {
        print!(
            "{}",
            render_report_text(&session, &args.path, hash_check.as_ref())
        );
    }

    let hash_ok = hash_check.as_ref().is_none_or(|check| check.matches);
    if !hash_ok {
        eprintln!("Error: hash mismatch");
        process::exit(1);
    }
    if !session.integrity().is_valid {
        eprintln!("Error: integrity check failed");
        process::exit(1);
    }
}

fn run_edit(write: &WriteArgs, edits: &[Edit]) {
    let transaction = WriteTransaction::new(write.transaction_config());
    let prepared = transaction
        .prepare(&write.path, edits)
        .unwrap_or_else(|e| exit_with_core_error("Error preparing edit", &e));

    println!("Save File: {}", write.path.display());
    println!(
        "Layout: {} (detected: {})",
        prepared.profile().name,
        prepared.report().version
    );
    print!(
        "{}",
        render_plan_text(prepared.plan(), prepared.old_checksum())
    );

    if write.dry_run {
        println!("[DRY RUN] No changes written");
        return;
    }

    if !write.force && !confirm(&prepared) {
        println!("Operation cancelled");
        return;
    }

    let outcome = prepared
        .commit()
        .unwrap_or_else(|e| exit_with_core_error("Error writing save", &e));
    print!("{}", render_outcome_text(&outcome));
}

fn run_verify_backup(path: &Path) {
    let verification = backup::verify_backup(path)
        .unwrap_or_else(|e| exit_with_core_error("Error verifying backup", &e));
    print!("{}", render_backup_verification_text(&verification));
    if !verification.matches() {
        process::exit(1);
    }
}

fn open_session(path: &Path, hint: Option<GameVersion>) -> Session {
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    });
    debug!("read {} bytes from {}", bytes.len(), path.display());

    Engine::new().open_bytes(bytes, hint).unwrap_or_else(|e| {
        eprintln!("Error loading save file: {}", path.display());
        eprintln!("  {}", e.message);
        process::exit(1);
    })
}

/// Asks on stdout, reads one line from stdin; only `yes` proceeds.
fn confirm(prepared: &PreparedTransaction) -> bool {
    println!();
    println!(
        "WARNING: You are about to modify {}",
        prepared.destination().display()
    );
    print!("Type 'yes' to continue: ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut response = String::new();
    match io::stdin().lock().read_line(&mut response) {
        Ok(_) => response.trim().eq_ignore_ascii_case("yes"),
        Err(_) => false,
    }
}

fn batch_edits(items: &[String], quantities: &[u8]) -> Result<Vec<Edit>, String> {
    if items.len() != quantities.len() {
        return Err(format!(
            "--item and --qty must be given the same number of times (got {} and {})",
            items.len(),
            quantities.len()
        ));
    }

    items
        .iter()
        .zip(quantities)
        .map(|(item, &quantity)| {
            resolve_item(item)
                .map(|id| Edit::SetItem { id, quantity })
                .map_err(|e| e.message)
        })
        .collect()
}

fn resolve_item_or_exit(arg: &str) -> u8 {
    resolve_item(arg).unwrap_or_else(|e| {
        eprintln!("{}", e.message);
        process::exit(2);
    })
}

fn exit_with_core_error(context: &str, error: &CoreError) -> ! {
    eprintln!("{context}: {}", error.message);
    process::exit(1);
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn parse_game_version(value: &str) -> Result<GameVersion, String> {
    GameVersion::from_name(value).ok_or_else(|| {
        format!("invalid game value '{value}', expected one of: yellow, red, blue")
    })
}
