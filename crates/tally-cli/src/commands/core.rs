//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` - Shared utility to open the ledger store
//! - `cmd_init` - Initialize the ledger
//! - `cmd_status` - Show store status

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tally_core::dates::parse_timestamp;
use tally_core::models::TransactionType;
use tally_core::store::DB_KEY_ENV;
use tally_core::{Ledger, Settings, SqliteStorage, Storage};

/// Load settings from `--config`, the per-user override, or the built-in defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Settings::load_from(path).context("Failed to load settings")
}

/// Open the ledger with encryption by default, or unencrypted if --no-encrypt
pub fn open_ledger(
    db_path: &Path,
    no_encrypt: bool,
    settings: &Settings,
) -> Result<Ledger<SqliteStorage>> {
    let path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?;
    let storage = if no_encrypt {
        SqliteStorage::new_unencrypted(path_str).context("Failed to open ledger (unencrypted)")?
    } else {
        SqliteStorage::new(path_str).context("Failed to open ledger")?
    };
    Ledger::load(storage, settings.budget.default_monthly_budget).context("Failed to load ledger")
}

/// Ask for confirmation unless `yes` was given
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Resolve a category argument
///
/// Accepts an id (`cat-food`), its short form without the `cat-` prefix
/// (`food`), or a name (`Food & Drink`, case-insensitive).
pub fn resolve_category_arg<S: Storage>(ledger: &Ledger<S>, arg: &str) -> Result<String> {
    let arg = arg.trim();
    let short_id = format!("cat-{}", arg.to_lowercase());
    if let Some(cat) = ledger.category(arg).or_else(|| ledger.category(&short_id)) {
        return Ok(cat.id.clone());
    }
    ledger
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(arg))
        .map(|c| c.id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Category not found: {}. Run 'tally categories' to see available categories.",
                arg
            )
        })
}

pub fn parse_kind(value: &str) -> Result<TransactionType> {
    value.parse::<TransactionType>().map_err(|e| anyhow::anyhow!(e))
}

pub fn parse_date_arg(value: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(value)
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {} (expected YYYY-MM-DD)", value))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool, settings: &Settings) -> Result<()> {
    println!("🔧 Initializing ledger at {}...", db_path.display());

    let ledger = open_ledger(db_path, no_encrypt, settings)?;
    ledger.persist_all().context("Failed to write default data")?;
    println!(
        "   Seeded {} categories, budget {}",
        ledger.categories().len(),
        settings.money(ledger.monthly_budget())
    );

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Ledger initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record spending: tally tx add 250 -c food -d \"Lunch\"");
    println!("  2. See this month: tally dashboard");

    Ok(())
}

pub fn cmd_status(db_path: &Path, no_encrypt: bool, settings: &Settings) -> Result<()> {
    println!();
    println!("📊 Tally Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Ledger: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = std::fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (ledger not initialized)");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    if db_path.exists() {
        match open_ledger(db_path, no_encrypt, settings) {
            Ok(ledger) => {
                println!();
                println!("   Transactions: {}", ledger.transactions().len());
                println!("   Categories: {}", ledger.categories().len());
                println!("   Savings goals: {}", ledger.goals().len());
                println!("   Monthly budget: {}", settings.money(ledger.monthly_budget()));
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening ledger: {:#}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}
