//! Category command implementations

use anyhow::Result;
use tally_core::models::CategoryIcon;
use tally_core::{Ledger, Storage};

use super::{confirm, resolve_category_arg};

/// Parse an icon name, rejecting names outside the icon table
fn parse_icon(name: &str) -> Result<CategoryIcon> {
    let icon = CategoryIcon::from_name(name);
    if icon.as_str().eq_ignore_ascii_case(name.trim()) {
        Ok(icon)
    } else {
        anyhow::bail!(
            "Unknown icon: {}. Run 'tally categories icons' to see available icons.",
            name
        )
    }
}

pub fn cmd_categories_list<S: Storage>(ledger: &Ledger<S>) -> Result<()> {
    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");

    for cat in ledger.categories() {
        let count = ledger
            .transactions()
            .iter()
            .filter(|t| t.category == cat.id)
            .count();
        let marker = if cat.is_system { " (built-in)" } else { "" };
        println!(
            "   {} {:20} {:40} {:>4} tx{}",
            cat.icon().glyph(),
            cat.name,
            cat.id,
            count,
            marker
        );
    }

    Ok(())
}

pub fn cmd_categories_add<S: Storage>(
    ledger: &mut Ledger<S>,
    name: &str,
    icon: &str,
) -> Result<()> {
    let icon = parse_icon(icon)?;
    let cat = ledger.add_category(name, icon)?;
    println!("✅ Created category '{}' (id: {})", cat.name, cat.id);
    Ok(())
}

pub fn cmd_categories_rename<S: Storage>(
    ledger: &mut Ledger<S>,
    category: &str,
    name: &str,
    icon: Option<&str>,
) -> Result<()> {
    let id = resolve_category_arg(ledger, category)?;
    let icon = icon.map(parse_icon).transpose()?;
    let updated = ledger.rename_category(&id, name, icon)?;
    println!("✅ Renamed '{}' to '{}'", category, updated.name);
    Ok(())
}

pub fn cmd_categories_delete<S: Storage>(
    ledger: &mut Ledger<S>,
    category: &str,
    yes: bool,
) -> Result<()> {
    let id = resolve_category_arg(ledger, category)?;
    let in_use = ledger
        .transactions()
        .iter()
        .filter(|t| t.category == id)
        .count();

    let prompt = format!(
        "Delete category '{}'? {} transactions will move to Other.",
        category, in_use
    );
    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let moved = ledger.delete_category(&id)?;
    println!(
        "✅ Deleted category '{}' ({} transactions moved to Other)",
        category, moved
    );
    Ok(())
}

pub fn cmd_categories_icons() -> Result<()> {
    println!();
    println!("🎨 Icons");
    for icon in CategoryIcon::all() {
        println!("   {}  {}", icon.glyph(), icon.as_str());
    }
    Ok(())
}
