//! Tally CLI - Personal budget ledger
//!
//! Usage:
//!   tally init                      Initialize the ledger
//!   tally tx add 250 -c food        Record an expense
//!   tally history --search coffee   Filter transaction history
//!   tally dashboard                 Show this month's summary

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt, &settings),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt, &settings),
        Commands::Dashboard => {
            let ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            commands::cmd_dashboard(&ledger, &settings, cli.json)
        }
        Commands::Tx { action } => {
            let mut ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            match action {
                None => commands::cmd_tx_list(&ledger, &settings, 20),
                Some(TxAction::List { limit }) => commands::cmd_tx_list(&ledger, &settings, limit),
                Some(TxAction::Add {
                    amount,
                    kind,
                    category,
                    description,
                    date,
                    receipt,
                }) => commands::cmd_tx_add(
                    &mut ledger,
                    &settings,
                    commands::TxArgs {
                        amount: Some(amount),
                        kind: Some(kind),
                        category,
                        description: Some(description),
                        date,
                        receipt,
                    },
                ),
                Some(TxAction::Edit {
                    id,
                    amount,
                    kind,
                    category,
                    description,
                    date,
                }) => commands::cmd_tx_edit(
                    &mut ledger,
                    &settings,
                    &id,
                    commands::TxArgs {
                        amount,
                        kind,
                        category,
                        description,
                        date,
                        receipt: None,
                    },
                ),
                Some(TxAction::Delete { id, yes }) => {
                    commands::cmd_tx_delete(&mut ledger, &id, yes)
                }
            }
        }
        Commands::History {
            kind,
            category,
            search,
            month,
            from,
            to,
            export,
        } => {
            let ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            let filter = commands::build_filter(
                &ledger,
                kind.as_deref(),
                category.as_deref(),
                search.as_deref(),
                month.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )?;
            commands::cmd_history(&ledger, &settings, &filter, export.as_deref(), cli.json)
        }
        Commands::Categories { action } => {
            let mut ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&ledger),
                Some(CategoriesAction::Add { name, icon }) => {
                    commands::cmd_categories_add(&mut ledger, &name, &icon)
                }
                Some(CategoriesAction::Rename {
                    category,
                    name,
                    icon,
                }) => {
                    commands::cmd_categories_rename(&mut ledger, &category, &name, icon.as_deref())
                }
                Some(CategoriesAction::Delete { category, yes }) => {
                    commands::cmd_categories_delete(&mut ledger, &category, yes)
                }
                Some(CategoriesAction::Icons) => commands::cmd_categories_icons(),
            }
        }
        Commands::Goals { action } => {
            let mut ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&ledger, &settings),
                Some(GoalsAction::Add {
                    title,
                    target,
                    current,
                }) => commands::cmd_goals_add(&mut ledger, &settings, &title, target, current),
                Some(GoalsAction::Edit {
                    id,
                    title,
                    target,
                    current,
                }) => commands::cmd_goals_edit(
                    &mut ledger,
                    &settings,
                    &id,
                    title.as_deref(),
                    target,
                    current,
                ),
                Some(GoalsAction::Fund { id, amount }) => {
                    commands::cmd_goals_fund(&mut ledger, &settings, &id, amount)
                }
                Some(GoalsAction::Delete { id, yes }) => {
                    commands::cmd_goals_delete(&mut ledger, &id, yes)
                }
            }
        }
        Commands::Budget { action } => {
            let mut ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            match action {
                None | Some(BudgetAction::Show) => commands::cmd_budget_show(&ledger, &settings),
                Some(BudgetAction::Set { amount }) => {
                    commands::cmd_budget_set(&mut ledger, &settings, amount)
                }
            }
        }
        Commands::Report { report_type } => {
            let ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            match report_type {
                ReportType::Spending => commands::cmd_report_spending(&ledger, &settings, cli.json),
                ReportType::Trends { months } => {
                    commands::cmd_report_trends(&ledger, &settings, months, cli.json)
                }
                ReportType::Months => commands::cmd_report_months(&ledger, cli.json),
            }
        }
        Commands::Advice => {
            let ledger = commands::open_ledger(&cli.db, cli.no_encrypt, &settings)?;
            commands::cmd_advice(&ledger, &settings).await
        }
    }
}
