//! Spending advice command

use anyhow::Result;
use chrono::Utc;
use tally_core::{
    get_financial_insights, AdviceBackend, AdviceClient, AdviceRequest, Ledger, Settings, Storage,
};

pub async fn cmd_advice<S: Storage>(ledger: &Ledger<S>, settings: &Settings) -> Result<()> {
    let Some(client) = AdviceClient::from_env(&settings.advice) else {
        println!("💡 Tip: Set OLLAMA_HOST to get spending advice from a local model");
        println!("   (or ADVICE_BACKEND=mock to try it without one)");
        return Ok(());
    };

    advise(&client, ledger, settings).await
}

/// Ask a backend about this month's figures and print the answer
pub async fn advise<B, S>(backend: &B, ledger: &Ledger<S>, settings: &Settings) -> Result<()>
where
    B: AdviceBackend + ?Sized,
    S: Storage,
{
    let snapshot = ledger.dashboard(&Utc::now());
    let request = AdviceRequest::from_snapshot(
        &snapshot.totals,
        &snapshot.categories,
        &settings.budget.currency_symbol,
    );

    println!("🤖 Asking {} about {}...", backend.model(), snapshot.totals.month.label());
    if !backend.health_check().await {
        println!("   ⚠️  Backend is not responding; trying anyway");
    }

    let insights = get_financial_insights(backend, &request).await;
    println!();
    println!("{}", insights);
    println!();
    Ok(())
}
