//! Fundra job daemon
//!
//! Wires the in-memory reference store to the recurring jobs and keeps
//! them on schedule until interrupted.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundra_core::config::FundConfig;
use fundra_core::eligibility::EligibilityEngine;
use fundra_core::jobs::{
    ContributionValidationJob, EligibilityRefreshJob, FailedTransactionRetryJob,
    InterestAccrualJob, JobRunner, RetryPolicy,
};
use fundra_core::ledger::TransactionLedger;
use fundra_core::store::{FundStore, MemberCache, NotificationDispatcher};
use fundra_core::workflow::ContributionWorkflow;
use fundra_store::{LogDispatcher, MemoryStore, MokaMemberCache};

fn load_config() -> anyhow::Result<FundConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("fundra").required(false))
        .add_source(config::Environment::with_prefix("FUNDRA"))
        .build()?;
    Ok(settings.try_deserialize()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundra=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(load_config()?);
    info!(
        minimum_age = config.minimum_eligibility_age,
        annual_rate = %config.annual_interest_rate_percent,
        "configuration loaded"
    );

    // Build the service graph over the reference store
    let store: Arc<dyn FundStore> = Arc::new(MemoryStore::with_default_rules(&config));
    let cache: Arc<dyn MemberCache> =
        Arc::new(MokaMemberCache::new(10_000, config.cache_ttl_secs));
    let notifier: Arc<dyn NotificationDispatcher> = Arc::new(LogDispatcher);
    let ledger = Arc::new(TransactionLedger::new(Arc::clone(&config)));
    let workflow = Arc::new(ContributionWorkflow::new(
        Arc::clone(&store),
        Arc::clone(&ledger),
        Arc::clone(&cache),
        Arc::clone(&config),
    ));
    let engine = Arc::new(EligibilityEngine::new(
        Arc::clone(&store),
        Arc::clone(&cache),
    ));

    // Register the recurring jobs
    let mut runner = JobRunner::new(RetryPolicy {
        max_attempts: config.job_retry_attempts,
    });
    runner.register(Arc::new(ContributionValidationJob::new(
        Arc::clone(&workflow),
        Arc::clone(&notifier),
    )));
    runner.register(Arc::new(EligibilityRefreshJob::new(
        Arc::clone(&workflow),
        Arc::clone(&engine),
        Arc::clone(&notifier),
    )));
    runner.register(Arc::new(InterestAccrualJob::new(
        Arc::clone(&workflow),
        Arc::clone(&ledger),
        Arc::clone(&store),
        Arc::clone(&notifier),
        Arc::clone(&config),
    )));
    runner.register(Arc::new(FailedTransactionRetryJob::new(
        Arc::clone(&ledger),
        Arc::clone(&store),
        Arc::clone(&notifier),
    )));

    let handles = runner.spawn_all();
    info!(jobs = handles.len(), "job daemon started");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    for handle in handles {
        handle.abort();
    }

    Ok(())
}
