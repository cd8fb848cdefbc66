use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use pool_autoscaler::{
    actors::scheduler::SchedulerHandle,
    config::{Config, read_config_file},
    controller::AutoscaleController,
    metrics::{HttpMetricBackend, MetricSampler},
    pool::HttpResourcePool,
};
use tokio::sync::broadcast;
use tracing::{info, level_filters::LevelFilter, trace, warn};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

/// Grace period for an in-flight evaluation after ctrl-c
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Project the managed pool belongs to
    project: String,

    /// Instance identifying the managed pool
    instance: String,

    /// Config file
    #[arg(short)]
    file: Option<String>,
}

fn init() {
    dotenv::dotenv().ok();

    let filter = filter::Targets::new().with_targets(vec![
        ("pool_autoscaler", LevelFilter::TRACE),
        ("scalerd", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };
    config.policy.validate()?;

    let pool_id = format!("{}/{}", args.project, args.instance);

    let backend = Arc::new(HttpMetricBackend::new(
        &config.monitor.url,
        config.monitor.secret.clone(),
        config.request_timeout(),
    ));
    let sampler = MetricSampler::new(backend, &config.monitor.metric, config.policy.reduction);
    let pool = Arc::new(HttpResourcePool::new(
        &config.pool.url,
        &pool_id,
        config.request_timeout(),
    ));
    let controller = AutoscaleController::new(config.policy.clone(), sampler, pool);

    let (event_tx, _event_rx) = broadcast::channel(256);
    let handle = SchedulerHandle::spawn(controller, &pool_id, event_tx);

    info!(
        pool = %pool_id,
        metric = %config.monitor.metric,
        period_secs = config.policy.evaluation_period_secs,
        "autoscaler started"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    handle.shutdown().await?;
    if tokio::time::timeout(SHUTDOWN_GRACE, handle.closed())
        .await
        .is_err()
    {
        warn!("grace period elapsed, abandoning in-flight evaluation");
    }

    Ok(())
}
