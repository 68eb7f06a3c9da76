//! Triage worker entrypoint: JSON lines on stdin, JSON lines on stdout, logs on stderr.

use mimalloc::MiMalloc;
use tokio::io::{BufReader, stdin, stdout};

use triage::classifier::load_classifier;
use triage::config::Config;
use triage::similarity::SimilarityEngine;
use triage::worker::{Dispatcher, serve};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        activation_threshold = config.activation_threshold,
        relevance_floor = config.relevance_floor,
        max_selected = config.max_selected,
        backend = ?config.similarity_backend,
        "Triage worker starting"
    );

    let classifier = load_classifier(&config.classifier_config());
    let engine = SimilarityEngine::load(&config.similarity_config());
    let dispatcher = Dispatcher::from_config(&config, classifier, engine);

    tracing::info!(
        bypass = dispatcher.is_bypassed(),
        "Ready"
    );

    let stats = serve(&dispatcher, BufReader::new(stdin()), stdout()).await?;

    tracing::info!(
        requests = stats.requests,
        errors = stats.errors,
        "Triage worker shutdown complete"
    );
    Ok(())
}
