//! Environment configuration wired through the dispatcher.

mod common;

use std::env;

use serde_json::json;
use serial_test::serial;

use triage::classifier::load_classifier;
use triage::config::{Config, ConfigError};
use triage::similarity::SimilarityEngine;
use triage::worker::Dispatcher;

use common::fixtures::classifier_artifact;
use common::harness::{frame, run};

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for name in Config::ENV_VARS {
        unsafe { env::remove_var(name) };
    }
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for name in Config::ENV_VARS {
        unsafe { env::remove_var(name) };
    }
    result
}

fn build(config: &Config) -> Dispatcher {
    Dispatcher::from_config(
        config,
        load_classifier(&config.classifier_config()),
        SimilarityEngine::load(&config.similarity_config()),
    )
}

#[tokio::test]
#[serial]
async fn test_env_overrides_reach_the_dispatcher() {
    let config = with_env_vars(
        &[
            ("TRIAGE_MAX_SELECTED", "1"),
            ("TRIAGE_SIMILARITY_BACKEND", "pure"),
        ],
        Config::from_env,
    )
    .unwrap();
    config.validate().unwrap();

    let dispatcher = build(&config);
    assert!(dispatcher.is_bypassed());

    let request = json!({
        "task": "phase_b",
        "prompt": "climate",
        "inventory": [
            {"name": "a", "description": "climate"},
            {"name": "b", "description": "climate"},
        ],
    });
    let transcript = run(&dispatcher, &frame(&[request])).await;
    let response = &transcript.responses()[0];

    assert_eq!(response["selectedMemories"].as_array().unwrap().len(), 1);
    assert_eq!(response["selectedMemories"][0]["name"], "a");
    assert!(response["notes"].as_str().unwrap().ends_with("top 1)"));
}

#[tokio::test]
#[serial]
async fn test_model_path_from_env_loads_classifier() {
    let artifact = classifier_artifact();
    let path = artifact.path().to_string_lossy().into_owned();

    let config = with_env_vars(
        &[
            ("TRIAGE_MODEL_PATH", path.as_str()),
            ("TRIAGE_ACTIVATION_THRESHOLD", "0.999"),
        ],
        Config::from_env,
    )
    .unwrap();

    let dispatcher = build(&config);
    assert!(!dispatcher.is_bypassed());

    // Nothing reaches 0.999, so the argmax label is forced on.
    let transcript = run(
        &dispatcher,
        &frame(&[json!({"task": "phase_a", "prompt": "open chrome"})]),
    )
    .await;
    let response = &transcript.responses()[0];
    assert_eq!(response["outputType"], "command");
    assert_eq!(response["outputLabels"]["command"], true);
}

#[test]
#[serial]
fn test_invalid_env_is_a_startup_error() {
    let err = with_env_vars(&[("TRIAGE_SCORING_TIMEOUT_MS", "soon")], Config::from_env)
        .unwrap_err();
    assert!(matches!(err, ConfigError::IntParseError { .. }));

    let config = with_env_vars(&[("TRIAGE_RELEVANCE_FLOOR", "2")], Config::from_env).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}
