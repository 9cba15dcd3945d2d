mod common;

use common::fixtures_root;
use forge_migrator::{RunMode, Runner, RunnerConfig, RunnerError, TransferInput};
use std::path::PathBuf;

fn fixture_exports() -> TransferInput {
    TransferInput::Export {
        issues: fixtures_root().join("issues.json"),
        requests: fixtures_root().join("requests.json"),
    }
}

fn config() -> RunnerConfig {
    RunnerConfig::new(fixtures_root().join("migration.toml"))
}

#[tokio::test]
async fn dry_run_plans_without_credentials() {
    let runner = Runner::new(config()).unwrap();
    let mode = RunMode::Transfer {
        input: fixture_exports(),
        dry_run: true,
    };

    let summary = runner.run(&mode).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.planned, 3);
    assert_eq!(summary.mutations(), 0);
}

#[tokio::test]
async fn start_offset_override_shrinks_plan() {
    let runner = Runner::new(config().with_start_offset(Some(1))).unwrap();
    assert_eq!(runner.settings().migration.start_offset, 1);

    let mode = RunMode::Transfer {
        input: fixture_exports(),
        dry_run: true,
    };
    let summary = runner.run(&mode).await.unwrap();

    assert_eq!(summary.planned, 2);
}

#[tokio::test]
async fn live_modes_need_tokens() {
    let runner = Runner::new(config()).unwrap();

    let labels = RunMode::Labels {
        issues: fixtures_root().join("issues.json"),
    };
    assert!(matches!(
        runner.run(&labels).await,
        Err(RunnerError::MissingToken {
            name: "GITHUB_TOKEN"
        })
    ));
    assert!(matches!(
        runner.run(&RunMode::CloseOut).await,
        Err(RunnerError::MissingToken {
            name: "PAGURE_TOKEN"
        })
    ));
}

#[test]
fn missing_settings_file_is_reported() {
    let result = Runner::new(RunnerConfig::new(PathBuf::from("does/not/exist.toml")));
    assert!(matches!(result, Err(RunnerError::Config(_))));
}

#[test]
fn invalid_override_is_rejected() {
    let result = Runner::new(config().with_first_migrated_issue(Some(0)));
    assert!(matches!(result, Err(RunnerError::Config(_))));
}
