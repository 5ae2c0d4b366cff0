//! Focused unit tests covering plan CLI configuration and request loading.

use super::helpers::{french_plan_file, workspace, write_plan_file, write_utf8};
use crate::plan::{
    CatalogueRepository, PlanArgs, PlanConfig, config_from_layers_for_test, load_plan_file,
    run_plan_with,
};
use super::*;
use camino::Utf8PathBuf;
use log::LevelFilter;
use rstest::rstest;
use std::time::Duration;
use wayfarer_core::test_support::paris;
use wayfarer_core::{DataError, DestinationRepository, PipelineStage, PlanError, PlanResponse};
use wayfarer_planner::PlannerConfig;

fn config_for(request_path: Utf8PathBuf) -> PlanConfig {
    PlanConfig {
        request_path,
        planner: PlannerConfig::default(),
        log_level: LevelFilter::Off,
    }
}

#[rstest]
fn converting_plan_without_request_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_planner_defaults() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("trip.json")),
        ..PlanArgs::default()
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.planner, PlannerConfig::default());
    assert_eq!(config.log_level, LevelFilter::Warn);
}

#[rstest]
fn plan_config_applies_overrides() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("trip.json")),
        max_passes: Some(3),
        deadline_ms: Some(40),
        log_level: Some("DEBUG".to_owned()),
    };
    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.planner.max_two_opt_passes, Some(3));
    assert_eq!(config.planner.search_deadline, Some(Duration::from_millis(40)));
    assert_eq!(config.log_level, LevelFilter::Debug);
}

#[rstest]
#[case::zero_passes(Some(0), None, ARG_PLAN_MAX_PASSES)]
#[case::unknown_level(None, Some("chatty"), ARG_PLAN_LOG_LEVEL)]
fn plan_config_rejects_unusable_settings(
    #[case] max_passes: Option<usize>,
    #[case] log_level: Option<&str>,
    #[case] expected_field: &'static str,
) {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("trip.json")),
        max_passes,
        log_level: log_level.map(str::to_owned),
        ..PlanArgs::default()
    };
    let err = PlanConfig::try_from(args).expect_err("setting should be rejected");
    match err {
        CliError::InvalidSetting { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected InvalidSetting, found {other:?}"),
    }
}

#[rstest]
fn load_plan_file_reports_missing_files() {
    let (_tmp, root) = workspace();
    let path = root.join("absent.json");
    let err = load_plan_file(&path).expect_err("missing file");
    match err {
        CliError::OpenPlanRequest { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected OpenPlanRequest, found {other:?}"),
    }
}

#[rstest]
fn load_plan_file_reports_malformed_json() {
    let (_tmp, root) = workspace();
    let path = root.join("broken.json");
    write_utf8(&path, b"{ \"preferences\": ");
    let err = load_plan_file(&path).expect_err("malformed file");
    assert!(matches!(err, CliError::ParsePlanRequest { .. }));
}

#[rstest]
fn catalogue_defaults_to_empty() {
    let (_tmp, root) = workspace();
    let path = root.join("bare.json");
    write_utf8(
        &path,
        br#"{
            "preferences": {
                "budget": { "total": 900.0, "currency": "EUR" },
                "duration": { "days": 3 }
            },
            "destination_ids": ["paris"]
        }"#,
    );
    let file = load_plan_file(&path).expect("bare file parses");
    assert!(file.catalogue.is_empty());
    assert_eq!(file.destination_ids, ["paris"]);
}

#[rstest]
fn duplicate_catalogue_entries_are_rejected() {
    let (_tmp, root) = workspace();
    let path = root.join("dupe.json");
    let mut file = french_plan_file(&["paris"]);
    file.catalogue.push(paris());
    write_plan_file(&path, &file);

    let mut sink = Vec::new();
    let err = run_plan_with(&config_for(path), &mut sink).expect_err("duplicate catalogue");
    match err {
        CliError::DuplicateCatalogueEntry { id, .. } => assert_eq!(id, "paris"),
        other => panic!("expected DuplicateCatalogueEntry, found {other:?}"),
    }
    assert!(sink.is_empty());
}

#[rstest]
fn run_plan_with_writes_pretty_json() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    write_plan_file(&path, &french_plan_file(&["paris", "lyon"]));

    let mut sink = Vec::new();
    run_plan_with(&config_for(path), &mut sink).expect("plan succeeds");
    let stdout = String::from_utf8(sink).expect("utf-8 output");
    assert!(stdout.ends_with("}\n"));
    let response: PlanResponse = serde_json::from_str(&stdout).expect("JSON plan response");
    assert_eq!(response.trip.visiting_order(), ["paris", "lyon"]);
    assert_eq!(response.trip.total_duration_days, 6);
}

#[rstest]
fn unknown_destinations_surface_the_plan_error() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    write_plan_file(&path, &french_plan_file(&["paris", "nice"]));

    let mut sink = Vec::new();
    let err = run_plan_with(&config_for(path), &mut sink).expect_err("nice is not catalogued");
    match err {
        CliError::Plan { source } => assert_eq!(
            source,
            PlanError::data(
                PipelineStage::BuildMatrices,
                DataError::NotFound { id: "nice".into() }
            )
        ),
        other => panic!("expected Plan, found {other:?}"),
    }
}

#[rstest]
fn catalogue_attractions_with_negative_costs_are_rejected() {
    let (_tmp, root) = workspace();
    let path = root.join("trip.json");
    let mut file = french_plan_file(&["paris", "lyon"]);
    if let Some(attraction) = file
        .catalogue
        .first_mut()
        .and_then(|destination| destination.attractions.first_mut())
    {
        attraction.cost = -500.0;
    }
    write_plan_file(&path, &file);

    let mut sink = Vec::new();
    let err = run_plan_with(&config_for(path), &mut sink).expect_err("negative cost");
    match err {
        CliError::Plan { source } => assert_eq!(
            source,
            PlanError::data(
                PipelineStage::BuildMatrices,
                DataError::InvalidAttraction {
                    id: "paris".into(),
                    attraction: "louvre".into(),
                    field: "cost",
                }
            )
        ),
        other => panic!("expected Plan, found {other:?}"),
    }
    assert!(sink.is_empty());
}

#[rstest]
fn catalogue_repository_is_empty_by_default() {
    assert!(CatalogueRepository::default().get_destination("paris").is_none());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honour_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "max_passes": 4,
            "log_level": "info",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "deadline_ms": 90,
    }));
    composer.push_cli(json!({ "max_passes": 9 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.planner.max_two_opt_passes, Some(9));
    assert_eq!(config.planner.search_deadline, Some(Duration::from_millis(90)));
    assert_eq!(config.log_level, LevelFilter::Info);
}
