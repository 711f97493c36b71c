// tests/workflow_test.rs
use app_release::cli::orchestration::{run_release_workflow, ReleaseArgs, WorkflowResult};
use app_release::config::Settings;
use app_release::domain::ReleaseStage;
use app_release::registry::AppRegistry;
use app_release::runner::MockRunner;
use app_release::ReleaseError;
use std::path::Path;
use tempfile::TempDir;

/// A project checkout with `ios/` and `android/` inside a git repository
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git2::Repository::init(dir.path()).unwrap();
    std::fs::create_dir(dir.path().join("ios")).unwrap();
    std::fs::create_dir(dir.path().join("android")).unwrap();
    dir
}

fn registry_for(project: &Path) -> AppRegistry {
    let json = serde_json::json!({
        "shop": {
            "project_path": project,
            "xcodeproj": "Shop.xcodeproj",
            "target": "Shop"
        }
    });
    AppRegistry::from_json(&json.to_string()).unwrap()
}

fn args(platform: &str, environment: &str, bump_kind: Option<&str>) -> ReleaseArgs {
    ReleaseArgs {
        platform: platform.to_string(),
        environment: environment.to_string(),
        app_name: "shop".to_string(),
        bump_kind: bump_kind.map(str::to_string),
        custom_tag: None,
        dry_run: false,
    }
}

fn android_runner() -> MockRunner {
    MockRunner::new()
        .respond("get_version_name", "[10:00:00]: Result: 1.2.3\n")
        .respond("get_version_code", "[10:00:01]: Result: 40\n")
}

#[test]
fn test_android_patch_release() {
    let project = project();
    let runner = android_runner();

    let result = run_release_workflow(
        &args("android", "stage", None),
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap();

    let outcome = match result {
        WorkflowResult::Released(outcome) => outcome,
        other => panic!("expected a release, got {:?}", other),
    };
    assert_eq!(outcome.tag.name(), "stage-android-1.2.4");
    assert_eq!(outcome.version, "1.2.4");
    assert_eq!(outcome.build_number, Some(40));
    assert!(runner
        .calls()
        .iter()
        .all(|c| c.dir == project.path().join("android")));
}

#[test]
fn test_android_minor_and_major_rules() {
    let project = project();

    for (kind, expected) in [("minor", "1.3.0"), ("major", "2.2.3")] {
        let runner = android_runner();
        let result = run_release_workflow(
            &args("android", "stage", Some(kind)),
            &registry_for(project.path()),
            &Settings::default(),
            &runner,
        )
        .unwrap();

        match result {
            WorkflowResult::Released(outcome) => assert_eq!(outcome.version, expected),
            other => panic!("expected a release, got {:?}", other),
        }
    }
}

#[test]
fn test_ios_release_with_custom_tag() {
    let project = project();
    let runner = MockRunner::new().respond("get_version_number", "Result: 2.0.0");
    let mut release_args = args("ios", "stage", Some("major"));
    release_args.custom_tag = Some("hotfix".to_string());

    let result = run_release_workflow(
        &release_args,
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap();

    match result {
        WorkflowResult::Released(outcome) => {
            assert_eq!(outcome.tag.name(), "hotfix-ios-2.0.0");
        }
        other => panic!("expected a release, got {:?}", other),
    }
    assert!(runner.ran(r#"bump_type:"major""#));
}

#[test]
fn test_unknown_bump_kind_runs_no_commands() {
    let project = project();
    let runner = android_runner();

    let err = run_release_workflow(
        &args("android", "stage", Some("huge")),
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseError::Validation(_)));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_unknown_app_runs_no_commands() {
    let project = project();
    let runner = android_runner();
    let mut release_args = args("ios", "production", None);
    release_args.app_name = "bank".to_string();

    let err = run_release_workflow(
        &release_args,
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert!(runner.calls().is_empty());
}

#[test]
fn test_project_outside_git_is_rejected_before_commands() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("android")).unwrap();
    let runner = android_runner();

    let err = run_release_workflow(
        &args("android", "stage", None),
        &registry_for(dir.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap_err();

    assert!(err.is_validation());
    assert!(runner.calls().is_empty());
}

#[test]
fn test_push_failure_leaves_tag_alone() {
    let project = project();
    let runner = android_runner().fail_on("push_to_git_remote", "! [rejected] main -> main");

    let err = run_release_workflow(
        &args("android", "stage", None),
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap_err();

    assert_eq!(err.failed_stage(), Some(ReleaseStage::Push));
    assert!(runner.ran("git commit"));
    assert!(!runner.ran("add_git_tag"));
    assert!(!runner.ran("push_git_tags"));
}

#[test]
fn test_malformed_android_version_issues_no_bump_command() {
    let project = project();
    let runner = MockRunner::new().respond("get_version_name", "Result: 1.2");

    let err = run_release_workflow(
        &args("android", "stage", None),
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap_err();

    assert!(matches!(
        err.root_cause(),
        ReleaseError::UnsupportedVersionFormat(_)
    ));
    assert!(!runner.ran("increment_version_code"));
    assert!(!runner.ran("android_set_version_name"));
}

#[test]
fn test_dry_run_only_reads() {
    let project = project();
    let runner = android_runner();
    let mut release_args = args("android", "feature", Some("minor"));
    release_args.dry_run = true;

    let result = run_release_workflow(
        &release_args,
        &registry_for(project.path()),
        &Settings::default(),
        &runner,
    )
    .unwrap();

    assert_eq!(runner.commands(), vec!["fastlane run get_version_name"]);
    match result {
        WorkflowResult::Planned(plan) => {
            assert_eq!(plan.len(), 5);
            assert!(plan[3].1[0].contains("feature-android-{version}"));
        }
        other => panic!("expected a plan, got {:?}", other),
    }
}

#[test]
fn test_settings_change_directories_and_program() {
    let project = project();
    std::fs::create_dir(project.path().join("mobile-android")).unwrap();
    let settings: Settings = toml::from_str(
        r#"
[tool]
program = "bundle exec fastlane"

[android]
directory = "mobile-android"
gradle_file = "./app/build.gradle.kts"
"#,
    )
    .unwrap();
    let runner = android_runner();

    run_release_workflow(
        &args("android", "stage", None),
        &registry_for(project.path()),
        &settings,
        &runner,
    )
    .unwrap();

    assert!(runner.ran("bundle exec fastlane run increment_version_code"));
    assert!(runner.ran(r#"git add "./app/build.gradle.kts""#));
    assert!(runner
        .calls()
        .iter()
        .all(|c| c.dir == project.path().join("mobile-android")));
}
