//! Whole-tree processing runs.

use cutter_fs::{CutTask, Error, FailurePolicy, TaskConfig};
use cutter_test_utils::SourceTree;
use cutter_test_utils::sources::{
    BROKEN_JAVA, COMPAT_JAVA, COMPAT_JAVA_1_19, PLAIN_JAVA, REGISTRY_KT, REGISTRY_KT_1_19,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn sample_tree() -> SourceTree {
    SourceTree::new()
        .with_file("src/Compat.java", COMPAT_JAVA)
        .with_file("src/Plain.java", PLAIN_JAVA)
        .with_file("src/Registry.kt", REGISTRY_KT)
}

fn run(config: TaskConfig) -> cutter_fs::Result<cutter_fs::TaskReport> {
    CutTask::new(config)?.run()
}

#[test]
fn test_in_place_switch_rewrites_changed_files() {
    let tree = sample_tree();
    let report = run(TaskConfig::new(tree.root(), "1.19.2")).unwrap();

    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA_1_19);
    tree.assert_file_eq("src/Registry.kt", REGISTRY_KT_1_19);
    tree.assert_file_eq("src/Plain.java", PLAIN_JAVA);

    assert_eq!(report.processed, 3);
    assert_eq!(
        report.modified,
        vec![PathBuf::from("src/Compat.java"), PathBuf::from("src/Registry.kt")]
    );
    assert_eq!(report.written, 2);
    assert!(report.is_success());
}

#[test]
fn test_in_place_run_at_current_target_writes_nothing() {
    let tree = sample_tree();
    let before = tree.modified("src/Compat.java");

    let report = run(TaskConfig::new(tree.root(), "1.20.4")).unwrap();

    assert_eq!(report.processed, 3);
    assert!(report.modified.is_empty());
    assert_eq!(report.written, 0);
    assert_eq!(tree.modified("src/Compat.java"), before);
}

#[test]
fn test_switching_back_and_forth_is_stable() {
    let tree = sample_tree();
    run(TaskConfig::new(tree.root(), "1.19")).unwrap();
    run(TaskConfig::new(tree.root(), "1.20.1")).unwrap();

    let compat = tree.read("src/Compat.java");
    assert!(compat.contains("{*/\n    void render() { newApi(); }\n    /*?}"));
    assert!(tree.read("src/Registry.kt").contains("\n        registerNew()\n"));

    run(TaskConfig::new(tree.root(), "1.19")).unwrap();
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA_1_19);
    tree.assert_file_eq("src/Registry.kt", REGISTRY_KT_1_19);
}

#[test]
fn test_separate_output_root_receives_every_file() {
    let tree = sample_tree();
    let out = SourceTree::new();
    let mut config = TaskConfig::new(tree.root(), "1.19");
    config.output = Some(out.root().to_path_buf());

    let report = run(config).unwrap();

    assert_eq!(report.written, 3);
    out.assert_file_eq("src/Compat.java", COMPAT_JAVA_1_19);
    out.assert_file_eq("src/Plain.java", PLAIN_JAVA);
    out.assert_file_eq("src/Registry.kt", REGISTRY_KT_1_19);
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA);
}

#[test]
fn test_output_root_inside_input_is_not_walked() {
    let tree = SourceTree::new().with_file("src/Compat.java", COMPAT_JAVA);
    let mut config = TaskConfig::new(tree.root(), "1.19");
    config.output = Some(tree.path("build"));

    let first = run(config.clone()).unwrap();
    let second = run(config).unwrap();

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 1);
    tree.assert_file_eq("build/src/Compat.java", COMPAT_JAVA_1_19);
    tree.assert_file_not_exists("build/build");
}

#[test]
fn test_extension_filter() {
    let tree = sample_tree();
    let mut config = TaskConfig::new(tree.root(), "1.19");
    config.extensions = vec!["java".into()];

    let report = run(config).unwrap();

    assert_eq!(report.processed, 2);
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA_1_19);
    tree.assert_file_eq("src/Registry.kt", REGISTRY_KT);
}

#[test]
fn test_single_file_input() {
    let tree = sample_tree();
    let mut config = TaskConfig::new(tree.path("src/Registry.kt"), "1.19");
    config.output = Some(tree.path("out/Registry.kt"));

    let report = run(config).unwrap();

    assert_eq!(report.processed, 1);
    tree.assert_file_eq("out/Registry.kt", REGISTRY_KT_1_19);
}

#[test]
fn test_abort_policy_stops_at_failing_file() {
    let tree = sample_tree().with_file("src/Broken.java", BROKEN_JAVA);

    let err = run(TaskConfig::new(tree.root(), "1.19")).unwrap_err();

    match err {
        Error::Process { path, source } => {
            assert!(path.ends_with("src/Broken.java"));
            assert_eq!(source.to_string().split(':').next(), Some("Syntax error at line 2"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Broken.java sorts first, so nothing else was touched
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA);
}

#[test]
fn test_skip_policy_reports_and_continues() {
    let tree = sample_tree().with_file("src/Broken.java", BROKEN_JAVA);
    let mut config = TaskConfig::new(tree.root(), "1.19");
    config.on_error = FailurePolicy::Skip;

    let report = run(config).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, PathBuf::from("src/Broken.java"));
    assert!(report.failed[0].message.ends_with("closer without context: }"));
    assert_eq!(report.processed, 3);
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA_1_19);
    tree.assert_file_eq("src/Broken.java", BROKEN_JAVA);
}

#[test]
fn test_dry_run_writes_nothing() {
    let tree = sample_tree();
    let report = CutTask::new(TaskConfig::new(tree.root(), "1.19"))
        .unwrap()
        .dry_run(true)
        .run()
        .unwrap();

    assert_eq!(report.modified.len(), 2);
    assert_eq!(report.written, 0);
    tree.assert_file_eq("src/Compat.java", COMPAT_JAVA);
}

#[test]
fn test_missing_input() {
    let tree = SourceTree::new();
    let err = run(TaskConfig::new(tree.path("nope"), "1.19")).unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
}

#[test]
fn test_bad_target_fails_before_walking() {
    let tree = sample_tree();
    let err = CutTask::new(TaskConfig::new(tree.root(), "latest")).unwrap_err();
    assert!(matches!(err, Error::Version(_)));
}

#[test]
fn test_debug_literals() {
    let tree = SourceTree::new().with_file("A.java", "/*? if false */\nx();\n");
    let mut config = TaskConfig::new(tree.root(), "1.20");
    config.debug = true;

    run(config).unwrap();

    tree.assert_file_eq("A.java", "/*? if false */\n/*x();*/\n");
}

#[test]
fn test_output_matches_predicates() {
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/Registry.kt").write_str(REGISTRY_KT).unwrap();

    run(TaskConfig::new(temp.path(), "1.19")).unwrap();

    temp.child("src/Registry.kt")
        .assert(predicate::str::contains("/*        registerNew()*/"))
        .assert(predicate::str::contains("\n        registerOld()\n"));
    temp.child("src/.Registry.kt.tmp").assert(predicate::path::missing());
}
