//! End-to-end runs over a small multi-version project
//!
//! Config file -> task -> processed tree, switched across several targets.

use cutter_core::{Evaluator, ExpressionResult};
use cutter_fs::{CutTask, TaskConfig};
use cutter_test_utils::SourceTree;
use cutter_version::{SemverScheme, VersionChecker};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;

/// Written as it would look while developing against 1.21.
const MOD_JAVA: &str = "\
class Mod {
    void init() {
        /*? if >=1.21 {*/
        latest();
        /*?} else if >=1.20 {*/
        /*modern();*/
        /*?} else {*/
        /*legacy();*/
        /*?} */
    }
}
";

const CALLS: [&str; 3] = ["latest();", "modern();", "legacy();"];

/// What a compiler sees: the text with every block comment removed.
fn compiled(source: &str) -> String {
    let mut out = String::new();
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn active_calls(source: &str) -> Vec<&'static str> {
    let code = compiled(source);
    CALLS.into_iter().filter(|call| code.contains(call)).collect()
}

fn switch(tree: &SourceTree, target: &str) -> cutter_fs::TaskReport {
    CutTask::new(TaskConfig::new(tree.root(), target))
        .unwrap()
        .run()
        .unwrap()
}

#[rstest]
#[case("1.21.3", "latest();")]
#[case("1.20.4", "modern();")]
#[case("1.20", "modern();")]
#[case("1.19.2", "legacy();")]
fn test_exactly_one_branch_compiles(#[case] target: &str, #[case] expected: &str) {
    let tree = SourceTree::new().with_file("src/Mod.java", MOD_JAVA);

    switch(&tree, target);
    assert_eq!(active_calls(&tree.read("src/Mod.java")), vec![expected]);

    let again = switch(&tree, target);
    assert!(again.modified.is_empty(), "second run changed {:?}", again.modified);
}

#[test]
fn test_switching_through_every_target() {
    let tree = SourceTree::new().with_file("src/Mod.java", MOD_JAVA);

    for (target, expected) in [
        ("1.19", "legacy();"),
        ("1.20.4", "modern();"),
        ("1.21", "latest();"),
        ("1.20.1", "modern();"),
        ("1.19.4", "legacy();"),
    ] {
        switch(&tree, target);
        let source = tree.read("src/Mod.java");
        assert_eq!(active_calls(&source), vec![expected], "at {target}:\n{source}");
    }
}

#[test]
fn test_chain_output_at_middle_version() {
    let tree = SourceTree::new().with_file("src/Mod.java", MOD_JAVA);
    switch(&tree, "1.20.4");

    tree.assert_file_eq(
        "src/Mod.java",
        "\
class Mod {
    void init() {
        /*? if >=1.21 {*//*
        latest();
        *//*?} else if >=1.20 {*/
        modern();
        /*?} else {*/
        /*legacy();*/
        /*?} */
    }
}
",
    );
}

#[test]
fn test_config_file_drives_whole_project() {
    let tree = SourceTree::new()
        .with_file("project/src/Mod.java", MOD_JAVA)
        .with_file("project/src/README.md", "/*? if >=1.21 */ not code\n")
        .with_file(
            "project/cutter.yaml",
            "input: src\noutput: build/1.19\ntarget: '1.19'\nextensions: [java]\n",
        );

    let config = TaskConfig::load(&tree.path("project/cutter.yaml")).unwrap();
    let report = CutTask::new(config).unwrap().run().unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.written, 1);
    assert_eq!(
        active_calls(&tree.read("project/build/1.19/Mod.java")),
        vec!["legacy();"]
    );
    tree.assert_file_eq("project/src/Mod.java", MOD_JAVA);
    tree.assert_file_not_exists("project/build/1.19/README.md");
}

#[test]
fn test_custom_checker_alongside_versions() {
    let loader = |_: bool, expression: &str| -> ExpressionResult {
        match expression {
            "fabric" => ExpressionResult::True,
            "forge" => ExpressionResult::False,
            _ => ExpressionResult::NotApplicable,
        }
    };
    let evaluator = Evaluator::builder()
        .checker(loader)
        .checker(VersionChecker::new(SemverScheme, "1.20.4").unwrap())
        .build();

    let tree = SourceTree::new().with_file(
        "Entry.java",
        "/*? if forge */\nforgeInit();\n/*? if fabric */\n/*fabricInit();*/\n/*? if <1.20 */\nold();\n",
    );
    let config = TaskConfig::new(tree.root(), "1.20.4");
    let report = CutTask::with_evaluator(config, Arc::new(evaluator))
        .run()
        .unwrap();

    assert_eq!(report.modified.len(), 1);
    tree.assert_file_eq(
        "Entry.java",
        "/*? if forge */\n/*forgeInit();*/\n/*? if fabric */\nfabricInit();\n/*? if <1.20 */\n/*old();*/\n",
    );
}

#[test]
fn test_one_evaluator_shared_across_threads() {
    let evaluator = Arc::new(
        Evaluator::builder()
            .checker(VersionChecker::new(SemverScheme, "1.19").unwrap())
            .build(),
    );
    let trees: Vec<SourceTree> = (0..4)
        .map(|_| SourceTree::new().with_file("Mod.java", MOD_JAVA))
        .collect();

    std::thread::scope(|scope| {
        for tree in &trees {
            let evaluator = Arc::clone(&evaluator);
            scope.spawn(move || {
                CutTask::with_evaluator(TaskConfig::new(tree.root(), "1.19"), evaluator)
                    .run()
                    .unwrap();
            });
        }
    });

    let first = trees[0].read("Mod.java");
    assert_eq!(active_calls(&first), vec!["legacy();"]);
    for tree in &trees[1..] {
        assert_eq!(tree.read("Mod.java"), first);
    }
}
