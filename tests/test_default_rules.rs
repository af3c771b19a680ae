// Copyright (C) Brian G. Milnes 2025

//! Tests for the default rule registry running as a set

use restyler::{analyze, apply_all, default_rules, CancelToken, ConfigPod, SourceTree};

#[test]
fn test_registry_contents() {
    let rules = default_rules();
    let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
    assert_eq!(
        ids,
        vec![
            "leading-bom",
            "import-order",
            "unused-local",
            "variable-naming",
            "redundant-parens",
            "merge-option-check",
        ]
    );
}

#[test]
fn test_clean_file_yields_no_diagnostics() {
    let source = "use std::path::PathBuf;\n\nfn main() {\n    let path = PathBuf::new();\n    consume(path);\n}\n";
    let tree = SourceTree::parse(source);
    let rules = default_rules();
    let config = ConfigPod::default();
    let cancel = CancelToken::new();

    let diagnostics = analyze(&tree, &rules, &config, None, &cancel);
    assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
}

#[test]
fn test_multiple_rules_fire_on_one_file() {
    let source = "fn main() {\n    let orphan = 1;\n    let x = (2);\n    consume(x);\n}\n";
    let tree = SourceTree::parse(source);
    let rules = default_rules();
    let config = ConfigPod::default();
    let cancel = CancelToken::new();

    let diagnostics = analyze(&tree, &rules, &config, None, &cancel);
    let ids: Vec<&str> = diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
    assert!(ids.contains(&"unused-local"));
    assert!(ids.contains(&"redundant-parens"));
}

#[test]
fn test_whole_registry_fixes_to_a_fixed_point() {
    let source = "use serde::Deserialize;\nuse std::fs;\n\nfn main() {\n    let temp_path = (compute());\n    consume(temp_path);\n}\n";
    let tree = SourceTree::parse(source);
    let rules = default_rules();
    let config = ConfigPod::default();
    let cancel = CancelToken::new();

    let outcome = apply_all(tree, &rules, &config, None, &cancel);
    assert!(outcome.diagnostics.is_empty(), "left: {:?}", outcome.diagnostics);
    assert_eq!(outcome.fixes_applied, 3);
    assert_eq!(
        outcome.tree.text(),
        "use std::fs;\n\nuse serde::Deserialize;\n\nfn main() {\n    let path = compute();\n    consume(path);\n}\n"
    );
}
