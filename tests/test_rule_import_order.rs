// Copyright (C) Brian G. Milnes 2025

//! Tests for the import-order rule

use restyler::rules::import_order::import_order::ImportOrder;
use restyler::{analyze, apply_all, CancelToken, ConfigPod, Diagnostic, Rule, SourceTree};

fn check(source: &str) -> Vec<Diagnostic> {
    let tree = SourceTree::parse(source);
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(ImportOrder)];
    let config = ConfigPod::default();
    let cancel = CancelToken::new();
    analyze(&tree, &rules, &config, None, &cancel)
}

fn fix(source: &str) -> String {
    let tree = SourceTree::parse(source);
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(ImportOrder)];
    let config = ConfigPod::default();
    let cancel = CancelToken::new();
    apply_all(tree, &rules, &config, None, &cancel)
        .tree
        .text()
        .to_string()
}

#[test]
fn test_correct_order_is_clean() {
    let source = "use std::fs;\n\nuse anyhow::Result;\n\nuse crate::tree;\n\nfn main() {}\n";
    assert!(check(source).is_empty());
}

#[test]
fn test_external_before_std_is_flagged() {
    let source = "use anyhow::Result;\nuse std::fs;\n\nfn main() {}\n";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule_id, "import-order");
    assert!(diagnostics[0].fixable);
}

#[test]
fn test_fix_regroups_and_sorts() {
    let source = "use anyhow::Result;\nuse std::fs;\n\nfn main() {}\n";
    assert_eq!(
        fix(source),
        "use std::fs;\n\nuse anyhow::Result;\n\nfn main() {}\n"
    );
}

#[test]
fn test_internal_imports_are_sorted_alphabetically() {
    let source = "use crate::zeta;\nuse crate::alpha;\n\nfn main() {}\n";
    assert_eq!(check(source).len(), 1);
    assert_eq!(
        fix(source),
        "use crate::alpha;\nuse crate::zeta;\n\nfn main() {}\n"
    );
}

#[test]
fn test_comment_splits_the_block() {
    // The comment pins both uses in place; neither block alone is wrong
    let source = "use std::io;\n// keep near the io import\nuse std::fs;\n\nfn main() {}\n";
    assert!(check(source).is_empty());
    assert_eq!(fix(source), source);
}

#[test]
fn test_comment_attached_to_a_use_is_never_moved() {
    // The parser attaches the comment to the following use item; it still
    // splits the block, so the out-of-order pair stays untouched
    let source = "use serde::Deserialize;\n// pinned here\nuse std::io;\n\nfn main() {}\n";
    assert!(check(source).is_empty());
    assert_eq!(fix(source), source);
}

#[test]
fn test_leading_comment_stays_put_when_the_block_is_reordered() {
    let source = "// imports\nuse serde::Deserialize;\nuse std::fs;\n\nfn main() {}\n";
    assert_eq!(
        fix(source),
        "// imports\nuse std::fs;\n\nuse serde::Deserialize;\n\nfn main() {}\n"
    );
}

#[test]
fn test_full_regroup() {
    let source = "use crate::tree;\nuse anyhow::Result;\nuse std::fs;\nuse serde::Deserialize;\n\nfn main() {}\n";
    assert_eq!(
        fix(source),
        "use std::fs;\n\nuse anyhow::Result;\nuse serde::Deserialize;\n\nuse crate::tree;\n\nfn main() {}\n"
    );
}

#[test]
fn test_module_imports_keep_indentation() {
    let source = "mod inner {\n    use anyhow::Result;\n    use std::fs;\n}\n";
    assert_eq!(
        fix(source),
        "mod inner {\n    use std::fs;\n\n    use anyhow::Result;\n}\n"
    );
}

#[test]
fn test_function_local_imports_are_ignored() {
    let source = "fn main() {\n    use std::fs;\n    use anyhow::Result;\n}\n";
    // Not top-level; out of scope for the rule even though unordered
    assert!(check(source).is_empty());
}

#[test]
fn test_core_and_alloc_group_with_std() {
    let source = "use core::fmt;\nuse alloc::vec::Vec;\nuse regex::Regex;\n\nfn main() {}\n";
    assert_eq!(
        fix(source),
        "use alloc::vec::Vec;\nuse core::fmt;\n\nuse regex::Regex;\n\nfn main() {}\n"
    );
}

#[test]
fn test_fix_is_idempotent() {
    let source = "use walkdir::WalkDir;\nuse std::path::PathBuf;\nuse crate::config;\n\nfn main() {}\n";
    let once = fix(source);
    assert_eq!(fix(&once), once);
    assert!(check(&once).is_empty());
}
