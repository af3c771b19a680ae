// Copyright (C) Brian G. Milnes 2025

//! Restyler - AST-based style analysis and auto-fix engine for Rust code
//!
//! Rules match structural and scope-aware patterns against immutable
//! syntax trees and, where a fix exists, rewrite the offending code as a
//! trivia-preserving structural diff. The fix driver re-analyzes after
//! every applied fix until a fixed point.

pub mod args;
pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod engine;
pub mod logging;
pub mod parser;
pub mod reviser;
pub mod rules;
pub mod semantics;
pub mod tree;

use anyhow::Result;
use std::path::Path;

// Re-export commonly used items
pub use args::args::{find_files, find_rust_files, format_number, glob_matches, glob_to_regex, StandardArgs};
pub use cancel::cancel::CancelToken;
pub use config::config::{ConfigCache, ConfigPod};
pub use diagnostics::diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use driver::driver::{apply_all, apply_one, FixOutcome};
pub use engine::engine::{analyze, analyze_into, Rule, RuleContext, RuleMatch};
pub use logging::logging::{run_tool, ToolLogger};
pub use parser::parser::parse_file;
pub use reviser::reviser::{EditMap, Reviser, TrackedNode};
pub use rules::registry::default_rules;
pub use semantics::semantics::{SemanticModel, Symbol, SymbolKind};
pub use tree::tree::SourceTree;

/// Review a Rust file and print its diagnostics; returns how many there were
pub fn review(file: &Path, format: &str, config: &ConfigPod) -> Result<usize> {
    let source = std::fs::read_to_string(file)?;
    let tree = SourceTree::parse(&source);

    let rules = default_rules();
    let cancel = CancelToken::new();
    let diagnostics = analyze(&tree, &rules, config, Some(file), &cancel);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&diagnostics)?;
            println!("{json}");
        }
        _ => {
            if diagnostics.is_empty() {
                println!("✓ No issues found!");
            } else {
                println!("Found {} issue(s):", diagnostics.len());
                for diagnostic in &diagnostics {
                    println!("  {}:{diagnostic}", file.display());
                }
            }
        }
    }

    Ok(diagnostics.len())
}

/// Drive all fixes on a Rust file to a fixed point
pub fn fix_file(file: &Path, in_place: bool, config: &ConfigPod) -> Result<FixOutcome> {
    let source = std::fs::read_to_string(file)?;
    let tree = SourceTree::parse(&source);

    let rules = default_rules();
    let cancel = CancelToken::new();
    let outcome = apply_all(tree, &rules, config, Some(file), &cancel);

    if outcome.changed() {
        if in_place {
            std::fs::write(file, outcome.tree.text())?;
            println!("Fixed and saved to {file:?}");
        } else {
            println!("{}", outcome.tree.text());
        }
    }

    Ok(outcome)
}

/// Parse a Rust file and display its AST
pub fn parse(file: &Path, format: &str) -> Result<()> {
    let source = std::fs::read_to_string(file)?;
    let syntax = parse_file(&source)?;

    match format {
        "json" => {
            let report = serde_json::json!({
                "file": file.display().to_string(),
                "syntax": format!("{syntax:#?}"),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => println!("{syntax:#?}"),
    }

    Ok(())
}
