// Copyright (C) Brian G. Milnes 2025

//! Review Rust files with every registered rule
//!
//! Files are independent compilation units, so analysis runs in parallel
//! across them; diagnostics are printed in file order afterwards.
//!
//! Binary: restyler-review

use anyhow::Result;
use rayon::prelude::*;
use restyler::{
    analyze, default_rules, format_number, CancelToken, ConfigCache, Diagnostic, SourceTree,
    StandardArgs,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<()> {
    let start = Instant::now();
    let args = StandardArgs::parse_args();
    let base_dir = args.base_dir();

    // Print compilation directory for Emacs compile-mode
    println!("Entering directory '{}'", base_dir.display());
    println!();

    let cache = ConfigCache::new();
    let config = cache.get_or_load(&args.config_text());
    if let Some(ref error) = config.load_error {
        eprintln!("Warning: malformed configuration, using defaults: {error}");
    }

    let files = args.gather_files(config.max_search_depth);
    let rules = default_rules();
    let cancel = CancelToken::new();

    let mut results: Vec<(PathBuf, Vec<Diagnostic>)> = files
        .par_iter()
        .filter_map(|file| {
            let source = match fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Warning: Failed to read {}: {}", file.display(), e);
                    return None;
                }
            };
            let tree = SourceTree::parse(&source);
            let diagnostics = analyze(&tree, &rules, &config, Some(file), &cancel);
            Some((file.clone(), diagnostics))
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let total: usize = results.iter().map(|(_, d)| d.len()).sum();

    if args.format == "json" {
        let report: Vec<serde_json::Value> = results
            .iter()
            .filter(|(_, diagnostics)| !diagnostics.is_empty())
            .map(|(file, diagnostics)| {
                serde_json::json!({
                    "file": file.display().to_string(),
                    "diagnostics": diagnostics,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if total == 0 {
        println!("✓ No issues found");
    } else {
        println!("✗ Found {} issue(s):", format_number(total));
        println!();
        for (file, diagnostics) in &results {
            let rel_path = file.strip_prefix(&base_dir).unwrap_or(file);
            for diagnostic in diagnostics {
                println!("{}:{diagnostic}", rel_path.display());
            }
        }
    }

    // Summary
    println!();
    println!(
        "Summary: {} files checked, {} total issues",
        format_number(files.len()),
        format_number(total)
    );

    let elapsed = start.elapsed().as_millis();
    println!("Completed in {elapsed}ms");

    if total == 0 {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
