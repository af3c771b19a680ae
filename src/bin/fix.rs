// Copyright (C) Brian G. Milnes 2025

//! Apply every registered fix to a fixed point
//!
//! Each file is driven through analyze -> apply first fix -> re-analyze
//! until nothing fixable remains. Remaining diagnostics (rules with no
//! fix) are reported but do not block.
//!
//! Binary: restyler-fix

use anyhow::Result;
use restyler::{
    apply_all, default_rules, format_number, run_tool, CancelToken, ConfigCache, SourceTree,
    StandardArgs,
};
use std::fs;

fn main() -> Result<()> {
    let args = StandardArgs::parse_args();
    let base_dir = args.base_dir();

    run_tool("fix", &base_dir, true, |logger| {
        if args.dry_run {
            logger.log("DRY RUN MODE: Will not modify files");
            logger.log("");
        }

        let cache = ConfigCache::new();
        let config = cache.get_or_load(&args.config_text());
        if let Some(ref error) = config.load_error {
            logger.warn(&format!(
                "malformed configuration, using defaults: {error}"
            ));
        }

        let files = args.gather_files(config.max_search_depth);
        let rules = default_rules();
        let cancel = CancelToken::new();

        let mut fixed_count = 0;
        let mut already_correct = 0;
        let mut failed_count = 0;
        let mut remaining_total = 0;

        for file in &files {
            let source = match fs::read_to_string(file) {
                Ok(source) => source,
                Err(e) => {
                    logger.warn(&format!("Failed to read {}: {e}", file.display()));
                    failed_count += 1;
                    continue;
                }
            };

            let tree = SourceTree::parse(&source);
            let outcome = apply_all(tree, &rules, &config, Some(file), &cancel);
            let rel_path = file.strip_prefix(&base_dir).unwrap_or(file);

            if outcome.changed() {
                logger.log(&format!(
                    "{}: applied {} fix(es) in {} pass(es)",
                    rel_path.display(),
                    outcome.fixes_applied,
                    outcome.passes
                ));
                if args.dry_run {
                    fixed_count += 1;
                } else {
                    match fs::write(file, outcome.tree.text()) {
                        Ok(()) => fixed_count += 1,
                        Err(e) => {
                            logger.warn(&format!("Failed to write {}: {e}", file.display()));
                            failed_count += 1;
                        }
                    }
                }
            } else {
                already_correct += 1;
            }

            for diagnostic in &outcome.diagnostics {
                logger.log(&format!("{}:{diagnostic}", rel_path.display()));
            }
            remaining_total += outcome.diagnostics.len();
        }

        if remaining_total > 0 {
            logger.log("");
            logger.log(&format!(
                "{} issue(s) remain without an automatic fix",
                format_number(remaining_total)
            ));
        }
        if failed_count > 0 {
            logger.warn(&format!(
                "Failed to process {} file(s)",
                format_number(failed_count)
            ));
        }

        let summary = if args.dry_run {
            format!(
                "Would fix {} file(s), {} already correct",
                format_number(fixed_count),
                format_number(already_correct)
            )
        } else {
            format!(
                "✓ Fixed {} file(s), {} already correct",
                format_number(fixed_count),
                format_number(already_correct)
            )
        };
        Ok(summary)
    })
}
