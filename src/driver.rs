// Copyright (C) Brian G. Milnes 2025

//! Fixed-point fix application
//!
//! Analyze, apply the first available fix, re-analyze the new snapshot,
//! repeat. Only one fix is applied per pass: the other diagnostics from
//! that pass may be stale after the rewrite, and re-analysis is the safety
//! net against overlapping edits. The loop ends when a pass reports no
//! diagnostics, when nothing left is fixable, or when a rewrite aborts
//! (re-location failure), in which case the last good snapshot is kept.

pub mod driver {
    use crate::cancel::cancel::CancelToken;
    use crate::config::config::ConfigPod;
    use crate::diagnostics::diagnostics::Diagnostic;
    use crate::engine::engine::{analyze, Rule, RuleContext};
    use crate::semantics::semantics::SemanticModel;
    use crate::tree::tree::SourceTree;
    use ra_ap_syntax::{SyntaxKind, TextRange, TextSize};
    use std::path::Path;

    /// Guard against a fix that never converges; N independent violations
    /// need N+1 passes, so any honest rule set stays far below this.
    const MAX_PASSES: usize = 1000;

    #[derive(Debug)]
    pub struct FixOutcome {
        pub tree: SourceTree,
        /// Diagnostics from the final analysis pass
        pub diagnostics: Vec<Diagnostic>,
        pub passes: usize,
        pub fixes_applied: usize,
    }

    impl FixOutcome {
        pub fn changed(&self) -> bool {
            self.fixes_applied > 0
        }
    }

    /// Drive all rules over one file to a fixed point
    pub fn apply_all(
        tree: SourceTree,
        rules: &[Box<dyn Rule>],
        config: &ConfigPod,
        path: Option<&Path>,
        cancel: &CancelToken,
    ) -> FixOutcome {
        let mut current = tree;
        let mut passes = 0;
        let mut fixes_applied = 0;

        loop {
            if cancel.is_cancelled() || passes >= MAX_PASSES {
                return FixOutcome {
                    tree: current,
                    diagnostics: Vec::new(),
                    passes,
                    fixes_applied,
                };
            }
            passes += 1;

            let diagnostics = analyze(&current, rules, config, path, cancel);
            if diagnostics.is_empty() {
                return FixOutcome {
                    tree: current,
                    diagnostics,
                    passes,
                    fixes_applied,
                };
            }

            // First fixable diagnostic in span order; the rest of this pass
            // is discarded as potentially stale.
            let Some(diagnostic) = diagnostics.iter().find(|d| d.fixable) else {
                return FixOutcome {
                    tree: current,
                    diagnostics,
                    passes,
                    fixes_applied,
                };
            };

            match apply_one(&current, rules, config, path, cancel, diagnostic) {
                Some(new_tree) => {
                    current = new_tree;
                    fixes_applied += 1;
                }
                None => {
                    // Rewrite abort: no progress, stop with the last good tree.
                    return FixOutcome {
                        tree: current,
                        diagnostics,
                        passes,
                        fixes_applied,
                    };
                }
            }
        }
    }

    /// Re-locate one diagnostic's anchor in the snapshot and apply its fix
    pub fn apply_one(
        tree: &SourceTree,
        rules: &[Box<dyn Rule>],
        config: &ConfigPod,
        path: Option<&Path>,
        cancel: &CancelToken,
        diagnostic: &Diagnostic,
    ) -> Option<SourceTree> {
        let rule = rules.iter().find(|r| r.id() == diagnostic.rule_id)?;
        let anchor_range = TextRange::new(
            TextSize::from(diagnostic.anchor_start as u32),
            TextSize::from(diagnostic.anchor_end as u32),
        );
        // Several nested nodes can share the anchor span (IDENT_PAT over
        // NAME, for one); the recorded kind picks the right one out of the
        // equal-range chain.
        let anchor = tree.node_of_kind_at_range(anchor_range, SyntaxKind::from(diagnostic.anchor_kind))?;

        let semantics = SemanticModel::new(&tree.root());
        let ctx = RuleContext {
            tree,
            semantics: &semantics,
            config,
            path,
            cancel,
        };
        let reviser = rule.fix(&anchor, &ctx)?;
        reviser.apply()
    }
}
