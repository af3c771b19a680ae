// Copyright (C) Brian G. Milnes 2025

//! Rule predicate engine
//!
//! Rules are a plain registry of trait objects populated by explicit
//! registration. For each rule the engine runs one preorder traversal over
//! the snapshot, filtered by node kind, with subtree pruning when the rule
//! reports that an enclosing node already disqualifies its descendants.
//! A rule that panics is isolated at the dispatch boundary: logged and
//! skipped, the remaining rules still run. Cancellation is observed at
//! every node and ends the pass cleanly with no partial diagnostics.

pub mod engine {
    use crate::cancel::cancel::CancelToken;
    use crate::config::config::ConfigPod;
    use crate::diagnostics::diagnostics::{Diagnostic, DiagnosticSink, Severity};
    use crate::reviser::reviser::Reviser;
    use crate::semantics::semantics::SemanticModel;
    use crate::tree::tree::SourceTree;
    use ra_ap_syntax::{SyntaxKind, SyntaxNode, TextRange, WalkEvent};
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::path::Path;

    /// Everything a predicate may consult
    pub struct RuleContext<'a> {
        pub tree: &'a SourceTree,
        pub semantics: &'a SemanticModel,
        pub config: &'a ConfigPod,
        /// Path of the analyzed file, when it has one (in-memory analysis
        /// passes None); only file-selection rules look at it
        pub path: Option<&'a Path>,
        pub cancel: &'a CancelToken,
    }

    /// A predicate match: where to report, and the anchor node the fix is
    /// rebuilt from. The anchor's kind travels with its span: nested nodes
    /// can share one range, so a span alone does not re-locate the node.
    #[derive(Debug, Clone)]
    pub struct RuleMatch {
        pub location: TextRange,
        pub anchor: TextRange,
        pub anchor_kind: SyntaxKind,
        pub message: String,
        pub fixable: bool,
    }

    impl RuleMatch {
        /// Match reported at and anchored on the same node
        pub fn on(node: &SyntaxNode, message: impl Into<String>, fixable: bool) -> RuleMatch {
            RuleMatch {
                location: node.text_range(),
                anchor: node.text_range(),
                anchor_kind: node.kind(),
                message: message.into(),
                fixable,
            }
        }
    }

    /// One analyzer/fixer pair
    pub trait Rule: Send + Sync {
        /// Stable rule identifier (kebab-case)
        fn id(&self) -> &'static str;

        fn severity(&self) -> Severity {
            Severity::Warning
        }

        /// Node kinds this rule inspects; empty means file-level (the rule
        /// is invoked once with the root node)
        fn kinds(&self) -> &'static [SyntaxKind];

        /// The predicate. Must not panic by contract; panics are isolated
        /// by the engine anyway.
        fn check(&self, node: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch>;

        /// Short-circuit: when true, the node's whole subtree is skipped
        /// for this rule
        fn prune(&self, _node: &SyntaxNode, _ctx: &RuleContext) -> bool {
            false
        }

        /// Build the fix for a previously reported match. `anchor` is the
        /// re-located anchor node in the snapshot being fixed.
        fn fix(&self, _anchor: &SyntaxNode, _ctx: &RuleContext) -> Option<Reviser> {
            None
        }
    }

    /// Run all rules over one snapshot, appending to the sink only when the
    /// pass runs to completion. Returns false when cancelled.
    pub fn analyze_into(
        tree: &SourceTree,
        rules: &[Box<dyn Rule>],
        config: &ConfigPod,
        path: Option<&Path>,
        cancel: &CancelToken,
        sink: &DiagnosticSink,
    ) -> bool {
        let semantics = SemanticModel::new(&tree.root());
        let ctx = RuleContext {
            tree,
            semantics: &semantics,
            config,
            path,
            cancel,
        };

        let mut collected = Vec::new();
        for rule in rules {
            match run_rule(rule.as_ref(), &ctx) {
                Some(matches) => {
                    for m in matches {
                        collected.push(to_diagnostic(tree, rule.as_ref(), m));
                    }
                }
                None => return false,
            }
        }

        for diagnostic in collected {
            sink.push(diagnostic);
        }
        true
    }

    /// Convenience wrapper returning span-sorted diagnostics
    pub fn analyze(
        tree: &SourceTree,
        rules: &[Box<dyn Rule>],
        config: &ConfigPod,
        path: Option<&Path>,
        cancel: &CancelToken,
    ) -> Vec<Diagnostic> {
        let sink = DiagnosticSink::new();
        analyze_into(tree, rules, config, path, cancel, &sink);
        sink.into_sorted()
    }

    /// One rule, one traversal. None means the pass was cancelled.
    fn run_rule(rule: &dyn Rule, ctx: &RuleContext) -> Option<Vec<RuleMatch>> {
        let root = ctx.tree.root();
        let mut matches = Vec::new();

        if rule.kinds().is_empty() {
            if ctx.cancel.is_cancelled() {
                return None;
            }
            matches.extend(dispatch(rule, &root, ctx));
            return Some(matches);
        }

        let mut preorder = root.preorder();
        while let Some(event) = preorder.next() {
            let WalkEvent::Enter(node) = event else {
                continue;
            };
            if ctx.cancel.is_cancelled() {
                return None;
            }
            if rule.prune(&node, ctx) {
                preorder.skip_subtree();
                continue;
            }
            if rule.kinds().contains(&node.kind()) {
                matches.extend(dispatch(rule, &node, ctx));
            }
        }
        Some(matches)
    }

    /// Isolation boundary: a panicking rule must not abort the analysis of
    /// the remaining rules
    fn dispatch(rule: &dyn Rule, node: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
        match catch_unwind(AssertUnwindSafe(|| rule.check(node, ctx))) {
            Ok(matches) => matches,
            Err(_) => {
                let (line, col) = ctx.tree.line_col(node.text_range().start().into());
                eprintln!(
                    "Warning: rule '{}' panicked at {line}:{col}; skipping this node",
                    rule.id()
                );
                Vec::new()
            }
        }
    }

    fn to_diagnostic(tree: &SourceTree, rule: &dyn Rule, m: RuleMatch) -> Diagnostic {
        let start: usize = m.location.start().into();
        let (line, column) = tree.line_col(start);
        Diagnostic {
            rule_id: rule.id().to_string(),
            severity: rule.severity(),
            message: m.message,
            start,
            end: m.location.end().into(),
            line,
            column,
            anchor_start: m.anchor.start().into(),
            anchor_end: m.anchor.end().into(),
            anchor_kind: m.anchor_kind.into(),
            fixable: m.fixable,
        }
    }
}
