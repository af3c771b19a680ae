// Copyright (C) Brian G. Milnes 2025

//! Diagnostics and the reporting sink
//!
//! A diagnostic is the engine's match record: stable rule id, severity,
//! formatted message, exact location, and the anchor span from which a fix
//! is rebuilt. The sink is an append-only collector safe to share across
//! threads; it never deduplicates (a caller concern).

pub mod diagnostics {
    use serde::{Deserialize, Serialize};
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Severity {
        Warning,
        Info,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Diagnostic {
        pub rule_id: String,
        pub severity: Severity,
        pub message: String,
        /// Byte span of the reported location
        pub start: usize,
        pub end: usize,
        /// 1-indexed position of `start`
        pub line: usize,
        pub column: usize,
        /// Byte span of the node a fix is rebuilt from, plus its raw
        /// SyntaxKind: nested nodes can share a span, so the kind is what
        /// re-locates the anchor in a later snapshot
        pub anchor_start: usize,
        pub anchor_end: usize,
        pub anchor_kind: u16,
        pub fixable: bool,
    }

    impl std::fmt::Display for Diagnostic {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "{}:{}: {} [{}]",
                self.line, self.column, self.message, self.rule_id
            )
        }
    }

    /// Concurrency-safe diagnostic collector
    #[derive(Debug, Default)]
    pub struct DiagnosticSink {
        diagnostics: Mutex<Vec<Diagnostic>>,
    }

    impl DiagnosticSink {
        pub fn new() -> Self {
            DiagnosticSink {
                diagnostics: Mutex::new(Vec::new()),
            }
        }

        pub fn push(&self, diagnostic: Diagnostic) {
            if let Ok(mut diagnostics) = self.diagnostics.lock() {
                diagnostics.push(diagnostic);
            }
        }

        pub fn len(&self) -> usize {
            self.diagnostics.lock().map(|d| d.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Drain the collected diagnostics, sorted by span for stable output
        pub fn into_sorted(self) -> Vec<Diagnostic> {
            let mut diagnostics = self.diagnostics.into_inner().unwrap_or_default();
            diagnostics.sort_by_key(|d| (d.start, d.end, d.rule_id.clone()));
            diagnostics
        }
    }
}
