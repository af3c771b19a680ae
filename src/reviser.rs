// Copyright (C) Brian G. Milnes 2025

//! Transactional tree rewriting
//!
//! A Reviser collects edits against ONE immutable snapshot and applies them
//! as a single atomic transformation: every node-derived edit is re-located
//! against the snapshot first, overlapping edits abort the whole
//! transaction, and the edited text is re-parsed into a new snapshot.
//! Bytes outside the edited ranges are untouched, so trivia anchored
//! outside the edit survives verbatim.
//!
//! Multi-step rewrites (remove a declaration AND rewrite a sibling
//! statement) mark their targets with tracked nodes before any edit; after
//! the transaction the tracked ranges are mapped through the edit set and
//! re-resolved in the new snapshot.

pub mod reviser {
    use crate::tree::tree::SourceTree;
    use ra_ap_syntax::{SyntaxKind, SyntaxNode, TextRange, TextSize};

    #[derive(Debug, Clone)]
    struct Edit {
        range: TextRange,
        replacement: String,
        /// Node kind to re-validate against the snapshot before applying;
        /// None for raw range edits (line extensions, BOM bytes)
        expected_kind: Option<SyntaxKind>,
    }

    /// Stable logical handle to a node across one transaction
    #[derive(Debug, Clone, Copy)]
    pub struct TrackedNode {
        range: TextRange,
        kind: SyntaxKind,
    }

    impl TrackedNode {
        /// Re-resolve this node in the snapshot produced by the transaction
        pub fn relocate(&self, map: &EditMap, new_tree: &SourceTree) -> Option<SyntaxNode> {
            let range = map.map_range(self.range)?;
            new_tree.node_of_kind_at_range(range, self.kind)
        }
    }

    /// How the applied edits moved byte offsets around
    #[derive(Debug, Clone, Default)]
    pub struct EditMap {
        /// (original range, replacement length), sorted by start
        applied: Vec<(TextRange, usize)>,
    }

    impl EditMap {
        /// Map an offset from the old snapshot into the new one. None if it
        /// fell inside an edited range.
        pub fn map_offset(&self, offset: usize) -> Option<usize> {
            let mut delta: isize = 0;
            for (range, new_len) in &self.applied {
                let start: usize = range.start().into();
                let end: usize = range.end().into();
                if end <= offset {
                    delta += *new_len as isize - (end - start) as isize;
                } else if start < offset {
                    return None;
                }
            }
            Some((offset as isize + delta) as usize)
        }

        /// Map a range from the old snapshot into the new one. None if it
        /// intersects any edited range.
        pub fn map_range(&self, range: TextRange) -> Option<TextRange> {
            let start = self.map_offset(range.start().into())?;
            let end = self.map_offset(range.end().into())?;
            for (edited, _) in &self.applied {
                if edited.intersect(range).map_or(false, |i| !i.is_empty()) {
                    return None;
                }
            }
            Some(TextRange::new(
                TextSize::from(start as u32),
                TextSize::from(end as u32),
            ))
        }
    }

    /// Pending transformation of one snapshot
    #[derive(Debug)]
    pub struct Reviser {
        tree: SourceTree,
        edits: Vec<Edit>,
    }

    impl Reviser {
        pub fn new(tree: &SourceTree) -> Reviser {
            Reviser {
                tree: tree.clone(),
                edits: Vec::new(),
            }
        }

        /// Mark a node so it can be re-resolved after the transaction
        pub fn track(&self, node: &SyntaxNode) -> TrackedNode {
            TrackedNode {
                range: node.text_range(),
                kind: node.kind(),
            }
        }

        /// Replace a node's text. The replacement carries whatever trivia
        /// the rule assigned; nothing is defaulted.
        pub fn replace_node(&mut self, node: &SyntaxNode, replacement: impl Into<String>) {
            self.edits.push(Edit {
                range: node.text_range(),
                replacement: replacement.into(),
                expected_kind: Some(node.kind()),
            });
        }

        /// Replace a raw byte range
        pub fn replace_range(&mut self, range: TextRange, replacement: impl Into<String>) {
            self.edits.push(Edit {
                range,
                replacement: replacement.into(),
                expected_kind: None,
            });
        }

        /// Remove a whole statement including its line's indentation and the
        /// trailing newline, so no blank line is left behind
        pub fn remove_statement(&mut self, node: &SyntaxNode) {
            let range = self.tree.statement_line_range(node);
            self.edits.push(Edit {
                range,
                replacement: String::new(),
                expected_kind: None,
            });
        }

        /// Insert text immediately before a node
        pub fn insert_before(&mut self, node: &SyntaxNode, text: impl Into<String>) {
            let at = node.text_range().start();
            self.edits.push(Edit {
                range: TextRange::new(at, at),
                replacement: text.into(),
                expected_kind: None,
            });
        }

        pub fn is_empty(&self) -> bool {
            self.edits.is_empty()
        }

        /// Apply the transaction, producing a new snapshot. None when a
        /// target no longer resolves or edits overlap; the original
        /// document is then left untouched.
        pub fn apply(self) -> Option<SourceTree> {
            self.apply_tracked().map(|(tree, _)| tree)
        }

        /// Apply and also report how offsets moved, for tracked-node
        /// re-resolution
        pub fn apply_tracked(self) -> Option<(SourceTree, EditMap)> {
            if self.edits.is_empty() {
                return None;
            }

            let source = self.tree.text();
            let source_len = source.len();

            // Step 1: re-locate every node-derived edit in this snapshot.
            for edit in &self.edits {
                let end: usize = edit.range.end().into();
                if end > source_len {
                    return None;
                }
                if let Some(kind) = edit.expected_kind {
                    self.tree.node_of_kind_at_range(edit.range, kind)?;
                }
            }

            // Step 2: sort and refuse overlapping edits. Touching ranges are
            // fine; overlap means two rules fought over the same bytes and
            // the whole transaction aborts.
            let mut edits = self.edits;
            edits.sort_by_key(|edit| (usize::from(edit.range.start()), usize::from(edit.range.end())));
            for window in edits.windows(2) {
                if window[0].range.end() > window[1].range.start() {
                    return None;
                }
            }

            // Step 3: splice in one pass. Offsets are consumed in ascending
            // order so nothing shifts underneath us.
            let mut output = String::with_capacity(source_len);
            let mut cursor = 0usize;
            let mut applied = Vec::with_capacity(edits.len());
            for edit in &edits {
                let start: usize = edit.range.start().into();
                let end: usize = edit.range.end().into();
                output.push_str(&source[cursor..start]);
                output.push_str(&edit.replacement);
                applied.push((edit.range, edit.replacement.len()));
                cursor = end;
            }
            output.push_str(&source[cursor..]);

            Some((SourceTree::parse(&output), EditMap { applied }))
        }
    }
}
