// Copyright (C) Brian G. Milnes 2025

//! Immutable source-tree snapshots and traversal utilities
//!
//! A `SourceTree` owns one parse of one file: the source text, the syntax
//! tree, the parse errors, and a line-start index for exact row/column
//! reporting. Trees are never mutated; every fix produces a new snapshot.

pub mod tree {
    use ra_ap_syntax::{
        ast::{self, AstNode},
        Edition, NodeOrToken, SourceFile, SyntaxKind, SyntaxNode, SyntaxToken, TextRange,
        TextSize, WalkEvent,
    };
    use rowan::Direction;

    /// One immutable parse of one compilation unit
    #[derive(Debug, Clone)]
    pub struct SourceTree {
        source: String,
        file: SourceFile,
        errors: Vec<String>,
        line_starts: Vec<usize>,
    }

    impl SourceTree {
        /// Parse leniently: a tree with syntax errors still supports analysis.
        /// Rules are responsible for degrading to silence on broken subtrees.
        pub fn parse(source: &str) -> SourceTree {
            let parsed = SourceFile::parse(source, Edition::Edition2021);
            let errors = parsed.errors().iter().map(|e| e.to_string()).collect();

            let mut line_starts = vec![0];
            for (idx, byte) in source.bytes().enumerate() {
                if byte == b'\n' {
                    line_starts.push(idx + 1);
                }
            }

            SourceTree {
                source: source.to_string(),
                file: parsed.tree(),
                errors,
                line_starts,
            }
        }

        pub fn text(&self) -> &str {
            &self.source
        }

        pub fn root(&self) -> SyntaxNode {
            self.file.syntax().clone()
        }

        pub fn errors(&self) -> &[String] {
            &self.errors
        }

        pub fn has_errors(&self) -> bool {
            !self.errors.is_empty()
        }

        /// 1-indexed (row, column) for a byte offset
        pub fn line_col(&self, offset: usize) -> (usize, usize) {
            let line = match self.line_starts.binary_search(&offset) {
                Ok(idx) => idx,
                Err(idx) => idx - 1,
            };
            (line + 1, offset - self.line_starts[line] + 1)
        }

        /// Re-locate the smallest node whose range is exactly `range`.
        /// Returns None when no such node exists in this snapshot; never panics.
        pub fn node_at_exact_range(&self, range: TextRange) -> Option<SyntaxNode> {
            let root = self.root();
            if !root.text_range().contains_range(range) {
                return None;
            }
            let node = match root.covering_element(range) {
                NodeOrToken::Node(node) => node,
                NodeOrToken::Token(token) => token.parent()?,
            };
            if node.text_range() == range {
                Some(node)
            } else {
                None
            }
        }

        /// Re-locate a node by exact range and kind. Several nested nodes can
        /// share one range (PATH_EXPR/PATH/PATH_SEGMENT); this walks outward
        /// through the equal-range chain to the requested kind.
        pub fn node_of_kind_at_range(
            &self,
            range: TextRange,
            kind: SyntaxKind,
        ) -> Option<SyntaxNode> {
            let mut node = self.node_at_exact_range(range)?;
            loop {
                if node.kind() == kind {
                    return Some(node);
                }
                let parent = node.parent()?;
                if parent.text_range() != range {
                    return None;
                }
                node = parent;
            }
        }

        /// Leading trivia (whitespace/comments) text immediately before a node
        pub fn leading_trivia(&self, node: &SyntaxNode) -> String {
            let mut pieces = Vec::new();
            let mut token = node.first_token().and_then(|t| t.prev_token());
            while let Some(t) = token {
                if !is_trivia(t.kind()) {
                    break;
                }
                pieces.push(t.text().to_string());
                token = t.prev_token();
            }
            pieces.reverse();
            pieces.concat()
        }

        /// Trailing trivia text immediately after a node, up to and including
        /// the first newline
        pub fn trailing_trivia(&self, node: &SyntaxNode) -> String {
            let mut out = String::new();
            let mut token = node.last_token().and_then(|t| t.next_token());
            while let Some(t) = token {
                if !is_trivia(t.kind()) {
                    break;
                }
                out.push_str(t.text());
                if t.text().contains('\n') {
                    break;
                }
                token = t.next_token();
            }
            out
        }

        /// The range of a statement extended to whole lines: back over the
        /// line's indentation and forward through one trailing newline.
        /// Removing this range deletes the statement without leaving a blank
        /// line behind.
        pub fn statement_line_range(&self, node: &SyntaxNode) -> TextRange {
            let start: usize = node.text_range().start().into();
            let end: usize = node.text_range().end().into();

            let line_start = self.source[..start].rfind('\n').map(|p| p + 1).unwrap_or(0);
            let new_start = if self.source[line_start..start].trim().is_empty() {
                line_start
            } else {
                start
            };

            let rest = &self.source[end..];
            let mut new_end = end;
            for (idx, ch) in rest.char_indices() {
                if ch == '\n' {
                    new_end = end + idx + 1;
                    break;
                }
                if !ch.is_whitespace() {
                    new_end = end;
                    break;
                }
                new_end = end + idx + ch.len_utf8();
            }

            TextRange::new(
                TextSize::from(new_start as u32),
                TextSize::from(new_end as u32),
            )
        }
    }

    pub fn is_trivia(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    /// Strip redundant ParenExpr wrappers, reporting how many were peeled.
    /// Parenthesization is tracked, never silently dropped: callers that
    /// rewrite the expression decide what to do with the count.
    pub fn peel_parens(node: &SyntaxNode) -> (SyntaxNode, usize) {
        let mut current = node.clone();
        let mut peeled = 0;
        while current.kind() == SyntaxKind::PAREN_EXPR {
            let inner = ast::ParenExpr::cast(current.clone())
                .and_then(|paren| paren.expr())
                .map(|expr| expr.syntax().clone());
            match inner {
                Some(inner) => {
                    current = inner;
                    peeled += 1;
                }
                None => break,
            }
        }
        (current, peeled)
    }

    /// Does this expression contain a struct literal that is not fenced
    /// off by parens, a block, or an argument list? Such an expression
    /// cannot stand bare in condition or scrutinee position.
    pub fn contains_exterior_struct_literal(node: &SyntaxNode) -> bool {
        let mut preorder = node.preorder();
        while let Some(event) = preorder.next() {
            let WalkEvent::Enter(descendant) = event else {
                continue;
            };
            if descendant.kind() == SyntaxKind::RECORD_EXPR {
                return true;
            }
            if matches!(
                descendant.kind(),
                SyntaxKind::PAREN_EXPR | SyntaxKind::BLOCK_EXPR | SyntaxKind::ARG_LIST
            ) {
                preorder.skip_subtree();
            }
        }
        false
    }

    /// The previous sibling element that is not trivia, if any
    pub fn prev_non_trivia_sibling(node: &SyntaxNode) -> Option<NodeOrToken<SyntaxNode, SyntaxToken>> {
        node.siblings_with_tokens(Direction::Prev)
            .skip(1)
            .find(|element| !is_trivia(element.kind()))
    }

    /// The next sibling element that is not trivia, if any
    pub fn next_non_trivia_sibling(node: &SyntaxNode) -> Option<NodeOrToken<SyntaxNode, SyntaxToken>> {
        node.siblings_with_tokens(Direction::Next)
            .skip(1)
            .find(|element| !is_trivia(element.kind()))
    }

    /// Find all nodes of a specific kind in the syntax tree
    pub fn find_nodes(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        let mut results = Vec::new();
        for event in root.preorder() {
            if let WalkEvent::Enter(node) = event {
                if node.kind() == kind {
                    results.push(node);
                }
            }
        }
        results
    }

    /// Find all nodes matching a predicate
    pub fn find_nodes_where<F>(root: &SyntaxNode, predicate: F) -> Vec<SyntaxNode>
    where
        F: Fn(&SyntaxNode) -> bool,
    {
        let mut results = Vec::new();
        for event in root.preorder() {
            if let WalkEvent::Enter(node) = event {
                if predicate(&node) {
                    results.push(node);
                }
            }
        }
        results
    }

    /// Find the first token of a specific kind within a node
    pub fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == kind)
    }

    /// Get all tokens of a specific kind within a node
    pub fn find_tokens(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxToken> {
        node.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == kind)
            .collect()
    }

    /// Get all child nodes of a specific kind
    pub fn children_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        node.children().filter(|child| child.kind() == kind).collect()
    }

    /// Check if a node is inside another node of a specific kind
    pub fn is_inside_node_kind(node: &SyntaxNode, kind: SyntaxKind) -> bool {
        let mut current = node.parent();
        while let Some(parent) = current {
            if parent.kind() == kind {
                return true;
            }
            current = parent.parent();
        }
        false
    }
}
