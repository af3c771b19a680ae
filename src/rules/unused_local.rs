// Copyright (C) Brian G. Milnes 2025

//! Rule: unused local variable
//!
//! A let-bound simple identifier with no later occurrence in its block is
//! flagged at the name token. No fix is offered; deleting a binding is not
//! automated for this rule family. The use scan is token-level and
//! over-approximate (identifiers inside macro invocations count), so a
//! "never used" report is always safe.

pub mod unused_local {
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use ra_ap_syntax::{
        ast::{self, AstNode, HasName},
        SyntaxKind, SyntaxNode, TextRange,
    };

    pub struct UnusedLocal;

    const KINDS: &[SyntaxKind] = &[SyntaxKind::LET_STMT];

    impl Rule for UnusedLocal {
        fn id(&self) -> &'static str {
            "unused-local"
        }

        fn kinds(&self) -> &'static [SyntaxKind] {
            KINDS
        }

        fn check(&self, node: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
            let Some(let_stmt) = ast::LetStmt::cast(node.clone()) else {
                return Vec::new();
            };

            // Only simple `let name = ...` bindings; destructuring patterns
            // are out of this rule's shape.
            let Some(ast::Pat::IdentPat(ident_pat)) = let_stmt.pat() else {
                return Vec::new();
            };
            let Some(name) = ident_pat.name() else {
                return Vec::new();
            };
            let name_text = name.text().to_string();
            if name_text.starts_with('_') {
                return Vec::new();
            }

            if has_ignored_attr(node, &ctx.config.ignored_attributes) {
                return Vec::new();
            }

            // Scan from the end of the declaration to the end of the
            // enclosing block.
            let Some(block) = node
                .ancestors()
                .find(|a| matches!(a.kind(), SyntaxKind::STMT_LIST | SyntaxKind::BLOCK_EXPR))
            else {
                return Vec::new();
            };
            let scan = TextRange::new(node.text_range().end(), block.text_range().end());
            if ctx.semantics.ident_occurrences(scan, &name_text) > 0 {
                return Vec::new();
            }

            vec![RuleMatch {
                location: name.syntax().text_range(),
                anchor: node.text_range(),
                anchor_kind: node.kind(),
                message: format!("local variable `{name_text}`: its value is never used"),
                fixable: false,
            }]
        }
    }

    /// Any attribute on the statement or an enclosing item whose text names
    /// one of the configured ignored attributes
    fn has_ignored_attr(node: &SyntaxNode, ignored: &[String]) -> bool {
        if ignored.is_empty() {
            return false;
        }
        node.ancestors().chain(std::iter::once(node.clone())).any(|item| {
            item.children()
                .filter(|child| child.kind() == SyntaxKind::ATTR)
                .any(|attr| {
                    let text = attr.text().to_string();
                    ignored.iter().any(|name| text.contains(name.as_str()))
                })
        })
    }
}
