// Copyright (C) Brian G. Milnes 2025

//! Rule: redundant parentheses
//!
//! Flags ParenExpr nodes whose parentheses cannot change parsing: whole
//! statements, let initializers, call arguments, doubled parens, and parens
//! around atomic expressions. The fix keeps everything between the parens
//! (comments included) and drops only the delimiters. Nested parens peel
//! one layer per fix pass and converge under the driver.

pub mod redundant_parens {
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use crate::reviser::reviser::Reviser;
    use crate::tree::tree::contains_exterior_struct_literal;
    use ra_ap_syntax::{
        ast::{self, AstNode},
        SyntaxKind, SyntaxNode,
    };

    pub struct RedundantParens;

    const KINDS: &[SyntaxKind] = &[SyntaxKind::PAREN_EXPR];

    /// Expression kinds that bind tighter than anything around them
    const ATOMIC: &[SyntaxKind] = &[
        SyntaxKind::LITERAL,
        SyntaxKind::PATH_EXPR,
        SyntaxKind::CALL_EXPR,
        SyntaxKind::METHOD_CALL_EXPR,
        SyntaxKind::FIELD_EXPR,
        SyntaxKind::INDEX_EXPR,
        SyntaxKind::TUPLE_EXPR,
        SyntaxKind::ARRAY_EXPR,
        SyntaxKind::PAREN_EXPR,
    ];

    /// Positions where any expression may appear unparenthesized
    const FREE_POSITIONS: &[SyntaxKind] = &[
        SyntaxKind::EXPR_STMT,
        SyntaxKind::LET_STMT,
        SyntaxKind::ARG_LIST,
        SyntaxKind::PAREN_EXPR,
    ];

    /// Positions where a bare struct literal would re-parse as a block
    const CONDITION_POSITIONS: &[SyntaxKind] = &[
        SyntaxKind::IF_EXPR,
        SyntaxKind::WHILE_EXPR,
        SyntaxKind::MATCH_EXPR,
        SyntaxKind::FOR_EXPR,
    ];

    impl Rule for RedundantParens {
        fn id(&self) -> &'static str {
            "redundant-parens"
        }

        fn kinds(&self) -> &'static [SyntaxKind] {
            KINDS
        }

        fn check(&self, node: &SyntaxNode, _ctx: &RuleContext) -> Vec<RuleMatch> {
            if !is_redundant(node) {
                return Vec::new();
            }
            let inner = match ast::ParenExpr::cast(node.clone()).and_then(|p| p.expr()) {
                Some(expr) => expr.syntax().text().to_string(),
                None => return Vec::new(),
            };
            let shown = if inner.len() > 40 {
                format!("{}...", &inner[..40])
            } else {
                inner
            };
            vec![RuleMatch::on(
                node,
                format!("redundant parentheses around `{shown}`"),
                true,
            )]
        }

        fn fix(&self, anchor: &SyntaxNode, ctx: &RuleContext) -> Option<Reviser> {
            if anchor.kind() != SyntaxKind::PAREN_EXPR || !is_redundant(anchor) {
                return None;
            }
            // Keep the bytes between the delimiters so comments inside the
            // parens survive; surrounding whitespace is expression-position
            // and free to trim.
            let text = anchor.text().to_string();
            let stripped = text
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))?
                .trim()
                .to_string();

            let mut reviser = Reviser::new(ctx.tree);
            reviser.replace_node(anchor, stripped);
            Some(reviser)
        }
    }

    fn is_redundant(node: &SyntaxNode) -> bool {
        let Some(paren) = ast::ParenExpr::cast(node.clone()) else {
            return false;
        };
        let Some(inner) = paren.expr() else {
            return false;
        };
        let Some(parent) = node.parent() else {
            return false;
        };

        // In condition/scrutinee position, parens around an expression with
        // an unfenced struct literal are load-bearing.
        if CONDITION_POSITIONS.contains(&parent.kind())
            && contains_exterior_struct_literal(inner.syntax())
        {
            return false;
        }

        if FREE_POSITIONS.contains(&parent.kind()) {
            return true;
        }

        if ATOMIC.contains(&inner.syntax().kind()) {
            // `(1).min(2)` needs its parens: a numeric literal cannot take
            // a method call or field access directly.
            let literal_receiver = inner.syntax().kind() == SyntaxKind::LITERAL
                && matches!(
                    parent.kind(),
                    SyntaxKind::METHOD_CALL_EXPR | SyntaxKind::FIELD_EXPR | SyntaxKind::AWAIT_EXPR
                );
            return !literal_receiver;
        }

        false
    }
}
