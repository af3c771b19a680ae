// Copyright (C) Brian G. Milnes 2025

//! Rule: merge an Option check into its declaration
//!
//! ```text
//! let val = compute();            if let Some(val) = compute() {
//! if val.is_some() {        =>        use(val);
//!     use(val.unwrap());          }
//! }
//! ```
//!
//! Fires only when the binding is used nowhere else: not after the `if`,
//! not in an else branch (there is none), and inside the body only as an
//! `.unwrap()` receiver. Does not fire when the initializer is literally
//! `Some(..)`; the check is then already provably satisfied and merging
//! would change intent, not behavior.
//!
//! The fix is one transaction with three simultaneous edits: remove the
//! declaration statement, rewrite the `if` condition to an `if let`, and
//! strip each `.unwrap()` call in the body.

pub mod merge_option_check {
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use crate::reviser::reviser::Reviser;
    use crate::semantics::semantics::{initializer_always_some, single_segment_name};
    use crate::tree::tree::{
        contains_exterior_struct_literal, next_non_trivia_sibling, peel_parens,
    };
    use ra_ap_syntax::{
        ast::{self, AstNode, HasArgList, HasName},
        NodeOrToken, SyntaxKind, SyntaxNode, TextRange,
    };

    pub struct MergeOptionCheck;

    const KINDS: &[SyntaxKind] = &[SyntaxKind::LET_STMT];

    /// Everything the rewrite needs, recomputed from the anchor when the
    /// fix is built
    struct Shape {
        name: String,
        init_text: String,
        condition: SyntaxNode,
        unwrap_calls: Vec<SyntaxNode>,
    }

    impl Rule for MergeOptionCheck {
        fn id(&self) -> &'static str {
            "merge-option-check"
        }

        fn kinds(&self) -> &'static [SyntaxKind] {
            KINDS
        }

        fn check(&self, node: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
            let Some(shape) = match_shape(node, ctx) else {
                return Vec::new();
            };
            let location = ast::LetStmt::cast(node.clone())
                .and_then(|l| l.pat())
                .map(|p| p.syntax().text_range())
                .unwrap_or_else(|| node.text_range());
            vec![RuleMatch {
                location,
                anchor: node.text_range(),
                anchor_kind: node.kind(),
                message: format!(
                    "option check on `{}` can be merged with its declaration into `if let`",
                    shape.name
                ),
                fixable: true,
            }]
        }

        fn fix(&self, anchor: &SyntaxNode, ctx: &RuleContext) -> Option<Reviser> {
            let shape = match_shape(anchor, ctx)?;

            let mut reviser = Reviser::new(ctx.tree);
            reviser.remove_statement(anchor);
            reviser.replace_node(
                &shape.condition,
                format!("let Some({}) = {}", shape.name, shape.init_text),
            );
            for call in &shape.unwrap_calls {
                reviser.replace_node(call, shape.name.clone());
            }
            Some(reviser)
        }
    }

    fn match_shape(node: &SyntaxNode, ctx: &RuleContext) -> Option<Shape> {
        let let_stmt = ast::LetStmt::cast(node.clone())?;

        let ast::Pat::IdentPat(ident_pat) = let_stmt.pat()? else {
            return None;
        };
        // `ref`/`mut` bindings change what the if-let form would mean.
        if ident_pat.ref_token().is_some() || ident_pat.mut_token().is_some() {
            return None;
        }
        let name = ident_pat.name()?.text().to_string();

        let initializer = let_stmt.initializer()?;
        if initializer_always_some(&let_stmt) {
            return None;
        }
        // A bare struct literal cannot stand in scrutinee position; fence
        // it so the rewritten if-let still parses.
        let init_text = if contains_exterior_struct_literal(initializer.syntax()) {
            format!("({})", initializer.syntax().text())
        } else {
            initializer.syntax().text().to_string()
        };

        // The very next statement must be the if.
        let if_expr = match next_non_trivia_sibling(node)? {
            NodeOrToken::Node(sibling) => as_if_expr(&sibling)?,
            NodeOrToken::Token(_) => return None,
        };
        if if_expr.else_branch().is_some() {
            return None;
        }

        // Condition is `name.is_some()` up to parenthesization.
        let condition = if_expr.condition()?;
        let condition_node = condition.syntax().clone();
        let (cond_core, _parens) = peel_parens(&condition_node);
        let cond_call = ast::MethodCallExpr::cast(cond_core)?;
        if cond_call.name_ref()?.text() != "is_some" {
            return None;
        }
        if cond_call
            .arg_list()
            .map_or(false, |args| args.args().next().is_some())
        {
            return None;
        }
        let receiver = cond_call.receiver()?;
        let (receiver_core, _) = peel_parens(receiver.syntax());
        if single_segment_name(&receiver_core).as_deref() != Some(name.as_str()) {
            return None;
        }

        // The binding must not escape the if.
        let then_branch = if_expr.then_branch()?;
        let then_range = then_branch.syntax().text_range();
        let if_range = if_expr.syntax().text_range();
        let block = node
            .ancestors()
            .find(|a| matches!(a.kind(), SyntaxKind::STMT_LIST | SyntaxKind::BLOCK_EXPR))?;
        let after_if = TextRange::new(if_range.end(), block.text_range().end());
        if ctx.semantics.ident_occurrences(after_if, &name) > 0 {
            return None;
        }

        // Inside the body, every occurrence must be an `.unwrap()` receiver,
        // and the token count must agree with what we found at path level
        // (a mismatch means a use inside a macro we cannot rewrite).
        let mut unwrap_calls = Vec::new();
        for path in then_branch
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::PATH_EXPR)
            .filter(|n| single_segment_name(n).as_deref() == Some(name.as_str()))
        {
            unwrap_calls.push(unwrap_call_of(&path)?);
        }
        if unwrap_calls.is_empty() {
            return None;
        }
        if ctx.semantics.ident_occurrences(then_range, &name) != unwrap_calls.len() {
            return None;
        }

        Some(Shape {
            name,
            init_text,
            condition: condition_node,
            unwrap_calls,
        })
    }

    /// The statement may be the if directly (tail position) or an
    /// expression statement wrapping it
    fn as_if_expr(node: &SyntaxNode) -> Option<ast::IfExpr> {
        match node.kind() {
            SyntaxKind::IF_EXPR => ast::IfExpr::cast(node.clone()),
            SyntaxKind::EXPR_STMT => node.children().find_map(ast::IfExpr::cast),
            _ => None,
        }
    }

    /// The `.unwrap()` call this path is the receiver of, climbing through
    /// any wrapping parens
    fn unwrap_call_of(path: &SyntaxNode) -> Option<SyntaxNode> {
        let mut receiver = path.clone();
        while receiver
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::PAREN_EXPR)
        {
            receiver = receiver.parent()?;
        }
        let parent = receiver.parent()?;
        let call = ast::MethodCallExpr::cast(parent)?;
        if call.receiver()?.syntax() != &receiver {
            return None;
        }
        if call.name_ref()?.text() != "unwrap" {
            return None;
        }
        if call
            .arg_list()
            .map_or(false, |args| args.args().next().is_some())
        {
            return None;
        }
        Some(call.syntax().clone())
    }
}
