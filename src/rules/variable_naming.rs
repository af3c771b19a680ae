// Copyright (C) Brian G. Milnes 2025

//! Rule: variable naming discipline
//!
//! - No "temp" locals: temp_vec, temp_data, temp_result and friends say
//!   nothing about the value. The fix renames to the suffix (temp_vec ->
//!   vec), but only when that name is provably free: it must not be bound
//!   in any enclosing scope and must not occur anywhere else in the file.
//! - No names from the configured disallowed list (rock bands by default).
//!   These get a diagnostic and no fix; there is no canonical rename.

pub mod variable_naming {
    use crate::diagnostics::diagnostics::Severity;
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use crate::reviser::reviser::Reviser;
    use ra_ap_syntax::{
        ast::{self, AstNode, HasName},
        SyntaxKind, SyntaxNode, SyntaxToken, TextRange,
    };

    pub struct VariableNaming;

    const KINDS: &[SyntaxKind] = &[SyntaxKind::IDENT_PAT];

    impl Rule for VariableNaming {
        fn id(&self) -> &'static str {
            "variable-naming"
        }

        fn severity(&self) -> Severity {
            Severity::Info
        }

        fn kinds(&self) -> &'static [SyntaxKind] {
            KINDS
        }

        fn check(&self, node: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
            let Some(name) = ast::IdentPat::cast(node.clone()).and_then(|pat| pat.name()) else {
                return Vec::new();
            };
            let name_text = name.text().to_string();

            if let Some(target) = rename_target(&name_text) {
                let fixable = rename_is_safe(node, ctx, &target);
                return vec![RuleMatch {
                    location: name.syntax().text_range(),
                    anchor: node.text_range(),
                    anchor_kind: node.kind(),
                    message: format!("temp variable name `{name_text}`"),
                    fixable,
                }];
            }

            if ctx
                .config
                .disallowed_identifiers
                .iter()
                .any(|bad| bad == &name_text)
            {
                return vec![RuleMatch {
                    location: name.syntax().text_range(),
                    anchor: node.text_range(),
                    anchor_kind: node.kind(),
                    message: format!("prohibited variable name `{name_text}`"),
                    fixable: false,
                }];
            }

            Vec::new()
        }

        fn fix(&self, anchor: &SyntaxNode, ctx: &RuleContext) -> Option<Reviser> {
            let name = ast::IdentPat::cast(anchor.clone()).and_then(|pat| pat.name())?;
            let old = name.text().to_string();
            let target = rename_target(&old)?;
            if !rename_is_safe(anchor, ctx, &target) {
                return None;
            }

            // Rename the declaration and every occurrence from it to the
            // end of its scope, token-level so macro arguments follow along.
            let scope_end = anchor
                .ancestors()
                .find(|a| matches!(a.kind(), SyntaxKind::STMT_LIST | SyntaxKind::BLOCK_EXPR))
                .map(|block| block.text_range().end())
                .unwrap_or_else(|| ctx.tree.root().text_range().end());
            let scope = TextRange::new(anchor.text_range().start(), scope_end);

            let mut reviser = Reviser::new(ctx.tree);
            let mut renamed = 0;
            for token in ctx
                .tree
                .root()
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|token| token.kind() == SyntaxKind::IDENT)
                .filter(|token| scope.contains_range(token.text_range()))
                .filter(|token| token.text() == old)
                .filter(renameable_position)
            {
                reviser.replace_range(token.text_range(), target.clone());
                renamed += 1;
            }
            if renamed == 0 {
                return None;
            }
            Some(reviser)
        }
    }

    /// Tokens the rename may touch: the binding itself, value-position
    /// paths, and macro arguments. A method or field name that happens to
    /// share the text stays put.
    fn renameable_position(token: &SyntaxToken) -> bool {
        let Some(parent) = token.parent() else {
            return false;
        };
        match parent.kind() {
            SyntaxKind::NAME | SyntaxKind::TOKEN_TREE => true,
            SyntaxKind::NAME_REF => parent
                .parent()
                .is_some_and(|gp| gp.kind() == SyntaxKind::PATH_SEGMENT),
            _ => false,
        }
    }

    /// The canonical name a temp_ variable renames to, when one exists
    fn rename_target(name: &str) -> Option<String> {
        let target = name.strip_prefix("temp_")?;
        if target.is_empty() || target.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        Some(target.to_string())
    }

    /// A rename must never capture or shadow: the target name must not be
    /// bound in any lexically enclosing scope, and (conservatively) must
    /// not occur as an identifier anywhere else in the file.
    fn rename_is_safe(node: &SyntaxNode, ctx: &RuleContext, target: &str) -> bool {
        if ctx.semantics.name_bound_at(node, target) {
            return false;
        }
        let whole_file = ctx.tree.root().text_range();
        ctx.semantics.ident_occurrences(whole_file, target) == 0
    }
}
