// Copyright (C) Brian G. Milnes 2025

//! Rule: leading byte order mark
//!
//! Rust sources are UTF-8 by definition; a BOM is three wasted bytes that
//! some tools choke on. Flagged at 1:1, and the fix deletes exactly the
//! BOM. When the file path is known and `bom_globs` is configured, only
//! matching paths are checked.

pub mod bom {
    use crate::args::args::{glob_matches, glob_to_regex};
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use crate::reviser::reviser::Reviser;
    use ra_ap_syntax::{SyntaxKind, SyntaxNode, TextRange, TextSize};

    const BOM: &str = "\u{feff}";

    pub struct LeadingBom;

    impl Rule for LeadingBom {
        fn id(&self) -> &'static str {
            "leading-bom"
        }

        // File-level: the tree never sees the BOM as a real token
        fn kinds(&self) -> &'static [SyntaxKind] {
            &[]
        }

        fn check(&self, root: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
            if !ctx.tree.text().starts_with(BOM) {
                return Vec::new();
            }

            if let Some(path) = ctx.path {
                if !ctx.config.bom_globs.is_empty() {
                    let applies = ctx.config.bom_globs.iter().any(|pattern| {
                        glob_to_regex(pattern)
                            .map(|glob| glob_matches(&glob, path))
                            .unwrap_or(false)
                    });
                    if !applies {
                        return Vec::new();
                    }
                }
            }

            vec![RuleMatch {
                location: TextRange::new(TextSize::from(0), TextSize::from(BOM.len() as u32)),
                anchor: root.text_range(),
                anchor_kind: root.kind(),
                message: "file begins with a UTF-8 byte order mark".to_string(),
                fixable: true,
            }]
        }

        fn fix(&self, _anchor: &SyntaxNode, ctx: &RuleContext) -> Option<Reviser> {
            if !ctx.tree.text().starts_with(BOM) {
                return None;
            }
            let mut reviser = Reviser::new(ctx.tree);
            reviser.replace_range(
                TextRange::new(TextSize::from(0), TextSize::from(BOM.len() as u32)),
                "",
            );
            Some(reviser)
        }
    }
}
