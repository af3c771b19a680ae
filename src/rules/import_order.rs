// Copyright (C) Brian G. Milnes 2025

//! Rule: import grouping and order
//!
//! Correct order within a contiguous block of `use` items:
//! 1. std/core/alloc imports
//! 2. blank line
//! 3. external crate imports
//! 4. blank line
//! 5. internal imports (crate/self/super), alphabetical
//!
//! A block is contiguous when only whitespace separates its `use` items;
//! a comment between uses splits the block, so comments are never moved.
//! The fix rewrites one block in place, preserving its indentation.

pub mod import_order {
    use crate::engine::engine::{Rule, RuleContext, RuleMatch};
    use crate::reviser::reviser::Reviser;
    use crate::tree::tree::{is_trivia, SourceTree};
    use ra_ap_syntax::{SyntaxKind, SyntaxNode, TextRange, TextSize};

    pub struct ImportOrder;

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    enum ImportSection {
        Std,
        External,
        Internal,
    }

    struct UseBlock {
        nodes: Vec<SyntaxNode>,
        /// Text of each use item, minus any comment the parser attached to
        /// its front; attached trivia never moves with the item
        items: Vec<String>,
        slice: TextRange,
        indent: String,
    }

    impl Rule for ImportOrder {
        fn id(&self) -> &'static str {
            "import-order"
        }

        // File-level: blocks are a property of the whole unit
        fn kinds(&self) -> &'static [SyntaxKind] {
            &[]
        }

        fn check(&self, _root: &SyntaxNode, ctx: &RuleContext) -> Vec<RuleMatch> {
            let mut matches = Vec::new();
            for block in collect_blocks(ctx.tree) {
                let current = &ctx.tree.text()[usize::from(block.slice.start())..usize::from(block.slice.end())];
                if rebuild_block(&block) != current {
                    let first = &block.nodes[0];
                    matches.push(RuleMatch {
                        location: first.text_range(),
                        anchor: first.text_range(),
                        anchor_kind: first.kind(),
                        message: "imports are not grouped std, external, internal and sorted"
                            .to_string(),
                        fixable: true,
                    });
                }
            }
            matches
        }

        fn fix(&self, anchor: &SyntaxNode, ctx: &RuleContext) -> Option<Reviser> {
            let block = collect_blocks(ctx.tree)
                .into_iter()
                .find(|block| block.nodes.first().map(|n| n.text_range()) == Some(anchor.text_range()))?;

            let mut reviser = Reviser::new(ctx.tree);
            reviser.replace_range(block.slice, rebuild_block(&block));
            Some(reviser)
        }
    }

    /// Top-level `use` items grouped into whitespace-contiguous blocks.
    /// Contiguity and item text are measured from each item's first
    /// non-trivia token: the parser attaches a preceding comment to the
    /// following item, and such a comment must split the block exactly as
    /// a free-standing one does.
    fn collect_blocks(tree: &SourceTree) -> Vec<UseBlock> {
        let source = tree.text();
        let use_nodes: Vec<(SyntaxNode, usize)> = tree
            .root()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::USE)
            .filter(|node| is_top_level(node))
            .map(|node| {
                let start = content_start(&node);
                (node, start)
            })
            .collect();

        let mut groups: Vec<Vec<(SyntaxNode, usize)>> = Vec::new();
        for (node, start) in use_nodes {
            let start_new = match groups.last().and_then(|g| g.last()) {
                Some((prev, _)) => {
                    let prev_end: usize = prev.text_range().end().into();
                    prev.parent() != node.parent()
                        || !source[prev_end..start].trim().is_empty()
                }
                None => true,
            };
            if start_new {
                groups.push(vec![(node, start)]);
            } else if let Some(group) = groups.last_mut() {
                group.push((node, start));
            }
        }

        groups
            .into_iter()
            .map(|group| {
                let first_start = group[0].1;
                let last_end: usize = group[group.len() - 1].0.text_range().end().into();

                let line_start = source[..first_start].rfind('\n').map(|p| p + 1).unwrap_or(0);
                let (slice_start, indent) = if source[line_start..first_start].trim().is_empty() {
                    (line_start, source[line_start..first_start].to_string())
                } else {
                    (first_start, String::new())
                };

                let items = group
                    .iter()
                    .map(|(node, start)| {
                        let end: usize = node.text_range().end().into();
                        source[*start..end].to_string()
                    })
                    .collect();

                UseBlock {
                    nodes: group.into_iter().map(|(node, _)| node).collect(),
                    items,
                    slice: TextRange::new(
                        TextSize::from(slice_start as u32),
                        TextSize::from(last_end as u32),
                    ),
                    indent,
                }
            })
            .collect()
    }

    /// Byte offset of the first non-trivia token inside a use item
    fn content_start(node: &SyntaxNode) -> usize {
        node.descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !is_trivia(token.kind()))
            .map(|token| token.text_range().start().into())
            .unwrap_or_else(|| node.text_range().start().into())
    }

    /// A use item directly in a file, or in a module's item list; never
    /// one inside a function body or impl
    fn is_top_level(node: &SyntaxNode) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        match parent.kind() {
            SyntaxKind::SOURCE_FILE => true,
            SyntaxKind::ITEM_LIST => parent
                .parent()
                .is_some_and(|gp| gp.kind() == SyntaxKind::MODULE),
            _ => false,
        }
    }

    /// The canonical text for a block: sections in order, alphabetical
    /// within a section, one blank line between sections, indentation kept
    fn rebuild_block(block: &UseBlock) -> String {
        let mut imports: Vec<(ImportSection, String)> = block
            .items
            .iter()
            .map(|text| (classify_import(text), text.clone()))
            .collect();
        imports.sort();

        let mut lines: Vec<String> = Vec::new();
        let mut prev_section: Option<&ImportSection> = None;
        for (section, text) in &imports {
            if prev_section.is_some_and(|prev| prev != section) {
                lines.push(String::new());
            }
            lines.push(format!("{}{}", block.indent, text));
            prev_section = Some(section);
        }
        lines.join("\n")
    }

    fn classify_import(use_text: &str) -> ImportSection {
        let trimmed = use_text.trim();
        let path = trimmed.strip_prefix("use ").unwrap_or(trimmed);
        let path = path.trim().trim_end_matches(';').trim();

        if path.starts_with("std::") || path.starts_with("core::") || path.starts_with("alloc::") {
            ImportSection::Std
        } else if path.starts_with("crate::")
            || path.starts_with("self::")
            || path.starts_with("super::")
        {
            ImportSection::Internal
        } else {
            ImportSection::External
        }
    }
}
