// Copyright (C) Brian G. Milnes 2025

//! Tests for the transactional reviser: trivia preservation, overlap
//! rejection, stale-target rejection, and tracked-node relocation

use ra_ap_syntax::{SyntaxKind, TextRange, TextSize};
use restyler::tree::tree::find_nodes;
use restyler::{Reviser, SourceTree};

#[test]
fn test_replace_node_preserves_surrounding_trivia() {
    let source = "fn main() {\n    /*A*/ let x = (1); /*B*/\n}\n";
    let tree = SourceTree::parse(source);
    let parens = find_nodes(&tree.root(), SyntaxKind::PAREN_EXPR);
    assert_eq!(parens.len(), 1);

    let mut reviser = Reviser::new(&tree);
    reviser.replace_node(&parens[0], "1");
    let new_tree = reviser.apply().unwrap();

    assert_eq!(new_tree.text(), "fn main() {\n    /*A*/ let x = 1; /*B*/\n}\n");
}

#[test]
fn test_empty_reviser_applies_nothing() {
    let tree = SourceTree::parse("fn main() {}\n");
    let reviser = Reviser::new(&tree);
    assert!(reviser.is_empty());
    assert!(reviser.apply().is_none());
}

#[test]
fn test_overlapping_edits_abort_the_transaction() {
    let tree = SourceTree::parse("fn main() { foo(); }\n");
    let mut reviser = Reviser::new(&tree);
    reviser.replace_range(TextRange::new(TextSize::from(0), TextSize::from(5)), "a");
    reviser.replace_range(TextRange::new(TextSize::from(3), TextSize::from(8)), "b");
    assert!(reviser.apply().is_none());
}

#[test]
fn test_touching_edits_are_not_overlapping() {
    let tree = SourceTree::parse("fn main() { foo(); }\n");
    let mut reviser = Reviser::new(&tree);
    reviser.replace_range(TextRange::new(TextSize::from(12), TextSize::from(15)), "bar");
    reviser.replace_range(TextRange::new(TextSize::from(15), TextSize::from(17)), "(1)");
    let new_tree = reviser.apply().unwrap();
    assert_eq!(new_tree.text(), "fn main() { bar(1); }\n");
}

#[test]
fn test_stale_node_aborts_the_transaction() {
    let other = SourceTree::parse("fn main() { let x = 1; }\n");
    let lets = find_nodes(&other.root(), SyntaxKind::LET_STMT);

    // A node from a different snapshot does not resolve here
    let tree = SourceTree::parse("fn main() { foo(); bar(); }\n");
    let mut reviser = Reviser::new(&tree);
    reviser.replace_node(&lets[0], "let y = 2;");
    assert!(reviser.apply().is_none());
    // The original snapshot is untouched by construction; re-check the text
    assert_eq!(tree.text(), "fn main() { foo(); bar(); }\n");
}

#[test]
fn test_out_of_bounds_range_aborts() {
    let tree = SourceTree::parse("fn main() {}\n");
    let mut reviser = Reviser::new(&tree);
    reviser.replace_range(
        TextRange::new(TextSize::from(0), TextSize::from(10_000)),
        "",
    );
    assert!(reviser.apply().is_none());
}

#[test]
fn test_remove_statement_leaves_no_blank_line() {
    let source = "fn main() {\n    let a = 1;\n    let b = 2;\n}\n";
    let tree = SourceTree::parse(source);
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);

    let mut reviser = Reviser::new(&tree);
    reviser.remove_statement(&lets[0]);
    let new_tree = reviser.apply().unwrap();
    assert_eq!(new_tree.text(), "fn main() {\n    let b = 2;\n}\n");
}

#[test]
fn test_insert_before() {
    let tree = SourceTree::parse("fn main() { foo(); }\n");
    let stmts = find_nodes(&tree.root(), SyntaxKind::EXPR_STMT);

    let mut reviser = Reviser::new(&tree);
    reviser.insert_before(&stmts[0], "bar(); ");
    let new_tree = reviser.apply().unwrap();
    assert_eq!(new_tree.text(), "fn main() { bar(); foo(); }\n");
}

#[test]
fn test_tracked_node_relocates_after_edits() {
    let source = "fn main() {\n    let a = 1;\n    let b = 2;\n}\n";
    let tree = SourceTree::parse(source);
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);
    let removed_len: usize = tree.statement_line_range(&lets[0]).len().into();

    let mut reviser = Reviser::new(&tree);
    let tracked = reviser.track(&lets[1]);
    reviser.remove_statement(&lets[0]);
    let (new_tree, map) = reviser.apply_tracked().unwrap();

    let relocated = tracked.relocate(&map, &new_tree).unwrap();
    assert_eq!(relocated.kind(), SyntaxKind::LET_STMT);
    assert_eq!(relocated.text().to_string(), "let b = 2;");

    // Offsets after the removed statement shift left by its length
    let b_start: usize = lets[1].text_range().start().into();
    assert_eq!(map.map_offset(b_start), Some(b_start - removed_len));
}

#[test]
fn test_edit_map_rejects_offsets_inside_edits() {
    let tree = SourceTree::parse("fn main() {\n    let a = 1;\n}\n");
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);
    let inside: usize = lets[0].text_range().start().into();

    let mut reviser = Reviser::new(&tree);
    reviser.remove_statement(&lets[0]);
    let (_, map) = reviser.apply_tracked().unwrap();

    assert!(map.map_offset(inside + 1).is_none());
    assert!(map.map_range(lets[0].text_range()).is_none());
}

#[test]
fn test_multi_edit_transaction_is_atomic() {
    // One good edit plus one stale edit: nothing is applied
    let other = SourceTree::parse("fn main() { let x = 1; }\n");
    let stale = find_nodes(&other.root(), SyntaxKind::LET_STMT);

    let tree = SourceTree::parse("fn main() { foo(); bar(); }\n");
    let exprs = find_nodes(&tree.root(), SyntaxKind::EXPR_STMT);

    let mut reviser = Reviser::new(&tree);
    reviser.replace_node(&exprs[0], "baz();");
    reviser.replace_node(&stale[0], "let y = 2;");
    assert!(reviser.apply().is_none());
}
