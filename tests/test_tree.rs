// Copyright (C) Brian G. Milnes 2025

//! Tests for the SourceTree snapshot and traversal utilities

use ra_ap_syntax::{NodeOrToken, SyntaxKind, TextRange, TextSize};
use restyler::tree::tree::{
    contains_exterior_struct_literal, find_nodes, find_token, find_tokens, is_inside_node_kind,
    next_non_trivia_sibling, peel_parens, prev_non_trivia_sibling,
};
use restyler::SourceTree;

#[test]
fn test_parse_is_lenient() {
    let good = SourceTree::parse("fn main() {}\n");
    assert!(!good.has_errors());
    assert!(good.errors().is_empty());

    let bad = SourceTree::parse("fn broken {{{\n");
    assert!(bad.has_errors());
    // Still a usable tree
    assert_eq!(bad.root().kind(), SyntaxKind::SOURCE_FILE);
}

#[test]
fn test_text_round_trips() {
    let source = "fn main() {\n    // comment\n    let x = 1;\n}\n";
    let tree = SourceTree::parse(source);
    assert_eq!(tree.text(), source);
    assert_eq!(tree.root().text().to_string(), source);
}

#[test]
fn test_line_col_is_one_indexed() {
    let tree = SourceTree::parse("fn a() {}\nfn b() {}\n");
    assert_eq!(tree.line_col(0), (1, 1));
    assert_eq!(tree.line_col(3), (1, 4));
    assert_eq!(tree.line_col(10), (2, 1));
    assert_eq!(tree.line_col(13), (2, 4));
}

#[test]
fn test_node_at_exact_range() {
    let tree = SourceTree::parse("fn main() {\n    let x = 1;\n}\n");
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);
    assert_eq!(lets.len(), 1);

    let range = lets[0].text_range();
    let found = tree.node_at_exact_range(range).unwrap();
    assert_eq!(found.text_range(), range);

    // A range matching no node resolves to None, never a panic
    let bogus = TextRange::new(TextSize::from(1), TextSize::from(7));
    assert!(tree.node_at_exact_range(bogus).is_none());

    // Out of bounds
    let beyond = TextRange::new(TextSize::from(0), TextSize::from(10_000));
    assert!(tree.node_at_exact_range(beyond).is_none());
}

#[test]
fn test_node_of_kind_at_range_walks_equal_range_chain() {
    let tree = SourceTree::parse("fn main() { foo(); }\n");
    // PATH_EXPR, PATH, PATH_SEGMENT and NAME_REF all share foo's range
    let paths = find_nodes(&tree.root(), SyntaxKind::PATH_EXPR);
    assert_eq!(paths.len(), 1);
    let range = paths[0].text_range();

    let found = tree
        .node_of_kind_at_range(range, SyntaxKind::PATH_EXPR)
        .unwrap();
    assert_eq!(found.kind(), SyntaxKind::PATH_EXPR);

    assert!(tree
        .node_of_kind_at_range(range, SyntaxKind::LET_STMT)
        .is_none());
}

#[test]
fn test_statement_line_range_covers_whole_line() {
    let source = "fn main() {\n    let a = 1;\n    let b = 2;\n}\n";
    let tree = SourceTree::parse(source);
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);

    let range = tree.statement_line_range(&lets[0]);
    let slice = &source[usize::from(range.start())..usize::from(range.end())];
    assert_eq!(slice, "    let a = 1;\n");
}

#[test]
fn test_peel_parens() {
    let tree = SourceTree::parse("fn main() { let x = ((1)); }\n");
    let parens = find_nodes(&tree.root(), SyntaxKind::PAREN_EXPR);
    let outer = parens
        .iter()
        .min_by_key(|p| usize::from(p.text_range().start()))
        .unwrap();

    let (core, peeled) = peel_parens(outer);
    assert_eq!(peeled, 2);
    assert_eq!(core.kind(), SyntaxKind::LITERAL);
    assert_eq!(core.text().to_string(), "1");

    // Non-paren nodes peel zero layers
    let (same, zero) = peel_parens(&core);
    assert_eq!(zero, 0);
    assert_eq!(same.text_range(), core.text_range());
}

#[test]
fn test_non_trivia_siblings_skip_comments() {
    let source = "fn main() {\n    let a = 1;\n    // between\n    let b = 2;\n}\n";
    let tree = SourceTree::parse(source);
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);

    let next = next_non_trivia_sibling(&lets[0]).unwrap();
    match next {
        NodeOrToken::Node(node) => assert_eq!(node.text_range(), lets[1].text_range()),
        NodeOrToken::Token(_) => panic!("expected the second let statement"),
    }

    let prev = prev_non_trivia_sibling(&lets[1]).unwrap();
    match prev {
        NodeOrToken::Node(node) => assert_eq!(node.text_range(), lets[0].text_range()),
        NodeOrToken::Token(_) => panic!("expected the first let statement"),
    }
}

#[test]
fn test_find_tokens() {
    let tree = SourceTree::parse("fn main() { let x = 1; let y = 2; }\n");
    let root = tree.root();

    assert!(find_token(&root, SyntaxKind::FN_KW).is_some());
    let idents = find_tokens(&root, SyntaxKind::IDENT);
    let names: Vec<String> = idents.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(names, vec!["main", "x", "y"]);
}

#[test]
fn test_is_inside_node_kind() {
    let tree = SourceTree::parse("fn main() { let x = 1; }\n");
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);
    assert!(is_inside_node_kind(&lets[0], SyntaxKind::FN));
    assert!(!is_inside_node_kind(&lets[0], SyntaxKind::IMPL));
}

#[test]
fn test_leading_and_trailing_trivia() {
    let source = "fn main() {\n    // note\n    let x = 1; // tail\n}\n";
    let tree = SourceTree::parse(source);
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);

    let leading = tree.leading_trivia(&lets[0]);
    assert!(leading.contains("// note"));

    let trailing = tree.trailing_trivia(&lets[0]);
    assert!(trailing.contains("// tail"));
    assert!(trailing.ends_with('\n'));
}

#[test]
fn test_contains_exterior_struct_literal() {
    let tree = SourceTree::parse(
        "fn main() {\n    let a = S { x: 1 }.x;\n    let b = f(S { x: 1 });\n    let c = (S { x: 1 }).x;\n}\n",
    );
    let lets = find_nodes(&tree.root(), SyntaxKind::LET_STMT);
    let init = |i: usize| lets[i].children().last().unwrap();

    // Bare field access off a literal
    assert!(contains_exterior_struct_literal(&init(0)));
    // Fenced by an argument list
    assert!(!contains_exterior_struct_literal(&init(1)));
    // Fenced by parens
    assert!(!contains_exterior_struct_literal(&init(2)));
}
