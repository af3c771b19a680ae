// Copyright (C) Brian G. Milnes 2025

//! Scope and flow queries over a syntax tree
//!
//! A purely syntactic approximation of a compiler's semantic model: nearest
//! lexically-enclosing binding resolution, shadow detection for rename
//! safety, and local read/write facts. Every query returns Option or empty
//! on input it cannot resolve; analysis degrades to silence, never panics.

pub mod semantics {
    use ra_ap_syntax::{
        ast::{self, AstNode, HasName},
        SyntaxKind, SyntaxNode, TextRange,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum SymbolKind {
        Local,
        Param,
        TypeParam,
        Item,
    }

    /// Semantic identity of a declaration, distinct from its syntactic
    /// occurrences. Equality is (kind, declaration range) - a dedicated
    /// comparer, never raw node identity.
    #[derive(Debug, Clone, Eq)]
    pub struct Symbol {
        pub name: String,
        pub kind: SymbolKind,
        pub decl_range: TextRange,
    }

    impl PartialEq for Symbol {
        fn eq(&self, other: &Self) -> bool {
            self.kind == other.kind && self.decl_range == other.decl_range
        }
    }

    /// Per-snapshot query interface; cheap to build, borrows nothing
    #[derive(Debug, Clone)]
    pub struct SemanticModel {
        root: SyntaxNode,
    }

    impl SemanticModel {
        pub fn new(root: &SyntaxNode) -> SemanticModel {
            SemanticModel { root: root.clone() }
        }

        /// Resolve a single-segment name reference to the binding that is in
        /// scope at that point. The nearest lexically-enclosing binding wins;
        /// a binding introduced by a lexically-later sibling in the same
        /// scope does not bind earlier references.
        pub fn resolve_name(&self, reference: &SyntaxNode) -> Option<Symbol> {
            let name = single_segment_name(reference)?;
            let ref_start = reference.text_range().start();

            for ancestor in reference.ancestors() {
                match ancestor.kind() {
                    SyntaxKind::STMT_LIST | SyntaxKind::BLOCK_EXPR => {
                        // Last let-binding of this name that ends before the
                        // reference is the nearest one.
                        let mut found: Option<Symbol> = None;
                        for stmt in ancestor.children() {
                            if stmt.kind() != SyntaxKind::LET_STMT {
                                continue;
                            }
                            if stmt.text_range().end() > ref_start {
                                break;
                            }
                            if let Some(range) = pat_binding(&stmt, &name) {
                                found = Some(Symbol {
                                    name: name.clone(),
                                    kind: SymbolKind::Local,
                                    decl_range: range,
                                });
                            }
                        }
                        if found.is_some() {
                            return found;
                        }
                    }
                    SyntaxKind::MATCH_ARM | SyntaxKind::FOR_EXPR | SyntaxKind::LET_EXPR => {
                        if let Some(range) = pat_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::Local,
                                decl_range: range,
                            });
                        }
                    }
                    SyntaxKind::CLOSURE_EXPR => {
                        if let Some(range) = param_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::Param,
                                decl_range: range,
                            });
                        }
                    }
                    SyntaxKind::FN => {
                        if let Some(range) = param_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::Param,
                                decl_range: range,
                            });
                        }
                        if let Some(range) = type_param_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::TypeParam,
                                decl_range: range,
                            });
                        }
                    }
                    SyntaxKind::IMPL | SyntaxKind::TRAIT | SyntaxKind::STRUCT | SyntaxKind::ENUM => {
                        if let Some(range) = type_param_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::TypeParam,
                                decl_range: range,
                            });
                        }
                    }
                    SyntaxKind::SOURCE_FILE | SyntaxKind::ITEM_LIST => {
                        if let Some(range) = item_binding(&ancestor, &name) {
                            return Some(Symbol {
                                name,
                                kind: SymbolKind::Item,
                                decl_range: range,
                            });
                        }
                    }
                    _ => {}
                }
            }
            None
        }

        /// Shadow detection: would introducing `name` at `at` collide with or
        /// be shadowed by an existing binding? Walks ancestors outward and
        /// stops at the first scope that binds the name. Only lexically
        /// enclosing scopes count; bindings in textually-later siblings at
        /// the same nesting level do not.
        pub fn name_bound_at(&self, at: &SyntaxNode, name: &str) -> bool {
            let at_start = at.text_range().start();

            for ancestor in at.ancestors() {
                let bound = match ancestor.kind() {
                    SyntaxKind::STMT_LIST | SyntaxKind::BLOCK_EXPR => ancestor
                        .children()
                        .filter(|stmt| stmt.kind() == SyntaxKind::LET_STMT)
                        .filter(|stmt| stmt.text_range().end() <= at_start)
                        .any(|stmt| pat_binding(&stmt, name).is_some()),
                    SyntaxKind::MATCH_ARM | SyntaxKind::FOR_EXPR | SyntaxKind::LET_EXPR => {
                        pat_binding(&ancestor, name).is_some()
                    }
                    SyntaxKind::CLOSURE_EXPR => param_binding(&ancestor, name).is_some(),
                    SyntaxKind::FN => {
                        param_binding(&ancestor, name).is_some()
                            || type_param_binding(&ancestor, name).is_some()
                    }
                    SyntaxKind::IMPL
                    | SyntaxKind::TRAIT
                    | SyntaxKind::STRUCT
                    | SyntaxKind::ENUM => type_param_binding(&ancestor, name).is_some(),
                    SyntaxKind::SOURCE_FILE | SyntaxKind::ITEM_LIST => {
                        item_binding(&ancestor, name).is_some()
                    }
                    _ => false,
                };
                if bound {
                    return true;
                }
            }
            false
        }

        /// Token-level occurrence count of an identifier within a range.
        /// Deliberately over-approximate: identifiers inside macro token
        /// trees count, so a "no uses" conclusion is always safe.
        pub fn ident_occurrences(&self, range: TextRange, name: &str) -> usize {
            self.root
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .filter(|token| token.kind() == SyntaxKind::IDENT)
                .filter(|token| range.contains_range(token.text_range()))
                .filter(|token| token.text() == name)
                .count()
        }

        /// Path-expression reads of a local within a range. An assignment
        /// left-hand side is a write, not a read; compound assignments
        /// (`+=`) read and are counted here.
        pub fn reads_of(&self, symbol: &Symbol, range: TextRange) -> Vec<SyntaxNode> {
            self.references_of(symbol, range)
                .into_iter()
                .filter(|node| !is_assignment_lhs(node))
                .collect()
        }

        /// Direct assignment targets of a local within a range
        pub fn writes_of(&self, symbol: &Symbol, range: TextRange) -> Vec<SyntaxNode> {
            self.references_of(symbol, range)
                .into_iter()
                .filter(is_assignment_lhs_ref)
                .collect()
        }

        fn references_of(&self, symbol: &Symbol, range: TextRange) -> Vec<SyntaxNode> {
            self.root
                .descendants()
                .filter(|node| node.kind() == SyntaxKind::PATH_EXPR)
                .filter(|node| range.contains_range(node.text_range()))
                .filter(|node| single_segment_name(node).as_deref() == Some(symbol.name.as_str()))
                .filter(|node| self.resolve_name(node).as_ref() == Some(symbol))
                .collect()
        }
    }

    /// Flow fact: the initializer is literally `Some(..)`, so an `is_some`
    /// check against this binding is already provably satisfied.
    pub fn initializer_always_some(let_stmt: &ast::LetStmt) -> bool {
        let Some(ast::Expr::CallExpr(call)) = let_stmt.initializer() else {
            return false;
        };
        let Some(ast::Expr::PathExpr(path_expr)) = call.expr() else {
            return false;
        };
        match path_expr.path() {
            Some(path) => {
                let text = path.syntax().text().to_string();
                text == "Some" || text == "Option::Some" || text.ends_with("::Some")
            }
            None => false,
        }
    }

    /// The name of a single-segment, unqualified path or name-ref node
    pub fn single_segment_name(node: &SyntaxNode) -> Option<String> {
        match node.kind() {
            SyntaxKind::PATH_EXPR => {
                let path_expr = ast::PathExpr::cast(node.clone())?;
                let path = path_expr.path()?;
                if path.qualifier().is_some() {
                    return None;
                }
                Some(path.segment()?.name_ref()?.text().to_string())
            }
            SyntaxKind::NAME_REF => Some(node.text().to_string()),
            SyntaxKind::NAME => Some(node.text().to_string()),
            _ => None,
        }
    }

    /// Range of the identifier that binds `name` in a node's pattern, if any
    fn pat_binding(node: &SyntaxNode, name: &str) -> Option<TextRange> {
        node.descendants()
            .filter(|n| n.kind() == SyntaxKind::IDENT_PAT)
            .filter_map(|n| ast::IdentPat::cast(n))
            .filter_map(|pat| pat.name())
            .find(|n| n.text() == name)
            .map(|n| n.syntax().text_range())
    }

    fn param_binding(node: &SyntaxNode, name: &str) -> Option<TextRange> {
        let param_list = node
            .children()
            .find(|child| child.kind() == SyntaxKind::PARAM_LIST)?;
        pat_binding(&param_list, name)
    }

    fn type_param_binding(node: &SyntaxNode, name: &str) -> Option<TextRange> {
        let params = node
            .children()
            .find(|child| child.kind() == SyntaxKind::GENERIC_PARAM_LIST)?;
        params
            .descendants()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::TYPE_PARAM | SyntaxKind::CONST_PARAM | SyntaxKind::LIFETIME_PARAM
                )
            })
            .filter_map(|n| {
                n.children()
                    .find(|child| child.kind() == SyntaxKind::NAME)
            })
            .find(|n| n.text() == name)
            .map(|n| n.text_range())
    }

    /// Item-level binding of `name` directly under a file or item list.
    /// Item bindings are not position-sensitive.
    fn item_binding(scope: &SyntaxNode, name: &str) -> Option<TextRange> {
        for item in scope.children() {
            let item_name = match item.kind() {
                SyntaxKind::FN => ast::Fn::cast(item.clone()).and_then(|f| f.name()),
                SyntaxKind::STRUCT => ast::Struct::cast(item.clone()).and_then(|s| s.name()),
                SyntaxKind::ENUM => ast::Enum::cast(item.clone()).and_then(|e| e.name()),
                SyntaxKind::CONST => ast::Const::cast(item.clone()).and_then(|c| c.name()),
                SyntaxKind::STATIC => ast::Static::cast(item.clone()).and_then(|s| s.name()),
                SyntaxKind::MODULE => ast::Module::cast(item.clone()).and_then(|m| m.name()),
                SyntaxKind::TRAIT => ast::Trait::cast(item.clone()).and_then(|t| t.name()),
                SyntaxKind::TYPE_ALIAS => {
                    ast::TypeAlias::cast(item.clone()).and_then(|t| t.name())
                }
                _ => None,
            };
            if let Some(item_name) = item_name {
                if item_name.text() == name {
                    return Some(item_name.syntax().text_range());
                }
            }
        }
        None
    }

    fn is_assignment_lhs(node: &SyntaxNode) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        if parent.kind() != SyntaxKind::BIN_EXPR {
            return false;
        }
        let is_plain_assign = parent
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .any(|token| token.kind() == SyntaxKind::EQ);
        is_plain_assign && parent.children().next().as_ref() == Some(node)
    }

    fn is_assignment_lhs_ref(node: &SyntaxNode) -> bool {
        is_assignment_lhs(node)
    }
}
