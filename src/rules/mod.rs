// Copyright (C) Brian G. Milnes 2025

//! The rule catalog
//!
//! Each rule is a standalone analyzer/fixer pair registered explicitly in
//! `default_rules`. The engine is agnostic to what any predicate checks.

pub mod bom;
pub mod import_order;
pub mod merge_option_check;
pub mod redundant_parens;
pub mod unused_local;
pub mod variable_naming;

pub mod registry {
    use crate::engine::engine::Rule;

    use super::bom::bom::LeadingBom;
    use super::import_order::import_order::ImportOrder;
    use super::merge_option_check::merge_option_check::MergeOptionCheck;
    use super::redundant_parens::redundant_parens::RedundantParens;
    use super::unused_local::unused_local::UnusedLocal;
    use super::variable_naming::variable_naming::VariableNaming;

    /// Every shipped rule, in reporting order
    pub fn default_rules() -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(LeadingBom),
            Box::new(ImportOrder),
            Box::new(UnusedLocal),
            Box::new(VariableNaming),
            Box::new(RedundantParens),
            Box::new(MergeOptionCheck),
        ]
    }
}
