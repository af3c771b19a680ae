// Copyright (C) Brian G. Milnes 2025

//! Strict parsing entry point
//!
//! `parse_file` refuses sources with syntax errors; analysis paths that must
//! degrade to silence on broken input go through `tree::SourceTree::parse`
//! instead, which keeps the errors alongside the tree.

pub mod parser {
    use anyhow::Result;
    use ra_ap_syntax::{Edition, SourceFile};

    /// Parse a Rust source file from a string, failing on any syntax error
    pub fn parse_file(source: &str) -> Result<SourceFile> {
        let parsed = SourceFile::parse(source, Edition::Edition2021);

        if !parsed.errors().is_empty() {
            return Err(anyhow::anyhow!("Parse errors: {:?}", parsed.errors()));
        }

        Ok(parsed.tree())
    }
}
