// Copyright (C) Brian G. Milnes 2025

//! Standard command-line arguments and file discovery
//!
//! Every restyler binary takes the same argument shape: directories or
//! files to analyze, `-c` for the whole codebase (src, tests, benches),
//! an output format, and an optional configuration file.

pub mod args {
    use anyhow::Result;
    use clap::Parser;
    use regex::Regex;
    use std::path::{Path, PathBuf};
    use walkdir::WalkDir;

    #[derive(Debug, Parser)]
    #[command(version, about)]
    pub struct StandardArgs {
        /// Directories to search for Rust files
        #[arg(short = 'd', long = "dir")]
        pub dirs: Vec<PathBuf>,

        /// Individual files to analyze
        #[arg(short = 'f', long = "file")]
        pub files: Vec<PathBuf>,

        /// Check the whole codebase (src, tests, benches)
        #[arg(short = 'c', long = "codebase")]
        pub codebase: bool,

        /// Output format: text or json
        #[arg(long = "format", default_value = "text")]
        pub format: String,

        /// Path to a JSON configuration file
        #[arg(long = "config")]
        pub config: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long = "dry-run")]
        pub dry_run: bool,
    }

    impl StandardArgs {
        pub fn parse_args() -> StandardArgs {
            StandardArgs::parse()
        }

        pub fn base_dir(&self) -> PathBuf {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }

        /// The directories to search, honoring -d and -c; defaults to src
        pub fn get_search_dirs(&self) -> Vec<PathBuf> {
            if !self.dirs.is_empty() {
                return self.dirs.clone();
            }
            if self.codebase {
                return ["src", "tests", "benches"]
                    .iter()
                    .map(PathBuf::from)
                    .filter(|p| p.is_dir())
                    .collect();
            }
            vec![PathBuf::from("src")]
        }

        /// Explicit files plus everything found under the search dirs,
        /// within the configured traversal depth
        pub fn gather_files(&self, max_depth: usize) -> Vec<PathBuf> {
            let mut files = self.files.clone();
            if files.is_empty() || !self.dirs.is_empty() || self.codebase {
                for dir in self.get_search_dirs() {
                    files.extend(
                        find_files(&dir, max_depth)
                            .into_iter()
                            .filter(|path| path.extension().is_some_and(|ext| ext == "rs")),
                    );
                }
            }
            files.sort();
            files.dedup();
            files
        }

        /// Load configuration text from --config, empty when absent
        pub fn config_text(&self) -> String {
            match &self.config {
                Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                    String::new()
                }),
                None => String::new(),
            }
        }
    }

    /// All .rs files under the given directories, sorted for stable output
    pub fn find_rust_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = dirs
            .iter()
            .flat_map(|dir| find_files(dir, usize::MAX))
            .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
            .collect();
        files.sort();
        files
    }

    /// All files under `root` up to `max_depth` directory levels
    pub fn find_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }

    /// Convert a glob pattern to an anchored regex. `**` crosses directory
    /// separators, `*` and `?` do not.
    pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
        let mut regex = String::from("^");
        let mut chars = pattern.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '*' => {
                    if chars.peek() == Some(&'*') {
                        chars.next();
                        // Swallow a following slash so "**/" also matches
                        // the empty prefix
                        if chars.peek() == Some(&'/') {
                            chars.next();
                            regex.push_str("(?:.*/)?");
                        } else {
                            regex.push_str(".*");
                        }
                    } else {
                        regex.push_str("[^/]*");
                    }
                }
                '?' => regex.push_str("[^/]"),
                '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                    regex.push('\\');
                    regex.push(ch);
                }
                other => regex.push(other),
            }
        }
        regex.push('$');
        Ok(Regex::new(&regex)?)
    }

    /// Does a path match the glob, with separators normalized to '/'
    pub fn glob_matches(glob: &Regex, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        glob.is_match(&normalized)
    }

    /// Format a number with comma grouping (1234567 -> "1,234,567")
    pub fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::new();
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}
