// Copyright (C) Brian G. Milnes 2025

//! Tests for the library entry points over real files

use anyhow::Result;
use restyler::ConfigPod;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
#[serial]
fn test_review_counts_issues() -> Result<()> {
    let path = scratch_file(
        "restyler_test_review.rs",
        "fn main() {\n    let orphan = 1;\n}\n",
    )?;

    let config = ConfigPod::default();
    let count = restyler::review(&path, "text", &config)?;
    assert_eq!(count, 1);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
#[serial]
fn test_review_clean_file() -> Result<()> {
    let path = scratch_file(
        "restyler_test_review_clean.rs",
        "fn main() {\n    let used = 1;\n    consume(used);\n}\n",
    )?;

    let config = ConfigPod::default();
    let count = restyler::review(&path, "json", &config)?;
    assert_eq!(count, 0);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
#[serial]
fn test_fix_file_in_place() -> Result<()> {
    let path = scratch_file(
        "restyler_test_fix.rs",
        "fn main() {\n    let x = (1);\n    consume(x);\n}\n",
    )?;

    let config = ConfigPod::default();
    let outcome = restyler::fix_file(&path, true, &config)?;
    assert!(outcome.changed());
    assert_eq!(outcome.fixes_applied, 1);

    let fixed = fs::read_to_string(&path)?;
    assert_eq!(fixed, "fn main() {\n    let x = 1;\n    consume(x);\n}\n");

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
#[serial]
fn test_fix_file_without_write_leaves_file_alone() -> Result<()> {
    let source = "fn main() {\n    let x = (1);\n    consume(x);\n}\n";
    let path = scratch_file("restyler_test_fix_dry.rs", source)?;

    let config = ConfigPod::default();
    let outcome = restyler::fix_file(&path, false, &config)?;
    assert!(outcome.changed());
    assert_eq!(fs::read_to_string(&path)?, source);

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
#[serial]
fn test_parse_displays_ast() -> Result<()> {
    let path = scratch_file("restyler_test_parse.rs", "fn main() {}\n")?;
    restyler::parse(&path, "text")?;
    restyler::parse(&path, "json")?;
    fs::remove_file(&path)?;
    Ok(())
}
