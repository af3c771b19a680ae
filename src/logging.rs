// Copyright (C) Brian G. Milnes 2025

//! Logging infrastructure for restyler tools
//!
//! Each run of a tool writes a timestamped log file:
//! - logs/<tool-name>/<date>/run-<timestamp>.log
//!
//! If log creation fails the tool continues without logging. The
//! `run_tool` wrapper gives every binary the same frame: directory
//! context line, the tool body, summary, and timing.

pub mod logging {
    use anyhow::Result;
    use chrono::{DateTime, Local};
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    /// Logger for a restyler tool
    pub struct ToolLogger {
        log_file: Option<fs::File>,
        log_path: Option<PathBuf>,
        start_time: DateTime<Local>,
    }

    impl ToolLogger {
        /// A logger with no file output, for tools run with logging off
        pub fn new_disabled() -> Self {
            ToolLogger {
                log_file: None,
                log_path: None,
                start_time: Local::now(),
            }
        }

        /// Create a logger writing to logs/<tool>/<YYYY-MM-DD>/run-<HH-MM-SS>.log.
        /// Degrades to stdout-only if the file cannot be created.
        pub fn new(tool_name: &str) -> Self {
            let start_time = Local::now();
            let (log_file, log_path) = match Self::create_log_file(tool_name, &start_time) {
                Ok((file, path)) => (Some(file), Some(path)),
                Err(e) => {
                    eprintln!("Warning: Could not create log file: {e}");
                    eprintln!("Continuing without logging...");
                    (None, None)
                }
            };

            ToolLogger {
                log_file,
                log_path,
                start_time,
            }
        }

        fn create_log_file(
            tool_name: &str,
            start_time: &DateTime<Local>,
        ) -> Result<(fs::File, PathBuf)> {
            let date_str = start_time.format("%Y-%m-%d").to_string();
            let time_str = start_time.format("%H-%M-%S").to_string();

            let log_dir = PathBuf::from("logs").join(tool_name).join(&date_str);
            fs::create_dir_all(&log_dir)?;

            let log_path = log_dir.join(format!("run-{time_str}.log"));
            let log_file = fs::File::create(&log_path)?;

            Ok((log_file, log_path))
        }

        /// Log to both stdout and the log file
        pub fn log(&mut self, message: &str) {
            println!("{message}");
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "{message}");
            }
        }

        /// Log to stderr and the log file
        pub fn warn(&mut self, message: &str) {
            eprintln!("{message}");
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "WARNING: {message}");
            }
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        /// Append the run summary block
        pub fn finalize(&mut self, summary: &str) {
            let end_time = Local::now();
            let duration = end_time.signed_duration_since(self.start_time);

            self.log("");
            self.log("=== Run Summary ===");
            self.log(summary);
            self.log(&format!(
                "Started: {}",
                self.start_time.format("%Y-%m-%d %H:%M:%S")
            ));
            self.log(&format!("Ended: {}", end_time.format("%Y-%m-%d %H:%M:%S")));
            self.log(&format!("Duration: {}ms", duration.num_milliseconds()));

            if let Some(ref path) = self.log_path {
                self.log(&format!("Log saved to: {}", path.display()));
            }
        }
    }

    impl Drop for ToolLogger {
        fn drop(&mut self) {
            if let Some(ref mut file) = self.log_file {
                let _ = file.flush();
            }
        }
    }

    /// Run a tool body with the standard frame: "Entering directory" line
    /// for Emacs compile-mode, timing, and an optional log file. The body
    /// returns its summary line.
    pub fn run_tool<F>(
        tool_name: &str,
        base_dir: &Path,
        enable_logging: bool,
        tool_fn: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut ToolLogger) -> Result<String>,
    {
        let start = Instant::now();

        println!("Entering directory '{}'", base_dir.display());
        println!();

        let mut logger = if enable_logging {
            ToolLogger::new(tool_name)
        } else {
            ToolLogger::new_disabled()
        };

        let summary = tool_fn(&mut logger)?;

        println!();
        println!("{summary}");
        println!("Completed in {}ms", start.elapsed().as_millis());

        if enable_logging {
            logger.finalize(&summary);
        }

        Ok(())
    }
}
