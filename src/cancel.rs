// Copyright (C) Brian G. Milnes 2025

//! Cooperative cancellation for analysis passes
//!
//! Every traversal loop checks the token at its boundary and unwinds
//! cleanly; cancellation is an early termination, not an error.

pub mod cancel {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Shared cancellation flag threaded through every traversal entry point
    #[derive(Debug, Clone, Default)]
    pub struct CancelToken {
        cancelled: Arc<AtomicBool>,
    }

    impl CancelToken {
        pub fn new() -> Self {
            CancelToken {
                cancelled: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Request cancellation; all clones observe it
        pub fn cancel(&self) {
            self.cancelled.store(true, Ordering::Relaxed);
        }

        pub fn is_cancelled(&self) -> bool {
            self.cancelled.load(Ordering::Relaxed)
        }
    }
}
