// Copyright (C) Brian G. Milnes 2025

//! Per-run rule configuration
//!
//! A ConfigPod is immutable, deserialized once from JSON text, and consumed
//! read-only by rules. Malformed configuration degrades to defaults with the
//! triggering error retained for reporting; it never blocks analysis.
//!
//! The ConfigCache is the one piece of shared mutable cross-file state: a
//! content-keyed map of weak references, guarded by a single coarse lock
//! around lookup-or-create, so repeated analyses of the same file set reuse
//! one pod and drop it when the last analysis finishes.

pub mod config {
    use serde::Deserialize;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;
    use std::hash::{Hash, Hasher};
    use std::sync::{Arc, Mutex, Weak};

    fn default_max_search_depth() -> usize {
        16
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(default)]
    pub struct ConfigPod {
        /// Identifiers that must not be used for locals (variable-naming rule)
        pub disallowed_identifiers: Vec<String>,
        /// Attribute names that exempt an item from analysis
        pub ignored_attributes: Vec<String>,
        /// Glob patterns selecting the files the leading-bom rule applies to;
        /// empty means all files
        pub bom_globs: Vec<String>,
        /// Directory traversal depth limit for file discovery
        #[serde(default = "default_max_search_depth")]
        pub max_search_depth: usize,
        /// Retained load failure, if the source text was malformed
        #[serde(skip)]
        pub load_error: Option<String>,
    }

    impl Default for ConfigPod {
        fn default() -> Self {
            ConfigPod {
                // Names that show up when someone stops trying to name things
                disallowed_identifiers: vec![
                    "led_zeppelin".to_string(),
                    "pink_floyd".to_string(),
                    "the_beatles".to_string(),
                    "rolling_stones".to_string(),
                    "stairway_to_heaven".to_string(),
                    "bohemian_rhapsody".to_string(),
                    "hotel_california".to_string(),
                ],
                ignored_attributes: vec!["allow".to_string()],
                bom_globs: Vec::new(),
                max_search_depth: default_max_search_depth(),
                load_error: None,
            }
        }
    }

    impl ConfigPod {
        /// Parse configuration text. Malformed input yields defaults with
        /// the error retained on the pod; this never fails.
        pub fn load(text: &str) -> ConfigPod {
            if text.trim().is_empty() {
                return ConfigPod::default();
            }
            match serde_json::from_str::<ConfigPod>(text) {
                Ok(pod) => pod,
                Err(e) => {
                    let mut pod = ConfigPod::default();
                    pod.load_error = Some(e.to_string());
                    pod
                }
            }
        }
    }

    /// Content-keyed cache of live ConfigPods. Entries are held weakly and
    /// reclaimed once no analysis references them.
    #[derive(Debug, Default)]
    pub struct ConfigCache {
        pods: Mutex<HashMap<u64, Weak<ConfigPod>>>,
    }

    impl ConfigCache {
        pub fn new() -> ConfigCache {
            ConfigCache {
                pods: Mutex::new(HashMap::new()),
            }
        }

        /// Look up or create the pod for this configuration text
        pub fn get_or_load(&self, text: &str) -> Arc<ConfigPod> {
            let key = content_key(text);
            let mut pods = match self.pods.lock() {
                Ok(pods) => pods,
                Err(_) => return Arc::new(ConfigPod::load(text)),
            };

            if let Some(existing) = pods.get(&key).and_then(Weak::upgrade) {
                return existing;
            }

            let pod = Arc::new(ConfigPod::load(text));
            pods.insert(key, Arc::downgrade(&pod));
            pods.retain(|_, weak| weak.strong_count() > 0);
            pod
        }

        /// Number of live entries (dead weak entries are not counted)
        pub fn live_len(&self) -> usize {
            self.pods
                .lock()
                .map(|pods| pods.values().filter(|w| w.strong_count() > 0).count())
                .unwrap_or(0)
        }
    }

    fn content_key(text: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        hasher.finish()
    }
}
