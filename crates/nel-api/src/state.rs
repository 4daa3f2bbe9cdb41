//! Application state management
//!
//! Author: hephaex@gmail.com

use nel_core::config::AppConfig;
use nel_core::{KnowledgeBase, Result};
use nel_linker::{create_knowledge_base, NelApp};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// The linking app
    pub app: NelApp,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create new application state with an explicit knowledge base
    pub fn new(config: AppConfig, kb: Arc<dyn KnowledgeBase>) -> Self {
        let app = NelApp::new(kb, config.linker.clone());
        Self {
            config,
            app,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Create state with the knowledge base named in the config
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let kb = create_knowledge_base(&config.knowledge_base)?;
        Ok(Self::new(config, kb))
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
