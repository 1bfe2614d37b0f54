//! Animation fetch service
//!
//! Downloads the decorative animation shown under the page title. The
//! animation is optional: any failure is logged and treated as absent.

use crate::config::Settings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Where animation documents come from
#[async_trait]
pub trait AnimationSource: Send + Sync + std::fmt::Debug {
    /// `Ok(None)` when the source answered without a document
    async fn fetch(&self) -> Result<Option<Value>>;
}

/// Fetches the animation JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpAnimationSource {
    client: Client,
    url: String,
}

impl HttpAnimationSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aipowermeter/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AnimationSource for HttpAnimationSource {
    async fn fetch(&self) -> Result<Option<Value>> {
        debug!("Fetching animation from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to send animation request")?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Animation request returned {}", status);
            return Ok(None);
        }

        let document: Value = response
            .json()
            .await
            .context("Failed to parse animation JSON")?;

        Ok(Some(document))
    }
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Empty,
    Loaded(Arc<Value>),
    Failed(Instant),
}

/// Cached, failure-tolerant access to the animation
#[derive(Debug, Clone)]
pub struct AnimationClient {
    source: Option<Arc<dyn AnimationSource>>,
    cache: Arc<RwLock<CacheEntry>>,
    retry_after: Duration,
}

impl AnimationClient {
    pub fn new(source: Arc<dyn AnimationSource>, retry_after: Duration) -> Self {
        Self {
            source: Some(source),
            cache: Arc::new(RwLock::new(CacheEntry::Empty)),
            retry_after,
        }
    }

    /// A client that never fetches anything
    pub fn disabled() -> Self {
        Self {
            source: None,
            cache: Arc::new(RwLock::new(CacheEntry::Empty)),
            retry_after: Duration::ZERO,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if !settings.animation.enabled {
            info!("Animation fetch disabled");
            return Ok(Self::disabled());
        }

        let source = HttpAnimationSource::new(
            settings.animation.url.clone(),
            settings.animation_timeout(),
        )?;
        Ok(Self::new(Arc::new(source), settings.animation_retry_after()))
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// The animation document, or `None` when it is unavailable.
    ///
    /// A loaded document is kept for the life of the process. After a failure
    /// the source is not asked again until the retry delay has passed.
    pub async fn get(&self) -> Option<Arc<Value>> {
        let source = self.source.as_ref()?;

        if let Some(cached) = self.cached().await {
            return cached;
        }

        let mut entry = self.cache.write().await;
        // Another request may have finished the fetch while we waited for the lock
        if let Some(cached) = self.check(&entry) {
            return cached;
        }

        match source.fetch().await {
            Ok(Some(document)) => {
                info!("Animation loaded");
                let document = Arc::new(document);
                *entry = CacheEntry::Loaded(document.clone());
                Some(document)
            }
            Ok(None) => {
                *entry = CacheEntry::Failed(Instant::now());
                None
            }
            Err(e) => {
                warn!("Animation unavailable: {:#}", e);
                *entry = CacheEntry::Failed(Instant::now());
                None
            }
        }
    }

    async fn cached(&self) -> Option<Option<Arc<Value>>> {
        let entry = self.cache.read().await;
        self.check(&entry)
    }

    /// `Some(result)` when the cache can answer without fetching
    fn check(&self, entry: &CacheEntry) -> Option<Option<Arc<Value>>> {
        match entry {
            CacheEntry::Empty => None,
            CacheEntry::Loaded(document) => Some(Some(document.clone())),
            CacheEntry::Failed(at) if at.elapsed() < self.retry_after => Some(None),
            CacheEntry::Failed(_) => None,
        }
    }
}
