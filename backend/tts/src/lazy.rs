//! Process-scoped speech engine handle.
//!
//! The engine is built on first use and shared by every later request.
//! A failed build leaves the cell empty so the next request tries again.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use pagecast_core::SpeechEngine;
use tokio::sync::OnceCell;
use tracing::info;

type EngineFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn SpeechEngine>>> + Send + Sync>;

pub struct LazySpeechEngine {
    cell: OnceCell<Arc<dyn SpeechEngine>>,
    factory: EngineFactory,
}

impl LazySpeechEngine {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn SpeechEngine>>> + Send + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(move || factory().boxed()),
        }
    }

    /// A handle around an engine that already exists.
    pub fn ready(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            cell: OnceCell::from(engine),
            factory: Box::new(|| {
                async { Err::<Arc<dyn SpeechEngine>, _>(anyhow::anyhow!("speech engine already built")) }
                    .boxed()
            }),
        }
    }

    /// Get the engine, building it if this is the first call.
    /// Concurrent first callers wait on a single build.
    pub async fn get(&self) -> Result<Arc<dyn SpeechEngine>> {
        let engine = self
            .cell
            .get_or_try_init(|| async {
                let engine = (self.factory)().await?;
                info!(engine = engine.name(), "Speech engine initialized");
                Ok::<_, anyhow::Error>(engine)
            })
            .await?;
        Ok(Arc::clone(engine))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::mock::MockSpeechEngine;

    #[tokio::test]
    async fn builds_once_and_reuses() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let lazy = LazySpeechEngine::new(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(Arc::new(MockSpeechEngine::silent()) as Arc<dyn SpeechEngine>)
            }
        });

        assert!(!lazy.is_initialized());
        let a = lazy.get().await.unwrap();
        let b = lazy.get().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(lazy.is_initialized());
    }

    #[tokio::test]
    async fn concurrent_first_use_builds_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let lazy = Arc::new(LazySpeechEngine::new(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok::<_, anyhow::Error>(Arc::new(MockSpeechEngine::silent()) as Arc<dyn SpeechEngine>)
            }
        }));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let lazy = lazy.clone();
                tokio::spawn(async move { lazy.get().await.map(|_| ()) })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_build_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let lazy = LazySpeechEngine::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    anyhow::bail!("engine not reachable");
                }
                Ok::<_, anyhow::Error>(Arc::new(MockSpeechEngine::silent()) as Arc<dyn SpeechEngine>)
            }
        });

        assert!(lazy.get().await.is_err());
        assert!(!lazy.is_initialized());
        assert!(lazy.get().await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ready_handle_is_initialized() {
        let lazy = LazySpeechEngine::ready(Arc::new(MockSpeechEngine::silent()));
        assert!(lazy.is_initialized());
        assert_eq!(lazy.get().await.unwrap().name(), "mock");
    }
}
