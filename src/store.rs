//! Atomically published configuration snapshots.
//!
//! Readers call [`ConfigStore::current`] and always see a complete snapshot.
//! Reloads rebuild from the full directive stream and swap the result in;
//! a reload that fails leaves the active snapshot untouched.

use crate::engine::ConfigEngine;
use crate::resolved::ResolvedConfiguration;
use anyhow::Context;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use termconf_config::{Directive, Result};

/// Holder of the active [`ResolvedConfiguration`].
pub struct ConfigStore {
    engine: Arc<ConfigEngine>,
    current: ArcSwap<ResolvedConfiguration>,
    /// Serializes reloads; readers never take it.
    reload_lock: Mutex<()>,
    generation: AtomicU64,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("platform", &self.engine.platform())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Resolve the initial configuration. Fails if it does not resolve.
    pub fn new<I>(engine: Arc<ConfigEngine>, directives: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Directive>,
    {
        let initial = engine.resolve(directives)?;
        Ok(Self {
            engine,
            current: ArcSwap::from_pointee(initial),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        })
    }

    pub fn engine(&self) -> &Arc<ConfigEngine> {
        &self.engine
    }

    /// The active snapshot.
    #[inline]
    pub fn current(&self) -> Arc<ResolvedConfiguration> {
        self.current.load_full()
    }

    /// Number of successful reloads since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Rebuild from `directives` and publish the result.
    ///
    /// On error the previous snapshot stays active and the generation is unchanged.
    pub fn reload<I>(&self, directives: I) -> Result<Arc<ResolvedConfiguration>>
    where
        I: IntoIterator,
        I::Item: Borrow<Directive>,
    {
        let _guard = self.reload_lock.lock();
        let resolved = match self.engine.resolve(directives) {
            Ok(resolved) => Arc::new(resolved),
            Err(e) => {
                log::error!(
                    "Config reload rejected, keeping generation {}: {e}",
                    self.generation()
                );
                return Err(e);
            }
        };
        self.current.store(Arc::clone(&resolved));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::info!("Config reloaded (generation {generation})");
        Ok(resolved)
    }

    /// [`ConfigStore::reload`] with the configuration source attached to the error.
    pub fn reload_with_context<I>(
        &self,
        source: &str,
        directives: I,
    ) -> anyhow::Result<Arc<ResolvedConfiguration>>
    where
        I: IntoIterator,
        I::Item: Borrow<Directive>,
    {
        self.reload(directives)
            .with_context(|| format!("Failed to reload configuration from {source}"))
    }
}
