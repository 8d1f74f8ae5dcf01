//! Per-name memoization of class resolution.
//!
//! `CachedResolver` wraps any [`ClassResolver`] and remembers every answer,
//! misses included, for the lifetime of the resolution session. Workers on
//! separate threads share one cache.
//!
//! # Thread Safety
//!
//! Backed by `DashMap`. A lookup never holds a shard reference while the
//! inner resolver runs, and the first answer inserted for a name wins, so
//! racing first lookups all observe the same entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tern_descriptors::ClassDescriptor;
use tern_ir::FqName;

use crate::ClassResolver;

/// A remembered resolution outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheEntry {
    Found(Arc<ClassDescriptor>),
    NotFound,
}

impl CacheEntry {
    fn to_option(&self) -> Option<Arc<ClassDescriptor>> {
        match self {
            CacheEntry::Found(descriptor) => Some(Arc::clone(descriptor)),
            CacheEntry::NotFound => None,
        }
    }
}

impl From<Option<Arc<ClassDescriptor>>> for CacheEntry {
    fn from(found: Option<Arc<ClassDescriptor>>) -> Self {
        found.map_or(CacheEntry::NotFound, CacheEntry::Found)
    }
}

/// Snapshot of cache effectiveness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Memoizing wrapper over a [`ClassResolver`].
pub struct CachedResolver<R> {
    inner: R,
    entries: DashMap<FqName, CacheEntry>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<R: ClassResolver> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        CachedResolver {
            inner,
            entries: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// The wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// The cached outcome for `fq_name`, without resolving it.
    pub fn peek(&self, fq_name: &FqName) -> Option<CacheEntry> {
        self.entries.get(fq_name).map(|entry| entry.value().clone())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl<R: ClassResolver> ClassResolver for CachedResolver<R> {
    fn resolve_class(&self, fq_name: &FqName) -> Option<Arc<ClassDescriptor>> {
        if let Some(entry) = self.entries.get(fq_name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return entry.value().to_option();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolved = CacheEntry::from(self.inner.resolve_class(fq_name));
        tracing::trace!(
            fq_name = %fq_name,
            found = matches!(resolved, CacheEntry::Found(_)),
            "caching resolution"
        );

        // A racing thread may have inserted first; keep its entry.
        let entry = self.entries.entry(fq_name.clone()).or_insert(resolved);
        entry.value().to_option()
    }
}

#[cfg(test)]
mod tests;
