//! Conversion of raw declarations into class descriptors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tern_descriptors::ClassDescriptor;

use crate::{RawDeclId, RawDeclaration};

/// Converts a raw declaration into its semantic descriptor.
///
/// Implementations memoize: converting the same declaration twice in one
/// session must not resolve it again.
pub trait ResolutionFacade: Send + Sync {
    fn descriptor_for(&self, raw: &RawDeclaration) -> Arc<ClassDescriptor>;
}

/// Memoizing facade.
///
/// Memoized by [`RawDeclId`], which is unique across indexes, so one facade
/// may serve several projects. Supertypes stay as qualified names and are
/// resolved only when a consumer asks for them, so conversion never recurses
/// into the index.
///
/// # Thread Safety
/// Read-locked fast path, write-locked slow path with a second check, so
/// racing first conversions of one declaration converge on a single
/// descriptor instance.
#[derive(Debug, Default)]
pub struct LazyResolutionFacade {
    converted: RwLock<FxHashMap<RawDeclId, Arc<ClassDescriptor>>>,
    conversions: AtomicUsize,
}

impl LazyResolutionFacade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declarations actually converted (cache misses).
    pub fn conversion_count(&self) -> usize {
        self.conversions.load(Ordering::Relaxed)
    }

    fn convert(&self, raw: &RawDeclaration) -> Arc<ClassDescriptor> {
        self.conversions.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(fq_name = %raw.fq_name, kind = %raw.kind, "converting raw declaration");
        Arc::new(ClassDescriptor::new(
            raw.fq_name.clone(),
            raw.kind,
            raw.supertypes.clone(),
        ))
    }
}

impl ResolutionFacade for LazyResolutionFacade {
    fn descriptor_for(&self, raw: &RawDeclaration) -> Arc<ClassDescriptor> {
        // Fast path: already converted
        if let Some(descriptor) = self.converted.read().get(&raw.id) {
            return Arc::clone(descriptor);
        }

        let mut guard = self.converted.write();

        // Double-check after acquiring write lock
        if let Some(descriptor) = guard.get(&raw.id) {
            return Arc::clone(descriptor);
        }

        let descriptor = self.convert(raw);
        guard.insert(raw.id, Arc::clone(&descriptor));
        descriptor
    }
}
