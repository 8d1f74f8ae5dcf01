//! The qualified-name resolver.

use std::sync::Arc;

use tern_descriptors::ClassDescriptor;
use tern_ir::FqName;

use crate::{Finder, ResolutionFacade, ResolverConfigError, ScopedFinder, SearchScope};

/// Resolves a fully-qualified name to a class descriptor.
///
/// `None` means the name denotes no class in the searched universe; it is
/// not an error.
pub trait ClassResolver: Send + Sync {
    fn resolve_class(&self, fq_name: &FqName) -> Option<Arc<ClassDescriptor>>;
}

/// Resolver over a finder/facade pair.
///
/// Holds no mutable state of its own; caching belongs to the facade (per
/// declaration) and to [`CachedResolver`](crate::CachedResolver) (per name).
#[derive(Clone)]
pub struct QualifiedNameResolver {
    finder: Arc<dyn Finder>,
    facade: Arc<dyn ResolutionFacade>,
}

impl QualifiedNameResolver {
    pub fn new(finder: Arc<dyn Finder>, facade: Arc<dyn ResolutionFacade>) -> Self {
        QualifiedNameResolver { finder, facade }
    }

    /// Build a resolver whose finder searches `scope` within its project.
    pub fn try_from_search_scope(
        scope: SearchScope,
        facade: Arc<dyn ResolutionFacade>,
    ) -> Result<Self, ResolverConfigError> {
        let Some(project) = scope.project().cloned() else {
            return Err(ResolverConfigError::NoProject {
                scope: scope.to_string(),
            });
        };
        tracing::debug!(project = %project.name, %scope, "creating scoped resolver");
        Ok(Self::new(Arc::new(ScopedFinder::new(project, scope)), facade))
    }

    /// Build a resolver whose finder searches `scope` within its project.
    ///
    /// # Panics
    /// Panics if `scope` has no associated project. That is a defect in the
    /// caller's configuration, not a resolution outcome.
    pub fn from_search_scope(scope: SearchScope, facade: Arc<dyn ResolutionFacade>) -> Self {
        Self::try_from_search_scope(scope, facade).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl ClassResolver for QualifiedNameResolver {
    #[tracing::instrument(level = "trace", skip(self), fields(fq_name = %fq_name))]
    fn resolve_class(&self, fq_name: &FqName) -> Option<Arc<ClassDescriptor>> {
        let Some(raw) = self.finder.find_declaration(fq_name) else {
            tracing::trace!("no declaration found");
            return None;
        };
        Some(self.facade.descriptor_for(&raw))
    }
}

#[cfg(test)]
mod tests;
