//! Raw declaration lookup.

use std::sync::Arc;

use tern_ir::FqName;

use crate::{Project, RawDeclaration, SearchScope};

/// Maps a qualified name to a raw declaration within an indexed scope.
///
/// The finder is authoritative: when several declarations share a name it
/// decides which one (if any) the name denotes.
pub trait Finder: Send + Sync {
    fn find_declaration(&self, fq_name: &FqName) -> Option<Arc<RawDeclaration>>;
}

/// Finder over a project's symbol index, restricted to a search scope.
///
/// Among several visible declarations with the same name, the first in
/// classpath order wins.
#[derive(Clone, Debug)]
pub struct ScopedFinder {
    project: Arc<Project>,
    scope: SearchScope,
}

impl ScopedFinder {
    pub fn new(project: Arc<Project>, scope: SearchScope) -> Self {
        ScopedFinder { project, scope }
    }
}

impl Finder for ScopedFinder {
    #[tracing::instrument(level = "trace", skip(self), fields(fq_name = %fq_name))]
    fn find_declaration(&self, fq_name: &FqName) -> Option<Arc<RawDeclaration>> {
        let mut visible = self
            .project
            .index
            .candidates(fq_name)
            .filter(|raw| self.scope.contains(raw.origin));
        let found = visible.next().cloned();
        if found.is_some() {
            let shadowed = visible.count();
            if shadowed > 0 {
                tracing::trace!(shadowed, "later declarations shadowed by classpath order");
            }
        }
        found
    }
}

#[cfg(test)]
mod tests;
