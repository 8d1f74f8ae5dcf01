//! Qualified-name resolution.
//!
//! Resolves a fully-qualified name to a `ClassDescriptor` by delegating
//! lookup to a [`Finder`] and conversion to a [`ResolutionFacade`]:
//!
//! ```text
//! FqName ──Finder──▶ RawDeclaration ──ResolutionFacade──▶ Arc<ClassDescriptor>
//! ```
//!
//! "Not found" is a normal outcome (`None`), never an error. Building a
//! resolver from a search scope with no project is a configuration error.
//!
//! # Sessions and Concurrency
//!
//! A resolution session is one project/search-scope pair. Its finder and
//! facade may be queried by several worker threads at once; the facade
//! memoizes behind a `parking_lot::RwLock`, and [`CachedResolver`] memoizes
//! whole lookups (including misses) in a `DashMap`. Both are discarded with
//! the session.

mod cache;
mod error;
mod facade;
mod finder;
mod index;
mod resolver;

pub use cache::{CacheEntry, CacheStats, CachedResolver};
pub use error::ResolverConfigError;
pub use facade::{LazyResolutionFacade, ResolutionFacade};
pub use finder::{Finder, ScopedFinder};
pub use index::{
    IndexId, OriginId, Project, RawDeclId, RawDeclaration, SearchScope, SymbolIndex,
};
pub use resolver::{ClassResolver, QualifiedNameResolver};
