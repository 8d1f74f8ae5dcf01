//! Project-wide symbol index and search scopes.
//!
//! The `SymbolIndex` is the externally indexed class table the finder
//! searches: raw, pre-semantic class declarations tagged with the origin
//! (source root or library) they were indexed from.
//!
//! # Design
//!
//! - Declarations stored once, in insertion (classpath) order
//! - `FxHashMap` from qualified name to every declaration with that name,
//!   so the finder can apply scope filtering and classpath precedence

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tern_descriptors::ClassKind;
use tern_ir::FqName;

/// Identifies the source root or library a declaration was indexed from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OriginId(u32);

impl OriginId {
    pub const fn new(raw: u32) -> Self {
        OriginId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Identifies one `SymbolIndex` for the lifetime of the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IndexId(u32);

impl IndexId {
    fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        IndexId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identifies a raw declaration: the index it lives in plus its slot there.
///
/// Ids from different indexes never compare equal, so a facade shared
/// between projects cannot confuse their declarations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RawDeclId {
    index: IndexId,
    slot: u32,
}

impl RawDeclId {
    /// The index this declaration belongs to.
    pub const fn index_id(self) -> IndexId {
        self.index
    }

    /// Position within its index.
    pub const fn slot(self) -> usize {
        self.slot as usize
    }
}

/// A class declaration as found in the index, before semantic conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawDeclaration {
    pub id: RawDeclId,
    pub fq_name: FqName,
    pub kind: ClassKind,
    /// Supertypes as written in the declaration.
    pub supertypes: Vec<FqName>,
    pub origin: OriginId,
}

/// Indexed class table for one project.
#[derive(Debug)]
pub struct SymbolIndex {
    id: IndexId,
    declarations: Vec<Arc<RawDeclaration>>,
    by_name: FxHashMap<FqName, SmallVec<[RawDeclId; 1]>>,
}

impl Default for SymbolIndex {
    fn default() -> Self {
        SymbolIndex {
            id: IndexId::fresh(),
            declarations: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> IndexId {
        self.id
    }

    /// Index a class declaration. Later insertions of the same name rank
    /// after earlier ones.
    pub fn insert(
        &mut self,
        fq_name: FqName,
        kind: ClassKind,
        supertypes: Vec<FqName>,
        origin: OriginId,
    ) -> RawDeclId {
        let slot = u32::try_from(self.declarations.len())
            .unwrap_or_else(|_| panic!("symbol index exceeds u32::MAX declarations"));
        let id = RawDeclId {
            index: self.id,
            slot,
        };
        self.by_name.entry(fq_name.clone()).or_default().push(id);
        self.declarations.push(Arc::new(RawDeclaration {
            id,
            fq_name,
            kind,
            supertypes,
            origin,
        }));
        id
    }

    /// All declarations named `fq_name`, in classpath order.
    pub fn candidates<'a>(
        &'a self,
        fq_name: &FqName,
    ) -> impl Iterator<Item = &'a Arc<RawDeclaration>> + 'a {
        self.by_name
            .get(fq_name)
            .into_iter()
            .flatten()
            .map(move |id| &self.declarations[id.slot()])
    }

    /// # Panics
    /// Panics if `id` belongs to another index.
    pub fn get(&self, id: RawDeclId) -> &Arc<RawDeclaration> {
        if id.index != self.id {
            panic!("internal compiler error: {id:?} does not belong to index {:?}", self.id);
        }
        &self.declarations[id.slot()]
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// A compiled project and its symbol index.
#[derive(Debug)]
pub struct Project {
    pub name: String,
    pub index: Arc<SymbolIndex>,
}

impl Project {
    pub fn new(name: &str, index: SymbolIndex) -> Arc<Self> {
        Arc::new(Project {
            name: name.to_owned(),
            index: Arc::new(index),
        })
    }
}

/// The part of a project's symbol universe a lookup may see.
#[derive(Clone, Debug)]
pub struct SearchScope {
    project: Option<Arc<Project>>,
    /// `None` means every origin is visible.
    origins: Option<FxHashSet<OriginId>>,
}

impl SearchScope {
    /// Every origin of `project`.
    pub fn all(project: Arc<Project>) -> Self {
        SearchScope {
            project: Some(project),
            origins: None,
        }
    }

    /// Only the listed origins of `project`.
    pub fn origins(project: Arc<Project>, origins: impl IntoIterator<Item = OriginId>) -> Self {
        SearchScope {
            project: Some(project),
            origins: Some(origins.into_iter().collect()),
        }
    }

    /// A scope with no project association.
    pub fn detached() -> Self {
        SearchScope {
            project: None,
            origins: None,
        }
    }

    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }

    pub fn contains(&self, origin: OriginId) -> bool {
        self.origins.as_ref().map_or(true, |set| set.contains(&origin))
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.project {
            Some(project) => write!(f, "{}", project.name)?,
            None => f.write_str("<no project>")?,
        }
        if let Some(origins) = &self.origins {
            let mut sorted: Vec<_> = origins.iter().map(|o| o.raw()).collect();
            sorted.sort_unstable();
            write!(f, " {sorted:?}")?;
        }
        Ok(())
    }
}
