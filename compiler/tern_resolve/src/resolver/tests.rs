use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{LazyResolutionFacade, OriginId, Project, RawDeclaration, SymbolIndex};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use tern_descriptors::ClassKind;

/// Finder over a fixed map, counting lookups.
#[derive(Default)]
struct MapFinder {
    declarations: FxHashMap<FqName, Arc<RawDeclaration>>,
    lookups: AtomicUsize,
}

impl MapFinder {
    fn with(names: &[&str]) -> Self {
        let mut index = SymbolIndex::new();
        for name in names {
            index.insert(FqName::new(name), ClassKind::Class, Vec::new(), OriginId::new(0));
        }
        let declarations = names
            .iter()
            .map(|name| {
                let fq_name = FqName::new(name);
                let Some(raw) = index.candidates(&fq_name).next() else {
                    panic!("{name} should be indexed");
                };
                (fq_name, Arc::clone(raw))
            })
            .collect();
        MapFinder {
            declarations,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl Finder for MapFinder {
    fn find_declaration(&self, fq_name: &FqName) -> Option<Arc<RawDeclaration>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.declarations.get(fq_name).cloned()
    }
}

#[test]
fn resolves_known_class() {
    let resolver = QualifiedNameResolver::new(
        Arc::new(MapFinder::with(&["com.example.Foo"])),
        Arc::new(LazyResolutionFacade::new()),
    );
    let Some(descriptor) = resolver.resolve_class(&FqName::new("com.example.Foo")) else {
        panic!("Foo should resolve");
    };
    assert_eq!(descriptor.fq_name.as_str(), "com.example.Foo");
}

#[test]
fn unknown_class_is_absent() {
    let resolver = QualifiedNameResolver::new(
        Arc::new(MapFinder::with(&[])),
        Arc::new(LazyResolutionFacade::new()),
    );
    assert!(resolver.resolve_class(&FqName::new("com.example.Foo")).is_none());
}

#[test]
fn repeated_resolution_is_equal() {
    let facade = Arc::new(LazyResolutionFacade::new());
    let resolver = QualifiedNameResolver::new(
        Arc::new(MapFinder::with(&["com.example.Foo"])),
        Arc::clone(&facade) as Arc<dyn ResolutionFacade>,
    );
    let fq = FqName::new("com.example.Foo");
    let (Some(first), Some(second)) = (resolver.resolve_class(&fq), resolver.resolve_class(&fq))
    else {
        panic!("Foo should resolve twice");
    };
    assert_eq!(first.fq_name, second.fq_name);
    assert_eq!(first.kind, second.kind);
    assert_eq!(facade.conversion_count(), 1);
}

#[test]
fn factory_derives_finder_from_scope() {
    let mut index = SymbolIndex::new();
    index.insert(FqName::new("com.example.Foo"), ClassKind::Object, Vec::new(), OriginId::new(3));
    let project = Project::new("app", index);

    let resolver = QualifiedNameResolver::from_search_scope(
        SearchScope::all(project),
        Arc::new(LazyResolutionFacade::new()),
    );
    let Some(descriptor) = resolver.resolve_class(&FqName::new("com.example.Foo")) else {
        panic!("Foo should resolve");
    };
    assert_eq!(descriptor.kind, ClassKind::Object);
}

#[test]
fn factory_rejects_scope_without_project() {
    let result = QualifiedNameResolver::try_from_search_scope(
        SearchScope::detached(),
        Arc::new(LazyResolutionFacade::new()),
    );
    let Err(err) = result else {
        panic!("detached scope should be rejected");
    };
    assert_eq!(
        err,
        ResolverConfigError::NoProject {
            scope: "<no project>".to_owned()
        }
    );
}

#[test]
#[should_panic(expected = "has no associated project")]
fn factory_panics_on_scope_without_project() {
    let _ = QualifiedNameResolver::from_search_scope(
        SearchScope::detached(),
        Arc::new(LazyResolutionFacade::new()),
    );
}

#[test]
fn finder_result_is_authoritative() {
    let finder = Arc::new(MapFinder::with(&["com.example.Foo"]));
    let resolver = QualifiedNameResolver::new(
        Arc::clone(&finder) as Arc<dyn Finder>,
        Arc::new(LazyResolutionFacade::new()),
    );
    let _ = resolver.resolve_class(&FqName::new("com.example.Foo"));
    let _ = resolver.resolve_class(&FqName::new("com.example.Foo"));
    // The resolver itself does not cache; every call reaches the finder.
    assert_eq!(finder.lookups.load(Ordering::Relaxed), 2);
}

#[test]
fn one_facade_serves_several_projects() {
    let project = |name: &str, class: &str| {
        let mut index = SymbolIndex::new();
        index.insert(FqName::new(class), ClassKind::Class, Vec::new(), OriginId::new(0));
        Project::new(name, index)
    };
    let facade: Arc<dyn ResolutionFacade> = Arc::new(LazyResolutionFacade::new());
    let first = QualifiedNameResolver::from_search_scope(
        SearchScope::all(project("first", "a.Foo")),
        Arc::clone(&facade),
    );
    let second = QualifiedNameResolver::from_search_scope(
        SearchScope::all(project("second", "b.Bar")),
        facade,
    );

    let (Some(foo), Some(bar)) = (
        first.resolve_class(&FqName::new("a.Foo")),
        second.resolve_class(&FqName::new("b.Bar")),
    ) else {
        panic!("each project should resolve its own class");
    };
    assert_eq!(foo.fq_name.as_str(), "a.Foo");
    assert_eq!(bar.fq_name.as_str(), "b.Bar");
    assert!(second.resolve_class(&FqName::new("a.Foo")).is_none());
}
