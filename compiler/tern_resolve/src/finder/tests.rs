use super::*;
use crate::{OriginId, SymbolIndex};
use pretty_assertions::assert_eq;
use tern_descriptors::ClassKind;

const SOURCES: OriginId = OriginId::new(0);
const LIBRARY: OriginId = OriginId::new(1);

fn project() -> Arc<Project> {
    let mut index = SymbolIndex::new();
    index.insert(FqName::new("com.example.Foo"), ClassKind::Class, Vec::new(), SOURCES);
    index.insert(FqName::new("com.example.Foo"), ClassKind::Interface, Vec::new(), LIBRARY);
    index.insert(FqName::new("lib.Util"), ClassKind::Object, Vec::new(), LIBRARY);
    Project::new("app", index)
}

#[test]
fn finds_first_visible_declaration() {
    let project = project();
    let finder = ScopedFinder::new(Arc::clone(&project), SearchScope::all(project));
    let Some(found) = finder.find_declaration(&FqName::new("com.example.Foo")) else {
        panic!("Foo should be found");
    };
    assert_eq!(found.kind, ClassKind::Class);
    assert_eq!(found.origin, SOURCES);
}

#[test]
fn scope_hides_other_origins() {
    let project = project();
    let finder = ScopedFinder::new(
        Arc::clone(&project),
        SearchScope::origins(Arc::clone(&project), [LIBRARY]),
    );
    let Some(found) = finder.find_declaration(&FqName::new("com.example.Foo")) else {
        panic!("library Foo should be found");
    };
    assert_eq!(found.kind, ClassKind::Interface);

    let sources_only =
        ScopedFinder::new(Arc::clone(&project), SearchScope::origins(project, [SOURCES]));
    assert!(sources_only.find_declaration(&FqName::new("lib.Util")).is_none());
}

#[test]
fn unknown_name_is_absent() {
    let project = project();
    let finder = ScopedFinder::new(Arc::clone(&project), SearchScope::all(project));
    assert!(finder.find_declaration(&FqName::new("com.example.Missing")).is_none());
}
