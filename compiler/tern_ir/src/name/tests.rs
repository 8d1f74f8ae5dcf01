use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parse_accepts_dotted_path() {
    let fq = FqName::new("com.example.Foo");
    assert_eq!(fq.segments().collect::<Vec<_>>(), vec!["com", "example", "Foo"]);
    assert_eq!(fq.segment_count(), 3);
    assert_eq!(fq.short_name(), "Foo");
}

#[test]
fn parse_empty_is_root() {
    let root = FqName::parse("");
    assert_eq!(root, Ok(FqName::root()));
    assert!(FqName::root().is_root());
    assert_eq!(FqName::root().segment_count(), 0);
    assert_eq!(FqName::root().parent(), None);
}

#[test]
fn parse_rejects_empty_segment() {
    assert_eq!(
        FqName::parse("ranges..IntRange"),
        Err(FqNameError::EmptySegment {
            text: "ranges..IntRange".to_owned(),
            position: 7,
        })
    );
    assert!(FqName::parse(".Foo").is_err());
    assert!(FqName::parse("Foo.").is_err());
}

#[test]
fn parse_rejects_invalid_char() {
    assert_eq!(
        FqName::parse("com.ex ample"),
        Err(FqNameError::InvalidChar {
            text: "com.ex ample".to_owned(),
            ch: ' ',
        })
    );
}

#[test]
#[should_panic(expected = "empty segment")]
fn new_panics_on_malformed_text() {
    let _ = FqName::new("a..b");
}

#[test]
fn parent_walks_up_to_root() {
    let fq = FqName::new("ranges.IntRange");
    let parent = fq.parent();
    assert_eq!(parent, Some(FqName::new("ranges")));
    assert_eq!(FqName::new("ranges").parent(), Some(FqName::root()));
}

#[test]
fn child_appends_segment() {
    let ranges = FqName::new("ranges");
    assert_eq!(ranges.child(&Name::new("IntRange")), FqName::new("ranges.IntRange"));
    assert_eq!(FqName::root().child(&Name::new("Int")), FqName::new("Int"));
}

#[test]
fn from_segments_joins_with_dots() {
    assert_eq!(
        FqName::from_segments(["com", "example", "Foo"]),
        FqName::new("com.example.Foo")
    );
}

#[test]
fn display_marks_root() {
    assert_eq!(FqName::root().to_string(), "<root>");
    assert_eq!(FqName::new("Int").to_string(), "Int");
    assert_eq!(Name::new("contains").to_string(), "contains");
}
