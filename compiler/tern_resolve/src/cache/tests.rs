use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use pretty_assertions::assert_eq;
use rayon::prelude::*;
use tern_descriptors::ClassKind;

/// Resolver that knows a single name and counts how often it is asked.
struct CountingResolver {
    known: FqName,
    calls: AtomicUsize,
}

impl CountingResolver {
    fn knowing(name: &str) -> Self {
        CountingResolver {
            known: FqName::new(name),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ClassResolver for CountingResolver {
    fn resolve_class(&self, fq_name: &FqName) -> Option<Arc<ClassDescriptor>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (*fq_name == self.known).then(|| {
            Arc::new(ClassDescriptor::new(
                fq_name.clone(),
                ClassKind::Class,
                Vec::new(),
            ))
        })
    }
}

#[test]
fn second_lookup_is_a_hit() {
    let cache = CachedResolver::new(CountingResolver::knowing("ranges.IntRange"));
    let fq = FqName::new("ranges.IntRange");

    let (Some(first), Some(second)) = (cache.resolve_class(&fq), cache.resolve_class(&fq)) else {
        panic!("IntRange should resolve");
    };
    assert!(ClassDescriptor::same_declaration(&first, &second));
    assert_eq!(cache.inner().calls(), 1);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            entries: 1
        }
    );
}

#[test]
fn misses_are_cached() {
    let cache = CachedResolver::new(CountingResolver::knowing("ranges.IntRange"));
    let fq = FqName::new("com.example.Missing");

    assert!(cache.resolve_class(&fq).is_none());
    assert!(cache.resolve_class(&fq).is_none());
    assert_eq!(cache.inner().calls(), 1);
    assert_eq!(cache.peek(&fq), Some(CacheEntry::NotFound));
}

#[test]
fn peek_does_not_resolve() {
    let cache = CachedResolver::new(CountingResolver::knowing("ranges.IntRange"));
    assert_eq!(cache.peek(&FqName::new("ranges.IntRange")), None);
    assert_eq!(cache.inner().calls(), 0);
    assert_eq!(cache.stats(), CacheStats::default());
}

#[test]
fn concurrent_lookups_share_one_entry() {
    let cache = CachedResolver::new(CountingResolver::knowing("ranges.IntRange"));
    let fq = FqName::new("ranges.IntRange");

    let resolved: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| cache.resolve_class(&fq))
        .collect();

    let Some(CacheEntry::Found(cached)) = cache.peek(&fq) else {
        panic!("IntRange should be cached as found");
    };
    for descriptor in resolved {
        let Some(descriptor) = descriptor else {
            panic!("every lookup should find IntRange");
        };
        assert!(ClassDescriptor::same_declaration(&descriptor, &cached));
    }
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 64);
    assert_eq!(stats.entries, 1);
}
