use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use switch_shelf_catalog::FilenameError;
use switch_shelf_core::{ContainerKind, ContainerParser, ContentAttributes, TitleId, single_content};
use switch_shelf_db::MemoryStore;

use super::*;

/// Parser that returns fixed metadata and counts how often it runs.
struct CountingParser {
    kind: ContainerKind,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl ContainerParser for CountingParser {
    fn kind(&self) -> ContainerKind {
        self.kind
    }

    fn parse(&self, _path: &Path) -> Result<ContentMap, ContainerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ContainerError::invalid_format("bad PFS0 magic"));
        }
        let id = TitleId::parse("0100aaaabbbb0000").unwrap();
        Ok(single_content(
            ContentAttributes::new(id, 0).with_name("Parsed Title"),
        ))
    }
}

fn resolver(deep_scan: bool, fail: bool) -> (MetadataResolver<MemoryStore>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut parsers = ContainerParsers::new();
    parsers.register(CountingParser {
        kind: ContainerKind::Nsp,
        calls: Arc::clone(&calls),
        fail,
    });
    let cache = MetadataCache::open(MemoryStore::new(), "1.0.0").unwrap();
    (MetadataResolver::new(Some(cache), parsers, deep_scan), calls)
}

fn nsp(name: &str) -> DiscoveredFile {
    DiscoveredFile::new(format!("/games/{name}"), 4096)
}

#[test]
fn test_second_resolve_is_cache_hit() {
    let (mut resolver, calls) = resolver(true, false);
    let file = nsp("Game [0100AAAABBBB0000][v0].nsp");

    let first = resolver.resolve(&file, file.kind()).unwrap();
    assert_eq!(first.source, MetadataSource::Container);

    let second = resolver.resolve(&file, file.kind()).unwrap();
    assert_eq!(second.source, MetadataSource::Cache);
    assert_eq!(second.contents, first.contents);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.cache().unwrap().entry_count().unwrap(), 1);
}

#[test]
fn test_fingerprint_change_misses_cache() {
    let (mut resolver, calls) = resolver(true, false);
    let file = nsp("Game.nsp");
    let mut grown = file.clone();
    grown.size += 1;

    resolver.resolve(&file, file.kind()).unwrap();
    resolver.resolve(&grown, grown.kind()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_parser_failure_is_malformed_without_fallback() {
    let (mut resolver, _calls) = resolver(true, true);
    // The name would parse, but a failed structural read is final.
    let file = nsp("Game [0100AAAABBBB0000][v0].nsp");

    let err = resolver.resolve(&file, file.kind()).unwrap_err();
    assert!(matches!(err, ResolveError::Malformed { kind: "NSP", .. }));
    assert_eq!(resolver.cache().unwrap().entry_count().unwrap(), 0);
}

#[test]
fn test_without_deep_scan_uses_filename_only() {
    let (mut resolver, calls) = resolver(false, false);
    let file = nsp("Game [0100AAAABBBB0800][v65536].nsp");

    let resolved = resolver.resolve(&file, file.kind()).unwrap();
    assert_eq!(resolved.source, MetadataSource::FileName);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(resolver.cache().unwrap().entry_count().unwrap(), 0);
}

#[test]
fn test_kind_without_parser_falls_back_to_filename() {
    let (mut resolver, calls) = resolver(true, false);
    let file = nsp("Game [0100AAAABBBB0000][v0].xci");

    let resolved = resolver.resolve(&file, file.kind()).unwrap();
    assert_eq!(resolved.source, MetadataSource::FileName);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    // filename guesses are never cached
    assert_eq!(resolver.cache().unwrap().entry_count().unwrap(), 0);
}

#[test]
fn test_unresolved_filename() {
    let (mut resolver, _calls) = resolver(false, false);
    let file = nsp("Some Game [v65536].nsp");

    let err = resolver.resolve(&file, file.kind()).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Unresolved(FilenameError::NoTitleIdFound)
    ));
}

#[test]
fn test_empty_parser_result_is_malformed() {
    struct EmptyParser;
    impl ContainerParser for EmptyParser {
        fn kind(&self) -> ContainerKind {
            ContainerKind::Nsp
        }
        fn parse(&self, _path: &Path) -> Result<ContentMap, ContainerError> {
            Ok(ContentMap::new())
        }
    }

    let mut parsers = ContainerParsers::new();
    parsers.register(EmptyParser);
    let mut resolver = MetadataResolver::<MemoryStore>::new(None, parsers, true);
    let file = nsp("Game [0100AAAABBBB0000][v0].nsp");

    assert!(matches!(
        resolver.resolve(&file, file.kind()),
        Err(ResolveError::Malformed { .. })
    ));
}

#[test]
fn test_deep_scan_without_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut parsers = ContainerParsers::new();
    parsers.register(CountingParser {
        kind: ContainerKind::Nsp,
        calls: Arc::clone(&calls),
        fail: false,
    });
    let mut resolver = MetadataResolver::<MemoryStore>::new(None, parsers, true);
    let file = nsp("Game.nsp");

    resolver.resolve(&file, file.kind()).unwrap();
    resolver.resolve(&file, file.kind()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_registry_replaces_by_kind() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let mut parsers = ContainerParsers::new();
    parsers
        .register(CountingParser {
            kind: ContainerKind::Xci,
            calls: Arc::clone(&first),
            fail: false,
        })
        .register(CountingParser {
            kind: ContainerKind::Xci,
            calls: Arc::clone(&second),
            fail: false,
        });

    assert_eq!(parsers.len(), 1);
    assert!(parsers.supports(ContainerKind::Xci));
    assert!(!parsers.supports(ContainerKind::Split));

    let parser = parsers.get(ContainerKind::Xci).unwrap();
    parser.parse(Path::new("/games/x.xci")).unwrap();
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}
