//! Metadata resolution for a single discovered file.
//!
//! Tries, in order: the metadata cache, a structural parser for the
//! container kind, and finally the bracketed tags in the filename. Only
//! structural results are written to the cache.

use serde::Serialize;
use switch_shelf_catalog::FilenameParser;
use switch_shelf_core::{ContainerError, ContentMap, DiscoveredFile, FileKind};
use switch_shelf_db::{KvStore, MetadataCache};

use crate::error::ResolveError;
use crate::parsers::ContainerParsers;

/// Where resolved metadata came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
    Cache,
    Container,
    FileName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub contents: ContentMap,
    pub source: MetadataSource,
}

/// Resolves content metadata for discovered files.
///
/// Deep scanning (cache plus structural parsers) is only attempted when
/// enabled, which normally means a usable key set was found. Without it
/// the cache is neither read nor written.
pub struct MetadataResolver<S: KvStore> {
    cache: Option<MetadataCache<S>>,
    parsers: ContainerParsers,
    names: FilenameParser,
    deep_scan: bool,
}

impl<S: KvStore> MetadataResolver<S> {
    pub fn new(cache: Option<MetadataCache<S>>, parsers: ContainerParsers, deep_scan: bool) -> Self {
        Self {
            cache,
            parsers,
            names: FilenameParser::new(),
            deep_scan,
        }
    }

    pub fn deep_scan(&self) -> bool {
        self.deep_scan
    }

    pub fn cache(&self) -> Option<&MetadataCache<S>> {
        self.cache.as_ref()
    }

    pub fn cache_mut(&mut self) -> Option<&mut MetadataCache<S>> {
        self.cache.as_mut()
    }

    pub fn parsers(&self) -> &ContainerParsers {
        &self.parsers
    }

    pub fn into_cache(self) -> Option<MetadataCache<S>> {
        self.cache
    }

    /// Resolve metadata for `file`, which discovery classified as `kind`.
    ///
    /// A structural parser failure is final: the filename is not consulted.
    pub fn resolve(&mut self, file: &DiscoveredFile, kind: FileKind) -> Result<Resolved, ResolveError> {
        if self.deep_scan {
            let fingerprint = file.fingerprint();

            if let Some(contents) = self.cache.as_ref().and_then(|c| c.get(&fingerprint)) {
                log::debug!("Cache hit for {}", file.name);
                return Ok(Resolved {
                    contents,
                    source: MetadataSource::Cache,
                });
            }

            if let FileKind::Container(container) = kind {
                if let Some(parser) = self.parsers.get(container) {
                    log::debug!("Cache miss for {}, reading {} metadata", file.name, parser.name());
                    let contents = parser
                        .parse(&file.path)
                        .and_then(|contents| {
                            if contents.is_empty() {
                                Err(ContainerError::missing_metadata("package lists no content"))
                            } else {
                                Ok(contents)
                            }
                        })
                        .map_err(|e| ResolveError::malformed(container, e))?;

                    if let Some(cache) = self.cache.as_mut() {
                        cache.put(&fingerprint, &contents);
                    }
                    return Ok(Resolved {
                        contents,
                        source: MetadataSource::Container,
                    });
                }
            }
        }

        let contents = self.names.parse_contents(&file.name)?;
        Ok(Resolved {
            contents,
            source: MetadataSource::FileName,
        })
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
