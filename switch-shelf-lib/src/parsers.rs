//! Registry of structural container parsers.

use std::collections::BTreeMap;

use switch_shelf_core::{ContainerKind, ContainerParser};

/// Structural parsers keyed by the container kind they read.
///
/// Parsers live outside this workspace; frontends register whatever they
/// have. A kind with no parser falls back to filename parsing.
#[derive(Default)]
pub struct ContainerParsers {
    parsers: BTreeMap<ContainerKind, Box<dyn ContainerParser>>,
}

impl ContainerParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser for the kind it reports, replacing any earlier one.
    pub fn register<P: ContainerParser + 'static>(&mut self, parser: P) -> &mut Self {
        let kind = parser.kind();
        if self.parsers.insert(kind, Box::new(parser)).is_some() {
            log::debug!("Replaced {} parser", kind.display_name());
        }
        self
    }

    pub fn get(&self, kind: ContainerKind) -> Option<&dyn ContainerParser> {
        self.parsers.get(&kind).map(|p| p.as_ref())
    }

    pub fn supports(&self, kind: ContainerKind) -> bool {
        self.parsers.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }
}
