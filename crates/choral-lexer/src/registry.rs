//! A registry of grammars, keyed by tag.

use std::collections::HashMap;
use std::path::Path;

use crate::{Grammar, choral};

/// Holds grammars and answers lookups by tag, filename, or MIME type.
#[derive(Debug, Default)]
pub struct Registry {
    grammars: HashMap<String, Grammar>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in Choral grammar registered.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(choral::grammar());
        registry
    }

    /// Register a grammar under its tag, replacing any grammar already
    /// registered under the same tag.
    pub fn register(&mut self, grammar: Grammar) {
        self.grammars.insert(grammar.tag().to_string(), grammar);
    }

    /// Look up a grammar by its tag.
    pub fn by_tag(&self, tag: &str) -> Option<&Grammar> {
        self.grammars.get(tag)
    }

    /// Find a grammar whose filename globs match the file name of `path`.
    pub fn for_path(&self, path: &Path) -> Option<&Grammar> {
        let filename = path.file_name()?.to_str()?;
        self.grammars
            .values()
            .find(|g| g.matches_filename(filename))
    }

    /// Find a grammar claiming the given MIME type.
    pub fn for_mimetype(&self, mimetype: &str) -> Option<&Grammar> {
        self.grammars
            .values()
            .find(|g| g.matches_mimetype(mimetype))
    }

    /// The tags of all registered grammars, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }
}
