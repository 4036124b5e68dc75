//! Resolver backed by a decoded JSON document.

use serde_json::{Map, Value as Json};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path as FsPath;
use std::str::FromStr;

use crate::context::{Context, Path};
use crate::error::{Error, Result};
use crate::model::{Application, Flag};
use crate::naming;
use crate::resolver::Resolver;

/// Resolves flags from a JSON object decoded once at construction.
///
/// For a flag `my-flag` the lookups are, in order: top-level `my_flag`,
/// top-level `myFlag`, then the nested path `my` / `flag`.
#[derive(Debug, Clone)]
pub struct JsonResolver {
    document: Map<String, Json>,
    strict: bool,
}

impl JsonResolver {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: Map<String, Json> = serde_json::from_reader(reader)?;
        tracing::debug!(keys = document.len(), "decoded configuration document");
        Ok(Self::from_document(document))
    }

    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).inspect(|_| {
            tracing::debug!(path = %path.display(), "loaded configuration file");
        })
    }

    /// Decode the first of `paths` that exists; `Ok(None)` if none do.
    pub fn from_first_existing<I, P>(paths: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<FsPath>,
    {
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                tracing::trace!(path = %path.display(), "configuration file not found");
                continue;
            }
            return Self::from_path(path).map(Some);
        }
        Ok(None)
    }

    pub fn from_document(document: Map<String, Json>) -> Self {
        Self {
            document,
            strict: false,
        }
    }

    /// Make [`Resolver::validate`] reject top-level keys no declared flag maps to.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Look up the value a flag named `name` maps to.
    pub fn lookup(&self, name: &str) -> Option<&Json> {
        if let Some(value) = self.document.get(&naming::underscore(name)) {
            return Some(value);
        }
        if let Some(value) = self.document.get(&naming::camel(name)) {
            return Some(value);
        }

        let mut segments = naming::path_segments(name).into_iter();
        let first = segments.next()?;
        let mut current = self.document.get(&first)?;
        for segment in segments {
            let Json::Object(map) = current else {
                return None;
            };
            current = map.get(&segment)?;
        }
        Some(current)
    }
}

impl FromStr for JsonResolver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

impl Resolver for JsonResolver {
    fn validate(&self, app: &Application) -> Result<()> {
        if !self.strict {
            return Ok(());
        }

        let mut known: HashSet<String> = HashSet::new();
        for flag in app.all_flags() {
            known.insert(naming::underscore(flag.name()));
            known.insert(naming::camel(flag.name()));
            let segments = naming::path_segments(flag.name());
            if segments.len() > 1 {
                known.extend(segments.into_iter().next());
            }
        }

        match self.document.keys().find(|key| !known.contains(key.as_str())) {
            Some(key) => Err(Error::UnknownKey { key: key.clone() }),
            None => Ok(()),
        }
    }

    fn resolve(&self, _context: &Context<'_>, _parent: &Path<'_>, flag: &Flag) -> Result<Option<Json>> {
        let value = self.lookup(flag.name()).cloned();
        if value.is_none() {
            tracing::trace!(flag = flag.name(), "no configuration value");
        }
        Ok(value)
    }
}
