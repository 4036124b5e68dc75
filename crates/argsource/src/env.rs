//! Resolver backed by environment variables.

use serde_json::Value as Json;
use std::collections::HashMap;

use crate::context::{Context, Path};
use crate::error::{Error, Result};
use crate::model::{Flag, Value};
use crate::once::OnceGate;
use crate::resolver::Resolver;
use crate::token::{Scanner, Token};

#[derive(Debug, Clone)]
enum Source {
    Process,
    Fixed(HashMap<String, String>),
}

/// Resolves flags from the first set variable in their `envs` list.
///
/// The owning loop only visits flags, so on its first `resolve` call this
/// resolver also walks the context path once and assigns environment values
/// directly into every positional and catch-all argument that declares
/// variables. That walk never runs again for the same instance, even across
/// separate parses.
#[derive(Debug)]
pub struct EnvResolver {
    source: Source,
    args_resolved: OnceGate,
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvResolver {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self {
            source: Source::Process,
            args_resolved: OnceGate::new(),
        }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            source: Source::Fixed(vars),
            args_resolved: OnceGate::new(),
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.source {
            Source::Process => {
                std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
            }
            Source::Fixed(vars) => vars.get(name).cloned(),
        }
    }

    fn resolve_args(&self, paths: &[Path<'_>]) -> Result<()> {
        tracing::debug!(segments = paths.len(), "assigning environment values to arguments");
        for path in paths {
            let Some(command) = path.command else {
                continue;
            };
            for positional in &command.positional {
                if positional.tag.is_none() {
                    continue;
                }
                self.visit_value(positional)?;
            }
            if let Some(argument) = &command.argument {
                self.visit_value(argument)?;
            }
        }
        Ok(())
    }

    /// Apply every set variable in order; the last one parsed wins.
    fn visit_value(&self, value: &Value) -> Result<()> {
        for var in value.envs() {
            let Some(raw) = self.lookup(var) else {
                continue;
            };
            let mut scan = Scanner::from_tokens([Token::flag_value(raw.as_str())]);
            value.parse(&mut scan).map_err(|source| Error::Assignment {
                var: var.clone(),
                value: raw.clone(),
                source,
            })?;
            tracing::debug!(argument = %value.name, var = %var, "assigned from environment");
        }
        Ok(())
    }
}

impl Resolver for EnvResolver {
    fn resolve(&self, context: &Context<'_>, _parent: &Path<'_>, flag: &Flag) -> Result<Option<Json>> {
        self.args_resolved.run(|| self.resolve_args(&context.path))?;

        for var in flag.envs() {
            if let Some(raw) = self.lookup(var) {
                tracing::debug!(flag = flag.name(), var = %var, "found environment value");
                return Ok(Some(Json::String(raw)));
            }
        }
        Ok(None)
    }
}
