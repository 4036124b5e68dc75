//! Grammar model consumed by the resolvers.
//!
//! Only the parts resolvers need are modelled here: names, environment
//! metadata, and an assignable target per value.

use serde_json::Value as Json;
use std::cell::RefCell;
use std::fmt;

use crate::error::ParseError;
use crate::token::Scanner;

/// How a token is converted before it lands in a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    Float,
    /// Comma-separated strings, or a JSON array of scalars.
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::List => "list",
        };
        f.write_str(s)
    }
}

impl ValueKind {
    fn decode(self, name: &str, raw: Json) -> Result<Json, ParseError> {
        match (self, raw) {
            (Self::String, raw) => scalar_text(&raw)
                .map(Json::String)
                .ok_or_else(|| mismatch(name, self, &raw)),
            (Self::Bool, Json::Bool(b)) => Ok(Json::Bool(b)),
            (Self::Bool, Json::String(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Json::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Json::Bool(false)),
                _ => Err(invalid(name, self, &s, "expected true or false")),
            },
            (Self::Int, Json::Number(n)) => match n.as_i64() {
                Some(i) => Ok(Json::from(i)),
                None => Err(invalid(name, self, &n.to_string(), "not a 64-bit integer")),
            },
            (Self::Int, Json::String(s)) => s
                .parse::<i64>()
                .map(Json::from)
                .map_err(|e| invalid(name, self, &s, &e.to_string())),
            (Self::Float, Json::Number(n)) => Ok(Json::Number(n)),
            (Self::Float, Json::String(s)) => {
                let f = s
                    .parse::<f64>()
                    .map_err(|e| invalid(name, self, &s, &e.to_string()))?;
                serde_json::Number::from_f64(f)
                    .map(Json::Number)
                    .ok_or_else(|| invalid(name, self, &s, "not a finite number"))
            }
            (Self::List, Json::Array(items)) => items
                .iter()
                .map(|item| {
                    scalar_text(item)
                        .map(Json::String)
                        .ok_or_else(|| mismatch(name, self, item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array),
            (Self::List, Json::String(s)) if s.is_empty() => Ok(Json::Array(Vec::new())),
            (Self::List, Json::String(s)) => Ok(Json::Array(
                s.split(',').map(|part| Json::String(part.to_string())).collect(),
            )),
            (_, raw) => Err(mismatch(name, self, &raw)),
        }
    }
}

fn scalar_text(raw: &Json) -> Option<String> {
    match raw {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn mismatch(name: &str, expected: ValueKind, raw: &Json) -> ParseError {
    ParseError::Mismatch {
        name: name.to_string(),
        expected,
        got: raw.to_string(),
    }
}

fn invalid(name: &str, expected: ValueKind, got: &str, reason: &str) -> ParseError {
    ParseError::Invalid {
        name: name.to_string(),
        expected,
        got: format!("{got:?}"),
        reason: reason.to_string(),
    }
}

/// Metadata attached to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Candidate environment variables, consulted in order.
    pub envs: Vec<String>,
}

/// Assignment slot for a parsed value.
///
/// Interior mutability lets resolvers assign through a shared `&Context`.
#[derive(Debug, Clone, Default)]
pub struct Target(RefCell<Option<Json>>);

impl Target {
    pub fn get(&self) -> Option<Json> {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: Json) {
        *self.0.borrow_mut() = Some(value);
    }

    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }
}

/// A positional argument, catch-all argument, or the value half of a flag.
#[derive(Debug, Clone, Default)]
pub struct Value {
    pub name: String,
    pub kind: ValueKind,
    pub tag: Option<Tag>,
    pub target: Target,
}

impl Value {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tag: None,
            target: Target::default(),
        }
    }

    pub fn with_envs<I, S>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag
            .get_or_insert_with(Tag::default)
            .envs
            .extend(envs.into_iter().map(Into::into));
        self
    }

    pub fn envs(&self) -> &[String] {
        self.tag.as_ref().map_or(&[], |tag| tag.envs.as_slice())
    }

    /// Consume one token from `scan`, convert it per `kind`, and assign the target.
    pub fn parse(&self, scan: &mut Scanner) -> Result<(), ParseError> {
        let token = scan.pop().ok_or_else(|| ParseError::Missing {
            name: self.name.clone(),
        })?;
        let decoded = self.kind.decode(&self.name, token.into_value())?;
        self.target.set(decoded);
        Ok(())
    }
}

/// A declared option. Names are hyphen-separated (`log-level`).
#[derive(Debug, Clone, Default)]
pub struct Flag {
    pub value: Value,
}

impl Flag {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            value: Value::new(name, kind),
        }
    }

    pub fn with_envs<I, S>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = self.value.with_envs(envs);
        self
    }

    pub fn name(&self) -> &str {
        &self.value.name
    }

    pub fn envs(&self) -> &[String] {
        self.value.envs()
    }

    pub fn target(&self) -> &Target {
        &self.value.target
    }

    pub fn parse(&self, scan: &mut Scanner) -> Result<(), ParseError> {
        self.value.parse(scan)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Command {
    pub name: String,
    pub flags: Vec<Flag>,
    pub positional: Vec<Value>,
    /// Catch-all slot for remaining input.
    pub argument: Option<Value>,
    pub commands: Vec<Command>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn positional(mut self, value: Value) -> Self {
        self.positional.push(value);
        self
    }

    pub fn argument(mut self, value: Value) -> Self {
        self.argument = Some(value);
        self
    }

    pub fn subcommand(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// Root of a declared grammar.
#[derive(Debug, Clone, Default)]
pub struct Application {
    pub name: String,
    pub flags: Vec<Flag>,
    pub commands: Vec<Command>,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Every flag declared anywhere in the grammar, root first, depth-first.
    pub fn all_flags(&self) -> Vec<&Flag> {
        fn walk<'a>(commands: &'a [Command], out: &mut Vec<&'a Flag>) {
            for command in commands {
                out.extend(command.flags.iter());
                walk(&command.commands, out);
            }
        }

        let mut out: Vec<&Flag> = self.flags.iter().collect();
        walk(&self.commands, &mut out);
        out
    }
}
