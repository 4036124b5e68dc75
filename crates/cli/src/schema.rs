use anyhow::{Context, Result};
use argsource::{Application, Command, Flag, Value, ValueKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Grammar description loaded from JSON.
///
/// ```json
/// {
///   "name": "app",
///   "flags": [{ "name": "log-level", "env": ["APP_LOG_LEVEL"] }],
///   "commands": [{
///     "name": "serve",
///     "positional": [{ "name": "port", "kind": "int", "env": ["PORT"] }]
///   }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppSchema {
    pub name: String,
    #[serde(default)]
    pub flags: Vec<ArgSchema>,
    #[serde(default)]
    pub commands: Vec<CommandSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandSchema {
    pub name: String,
    #[serde(default)]
    pub flags: Vec<ArgSchema>,
    #[serde(default)]
    pub positional: Vec<ArgSchema>,
    #[serde(default)]
    pub argument: Option<ArgSchema>,
    #[serde(default)]
    pub commands: Vec<CommandSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSchema {
    pub name: String,
    #[serde(default)]
    pub kind: KindSchema,
    #[serde(default, alias = "envs")]
    pub env: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindSchema {
    #[default]
    String,
    Bool,
    Int,
    Float,
    List,
}

impl From<KindSchema> for ValueKind {
    fn from(kind: KindSchema) -> Self {
        match kind {
            KindSchema::String => Self::String,
            KindSchema::Bool => Self::Bool,
            KindSchema::Int => Self::Int,
            KindSchema::Float => Self::Float,
            KindSchema::List => Self::List,
        }
    }
}

impl ArgSchema {
    fn into_value(self) -> Value {
        let value = Value::new(self.name, self.kind.into());
        // Untagged values are skipped by the environment walk.
        if self.env.is_empty() {
            value
        } else {
            value.with_envs(self.env)
        }
    }

    fn into_flag(self) -> Flag {
        Flag {
            value: self.into_value(),
        }
    }
}

impl CommandSchema {
    fn into_command(self) -> Command {
        Command {
            name: self.name,
            flags: self.flags.into_iter().map(ArgSchema::into_flag).collect(),
            positional: self
                .positional
                .into_iter()
                .map(ArgSchema::into_value)
                .collect(),
            argument: self.argument.map(ArgSchema::into_value),
            commands: self
                .commands
                .into_iter()
                .map(CommandSchema::into_command)
                .collect(),
        }
    }
}

impl AppSchema {
    pub fn into_application(self) -> Application {
        Application {
            name: self.name,
            flags: self.flags.into_iter().map(ArgSchema::into_flag).collect(),
            commands: self
                .commands
                .into_iter()
                .map(CommandSchema::into_command)
                .collect(),
        }
    }
}

pub fn load_schema(path: &Path) -> Result<AppSchema> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    let schema: AppSchema = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse schema JSON: {}", path.display()))?;
    Ok(schema)
}
