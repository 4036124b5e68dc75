use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::model::{Application, Command, Flag};
use crate::resolver::Resolver;
use crate::token::{Scanner, Token};

/// One segment of the invocation chain.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    /// `None` for the application root.
    pub command: Option<&'a Command>,
    pub flags: &'a [Flag],
}

/// A resolved invocation: the root segment followed by each selected command.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    pub app: &'a Application,
    pub path: Vec<Path<'a>>,
}

impl<'a> Context<'a> {
    /// Select the command chain named by `commands`, starting at the root.
    pub fn new(app: &'a Application, commands: &[&str]) -> Result<Self> {
        let mut path = vec![Path {
            command: None,
            flags: &app.flags,
        }];
        let mut children = app.commands.as_slice();
        for name in commands {
            let command = children
                .iter()
                .find(|c| c.name == *name)
                .ok_or_else(|| Error::UnknownCommand {
                    name: name.to_string(),
                })?;
            path.push(Path {
                command: Some(command),
                flags: &command.flags,
            });
            children = &command.commands;
        }
        Ok(Self { app, path })
    }

    /// The innermost selected command, if any.
    pub fn command(&self) -> Option<&'a Command> {
        self.path.iter().rev().find_map(|p| p.command)
    }

    /// Fill every flag that has no value yet from `resolvers`.
    ///
    /// Resolvers are consulted in order and the first one with a value wins.
    /// A `null` value counts as no value and falls through to the next resolver.
    pub fn apply_resolvers(&self, resolvers: &[&dyn Resolver]) -> Result<()> {
        for path in &self.path {
            for flag in path.flags {
                if flag.target().is_set() {
                    continue;
                }
                for resolver in resolvers {
                    let value = match resolver.resolve(self, path, flag)? {
                        Some(Json::Null) => {
                            tracing::trace!(flag = flag.name(), "resolved null, trying next resolver");
                            continue;
                        }
                        Some(value) => value,
                        None => continue,
                    };
                    tracing::debug!(flag = flag.name(), %value, "resolved flag value");
                    let mut scan = Scanner::from_tokens([Token::typed(value.clone())]);
                    flag.parse(&mut scan).map_err(|source| Error::Flag {
                        name: flag.name().to_string(),
                        value,
                        source,
                    })?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Names and current target values of every flag, positional, and argument on the path.
    pub fn values(&self) -> Vec<(&'a str, Option<Json>)> {
        let mut out = Vec::new();
        for path in &self.path {
            for flag in path.flags {
                out.push((flag.name(), flag.target().get()));
            }
            let Some(command) = path.command else {
                continue;
            };
            for value in command.positional.iter().chain(command.argument.as_ref()) {
                out.push((value.name.as_str(), value.target.get()));
            }
        }
        out
    }
}
