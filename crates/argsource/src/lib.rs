//! Pluggable flag value resolution for command-line parsers.
//!
//! When a flag has no value on the command line, the owning parser asks each
//! registered [`Resolver`] in turn. Two resolvers are provided:
//! - [`JsonResolver`] looks flags up in a decoded JSON document
//!   (`my-flag` -> `my_flag`, `myFlag`, or the nested path `my` / `flag`)
//! - [`EnvResolver`] reads a flag's declared environment variables, and also
//!   pushes environment values into positional arguments once per instance
//!
//! ```
//! use argsource::{Application, Context, EnvResolver, Flag, JsonResolver, ValueKind};
//!
//! let app = Application::new("app").flag(Flag::new("log-level", ValueKind::String));
//! let ctx = Context::new(&app, &[]).unwrap();
//! let json: JsonResolver = r#"{"logLevel": "debug"}"#.parse().unwrap();
//! let env = EnvResolver::from_vars([("UNRELATED", "1")]);
//!
//! ctx.apply_resolvers(&[&env, &json]).unwrap();
//! assert_eq!(app.flags[0].target().get(), Some("debug".into()));
//! ```

pub mod context;
pub mod env;
pub mod error;
pub mod json;
pub mod model;
pub mod naming;
pub mod once;
pub mod resolver;
pub mod token;

pub use context::{Context, Path};
pub use env::EnvResolver;
pub use error::{Error, ParseError, Result};
pub use json::JsonResolver;
pub use model::{Application, Command, Flag, Tag, Target, Value, ValueKind};
pub use once::OnceGate;
pub use resolver::{Resolver, ResolverFn, resolver_fn, validate_all};
pub use token::{Scanner, Token};
