use serde_json::Value as Json;

use crate::context::{Context, Path};
use crate::error::Result;
use crate::model::{Application, Flag};

/// A source of flag values consulted when the command line supplied none.
pub trait Resolver {
    /// Check the source against the declared grammar (e.g. reject unknown keys).
    fn validate(&self, _app: &Application) -> Result<()> {
        Ok(())
    }

    /// Resolve a value for `flag`, declared on `parent`.
    ///
    /// `Ok(None)` means this resolver has no value; the next resolver (or the
    /// flag's default) applies. An error aborts resolution.
    fn resolve(&self, context: &Context<'_>, parent: &Path<'_>, flag: &Flag) -> Result<Option<Json>>;
}

/// Adapter promoting a plain function to a non-validating [`Resolver`].
pub struct ResolverFn<F>(F);

pub fn resolver_fn<F>(f: F) -> ResolverFn<F>
where
    F: Fn(&Context<'_>, &Path<'_>, &Flag) -> Result<Option<Json>>,
{
    ResolverFn(f)
}

impl<F> Resolver for ResolverFn<F>
where
    F: Fn(&Context<'_>, &Path<'_>, &Flag) -> Result<Option<Json>>,
{
    fn resolve(&self, context: &Context<'_>, parent: &Path<'_>, flag: &Flag) -> Result<Option<Json>> {
        (self.0)(context, parent, flag)
    }
}

/// Validate every resolver against `app`, in registration order.
pub fn validate_all(app: &Application, resolvers: &[&dyn Resolver]) -> Result<()> {
    for resolver in resolvers {
        resolver.validate(app)?;
    }
    Ok(())
}
