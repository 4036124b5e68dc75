mod schema;

use anyhow::{Context as _, Result};
use argsource::{Context, EnvResolver, JsonResolver, Resolver, naming, validate_all};
use clap::{Parser, Subcommand};
use serde_json::Value as Json;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "argsource")]
#[command(version, about = "Resolve flag values from configuration documents and the environment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve flag and argument values for a command path
    Resolve(ResolveArgs),

    /// Show the document keys a flag name maps to
    Keys(KeysArgs),
}

#[derive(Parser)]
struct ResolveArgs {
    /// Grammar schema (JSON)
    #[arg(short, long, value_name = "FILE")]
    schema: PathBuf,

    /// Configuration document; the first one that exists is used
    #[arg(short, long = "config", value_name = "FILE")]
    configs: Vec<PathBuf>,

    /// Load variables from a dotenv file first (existing variables win)
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Reject configuration keys that no declared flag maps to
    #[arg(long)]
    strict: bool,

    /// Command path to resolve, e.g. `serve tls`
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,
}

#[derive(Parser)]
struct KeysArgs {
    /// Flag name, e.g. `log-level`
    #[arg(value_name = "NAME")]
    name: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => resolve(args),
        Commands::Keys(args) => keys(args),
    }
}

fn resolve(args: ResolveArgs) -> Result<()> {
    tracing::debug!("executing resolve command");

    if let Some(path) = &args.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file: {}", path.display()))?;
    }

    let app = schema::load_schema(&args.schema)?.into_application();
    let commands: Vec<&str> = args.commands.iter().map(String::as_str).collect();
    let ctx = Context::new(&app, &commands)?;

    let env = EnvResolver::new();
    let json = JsonResolver::from_first_existing(&args.configs)
        .context("failed to load configuration")?
        .map(|json| if args.strict { json.strict() } else { json });
    if json.is_none() && !args.configs.is_empty() {
        tracing::warn!("none of the configuration files exist");
    }

    // Command line > environment > configuration document.
    let mut resolvers: Vec<&dyn Resolver> = vec![&env];
    if let Some(json) = &json {
        resolvers.push(json);
    }

    validate_all(&app, &resolvers).context("configuration does not match the schema")?;
    ctx.apply_resolvers(&resolvers)
        .context("failed to resolve values")?;

    let mut out = serde_json::Map::new();
    for (name, value) in ctx.values() {
        out.insert(name.to_string(), value.unwrap_or(Json::Null));
    }
    println!("{}", serde_json::to_string_pretty(&Json::Object(out))?);
    Ok(())
}

fn keys(args: KeysArgs) -> Result<()> {
    println!("underscore: {}", naming::underscore(&args.name));
    println!("camel:      {}", naming::camel(&args.name));
    println!("path:       {}", naming::path_segments(&args.name).join(" / "));
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
