//! redirector: CLI tool for checking redirection rules and resolving sample requests.

use clap::{Args, Parser, Subcommand};
use http::header::LOCATION;
use redirector::{Dispatch, LoaderConfig, PatternPolicy, Redirector, RuleKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redirector")]
#[command(version)]
#[command(about = "Check redirection rules and resolve sample request targets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Base configuration file (created with defaults if missing)
    #[arg(short, long)]
    base: PathBuf,

    /// Local override configuration file
    #[arg(short, long)]
    local: Option<PathBuf>,

    /// Invalid pattern handling: fail or skip
    #[arg(long, default_value = "fail", value_parser = parse_policy)]
    pattern_policy: PatternPolicy,
}

fn parse_policy(s: &str) -> Result<PatternPolicy, String> {
    PatternPolicy::from_str(s)
        .ok_or_else(|| format!("unknown pattern policy: {} (use fail or skip)", s))
}

#[derive(Subcommand)]
enum Commands {
    /// Load configuration and list every rule
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print how each request target would be dispatched
    Resolve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Request targets, e.g. /old/42
        #[arg(required = true)]
        targets: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { config } => check(&config),
        Commands::Resolve { config, targets } => resolve(&config, &targets),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(args: &ConfigArgs) -> Result<Redirector, Box<dyn std::error::Error>> {
    // A local file that does not exist is simply not loaded
    let local = args
        .local
        .clone()
        .unwrap_or_else(|| args.base.with_extension("local.conf"));

    Ok(Redirector::init_with_config(
        &args.base,
        &local,
        LoaderConfig::with_policy(args.pattern_policy),
    )?)
}

fn check(args: &ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let redirector = load(args)?;
    let store = redirector.store();

    for kind in [RuleKind::Explicit, RuleKind::Implicit] {
        let rules = store.rules(kind);
        println!("{} ({} rules)", kind, rules.len());
        for rule in rules {
            let marker = if rule.is_consistent() { "" } else { "  [missing groups]" };
            println!("  {} => {}{}", rule.pattern(), rule.template(), marker);
        }
    }

    println!(
        "Loaded {} rules (pattern policy: {})",
        store.len(),
        store.config().pattern_policy.name()
    );
    Ok(())
}

fn resolve(args: &ConfigArgs, targets: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let redirector = load(args)?;

    for target in targets {
        let mut request = http::Request::get(target.as_str()).body(())?;
        match redirector.dispatch(&mut request) {
            Dispatch::Redirect(response) => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                println!("{} -> {} {}", target, response.status(), location);
            }
            Dispatch::Rewritten { to, .. } => println!("{} => {}", target, to),
            Dispatch::PassThrough => println!("{} (unchanged)", target),
        }
    }

    Ok(())
}
