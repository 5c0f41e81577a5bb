//! urlfilter — CLI entry point
//!
//! Loads one or more rule files and evaluates URLs against the compiled
//! trie, printing `true`/`false` per URL.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use urlfilter::{new_matcher, Matcher};

#[derive(Serialize)]
struct MatchResult<'a> {
    url: &'a str,
    blocked: bool,
}

#[derive(Parser, Debug)]
#[command(name = "urlfilter")]
#[command(version)]
#[command(about = "Matches URLs against Adblock Plus / hosts-syntax filter rules")]
struct Args {
    /// Path to a rule file (Adblock Plus / AdGuard or `hosts` syntax). May be
    /// given more than once; all files are merged into one matcher.
    #[arg(short = 'r', long = "rules", required = true)]
    rules: Vec<PathBuf>,

    /// Evaluate a single URL and exit, instead of reading URLs from stdin.
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Enable debug-level phase logging.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print results as JSON lines instead of `url<TAB>bool`.
    #[arg(long = "json")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let matcher = new_matcher();
    for path in &args.rules {
        load_rules(&matcher, path)?;
    }

    match args.url {
        Some(url) => {
            let blocked = matcher.matches(&url);
            print_result(&url, blocked, args.json);
            std::process::exit(if blocked { 0 } else { 1 });
        }
        None => {
            for line in io::stdin().lock().lines() {
                let url = line?;
                if url.is_empty() {
                    continue;
                }
                let blocked = matcher.matches(&url);
                print_result(&url, blocked, args.json);
            }
        }
    }

    Ok(())
}

fn print_result(url: &str, blocked: bool, json: bool) {
    if json {
        let result = MatchResult { url, blocked };
        println!("{}", serde_json::to_string(&result).unwrap());
    } else {
        println!("{url}\t{blocked}");
    }
}

fn load_rules(matcher: &Matcher, path: &PathBuf) -> anyhow::Result<()> {
    info!("loading rules from {}", path.display());
    let file = File::open(path).map_err(|e| {
        error!("failed to open rule file {}: {e}", path.display());
        e
    })?;
    matcher.add_rules_from(BufReader::new(file));
    Ok(())
}
