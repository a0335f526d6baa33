use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod commands;
mod provenance;

use commands::SearchArgs;

#[derive(Parser)]
#[command(name = "atrail")]
#[command(about = "A-trail search and verification for embedded mesh graphs")]
struct Cmd {
    /// Log every split decision (DEBUG level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search an A-trail and write it as edge trail and vertex trail
    Search {
        /// Edge-code file: `p N` header, then one rotation per vertex
        edge_code: PathBuf,
        /// Edge-trail output (default: input with extension `.trail`)
        #[arg(long)]
        trail: Option<PathBuf>,
        /// Vertex-trail output (default: input with extension `.ntrail`)
        #[arg(long)]
        ntrail: Option<PathBuf>,
        /// BFS root for ordering branch nodes
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Give up after this many split attempts
        #[arg(long)]
        max_splits: Option<u64>,
        /// Skip the independent check of the found trail
        #[arg(long)]
        no_verify: bool,
    },
    /// Check whether an edge trail is an A-trail of an edge code
    Verify { edge_code: PathBuf, trail: PathBuf },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<ExitCode> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let ok = match cmd.action {
        Action::Search {
            edge_code,
            trail,
            ntrail,
            start,
            max_splits,
            no_verify,
        } => commands::search(&SearchArgs {
            trail,
            ntrail,
            start,
            max_splits,
            verify: !no_verify,
            ..SearchArgs::new(edge_code)
        })?,
        Action::Verify { edge_code, trail } => {
            let verdict = commands::verify(&edge_code, &trail)?;
            println!("{verdict}");
            verdict.is_valid()
        }
        Action::Report => {
            report()?;
            true
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "atrail_version": atrail::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
