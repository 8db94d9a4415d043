use std::{fmt::Display, process::exit};

use clap::{command, arg, Parser};
use patcher::patch;
use targets::Targets;

mod error;
mod manifest;
mod patcher;
mod targets;

fn main() {
    dotenv::dotenv().ok();

    let opts = CliOpts::parse();

    let targets = match Targets::patched_versions() {
        Ok(v) => v,
        Err(e) => {
            log(format!("Invalid patch targets: {e}"));
            exit(1)
        }
    };

    if opts.verbose {
        log(format!("Pinning {targets}"));
    }

    match patch(&opts, &targets) {
        Ok(res) => {
            log(res);
            exit(0)
        },
        Err(e) => {
            log(format!("Patching failed: {e}"));
            exit(1)
        }
    }
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about)]
struct CliOpts {
    #[arg(short, long, env, default_value = ".",
        help = "The project root whose node_modules/next/package.json gets patched.")]
    project_dir: String,

    #[arg(short = 'n', long, env, default_value_t = false,
        help = "Report what would be patched without touching the manifest.")]
    dry_run: bool,

    #[arg(short, long, env, default_value_t = false,
        help = "Verbose logging. Lists every section and target as it is checked.")]
    verbose: bool,
}

fn now() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn log<M: Display>(msg: M) {
    println!("{} {msg}", now());
}
