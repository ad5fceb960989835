//! sched-sim - runs a workload file through one dispatch policy
//!
//! Usage: sched-sim <FCFS|RR|FB> <workload> <output> [--config <file>] [--json]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, info};

use sched_sim::{format_log, simulate, PolicyKind, SimConfig, SimulationReport, Workload};

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run(RunArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    policy: PolicyKind,
    workload: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let run_args = match parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(run_args)) => run_args,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&run_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

/// Splits the arguments into options and the three positionals
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut positionals = Vec::new();
    let mut config = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" => json = true,
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a file")?;
                config = Some(PathBuf::from(path));
            }
            option if option.starts_with("--") => {
                return Err(format!("unknown option: {}", option));
            }
            positional => positionals.push(positional),
        }
        i += 1;
    }

    let [policy, workload, output] = positionals[..] else {
        return Err(format!(
            "expected 3 arguments, got {}",
            positionals.len()
        ));
    };

    Ok(Command::Run(RunArgs {
        policy: policy.parse()?,
        workload: PathBuf::from(workload),
        output: PathBuf::from(output),
        config,
        json,
    }))
}

fn run(args: &RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    debug!("using {:?}", config);

    let workload = read_workload(&args.workload)?;
    info!(
        "{}: {} processes from {}",
        args.policy,
        workload.len(),
        args.workload.display()
    );

    let report = simulate(args.policy, workload, &config);
    let rendered = render(&report, args.json)?;
    fs::write(&args.output, rendered)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}

fn read_workload(path: &Path) -> Result<Workload> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read workload {}", path.display()))?;
    Workload::parse(&text).with_context(|| format!("malformed workload {}", path.display()))
}

fn render(report: &SimulationReport, json: bool) -> Result<String> {
    if json {
        let mut text =
            serde_json::to_string_pretty(report).context("failed to serialize the report")?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(format_log(report))
    }
}

fn print_usage() {
    println!("sched-sim - discrete tick CPU scheduling simulator");
    println!();
    println!("USAGE:");
    println!("    sched-sim <POLICY> <WORKLOAD> <OUTPUT> [OPTIONS]");
    println!();
    println!("POLICIES:");
    println!("    FCFS    first come, first served");
    println!("    RR      round robin");
    println!("    FB      multilevel feedback");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    TOML file overriding the simulation constants");
    println!("        --json             Write the report as JSON");
    println!("    -h, --help             Show this help message");
    println!();
    println!("Log verbosity follows RUST_LOG, e.g. RUST_LOG=debug");
}
