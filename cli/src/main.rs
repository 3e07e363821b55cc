//! carveout CLI - inspect, validate and simulate hook rule tables.

mod simulate;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use carveout_agent::config::{load_rules, load_rules_file};
use carveout_agent::{Agent, LoadPackageParam};
use carveout_policy::RuleTable;
use carveout_protocol::InterceptionOutcome;

use simulate::{probe_all, Platform, SYSTEM_LOADER};

/// Package used as the "anyone else" side of simulation probes.
const OTHER_PACKAGE: &str = "com.example.unrelated";

#[derive(Parser)]
#[command(name = "carveout")]
#[command(version, long_about = None)]
#[command(about = "Conditional call interception for platform services")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective rule table
    Rules {
        /// Rule YAML file [default: $CARVEOUT_RULES, ~/.config/carveout/rules.yaml, built-in]
        #[arg(short, long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },

    /// Validate a rule file
    Check {
        /// Rule YAML file
        file: PathBuf,
    },

    /// Install the rule table into a simulated service process and probe it
    Simulate {
        /// Rule YAML file [default: $CARVEOUT_RULES, ~/.config/carveout/rules.yaml, built-in]
        #[arg(short, long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Process name reported to the load entry point
        #[arg(long, default_value = "android")]
        package: String,

        /// Platform API level to simulate
        #[arg(long, default_value_t = 34)]
        api_level: u32,

        /// Print installation outcomes as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Rules { rules } => {
            let table = load_rules(rules.as_deref())?;
            print_table(&table);
        }
        Commands::Check { file } => {
            let table = load_rules_file(&file)?;
            println!(
                "ok: {} hook(s) for {} in {}",
                table.len(),
                table.subject(),
                table.host_process()
            );
        }
        Commands::Simulate {
            rules,
            package,
            api_level,
            json,
        } => {
            let table = load_rules(rules.as_deref())?;
            run_simulation(table, &package, api_level, json)?;
        }
    }

    Ok(())
}

fn print_table(table: &RuleTable) {
    println!("host_process: {}", table.host_process());
    println!("subject: {}", table.subject());
    for (i, rule) in table.rules().iter().enumerate() {
        let note = rule.note().map(|n| format!("  # {}", n)).unwrap_or_default();
        println!(
            "{:>3}. {}  {}({:?}) -> {}{}",
            i + 1,
            rule.target(),
            rule.predicate().kind().as_str(),
            rule.predicate().value(),
            rule.action(),
            note
        );
    }
}

fn run_simulation(table: RuleTable, package: &str, api_level: u32, json: bool) -> Result<()> {
    let subject = table.subject().to_string();
    let host_process = table.host_process().to_string();
    let platform = Platform::new(api_level);
    let agent = Agent::new(table);

    debug!("Simulating {} at API level {}", package, api_level);
    let param = LoadPackageParam {
        package_name: package,
        loader: SYSTEM_LOADER,
    };
    let Some(report) = agent.handle_load_package(&platform.runtime, &param) else {
        if json {
            println!("[]");
        } else {
            println!(
                "{} is not the host process ({}); nothing installed",
                package, host_process
            );
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(report.outcomes())?);
        return Ok(());
    }

    for outcome in report.outcomes() {
        print_outcome(outcome);
    }
    println!(
        "{} attached, {} missing, {} failed",
        report.attached(),
        report.missing(),
        report.failed()
    );

    for (target, hit, miss) in probe_all(&platform, report.outcomes(), &subject, OTHER_PACKAGE)? {
        println!("probe {}", target);
        for probe in [hit, miss] {
            let how = if probe.overridden { "overridden" } else { "original" };
            println!("    {} -> {} ({})", probe.package, probe.result, how);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &InterceptionOutcome) {
    if outcome.status.is_attached() {
        println!(
            "{:<16}{} ({} overload(s))",
            outcome.status.to_string(),
            outcome.target,
            outcome.overloads
        );
    } else {
        println!("{:<16}{}", outcome.status.to_string(), outcome.target);
    }
}
