//! CLI entry point for the river-crossing solver.
//!
//! Usage:
//!   river-crossing solve [config.json] [options]
//!   river-crossing solve --stdin [options]
//!   river-crossing verify <plan.json> [options]
//!   river-crossing verify --stdin [options]
//!
//! Problem options (override values from a config file):
//!   -m, --missionaries <n>   Number of missionaries (default: 3)
//!   -c, --cannibals <n>      Number of cannibals (default: 3)
//!   -b, --boat-capacity <n>  People per crossing (default: 2)
//!   --margin <text>          Starting bank, left/esquerda or right/direita
//!
//! Solve options:
//!   --enumeration <mode>     exhaustive (default) or reference-scan
//!   --max-expansions <n>     Give up after expanding n nodes
//!   --trace                  Print every visited and generated state to stderr
//!   --plain                  Print one operator per line instead of JSON

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use river_crossing::{
    solve, verify_plan, Enumeration, Margin, Operator, Problem, ProblemConfig, SearchOutcome,
    SearchStats, SolverConfig, SolverResult, State, TraceEvent,
};

#[derive(Parser)]
#[command(name = "river-crossing")]
#[command(about = "Shortest plans for the missionaries and cannibals river crossing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a shortest crossing plan
    Solve {
        /// Path to a problem JSON file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the problem JSON from stdin
        #[arg(long, conflicts_with = "file")]
        stdin: bool,

        #[command(flatten)]
        problem: ProblemArgs,

        /// How to enumerate boat loads
        #[arg(long, value_enum, default_value = "exhaustive")]
        enumeration: EnumerationArg,

        /// Maximum number of node expansions
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Print the search trace to stderr
        #[arg(long)]
        trace: bool,

        /// Print the plan as plain text
        #[arg(long)]
        plain: bool,
    },
    /// Check that a plan solves a problem
    Verify {
        /// Path to a plan JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the plan from stdin instead of a file
        #[arg(long, conflicts_with = "file")]
        stdin: bool,

        #[command(flatten)]
        problem: ProblemArgs,
    },
}

#[derive(Args)]
struct ProblemArgs {
    /// Number of missionaries
    #[arg(short, long)]
    missionaries: Option<u32>,

    /// Number of cannibals
    #[arg(short, long)]
    cannibals: Option<u32>,

    /// Maximum people per crossing
    #[arg(short, long)]
    boat_capacity: Option<u32>,

    /// Starting bank (left/esquerda or right/direita)
    #[arg(long)]
    margin: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EnumerationArg {
    Exhaustive,
    ReferenceScan,
}

impl From<EnumerationArg> for Enumeration {
    fn from(arg: EnumerationArg) -> Self {
        match arg {
            EnumerationArg::Exhaustive => Enumeration::Exhaustive,
            EnumerationArg::ReferenceScan => Enumeration::ReferenceScan,
        }
    }
}

/// Problem JSON as read from a file. The margin stays raw text so an
/// unrecognized value can fall back to the left bank with a warning.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemFile {
    missionaries: u32,
    cannibals: u32,
    boat_capacity: u32,
    #[serde(default)]
    initial_margin: Option<String>,
}

impl ProblemFile {
    fn into_config(self) -> ProblemConfig {
        ProblemConfig {
            missionaries: self.missionaries,
            cannibals: self.cannibals,
            boat_capacity: self.boat_capacity,
            initial_margin: self
                .initial_margin
                .as_deref()
                .map_or(Margin::Left, margin_or_left),
        }
    }
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    problem: ProblemConfig,
    #[serde(flatten)]
    outcome: SearchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    crossings: Option<usize>,
    stats: SearchStats,
}

/// Output format for a verification
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    states: Vec<State>,
}

/// A bare operator list, or any object carrying a `plan` field such as the
/// output of `solve`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlanInput {
    Bare(Vec<Operator>),
    Report { plan: Vec<Operator> },
}

impl PlanInput {
    fn into_plan(self) -> Vec<Operator> {
        match self {
            PlanInput::Bare(plan) | PlanInput::Report { plan } => plan,
        }
    }
}

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            file,
            stdin,
            problem,
            enumeration,
            max_expansions,
            trace,
            plain,
        } => {
            let solver = SolverConfig {
                enumeration: enumeration.into(),
                max_expansions,
                record_trace: trace,
            };
            run_solve(file, stdin, &problem, &solver, plain)
        }
        Commands::Verify {
            file,
            stdin,
            problem,
        } => run_verify(file, stdin, &problem),
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> Result<Option<String>, String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read from stdin: {}", e))?;
        Ok(Some(buffer))
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("failed to read file {:?}: {}", path, e))
    } else {
        Ok(None)
    }
}

/// Parse a margin, warning and assuming the left bank when it is unknown
fn margin_or_left(text: &str) -> Margin {
    text.parse::<Margin>().unwrap_or_else(|e| {
        eprintln!("Warning: {}; assuming the left margin", e);
        Margin::Left
    })
}

/// Merge flags over an optional base config
fn build_config(base: ProblemConfig, args: &ProblemArgs) -> ProblemConfig {
    let initial_margin = args
        .margin
        .as_deref()
        .map_or(base.initial_margin, margin_or_left);

    ProblemConfig {
        missionaries: args.missionaries.unwrap_or(base.missionaries),
        cannibals: args.cannibals.unwrap_or(base.cannibals),
        boat_capacity: args.boat_capacity.unwrap_or(base.boat_capacity),
        initial_margin,
    }
}

fn print_trace(trace: &[TraceEvent]) {
    for event in trace {
        match event {
            TraceEvent::Visit { depth, state } => eprintln!("visit  depth={} {}", depth, state),
            TraceEvent::Generate {
                operator,
                state,
                duplicate,
            } => eprintln!(
                "  gen  {} -> {}{}",
                operator,
                state,
                if *duplicate { " (seen)" } else { "" }
            ),
        }
    }
}

fn run_solve(
    file: Option<PathBuf>,
    stdin: bool,
    args: &ProblemArgs,
    solver: &SolverConfig,
    plain: bool,
) -> Result<ExitCode, String> {
    let base = match read_input(file, stdin)? {
        Some(json) => serde_json::from_str::<ProblemFile>(&json)
            .map_err(|e| format!("error parsing problem JSON: {}", e))?
            .into_config(),
        None => ProblemConfig::default(),
    };
    let config = build_config(base, args);
    let problem = Problem::new(config, solver.enumeration).map_err(|e| e.to_string())?;

    let SolverResult {
        outcome,
        stats,
        trace,
    } = solve(&problem, solver).map_err(|e| e.to_string())?;

    print_trace(&trace);

    let solved = outcome.is_solved();
    if plain {
        print_plain(&outcome);
    } else {
        let output = SolveOutput {
            problem: config,
            crossings: outcome.plan().map(Vec::len),
            outcome,
            stats,
        };
        let json = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{}", json);
    }

    Ok(if solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    })
}

fn print_plain(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Solved { plan } => {
            println!("Plan ({} crossings):", plan.len());
            for operator in plan {
                println!("{}", operator);
            }
        }
        SearchOutcome::Exhausted => println!("No solution exists."),
        SearchOutcome::BudgetExceeded { expansions } => {
            println!("No solution found within {} expansions.", expansions)
        }
    }
}

fn run_verify(file: Option<PathBuf>, stdin: bool, args: &ProblemArgs) -> Result<ExitCode, String> {
    let json = read_input(file, stdin)?
        .ok_or_else(|| "must provide either a plan file or --stdin".to_string())?;
    let plan = serde_json::from_str::<PlanInput>(&json)
        .map_err(|e| format!("error parsing plan JSON: {}", e))?
        .into_plan();

    let config = build_config(ProblemConfig::default(), args);
    let problem = Problem::new(config, Enumeration::default()).map_err(|e| e.to_string())?;

    let output = match verify_plan(&problem, &plan) {
        Ok(states) => VerifyOutput {
            valid: true,
            reason: None,
            states,
        },
        Err(e) => VerifyOutput {
            valid: false,
            reason: Some(e.to_string()),
            states: Vec::new(),
        },
    };

    let json = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
    println!("{}", json);

    Ok(if output.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> ProblemConfig {
        serde_json::from_str::<ProblemFile>(json).unwrap().into_config()
    }

    #[test]
    fn test_problem_file_normalizes_margin() {
        let cfg = load(r#"{"missionaries": 3, "cannibals": 3, "boatCapacity": 2, "initialMargin": "Esquerda"}"#);
        assert_eq!(cfg.initial_margin, Margin::Left);

        let cfg = load(r#"{"missionaries": 3, "cannibals": 3, "boatCapacity": 2, "initialMargin": "direita"}"#);
        assert_eq!(cfg.initial_margin, Margin::Right);

        let cfg = load(r#"{"missionaries": 3, "cannibals": 3, "boatCapacity": 2}"#);
        assert_eq!(cfg.initial_margin, Margin::Left);
    }

    #[test]
    fn test_problem_file_unknown_margin_defaults_left() {
        let cfg = load(r#"{"missionaries": 2, "cannibals": 1, "boatCapacity": 2, "initialMargin": "norte"}"#);
        assert_eq!(
            cfg,
            ProblemConfig {
                missionaries: 2,
                cannibals: 1,
                boat_capacity: 2,
                initial_margin: Margin::Left,
            }
        );
    }

    #[test]
    fn test_margin_flag_overrides_file() {
        let args = ProblemArgs {
            missionaries: None,
            cannibals: Some(2),
            boat_capacity: None,
            margin: Some("Direita".to_string()),
        };
        let cfg = build_config(ProblemConfig::default(), &args);
        assert_eq!(cfg.initial_margin, Margin::Right);
        assert_eq!(cfg.cannibals, 2);
        assert_eq!(cfg.missionaries, 3);
    }

    #[test]
    fn test_file_and_stdin_conflict() {
        assert!(Cli::try_parse_from(["river-crossing", "solve", "problem.json", "--stdin"]).is_err());
        assert!(Cli::try_parse_from(["river-crossing", "verify", "plan.json", "--stdin"]).is_err());
        assert!(Cli::try_parse_from(["river-crossing", "solve", "--stdin"]).is_ok());
        assert!(Cli::try_parse_from(["river-crossing", "verify", "plan.json"]).is_ok());
    }
}
