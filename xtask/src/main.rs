use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride dispatch workspace",
    long_about = "A unified CLI for running the operator console, the scripted\n\
                  scenario, benchmarks and CI checks in the ride dispatch workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive operator console
    Console {
        /// Apply the 50 / 50 / 100 capacity bounds
        #[arg(long)]
        legacy_limits: bool,
    },
    /// Run the scripted dispatch scenario
    Run,
    /// Run Criterion benchmarks
    Bench {
        /// Only run benchmarks whose id contains this string
        filter: Option<String>,
    },
    /// Benchmark the committed tree as a baseline, then compare local changes to it
    BenchCompare {
        /// Criterion baseline name
        #[arg(long, default_value = "main")]
        baseline: String,
        /// Only run benchmarks whose id contains this string
        filter: Option<String>,
    },
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the example scenario
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

const BENCH_ARGS: [&str; 5] = [
    "bench",
    "--package",
    "dispatch_core",
    "--bench",
    "performance",
];

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

/// Echo and run `program`, exiting with its status on failure.
fn run(program: &str, args: &[&str]) {
    eprintln!("+ {program} {}", args.join(" "));
    let status = Command::new(program)
        .args(args)
        .status()
        .unwrap_or_else(|err| {
            eprintln!("failed to execute {program}: {err}");
            exit(1);
        });
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run("cargo", args);
}

/// Whether the working tree has anything `git stash` would pick up.
fn has_local_changes() -> bool {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .unwrap_or_else(|err| {
            eprintln!("failed to execute git: {err}");
            exit(1);
        });
    !output.stdout.is_empty()
}

/// Criterion arguments go after `--`; `filter` narrows to matching bench ids.
fn run_bench(filter: Option<&str>, criterion: &[&str]) {
    let mut args = BENCH_ARGS.to_vec();
    if filter.is_some() || !criterion.is_empty() {
        args.push("--");
        args.extend(filter);
        args.extend_from_slice(criterion);
    }
    run_cargo(&args);
}

fn bench_compare(baseline: &str, filter: Option<&str>) {
    let stashed = has_local_changes();
    if stashed {
        step("Stashing local changes");
        run("git", &["stash", "push", "-m", "xtask bench-compare"]);
    } else {
        eprintln!("No local changes; the baseline is the current tree.");
    }

    step(&format!("Saving baseline '{baseline}'"));
    run_bench(filter, &["--save-baseline", baseline]);

    if stashed {
        step("Restoring local changes");
        run("git", &["stash", "pop"]);
    }

    step(&format!("Comparing against '{baseline}'"));
    run_bench(filter, &["--baseline", baseline]);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test dispatch_core");
    run_cargo(&["test", "-p", "dispatch_core"]);

    step("Test dispatch_console");
    run_cargo(&["test", "-p", "dispatch_console"]);
}

fn ci_examples() {
    step("Run scenario_run");
    run_cargo(&["run", "-p", "dispatch_core", "--example", "scenario_run"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_bench(None, &[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Console { legacy_limits } => {
            let mut args = vec!["run", "-p", "dispatch_console", "--"];
            if legacy_limits {
                args.push("--legacy-limits");
            }
            run_cargo(&args);
        }
        Commands::Run => {
            run_cargo(&["run", "-p", "dispatch_core", "--example", "scenario_run"]);
        }
        Commands::Bench { filter } => run_bench(filter.as_deref(), &[]),
        Commands::BenchCompare { baseline, filter } => {
            bench_compare(&baseline, filter.as_deref());
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
