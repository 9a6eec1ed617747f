use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use framebatch::{ChunkOptions, ChunkScheduler, compress_with_trace};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framebatch plan 100 --cap 24\n  framebatch plan 50 --cap 24 --tolerance 10 --verbose\n  framebatch schedule --total 100 --cap 24 --overlap 3 --progress\n  framebatch schedule --total 1000 --cap 24 --json\n  framebatch completions zsh > _framebatch";

#[derive(Debug, Parser)]
#[command(
    name = "framebatch",
    version,
    about = "Plan bounded-size batches over long frame sequences",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show the planning trace (compression trials) on stderr.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long)]
    progress: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the batch breakdown for a remaining item count.
    #[command(
        about = "Compute a batch breakdown",
        after_help = "Examples:\n  framebatch plan 100 --cap 24\n  framebatch plan 61 --cap 24 --tolerance 2 --json"
    )]
    Plan {
        /// Items left to schedule.
        remaining: u64,

        /// Maximum items per batch.
        #[arg(long)]
        cap: u64,

        /// How many items a compressed batch may exceed the cap by.
        #[arg(long, default_value_t = 0)]
        tolerance: u64,

        /// Output the breakdown as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Walk a whole sequence batch by batch and print every range.
    #[command(
        about = "Enumerate every batch of a sequence",
        after_help = "Examples:\n  framebatch schedule --total 100 --cap 24\n  framebatch schedule --total 100 --cap 24 --overlap 3 --progress"
    )]
    Schedule {
        /// Total items in the sequence.
        #[arg(long)]
        total: u64,

        /// Maximum items per batch.
        #[arg(long)]
        cap: u64,

        /// How many items a compressed batch may exceed the cap by.
        #[arg(long, default_value_t = 0)]
        tolerance: u64,

        /// Items re-included at the start of each subsequent batch.
        #[arg(long, default_value_t = 0)]
        overlap: u64,

        /// Output the batch list as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            remaining,
            cap,
            tolerance,
            json,
        } => {
            if cap < 1 {
                return Err("--cap must be at least 1".into());
            }
            if remaining == 0 {
                return Err("nothing to plan: remaining is 0".into());
            }

            let (breakdown, trace) = compress_with_trace(remaining, cap, tolerance);
            if cli.global.verbose {
                for step in trace.steps() {
                    eprintln!("{} {step}", "trace".cyan().bold());
                }
            }

            if json {
                let payload = json!({
                    "remaining": remaining,
                    "max_cap": cap,
                    "tolerance": tolerance,
                    "batch_count": breakdown.batch_count,
                    "cap": breakdown.cap,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} {}",
                    "plan:".green().bold(),
                    format!(
                        "{remaining} item(s) -> {} batch(es) of up to {}",
                        breakdown.batch_count, breakdown.cap
                    )
                    .green()
                );
            }
        }
        Commands::Schedule {
            total,
            cap,
            tolerance,
            overlap,
            json,
        } => {
            let options = ChunkOptions::new(cap)
                .with_overflow_limit(tolerance)
                .with_overlap(overlap);
            options.validate()?;

            let progress_bar = if cli.global.progress {
                let pb = ProgressBar::new(total);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
                )?;
                pb.set_style(style.progress_chars("##-"));
                Some(pb)
            } else {
                None
            };

            let plans = walk(total, &options, cli.global.verbose, progress_bar.as_ref())?;

            if let Some(pb) = progress_bar {
                pb.finish_with_message("done");
            }

            if json {
                let batches: Vec<_> = plans
                    .iter()
                    .map(|plan| {
                        json!({
                            "skip": plan.skip,
                            "len": plan.len(),
                            "cap": plan.cap,
                            "batches_remaining": plan.batch_count,
                        })
                    })
                    .collect();
                let payload = json!({
                    "total": total,
                    "max_cap": cap,
                    "tolerance": tolerance,
                    "overlap": overlap,
                    "batch_count": plans.len(),
                    "batches": batches,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for (index, plan) in plans.iter().enumerate() {
                    println!(
                        "batch {:>4}: items [{}, {}) ({} item(s))",
                        index + 1,
                        plan.skip,
                        plan.skip + plan.len(),
                        plan.len()
                    );
                }
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!("Scheduled {total} item(s) into {} batch(es)", plans.len()).green()
                );
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framebatch", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Drive a scheduler to completion, collecting the plans as they are made so
/// the progress bar and trace output track the walk live.
fn walk(
    total: u64,
    options: &ChunkOptions,
    verbose: bool,
    progress_bar: Option<&ProgressBar>,
) -> Result<Vec<framebatch::BatchPlan>, Box<dyn std::error::Error>> {
    let scheduler = ChunkScheduler::new();
    let key = framebatch::JobKey::from_raw(0);

    let mut plans = Vec::new();
    loop {
        let (plan, trace) = scheduler.next_with_trace(key, total, options)?;
        if plan.is_done {
            return Ok(plans);
        }

        if verbose {
            for step in trace.steps() {
                eprintln!("{} {step}", "trace".cyan().bold());
            }
        }
        if let Some(pb) = progress_bar {
            // The bar tracks the cursor, so overlapped items only count once.
            pb.set_position(
                scheduler
                    .progress(key, total)
                    .map(|progress| progress.consumed)
                    .unwrap_or(total),
            );
        }

        plans.push(plan);
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
