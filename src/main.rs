//! CLI entry point for treelapse

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use treelapse::{
    Algorithm, LogPrinter, PlaybackConfig, PlaybackController, TraversalPlan, TreeFormatter,
    load_tree, print_plan_json, sample_project,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treelapse")]
#[command(about = "Watch recursive and iterative tree traversal unfold step by step")]
#[command(version)]
struct Args {
    /// Tree JSON file to traverse (defaults to the built-in sample project)
    tree: Option<PathBuf>,

    /// Traversal algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Recursive)]
    algorithm: Algorithm,

    /// Delay between steps, e.g. 800ms, 1s, 0ms
    #[arg(short, long, value_name = "DURATION", default_value = "800ms")]
    delay: String,

    /// Print the generated step plan as JSON and exit (no playback)
    #[arg(long)]
    json: bool,

    /// Show the simulated stack after every step
    #[arg(long = "show-stack")]
    show_stack: bool,

    /// Skip printing the tree before playback
    #[arg(long = "no-tree")]
    no_tree: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    let delay = humantime::parse_duration(args.delay.trim()).unwrap_or_else(|e| {
        eprintln!("treelapse: invalid --delay '{}': {}", args.delay, e);
        process::exit(1);
    });

    let tree = match &args.tree {
        Some(path) => load_tree(path).unwrap_or_else(|e| {
            eprintln!("treelapse: cannot load tree '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => sample_project(),
    };

    // Plans are cheap to generate; do it up front for --json and to bound the
    // playback wait below.
    let plan = match TraversalPlan::generate(&tree, args.algorithm) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("treelapse: {}", e);
            process::exit(1);
        }
    };

    if args.json {
        if let Err(e) = print_plan_json(&plan) {
            eprintln!("treelapse: error writing output: {}", e);
            process::exit(1);
        }
        return;
    }

    let use_color = should_use_color(args.color);

    if !args.no_tree {
        if let Err(e) = TreeFormatter::new(use_color).print(&tree) {
            eprintln!("treelapse: error writing output: {}", e);
            process::exit(1);
        }
        println!();
    }

    let mut printer = LogPrinter::new(use_color);
    if args.show_stack {
        printer = printer.with_stack();
    }

    let total_steps = plan.len();
    let config = PlaybackConfig {
        algorithm: args.algorithm,
        delay,
    };
    let controller = match PlaybackController::new(tree, config, Box::new(printer)) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("treelapse: {}", e);
            process::exit(1);
        }
    };

    controller.start();

    // Every step pays the delay once, plus slack for scheduling.
    let wait_limit = delay * (total_steps as u32 + 2) + Duration::from_secs(30);
    if !controller.wait_until_complete(wait_limit) {
        eprintln!("treelapse: playback did not finish in time");
        process::exit(1);
    }
}
