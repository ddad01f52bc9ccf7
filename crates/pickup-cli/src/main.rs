use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use dotenvy::dotenv;
use pickup_cli::render;
use pickup_cli::simulation::{self, SimulationConfig};
use pickup_config::DismissalConfig;
use pickup_dismissal::{CheckIn, Directory, Dismissal};
use pickup_models::PickupMethod;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pickup-cli")]
#[command(about = "Pickup CLI - Directory inspection and dismissal simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print teachers and the student roster
    Directory {
        /// Directory JSON file (defaults to DIRECTORY_PATH, then the built-in sample)
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
    /// Run a simulated dismissal with generated parents
    Simulate {
        /// Number of parents arriving
        #[arg(short = 'p', long, default_value = "10")]
        pickups: usize,

        /// Number of releases performed after all arrivals
        #[arg(short = 'r', long, default_value = "6")]
        releases: usize,

        /// RNG seed for rosters, tickets and release order
        #[arg(short = 's', long, default_value = "42")]
        seed: u64,

        /// Directory JSON file
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
    /// Check a parent in interactively and show the assignment
    CheckIn {
        /// Parent or guardian name (prompted if not provided)
        #[arg(long)]
        parent: Option<String>,

        /// Comma-separated student names (prompted if not provided)
        #[arg(long)]
        students: Option<String>,

        /// car_line or walk_up (prompted if not provided)
        #[arg(short = 'm', long)]
        method: Option<String>,

        /// Directory JSON file
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pickup_observability::init_basic_console_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Directory { file } => {
            let directory = load_directory(file)?;
            print!("{}", render::directory(&directory));
        }
        Commands::Simulate {
            pickups,
            releases,
            seed,
            file,
        } => handle_simulate(load_directory(file)?, pickups, releases, seed),
        Commands::CheckIn {
            parent,
            students,
            method,
            file,
        } => handle_check_in(load_directory(file)?, parent, students, method)?,
    }

    Ok(())
}

/// An explicit file must load; otherwise `DIRECTORY_PATH` is tried with the
/// usual fallback to the sample directory.
fn load_directory(file: Option<PathBuf>) -> anyhow::Result<Directory> {
    match file {
        Some(path) => Directory::load(&path)
            .with_context(|| format!("Failed to load directory from {}", path.display())),
        None => Ok(Directory::load_or_fallback(
            DismissalConfig::from_env().directory_path.as_deref(),
        )),
    }
}

fn handle_simulate(directory: Directory, pickups: usize, releases: usize, seed: u64) {
    let config = SimulationConfig {
        pickups,
        releases,
        seed,
        ..SimulationConfig::default()
    };
    let report = simulation::run(directory, &config);

    println!("\n📋 Still waiting ({})", report.queue.len());
    print!("{}", render::queue(&report.queue));
    println!("\n📰 Activity (newest first)");
    print!("{}", render::activity(&report.activity));
    println!("\n📊 Stats");
    print!("{}", render::stats(&report.stats));
}

fn handle_check_in(
    directory: Directory,
    parent: Option<String>,
    students: Option<String>,
    method: Option<String>,
) -> anyhow::Result<()> {
    let parent = match parent {
        Some(parent) => parent,
        None => Input::new()
            .with_prompt("Parent/guardian name")
            .interact_text()?,
    };

    let students = match students {
        Some(students) => students,
        None => Input::new()
            .with_prompt("Students (comma-separated)")
            .interact_text()?,
    };

    let method = match method {
        Some(method) => method
            .parse::<PickupMethod>()
            .map_err(|e| anyhow::anyhow!(e))?,
        None => {
            let options = [PickupMethod::CarLine, PickupMethod::WalkUp];
            let labels: Vec<&str> = options.iter().map(|m| m.label()).collect();
            let choice = Select::new()
                .with_prompt("Pickup method")
                .items(&labels)
                .default(0)
                .interact()?;
            options[choice]
        }
    };

    let check_in = CheckIn::new(parent, students.split(','), method)?;
    let mut dismissal = Dismissal::builder(directory).build();
    let request = dismissal.check_in(check_in);

    println!("\n✅ Checked in as queue #{} (ticket {})", request.queue_position, request.ticket);
    println!("   Assigned to: {}", request.assigned_teacher_label);
    println!("\n📰 Activity");
    print!("{}", render::activity(&dismissal.activity()));

    Ok(())
}
