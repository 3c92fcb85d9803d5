mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "piling",
    version,
    about = "Inspect pile foundation design points from LandXML, DXF and LOK files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options that select how a design file is read.
#[derive(clap::Args)]
struct ProfileArgs {
    /// Extraction profile JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    profile: Option<PathBuf>,

    /// Predefined profile: landxml, enz
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Override the LandXML coordinate order: nez (default) or enz
    #[arg(long, value_name = "ORDER")]
    axis_order: Option<String>,

    /// Drop points repeated with the same name and coordinates
    #[arg(long)]
    dedupe: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewMode {
    /// Easting vs Northing
    Plan,
    /// Easting, Northing and Elevation
    Orbit,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract design points from a .xml, .dxf or .lok file
    Parse {
        /// Path to the design file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted points to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Print the plan or orbit view of a design file as JSON for a renderer
    View {
        /// Path to the design file
        input_file: PathBuf,

        #[arg(short, long, value_enum, default_value = "plan")]
        mode: ViewMode,

        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Manage and inspect extraction profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List predefined profiles
    List,
    /// Print the effective profile as JSON (default profile if no file given)
    Show {
        /// Path to a profile JSON file
        file: Option<PathBuf>,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to profile JSON file
        file: PathBuf,
    },
}

fn main() {
    // Diagnostics go to stderr so table/JSON output on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            profile,
        } => commands::resolve_profile(&profile)
            .and_then(|p| commands::parse::run(input_file, &output, out, p)),
        Commands::View {
            input_file,
            mode,
            profile,
        } => commands::resolve_profile(&profile)
            .and_then(|p| commands::view::run(input_file, mode, p)),
        Commands::Profile { action } => match action {
            ProfileAction::List => commands::profile::list(),
            ProfileAction::Show { file } => commands::profile::show(file.as_deref()),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
