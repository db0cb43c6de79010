use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{Context, ExportFormat, ThemeArgs};

#[derive(Parser)]
#[command(name = "toqan-theme")]
#[command(version, about = "Material color themes for Toqan", long_about = None)]
struct Cli {
    /// Config file (default: ./toqan-theme.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a theme and export it
    Generate {
        #[command(flatten)]
        theme: ThemeArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: ExportFormat,
        /// Output file (default: stdout, or the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the six tonal palettes of a theme
    Palette {
        #[command(flatten)]
        theme: ThemeArgs,
    },
    /// Show one color in every supported color space
    Convert {
        /// Hex color such as #6750a4
        #[arg(required_unless_present = "hct")]
        color: Option<String>,
        /// Build the color from hue, chroma and tone instead
        #[arg(
            long,
            num_args = 3,
            value_names = ["HUE", "CHROMA", "TONE"],
            allow_negative_numbers = true,
            conflicts_with = "color"
        )]
        hct: Option<Vec<f64>>,
    },
    /// Pick source colors from an image file, data URL or URL
    Extract {
        /// Image path, data URL or URL
        image: String,
        /// Number of ranked colors to show
        #[arg(short = 'n', long, default_value_t = 4)]
        count: usize,
    },
    /// Re-export a JSON theme document
    Import {
        /// JSON theme document
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: ExportFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Save a theme to the library and select it
    Save {
        /// Display name; the id is derived from it
        name: String,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
        #[command(flatten)]
        theme: ThemeArgs,
    },
    /// List saved themes
    List,
    /// Check content contrast for every role pair
    Inspect {
        #[command(flatten)]
        theme: ThemeArgs,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error,toqan_color=info,toqan_theme=info"))
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { config, command } = Cli::parse();
    let ctx = Context::load(config.as_deref())?;

    match command {
        Commands::Generate {
            theme,
            format,
            output,
        } => commands::generate::execute(&ctx, &theme, format, output.as_deref())?,
        Commands::Palette { theme } => commands::palette::execute(&ctx, &theme)?,
        Commands::Convert { color, hct } => {
            commands::convert::execute(color.as_deref(), hct.as_deref())?
        }
        Commands::Extract { image, count } => commands::extract::execute(&ctx, &image, count)?,
        Commands::Import {
            file,
            format,
            output,
        } => commands::import::execute(&ctx, &file, format, output.as_deref())?,
        Commands::Save {
            name,
            description,
            theme,
        } => commands::library::save(&ctx, &name, &description, &theme)?,
        Commands::List => commands::library::list(&ctx)?,
        Commands::Inspect { theme } => commands::inspect::execute(&ctx, &theme)?,
    }

    Ok(())
}
