use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use vfs::{PhysicalFS, VfsPath};
use vurif::{Analysis, Overrides, Settings};
use vurif_core::{ConsoleLogger, LogLevel, Logger};
use vurif_output::OutputFormat;

/// CLI arguments

#[derive(Parser)]
#[command(
    name = "vurif",
    version,
    about = "Component dependency analyzer for Vue single-file components",
    after_help = "Environment variables:\n  CI - disable color output by default"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Project root; every other path is relative to it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Verbose output
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    /// Colored output, `--color=false` to disable
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        default_value_t = default_color()
    )]
    color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the dependency graph of a single page file
    Load {
        /// Root file to start loading from
        page_file: String,
        /// Directory of the components to resolve against
        components_dir: Option<String>,
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Load the dependency graphs of every file under a views directory
    LoadAll {
        /// Directory whose component files are the roots of the graph
        views_dir: String,
        /// Directory of the components to resolve against
        components_dir: Option<String>,
        #[command(flatten)]
        shared: SharedArgs,
    },
}

#[derive(Args)]
struct SharedArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for json and dot formats
    #[arg(long)]
    output: Option<String>,

    /// Directory receiving the visual graph data
    #[arg(long)]
    out_dir: Option<String>,

    /// Port of the visual graph server
    #[arg(long)]
    port: Option<u16>,

    /// File or folder patterns to ignore when scanning
    #[arg(long = "ignore", name = "PATTERN")]
    ignore_paths: Vec<String>,
}

impl SharedArgs {
    fn into_overrides(self, components_dir: Option<String>) -> Overrides {
        Overrides {
            components_dir,
            format: self.format,
            output: self.output,
            out_dir: self.out_dir,
            port: self.port,
            ignore: self.ignore_paths,
        }
    }
}

fn default_color() -> bool {
    std::env::var("CI").map(|v| v.is_empty()).unwrap_or(true)
}

fn highlight(s: &str, color: bool) -> String {
    if color {
        s.blue().to_string()
    } else {
        s.to_string()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let root: VfsPath = PhysicalFS::new(&cli.root).into();
    let logger = ConsoleLogger {
        color: cli.color,
        verbose: cli.verbose,
    };
    let config = vurif_config::load_config(&root, &logger)?;

    let (settings, analysis, input) = match cli.command {
        Command::Load {
            page_file,
            components_dir,
            shared,
        } => {
            let settings = Settings::resolve(shared.into_overrides(components_dir), config)?;
            logger.log(
                LogLevel::Info,
                &format!(
                    "Exploring \"{}\" dependencies from \"{}\"",
                    highlight(&page_file, cli.color),
                    highlight(&settings.components_dir, cli.color)
                ),
            );
            let analysis = vurif::analyze_file(
                &root,
                &page_file,
                &settings.components_dir,
                &settings.ignore,
                &logger,
            )?;
            (settings, analysis, page_file)
        }
        Command::LoadAll {
            views_dir,
            components_dir,
            shared,
        } => {
            let settings = Settings::resolve(shared.into_overrides(components_dir), config)?;
            logger.log(
                LogLevel::Info,
                &format!(
                    "Traversing \"{}\" associated with \"{}\"",
                    highlight(&views_dir, cli.color),
                    highlight(&settings.components_dir, cli.color)
                ),
            );
            let analysis = vurif::analyze_dir(
                &root,
                &views_dir,
                &settings.components_dir,
                &settings.ignore,
                &logger,
            )?;
            (settings, analysis, views_dir)
        }
    };

    finish(&analysis, &settings, &root, &logger, &input)
}

fn finish(
    analysis: &Analysis,
    settings: &Settings,
    root: &VfsPath,
    logger: &dyn Logger,
    input: &str,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    vurif::emit(analysis, settings, root, &mut stdout.lock(), logger)?;
    logger.log(
        LogLevel::Success,
        &format!("Analysis succeeded for: {}", input),
    );
    if settings.format == OutputFormat::Graph {
        vurif_server::serve_blocking(vurif::out_dir_path(root, settings)?, settings.port, logger)?;
    }
    Ok(())
}
