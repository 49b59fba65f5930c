use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scss_importer::{
    ImporterConfig, ModuleValueSource, NodeEvaluator, ScssImporter, TempArea, ValueSource,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scss-importer")]
#[command(version = scss_importer::VERSION)]
#[command(about = "Resolve SCSS @import references the way the importer does", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project root (default: current directory)
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Temp area for generated declaration files
    #[arg(long, value_name = "DIR", global = true)]
    tmp_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one reference and print the host result as JSON
    Resolve {
        /// Reference as written in the style sheet (e.g. ~bootstrap/scss/grid)
        #[arg(value_name = "REFERENCE")]
        reference: String,

        /// File containing the import
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },

    /// Print the SCSS declarations generated from a .json or .js value module
    Declarations {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Clear the temp area
    Clean,

    /// Print the effective configuration as JSON
    Config,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(cli: &Cli) -> Result<ImporterConfig> {
    let mut config = match &cli.config {
        Some(path) => ImporterConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImporterConfig::default(),
    }
    .with_env_overrides();

    if let Some(root) = &cli.root {
        config.project_root = root.clone();
    }
    if let Some(tmp) = &cli.tmp_dir {
        config.tmp_dir = Some(tmp.clone());
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    log::debug!("Config: {:?}", config);

    match &cli.command {
        Commands::Resolve { reference, from } => {
            let importer = ScssImporter::new(&config).context("Failed to set up importer")?;
            let prev = from.to_string_lossy();

            let result = importer
                .import(reference, &prev)
                .with_context(|| format!("Failed to resolve {}", reference))?;

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }

        Commands::Declarations { input } => {
            let source = ModuleValueSource::new(NodeEvaluator::new(config.node_binary.clone()));
            let tree = source
                .load(input)
                .with_context(|| format!("Failed to load {}", input.display()))?;

            println!("{}", scss_importer::to_declarations(&tree));
            Ok(())
        }

        Commands::Clean => {
            let area = TempArea::prepare(config.tmp_dir()).context("Failed to clear temp area")?;
            log::info!("Cleared {}", area.dir().display());
            Ok(())
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.effective())?);
            Ok(())
        }
    }
}
