mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use hoa_core::Provisioner;
use hoa_core::compose::{self, MethodIndex};
use hoa_core::config::{self, BuildConfig, CONFIG_FILE_NAME};
use hoa_core::parse;
use hoa_core::resources::OutputFormat;

use writer::ArtifactWriter;

#[derive(Parser)]
#[command(
    name = "hoa",
    about = "Compose an HTTP API deployment from an OpenAPI contract",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wire integrations into the contract and write deployment artifacts
    Compose {
        /// Path to the config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Override the contract document path from the config
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Override the output directory from the config
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Artifact format
        #[arg(long, default_value = "json")]
        format: Format,
    },

    /// Validate a contract document
    Validate {
        /// Path to the contract document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the operationId → path/method index of a contract document
    Inspect {
        /// Path to the contract document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: Format,
    },

    /// Initialize a new hoa configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => OutputFormat::Yaml,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compose {
            config,
            input,
            output,
            format,
        } => cmd_compose(&config, input, output, format),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Inspect { input, format } => cmd_inspect(&input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "hoa", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_build_config(path: &Path) -> Result<BuildConfig> {
    config::load_config(path)?.with_context(|| {
        format!(
            "{} not found. Run `hoa init` to create one.",
            path.display()
        )
    })
}

/// Paths in the config are relative to the config file.
fn relative_to(config_path: &Path, path: &str) -> PathBuf {
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    base.join(path)
}

fn cmd_compose(
    config_path: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let cfg = load_build_config(config_path)?;
    let input = input.unwrap_or_else(|| relative_to(config_path, &cfg.open_api_spec));
    let output = output.unwrap_or_else(|| relative_to(config_path, &cfg.output));

    let document = parse::from_path(&input)
        .with_context(|| format!("failed to load contract {}", input.display()))?;

    eprintln!("Composing {} → {}", input.display(), output.display());
    let bundle = compose::compose(document, &cfg)?;

    let writer = ArtifactWriter {
        output_dir: output,
        format: format.into(),
    };
    writer
        .provision(&bundle)
        .with_context(|| format!("failed to write artifacts to {}", writer.output_dir.display()))?;

    eprintln!(
        "Composed {} functions and {} permissions{}",
        bundle.functions.len(),
        bundle.permissions.len(),
        if bundle.domain.is_some() {
            " with custom domain"
        } else {
            ""
        }
    );
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let document = parse::from_path(input)?;
    let index = MethodIndex::build(&document);

    eprintln!(
        "Valid contract: {}",
        document.title().unwrap_or("(untitled)")
    );
    eprintln!("  Paths: {}", document.paths.len());
    eprintln!("  Operations: {}", index.len());

    for dup in index.duplicates() {
        eprintln!(
            "  warning: operationId {} at {} is shadowed by {}",
            dup.operation_id, dup.replaced, dup.kept
        );
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: &Path, format: Format) -> Result<()> {
    let document = parse::from_path(input)?;
    let index = MethodIndex::build(&document);

    let rendered = OutputFormat::from(format).render(index.entries())?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
