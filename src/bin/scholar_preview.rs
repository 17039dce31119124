//! scholar-preview CLI - render LaTeX previews from the command line

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use scholar_preview::{
    analyze_latex, latex_to_html,
    utils::{metrics_source, PreviewError, PreviewResult},
    ContentHash, PartialPreviewConfig, PreviewCompiler, PreviewConfig, PreviewQuality,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing::info;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "scholar-preview")]
#[command(version)]
#[command(about = "Render LaTeX to an HTML preview, remotely or with the local fallback", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Remote compile endpoint (overrides config and environment)
    #[arg(long)]
    endpoint: Option<String>,

    /// Never contact the compile service
    #[arg(long)]
    offline: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Quality requested from the compile service
    #[arg(short, long, value_enum)]
    quality: Option<QualityArg>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip HTML enhancement (offline mode only)
    #[arg(long)]
    no_enhance: bool,

    /// Print the full result (html + metadata) as JSON
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print content flags and required packages as JSON
    Analyze {
        /// Input file to analyze
        input: Option<String>,
    },

    /// Print structural counts (headings, equations, figures, ...)
    Stats {
        /// Input file
        input: Option<String>,
    },

    /// Print the cache key for a source
    Hash {
        /// Input file
        input: Option<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    Fast,
    Accurate,
}

#[cfg(feature = "cli")]
impl From<QualityArg> for PreviewQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Fast => PreviewQuality::Fast,
            QualityArg::Accurate => PreviewQuality::Accurate,
        }
    }
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("✓ Output written to: {}", path);
            Ok(())
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
fn to_json<T: serde::Serialize>(value: &T) -> PreviewResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(feature = "cli")]
fn load_config(cli: &Cli) -> PreviewResult<PreviewConfig> {
    let mut config = PreviewConfig::from_env()?;
    if let Some(path) = cli.config.as_deref() {
        config = config.merge(PartialPreviewConfig::from_file(path)?);
    }
    let mut config = config.merge(PartialPreviewConfig {
        endpoint: cli.endpoint.clone(),
        quality: cli.quality.map(Into::into),
        timeout_secs: cli.timeout,
        ..PartialPreviewConfig::default()
    });
    if cli.offline {
        config.endpoint = None;
    }
    Ok(config)
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> PreviewResult<()> {
    match cmd {
        Commands::Analyze { input } => {
            let source = read_input(input.as_deref())?;
            println!("{}", to_json(&analyze_latex(&source))?);
        }
        Commands::Stats { input } => {
            let source = read_input(input.as_deref())?;
            println!("{}", to_json(&metrics_source(&source))?);
        }
        Commands::Hash { input } => {
            let source = read_input(input.as_deref())?;
            let hash = ContentHash::of(&source);
            println!("{} ({})", hash.value(), hash);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
async fn run(mut cli: Cli) -> PreviewResult<()> {
    if let Some(cmd) = cli.command.take() {
        return handle_subcommand(cmd);
    }

    let config = load_config(&cli)?;
    let source = read_input(cli.input_file.as_deref())?;

    if cli.no_enhance {
        if config.endpoint.is_some() {
            return Err(PreviewError::config("--no-enhance requires --offline or no endpoint"));
        }
        return Ok(write_output(cli.output.as_deref(), &latex_to_html(&source))?);
    }

    let compiler = PreviewCompiler::from_config(&config)?;
    info!(
        endpoint = config.endpoint.as_deref().unwrap_or("<offline>"),
        quality = %config.quality,
        "compiling preview"
    );
    let result = compiler.compile_latex(&source).await;
    info!(quality = %result.metadata.preview_quality, bytes = result.html.len(), "preview ready");

    let output = if cli.json {
        to_json(&result)?
    } else {
        result.html
    };
    Ok(write_output(cli.output.as_deref(), &output)?)
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scholar_preview=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("✗ {}", err);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install scholar-preview --features cli");
    eprintln!("  scholar-preview [OPTIONS] [INPUT_FILE]");
}
