use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use figpress::config::OutputFormat;
use figpress::logging::init_tracing;
use figpress::{FigpressConfig, run};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Json,
    Md,
    Tree,
    Css,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Md => OutputFormat::Markdown,
            CliOutputFormat::Tree => OutputFormat::Tree,
            CliOutputFormat::Css => OutputFormat::Css,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compress Figma designs into compact trees for LLM context", long_about = None)]
struct Args {
    /// Figma links, JSON exports, or "-" for stdin
    sources: Vec<String>,

    /// Figma personal access token
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Prepend a custom prompt/instruction
    #[arg(long)]
    prompt: Option<String>,

    /// Read prompt from file
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// Leave the short-key legend out of the output
    #[arg(long)]
    no_legend: bool,

    /// Disable token counting
    #[arg(long)]
    no_tokens: bool,

    /// Warn when the compact output exceeds this many tokens
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Maximum node depth to compress
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum depth printed by the tree format
    #[arg(long)]
    tree_depth: Option<usize>,

    /// Clamp out-of-range color channels before converting to hex
    #[arg(long)]
    clamp_colors: bool,

    /// Copy output to clipboard
    #[arg(short, long)]
    copy: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default
    let mut config = FigpressConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if !args.sources.is_empty() {
        config.sources = args.sources;
    }
    if args.token.is_some() {
        config.token = args.token;
    }
    if let Some(o) = args.output {
        config.output = Some(o);
    }
    if let Some(f) = args.format {
        config.output_format = f.into();
    }
    if let Some(p) = args.prompt {
        config.prompt = Some(p);
    } else if let Some(path) = args.prompt_file {
        let prompt = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()))?;
        config.prompt = Some(prompt);
    }
    if args.no_legend {
        config.legend = false;
    }
    if args.no_tokens {
        config.no_tokens = true;
    }
    if let Some(t) = args.max_tokens {
        config.max_tokens = Some(t);
    }
    if let Some(d) = args.max_depth {
        config.max_depth = d;
    }
    if let Some(d) = args.tree_depth {
        config.tree_depth = d;
    }
    if args.clamp_colors {
        config.clamp_colors = true;
    }
    if args.copy {
        config.clipboard_copy = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    init_tracing(config.verbose);

    run(config)
}
