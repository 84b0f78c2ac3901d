use anyhow::{Context, Result};
use blockmark_config::{Config, MentionTable};
use blockmark_engine::{Block, Converter, ConverterOptions, MentionKind, StaticResolver};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/blockmark/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse markup and print the block tree as JSON
    Parse {
        /// Markup file, or `-` for stdin
        input: PathBuf,
        #[arg(long)]
        compact: bool,
    },
    /// Render a JSON block tree as markup
    Render {
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Parse markup and render it again
    Roundtrip {
        /// Markup file, or `-` for stdin
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let converter = build_converter(&config)?;

    let output = match &cli.command {
        Commands::Parse { input, compact } => {
            let tree = converter.parse(&read_input(input)?);
            if *compact {
                serde_json::to_string(&tree)?
            } else {
                serde_json::to_string_pretty(&tree)?
            }
        }
        Commands::Render { input } => {
            let tree: Vec<Block> = serde_json::from_str(&read_input(input)?)
                .with_context(|| format!("Invalid block tree JSON in {}", input.display()))?;
            converter.render(&tree)
        }
        Commands::Roundtrip { input } => converter.render(&converter.parse(&read_input(input)?)),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write output")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file not found: {}", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    log::debug!("Using config: {loaded:?}");
    Ok(loaded)
}

fn build_converter(config: &Config) -> Result<Converter> {
    let options = ConverterOptions {
        indent_width: config.indent_width.max(1),
        max_text_length: config.max_text_length(),
        default_code_language: config.default_code_language.clone(),
    };
    let mentions = config.load_mentions()?;
    let converter = Converter::with_options(options);
    if mentions.is_empty() {
        return Ok(converter);
    }
    log::info!("Loaded {} mention names", mentions.len());
    Ok(converter.with_resolver(Arc::new(resolver_from(&mentions))))
}

fn resolver_from(table: &MentionTable) -> StaticResolver {
    let mut resolver = StaticResolver::new();
    let kinds = [
        (MentionKind::Page, &table.page),
        (MentionKind::Database, &table.database),
        (MentionKind::User, &table.user),
    ];
    for (kind, names) in kinds {
        for (id, name) in names {
            resolver.insert(kind, id, name);
        }
    }
    resolver
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
