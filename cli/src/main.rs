use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use introspection_codegen_core::pb;
use introspection_codegen_core::{decode, parse, transform, TransformOptions, Transformer};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "introspection-codegen")]
#[command(about = "Normalize a GraphQL introspection result for SDK code generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform introspection JSON into the normalized protobuf schema
    Transform {
        /// Introspection JSON file (`-` reads stdin)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Proto)]
        format: OutputFormat,

        /// JSON file with transform options (`root-type`, `client-name`)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Name of the root operation type in the input
        #[arg(long)]
        root_type: Option<String>,

        /// Name the root type is emitted under
        #[arg(long)]
        client_name: Option<String>,
    },

    /// Decode a protobuf schema produced by `transform` and print it as JSON
    Inspect {
        /// Encoded schema file
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    /// Protobuf wire bytes
    Proto,
    /// Compact JSON view of the normalized schema
    Json,
    /// Pretty JSON view of the normalized schema
    PrettyJson,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: logs go to stderr so stdout stays clean for output
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Transform {
            input,
            output,
            format,
            config,
            root_type,
            client_name,
        } => {
            let mut options = match config {
                Some(path) => load_options(&path)?,
                None => TransformOptions::default(),
            };
            // Flags win over the config file
            if let Some(root_type) = root_type {
                options.root_type = root_type;
            }
            if let Some(client_name) = client_name {
                options.client_name = client_name;
            }

            let text = read_input(&input)?;
            let schema = parse(&text)
                .map_err(|e| anyhow::Error::from(e).context("Failed to parse introspection"))?;

            match format {
                OutputFormat::Proto => {
                    let bytes = transform(&schema, &options)
                        .map_err(|e| anyhow::Error::from(e).context("Transformation failed"))?;
                    write_bytes(&bytes, output.as_ref())?;
                }
                OutputFormat::Json | OutputFormat::PrettyJson => {
                    let normalized = Transformer::new(options)
                        .transform(&schema)
                        .map_err(|e| anyhow::Error::from(e).context("Transformation failed"))?;
                    let pretty = format == OutputFormat::PrettyJson;
                    write_json(&normalized, output.as_ref(), pretty)?;
                }
            }
        }
        Commands::Inspect {
            input,
            output,
            compact,
        } => {
            let bytes = fs::read(&input)
                .with_context(|| format!("Failed to read input file: {}", input.display()))?;
            let schema: pb::Schema = decode(&bytes)
                .map_err(|e| anyhow::Error::from(e).context("Failed to decode schema"))?;
            write_json(&schema, output.as_ref(), !compact)?;
        }
    }

    Ok(())
}

fn load_options(path: &Path) -> Result<TransformOptions> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config from: {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read introspection from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    Ok(writer)
}

fn write_bytes(bytes: &[u8], path: Option<&PathBuf>) -> Result<()> {
    let mut writer = open_output(path)?;
    writer.write_all(bytes).context("Failed to write schema")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_json<T: serde::Serialize>(val: &T, path: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let mut writer = open_output(path)?;

    if pretty {
        serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
    } else {
        serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
