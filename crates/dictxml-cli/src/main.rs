use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use dictxml::{BuildConfig, EmitConfig, NamespaceStyle, Options, Value};

#[derive(Debug, Parser)]
#[command(
    name = "dictxml",
    version,
    about = "Convert JSON or YAML data into an XML document"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Input format (json, yaml); inferred from the file extension
    #[arg(short, long, value_enum)]
    from: Option<FormatArg>,
    /// Root element name
    #[arg(short, long, default_value = "root")]
    root: String,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Write the <?xml ...?> declaration
    #[arg(short, long)]
    declaration: bool,
    /// Pretty print, indenting by this many spaces
    #[arg(short, long, value_name = "SPACES")]
    indent: Option<usize>,
    /// How namespaces are declared
    #[arg(long, value_enum, default_value_t = StyleArg::Prefixed)]
    namespace_style: StyleArg,
    /// Base of generated namespace prefixes
    #[arg(long, default_value = "ns")]
    prefix: String,
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, default_value_t = 256)]
    max_depth: u16,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    #[value(alias = "yml")]
    Yaml,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Prefixed,
    Default,
}

impl From<StyleArg> for NamespaceStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Prefixed => Self::Prefixed,
            StyleArg::Default => Self::DefaultNamespace,
        }
    }
}

impl Args {
    fn options(&self) -> Options {
        let mut emit = EmitConfig::default()
            .with_declaration(self.declaration)
            .with_namespace_style(self.namespace_style.into())
            .with_prefix(self.prefix.as_str());
        if let Some(width) = self.indent {
            emit = emit.with_indent(" ".repeat(width));
        }
        Options {
            build: BuildConfig::new(self.root.as_str(), self.max_depth),
            emit,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let input_data = read_input(&args.input)?;
    let from = args
        .from
        .or_else(|| infer_format(&args.input))
        .unwrap_or(FormatArg::Json);
    debug!(?from, bytes = input_data.len(), "read input");

    let value = parse_input(&input_data, from)?;
    let output = dictxml::to_xml_string_with_options(&value, &args.options())
        .context("failed to convert input to xml")?;
    info!(bytes = output.len(), "converted");

    write_output(&args.output, output.as_bytes())?;
    Ok(())
}

fn parse_input(data: &str, format: FormatArg) -> Result<Value> {
    match format {
        FormatArg::Json => serde_json::from_str(data).context("failed to parse json input"),
        FormatArg::Yaml => serde_yaml::from_str(data).context("failed to parse yaml input"),
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let mut contents = data.to_vec();
            contents.push(b'\n');
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write output file {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.write_all(b"\n").context("failed to write stdout")?;
            Ok(())
        }
    }
}

fn infer_format(path: &Option<PathBuf>) -> Option<FormatArg> {
    let path = path.as_ref()?;
    let ext = path.extension().and_then(|s| s.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "json" => Some(FormatArg::Json),
        "yaml" | "yml" => Some(FormatArg::Yaml),
        _ => None,
    }
}
