//! Process command - convert a single purchase order.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use pofix_core::{OrderProcessor, PofixConfig};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input HTML file ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "fixed-width")]
    format: OutputFormat,

    /// Trim whitespace around text cells
    #[arg(long)]
    trim: bool,

    /// Cut values that do not fit their column
    #[arg(long)]
    truncate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// UNH/CLO/OLD/OLDA fixed-width records
    FixedWidth,
    /// Parsed order as JSON
    Json,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    apply_overrides(&mut config, args.trim, args.truncate);

    let html = read_input(&args.input)?;
    info!("Processing {} ({} bytes)", args.input.display(), html.len());

    let processor = OrderProcessor::from_config(&config);
    let output = convert(&processor, &html, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Command-line switches only ever turn options on.
pub fn apply_overrides(config: &mut PofixConfig, trim: bool, truncate: bool) {
    config.parser.trim_cell_text |= trim;
    config.format.truncate_overflow |= truncate;
}

/// Convert one document in the requested format.
pub fn convert(
    processor: &OrderProcessor,
    html: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::FixedWidth => processor.process(html)?,
        OutputFormat::Json => serde_json::to_string_pretty(&processor.parse(html)?)?,
    };
    Ok(output)
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let bytes = fs::read(input)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
