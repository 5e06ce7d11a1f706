//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use doctpl_core::{MarkerEvaluator, RenderOptions, Renderer};
use doctpl_data::{load_file, Value};
use doctpl_ooxml::{Document, Template};

#[derive(Parser)]
#[command(name = "doctpl")]
#[command(author, version, about = "Fill Word templates with data", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a DOCX template (or a bare document.xml) with JSON or TOML data
    Render {
        /// Template DOCX/DOTX file, or a document.xml
        input: PathBuf,

        /// Data file (.json or .toml)
        #[arg(short, long)]
        data: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the plain text of a document body
    Text {
        /// Input DOCX file or document.xml
        input: PathBuf,
    },

    /// Decode and re-encode a document without rendering
    Roundtrip {
        /// Input DOCX file or document.xml
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Render option overrides
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Render options file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not merge runs that split a marker
    #[arg(long)]
    pub no_coalesce: bool,

    /// Do not repeat table rows bound to a list
    #[arg(long)]
    pub no_expand: bool,

    /// Leave `[v-merge]` cells as they are
    #[arg(long)]
    pub no_merge: bool,

    /// Look up paragraph markers in the data as given
    #[arg(long)]
    pub no_flatten: bool,
}

impl OptionArgs {
    /// Options from the config file, if any, with the flags applied on top
    pub fn resolve(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => RenderOptions::load(path)
                .with_context(|| format!("Failed to load render options: {}", path.display()))?,
            None => RenderOptions::default(),
        };

        if self.no_coalesce {
            options.coalesce_runs = false;
        }
        if self.no_expand {
            options.expand_tables = false;
        }
        if self.no_merge {
            options.resolve_vertical_merge = false;
        }
        if self.no_flatten {
            options.flatten_root_context = false;
        }
        Ok(options)
    }
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            data,
            output,
            options,
        } => {
            let options = options.resolve()?;
            render_command(&input, &data, &output, &options)?;
        }
        Commands::Text { input } => {
            println!("{}", text_command(&input)?);
        }
        Commands::Roundtrip { input, output } => {
            roundtrip_command(&input, &output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Bare `document.xml` input rather than a package
fn is_document_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

fn read_document_xml(input: &Path) -> Result<Document> {
    let xml = fs::read(input)
        .with_context(|| format!("Failed to read document: {}", input.display()))?;
    Document::parse(&xml).with_context(|| format!("Failed to decode document: {}", input.display()))
}

fn write_document_xml(document: &Document, output: &Path) -> Result<()> {
    let xml = document.to_xml().context("Failed to encode document")?;
    fs::write(output, xml)
        .with_context(|| format!("Failed to write output file: {}", output.display()))
}

fn load_template(input: &Path) -> Result<Template> {
    Template::load(input)
        .with_context(|| format!("Failed to open DOCX file: {}", input.display()))
}

/// Execute the render command
pub fn render_command(
    input: &Path,
    data: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<()> {
    println!("doctpl v{}", doctpl_core::VERSION);
    println!("Rendering: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let data: Value = load_file(data)
        .with_context(|| format!("Failed to load data file: {}", data.display()))?;
    debug!(?options, "Render options");

    let evaluator = MarkerEvaluator::new();
    let renderer = Renderer::with_options(&evaluator, options.clone());

    if is_document_xml(input) {
        let mut document = read_document_xml(input)?;
        renderer
            .render(&mut document, &data)
            .with_context(|| format!("Failed to render template: {}", input.display()))?;
        write_document_xml(&document, output)?;
    } else {
        let mut template = load_template(input)?;
        renderer
            .render_template(&mut template, &data)
            .with_context(|| format!("Failed to render template: {}", input.display()))?;
        template
            .save(output)
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    }

    info!(output = %output.display(), "Rendered template");
    println!("  Created: {}", output.display());
    Ok(())
}

/// Execute the text command, returning the body text
pub fn text_command(input: &Path) -> Result<String> {
    let document = if is_document_xml(input) {
        read_document_xml(input)?
    } else {
        load_template(input)?
            .document()
            .with_context(|| format!("Failed to decode document: {}", input.display()))?
    };
    Ok(document.plain_text())
}

/// Execute the roundtrip command
pub fn roundtrip_command(input: &Path, output: &Path) -> Result<()> {
    println!("doctpl v{}", doctpl_core::VERSION);
    println!("Round-tripping: {}", input.display());

    if is_document_xml(input) {
        let document = read_document_xml(input)?;
        write_document_xml(&document, output)?;
    } else {
        let mut template = load_template(input)?;
        let document = template
            .document()
            .with_context(|| format!("Failed to decode document: {}", input.display()))?;
        template
            .set_document(&document)
            .context("Failed to encode document")?;
        template
            .save(output)
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    }

    println!("  Created: {}", output.display());
    Ok(())
}
