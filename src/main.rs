//! Command-line interface for ddms

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use ddms::{Component, Config, Context, DdmsComponent, DdmsVersion, IndexLevel};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "ddms")]
#[command(author, version, about = "DDMS component validation and rendering tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a DDMS component and list its warnings
    Validate {
        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// DDMS version (defaults to the version of the root namespace)
        #[arg(long = "ddms-version", value_name = "V")]
        ddms_version: Option<String>,

        /// JSON configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the result and warnings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a DDMS component as XML, HTML, text or JSON
    Render {
        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output index level: 0, 1 or 2 (defaults to the configured level)
        #[arg(short, long)]
        index_level: Option<u8>,

        /// DDMS version (defaults to the version of the root namespace)
        #[arg(long = "ddms-version", value_name = "V")]
        ddms_version: Option<String>,

        /// JSON configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List supported DDMS versions
    Versions,
}

#[cfg(feature = "cli")]
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Xml,
    Html,
    Text,
    Json,
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            file,
            ddms_version,
            config,
            json,
        } => cmd_validate(file, ddms_version, config, json),
        Commands::Render {
            file,
            format,
            index_level,
            ddms_version,
            config,
        } => cmd_render(file, format, index_level, ddms_version, config),
        Commands::Versions => {
            cmd_versions();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_component(
    file: &Path,
    ddms_version: Option<&str>,
    config: Option<&Path>,
) -> Result<(Component, Config), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let xml = fs::read_to_string(file)?;

    let component = match ddms_version {
        Some(token) => {
            let version = DdmsVersion::parse(token)?;
            Component::parse(&xml, &Context::with_config(version, config.clone()))?
        }
        None => Component::parse_detected(&xml, config.clone())?,
    };
    Ok((component, config))
}

#[cfg(feature = "cli")]
fn cmd_validate(
    file: PathBuf,
    ddms_version: Option<String>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (component, _) = load_component(&file, ddms_version.as_deref(), config.as_deref())?;

    if json {
        let report = serde_json::json!({
            "component": component.qualified_name(),
            "version": component.version().as_str(),
            "warnings": component.validation_warnings(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "✓ {} is valid (DDMS {})",
        component.qualified_name(),
        component.version()
    );

    let warnings = component.validation_warnings();
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_render(
    file: PathBuf,
    format: Format,
    index_level: Option<u8>,
    ddms_version: Option<String>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (component, config) = load_component(&file, ddms_version.as_deref(), config.as_deref())?;
    let level = match index_level {
        Some(level) => IndexLevel::from_u8(level)?,
        None => config.output_index_level()?,
    };

    match format {
        Format::Xml => println!("{}", component.to_xml()),
        Format::Html => print!("{}", component.to_html(level)),
        Format::Text => print!("{}", component.to_text(level)),
        Format::Json => {
            let output = component.output(level);
            println!("{}", serde_json::to_string_pretty(output.entries())?);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_versions() {
    println!("Supported DDMS versions:");
    for version in DdmsVersion::ALL {
        println!(
            "  {:<6} {}  (ISM: {})",
            version.as_str(),
            version.namespace(),
            version.ism_namespace()
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
