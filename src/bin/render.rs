//! Render a JSON element stream as an AAS XML document.
//!
//! Reads elements (JSON array, single object or NDJSON) from a file or stdin,
//! validates them against the element schema, and writes the `aasenv`
//! document to stdout or `--output`. Entities dropped under
//! `--on-error skip` are listed on stderr.

use anyhow::{Context, Result, bail};
use clap::Parser;
use shellmeta::logging::init_logging;
use shellmeta::xml::{AAS_NAMESPACE, DEFAULT_PREFIX};
use shellmeta::{
    EntitySchema, ErrorPolicy, XmlOptions, elements_from_values, parse_value_stream,
    render_document,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "shellmeta-render",
    about = "Serialize asset graph elements to AAS XML",
    version
)]
struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        default_value = "-",
        help = "Element input (JSON array, object or NDJSON); '-' reads stdin"
    )]
    input: String,

    #[arg(long, value_name = "FILE", help = "Write XML here instead of stdout")]
    output: Option<PathBuf>,

    #[arg(
        long,
        env = "SHELLMETA_PREFIX",
        default_value = DEFAULT_PREFIX,
        help = "Namespace prefix for every element (empty for none)"
    )]
    prefix: String,

    #[arg(
        long,
        env = "SHELLMETA_NAMESPACE",
        value_name = "URI",
        default_value = AAS_NAMESPACE
    )]
    namespace: String,

    #[arg(
        long,
        value_name = "N",
        default_value_t = 2,
        help = "Spaces per nesting level; 0 writes a single line"
    )]
    indent: usize,

    #[arg(
        long,
        env = "SHELLMETA_ON_ERROR",
        value_name = "POLICY",
        default_value = "abort",
        help = "What to do with an element that fails to serialize (abort|skip)"
    )]
    on_error: ErrorPolicy,

    #[arg(
        long,
        env = "SHELLMETA_SCHEMA",
        value_name = "FILE",
        help = "JSON Schema used instead of the bundled element schema"
    )]
    schema: Option<PathBuf>,

    #[arg(long, help = "Skip JSON Schema validation of the input")]
    no_validate: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl CliArgs {
    fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            prefix: self.prefix.clone(),
            namespace: self.namespace.clone(),
            indent: self.indent,
            on_error: self.on_error,
        }
    }

    fn read_input(&self) -> Result<String> {
        if self.input == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            return Ok(buf);
        }
        let path = PathBuf::from(&self.input);
        if !path.is_file() {
            bail!("input file not found: {}", path.display());
        }
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose)?;

    let values = parse_value_stream(&args.read_input()?)?;
    if !args.no_validate {
        let schema = EntitySchema::load(args.schema.as_deref())?;
        schema.validate_all(&values)?;
    }
    let elements = elements_from_values(values)?;

    let document = render_document(&elements, &args.xml_options())?;
    for skipped in &document.skipped {
        eprintln!("skipped element {}: {}", skipped.index + 1, skipped.error);
    }

    match &args.output {
        Some(path) => fs::write(path, &document.xml)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.xml.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
