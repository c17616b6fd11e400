//! Print the OpenAPI document as JSON, to stdout or a file.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use gamer_society::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Export the Gamer Society OpenAPI document")]
struct Args {
    /// Write to this path instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Emit compact rather than pretty-printed JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()
    } else {
        doc.to_pretty_json()
    }
    .wrap_err("serialise OpenAPI document")?;

    match args.output {
        Some(path) => fs::write(&path, json)
            .wrap_err_with(|| format!("write OpenAPI document to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
