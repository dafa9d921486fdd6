//! OpenAPI from Declarations - Command-line tool for generating OpenAPI
//! documents from annotated web-service declaration forests.
//!
//! An external syntax-tree builder turns the service's sources into JSON
//! declaration forests; this binary extracts endpoints and data models from
//! those forests and synthesizes an OpenAPI 3.0 document (or the raw
//! intermediate representation).
//!
//! # Usage
//!
//! ```bash
//! openapi-from-declarations [OPTIONS] <FOREST_PATH>
//! ```
//!
//! # Examples
//!
//! Generate a JSON document:
//! ```bash
//! openapi-from-declarations ./forest-out -o openapi.json
//! ```
//!
//! Generate YAML:
//! ```bash
//! openapi-from-declarations ./forest-out -f yaml -o openapi.yaml
//! ```
//!
//! Emit the raw intermediate representation:
//! ```bash
//! openapi-from-declarations ./forest-out -e ir
//! ```

mod classifier;
mod cli;
mod error;
mod extractor;
mod forest;
mod heuristics;
mod ir;
mod openapi_builder;
mod scanner;
mod schema_builder;
mod serializer;
mod tags;
mod type_ref;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse args first so the verbose flag can drive logger initialization
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI from Declarations starting...");

    // Now do the full validation pass
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
