use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI from Declarations - Generate OpenAPI documents from annotated
/// web-service declaration forests
#[derive(Parser, Debug)]
#[command(name = "openapi-from-declarations")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a declaration-forest file or a directory of forest files
    #[arg(value_name = "FOREST_PATH")]
    pub forest_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Which representation to emit
    #[arg(short = 'e', long = "emit", value_enum, default_value = "openapi")]
    pub emit: Emit,

    /// Document title (openapi emission only)
    #[arg(long = "title", default_value = "Generated API Documentation")]
    pub title: String,

    /// Document version (openapi emission only)
    #[arg(long = "api-version", default_value = "1.0.0")]
    pub api_version: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML format
    Yaml,
}

/// Output representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The synthesized OpenAPI document
    Openapi,
    /// The raw intermediate representation
    Ir,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.forest_path.exists() {
        anyhow::bail!(
            "Forest path does not exist: {}",
            args.forest_path.display()
        );
    }

    info!("Forest path: {}", args.forest_path.display());
    info!("Output format: {:?}", args.output_format);
    info!("Emitting: {:?}", args.emit);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::extractor::ProjectExtractor;
    use crate::forest::ForestLoader;
    use crate::openapi_builder::OpenApiBuilder;
    use crate::scanner::FileScanner;
    use crate::schema_builder::SchemaBuilder;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Discover forest files
    info!("Scanning for declaration forests...");
    let scanner = FileScanner::new(args.forest_path.clone());
    let scan_result = scanner.scan()?;

    info!("Found {} forest files", scan_result.forest_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }

    if scan_result.forest_files.is_empty() {
        anyhow::bail!("No declaration-forest files found under the given path");
    }

    // Step 2: Load forests; any invalid forest aborts the run
    info!("Loading declaration forests...");
    let forests = ForestLoader::load_files(&scan_result.forest_files)?;

    let declaration_count: usize = forests.iter().map(|f| f.declarations.len()).sum();
    info!("Loaded {} declarations", declaration_count);

    // Step 3: Extract the IR
    info!("Extracting endpoints and models...");
    let extractor = ProjectExtractor::new();
    let project = extractor.extract_project(&forests);

    info!(
        "Extracted {} endpoints and {} models",
        project.endpoints().len(),
        project.models().len()
    );

    if project.endpoints().is_empty() {
        log::warn!("No endpoints found in the declaration forest");
    }

    // Step 4: Produce the requested representation
    let content = match args.emit {
        Emit::Ir => {
            info!("Serializing raw IR...");
            match args.output_format {
                OutputFormat::Json => serialize_json(&project)?,
                OutputFormat::Yaml => serialize_yaml(&project)?,
            }
        }
        Emit::Openapi => {
            info!("Building OpenAPI document...");
            let mut schema_builder = SchemaBuilder::new();
            let document = OpenApiBuilder::new()
                .with_info(args.title.clone(), args.api_version.clone())
                .build(&project, &mut schema_builder);

            match args.output_format {
                OutputFormat::Json => serialize_json(&document)?,
                OutputFormat::Yaml => serialize_yaml(&document)?,
            }
        }
    };

    // Step 5: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote output to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    // Step 6: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Forest files: {}", scan_result.forest_files.len());
    info!("  - Declarations: {}", declaration_count);
    info!("  - Endpoints: {}", project.endpoints().len());
    info!("  - Models: {}", project.models().len());

    Ok(())
}
