//! OpenAPI from Declarations - OpenAPI documents from annotated declaration
//! forests.
//!
//! This library extracts a structured intermediate representation (IR) of a
//! web service's controllers and data models from an annotated declaration
//! forest, then synthesizes an OpenAPI 3.0 document from that IR. Text
//! parsing is delegated to an external syntax-tree builder which emits the
//! forest as JSON; this crate owns the semantic layer: classifying
//! declarations, resolving nested generic type references, reconciling tag
//! metadata with free-text documentation, and composing schema fragments.
//!
//! # Architecture
//!
//! The library is organized into modules that work together:
//!
//! 1. [`scanner`] - Discovers forest files under a project directory
//! 2. [`forest`] - Deserializes the external builder's declaration forest
//! 3. [`classifier`] - Labels declarations as model, controller, or skipped
//! 4. [`type_ref`] - Resolves builder type nodes into recursive type references
//! 5. [`tags`] - Dispatches metadata tags to model/field mutations
//! 6. [`extractor`] - Builds endpoint, model, and relationship records
//! 7. [`schema_builder`] - Converts models to named component schemas
//! 8. [`openapi_builder`] - Constructs the complete OpenAPI document
//! 9. [`serializer`] - Serializes outputs to JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_declarations::{
//!     extractor::ProjectExtractor,
//!     forest::ForestLoader,
//!     openapi_builder::OpenApiBuilder,
//!     scanner::FileScanner,
//!     schema_builder::SchemaBuilder,
//!     serializer::serialize_json,
//! };
//! use std::path::PathBuf;
//!
//! // Discover and load the declaration forests
//! let scanner = FileScanner::new(PathBuf::from("./forest-out"));
//! let scan_result = scanner.scan().unwrap();
//! let forests = ForestLoader::load_files(&scan_result.forest_files).unwrap();
//!
//! // Extract the IR
//! let extractor = ProjectExtractor::new();
//! let project = extractor.extract_project(&forests);
//!
//! // Build and serialize the document
//! let mut schema_builder = SchemaBuilder::new();
//! let document = OpenApiBuilder::new().build(&project, &mut schema_builder);
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod classifier;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod forest;
pub mod heuristics;
pub mod ir;
pub mod openapi_builder;
pub mod scanner;
pub mod schema_builder;
pub mod serializer;
pub mod tags;
pub mod type_ref;
