//! Shared heuristic configuration.
//!
//! Classification and extraction rely on fixed lists of tag names, namespace
//! keywords, and naming conventions. They are modeled as immutable
//! configuration passed into the classifier and extractor constructors rather
//! than as process-wide state, so extraction stays deterministic and each
//! component is testable with a custom vocabulary.

/// Heuristic lists driving classification and dependency detection.
#[derive(Debug, Clone)]
pub struct Heuristics {
    /// Namespace keywords marking infrastructure to be skipped
    pub infrastructure_namespaces: Vec<String>,
    /// Namespace keywords marking data-model packages
    pub model_namespaces: Vec<String>,
    /// Tag names indicating a data model
    pub model_tags: Vec<String>,
    /// Tag names marking a web controller
    pub controller_tags: Vec<String>,
    /// Tag names marking exception-handling advice (excluded from controllers)
    pub controller_advice_tags: Vec<String>,
    /// HTTP-mapping tag names recognized on controller methods
    pub mapping_tags: Vec<String>,
    /// Tag names marking an injected dependency
    pub dependency_tags: Vec<String>,
    /// Type/name suffixes suggesting a service-like collaborator
    pub service_suffixes: Vec<String>,
    /// Generic base names treated as collections by the path synthesizer
    pub collection_bases: Vec<String>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            infrastructure_namespaces: to_strings(&[
                "service",
                "repository",
                "repo",
                "config",
                "controller",
                "util",
                "handler",
            ]),
            model_namespaces: to_strings(&[
                "model", "models", "dto", "dtos", "entity", "entities", "domain",
            ]),
            model_tags: to_strings(&[
                "Entity",
                "Data",
                "Table",
                "JsonProperty",
                "JsonInclude",
                "Schema",
                "ApiModel",
                "Document",
                "Embeddable",
                "Value",
            ]),
            controller_tags: to_strings(&["RestController", "Controller"]),
            controller_advice_tags: to_strings(&["ControllerAdvice"]),
            mapping_tags: to_strings(&[
                "GetMapping",
                "PostMapping",
                "PutMapping",
                "DeleteMapping",
                "PatchMapping",
                "RequestMapping",
            ]),
            dependency_tags: to_strings(&["Autowired", "Inject", "Resource", "Value"]),
            service_suffixes: to_strings(&[
                "Service",
                "Manager",
                "Processor",
                "Handler",
                "Delegate",
                "Provider",
                "Helper",
            ]),
            collection_bases: to_strings(&["List", "Set"]),
        }
    }
}

impl Heuristics {
    /// Whether a type or binding name looks like a service collaborator:
    /// it ends with one of the service suffixes, or contains "service" or
    /// "repository" case-insensitively.
    pub fn is_likely_service(&self, name: &str) -> bool {
        let lowercase = name.to_lowercase();

        self.service_suffixes.iter().any(|s| name.ends_with(s.as_str()))
            || lowercase.contains("service")
            || lowercase.contains("repository")
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
