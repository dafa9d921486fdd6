//! Extraction pipeline over the declaration forest.
//!
//! Three extractors consume classified declarations: models/enumerations,
//! endpoints, and relationships. [`ProjectExtractor`] wires them together in
//! a single forest traversal whose insertion order is preserved all the way
//! into the synthesized document.

pub mod endpoints;
pub mod models;
pub mod relationships;

use crate::classifier::{Classification, DeclarationClassifier};
use crate::forest::{Declaration, DeclarationKind, LoadedForest};
use crate::heuristics::Heuristics;
use crate::ir::ParsedProject;
use crate::tags::TagRegistry;
use log::debug;

pub use endpoints::EndpointExtractor;
pub use models::ModelExtractor;
pub use relationships::{fold_dependencies, RelationshipExtractor};

/// The full extraction pipeline: classify every declaration, extract models
/// and endpoints, then fold injection relationships into endpoint dependency
/// lists.
pub struct ProjectExtractor {
    classifier: DeclarationClassifier,
    model_extractor: ModelExtractor,
    endpoint_extractor: EndpointExtractor,
    relationship_extractor: RelationshipExtractor,
}

impl ProjectExtractor {
    /// Create a pipeline with the default heuristics and built-in tag
    /// handlers
    pub fn new() -> Self {
        Self::with_config(Heuristics::default(), TagRegistry::with_builtins())
    }

    /// Create a pipeline with custom heuristics and tag registry
    pub fn with_config(heuristics: Heuristics, registry: TagRegistry) -> Self {
        Self {
            classifier: DeclarationClassifier::new(heuristics.clone()),
            model_extractor: ModelExtractor::new(registry),
            endpoint_extractor: EndpointExtractor::new(heuristics.clone()),
            relationship_extractor: RelationshipExtractor::new(heuristics),
        }
    }

    /// Runs extraction over the loaded forests, producing the project IR.
    pub fn extract_project(&self, forests: &[LoadedForest]) -> ParsedProject {
        let declarations: Vec<&Declaration> = forests
            .iter()
            .flat_map(|f| f.declarations.iter())
            .collect();

        debug!("Extracting project from {} declarations", declarations.len());

        let mut project = ParsedProject::new();

        for decl in &declarations {
            match self.classifier.classify(decl) {
                Classification::Controller => {
                    for endpoint in self.endpoint_extractor.extract(decl) {
                        project.add_endpoint(endpoint);
                    }
                }
                Classification::Model => {
                    let model = if decl.kind == DeclarationKind::Enum {
                        self.model_extractor.extract_enum(decl)
                    } else {
                        self.model_extractor.extract(decl)
                    };
                    project.add_model(model);
                }
                Classification::Skip => {
                    // Lower-priority pass: property-shaped interfaces still
                    // become models
                    if self.classifier.is_interface_model_candidate(decl) {
                        project.add_model(self.model_extractor.extract_interface(decl));
                    }
                }
            }
        }

        let relationships = self.relationship_extractor.extract(&declarations);
        fold_dependencies(relationships, &mut project);

        debug!(
            "Extraction complete: {} endpoints, {} models",
            project.endpoints().len(),
            project.models().len()
        );

        project
    }
}

impl Default for ProjectExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{FieldNode, MethodNode, TagNode, TypeNode};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn forest(declarations: Vec<Declaration>) -> LoadedForest {
        LoadedForest {
            path: PathBuf::from("test.json"),
            declarations,
        }
    }

    fn decl(name: &str, namespace: &str, kind: DeclarationKind) -> Declaration {
        Declaration {
            name: name.to_string(),
            namespace: namespace.to_string(),
            kind,
            is_abstract: false,
            tags: Vec::new(),
            doc: None,
            extends: Vec::new(),
            implements: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
        }
    }

    fn tag(name: &str, attrs: &[(&str, &str)]) -> TagNode {
        TagNode {
            name: name.to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn simple_type(name: &str) -> TypeNode {
        TypeNode {
            name: name.to_string(),
            args: vec![],
            is_array: false,
        }
    }

    fn sample_controller() -> Declaration {
        let mut d = decl("UserController", "com.shop.controller", DeclarationKind::Class);
        d.tags.push(tag("RestController", &[]));
        d.tags.push(tag("RequestMapping", &[("value", "/api/users")]));
        d.fields.push(FieldNode {
            name: "userService".to_string(),
            ty: simple_type("UserService"),
            is_static: false,
            is_final: false,
            tags: vec![tag("Autowired", &[])],
            doc: None,
        });
        d.methods.push(MethodNode {
            name: "getUser".to_string(),
            parameters: vec![],
            return_type: Some(simple_type("User")),
            tags: vec![tag("GetMapping", &[("value", "/{id}")])],
            doc: None,
        });
        d
    }

    #[test]
    fn test_pipeline_extracts_models_and_endpoints() {
        let mut user = decl("User", "com.shop.model", DeclarationKind::Class);
        user.fields.push(FieldNode {
            name: "id".to_string(),
            ty: simple_type("long"),
            is_static: false,
            is_final: false,
            tags: vec![],
            doc: None,
        });

        let service = decl("UserService", "com.shop.service", DeclarationKind::Class);

        let project = ProjectExtractor::new().extract_project(&[forest(vec![
            user,
            service,
            sample_controller(),
        ])]);

        assert_eq!(project.models().len(), 1);
        assert_eq!(project.models()[0].name, "User");

        assert_eq!(project.endpoints().len(), 1);
        assert_eq!(project.endpoints()[0].path, "/api/users/{id}");
    }

    #[test]
    fn test_pipeline_folds_dependencies() {
        let project = ProjectExtractor::new().extract_project(&[forest(vec![sample_controller()])]);

        let deps = &project.endpoints()[0].dependencies;
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "userService");
    }

    #[test]
    fn test_pipeline_mines_candidate_interfaces() {
        let mut view = decl("UserView", "com.shop.model", DeclarationKind::Interface);
        view.methods.push(MethodNode {
            name: "getName".to_string(),
            parameters: vec![],
            return_type: Some(simple_type("String")),
            tags: vec![],
            doc: None,
        });

        let plain = decl("Marker", "com.shop.misc", DeclarationKind::Interface);

        let project = ProjectExtractor::new().extract_project(&[forest(vec![view, plain])]);

        assert_eq!(project.models().len(), 1);
        assert!(project.models()[0].is_interface);
        assert_eq!(project.models()[0].fields[0].name, "name");
    }

    #[test]
    fn test_pipeline_preserves_cross_forest_order() {
        let a = forest(vec![decl("Alpha", "com.shop.model", DeclarationKind::Class)]);
        let b = forest(vec![decl("Beta", "com.shop.model", DeclarationKind::Class)]);

        let project = ProjectExtractor::new().extract_project(&[a, b]);
        let names: Vec<_> = project.models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }
}
