use crate::forest::Declaration;
use crate::heuristics::Heuristics;
use crate::ir::{DependencyData, InjectionType, ParsedProject, RelationType, Relationship};
use log::debug;
use std::collections::HashMap;

/// Extractor building transient relationship edges between declarations.
///
/// Injection evidence is either an explicit dependency tag or the
/// service-likelihood naming heuristic; inheritance and implementation edges
/// are recorded unconditionally. The edges exist only to populate endpoint
/// dependency lists via [`fold_dependencies`].
pub struct RelationshipExtractor {
    heuristics: Heuristics,
}

impl RelationshipExtractor {
    /// Create a relationship extractor with the given heuristic configuration
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Extracts all relationship edges from the given declarations.
    pub fn extract(&self, declarations: &[&Declaration]) -> Vec<Relationship> {
        let mut relationships = Vec::new();

        for decl in declarations {
            self.extract_injections(decl, &mut relationships);
            Self::extract_inheritance(decl, &mut relationships);
        }

        debug!("Extracted {} relationships", relationships.len());
        relationships
    }

    fn extract_injections(&self, decl: &Declaration, out: &mut Vec<Relationship>) {
        let source = decl.qualified_name();

        for field in &decl.fields {
            let tagged = field
                .tags
                .iter()
                .any(|t| self.heuristics.dependency_tags.contains(&t.name));

            if tagged
                || self.heuristics.is_likely_service(&field.ty.name)
                || self.heuristics.is_likely_service(&field.name)
            {
                out.push(Relationship::injects(
                    source.clone(),
                    field.ty.name.clone(),
                    field.name.clone(),
                    InjectionType::Field,
                ));
            }
        }

        for constructor in &decl.constructors {
            // Only a constructor that takes parameters can inject anything
            if constructor.parameters.is_empty() {
                continue;
            }

            for param in &constructor.parameters {
                if self.heuristics.is_likely_service(&param.ty.name)
                    || self.heuristics.is_likely_service(&param.name)
                {
                    out.push(Relationship::injects(
                        source.clone(),
                        param.ty.name.clone(),
                        param.name.clone(),
                        InjectionType::Constructor,
                    ));
                }
            }
        }
    }

    fn extract_inheritance(decl: &Declaration, out: &mut Vec<Relationship>) {
        let source = decl.qualified_name();

        for target in &decl.extends {
            out.push(Relationship::inheritance(
                source.clone(),
                target.clone(),
                RelationType::Extends,
            ));
        }

        for target in &decl.implements {
            out.push(Relationship::inheritance(
                source.clone(),
                target.clone(),
                RelationType::Implements,
            ));
        }
    }
}

/// Groups INJECTS edges by fully-qualified source class and assigns each
/// group to every endpoint whose `controllerPackage.controllerName` matches.
/// Endpoints without a matching group keep an empty dependency list.
pub fn fold_dependencies(relationships: Vec<Relationship>, project: &mut ParsedProject) {
    let mut by_class: HashMap<String, Vec<DependencyData>> = HashMap::new();

    for rel in relationships {
        if rel.rel_type != RelationType::Injects {
            continue;
        }

        let (Some(name), Some(injection_type)) = (rel.name, rel.injection_type) else {
            continue;
        };

        by_class.entry(rel.source_class).or_default().push(DependencyData {
            name,
            ty: rel.target_class,
            injection_type,
        });
    }

    for endpoint in project.endpoints_mut() {
        let qualified = format!("{}.{}", endpoint.controller_package, endpoint.controller_name);
        if let Some(dependencies) = by_class.get(&qualified) {
            endpoint.dependencies = dependencies.clone();
        }
    }
}
