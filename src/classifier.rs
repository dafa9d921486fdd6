use crate::forest::{Declaration, DeclarationKind};
use crate::heuristics::Heuristics;
use log::debug;

/// How a declaration participates in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Extract as a data model (or enumeration)
    Model,
    /// Extract endpoints from it
    Controller,
    /// Exclude from the IR
    Skip,
}

/// Classifier deciding whether a declaration is a model, a controller, or
/// infrastructure to be skipped.
///
/// The controller check runs first: a controller keeps its role even when it
/// lives under a namespace the infrastructure heuristic would reject (almost
/// all controllers do). After that, interfaces, abstract types, and anything
/// under an infrastructure namespace are skipped. The namespace check comes
/// before the model-tag check, so a class under a `service` namespace is
/// skipped even when it carries a model tag.
pub struct DeclarationClassifier {
    heuristics: Heuristics,
}

impl DeclarationClassifier {
    /// Create a classifier with the given heuristic configuration
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Classify a declaration.
    pub fn classify(&self, decl: &Declaration) -> Classification {
        if self.is_controller(decl) {
            debug!("Classified {} as controller", decl.qualified_name());
            return Classification::Controller;
        }

        if decl.kind == DeclarationKind::Interface || decl.is_abstract {
            debug!("Skipping {} (interface or abstract)", decl.qualified_name());
            return Classification::Skip;
        }

        if self.in_infrastructure_namespace(decl) {
            debug!("Skipping {} (infrastructure namespace)", decl.qualified_name());
            return Classification::Skip;
        }

        if self.has_model_tag(decl)
            || self.in_model_namespace(decl)
            || decl.kind == DeclarationKind::Enum
            || decl.kind == DeclarationKind::Record
        {
            debug!("Classified {} as model", decl.qualified_name());
            return Classification::Model;
        }

        debug!("Skipping {} (no classification matched)", decl.qualified_name());
        Classification::Skip
    }

    /// Whether an interface declaration qualifies for the lower-priority
    /// accessor-mining pass: outside infrastructure namespaces, and either
    /// tagged as a model or located in a model namespace.
    pub fn is_interface_model_candidate(&self, decl: &Declaration) -> bool {
        decl.kind == DeclarationKind::Interface
            && !self.in_infrastructure_namespace(decl)
            && (self.has_model_tag(decl) || self.in_model_namespace(decl))
    }

    fn is_controller(&self, decl: &Declaration) -> bool {
        let has_controller_tag = decl
            .tags
            .iter()
            .any(|t| self.heuristics.controller_tags.contains(&t.name));

        let is_advice = decl
            .tags
            .iter()
            .any(|t| self.heuristics.controller_advice_tags.contains(&t.name));

        has_controller_tag && !is_advice
    }

    fn has_model_tag(&self, decl: &Declaration) -> bool {
        decl.tags
            .iter()
            .any(|t| self.heuristics.model_tags.contains(&t.name))
    }

    fn in_infrastructure_namespace(&self, decl: &Declaration) -> bool {
        let namespace = decl.namespace.to_lowercase();
        self.heuristics
            .infrastructure_namespaces
            .iter()
            .any(|kw| namespace.contains(kw.as_str()))
    }

    fn in_model_namespace(&self, decl: &Declaration) -> bool {
        let namespace = decl.namespace.to_lowercase();
        self.heuristics
            .model_namespaces
            .iter()
            .any(|kw| namespace.contains(kw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::TagNode;
    use std::collections::BTreeMap;

    fn classifier() -> DeclarationClassifier {
        DeclarationClassifier::new(Heuristics::default())
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

    fn tag(name: &str) -> TagNode {
        TagNode {
            name: name.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn test_controller_by_tag() {
        let mut d = decl("UserController", "com.shop.controller", DeclarationKind::Class);
        d.tags.push(tag("RestController"));

        assert_eq!(classifier().classify(&d), Classification::Controller);
    }

    #[test]
    fn test_controller_advice_is_not_a_controller() {
        let mut d = decl("ErrorHandler", "com.shop.api", DeclarationKind::Class);
        d.tags.push(tag("RestController"));
        d.tags.push(tag("ControllerAdvice"));

        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_abstract_controller_still_classified() {
        let mut d = decl("BaseController", "com.shop.api", DeclarationKind::Class);
        d.is_abstract = true;
        d.tags.push(tag("Controller"));

        assert_eq!(classifier().classify(&d), Classification::Controller);
    }

    #[test]
    fn test_interface_skipped() {
        let d = decl("UserRepositoryApi", "com.shop.spi", DeclarationKind::Interface);
        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_abstract_class_skipped() {
        let mut d = decl("BaseEntity", "com.shop.model", DeclarationKind::Class);
        d.is_abstract = true;

        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_model_by_tag() {
        let mut d = decl("Account", "com.shop.core", DeclarationKind::Class);
        d.tags.push(tag("Entity"));

        assert_eq!(classifier().classify(&d), Classification::Model);
    }

    #[test]
    fn test_model_by_namespace() {
        let d = decl("UserDto", "com.shop.dto", DeclarationKind::Class);
        assert_eq!(classifier().classify(&d), Classification::Model);
    }

    #[test]
    fn test_infrastructure_namespace_wins_over_model_tag() {
        // A tagged model under a service namespace is still skipped; the
        // namespace check is evaluated first.
        let mut d = decl("CacheEntry", "com.shop.service.cache", DeclarationKind::Class);
        d.tags.push(tag("Entity"));

        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_namespace_match_is_case_insensitive() {
        let d = decl("Job", "com.shop.Util", DeclarationKind::Class);
        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_enum_is_model() {
        let d = decl("Status", "com.shop.types", DeclarationKind::Enum);
        assert_eq!(classifier().classify(&d), Classification::Model);
    }

    #[test]
    fn test_record_is_model() {
        let d = decl("Point", "com.shop.geo", DeclarationKind::Record);
        assert_eq!(classifier().classify(&d), Classification::Model);
    }

    #[test]
    fn test_plain_class_skipped() {
        let d = decl("Helper", "com.shop.misc", DeclarationKind::Class);
        assert_eq!(classifier().classify(&d), Classification::Skip);
    }

    #[test]
    fn test_interface_model_candidate() {
        let mut tagged = decl("UserView", "com.shop.api.views", DeclarationKind::Interface);
        tagged.tags.push(tag("Schema"));
        assert!(classifier().is_interface_model_candidate(&tagged));

        let in_model_ns = decl("OrderView", "com.shop.model", DeclarationKind::Interface);
        assert!(classifier().is_interface_model_candidate(&in_model_ns));

        let infra = decl("UserService", "com.shop.service", DeclarationKind::Interface);
        assert!(!classifier().is_interface_model_candidate(&infra));

        let plain = decl("Marker", "com.shop.misc", DeclarationKind::Interface);
        assert!(!classifier().is_interface_model_candidate(&plain));

        let class = decl("User", "com.shop.model", DeclarationKind::Class);
        assert!(!classifier().is_interface_model_candidate(&class));
    }
}
