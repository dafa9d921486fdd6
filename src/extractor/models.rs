use crate::forest::{ConstantNode, Declaration, FieldNode, MethodNode};
use crate::ir::{FieldData, ModelData};
use crate::tags::TagRegistry;
use crate::type_ref;
use log::debug;

/// Extractor building [`ModelData`] records from classified model
/// declarations.
///
/// Declaration-level tag handlers run before documentation processing so that
/// free-text documentation, when present, takes precedence over tag-supplied
/// descriptions; the same order applies to members.
pub struct ModelExtractor {
    registry: TagRegistry,
}

impl ModelExtractor {
    /// Create a model extractor using the given tag registry
    pub fn new(registry: TagRegistry) -> Self {
        Self { registry }
    }

    /// Extracts a model from a class or record declaration.
    ///
    /// Static and final members are excluded; every remaining field is built
    /// through the member-level tag handlers and the type-reference model.
    pub fn extract(&self, decl: &Declaration) -> ModelData {
        debug!("Extracting model: {}", decl.qualified_name());

        let mut model = ModelData::new(decl.name.clone());

        for tag in &decl.tags {
            self.registry.apply_declaration_tag(tag, &mut model);
        }

        model.extends_list = decl.extends.clone();
        model.implements_list = decl.implements.clone();

        if let Some(doc) = decl.doc_text() {
            model.description = Some(doc.to_string());
        }

        for field in &decl.fields {
            if field.is_static || field.is_final {
                continue;
            }
            model.add_field(self.extract_field(field));
        }

        debug!("Extracted {} fields for {}", model.fields.len(), model.name);
        model
    }

    /// Extracts an enumeration as a model with one typeless field per
    /// constant.
    pub fn extract_enum(&self, decl: &Declaration) -> ModelData {
        debug!("Extracting enum: {}", decl.qualified_name());

        let mut model = ModelData::new(decl.name.clone());
        model.is_enum = true;

        for tag in &decl.tags {
            self.registry.apply_declaration_tag(tag, &mut model);
        }

        if let Some(doc) = decl.doc_text() {
            model.description = Some(doc.to_string());
        }

        for constant in &decl.constants {
            model.add_field(Self::extract_constant(constant));
        }

        model
    }

    /// Mines an interface declaration for property-shaped accessor methods.
    ///
    /// An accessor is a zero-parameter method named `getXxx` or `isXxx` with
    /// a produced type; the prefix is stripped and the first letter lowercased
    /// to form the property name.
    pub fn extract_interface(&self, decl: &Declaration) -> ModelData {
        debug!("Mining interface: {}", decl.qualified_name());

        let mut model = ModelData::new(decl.name.clone());
        model.is_interface = true;

        for tag in &decl.tags {
            self.registry.apply_declaration_tag(tag, &mut model);
        }

        model.extends_list = decl.extends.clone();
        model.implements_list = decl.implements.clone();

        if let Some(doc) = decl.doc_text() {
            model.description = Some(doc.to_string());
        }

        for method in &decl.methods {
            if let Some(field) = self.accessor_to_field(method) {
                model.add_field(field);
            }
        }

        model
    }

    fn extract_field(&self, field: &FieldNode) -> FieldData {
        let mut data = FieldData::new(field.name.clone());

        for tag in &field.tags {
            self.registry.apply_member_tag(tag, &mut data);
        }

        if let Some(doc) = field.doc_text() {
            data.description = Some(doc.to_string());
        }

        data.type_ref = Some(type_ref::resolve(&field.ty));
        data
    }

    fn extract_constant(constant: &ConstantNode) -> FieldData {
        let mut data = FieldData::new(constant.name.clone());
        if let Some(doc) = constant.doc_text() {
            data.description = Some(doc.to_string());
        }
        data
    }

    fn accessor_to_field(&self, method: &MethodNode) -> Option<FieldData> {
        if !method.parameters.is_empty() {
            return None;
        }

        let return_type = method.return_type.as_ref()?;
        let property = property_name(&method.name)?;

        let mut data = FieldData::new(property);

        for tag in &method.tags {
            self.registry.apply_member_tag(tag, &mut data);
        }

        if let Some(doc) = method.doc_text() {
            data.description = Some(doc.to_string());
        }

        data.type_ref = Some(type_ref::resolve(return_type));
        Some(data)
    }
}

/// Derives a property name from a `getXxx`/`isXxx` accessor name.
fn property_name(method_name: &str) -> Option<String> {
    let rest = method_name
        .strip_prefix("get")
        .or_else(|| method_name.strip_prefix("is"))?;

    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }

    Some(first.to_lowercase().collect::<String>() + chars.as_str())
}
