//! Metadata tag handler registry.
//!
//! Tag effects are dispatched through two independent name-keyed tables: one
//! for declaration-level tags writing into a [`ModelData`] under
//! construction, one for member-level tags writing into a [`FieldData`].
//! Built-ins cover the persistence, schema-description, deprecation, and
//! validation vocabulary; callers may register additional handlers. Tags with
//! no registered handler are ignored, and a malformed attribute value leaves
//! the corresponding rule unset instead of failing extraction.

use crate::forest::TagNode;
use crate::ir::{FieldData, ModelData};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Attribute map carried by a tag.
pub type TagAttributes = BTreeMap<String, String>;

/// Handler for a declaration-level tag.
pub type DeclarationHandler = Box<dyn Fn(&TagAttributes, &mut ModelData)>;

/// Handler for a member-level tag.
pub type MemberHandler = Box<dyn Fn(&TagAttributes, &mut FieldData)>;

/// Dispatch tables from tag name to the mutation it applies.
pub struct TagRegistry {
    declaration_handlers: HashMap<String, DeclarationHandler>,
    member_handlers: HashMap<String, MemberHandler>,
}

impl TagRegistry {
    /// Create an empty registry with no handlers
    pub fn new() -> Self {
        Self {
            declaration_handlers: HashMap::new(),
            member_handlers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in handlers registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_declaration_handlers();
        registry.register_builtin_member_handlers();
        registry
    }

    /// Register (or replace) a declaration-level handler
    pub fn register_declaration_handler(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl Fn(&TagAttributes, &mut ModelData) + 'static,
    ) {
        self.declaration_handlers
            .insert(tag_name.into(), Box::new(handler));
    }

    /// Register (or replace) a member-level handler
    pub fn register_member_handler(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl Fn(&TagAttributes, &mut FieldData) + 'static,
    ) {
        self.member_handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Apply the handler for a declaration-level tag, if one is registered
    pub fn apply_declaration_tag(&self, tag: &TagNode, model: &mut ModelData) {
        if let Some(handler) = self.declaration_handlers.get(&tag.name) {
            handler(&tag.attributes, model);
        }
    }

    /// Apply the handler for a member-level tag, if one is registered
    pub fn apply_member_tag(&self, tag: &TagNode, field: &mut FieldData) {
        if let Some(handler) = self.member_handlers.get(&tag.name) {
            handler(&tag.attributes, field);
        }
    }

    fn register_builtin_declaration_handlers(&mut self) {
        self.register_declaration_handler("Entity", |_attrs, model| {
            model
                .extensions
                .insert("isEntity".to_string(), Value::Bool(true));
        });

        self.register_declaration_handler("Table", |attrs, model| {
            if let Some(name) = attrs.get("name") {
                model.extensions.insert(
                    "tableName".to_string(),
                    Value::from(strip_quotes(name)),
                );
            }
        });

        for tag in ["Schema", "ApiModel"] {
            self.register_declaration_handler(tag, |attrs, model| {
                if let Some(description) = attrs.get("description") {
                    model.description = Some(strip_quotes(description).to_string());
                }
                if let Some(example) = attrs.get("example") {
                    model.example = Some(strip_quotes(example).to_string());
                }
            });
        }

        self.register_declaration_handler("Deprecated", |attrs, model| {
            model.deprecated = true;
            if let Some(since) = attrs.get("since") {
                model.since = Some(strip_quotes(since).to_string());
            }
            if let Some(notes) = attrs.get("notes") {
                model.deprecation_notes = Some(strip_quotes(notes).to_string());
            }
        });
    }

    fn register_builtin_member_handlers(&mut self) {
        for tag in ["NotNull", "NotBlank", "NotEmpty"] {
            self.register_member_handler(tag, |_attrs, field| {
                field.required = true;
                field
                    .validation_rules
                    .insert("required".to_string(), Value::Bool(true));
            });
        }

        self.register_member_handler("Size", |attrs, field| {
            if let Some(min) = attrs.get("min").and_then(|v| parse_integer_attr(v)) {
                field
                    .validation_rules
                    .insert("minLength".to_string(), Value::from(min));
            }
            if let Some(max) = attrs.get("max").and_then(|v| parse_integer_attr(v)) {
                field
                    .validation_rules
                    .insert("maxLength".to_string(), Value::from(max));
            }
        });

        self.register_member_handler("Min", |attrs, field| {
            if let Some(value) = attrs.get("value").and_then(|v| parse_number_attr(v)) {
                field
                    .validation_rules
                    .insert("minimum".to_string(), Value::from(value));
            }
        });

        self.register_member_handler("Max", |attrs, field| {
            if let Some(value) = attrs.get("value").and_then(|v| parse_number_attr(v)) {
                field
                    .validation_rules
                    .insert("maximum".to_string(), Value::from(value));
            }
        });

        self.register_member_handler("Pattern", |attrs, field| {
            if let Some(regexp) = attrs.get("regexp") {
                field
                    .validation_rules
                    .insert("pattern".to_string(), Value::from(strip_quotes(regexp)));
            }
        });

        self.register_member_handler("Email", |_attrs, field| {
            field
                .validation_rules
                .insert("format".to_string(), Value::from("email"));
        });

        self.register_member_handler("Deprecated", |attrs, field| {
            field.deprecated = true;
            if let Some(notes) = attrs.get("notes") {
                field.deprecation_notes = Some(strip_quotes(notes).to_string());
            }
        });

        for tag in ["Schema", "ApiModelProperty"] {
            self.register_member_handler(tag, |attrs, field| {
                if let Some(description) = attrs
                    .get("description")
                    .or_else(|| attrs.get("value"))
                    .or_else(|| attrs.get("notes"))
                {
                    field.description = Some(strip_quotes(description).to_string());
                }
                if let Some(example) = attrs.get("example") {
                    field.example = Some(strip_quotes(example).to_string());
                }
                if let Some(required) = attrs.get("required") {
                    let is_required = parse_bool_attr(required);
                    field.required = is_required;
                    if is_required {
                        field
                            .validation_rules
                            .insert("required".to_string(), Value::Bool(true));
                    }
                }
            });
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Strips one pair of surrounding double quotes, if present.
///
/// Attribute values arrive as raw source-expression text, so string literals
/// may still be quote-wrapped.
pub fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parses an integer attribute leniently, keeping only digit characters.
/// Returns `None` when nothing parseable remains.
pub fn parse_integer_attr(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Parses a numeric attribute leniently, keeping only digits and dots.
/// Returns `None` when nothing parseable remains.
pub fn parse_number_attr(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// Parses a boolean attribute: `true` (any case) is true, anything else false.
pub fn parse_bool_attr(raw: &str) -> bool {
    strip_quotes(raw).eq_ignore_ascii_case("true")
}
