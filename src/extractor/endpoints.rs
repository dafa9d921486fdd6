use crate::forest::{Declaration, MethodNode, ParameterNode, TagNode};
use crate::heuristics::Heuristics;
use crate::ir::{EndpointData, HttpMethod, ParameterData, ParameterLocation};
use crate::tags::{parse_bool_attr, strip_quotes};
use crate::type_ref::{self, TypeRef};
use log::debug;

/// Extractor building [`EndpointData`] records from controller declarations.
pub struct EndpointExtractor {
    heuristics: Heuristics,
}

impl EndpointExtractor {
    /// Create an endpoint extractor with the given heuristic configuration
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Extracts one endpoint per mapped method of a controller declaration.
    ///
    /// The class-level routing tag supplies the base path (empty when
    /// absent); methods without a recognized HTTP-mapping tag are skipped.
    pub fn extract(&self, decl: &Declaration) -> Vec<EndpointData> {
        debug!("Extracting endpoints from {}", decl.qualified_name());

        let base_path = decl
            .tag("RequestMapping")
            .map(extract_path)
            .unwrap_or_default();

        let tags = self.grouping_tags(decl);

        let mut endpoints = Vec::new();
        for method in &decl.methods {
            let mapping = method
                .tags
                .iter()
                .find(|t| self.heuristics.mapping_tags.contains(&t.name));

            let Some(mapping) = mapping else { continue };

            endpoints.push(self.extract_endpoint(decl, method, mapping, &base_path, &tags));
        }

        debug!(
            "Extracted {} endpoints from {}",
            endpoints.len(),
            decl.name
        );
        endpoints
    }

    fn extract_endpoint(
        &self,
        decl: &Declaration,
        method: &MethodNode,
        mapping: &TagNode,
        base_path: &str,
        tags: &[String],
    ) -> EndpointData {
        let http_method = derive_http_method(mapping);
        let relative_path = extract_path(mapping);
        let path = combine_paths(base_path, &relative_path);

        let summary = operation_member(method, "summary");
        let description = operation_member(method, "description");

        let parameters = self.extract_parameters(method);
        let request_body_type = method
            .parameters
            .iter()
            .find(|p| p.has_tag("RequestBody"))
            .map(|p| type_ref::resolve(&p.ty));
        let response_type = resolve_response_type(method);

        EndpointData {
            path,
            method: http_method,
            summary,
            description,
            tags: tags.to_vec(),
            parameters,
            request_body_type,
            response_type,
            controller_name: decl.name.clone(),
            controller_package: decl.namespace.clone(),
            dependencies: Vec::new(),
            deprecated: method.has_tag("Deprecated"),
        }
    }

    fn extract_parameters(&self, method: &MethodNode) -> Vec<ParameterData> {
        let mut parameters = Vec::new();

        for param in &method.parameters {
            if param.has_tag("PathVariable") {
                parameters.push(build_param(param, ParameterLocation::Path, true));
            } else if let Some(tag) = param.tag("RequestParam") {
                // Query parameters are required unless the tag says otherwise
                let required = tag.attr("required").map(parse_bool_attr).unwrap_or(true);
                parameters.push(build_param(param, ParameterLocation::Query, required));
            }
        }

        parameters
    }

    /// Grouping tags for the controller: the class-level `Tag` tag when
    /// present, otherwise the controller name with a trailing `Controller`
    /// suffix stripped.
    fn grouping_tags(&self, decl: &Declaration) -> Vec<String> {
        if let Some(tag) = decl.tag("Tag") {
            if let Some(name) = tag.attr("name").or_else(|| tag.attr("value")) {
                return vec![strip_quotes(name).to_string()];
            }
        }

        let stripped = decl
            .name
            .strip_suffix("Controller")
            .filter(|s| !s.is_empty())
            .unwrap_or(&decl.name);
        vec![stripped.to_string()]
    }
}

/// Combines a base path and a method-level relative path.
///
/// An empty relative path yields the base unchanged; otherwise the two are
/// joined with exactly one `/`, whatever slashes either side already carries.
pub fn combine_paths(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// The `value`/`path` attribute of a routing tag, quote-stripped; empty when
/// the tag is a bare marker.
fn extract_path(tag: &TagNode) -> String {
    tag.attr("value")
        .or_else(|| tag.attr("path"))
        .map(|raw| strip_quotes(raw).to_string())
        .unwrap_or_default()
}

/// Derives the HTTP verb from a mapping tag.
///
/// Verb-specific tags map directly; the generic `RequestMapping` tag reads
/// its `method` attribute (the token after the last `.` of expressions like
/// `RequestMethod.POST`), defaulting to GET when absent or unrecognized.
fn derive_http_method(tag: &TagNode) -> HttpMethod {
    match tag.name.as_str() {
        "GetMapping" => HttpMethod::Get,
        "PostMapping" => HttpMethod::Post,
        "PutMapping" => HttpMethod::Put,
        "DeleteMapping" => HttpMethod::Delete,
        "PatchMapping" => HttpMethod::Patch,
        _ => tag
            .attr("method")
            .map(|raw| {
                let token = raw.rsplit('.').next().unwrap_or(raw);
                HttpMethod::from_name(strip_quotes(token)).unwrap_or(HttpMethod::Get)
            })
            .unwrap_or(HttpMethod::Get),
    }
}

/// Summary/description lookup: method documentation first, the `Operation`
/// tag's attribute as fallback.
fn operation_member(method: &MethodNode, member: &str) -> Option<String> {
    if let Some(doc) = method.doc_text() {
        return Some(doc.to_string());
    }

    method
        .tag("Operation")
        .and_then(|t| t.attr(member))
        .map(|raw| strip_quotes(raw).to_string())
        .filter(|s| !s.is_empty())
}

fn build_param(param: &ParameterNode, location: ParameterLocation, required: bool) -> ParameterData {
    ParameterData {
        name: param.name.clone(),
        location,
        required,
        description: param.doc_text().map(str::to_string),
        ty: type_ref::resolve(&param.ty),
    }
}

/// Resolves the method's produced type; absent and `void`-like types
/// normalize to `None`.
fn resolve_response_type(method: &MethodNode) -> Option<TypeRef> {
    let node = method.return_type.as_ref()?;
    if node.name == "void" || node.name == "Void" {
        return None;
    }
    Some(type_ref::resolve(node))
}
