//! Query parameter flattening
//!
//! Two bracket conventions in query parameter names are collapsed into
//! structured parameters:
//! - `tags[]` (string) becomes `tags`, an array of strings
//! - `filter[].name`, `filter[].age` (strings) become one required `filter`
//!   parameter, an array of objects with properties `name` and `age`
//!
//! Only string-typed parameters take part; everything else passes through.

use indexmap::IndexMap;

use crate::generation::{ParameterDescriptor, SchemaKind, SchemaNode};
use crate::infrastructure::openapi::ParameterLocation;

const ARRAY_SUFFIX: &str = "[]";
const OBJECT_ARRAY_SEPARATOR: &str = "[].";

/// Object schema accumulated for one `prefix[].` group
#[derive(Default)]
struct ObjectAccumulator {
    properties: IndexMap<String, SchemaNode>,
    required: Vec<String>,
}

impl ObjectAccumulator {
    fn into_parameter(self, name: String) -> ParameterDescriptor {
        let object = SchemaNode::new(SchemaKind::Object {
            properties: self.properties,
            required: self.required,
        });

        ParameterDescriptor {
            name,
            location: ParameterLocation::Query,
            required: true,
            description: Some(String::new()),
            schema: SchemaNode::array_of(object),
        }
    }
}

/// Normalizes the query parameters of one operation.
///
/// Pass-through and `[]` parameters keep their input order and are followed
/// by the synthesized array-of-object parameters in first-seen prefix order.
pub fn flatten_query_parameters(parameters: Vec<ParameterDescriptor>) -> Vec<ParameterDescriptor> {
    let mut flattened = Vec::with_capacity(parameters.len());
    let mut groups: IndexMap<String, ObjectAccumulator> = IndexMap::new();

    for mut parameter in parameters {
        if !parameter.schema.is_string() {
            flattened.push(parameter);
            continue;
        }

        if let Some(stripped) = parameter.name.strip_suffix(ARRAY_SUFFIX).map(str::to_string) {
            parameter.name = stripped;
            let description = parameter.schema.description.take();
            parameter.schema = SchemaNode::array_of(SchemaNode::string()).with_description(description);
            flattened.push(parameter);
        } else if let Some((prefix, property)) = object_array_segments(&parameter.name) {
            let group = groups.entry(prefix.to_string()).or_default();
            let schema = SchemaNode::string().with_description(
                parameter
                    .description
                    .clone()
                    .or_else(|| parameter.schema.description.clone()),
            );
            group.properties.insert(property.to_string(), schema);
            // `required` lists each property once, however many sources name it
            if parameter.required && !group.required.iter().any(|name| name == property) {
                group.required.push(property.to_string());
            }
        } else {
            flattened.push(parameter);
        }
    }

    flattened.extend(
        groups
            .into_iter()
            .map(|(prefix, group)| group.into_parameter(prefix)),
    );
    flattened
}

/// Splits `prefix[].property` into its prefix and property. Deeper nesting
/// such as `a[].b[].c` keeps only the first level: prefix `a`, property `b`.
fn object_array_segments(name: &str) -> Option<(&str, &str)> {
    let mut segments = name.split(OBJECT_ARRAY_SEPARATOR);
    let prefix = segments.next()?;
    let property = segments.next()?;
    Some((prefix, property))
}
