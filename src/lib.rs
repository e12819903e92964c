//! Capability-composition serializer for Asset Administration Shell models.
//!
//! Entities of the asset graph exhibit a set of orthogonal capabilities
//! (Referable, Identifiable, HasDataSpecification, HasSemantics, HasKind,
//! Qualifiable). Each capability has a pure mapper producing ordered output
//! fragments, and `compose` concatenates those fragments in a fixed
//! precedence order. `xml` writes the fragments (or whole documents of
//! elements) with a namespace prefix; the remaining helpers here read element
//! streams from JSON input.

use anyhow::{Context, Result, bail};
use serde_json::Value;

pub mod compose;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod resolver;
pub mod schema_loader;
pub mod security;
pub mod tokens;
pub mod xml;

pub use compose::{Composer, serialize};
pub use error::{SerializeError, UnknownTokenError};
pub use fragment::{Content, Fragment, Tag};
pub use model::{
    Asset, AssetAdministrationShell, Capability, CapabilitySet, ConceptDescription, Element,
    Entity, Property, Submodel, View,
};
pub use resolver::{TypeRegistry, resolve};
pub use schema_loader::EntitySchema;
pub use tokens::{AssetKind, EntityType, IdentifierType, KeyElements, KeyType, ModelingKind};
pub use xml::{
    ErrorPolicy, RenderedDocument, SkippedEntity, XmlError, XmlOptions, render_document,
    render_fragments,
};

/// Split an input document into raw JSON elements.
///
/// Accepts a JSON array of elements, a single element object, or NDJSON with
/// one element per line. Empty input is an error, and NDJSON errors name the
/// offending line.
pub fn parse_value_stream(input: &str) -> Result<Vec<Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No input provided");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => Ok(items),
            Value::Object(_) => Ok(vec![value]),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut values = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse element from line {}", idx + 1))?;
        values.push(value);
    }

    if values.is_empty() {
        bail!("No elements found in input stream");
    }
    Ok(values)
}

/// Deserialize raw JSON elements, naming the position of the first failure.
pub fn elements_from_values(values: Vec<Value>) -> Result<Vec<Element>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value(value)
                .with_context(|| format!("Unable to parse element {}", idx + 1))
        })
        .collect()
}

/// [`parse_value_stream`] followed by [`elements_from_values`].
pub fn parse_element_stream(input: &str) -> Result<Vec<Element>> {
    elements_from_values(parse_value_stream(input)?)
}
