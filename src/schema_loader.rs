//! JSON Schema gate for element input.
//!
//! Input documents are checked structurally before they are deserialized so
//! a malformed element is reported with every schema violation at once
//! rather than serde's first error.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const BUNDLED_SCHEMA: &str = include_str!("../schema/elements.schema.json");
const BUNDLED_SOURCE: &str = "bundled elements schema";

/// Compiled element schema plus a label for error messages.
pub struct EntitySchema {
    compiled: JSONSchema,
    source: String,
}

impl EntitySchema {
    /// Schema shipped with the crate under `schema/`.
    pub fn bundled() -> Result<Self> {
        let value: Value =
            serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled elements schema")?;
        Self::from_value(&value, BUNDLED_SOURCE)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::from_value(&value, &path.display().to_string())
    }

    /// Bundled schema unless an override path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn from_value(schema: &Value, source: &str) -> Result<Self> {
        let compiled = JSONSchema::compile(schema)
            .map_err(|err| anyhow!("compiling schema {source}: {err}"))?;
        Ok(Self {
            compiled,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn validate(&self, element: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(element) {
            let details = errors
                .map(|err| {
                    let path = err.instance_path.to_string();
                    if path.is_empty() {
                        err.to_string()
                    } else {
                        format!("{path}: {err}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            bail!("element failed {} validation:\n{}", self.source, details);
        }
        Ok(())
    }

    /// Validate every element, naming the position of the first failure.
    pub fn validate_all(&self, elements: &[Value]) -> Result<()> {
        for (idx, element) in elements.iter().enumerate() {
            self.validate(element)
                .with_context(|| format!("element {} of {}", idx + 1, elements.len()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn bundled_schema_accepts_minimal_submodel() {
        let schema = EntitySchema::bundled().unwrap();
        schema
            .validate(&json!({
                "modelType": "Submodel",
                "idShort": "TechnicalData",
                "identification": {"id": "urn:sm:1", "idType": "Custom"},
                "submodelElements": [
                    {"modelType": "Property", "idShort": "MaxRpm", "valueType": "int"}
                ]
            }))
            .unwrap();
    }

    #[test]
    fn reports_every_violation() {
        let schema = EntitySchema::bundled().unwrap();
        let err = schema
            .validate(&json!({
                "modelType": "Gizmo",
                "identification": {"id": "urn:x", "idType": "URN"}
            }))
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("idShort"), "{message}");
        assert!(message.contains("/identification/idType"), "{message}");
        assert!(message.contains("/modelType"), "{message}");
    }

    #[test]
    fn identifiables_need_identification() {
        let schema = EntitySchema::bundled().unwrap();
        assert!(
            schema
                .validate(&json!({"modelType": "Asset", "idShort": "Motor"}))
                .is_err()
        );
        assert!(
            schema
                .validate(&json!({"modelType": "View", "idShort": "v"}))
                .is_ok()
        );
    }

    #[test]
    fn validate_all_names_position() {
        let schema = EntitySchema::bundled().unwrap();
        let elements = vec![
            json!({"modelType": "View", "idShort": "v"}),
            json!({"modelType": "View"}),
        ];
        let err = schema.validate_all(&elements).unwrap_err();
        assert!(format!("{err:#}").starts_with("element 2 of 2"));
    }

    #[test]
    fn override_schema_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "object", "required": ["idShort"]}}"#).unwrap();
        let schema = EntitySchema::load(Some(file.path())).unwrap();
        assert_eq!(schema.source(), file.path().display().to_string());
        assert!(schema.validate(&json!({"modelType": "Gizmo", "idShort": "g"})).is_ok());
        assert!(schema.validate(&json!({"modelType": "View"})).is_err());
    }
}
