#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use shellmeta::model::{
    AdministrativeInformation, Identifiable, Identifier, LangStringSet, Qualifier, Reference,
    Referable,
};
use shellmeta::{Asset, AssetKind, Element, IdentifierType, KeyType, ModelingKind, Property, Submodel};
use std::path::PathBuf;
use std::process::{Command, Output};

pub fn render_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shellmeta-render"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn asset(id_short: &str, id: &str) -> Asset {
    Asset::new(
        Referable::new(id_short),
        Identifiable::new(Identifier::new(id, IdentifierType::Iri)),
        AssetKind::Instance,
    )
}

pub fn property(id_short: &str) -> Property {
    Property::new(Referable::new(id_short), "int")
}

/// Submodel exhibiting every capability with every optional attribute set.
pub fn full_submodel() -> Submodel {
    let referable = Referable::new("TechnicalData")
        .with_category("PARAMETER")
        .with_description(LangStringSet::new().with("en", "Technical data"));
    let identifiable = Identifiable::new(Identifier::new("urn:sm:technical", IdentifierType::Custom))
        .with_administration(AdministrativeInformation::new(Some("1"), Some("0")));
    let mut submodel = Submodel::new(referable, identifiable);
    submodel
        .data_specification
        .embedded_data_specifications
        .push(Reference::global("urn:ds:iec61360", KeyType::Iri));
    submodel.semantics.semantic_id = Some(Reference::global("urn:sem:technical", KeyType::Iri));
    submodel.kind.kind = ModelingKind::Template;
    submodel
        .qualifiable
        .qualifier
        .push(Qualifier::new("Cardinality", "string").with_value("One").into());
    submodel
        .submodel_elements
        .push(Element::Property(property("MaxRpm")));
    submodel
}

pub const SAMPLE_STREAM: &str = r#"
{"modelType": "Asset", "idShort": "Motor", "identification": {"id": "https://example.com/asset/1", "idType": "IRI"}, "kind": "Instance"}
{"modelType": "Submodel", "idShort": "TechnicalData", "identification": {"id": "urn:sm:1", "idType": "Custom"}, "kind": "Template", "submodelElements": [{"modelType": "Property", "idShort": "MaxRpm", "valueType": "int", "value": "3000"}]}
"#;

pub const RULE_ELEMENT: &str =
    r#"{"modelType": "AccessPermissionRule", "idShort": "rule1", "qualifier": []}"#;
