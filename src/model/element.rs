//! Concrete element types of the asset graph.
//!
//! Each type embeds the capability bundles of its metamodel profile and
//! answers the matching `Entity` queries. Type-specific attributes (asset
//! kind, property value, ...) are carried for completeness but are not part
//! of the capability fragments.

use crate::model::capability::{
    Entity, HasDataSpecification, HasKind, HasSemantics, Identifiable, Qualifiable, Referable,
};
use crate::model::reference::Reference;
use crate::security::AccessPermissionRule;
use crate::tokens::AssetKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub identifiable: Identifiable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    #[serde(default)]
    pub kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_identification_model: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_of_material: Option<Reference>,
}

impl Asset {
    pub fn new(referable: Referable, identifiable: Identifiable, kind: AssetKind) -> Self {
        Self {
            referable,
            identifiable,
            data_specification: HasDataSpecification::default(),
            kind,
            asset_identification_model: None,
            bill_of_material: None,
        }
    }
}

impl Entity for Asset {
    fn lineage(&self) -> &'static [&'static str] {
        &["Asset"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        Some(&self.identifiable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub identifiable: Identifiable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    pub asset: Reference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
}

impl Entity for AssetAdministrationShell {
    fn lineage(&self) -> &'static [&'static str] {
        &["AssetAdministrationShell"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        Some(&self.identifiable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub identifiable: Identifiable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    #[serde(flatten)]
    pub semantics: HasSemantics,
    #[serde(flatten)]
    pub kind: HasKind,
    #[serde(flatten)]
    pub qualifiable: Qualifiable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<Element>,
}

impl Submodel {
    pub fn new(referable: Referable, identifiable: Identifiable) -> Self {
        Self {
            referable,
            identifiable,
            data_specification: HasDataSpecification::default(),
            semantics: HasSemantics::default(),
            kind: HasKind::default(),
            qualifiable: Qualifiable::default(),
            submodel_elements: Vec::new(),
        }
    }
}

impl Entity for Submodel {
    fn lineage(&self) -> &'static [&'static str] {
        &["Submodel"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        Some(&self.identifiable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }

    fn has_semantics(&self) -> Option<&HasSemantics> {
        Some(&self.semantics)
    }

    fn has_kind(&self) -> Option<&HasKind> {
        Some(&self.kind)
    }

    fn qualifiable(&self) -> Option<&Qualifiable> {
        Some(&self.qualifiable)
    }

    fn children(&self) -> Vec<&dyn Entity> {
        self.submodel_elements
            .iter()
            .map(|element| element as &dyn Entity)
            .collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub identifiable: Identifiable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub is_case_of: Vec<Reference>,
}

impl Entity for ConceptDescription {
    fn lineage(&self) -> &'static [&'static str] {
        &["ConceptDescription"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        Some(&self.identifiable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }
}

/// Single-valued data element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    #[serde(flatten)]
    pub semantics: HasSemantics,
    #[serde(flatten)]
    pub kind: HasKind,
    #[serde(flatten)]
    pub qualifiable: Qualifiable,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

impl Property {
    pub fn new(referable: Referable, value_type: impl Into<String>) -> Self {
        Self {
            referable,
            data_specification: HasDataSpecification::default(),
            semantics: HasSemantics::default(),
            kind: HasKind::default(),
            qualifiable: Qualifiable::default(),
            value_type: value_type.into(),
            value: None,
            value_id: None,
        }
    }
}

impl Entity for Property {
    fn lineage(&self) -> &'static [&'static str] {
        &["Property", "DataElement", "SubmodelElement"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }

    fn has_semantics(&self) -> Option<&HasSemantics> {
        Some(&self.semantics)
    }

    fn has_kind(&self) -> Option<&HasKind> {
        Some(&self.kind)
    }

    fn qualifiable(&self) -> Option<&Qualifiable> {
        Some(&self.qualifiable)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub data_specification: HasDataSpecification,
    #[serde(flatten)]
    pub semantics: HasSemantics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contained_elements: Vec<Reference>,
}

impl Entity for View {
    fn lineage(&self) -> &'static [&'static str] {
        &["View"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        Some(&self.data_specification)
    }

    fn has_semantics(&self) -> Option<&HasSemantics> {
        Some(&self.semantics)
    }
}

/// Any element that can appear in an input document, tagged by `modelType`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum Element {
    Asset(Asset),
    AssetAdministrationShell(AssetAdministrationShell),
    Submodel(Submodel),
    ConceptDescription(ConceptDescription),
    Property(Property),
    View(View),
    AccessPermissionRule(AccessPermissionRule),
}

impl Element {
    fn inner(&self) -> &dyn Entity {
        match self {
            Element::Asset(inner) => inner,
            Element::AssetAdministrationShell(inner) => inner,
            Element::Submodel(inner) => inner,
            Element::ConceptDescription(inner) => inner,
            Element::Property(inner) => inner,
            Element::View(inner) => inner,
            Element::AccessPermissionRule(inner) => inner,
        }
    }
}

impl Entity for Element {
    fn lineage(&self) -> &'static [&'static str] {
        self.inner().lineage()
    }

    fn referable(&self) -> Option<&Referable> {
        self.inner().referable()
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        self.inner().identifiable()
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        self.inner().has_data_specification()
    }

    fn has_semantics(&self) -> Option<&HasSemantics> {
        self.inner().has_semantics()
    }

    fn has_kind(&self) -> Option<&HasKind> {
        self.inner().has_kind()
    }

    fn qualifiable(&self) -> Option<&Qualifiable> {
        self.inner().qualifiable()
    }

    fn children(&self) -> Vec<&dyn Entity> {
        self.inner().children()
    }
}
