//! Value types carried by capabilities: references, identifiers,
//! language-tagged text and qualifier constraints.

use crate::tokens::{IdentifierType, KeyElements, KeyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One step of a reference.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyElements,
    #[serde(default)]
    pub local: bool,
    pub value: String,
    pub id_type: KeyType,
}

impl Key {
    pub fn new(key_type: KeyElements, local: bool, value: impl Into<String>, id_type: KeyType) -> Self {
        Self {
            key_type,
            local,
            value: value.into(),
            id_type,
        }
    }
}

/// Ordered key chain pointing at another element or an external concept.
///
/// Relations between entities are always held as references, so the graph
/// never owns the elements it points at.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub keys: Vec<Key>,
}

impl Reference {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// Reference to a concept outside the asset graph, e.g. a semantic id.
    pub fn global(value: impl Into<String>, id_type: KeyType) -> Self {
        Self::new(vec![Key::new(
            KeyElements::GlobalReference,
            false,
            value,
            id_type,
        )])
    }
}

/// Text keyed by language tag. Iteration is ordered by tag so output is
/// stable across runs.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangStringSet(pub BTreeMap<String, String>);

impl LangStringSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(lang, text)| (lang.as_str(), text.as_str()))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: String,
    pub id_type: IdentifierType,
}

impl Identifier {
    pub fn new(id: impl Into<String>, id_type: IdentifierType) -> Self {
        Self {
            id: id.into(),
            id_type,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AdministrativeInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl AdministrativeInformation {
    pub fn new(version: Option<&str>, revision: Option<&str>) -> Self {
        Self {
            version: version.map(str::to_string),
            revision: revision.map(str::to_string),
        }
    }
}

/// Qualification constraint attached to a qualifiable element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum Constraint {
    Qualifier(Qualifier),
    Formula(Formula),
}

impl From<Qualifier> for Constraint {
    fn from(qualifier: Qualifier) -> Self {
        Constraint::Qualifier(qualifier)
    }
}

impl From<Formula> for Constraint {
    fn from(formula: Formula) -> Self {
        Constraint::Formula(formula)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifier {
    #[serde(rename = "type")]
    pub qualifier_type: String,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

impl Qualifier {
    pub fn new(qualifier_type: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            qualifier_type: qualifier_type.into(),
            value_type: value_type.into(),
            value: None,
            value_id: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    #[serde(default)]
    pub depends_on: Vec<Reference>,
}
