//! Capabilities an entity can exhibit and the `Entity` trait that exposes them.
//!
//! Capabilities are independent attribute bundles rather than layers of an
//! inheritance chain. An entity answers one query per capability; which
//! queries return `Some` is fixed by the entity's type and never changes
//! after construction.

use crate::model::reference::{
    AdministrativeInformation, Constraint, Identifier, LangStringSet, Reference,
};
use crate::tokens::ModelingKind;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One orthogonal capability.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Capability {
    Referable,
    Identifiable,
    HasDataSpecification,
    HasSemantics,
    HasKind,
    Qualifiable,
}

impl Capability {
    /// Order in which capability fragments appear in the external schema.
    pub const PRECEDENCE: [Capability; 6] = [
        Capability::Referable,
        Capability::Identifiable,
        Capability::HasDataSpecification,
        Capability::HasSemantics,
        Capability::HasKind,
        Capability::Qualifiable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Referable => "Referable",
            Capability::Identifiable => "Identifiable",
            Capability::HasDataSpecification => "HasDataSpecification",
            Capability::HasSemantics => "HasSemantics",
            Capability::HasKind => "HasKind",
            Capability::Qualifiable => "Qualifiable",
        }
    }

    /// Position in [`Capability::PRECEDENCE`].
    pub fn rank(&self) -> usize {
        match self {
            Capability::Referable => 0,
            Capability::Identifiable => 1,
            Capability::HasDataSpecification => 2,
            Capability::HasSemantics => 3,
            Capability::HasKind => 4,
            Capability::Qualifiable => 5,
        }
    }

    pub fn flag(&self) -> CapabilitySet {
        match self {
            Capability::Referable => CapabilitySet::REFERABLE,
            Capability::Identifiable => CapabilitySet::IDENTIFIABLE,
            Capability::HasDataSpecification => CapabilitySet::HAS_DATA_SPECIFICATION,
            Capability::HasSemantics => CapabilitySet::HAS_SEMANTICS,
            Capability::HasKind => CapabilitySet::HAS_KIND,
            Capability::Qualifiable => CapabilitySet::QUALIFIABLE,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of capabilities exhibited by an entity.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CapabilitySet: u8 {
        const REFERABLE = 1 << 0;
        const IDENTIFIABLE = 1 << 1;
        const HAS_DATA_SPECIFICATION = 1 << 2;
        const HAS_SEMANTICS = 1 << 3;
        const HAS_KIND = 1 << 4;
        const QUALIFIABLE = 1 << 5;
    }
}

impl CapabilitySet {
    pub fn has(&self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    /// Members of the set in precedence order.
    pub fn in_precedence_order(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::PRECEDENCE
            .into_iter()
            .filter(move |capability| self.has(*capability))
    }
}

/// Short name, category, description and parent link.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referable {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LangStringSet>,
    /// Weak back-reference; the entity does not own its parent and the link
    /// is never serialized.
    #[serde(skip)]
    pub parent: Option<Reference>,
}

impl Referable {
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: LangStringSet) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_parent(mut self, parent: Reference) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Globally unique identification plus optional version information.
///
/// Entities exhibiting this capability also exhibit [`Referable`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifiable {
    pub identification: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
}

impl Identifiable {
    pub fn new(identification: Identifier) -> Self {
        Self {
            identification,
            administration: None,
        }
    }

    pub fn with_administration(mut self, administration: AdministrativeInformation) -> Self {
        self.administration = Some(administration);
        self
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasSemantics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HasKind {
    #[serde(default)]
    pub kind: ModelingKind,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Qualifiable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifier: Vec<Constraint>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasDataSpecification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_data_specifications: Vec<Reference>,
}

/// A node of the asset graph.
///
/// Implementors return `Some` from the query of every capability they
/// exhibit. Returning `Some` from [`Entity::identifiable`] without also
/// returning `Some` from [`Entity::referable`] is rejected at serialization
/// time.
pub trait Entity {
    /// Declared type chain, most specific first (e.g. `Property`,
    /// `DataElement`, `SubmodelElement`).
    fn lineage(&self) -> &'static [&'static str];

    fn referable(&self) -> Option<&Referable> {
        None
    }

    fn identifiable(&self) -> Option<&Identifiable> {
        None
    }

    fn has_data_specification(&self) -> Option<&HasDataSpecification> {
        None
    }

    fn has_semantics(&self) -> Option<&HasSemantics> {
        None
    }

    fn has_kind(&self) -> Option<&HasKind> {
        None
    }

    fn qualifiable(&self) -> Option<&Qualifiable> {
        None
    }

    /// Entities a document writer nests inside this one. The composition
    /// engine itself never follows these.
    fn children(&self) -> Vec<&dyn Entity> {
        Vec::new()
    }

    fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::empty();
        set.set(CapabilitySet::REFERABLE, self.referable().is_some());
        set.set(CapabilitySet::IDENTIFIABLE, self.identifiable().is_some());
        set.set(
            CapabilitySet::HAS_DATA_SPECIFICATION,
            self.has_data_specification().is_some(),
        );
        set.set(CapabilitySet::HAS_SEMANTICS, self.has_semantics().is_some());
        set.set(CapabilitySet::HAS_KIND, self.has_kind().is_some());
        set.set(CapabilitySet::QUALIFIABLE, self.qualifiable().is_some());
        set
    }

    /// Human-readable label for diagnostics: the short name, falling back to
    /// the identification.
    fn label(&self) -> Option<String> {
        if let Some(referable) = self.referable() {
            if !referable.id_short.is_empty() {
                return Some(referable.id_short.clone());
            }
        }
        self.identifiable()
            .map(|identifiable| identifiable.identification.id.clone())
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::IdentifierType;

    struct Bare;

    impl Entity for Bare {
        fn lineage(&self) -> &'static [&'static str] {
            &[]
        }
    }

    struct Named {
        referable: Referable,
        identifiable: Identifiable,
    }

    impl Entity for Named {
        fn lineage(&self) -> &'static [&'static str] {
            &["Asset"]
        }

        fn referable(&self) -> Option<&Referable> {
            Some(&self.referable)
        }

        fn identifiable(&self) -> Option<&Identifiable> {
            Some(&self.identifiable)
        }
    }

    #[test]
    fn precedence_matches_rank() {
        for (idx, capability) in Capability::PRECEDENCE.iter().enumerate() {
            assert_eq!(capability.rank(), idx);
        }
    }

    #[test]
    fn bare_entity_has_no_capabilities() {
        assert!(Bare.capabilities().is_empty());
        assert_eq!(Bare.label(), None);
    }

    #[test]
    fn capabilities_follow_queries() {
        let named = Named {
            referable: Referable::new(""),
            identifiable: Identifiable::new(Identifier::new("urn:x", IdentifierType::Custom)),
        };
        let caps = named.capabilities();
        assert!(caps.has(Capability::Referable));
        assert!(caps.has(Capability::Identifiable));
        assert!(!caps.has(Capability::HasKind));
        assert_eq!(
            caps.in_precedence_order().collect::<Vec<_>>(),
            vec![Capability::Referable, Capability::Identifiable]
        );
        assert_eq!(named.label().as_deref(), Some("urn:x"));
    }

    #[test]
    fn iteration_ignores_flag_insertion_order() {
        let set = CapabilitySet::QUALIFIABLE | CapabilitySet::HAS_SEMANTICS | CapabilitySet::REFERABLE;
        assert_eq!(
            set.in_precedence_order().collect::<Vec<_>>(),
            vec![
                Capability::Referable,
                Capability::HasSemantics,
                Capability::Qualifiable
            ]
        );
    }

    #[test]
    fn referable_json_skips_parent() {
        let referable = Referable::new("Motor")
            .with_category("PARAMETER")
            .with_parent(Reference::default());
        let json = serde_json::to_value(&referable).unwrap();
        assert_eq!(json["idShort"], "Motor");
        assert_eq!(json["category"], "PARAMETER");
        assert!(json.get("parent").is_none());
        assert!(json.get("description").is_none());
    }
}
