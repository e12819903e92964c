//! Closed registry of schema element types and lineage-based resolution.
//!
//! The registry is explicit: an entity's declared lineage is matched against
//! it most-specific-first, so resolution never depends on declaration order
//! or on which other types happen to exist. An entity whose lineage misses
//! the registry entirely is malformed for serialization purposes.

use crate::error::SerializeError;
use crate::model::Entity;
use crate::tokens::KeyElements;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Schema element types keyed by their external name.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    by_name: BTreeMap<&'static str, KeyElements>,
}

impl TypeRegistry {
    /// Registry of every KeyElements value that names an element type.
    pub fn standard() -> Self {
        Self::from_types(
            KeyElements::ALL
                .iter()
                .copied()
                .filter(|element| !element.is_reference_only()),
        )
    }

    /// Process-wide instance of [`TypeRegistry::standard`].
    pub fn shared() -> &'static TypeRegistry {
        static STANDARD: OnceLock<TypeRegistry> = OnceLock::new();
        STANDARD.get_or_init(TypeRegistry::standard)
    }

    pub fn from_types(types: impl IntoIterator<Item = KeyElements>) -> Self {
        let by_name = types
            .into_iter()
            .map(|element| (element.as_str(), element))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<KeyElements> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates registered types in stable (name) order.
    pub fn types(&self) -> impl Iterator<Item = KeyElements> + '_ {
        self.by_name.values().copied()
    }

    /// Most specific registered type in the entity's lineage.
    pub fn resolve(&self, entity: &dyn Entity) -> Result<KeyElements, SerializeError> {
        let lineage = entity.lineage();
        lineage
            .iter()
            .find_map(|name| self.get(name))
            .ok_or_else(|| SerializeError::UnresolvedType {
                lineage: lineage.iter().map(|name| name.to_string()).collect(),
                entity: entity.label(),
            })
    }
}

/// Resolve against the standard registry.
pub fn resolve(entity: &dyn Entity) -> Result<KeyElements, SerializeError> {
    TypeRegistry::shared().resolve(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Property, Referable};
    use crate::security::AccessPermissionRule;

    struct Lineage(&'static [&'static str]);

    impl Entity for Lineage {
        fn lineage(&self) -> &'static [&'static str] {
            self.0
        }
    }

    #[test]
    fn standard_registry_excludes_reference_only_keys() {
        let registry = TypeRegistry::standard();
        assert_eq!(registry.types().count(), 22);
        assert!(registry.contains("Submodel"));
        assert!(!registry.contains("GlobalReference"));
        assert!(!registry.contains("FragmentReference"));
    }

    #[test]
    fn picks_most_specific_registered_type() {
        let property = Property::new(Referable::new("Speed"), "double");
        assert_eq!(resolve(&property), Ok(KeyElements::Property));

        let narrowed = TypeRegistry::from_types([KeyElements::SubmodelElement]);
        assert_eq!(narrowed.resolve(&property), Ok(KeyElements::SubmodelElement));
    }

    #[test]
    fn skips_unregistered_ancestors() {
        let entity = Lineage(&["CustomSensor", "Property"]);
        assert_eq!(resolve(&entity), Ok(KeyElements::Property));
    }

    #[test]
    fn unregistered_lineage_is_an_error() {
        let rule = AccessPermissionRule::new(Referable::new("rule1"));
        let err = resolve(&rule).unwrap_err();
        assert_eq!(
            err,
            SerializeError::UnresolvedType {
                lineage: vec!["AccessPermissionRule".to_string()],
                entity: Some("rule1".to_string()),
            }
        );

        assert!(resolve(&Lineage(&[])).is_err());
    }
}
