//! Composition engine: an entity's full, ordered fragment list.
//!
//! Capabilities are visited in [`Capability::PRECEDENCE`] order and each
//! exhibited capability's mapper output is appended as-is. The first failing
//! mapper (or type resolution) aborts the entity; no partial list is ever
//! returned.

use crate::error::SerializeError;
use crate::fragment::Fragment;
use crate::mapper;
use crate::model::{Capability, Entity};
use crate::resolver::TypeRegistry;
use tracing::{debug, trace};

/// Composes fragments against a particular type registry.
#[derive(Clone, Copy, Debug)]
pub struct Composer<'r> {
    registry: &'r TypeRegistry,
}

impl Default for Composer<'static> {
    fn default() -> Self {
        Self::new(TypeRegistry::shared())
    }
}

impl<'r> Composer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn serialize(&self, entity: &dyn Entity) -> Result<Vec<Fragment>, SerializeError> {
        let capabilities = entity.capabilities();
        let label = entity.label();
        debug!(
            entity = label.as_deref().unwrap_or("<unnamed>"),
            capabilities = ?capabilities,
            "composing entity"
        );

        let mut fragments = Vec::new();
        for capability in capabilities.in_precedence_order() {
            let contributed = self
                .contribute(entity, capability)
                .map_err(|err| err.with_entity(label.clone()))?;
            trace!(%capability, count = contributed.len(), "capability contributed fragments");
            fragments.extend(contributed);
        }
        Ok(fragments)
    }

    fn contribute(
        &self,
        entity: &dyn Entity,
        capability: Capability,
    ) -> Result<Vec<Fragment>, SerializeError> {
        match capability {
            Capability::Referable => match entity.referable() {
                Some(referable) => {
                    let model_type = self.registry.resolve(entity)?;
                    mapper::map_referable(referable, model_type)
                }
                None => Ok(Vec::new()),
            },
            Capability::Identifiable => match entity.identifiable() {
                Some(_) if entity.referable().is_none() => {
                    Err(SerializeError::MissingRequiredAttribute {
                        capability: Capability::Identifiable,
                        attribute: "idShort",
                        entity: None,
                    })
                }
                Some(identifiable) => mapper::map_identifiable(identifiable),
                None => Ok(Vec::new()),
            },
            Capability::HasDataSpecification => Ok(entity
                .has_data_specification()
                .map(mapper::map_data_specification)
                .unwrap_or_default()),
            Capability::HasSemantics => Ok(entity
                .has_semantics()
                .map(mapper::map_semantics)
                .unwrap_or_default()),
            Capability::HasKind => Ok(entity.has_kind().map(mapper::map_kind).unwrap_or_default()),
            Capability::Qualifiable => Ok(entity
                .qualifiable()
                .map(mapper::map_qualifiable)
                .unwrap_or_default()),
        }
    }
}

/// Compose against the standard registry.
pub fn serialize(entity: &dyn Entity) -> Result<Vec<Fragment>, SerializeError> {
    Composer::default().serialize(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Tag;
    use crate::model::{
        Asset, HasKind, Identifiable, Identifier, Property, Qualifier, Referable,
    };
    use crate::security::AccessPermissionRule;
    use crate::tokens::{AssetKind, IdentifierType, KeyElements, ModelingKind};

    fn tags(fragments: &[Fragment]) -> Vec<Tag> {
        fragments.iter().map(|f| f.tag).collect()
    }

    struct Bare;

    impl Entity for Bare {
        fn lineage(&self) -> &'static [&'static str] {
            &[]
        }
    }

    struct IdentityOnly(Identifiable);

    impl Entity for IdentityOnly {
        fn lineage(&self) -> &'static [&'static str] {
            &["Asset"]
        }

        fn identifiable(&self) -> Option<&Identifiable> {
            Some(&self.0)
        }
    }

    #[test]
    fn asset_scenario() {
        let asset = Asset::new(
            Referable::new("MyAsset"),
            Identifiable::new(Identifier::new(
                "https://example.com/asset/1",
                IdentifierType::Iri,
            )),
            AssetKind::Instance,
        );
        let fragments = serialize(&asset).unwrap();
        assert_eq!(
            fragments,
            vec![
                Fragment::text(Tag::IdShort, "MyAsset"),
                Fragment::text(Tag::ModelType, "Asset"),
                Fragment::text(Tag::Identification, "https://example.com/asset/1")
                    .with_attribute("idType", "IRI"),
            ]
        );
    }

    #[test]
    fn template_kind_is_emitted_once() {
        let mut property = Property::new(Referable::new("MaxRpm"), "int");
        property.kind = HasKind {
            kind: ModelingKind::Template,
        };
        let fragments = serialize(&property).unwrap();
        let kinds: Vec<_> = fragments
            .iter()
            .filter(|f| f.tag == Tag::ModelingKind)
            .collect();
        assert_eq!(kinds.len(), 1);
        assert_eq!(kinds[0].text_content(), Some("Template"));

        property.kind = HasKind {
            kind: ModelingKind::Instance,
        };
        let fragments = serialize(&property).unwrap();
        assert!(fragments.iter().all(|f| f.tag != Tag::ModelingKind));
    }

    #[test]
    fn unresolved_type_emits_nothing() {
        let mut rule = AccessPermissionRule::new(Referable::new("rule1"));
        rule.qualifiable
            .qualifier
            .push(Qualifier::new("Scope", "string").into());
        let err = serialize(&rule).unwrap_err();
        assert!(matches!(err, SerializeError::UnresolvedType { .. }));
        assert_eq!(err.entity(), Some("rule1"));
        assert_eq!(err.capability(), Capability::Referable);
    }

    #[test]
    fn bare_entity_contributes_nothing() {
        assert_eq!(serialize(&Bare).unwrap(), Vec::new());
    }

    #[test]
    fn identifiable_without_referable_is_rejected() {
        let entity = IdentityOnly(Identifiable::new(Identifier::new(
            "urn:orphan",
            IdentifierType::Custom,
        )));
        let err = serialize(&entity).unwrap_err();
        assert_eq!(
            err,
            SerializeError::MissingRequiredAttribute {
                capability: Capability::Identifiable,
                attribute: "idShort",
                entity: Some("urn:orphan".to_string()),
            }
        );
    }

    #[test]
    fn mapper_failure_carries_label() {
        let asset = Asset::new(
            Referable::new("Pump"),
            Identifiable::new(Identifier::new("", IdentifierType::Iri)),
            AssetKind::Type,
        );
        let err = serialize(&asset).unwrap_err();
        assert_eq!(err.capability(), Capability::Identifiable);
        assert_eq!(err.entity(), Some("Pump"));
    }

    #[test]
    fn contributions_follow_capability_set_order() {
        let mut property = Property::new(Referable::new("MaxRpm"), "int");
        property.kind.kind = ModelingKind::Template;
        property.qualifiable.qualifier.push(Qualifier::new("Min", "int").into());
        let fragments = serialize(&property).unwrap();
        let mut origins: Vec<Capability> =
            fragments.iter().filter_map(|f| f.tag.origin()).collect();
        origins.dedup();
        assert_eq!(
            origins,
            vec![Capability::Referable, Capability::HasKind, Capability::Qualifiable]
        );
        assert!(
            origins
                .iter()
                .all(|capability| property.capabilities().has(*capability))
        );
    }

    #[test]
    fn custom_registry_changes_model_type() {
        let registry = TypeRegistry::from_types([KeyElements::DataElement]);
        let property = Property::new(Referable::new("Speed"), "double");
        let fragments = Composer::new(&registry).serialize(&property).unwrap();
        assert_eq!(tags(&fragments), vec![Tag::IdShort, Tag::ModelType]);
        assert_eq!(fragments[1].text_content(), Some("DataElement"));
    }
}
