//! One pure mapper per capability.
//!
//! Each mapper sees only its own bundle and returns that capability's
//! fragments in the capability's internal order. Optional attributes that
//! are absent or empty contribute nothing; required attributes that are
//! empty fail with `MissingRequiredAttribute`. Callers attach the entity
//! label to errors.

use crate::error::SerializeError;
use crate::fragment::{Fragment, Tag};
use crate::model::{
    Capability, Constraint, HasDataSpecification, HasKind, HasSemantics, Identifiable,
    Qualifiable, Reference, Referable,
};
use crate::tokens::{KeyElements, ModelingKind};

/// id-short, category, description, then the model-type naming `model_type`.
pub fn map_referable(
    referable: &Referable,
    model_type: KeyElements,
) -> Result<Vec<Fragment>, SerializeError> {
    if referable.id_short.is_empty() {
        return Err(missing(Capability::Referable, "idShort"));
    }

    let mut fragments = vec![Fragment::text(Tag::IdShort, &referable.id_short)];
    if let Some(category) = referable.category.as_deref().filter(|c| !c.is_empty()) {
        fragments.push(Fragment::text(Tag::Category, category));
    }
    if let Some(description) = referable.description.as_ref().filter(|d| !d.is_empty()) {
        let lang_strings = description
            .iter()
            .map(|(lang, text)| Fragment::text(Tag::LangString, text).with_attribute("lang", lang))
            .collect();
        fragments.push(Fragment::parent(Tag::Description, lang_strings));
    }
    fragments.push(Fragment::text(Tag::ModelType, model_type.as_str()));
    Ok(fragments)
}

/// identification, then administration when it carries a version or revision.
pub fn map_identifiable(identifiable: &Identifiable) -> Result<Vec<Fragment>, SerializeError> {
    let identification = &identifiable.identification;
    if identification.id.is_empty() {
        return Err(missing(Capability::Identifiable, "id"));
    }

    let mut fragments = vec![
        Fragment::text(Tag::Identification, &identification.id)
            .with_attribute("idType", identification.id_type.as_str()),
    ];
    if let Some(administration) = &identifiable.administration {
        let mut children = Vec::new();
        if let Some(version) = non_empty(&administration.version) {
            children.push(Fragment::text(Tag::Version, version));
        }
        if let Some(revision) = non_empty(&administration.revision) {
            children.push(Fragment::text(Tag::Revision, revision));
        }
        if !children.is_empty() {
            fragments.push(Fragment::parent(Tag::Administration, children));
        }
    }
    Ok(fragments)
}

pub fn map_data_specification(bundle: &HasDataSpecification) -> Vec<Fragment> {
    if bundle.embedded_data_specifications.is_empty() {
        return Vec::new();
    }
    let children = bundle
        .embedded_data_specifications
        .iter()
        .map(|reference| reference_fragment(Tag::DataSpecification, reference))
        .collect();
    vec![Fragment::parent(Tag::EmbeddedDataSpecification, children)]
}

pub fn map_semantics(bundle: &HasSemantics) -> Vec<Fragment> {
    bundle
        .semantic_id
        .iter()
        .map(|reference| reference_fragment(Tag::SemanticId, reference))
        .collect()
}

/// Only `Template` is written; `Instance` is the implicit default.
pub fn map_kind(bundle: &HasKind) -> Vec<Fragment> {
    match bundle.kind {
        ModelingKind::Template => vec![Fragment::text(
            Tag::ModelingKind,
            ModelingKind::Template.as_str(),
        )],
        ModelingKind::Instance => Vec::new(),
    }
}

pub fn map_qualifiable(bundle: &Qualifiable) -> Vec<Fragment> {
    if bundle.qualifier.is_empty() {
        return Vec::new();
    }
    let children = bundle.qualifier.iter().map(constraint_fragment).collect();
    vec![Fragment::parent(Tag::Qualifier, children)]
}

/// `tag` wrapping a `keys` list with one `key` per reference step.
pub fn reference_fragment(tag: Tag, reference: &Reference) -> Fragment {
    let keys = reference
        .keys
        .iter()
        .map(|key| {
            Fragment::text(Tag::Key, &key.value)
                .with_attribute("type", key.key_type.as_str())
                .with_attribute("local", key.local.to_string())
                .with_attribute("idType", key.id_type.as_str())
        })
        .collect();
    Fragment::parent(tag, vec![Fragment::parent(Tag::Keys, keys)])
}

fn constraint_fragment(constraint: &Constraint) -> Fragment {
    match constraint {
        Constraint::Qualifier(qualifier) => {
            let mut children = vec![
                Fragment::text(Tag::Type, &qualifier.qualifier_type),
                Fragment::text(Tag::ValueType, &qualifier.value_type),
            ];
            if let Some(value) = non_empty(&qualifier.value) {
                children.push(Fragment::text(Tag::Value, value));
            }
            if let Some(value_id) = &qualifier.value_id {
                children.push(reference_fragment(Tag::ValueId, value_id));
            }
            Fragment::parent(Tag::Qualifiers, children)
        }
        Constraint::Formula(formula) => {
            let mut children = Vec::new();
            if !formula.depends_on.is_empty() {
                let refs = formula
                    .depends_on
                    .iter()
                    .map(|reference| reference_fragment(Tag::Reference, reference))
                    .collect();
                children.push(Fragment::parent(Tag::DependsOnRefs, refs));
            }
            Fragment::parent(Tag::Formula, children)
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn missing(capability: Capability, attribute: &'static str) -> SerializeError {
    SerializeError::MissingRequiredAttribute {
        capability,
        attribute,
        entity: None,
    }
}
