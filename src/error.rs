//! Error taxonomy shared by the mappers, the type resolver and the
//! composition engine.
//!
//! None of these errors are recovered inside the crate. The composition
//! engine aborts the current entity and hands the error back untouched apart
//! from attaching the entity label; whether a whole document is abandoned or
//! the entity is skipped is decided by the caller (see `xml::ErrorPolicy`).

use crate::model::Capability;
use thiserror::Error;

/// Failure while composing the fragments of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A required attribute of an exhibited capability is empty or absent.
    #[error("{capability} attribute '{attribute}' is required but empty{}", describe(.entity))]
    MissingRequiredAttribute {
        capability: Capability,
        attribute: &'static str,
        entity: Option<String>,
    },

    /// The entity is Referable but none of its declared types is registered.
    #[error(
        "entity{} is Referable but none of its types {lineage:?} is a registered schema element type",
        describe(.entity)
    )]
    UnresolvedType {
        lineage: Vec<String>,
        entity: Option<String>,
    },
}

impl SerializeError {
    /// Attach the entity label unless a more precise one is already set.
    pub fn with_entity(self, label: Option<String>) -> Self {
        match self {
            SerializeError::MissingRequiredAttribute {
                capability,
                attribute,
                entity,
            } => SerializeError::MissingRequiredAttribute {
                capability,
                attribute,
                entity: entity.or(label),
            },
            SerializeError::UnresolvedType { lineage, entity } => SerializeError::UnresolvedType {
                lineage,
                entity: entity.or(label),
            },
        }
    }

    /// Label of the entity that failed, when one was available.
    pub fn entity(&self) -> Option<&str> {
        match self {
            SerializeError::MissingRequiredAttribute { entity, .. }
            | SerializeError::UnresolvedType { entity, .. } => entity.as_deref(),
        }
    }

    /// Capability whose contribution failed. Type resolution belongs to the
    /// Referable contribution (it produces the model-type fragment).
    pub fn capability(&self) -> Capability {
        match self {
            SerializeError::MissingRequiredAttribute { capability, .. } => *capability,
            SerializeError::UnresolvedType { .. } => Capability::Referable,
        }
    }
}

/// Reverse table lookup given a token outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {enumeration} token '{token}'")]
pub struct UnknownTokenError {
    pub enumeration: &'static str,
    pub token: String,
}

impl UnknownTokenError {
    pub(crate) fn new(enumeration: &'static str, token: &str) -> Self {
        Self {
            enumeration,
            token: token.to_string(),
        }
    }
}

pub(crate) fn describe(entity: &Option<String>) -> String {
    match entity {
        Some(label) => format!(" (entity '{label}')"),
        None => String::new(),
    }
}
