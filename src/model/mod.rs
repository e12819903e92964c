//! Capability-composition metamodel.
//!
//! `capability` defines the capability bundles and the `Entity` trait,
//! `reference` the value types they carry, and `element` the concrete element
//! types used as input documents.

pub mod capability;
pub mod element;
pub mod reference;

pub use capability::{
    Capability, CapabilitySet, Entity, HasDataSpecification, HasKind, HasSemantics, Identifiable,
    Qualifiable, Referable,
};
pub use element::{
    Asset, AssetAdministrationShell, ConceptDescription, Element, Property, Submodel, View,
};
pub use reference::{
    AdministrativeInformation, Constraint, Formula, Identifier, Key, LangStringSet, Qualifier,
    Reference,
};
