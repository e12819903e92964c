//! Access-control data schema.
//!
//! Plain data only; nothing here evaluates a rule. Relations to submodels and
//! properties are held as references. `AccessPermissionRule` is Referable and
//! Qualifiable but has no schema element type of its own, so asking the
//! composition engine to serialize one fails with `UnresolvedType`.

use crate::model::{Entity, Qualifiable, Reference, Referable};
use serde::{Deserialize, Serialize};

crate::tokens::token_table! {
    /// Kind of a permission, including explicit denial.
    PermissionKind {
        Allow => "Allow",
        Deny => "Deny",
        NotApplicable => "NotApplicable",
        Undefined => "Undefined",
    }
}

/// A single permission: the property defining its semantics and its kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub permission: Reference,
    pub kind_of_permission: PermissionKind,
}

/// Data element further classifying an object.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAttribute {
    pub object_attribute: Reference,
}

/// Data element further classifying a subject.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAttribute {
    pub subject_attribute: Reference,
}

/// Permissions granted on one referable object, optionally narrowed by
/// object attributes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsPerObject {
    pub permission_object: Reference,
    #[serde(default)]
    pub target_object_attributes: Vec<ObjectAttribute>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Permissions per authenticated subject for a set of objects.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPermissionRule {
    #[serde(flatten)]
    pub referable: Referable,
    #[serde(flatten)]
    pub qualifiable: Qualifiable,
    #[serde(default)]
    pub target_subject_attributes: Vec<SubjectAttribute>,
    #[serde(default)]
    pub permissions_per_object: Vec<PermissionsPerObject>,
}

impl AccessPermissionRule {
    pub fn new(referable: Referable) -> Self {
        Self {
            referable,
            qualifiable: Qualifiable::default(),
            target_subject_attributes: Vec::new(),
            permissions_per_object: Vec::new(),
        }
    }
}

impl Entity for AccessPermissionRule {
    fn lineage(&self) -> &'static [&'static str] {
        &["AccessPermissionRule"]
    }

    fn referable(&self) -> Option<&Referable> {
        Some(&self.referable)
    }

    fn qualifiable(&self) -> Option<&Qualifiable> {
        Some(&self.qualifiable)
    }
}

/// Local policy administration: the submodels that define subjects,
/// permissions and environment attributes, plus the rules themselves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable_subject_attributes: Option<Reference>,
    pub default_subject_attributes: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable_permissions: Option<Reference>,
    pub default_permissions: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable_environment_attributes: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment_attributes: Option<Reference>,
    #[serde(default)]
    pub access_permission_rules: Vec<AccessPermissionRule>,
}

impl AccessControl {
    /// Selectable subject attributes fall back to the defaults when unset.
    pub fn effective_subject_attributes(&self) -> &Reference {
        self.selectable_subject_attributes
            .as_ref()
            .unwrap_or(&self.default_subject_attributes)
    }

    /// Selectable permissions fall back to the defaults when unset.
    pub fn effective_permissions(&self) -> &Reference {
        self.selectable_permissions
            .as_ref()
            .unwrap_or(&self.default_permissions)
    }

    /// Selectable environment attributes fall back to the defaults when unset.
    pub fn effective_environment_attributes(&self) -> Option<&Reference> {
        self.selectable_environment_attributes
            .as_ref()
            .or(self.default_environment_attributes.as_ref())
    }
}

/// Endpoint of an external access control. Not yet specified by the
/// metamodel beyond its address.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub address: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAdministrationPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_access_control: Option<AccessControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_access_control: Option<Endpoint>,
}

/// Placeholder in the metamodel; carries no attributes yet.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecisionPoint {}

/// Placeholder in the metamodel; carries no attributes yet.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PolicyEnforcementPoint {}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInformationPoints {
    #[serde(default)]
    pub external_information_points: Vec<Endpoint>,
    #[serde(default)]
    pub internal_information_points: Vec<Reference>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlPolicyPoints {
    pub policy_administration_point: PolicyAdministrationPoint,
    #[serde(default)]
    pub policy_decision_point: PolicyDecisionPoint,
    #[serde(default)]
    pub policy_enforcement_point: PolicyEnforcementPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_information_points: Option<PolicyInformationPoints>,
}

/// Certificate used as a trust anchor. The metamodel leaves its content
/// open.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Certificate {}

/// Security attributes of an administration shell.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub access_control_policy_points: AccessControlPolicyPoints,
    #[serde(default)]
    pub trust_anchor: Vec<Certificate>,
}
