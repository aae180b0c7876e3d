//! Typed conditional-access policy model for the import/retry path.
//!
//! Only the fields the importer rewrites are modeled; everything else is
//! round-tripped untouched through flattened maps. Serialization skips
//! `None` so cleared fields disappear from the request body instead of
//! being sent as explicit nulls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DIRECTORY_REFERENCE_SENTINEL, IMPORTED_POLICY_STATE};

/// A conditional-access policy as exported from the source tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalAccessPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "createdDateTime", default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<String>,
    #[serde(rename = "modifiedDateTime", default, skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<String>,
    pub conditions: ConditionalAccessConditions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `conditions` group. `users` and `applications` are the targeting
/// groups the sanitizer rewrites; both are required by the destination API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalAccessConditions {
    pub users: ConditionalAccessUsers,
    pub applications: ConditionalAccessApplications,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User/group/role targeting lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionalAccessUsers {
    #[serde(rename = "includeUsers", default, skip_serializing_if = "Option::is_none")]
    pub include_users: Option<Vec<String>>,
    #[serde(rename = "excludeUsers", default, skip_serializing_if = "Option::is_none")]
    pub exclude_users: Option<Vec<String>>,
    #[serde(rename = "includeGroups", default, skip_serializing_if = "Option::is_none")]
    pub include_groups: Option<Vec<String>>,
    #[serde(rename = "excludeGroups", default, skip_serializing_if = "Option::is_none")]
    pub exclude_groups: Option<Vec<String>>,
    #[serde(rename = "includeRoles", default, skip_serializing_if = "Option::is_none")]
    pub include_roles: Option<Vec<String>>,
    #[serde(rename = "excludeRoles", default, skip_serializing_if = "Option::is_none")]
    pub exclude_roles: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Application targeting lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionalAccessApplications {
    #[serde(rename = "includeApplications", default, skip_serializing_if = "Option::is_none")]
    pub include_applications: Option<Vec<String>>,
    #[serde(rename = "excludeApplications", default, skip_serializing_if = "Option::is_none")]
    pub exclude_applications: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConditionalAccessPolicy {
    /// Rewrite the policy for re-creation in the destination tenant: drop the
    /// source identifier, force the policy inactive, and clear the source
    /// creation timestamp.
    pub fn disable_for_import(&mut self) {
        self.id = None;
        self.state = Some(IMPORTED_POLICY_STATE.to_string());
        self.created_date_time = None;
    }

    /// Neutralize every directory reference inherited from the source tenant.
    ///
    /// Include lists collapse to the `"none"` sentinel so the policy still
    /// carries a (vacuous) targeting scope; every other list is dropped.
    pub fn scrub_directory_references(&mut self) {
        let users = &mut self.conditions.users;
        users.include_users = Some(vec![DIRECTORY_REFERENCE_SENTINEL.to_string()]);
        users.exclude_users = None;
        users.include_groups = None;
        users.exclude_groups = None;
        users.include_roles = None;
        users.exclude_roles = None;

        let applications = &mut self.conditions.applications;
        applications.include_applications = Some(vec![DIRECTORY_REFERENCE_SENTINEL.to_string()]);
        applications.exclude_applications = None;
    }
}
