//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Destination API defaults
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/beta";
pub const DEFAULT_TOKEN_ENDPOINT: &str =
    "https://login.microsoftonline.com/common/oauth2/v2.0/token";

// Conditional-access sanitization
pub const DIRECTORY_REFERENCE_SENTINEL: &str = "none";
pub const SANITIZED_IMPORT_NOTICE: &str = "Unknown tenant IDs removed!";

// Conditional-access activation state forced on import
pub const IMPORTED_POLICY_STATE: &str = "disabled";

// Type label reported for imported device management scripts (the creation
// response does not echo a discriminator for this collection)
pub const DEVICE_MANAGEMENT_SCRIPT_TYPE: &str = "#microsoft.graph.deviceManagementScript";
