//! Domain types and models

pub mod apps;
pub mod conditional_access;
pub mod resource;

pub use apps::{AppTargetRequest, ManagedMobileApp};
pub use conditional_access::{
    ConditionalAccessApplications, ConditionalAccessConditions, ConditionalAccessPolicy,
    ConditionalAccessUsers,
};
pub use resource::{CreatedObject, GraphCollection, ImportOutcome, ResourceKind};
