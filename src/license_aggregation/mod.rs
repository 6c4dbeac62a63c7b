//! Domain layer: attachments, releases, license metadata and the pure
//! operations over them (exclusion filtering, release back-fill, todo lookup).
pub mod domain;
pub mod policies;
pub mod services;
