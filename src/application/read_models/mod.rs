//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for rendering.

pub mod license_report_read_model;
pub mod license_report_read_model_builder;

pub use license_report_read_model::{
    DisclosureErrorView, DisclosureRowView, LicenseReferenceView, LicenseReportReadModel,
    LicenseTextView, ReleaseCopyrightView, ReleaseLicenseView,
};
pub use license_report_read_model_builder::{LicenseReportReadModelBuilder, UNKNOWN_LICENSE_NAME};
