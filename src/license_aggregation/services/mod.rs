mod license_filter;
mod release_assignment;

pub use license_filter::LicenseFilter;
pub use release_assignment::ReleaseAssignment;
