/// Use cases module containing application business logic orchestration
mod aggregate_license_info;
mod default_header;
mod license_info_service;
mod parser_selector;

pub use aggregate_license_info::{
    AggregateLicenseInfoUseCase, NO_APPLICABLE_PARSER_MESSAGE, NO_RELEASE_MESSAGE,
};
pub use default_header::default_license_info_header;
pub use license_info_service::LicenseInfoService;
pub use parser_selector::ParserSelector;
