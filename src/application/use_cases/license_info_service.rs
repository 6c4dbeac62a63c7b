use crate::application::dto::{LicenseInfoFile, LicenseInfoFileRequest};
use crate::application::factories::GeneratorRegistry;
use crate::application::read_models::LicenseReportReadModelBuilder;
use crate::application::use_cases::{
    default_license_info_header, AggregateLicenseInfoUseCase, ParserSelector,
};
use crate::license_aggregation::domain::{
    CatalogLicense, LicenseInfoParsingResult, OutputFormatInfo, OutputFormatVariant, Release,
    User,
};
use crate::ports::inbound::LicenseInfoPort;
use crate::ports::outbound::{
    AttachmentParser, LicenseCatalog, ParsingResultCache, ReleaseStore,
};
use crate::shared::{LicenseInfoError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// LicenseInfoService - Façade generating license information files
///
/// Wires the aggregation use case, the release store, the license catalog
/// and the generator registry behind the `LicenseInfoPort`.
pub struct LicenseInfoService {
    aggregator: AggregateLicenseInfoUseCase,
    release_store: Arc<dyn ReleaseStore>,
    generators: GeneratorRegistry,
    license_catalog: Option<Arc<dyn LicenseCatalog>>,
}

impl LicenseInfoService {
    pub fn new(
        parsers: Vec<Arc<dyn AttachmentParser>>,
        cache: Arc<dyn ParsingResultCache>,
        release_store: Arc<dyn ReleaseStore>,
        generators: GeneratorRegistry,
    ) -> Self {
        Self {
            aggregator: AggregateLicenseInfoUseCase::new(ParserSelector::new(parsers), cache),
            release_store,
            generators,
            license_catalog: None,
        }
    }

    /// Sets the catalog consulted for REPORT remediation todos
    pub fn with_license_catalog(mut self, license_catalog: Arc<dyn LicenseCatalog>) -> Self {
        self.license_catalog = Some(license_catalog);
        self
    }

    fn validate_request(request: &LicenseInfoFileRequest) -> Result<()> {
        if request.generator_id.trim().is_empty() {
            return Err(LicenseInfoError::invalid_argument(
                "generator_id",
                "an output generator id is required",
            )
            .into());
        }
        if request.project.name().trim().is_empty() {
            return Err(
                LicenseInfoError::invalid_argument("project", "the project needs a name").into(),
            );
        }
        Ok(())
    }

    /// Resolves the requested release ids, keeping each one's selection
    fn resolve_releases(
        &self,
        request: &LicenseInfoFileRequest,
    ) -> Result<Vec<(Release, BTreeSet<String>)>> {
        request
            .release_ids_to_attachment_ids
            .iter()
            .map(|(release_id, attachment_ids)| {
                let release = self.fetch_release(release_id, &request.user)?;
                Ok((release, attachment_ids.clone()))
            })
            .collect()
    }

    fn fetch_release(&self, release_id: &str, user: &User) -> Result<Release> {
        self.release_store
            .get_release(release_id, user)
            .map_err(|e| {
                if e.downcast_ref::<LicenseInfoError>().is_some() {
                    e
                } else {
                    LicenseInfoError::upstream("release store", format!("release {}", release_id), e)
                        .into()
                }
            })
    }

    /// Catalog entries for REPORT todos; an unavailable catalog yields none
    fn catalog_licenses(&self, variant: OutputFormatVariant) -> Vec<CatalogLicense> {
        if variant != OutputFormatVariant::Report {
            return Vec::new();
        }
        let Some(catalog) = &self.license_catalog else {
            return Vec::new();
        };

        match catalog.list_licenses() {
            Ok(licenses) => {
                debug!(count = licenses.len(), "Loaded license catalog");
                licenses
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "License catalog unavailable, rendering without todos");
                Vec::new()
            }
        }
    }
}

impl LicenseInfoPort for LicenseInfoService {
    fn generate_file(&self, request: &LicenseInfoFileRequest) -> Result<LicenseInfoFile> {
        Self::validate_request(request)?;
        let generator = self.generators.find(&request.generator_id)?;
        let format_info = generator.format_info().clone();

        let selection = self.resolve_releases(request)?;
        let results = self.aggregator.all_release_license_infos(
            &selection,
            &request.user,
            &request.excluded_licenses_per_attachment,
        )?;
        info!(
            generator = %format_info.generator_id,
            releases = selection.len(),
            results = results.len(),
            "Aggregated license information"
        );

        let catalog = self.catalog_licenses(format_info.variant);
        let header_text = request
            .project
            .license_info_header_text()
            .unwrap_or_else(|| self.default_header_text());
        let model = LicenseReportReadModelBuilder::build(
            &results,
            request.project.name(),
            header_text,
            format_info.variant,
            &catalog,
        );

        let payload = generator.format(&model)?;
        Ok(LicenseInfoFile::new(format_info, payload.into_bytes()))
    }

    fn possible_output_formats(&self) -> Vec<OutputFormatInfo> {
        self.generators.output_formats()
    }

    fn output_format_info(&self, generator_id: &str) -> Result<OutputFormatInfo> {
        Ok(self.generators.find(generator_id)?.format_info().clone())
    }

    fn attachment_license_info(
        &self,
        release: Option<&Release>,
        attachment_content_id: &str,
        user: &User,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        let results = self
            .aggregator
            .attachment_license_info(release, attachment_content_id, user)?;
        Ok(results.as_ref().clone())
    }

    fn default_header_text(&self) -> &'static str {
        default_license_info_header()
    }
}
