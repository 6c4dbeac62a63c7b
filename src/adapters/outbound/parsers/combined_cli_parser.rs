use super::cli_parser::{copyright_from_element, license_from_element, XML_EXTENSION};
use super::read_content;
use super::xml_document::{parse_document, root_element_name, XmlElement};
use crate::license_aggregation::domain::{
    Attachment, AttachmentType, LicenseInfo, LicenseInfoParsingResult, Release, User,
};
use crate::ports::outbound::{AttachmentContentStore, AttachmentParser, ReleaseStore};
use crate::shared::{LicenseInfoError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Default external id key linking releases to combined report components
pub const DEFAULT_EXTERNAL_ID_KEY: &str = "combined-cli-id";

const SOURCE_COMPONENT_ATTRIBUTE: &str = "srcComponent";

/// CombinedCliParser reads combined CLI reports, which bundle the license
/// information of several components in one file.
///
/// Every `License` and `Copyright` element names its component in the
/// `srcComponent` attribute. One result is produced per component; its
/// release fields come from the release whose external id equals the
/// component id. Elements without a component belong to the release owning
/// the attachment and are left for back-fill.
pub struct CombinedCliParser {
    content_store: Arc<dyn AttachmentContentStore>,
    release_store: Arc<dyn ReleaseStore>,
    external_id_key: String,
}

impl CombinedCliParser {
    pub const NAME: &'static str = "CombinedCLIParser";
    pub const ROOT_ELEMENT: &'static str = "CombinedCLI";

    pub fn new(
        content_store: Arc<dyn AttachmentContentStore>,
        release_store: Arc<dyn ReleaseStore>,
        external_id_key: impl Into<String>,
    ) -> Self {
        Self {
            content_store,
            release_store,
            external_id_key: external_id_key.into(),
        }
    }

    fn group_by_component(root: &XmlElement) -> BTreeMap<Option<String>, LicenseInfo> {
        let mut infos: BTreeMap<Option<String>, LicenseInfo> = BTreeMap::new();
        let component_of = |element: &XmlElement| {
            element
                .attribute(SOURCE_COMPONENT_ATTRIBUTE)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };

        for element in root.descendants("License") {
            let info = infos.entry(component_of(element)).or_default();
            *info = std::mem::take(info).with_license(license_from_element(element));
        }
        for element in root.descendants("Copyright") {
            if let Some(copyright) = copyright_from_element(element) {
                let info = infos.entry(component_of(element)).or_default();
                *info = std::mem::take(info).with_copyright(copyright);
            }
        }

        infos
    }

    fn component_result(
        &self,
        component_id: &str,
        info: LicenseInfo,
        user: &User,
    ) -> Result<LicenseInfoParsingResult> {
        let releases = self
            .release_store
            .releases_with_external_id(&self.external_id_key, component_id, user)
            .map_err(|e| {
                LicenseInfoError::upstream(
                    "release store",
                    format!("{} = {}", self.external_id_key, component_id),
                    e,
                )
            })?;

        let result = LicenseInfoParsingResult::success(info);
        Ok(match releases.first() {
            Some(release) => result.with_release_fields(
                Some(release.vendor().unwrap_or_default().to_string()),
                Some(release.name().to_string()),
                Some(release.version().to_string()),
            ),
            None => {
                debug!(component = component_id, "No release found for combined CLI component");
                result.with_release_fields(
                    Some(String::new()),
                    Some(component_id.to_string()),
                    Some(String::new()),
                )
            }
        })
    }
}

impl AttachmentParser for CombinedCliParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_applicable_to(
        &self,
        attachment: &Attachment,
        _user: &User,
        _release: &Release,
    ) -> Result<bool> {
        if attachment.attachment_type() != AttachmentType::ComponentLicenseInfoCombined
            || !attachment.has_extension(XML_EXTENSION)
        {
            return Ok(false);
        }

        let content = read_content(self.content_store.as_ref(), attachment)?;
        Ok(root_element_name(&content).as_deref() == Some(Self::ROOT_ELEMENT))
    }

    fn license_infos(
        &self,
        attachment: &Attachment,
        user: &User,
        _release: &Release,
    ) -> Result<Vec<LicenseInfoParsingResult>> {
        let content = read_content(self.content_store.as_ref(), attachment)?;

        let root = match parse_document(&content) {
            Ok(root) => root,
            Err(e) => {
                return Ok(vec![LicenseInfoParsingResult::failure(format!(
                    "Could not parse combined CLI file {}: {}",
                    attachment.filename(),
                    e
                ))
                .with_filename(attachment.filename())])
            }
        };

        let infos = Self::group_by_component(&root);
        if infos.is_empty() {
            // nothing to attribute; back-fill ties the empty result to the owning release
            return Ok(vec![LicenseInfoParsingResult::success(
                LicenseInfo::new().with_filename(attachment.filename()),
            )]);
        }

        infos
            .into_iter()
            .map(|(component_id, info)| {
                let info = info.with_filename(attachment.filename());
                match component_id {
                    Some(component_id) => self.component_result(&component_id, info, user),
                    None => Ok(LicenseInfoParsingResult::success(info)),
                }
            })
            .collect()
    }
}
