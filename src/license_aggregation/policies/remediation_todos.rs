use crate::license_aggregation::domain::{CatalogLicense, LicenseNameWithText};
use std::collections::BTreeSet;

/// Placeholder shown when the catalog knows no todos for a license
pub const TODO_DEFAULT_TEXT: &str = "todo not determined so far.";

const EXCEPTION_SEPARATOR: &str = " WITH ";

/// RemediationTodos policy for the REPORT detail table
///
/// Catalog ids are matched case-insensitively against, in order: the
/// license's SPDX identifier, that identifier without its `WITH` exception,
/// and the license name (extracted `LicenseRef-*` licenses only carry a
/// meaningful name). The first key with todos in the catalog wins. When no
/// key yields todos, a single placeholder is returned so the todo column is
/// never empty.
pub struct RemediationTodos;

impl RemediationTodos {
    /// Selects the todos for a license
    ///
    /// # Arguments
    /// * `license` - License entry of the detail row
    /// * `catalog` - Licenses listed by the catalog (empty if unavailable)
    ///
    /// # Returns
    /// Sorted, de-duplicated todo texts; never empty
    pub fn for_license(license: &LicenseNameWithText, catalog: &[CatalogLicense]) -> Vec<String> {
        let todos = Self::lookup_keys(license)
            .into_iter()
            .map(|key| Self::catalog_todos(key, catalog))
            .find(|todos| !todos.is_empty())
            .unwrap_or_default();

        if todos.is_empty() {
            vec![TODO_DEFAULT_TEXT.to_string()]
        } else {
            todos.into_iter().collect()
        }
    }

    fn lookup_keys(license: &LicenseNameWithText) -> Vec<&str> {
        let spdx_id = license
            .license_spdx_id()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let base_id = spdx_id
            .and_then(|id| id.split_once(EXCEPTION_SEPARATOR))
            .map(|(base, _)| base.trim());
        let name = license
            .license_name()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        [spdx_id, base_id, name].into_iter().flatten().collect()
    }

    fn catalog_todos(key: &str, catalog: &[CatalogLicense]) -> BTreeSet<String> {
        catalog
            .iter()
            .filter(|license| license.id.eq_ignore_ascii_case(key))
            .flat_map(|license| license.todos.iter().cloned())
            .collect()
    }
}
