use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Name of the page query parameter that selects a version.
pub const VERSION_PARAM: &str = "v";

/// The `content/versions.json` document: selectable versions in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionCatalog {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub versions: IndexMap<String, String>,
}

impl VersionCatalog {
    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// Picker label: `"<id> — <label>"`, or the bare id when unlabelled.
    pub fn option_label(&self, version: &str) -> String {
        match self.versions.get(version) {
            Some(label) if !label.is_empty() => format!("{version} — {label}"),
            _ => version.to_string(),
        }
    }
}

/// Picks the version to load.
///
/// A non-empty request naming a catalog key wins, then the declared default,
/// then the first key. `None` means nothing can be loaded.
pub fn resolve_version(catalog: &VersionCatalog, requested: Option<&str>) -> Option<String> {
    if let Some(requested) = requested.filter(|id| !id.is_empty()) {
        if catalog.contains(requested) {
            return Some(requested.to_string());
        }
    }
    if let Some(default) = catalog.default.as_deref().filter(|id| !id.is_empty()) {
        return Some(default.to_string());
    }
    catalog.versions.keys().next().cloned()
}

/// Reads the requested version from the page URL.
pub fn version_param(page_url: &Url) -> Option<String> {
    page_url
        .query_pairs()
        .find(|(key, _)| key == VERSION_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Returns `page_url` with the version parameter replaced.
///
/// Other query parameters keep their order; an empty `version` removes the
/// parameter altogether.
pub fn with_version_param(page_url: &Url, version: Option<&str>) -> Url {
    let retained: Vec<(String, String)> = page_url
        .query_pairs()
        .filter(|(key, _)| key != VERSION_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = page_url.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if let Some(version) = version.filter(|id| !id.is_empty()) {
            pairs.append_pair(VERSION_PARAM, version);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(default: Option<&str>, keys: &[&str]) -> VersionCatalog {
        VersionCatalog {
            default: default.map(str::to_string),
            versions: keys
                .iter()
                .map(|key| (key.to_string(), format!("label {key}")))
                .collect(),
        }
    }

    #[test]
    fn requested_key_wins_over_default() {
        let catalog = catalog(Some("v2"), &["v1", "v2"]);
        assert_eq!(resolve_version(&catalog, Some("v1")), Some("v1".into()));
    }

    #[test]
    fn unknown_or_empty_request_falls_back_to_default() {
        let catalog = catalog(Some("v2"), &["v1", "v2"]);
        assert_eq!(resolve_version(&catalog, Some("v9")), Some("v2".into()));
        assert_eq!(resolve_version(&catalog, Some("")), Some("v2".into()));
        assert_eq!(resolve_version(&catalog, None), Some("v2".into()));
    }

    #[test]
    fn first_key_used_without_default() {
        let catalog = catalog(None, &["beta", "alpha"]);
        assert_eq!(resolve_version(&catalog, None), Some("beta".into()));
    }

    #[test]
    fn empty_catalog_resolves_to_nothing() {
        assert_eq!(resolve_version(&VersionCatalog::default(), Some("v1")), None);
    }

    #[test]
    fn option_label_includes_non_empty_label() {
        let mut catalog = catalog(None, &["v1"]);
        catalog.versions.insert("v2".into(), String::new());
        assert_eq!(catalog.option_label("v1"), "v1 — label v1");
        assert_eq!(catalog.option_label("v2"), "v2");
    }

    #[test]
    fn version_param_is_replaced_in_place_of_old_value() {
        let url = Url::parse("http://localhost:8080/?lang=de&v=old").unwrap();
        assert_eq!(version_param(&url).as_deref(), Some("old"));

        let next = with_version_param(&url, Some("new"));
        assert_eq!(next.as_str(), "http://localhost:8080/?lang=de&v=new");

        let cleared = with_version_param(&Url::parse("http://localhost/?v=x").unwrap(), None);
        assert_eq!(cleared.as_str(), "http://localhost/");
    }
}
