/// Connection settings for one backend service.
///
/// Passed explicitly to every client so tests can point at a stub server;
/// nothing in this crate reads base URLs from globals.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// e.g. `http://localhost:8081`, no trailing slash.
    pub base_url: String,
    /// API version prefix, e.g. `v1alpha`.
    pub version: String,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: version.into(),
        }
    }

    /// URL for a resource collection, e.g. `…/v1alpha/pipelines`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, collection)
    }

    /// URL for a named resource, e.g. `…/v1alpha/pipelines/yolov7`.
    pub fn resource_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, name)
    }

    /// URL for a custom verb on a named resource, e.g.
    /// `…/v1alpha/pipelines/yolov7:trigger`.
    pub fn verb_url(&self, name: &str, verb: &str) -> String {
        format!("{}/{}/{}:{}", self.base_url, self.version, name, verb)
    }
}
