use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RouterError {
    #[error("Method {0} is not supported")]
    UnsupportedMethod(String),
    #[error("{method} {url} not found")]
    RouteNotFound { method: String, url: String },
}

impl RouterError {
    pub(crate) fn not_found(method: &str, url: &str) -> Self {
        Self::RouteNotFound {
            method: method.to_owned(),
            url: url.to_owned(),
        }
    }
}
