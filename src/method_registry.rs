use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error::RouterError;

// Every method Node's http module knows about (`require('http').METHODS`).

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Acl,
    Bind,
    Checkout,
    Connect,
    Copy,
    Delete,
    Get,
    Head,
    Link,
    Lock,
    #[strum(serialize = "M-SEARCH")]
    MSearch,
    Merge,
    Mkactivity,
    Mkcalendar,
    Mkcol,
    Move,
    Notify,
    Options,
    Patch,
    Post,
    Propfind,
    Proppatch,
    Purge,
    Put,
    Rebind,
    Report,
    Search,
    Subscribe,
    Trace,
    Unbind,
    Unlink,
    Unlock,
    Unsubscribe,
}

impl HttpMethod {
    /// Returns the uppercase wire token (e.g. `"GET"`).
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Exact lookup of an uppercase wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        METHOD_REGISTRY.get(token)
    }
}

lazy_static! {
    static ref METHOD_REGISTRY: MethodRegistry = MethodRegistry::new();
}

/// Case-insensitive lookup used at registration time.
pub fn normalize_method(raw: &str) -> Result<HttpMethod, RouterError> {
    HttpMethod::from_token(raw)
        .or_else(|| HttpMethod::from_token(&raw.to_uppercase()))
        .ok_or_else(|| RouterError::UnsupportedMethod(raw.to_owned()))
}

struct MethodRegistry {
    method_lookup: HashMap<&'static str, HttpMethod>,
}

impl MethodRegistry {
    fn new() -> Self {
        let method_lookup = HttpMethod::iter()
            .map(|method| (method.as_str(), method))
            .collect();
        Self { method_lookup }
    }

    fn get(&self, token: &str) -> Option<HttpMethod> {
        self.method_lookup.get(token).copied()
    }
}
