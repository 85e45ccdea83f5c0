pub use error::RouterError;
pub use method_registry::{normalize_method, HttpMethod};
pub use path::{normalize_path, PARAM_MARKER};
pub use router::{
    CompiledMatcher, Label, Match, Node, Params, Route, Router, TreeTable, WILDCARD_MARKER,
};

mod error;
mod method_registry;
mod path;
mod router;

#[cfg(test)]
mod test_utils;
