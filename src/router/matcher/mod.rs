use std::collections::HashMap;

pub use compiled::CompiledMatcher;
pub(crate) use interpreted::walk;

use super::route::Route;

mod compiled;
mod interpreted;

/// Parameter name (borrowed from the route) to the URL segment bound to it.
pub type Params<'a> = HashMap<&'a str, &'a str>;

#[derive(Debug)]
pub struct Match<'a, H> {
    pub route: &'a Route<H>,
    pub params: Params<'a>,
}

impl<'a, H> Match<'a, H> {
    fn new(route: &'a Route<H>, params: Params<'a>) -> Self {
        Self { route, params }
    }
}
