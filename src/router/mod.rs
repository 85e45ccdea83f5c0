use std::sync::OnceLock;

use tracing::debug;

pub use matcher::{CompiledMatcher, Match, Params};
pub use route::Route;
pub use tree::{Label, Node, TreeTable, WILDCARD_MARKER};

use crate::{error::RouterError, method_registry::normalize_method, path::normalize_path};

mod matcher;
mod route;
mod tree;

/// Route registry plus the two structures derived from it.
///
/// The tree table and the compiled matcher are built at most once per
/// registry state, either explicitly through [`Router::build_tree`] and
/// [`Router::compile`] or on first use by [`Router::route`] and
/// [`Router::route_compiled`]. Registering a route drops both.
///
/// Matching only reads, so a fully built `Router` can be shared between
/// threads as long as `H: Sync`.
#[derive(Debug)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
    trees: OnceLock<TreeTable>,
    compiled: OnceLock<CompiledMatcher>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            routes: vec![],
            trees: OnceLock::new(),
            compiled: OnceLock::new(),
        }
    }

    pub fn register(
        &mut self,
        method: &str,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        let method = normalize_method(method)?;
        let path = normalize_path(path);
        let id = self.routes.len();
        debug!(%method, path = path.as_str(), id, "register route");

        self.routes.push(Route::new(id, method, path, handler));
        self.trees.take();
        self.compiled.take();
        Ok(self)
    }

    pub fn build_tree(&mut self) -> &mut Self {
        self.trees = OnceLock::from(TreeTable::build(&self.routes));
        self
    }

    pub fn route<'a>(
        &'a self,
        method: &str,
        url: &'a str,
    ) -> Result<Vec<Match<'a, H>>, RouterError> {
        matcher::walk(&self.routes, self.tree_table(), method, url)
    }

    pub fn compile(&mut self) -> &mut Self {
        let compiled = CompiledMatcher::compile(&self.routes, self.tree_table());
        self.compiled = OnceLock::from(compiled);
        self
    }

    pub fn route_compiled<'a>(
        &'a self,
        method: &str,
        url: &'a str,
    ) -> Result<Vec<Match<'a, H>>, RouterError> {
        let compiled = self.compiled.get_or_init(|| {
            debug!("compiling matcher on demand");
            CompiledMatcher::compile(&self.routes, self.tree_table())
        });
        compiled.run(&self.routes, method, url)
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn trees(&self) -> Option<&TreeTable> {
        self.trees.get()
    }

    pub fn compiled(&self) -> Option<&CompiledMatcher> {
        self.compiled.get()
    }

    fn tree_table(&self) -> &TreeTable {
        self.trees.get_or_init(|| {
            debug!("building route trees on demand");
            TreeTable::build(&self.routes)
        })
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
