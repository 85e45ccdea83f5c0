use std::{collections::HashMap, fmt};

use strum::IntoEnumIterator;
use tracing::info;

use crate::{
    method_registry::HttpMethod,
    path::{parameter_name, split_segments},
};

use super::route::Route;

pub const WILDCARD_MARKER: &str = "*";

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Label {
    Root,
    Literal(String),
    Wildcard,
}

/// One segment level of a method tree.
///
/// Literal children are keyed by their segment text. All parameter segments
/// at this level share the single `wildcard` child, which records the
/// parameter name each route uses for it in `param_names`.
#[derive(Debug)]
pub struct Node {
    label: Label,
    children: HashMap<String, Node>,
    wildcard: Option<Box<Node>>,
    routes: Vec<usize>,
    param_names: HashMap<usize, String>,
}

impl Node {
    fn new(label: Label) -> Self {
        Self {
            label,
            children: HashMap::new(),
            wildcard: None,
            routes: vec![],
            param_names: HashMap::new(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn value(&self) -> &str {
        match &self.label {
            Label::Root => "",
            Label::Literal(literal) => literal,
            Label::Wildcard => WILDCARD_MARKER,
        }
    }

    pub fn children(&self) -> &HashMap<String, Node> {
        &self.children
    }

    pub fn child(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    pub fn wildcard(&self) -> Option<&Node> {
        self.wildcard.as_deref()
    }

    /// Ids of the routes terminating here, in registration order.
    pub fn routes(&self) -> &[usize] {
        &self.routes
    }

    /// Route id to the parameter name that route binds at this node.
    pub fn param_names(&self) -> &HashMap<usize, String> {
        &self.param_names
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.wildcard.is_none()
    }

    fn insert<H>(&mut self, route: &Route<H>) {
        let mut node = self;
        for segment in split_segments(route.path()) {
            node = match parameter_name(segment) {
                Some(name) => {
                    let child = node
                        .wildcard
                        .get_or_insert_with(|| Box::new(Node::new(Label::Wildcard)));
                    child.param_names.insert(route.id(), name.to_owned());
                    &mut **child
                }
                None => node
                    .children
                    .entry(segment.to_owned())
                    .or_insert_with(|| Node::new(Label::Literal(segment.to_owned()))),
            };
        }
        node.routes.push(route.id());
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
            + self.wildcard.as_ref().map_or(0, |w| w.count())
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}/", "", self.value(), indent = depth * 2)?;
        if !self.routes.is_empty() {
            write!(f, " routes={:?}", self.routes)?;
        }
        if !self.param_names.is_empty() {
            let mut names: Vec<_> = self.param_names.iter().collect();
            names.sort();
            let names: Vec<_> = names
                .into_iter()
                .map(|(id, name)| format!("{id}:{name}"))
                .collect();
            write!(f, " params={{{}}}", names.join(", "))?;
        }
        writeln!(f)?;

        let mut keys: Vec<_> = self.children.keys().collect();
        keys.sort();
        for key in keys {
            self.children[key].fmt_indented(f, depth + 1)?;
        }
        if let Some(wildcard) = &self.wildcard {
            wildcard.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// One root per method that has at least one route.
#[derive(Debug, Default)]
pub struct TreeTable {
    trees: HashMap<HttpMethod, Node>,
}

impl TreeTable {
    pub fn build<H>(routes: &[Route<H>]) -> Self {
        let mut trees = HashMap::new();
        for method in HttpMethod::iter() {
            let mut method_routes = routes.iter().filter(|r| r.method() == method).peekable();
            if method_routes.peek().is_none() {
                continue;
            }
            let mut root = Node::new(Label::Root);
            for route in method_routes {
                root.insert(route);
            }
            trees.insert(method, root);
        }

        let table = Self { trees };
        info!(
            trees = table.len(),
            routes = routes.len(),
            nodes = table.node_count(),
            "built route trees"
        );
        table
    }

    pub fn get(&self, method: HttpMethod) -> Option<&Node> {
        self.trees.get(&method)
    }

    /// Trees in method declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (HttpMethod, &Node)> {
        HttpMethod::iter().filter_map(|method| self.trees.get(&method).map(|root| (method, root)))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.trees.values().map(Node::count).sum()
    }
}

impl fmt::Display for TreeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (method, root) in self.iter() {
            writeln!(f, "{method}")?;
            root.fmt_indented(f, 1)?;
        }
        Ok(())
    }
}
