//! Matcher compiler.
//!
//! Every method tree is unrolled into a tree of boxed closures, one per
//! node. A node closure only knows its own branch: the literal segments of
//! its children, whether a wildcard child exists, and for each route ending
//! at it which captured value goes to which parameter. Matching then walks
//! the URL with a [`Segments`] cursor instead of splitting it up front and
//! never looks at a [`Node`] again.

use std::{collections::HashMap, fmt};

use tracing::info;

use crate::{
    error::RouterError,
    path::Segments,
    router::{
        route::Route,
        tree::{Node, TreeTable},
    },
};

use super::{Match, Params};

/// A route ending at the node that produced it, with values already paired
/// to indices into the route's parameter list.
struct Hit<'a> {
    route: usize,
    bindings: Vec<(usize, &'a str)>,
}

type NodeFn =
    Box<dyn for<'a> Fn(Segments<'a>, &mut Vec<&'a str>) -> Option<Vec<Hit<'a>>> + Send + Sync>;

type DispatchFn = Box<
    dyn for<'a> Fn(&'a str, Segments<'a>, &mut Vec<&'a str>) -> Option<Vec<Hit<'a>>>
        + Send
        + Sync,
>;

fn node_fn<F>(f: F) -> NodeFn
where
    F: for<'a> Fn(Segments<'a>, &mut Vec<&'a str>) -> Option<Vec<Hit<'a>>>
        + Send
        + Sync
        + 'static,
{
    Box::new(f)
}

fn dispatch_fn<F>(f: F) -> DispatchFn
where
    F: for<'a> Fn(&'a str, Segments<'a>, &mut Vec<&'a str>) -> Option<Vec<Hit<'a>>>
        + Send
        + Sync
        + 'static,
{
    Box::new(f)
}

/// Route terminating at a node: `(parameter index, captured slot)` pairs.
struct Terminal {
    route: usize,
    slots: Vec<(usize, usize)>,
}

fn emit<'a>(terminals: &[Terminal], captured: &[&'a str]) -> Vec<Hit<'a>> {
    terminals
        .iter()
        .map(|terminal| Hit {
            route: terminal.route,
            bindings: terminal
                .slots
                .iter()
                .map(|&(param, slot)| (param, captured[slot]))
                .collect(),
        })
        .collect()
}

struct Compiler<'r, H> {
    routes: &'r [Route<H>],
    closures: usize,
}

impl<'r, H> Compiler<'r, H> {
    fn new(routes: &'r [Route<H>]) -> Self {
        Self { routes, closures: 0 }
    }

    /// `captured_depths` holds the segment index of every value pushed to
    /// the captured list on the way down to `node`.
    fn compile_node(
        &mut self,
        node: &Node,
        depth: usize,
        captured_depths: &mut Vec<usize>,
    ) -> NodeFn {
        let terminals = self.terminals(node, captured_depths);
        let dispatch = self.compile_dispatch(node, depth, captured_depths);
        self.closures += 1;

        match (terminals, dispatch) {
            (Some(terminals), None) => node_fn(move |segments, captured| {
                segments.is_exhausted().then(|| emit(&terminals, captured))
            }),
            (None, Some(dispatch)) => node_fn(move |mut segments, captured| {
                let segment = segments.next()?;
                dispatch(segment, segments, captured)
            }),
            (Some(terminals), Some(dispatch)) => {
                node_fn(move |mut segments, captured| match segments.next() {
                    None => Some(emit(&terminals, captured)),
                    Some(segment) => dispatch(segment, segments, captured),
                })
            }
            (None, None) => node_fn(|_, _| None),
        }
    }

    fn terminals(&self, node: &Node, captured_depths: &[usize]) -> Option<Vec<Terminal>> {
        if node.routes().is_empty() {
            return None;
        }

        let terminals = node
            .routes()
            .iter()
            .map(|&id| {
                let slots = self.routes.get(id).map_or_else(Vec::new, |route| {
                    route
                        .parameters()
                        .iter()
                        .enumerate()
                        .filter_map(|(param, (_, pos))| {
                            captured_depths
                                .iter()
                                .position(|depth| depth == pos)
                                .map(|slot| (param, slot))
                        })
                        .collect()
                });
                Terminal { route: id, slots }
            })
            .collect();
        Some(terminals)
    }

    // Literal children are always tried before the wildcard child.
    fn compile_dispatch(
        &mut self,
        node: &Node,
        depth: usize,
        captured_depths: &mut Vec<usize>,
    ) -> Option<DispatchFn> {
        let mut literals: Vec<(String, NodeFn)> = node
            .children()
            .iter()
            .map(|(literal, child)| {
                let next = self.compile_node(child, depth + 1, captured_depths);
                (literal.clone(), next)
            })
            .collect();

        let wildcard = node.wildcard().map(|child| {
            captured_depths.push(depth);
            let next = self.compile_node(child, depth + 1, captured_depths);
            captured_depths.pop();
            next
        });

        let dispatch = match (literals.len(), wildcard) {
            (0, None) => return None,
            (0, Some(wildcard)) => dispatch_fn(move |segment, segments, captured| {
                captured.push(segment);
                wildcard(segments, captured)
            }),
            (1, wildcard) => {
                let (literal, next) = literals.pop()?;
                dispatch_fn(move |segment, segments, captured| {
                    if segment == literal {
                        return next(segments, captured);
                    }
                    let wildcard = wildcard.as_ref()?;
                    captured.push(segment);
                    wildcard(segments, captured)
                })
            }
            (_, wildcard) => {
                let table: HashMap<String, NodeFn> = literals.into_iter().collect();
                dispatch_fn(move |segment, segments, captured| {
                    if let Some(next) = table.get(segment) {
                        return next(segments, captured);
                    }
                    let wildcard = wildcard.as_ref()?;
                    captured.push(segment);
                    wildcard(segments, captured)
                })
            }
        };
        Some(dispatch)
    }
}

/// Matching routine specialized for one snapshot of the tree table.
pub struct CompiledMatcher {
    methods: HashMap<&'static str, NodeFn>,
    closures: usize,
}

impl CompiledMatcher {
    pub(crate) fn compile<H>(routes: &[Route<H>], trees: &TreeTable) -> Self {
        let mut compiler = Compiler::new(routes);
        let methods: HashMap<_, _> = trees
            .iter()
            .map(|(method, root)| (method.as_str(), compiler.compile_node(root, 0, &mut vec![])))
            .collect();

        info!(methods = methods.len(), closures = compiler.closures, "compiled matcher");
        Self {
            methods,
            closures: compiler.closures,
        }
    }

    /// Number of node closures generated.
    pub fn closures(&self) -> usize {
        self.closures
    }

    /// `routes` must be the slice the matcher was compiled from; a hit on a
    /// route missing from it is reported as not found.
    pub(crate) fn run<'a, H>(
        &self,
        routes: &'a [Route<H>],
        method: &str,
        url: &'a str,
    ) -> Result<Vec<Match<'a, H>>, RouterError> {
        let not_found = || RouterError::not_found(method, url);

        let root = self.methods.get(method).ok_or_else(not_found)?;
        let mut captured = vec![];
        let hits = root(Segments::new(url), &mut captured).ok_or_else(not_found)?;

        hits.into_iter()
            .map(|hit| {
                let route = routes.get(hit.route).ok_or_else(not_found)?;
                let params: Params = hit
                    .bindings
                    .into_iter()
                    .filter_map(|(param, value)| {
                        let (name, _) = route.parameters().get(param)?;
                        Some((name.as_str(), value))
                    })
                    .collect();
                Ok(Match::new(route, params))
            })
            .collect()
    }
}

impl fmt::Debug for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("CompiledMatcher")
            .field("methods", &methods)
            .field("closures", &self.closures)
            .finish()
    }
}
