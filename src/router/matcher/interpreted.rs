use crate::{
    error::RouterError,
    method_registry::HttpMethod,
    path::split_segments,
    router::{route::Route, tree::TreeTable},
};

use super::{Match, Params};

/// Walks the method's tree one segment at a time. A literal child always
/// wins over the wildcard child and there is no backtracking.
pub fn walk<'a, H>(
    routes: &'a [Route<H>],
    trees: &'a TreeTable,
    method: &str,
    url: &'a str,
) -> Result<Vec<Match<'a, H>>, RouterError> {
    let not_found = || RouterError::not_found(method, url);

    let mut node = HttpMethod::from_token(method)
        .and_then(|method| trees.get(method))
        .ok_or_else(not_found)?;

    let mut visited = vec![];
    for segment in split_segments(url) {
        node = node
            .child(segment)
            .or(node.wildcard())
            .ok_or_else(not_found)?;
        visited.push((node.param_names(), segment));
    }

    if node.routes().is_empty() {
        return Err(not_found());
    }

    let matches = node
        .routes()
        .iter()
        .map(|&id| {
            let route = &routes[id];
            let params: Params = visited
                .iter()
                .filter_map(|(names, value)| names.get(&id).map(|name| (name.as_str(), *value)))
                .collect();
            Match::new(route, params)
        })
        .collect();
    Ok(matches)
}
