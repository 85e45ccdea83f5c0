use crate::{
    method_registry::HttpMethod,
    path::{parameter_name, split_segments},
};

/// One registered `(method, path, handler)` triple.
#[derive(Debug)]
pub struct Route<H> {
    id: usize,
    method: HttpMethod,
    path: String,
    handler: H,
    parameters: Vec<(String, usize)>,
}

impl<H> Route<H> {
    /// `path` must already be normalized.
    pub(crate) fn new(id: usize, method: HttpMethod, path: String, handler: H) -> Self {
        let parameters = parameter_positions(&path);
        Self {
            id,
            method,
            path,
            handler,
            parameters,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Parameter names with their zero-based segment position, in path order.
    pub fn parameters(&self) -> &[(String, usize)] {
        &self.parameters
    }

    pub fn parameter_position(&self, name: &str) -> Option<usize> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, pos)| *pos)
    }
}

// A repeated name binds the position of its last occurrence.
fn parameter_positions(path: &str) -> Vec<(String, usize)> {
    let mut parameters: Vec<(String, usize)> = vec![];
    for (pos, segment) in split_segments(path).into_iter().enumerate() {
        let Some(name) = parameter_name(segment) else {
            continue;
        };
        match parameters.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = pos,
            None => parameters.push((name.to_owned(), pos)),
        }
    }
    parameters
}
