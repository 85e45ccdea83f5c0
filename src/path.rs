pub const SEPARATOR: char = '/';
pub const PARAM_MARKER: char = ':';

/// Trims every `/`-delimited token, drops the empty ones and rejoins them
/// between a leading and a trailing slash.
pub fn normalize_path(raw: &str) -> String {
    let mut path = String::with_capacity(raw.len() + 2);
    path.push(SEPARATOR);
    for segment in raw.split(SEPARATOR).map(str::trim).filter(|s| !s.is_empty()) {
        path.push_str(segment);
        path.push(SEPARATOR);
    }
    path
}

/// Non-empty segments of a path, split in one go.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Returns the parameter name if `segment` is a parameter placeholder.
pub fn parameter_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(PARAM_MARKER)
}

/// Cursor over the non-empty segments of a URL.
///
/// Unlike [`split_segments`] nothing is precomputed: each call to `next`
/// scans forward from the last consumed boundary to the next separator.
/// The cursor is `Copy`, so a caller can hand its current position down
/// without allocating.
#[derive(Copy, Clone, Debug)]
pub struct Segments<'a> {
    url: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub fn new(url: &'a str) -> Self {
        Self { url, pos: 0 }
    }

    /// True when no further segment remains.
    pub fn is_exhausted(&self) -> bool {
        self.url[self.pos..].bytes().all(|b| b == b'/')
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.url[self.pos..];
        let start = self.pos + (rest.len() - rest.trim_start_matches(SEPARATOR).len());
        if start == self.url.len() {
            self.pos = start;
            return None;
        }

        let end = self.url[start..]
            .find(SEPARATOR)
            .map_or(self.url.len(), |idx| start + idx);
        self.pos = end;
        Some(&self.url[start..end])
    }
}
