use std::collections::BTreeMap;

use tracing::Level;

use crate::{
    error::RouterError,
    router::{Match, Params, Router},
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
// Reference table
// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -

pub struct Case {
    pub method: &'static str,
    pub path: &'static str,
    pub urls: &'static [(&'static str, &'static [(&'static str, &'static str)])],
}

pub const REFERENCE_ROUTES: &[Case] = &[
    Case {
        method: "GET",
        path: "/",
        urls: &[("/", &[])],
    },
    Case {
        method: "GET",
        path: "/about/",
        urls: &[("/about", &[])],
    },
    Case {
        method: "GET",
        path: "/posts",
        urls: &[("/posts", &[])],
    },
    Case {
        method: "GET",
        path: "/posts/:id/",
        urls: &[
            ("/posts/1", &[("id", "1")]),
            ("/posts/2/", &[("id", "2")]),
            ("/posts/abc/", &[("id", "abc")]),
        ],
    },
    Case {
        method: "GET",
        path: "/posts/:postId/comments/",
        urls: &[("/posts/abc/comments", &[("postId", "abc")])],
    },
    Case {
        method: "GET",
        path: "/posts/:postId/comments/:commentId/",
        urls: &[
            (
                "/posts/abc/comments/1221",
                &[("postId", "abc"), ("commentId", "1221")],
            ),
            (
                "/posts/abc/comments/1221/",
                &[("postId", "abc"), ("commentId", "1221")],
            ),
            (
                "/posts/213/comments/122/",
                &[("postId", "213"), ("commentId", "122")],
            ),
        ],
    },
    Case {
        method: "GET",
        path: "/repos/:owner/:repo/keys/:id/",
        urls: &[(
            "/repos/trekjs/trek/keys/233",
            &[("owner", "trekjs"), ("repo", "trek"), ("id", "233")],
        )],
    },
    Case {
        method: "GET",
        path: "/repos/:owner/:repo/issues/:number/labels/:name/",
        urls: &[(
            "/repos/trekjs/trek/issues/233/labels/help",
            &[
                ("owner", "trekjs"),
                ("repo", "trek"),
                ("number", "233"),
                ("name", "help"),
            ],
        )],
    },
];

/// URLs that hit, miss, or stop at an interior node of the reference table.
pub const PROBE_URLS: &[&str] = &[
    "",
    "/",
    "//",
    "/about",
    "/about/more",
    "/posts",
    "/posts/1",
    "//posts//1//",
    "/posts/abc/comments",
    "/posts/abc/comments/1221/",
    "/posts/abc/comments/1221/extra",
    "/posts/abc/other",
    "/repos",
    "/repos/trekjs",
    "/repos/trekjs/trek",
    "/repos/trekjs/trek/keys",
    "/repos/trekjs/trek/keys/233",
    "/repos/trekjs/trek/issues/233/labels/help",
    "/repos/trekjs/trek/issues/233/labels",
    "/unknown",
    "/*",
    "/:id",
];

pub fn reference_router() -> Router<&'static str> {
    let mut router = Router::new();
    for case in REFERENCE_ROUTES {
        router.register(case.method, case.path, case.path).unwrap();
    }
    router
}

// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
// Generated tables
// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -

/// Literals, two parameter names, a literal `*` and a bare `:`.
pub const ROUTE_ALPHABET: &[&str] = &["a", "b", ":x", ":y", "*", ":"];

pub const URL_ALPHABET: &[&str] = &["a", "b", "c", "*", ":", "x"];

/// Every `/`-joined combination of `alphabet` with at most `max_len` segments.
pub fn combinations(alphabet: &[&str], max_len: usize) -> Vec<String> {
    let mut all = vec![String::from("/")];
    let mut last = vec![String::from("/")];
    for _ in 0..max_len {
        last = last
            .iter()
            .flat_map(|prefix| alphabet.iter().map(move |segment| format!("{prefix}{segment}/")))
            .collect();
        all.extend(last.iter().cloned());
    }
    all
}

/// Deterministic spread of small route sets over `paths`. Every set mixes
/// GET and POST and registers its first path twice.
pub fn generated_route_sets(paths: &[String]) -> Vec<Vec<(&'static str, String)>> {
    let mut sets = vec![];
    for start in 0..paths.len() {
        for step in [1, 5, 7, 11] {
            let mut set: Vec<_> = (0..4)
                .map(|k| {
                    let method = if k % 3 == 2 { "POST" } else { "GET" };
                    (method, paths[(start + k * step) % paths.len()].clone())
                })
                .collect();
            set.push(set[0].clone());
            sets.push(set);
        }
    }
    sets
}

// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
// Comparisons
// - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -

pub fn summarize<'a, H>(matches: Vec<Match<'a, H>>) -> Vec<(usize, Params<'a>)> {
    matches
        .into_iter()
        .map(|m| (m.route.id(), m.params))
        .collect()
}

pub fn owned_summary<H>(
    result: Result<Vec<Match<'_, H>>, RouterError>,
) -> Result<Vec<(usize, BTreeMap<String, String>)>, RouterError> {
    result.map(|matches| {
        matches
            .into_iter()
            .map(|m| {
                let params = m
                    .params
                    .into_iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                (m.route.id(), params)
            })
            .collect()
    })
}

/// Both matchers either fail with the same error or return the same
/// `(route id, params)` list in the same order.
pub fn assert_equivalent<H>(router: &Router<H>, method: &str, url: &str) {
    let interpreted = router.route(method, url).map(summarize);
    let compiled = router.route_compiled(method, url).map(summarize);
    assert_eq!(interpreted, compiled, "{method} {url:?}");
}
