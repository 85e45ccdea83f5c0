use anyhow::{bail, Context};
use clap::Parser;
use tracing::Level;
use trie_router::{Match, Router};

/// Registers routes and resolves one request against them.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Route as "<METHOD> <PATH>", e.g. "GET /posts/:id". Repeatable.
    #[arg(short, long = "route", value_name = "ROUTE")]
    routes: Vec<String>,

    /// Match with the compiled matcher instead of walking the trees.
    #[arg(long)]
    compiled: bool,

    /// Print every method tree before matching.
    #[arg(long)]
    dump_tree: bool,

    #[arg(short, long)]
    verbose: bool,

    method: String,
    url: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut router = Router::new();
    for def in &args.routes {
        let Some((method, path)) = def.trim().split_once(char::is_whitespace) else {
            bail!("invalid route {def:?}, expected \"<METHOD> <PATH>\"");
        };
        router
            .register(method, path, def.as_str())
            .with_context(|| format!("registering {def:?}"))?;
    }

    router.build_tree();
    if args.dump_tree {
        if let Some(trees) = router.trees() {
            print!("{trees}");
        }
    }

    let matches = if args.compiled {
        router.route_compiled(&args.method, &args.url)?
    } else {
        router.route(&args.method, &args.url)?
    };

    for m in &matches {
        println!("{}", format_match(m));
    }
    Ok(())
}

fn format_match(m: &Match<&str>) -> String {
    let mut params: Vec<_> = m.params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    params.sort();
    format!(
        "#{} {} {} {{{}}}",
        m.route.id(),
        m.route.method(),
        m.route.path(),
        params.join(", ")
    )
}
