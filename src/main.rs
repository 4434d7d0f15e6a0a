// Omnisearch demo CLI
//
// Loads a JSON snapshot of collections and staff, runs one query for an actor
// and prints the merged result as pretty JSON.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use omnisearch::{
    HttpRemoteDelegate, Module, PermissionSet, RemoteConfig, SearchConfig, SearchOrchestrator,
    Snapshot,
};

const USAGE: &str =
    "Usage: omnisearch <snapshot.json> <actor-id> <query> [--deny <module>]... [--remote <url>]";

struct Args {
    snapshot: String,
    actor_id: String,
    query: String,
    denied: Vec<Module>,
    remote: Option<String>,
}

fn parse_args(raw: Vec<String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut denied = Vec::new();
    let mut remote = None;

    let mut iter = raw.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--deny" => {
                let name = iter.next().context("--deny needs a module name")?;
                denied.push(name.parse::<Module>()?);
            }
            "--remote" => {
                remote = Some(iter.next().context("--remote needs an endpoint URL")?);
            }
            _ => positional.push(arg),
        }
    }

    let [snapshot, actor_id, query]: [String; 3] = match positional.try_into() {
        Ok(args) => args,
        Err(_) => bail!("{USAGE}"),
    };
    Ok(Args {
        snapshot,
        actor_id,
        query,
        denied,
        remote,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().collect())?;

    let raw = tokio::fs::read_to_string(&args.snapshot)
        .await
        .with_context(|| format!("Failed to read snapshot {}", args.snapshot))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot {}", args.snapshot))?;
    let (store, directory) = snapshot.into_collaborators();

    let mut builder = SearchOrchestrator::builder()
        .store(Arc::new(store))
        .directory(Arc::new(directory))
        .config(SearchConfig::builder().build()?);
    if let Some(endpoint) = &args.remote {
        let mut remote = RemoteConfig::new(endpoint)?;
        if let Ok(key) = std::env::var("OMNISEARCH_API_KEY") {
            remote = remote.with_api_key(key);
        }
        builder = builder.delegate(Arc::new(HttpRemoteDelegate::new(remote)?));
    }
    let engine = builder.build()?;

    let permissions = args
        .denied
        .iter()
        .fold(PermissionSet::all(), |perms, module| perms.deny(*module));

    let result = engine.search(&args.query, &args.actor_id, &permissions).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("omnisearch")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_with_flags() {
        let args = parse_args(argv(&["data.json", "u1", "--deny", "leads", "juan", "--remote", "https://x.test/search"]))
            .unwrap();
        assert_eq!(args.snapshot, "data.json");
        assert_eq!(args.actor_id, "u1");
        assert_eq!(args.query, "juan");
        assert_eq!(args.denied, vec![Module::Leads]);
        assert_eq!(args.remote.as_deref(), Some("https://x.test/search"));
    }

    #[test]
    fn test_parse_args_rejects_missing_query() {
        assert!(parse_args(argv(&["data.json", "u1"])).is_err());
        assert!(parse_args(argv(&["a", "b", "c", "--deny", "invoices"])).is_err());
    }
}
