//! endpointkit CLI — resolve endpoints from the terminal.
//!
//! Usage:
//! ```bash
//! # Rotate through a list
//! endpointkit resolve --list 10.0.0.1:8000,10.0.0.2:8000 --count 4
//!
//! # Resolve via DNS
//! endpointkit resolve --dns triton.svc:8000/v2 --count 3
//!
//! # Load resolver + provider settings from a JSON file
//! endpointkit resolve --config endpoints.json
//!
//! # List provider kinds
//! endpointkit providers
//! ```

use std::env;
use std::process;
use std::sync::Arc;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use endpointkit_core::{ConfigError, EndpointProvider, Resolver, ResolverConfig};
use endpointkit_providers::ProviderConfig;

/// Layout of the `--config` file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    resolver: ResolverConfig,
    provider: ProviderConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "resolve" => cmd_resolve(&args[2..]).await,
        "providers" => {
            cmd_providers();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("endpointkit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("endpointkit {}", env!("CARGO_PKG_VERSION"));
    println!("Resolve request endpoints (host:port[/path])\n");
    println!("USAGE:");
    println!("    endpointkit <COMMAND>\n");
    println!("COMMANDS:");
    println!("    resolve    Resolve one or more endpoints");
    println!("    providers  List provider kinds");
    println!("    version    Print version");
    println!("    help       Print this help\n");
    println!("RESOLVE FLAGS (one provider source required):");
    println!("    --static <ADDR>            Fixed address");
    println!("    --list <A,B,...>           Round-robin list");
    println!("    --dns <HOST:PORT[/PATH]>   DNS discovery");
    println!("    --config <FILE>            JSON file with resolver + provider");
    println!("    --count <N>                Endpoints to resolve  [default: 1]");
    println!("    --max-attempts <N>         Attempt budget per endpoint  [default: 10]");
}

async fn cmd_resolve(args: &[String]) -> Result<(), String> {
    let count: u32 = match parse_flag(args, "--count") {
        Some(n) => n.parse().map_err(|_| format!("invalid --count: {n}"))?,
        None => 1,
    };

    let (provider_config, mut resolver_config) = match parse_flag(args, "--config") {
        Some(path) => {
            let file = load_config(&path).map_err(|e| e.to_string())?;
            (file.provider, file.resolver)
        }
        None => (provider_from_flags(args)?, ResolverConfig::default()),
    };
    if let Some(n) = parse_flag(args, "--max-attempts") {
        resolver_config.max_attempts = n
            .parse()
            .map_err(|_| format!("invalid --max-attempts: {n}"))?;
    }

    let provider: Arc<dyn EndpointProvider> = provider_config
        .build()
        .await
        .map_err(|e| e.to_string())?;
    tracing::debug!(
        provider = provider.name(),
        pool_size = ?provider.pool_size().ok(),
        "provider ready"
    );

    let mut resolver =
        Resolver::with_config(provider, resolver_config).map_err(|e| e.to_string())?;
    for _ in 0..count {
        let endpoint = resolver.get_endpoint().map_err(|e| e.to_string())?;
        println!("{endpoint}");
    }
    Ok(())
}

fn provider_from_flags(args: &[String]) -> Result<ProviderConfig, String> {
    if let Some(address) = parse_flag(args, "--static") {
        return Ok(ProviderConfig::Fixed { address });
    }
    if let Some(list) = parse_flag(args, "--list") {
        let addresses = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        return Ok(ProviderConfig::RoundRobin { addresses });
    }
    if let Some(target) = parse_flag(args, "--dns") {
        return Ok(ProviderConfig::Dns {
            target,
            refresh_secs: None,
        });
    }
    Err("one of --static, --list, --dns or --config is required".into())
}

fn load_config(path: &str) -> Result<FileConfig, ConfigError> {
    let file_error = |reason: String| ConfigError::File {
        path: path.to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))
}

fn cmd_providers() {
    println!("Provider kinds:\n");
    println!("  fixed        One static address (pool size 1)");
    println!("               Flag:   --static host:port[/path]");
    println!("               Config: {{\"kind\":\"fixed\",\"address\":\"...\"}}");
    println!();
    println!("  round_robin  Rotation over a static list");
    println!("               Flag:   --list a:1,b:2");
    println!("               Config: {{\"kind\":\"round_robin\",\"addresses\":[...]}}");
    println!();
    println!("  dns          Addresses discovered by DNS lookup");
    println!("               Flag:   --dns host:port[/path]");
    println!("               Config: {{\"kind\":\"dns\",\"target\":\"...\",\"refresh_secs\":30}}");
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}
