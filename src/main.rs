use kvclient::{KvClientConfig, KvClientOptions};
use slog::Drain;
use std::error::Error;

const DEFAULT_ADDRESS: &str = "127.0.0.1:50051";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let logger = logger();
    let address = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    let (host, port) = parse_address(&address)?;

    let client = kvclient::try_create_kv_client(KvClientConfig {
        host,
        port,
        tls: None,
        info_logger: logger.clone(),
        options: KvClientOptions::default(),
    })?;

    client.connect().await?;
    slog::info!(logger, "Connected to {} as {:?}", address, client.connected_role());

    client.put("user:1", "alice", true).await?;
    client.put("user:2", "bob", true).await?;
    let value = client.get("user:1").await?;
    slog::info!(logger, "user:1 = {}", String::from_utf8_lossy(&value));

    let mut users = client.scan_prefix("user:").await?;
    while let Some(entry) = users.next().await? {
        slog::info!(
            logger,
            "{} = {}",
            String::from_utf8_lossy(&entry.key),
            String::from_utf8_lossy(&entry.value)
        );
    }

    let stats = client.stats().await?;
    slog::info!(
        logger,
        "Server holds {} keys after {} reads and {} writes",
        stats.key_count,
        stats.total_reads,
        stats.total_writes
    );

    client.disconnect().await;
    Ok(())
}

fn parse_address(address: &str) -> Result<(String, u16), Box<dyn Error>> {
    let (host, port) = match address.rfind(':') {
        Some(i) => (&address[..i], &address[i + 1..]),
        None => return Err(format!("Expected host:port, got '{}'", address).into()),
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    Ok((host.to_string(), port.parse()?))
}

fn logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
