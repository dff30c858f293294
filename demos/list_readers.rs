//! List the readers known to the local pcscd.
//!
//! Run with: `RUST_LOG=pcscd_client=debug cargo run --example list_readers`
//!
//! Set `PCSCLITE_CSOCK_NAME` to talk to a daemon on a non-default socket.

use pcscd_client::{PcscClient, Scope};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut client = PcscClient::new();
    client.establish_context(Scope::User).await?;

    let readers: Vec<_> = client
        .list_readers()
        .await?
        .iter()
        .filter(|r| !r.is_empty_slot())
        .cloned()
        .collect();
    println!("{}", serde_json::to_string_pretty(&readers)?);

    client.release_context().await?;
    client.close().await?;
    Ok(())
}
