//! List NTP policies.
//!
//! ```sh
//! cargo run --example ntp_policies -- <key id> <private key pem file> [endpoint]
//! ```

use intersig_client::{prelude::*, Client, ClientError, ReqwestTransport};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let mut args = std::env::args().skip(1);
  let (Some(key_id), Some(key_file)) = (args.next(), args.next()) else {
    eprintln!("usage: ntp_policies <key id> <private key pem file> [endpoint]");
    std::process::exit(2);
  };
  let endpoint = match args.next() {
    Some(endpoint) => endpoint.parse::<ApiEndpoint>()?,
    None => ApiEndpoint::default(),
  };
  let private_key = std::fs::read_to_string(key_file)?;

  let transport = ReqwestTransport::with_timeout(Duration::from_secs(30))?;
  let client = Client::with_transport(endpoint, transport);
  client.set_public_key(key_id);
  client.set_private_key(private_key);
  tracing::info!("Listing NTP policies at {}", client.endpoint());

  let mut query = QueryParams::new();
  query.insert("$select", "Name,Moid").insert("$top", "10");
  match client.call("/ntp/Policies", &query, &RequestBody::new(), None).await {
    Ok(res) => println!("{}", serde_json::to_string_pretty(&res)?),
    Err(ClientError::TransportError(e)) => eprintln!("call failed: {e}"),
    Err(e) => return Err(e.into()),
  }
  Ok(())
}
