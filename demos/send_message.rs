use std::io;

use textfully::{ApiKey, SendMessage, TextfullyClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("textfully=debug")),
        )
        .init();

    let api_key = ApiKey::from_env()?;
    let to = std::env::var("TEXTFULLY_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TEXTFULLY_TO environment variable is required (verified phone number)",
        )
    })?;
    let message = std::env::var("TEXTFULLY_MESSAGE")
        .unwrap_or_else(|_| "Hello from the textfully demo.".to_owned());

    let client = TextfullyClient::new(api_key)?;
    let result = client.send(&SendMessage::new(to, message)).await;

    match result.into_result() {
        Ok(sent) => println!(
            "id: {}, status: {}, sent_at: {}",
            sent.id, sent.status, sent.sent_at
        ),
        Err(err) => eprintln!("{}: {}", err.name, err.message),
    }

    Ok(())
}
