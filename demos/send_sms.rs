use std::io;

use tracing_subscriber::EnvFilter;
use vertexsms::{Sender, TestMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("VERTEXSMS_API_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VERTEXSMS_API_TOKEN environment variable is required",
        )
    })?;
    let to = std::env::var("VERTEXSMS_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VERTEXSMS_TO environment variable is required",
        )
    })?;
    let from = std::env::var("VERTEXSMS_FROM").unwrap_or_else(|_| "TestSender".to_owned());
    let message = std::env::var("VERTEXSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the vertexsms demo.".to_owned());

    let mut builder = Sender::builder(token);
    if let Ok(endpoint) = std::env::var("VERTEXSMS_ENDPOINT") {
        builder = builder.endpoint(endpoint);
    }
    let mut sender = builder.build()?;
    sender.set_to(to).set_from(from).set_message(message);
    if std::env::var("VERTEXSMS_LIVE").is_err() {
        sender.set_test_mode(TestMode::Success);
    }

    let response = sender.send().await?;
    println!("{}", response.text());

    Ok(())
}
