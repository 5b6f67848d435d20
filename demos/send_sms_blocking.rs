use std::io;

use tracing_subscriber::EnvFilter;
use vertexsms::TestMode;
use vertexsms::client::blocking::Sender;

fn main() -> Result<(), Box<dyn std::error::Error>> {
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

    let mut sender = Sender::new(token);
    sender
        .set_to(to)
        .set_from("TestSender")
        .set_message("This is test message")
        .set_test_mode(TestMode::Success);

    let response = sender.send()?;
    println!("status: {}", response.status());
    println!("{}", response.body());

    Ok(())
}
