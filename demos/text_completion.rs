//! Text completion against an h2oGPT server
//!
//! ```sh
//! H2OGPT_SERVER_URL=http://localhost:7860 RUST_LOG=h2ogpt=debug \
//!     cargo run --example text_completion -- "Why is the sky blue?"
//! ```

use h2ogpt::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Write a haiku about the sea".to_string());

    let config = ClientConfig::from_env();
    tracing::info!(server = %config.server_url, "connecting");
    let client = Client::connect_with_config(&config).await?;

    let params = TextCompletionParams::builder(prompt)
        .prompt_type(PromptType::Instruct)
        .max_output_length(256)
        .build();
    let text = client.text_completion().create_async(&params).await?;

    println!("{text}");
    Ok(())
}
