use tamubook::{Config, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Config::create_default_if_missing()?;
    run().await
}
