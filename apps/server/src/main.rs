use anyhow::Context;
use hugo_domain::config::ApiConfig;
use hugo_domain::constants::DEFAULT_CONFIG;
use hugo_kernel::config::load_config;
use hugo_server::{Server, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some(DEFAULT_CONFIG)).context("Critical: Configuration is malformed")?;

    let _log = init_logger(env!("CARGO_PKG_NAME"), &cfg.log)?;

    Server::builder().config(cfg).build()?.run().await
}
