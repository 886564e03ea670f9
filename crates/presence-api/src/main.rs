use presence_core::Config;

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let app = presence_api::setup::initialize_app(config.clone()).await?;

    presence_api::setup::server::start_server(&config, app.router).await?;

    // Jobs still queued when the listener closes are dropped.
    app.pool.shutdown();
    app.pool.join().await;

    Ok(())
}
