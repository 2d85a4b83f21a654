use std::sync::Arc;
use tokio::sync::Notify;

mod api;
mod config;
mod docs;
mod http;
mod ingress;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside local development
    dotenvy::dotenv().ok();

    let cfg = config::Config::load()?;
    logger::init(&cfg.logging)?;

    // Single-threaded event loop; connections run as local tasks
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let state = match config::AppState::bootstrap(cfg) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&format!("Refusing to start: {e}"));
            return Err(e.into());
        }
    };

    let listener = server::create_listener(addr)?;
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::start_server_loop(listener, state, shutdown).await;

    Ok(())
}
