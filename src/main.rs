use std::{fs, path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;

use folio::logger::Logger;
use folio::middleware::install_panic_hook;
use folio::{build_app, AppState, Config, PageStore, TemplateSet, WikiError, DEFAULT_CHAIN};

/// Where `--addr` publishes the bound address for test harnesses
const PORT_FILE: &str = "final-port.txt";

#[derive(Parser, Debug)]
#[command(name = "folio", about = "A small file-backed wiki server")]
struct Args {
    /// Bind an ephemeral local port and write the address to final-port.txt
    #[arg(long)]
    addr: bool,

    /// Path of the YAML config file
    #[arg(long, default_value = "config.yaml")]
    configfile: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let args = Args::parse();
    Logger::init().map_err(|e| WikiError::Config(format!("cannot install logger: {}", e)))?;
    install_panic_hook();

    let config = Config::load(&args.configfile)?;
    if !config.data_dir.exists() {
        log::info!("Creating data directory {:?}", config.data_dir);
        fs::create_dir_all(&config.data_dir)?;
    }
    let templates = TemplateSet::load(&config.template_dir)?;

    let state = AppState {
        pages: PageStore::new(config.data_dir.clone()),
        templates: Arc::new(templates),
    };
    let app = build_app(state, &DEFAULT_CHAIN);

    let listener = if args.addr {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        fs::write(PORT_FILE, listener.local_addr()?.to_string())?;
        listener
    } else {
        TcpListener::bind(config.socket_addr()?).await?
    };

    log::info!("Wiki listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
