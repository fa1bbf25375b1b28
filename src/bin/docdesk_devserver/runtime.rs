use std::net::SocketAddr;

use clap::Parser;

use super::routes::app_router;
use super::*;

#[derive(Parser)]
#[command(name = "docdesk-devserver")]
#[command(about = "Local stand-in for the DocDesk document backend (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Directory holding the store snapshot
    #[arg(long, default_value = "./docdesk-data")]
    data_dir: PathBuf,

    /// Bucket name clients must send with folder requests
    #[arg(long, default_value = "docdesk-dev")]
    bucket: String,

    /// Require this bearer token on every route except /healthz
    #[arg(long)]
    token: Option<String>,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    docdesk::logging::init_stderr();

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;
    let store = load_store(&args.data_dir).context("load store")?;

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;

    let state = Arc::new(AppState {
        bucket: args.bucket,
        token: args.token,
        data_dir: args.data_dir,
        public_url: format!("http://{}", local_addr),
        store: RwLock::new(store),
    });
    let app = app_router(state);

    eprintln!("docdesk-devserver listening on {}", local_addr);
    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
