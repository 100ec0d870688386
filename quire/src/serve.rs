//! Local preview server for the generated site.
use std::{
  net::SocketAddr,
  path::{Path, PathBuf},
};

use axum::Router;
use color_eyre::eyre::{Context, Result};
use log::info;
use tower_http::services::ServeDir;

/// Serve `dir` on `127.0.0.1:<port>` until the process is stopped.
///
/// # Errors
///
/// Returns an error if the runtime cannot start, the port cannot be bound or
/// the server fails.
pub fn serve(dir: &Path, port: u16) -> Result<()> {
  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .wrap_err("Failed to start the async runtime")?;
  runtime.block_on(run(dir.to_path_buf(), port))
}

async fn run(dir: PathBuf, port: u16) -> Result<()> {
  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  let app = Router::new().fallback_service(
    ServeDir::new(&dir).append_index_html_on_directories(true),
  );

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .wrap_err_with(|| format!("Failed to bind {addr}"))?;
  info!("Serving {} at http://{addr}/", dir.display());

  axum::serve(listener, app).await.wrap_err("Server error")
}
