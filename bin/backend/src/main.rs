//! Backend Binary
//!
//! Serves registration, sessions, and the feedback API.
//! Runs on BIND_ADDR (default 0.0.0.0:8888) against DB_URL.
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vox_core::log();
    vox_core::kys();
    vox_server::run(vox_server::Config::parse()).await
}
