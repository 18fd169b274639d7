//! Process configuration.
//!
//! One binary runs either role. Every flag can also come from a `BLOBSTORE_*`
//! environment variable, so containers can be configured without arguments.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::node::heartbeat::DEFAULT_HEARTBEAT_INTERVAL;

#[derive(Debug, Parser)]
#[command(name = "blobstore", version, about = "Distributed blob store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the control plane (node registry, file directory, client API).
    Controller(ControllerConfig),
    /// Run a storage node that heartbeats to a controller.
    Node(NodeConfig),
}

#[derive(Debug, Clone, Args)]
pub struct ControllerConfig {
    /// Address the HTTP API listens on.
    #[arg(long, env = "BLOBSTORE_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Metadata store connection string: `memory://` or `sled://<path>`.
    #[arg(long, env = "BLOBSTORE_STORE", default_value = "memory://")]
    pub store: String,
}

#[derive(Debug, Clone, Args)]
pub struct NodeConfig {
    /// Address the node's HTTP API listens on.
    #[arg(long, env = "BLOBSTORE_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Externally reachable address announced to the controller.
    #[arg(long, env = "BLOBSTORE_ADDRESS")]
    pub address: String,

    /// Base URL of the controller.
    #[arg(long, env = "BLOBSTORE_CONTROLLER_URL")]
    pub controller_url: String,

    /// Local blob directory, created on first run.
    #[arg(long, env = "BLOBSTORE_STORAGE_DIR", default_value = "./storage")]
    pub storage_dir: PathBuf,

    /// Seconds between heartbeats.
    #[arg(
        long,
        env = "BLOBSTORE_HEARTBEAT_SECS",
        default_value_t = DEFAULT_HEARTBEAT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub heartbeat_secs: u64,
}

impl NodeConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}
