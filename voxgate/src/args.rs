use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Voxgate speech and video generation gateway
#[derive(Debug, Parser)]
#[command(name = "voxgate", about = "Uniform gateway for text-to-speech and talking-head video providers")]
pub struct Args {
    /// Path to configuration file; provider keys are read from the environment when omitted
    #[arg(short, long, env = "VOXGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VOXGATE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive (e.g. "info" or "speech=debug")
    #[arg(long, default_value = "info", env = "VOXGATE_LOG")]
    pub log: String,
}
