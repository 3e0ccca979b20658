// CLI module for news2tr
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// news2tr - News snippet translator with provider fallback
#[derive(Parser, Debug)]
#[command(name = "news2tr", version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ~/.news2tr/config.toml when present)
    #[arg(long, env = "NEWS2TR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
