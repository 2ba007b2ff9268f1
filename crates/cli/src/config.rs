//! Command-line configuration.

use anyhow::{anyhow, Context};
use clap::Parser;
use corelib::{PartitionerKind, RingConfig};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, CommandResult};

/// Route keys over a consistent hash ring.
#[derive(Debug, Parser)]
#[command(name = "chring", version, about)]
pub struct CliConfig {
    /// Virtual nodes per host.
    #[arg(long, env = "CHRING_REPLICAS", default_value_t = 2, global = true)]
    pub replicas: usize,

    /// Hash function used for keys and virtual nodes.
    #[arg(long = "hash", env = "CHRING_HASH", default_value_t = PartitionerKind::Fnv1a, global = true)]
    pub partitioner: PartitionerKind,

    /// Log filter, e.g. `info` or `cli=debug` (RUST_LOG takes precedence).
    #[arg(long, env = "CHRING_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn ring_config(&self) -> RingConfig {
        RingConfig {
            replicas: self.replicas,
            partitioner: self.partitioner,
        }
    }

    /// Installs a stderr fmt subscriber.
    pub fn init_tracing(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .with_context(|| format!("invalid log filter {:?}", self.log_level))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
    }

    pub fn run(&self) -> anyhow::Result<CommandResult> {
        self.command.execute(&self.ring_config())
    }

    pub fn render(&self, result: &CommandResult) -> anyhow::Result<String> {
        if self.json {
            serde_json::to_string_pretty(result).context("serializing result")
        } else {
            Ok(result.to_string())
        }
    }
}
