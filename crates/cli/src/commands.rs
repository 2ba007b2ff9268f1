//! CLI subcommands.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use clap::Subcommand;
use corelib::{HashRing, RingConfig, RingError, Token};
use replication::{ReplicationStrategy, SimpleStrategy};
use serde::Serialize;
use tracing::{info, warn};

/// Hosts joined by the `demo` command, in order.
const DEMO_HOSTS: [(&str, &str); 2] = [("10.9.97.189", "server1"), ("10.9.24.3", "server2")];
const DEMO_KEYS: [&str; 2] = ["hello", "halo"];

/// A `--host` argument: `ID` or `ID=NAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub id: String,
    pub name: String,
}

impl FromStr for HostSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, name) = s.split_once('=').unwrap_or((s, ""));
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the host owning each key.
    Route {
        /// Host to join, as ID or ID=NAME (repeatable, joined in order).
        #[arg(long = "host", required = true)]
        hosts: Vec<HostSpec>,
        /// Number of distinct hosts to list per key, primary first.
        #[arg(long, default_value_t = 1)]
        replicas_per_key: usize,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the ring layout and each host's share of the token space.
    Inspect {
        #[arg(long = "host", required = true)]
        hosts: Vec<HostSpec>,
    },
    /// Route sample keys, remove a host and report which keys moved.
    Churn {
        #[arg(long = "host", required = true)]
        hosts: Vec<HostSpec>,
        /// Host to remove.
        #[arg(long)]
        remove: String,
        /// Number of sample keys.
        #[arg(long, default_value_t = 1000)]
        sample: usize,
    },
    /// Join two hosts, quit and rejoin the first, then route "hello" and "halo".
    Demo,
}

impl Command {
    pub fn execute(&self, config: &RingConfig) -> anyhow::Result<CommandResult> {
        match self {
            Command::Route {
                hosts,
                replicas_per_key,
                keys,
            } => {
                let ring = build_ring(config, hosts)?;
                let strategy = SimpleStrategy::new(*replicas_per_key)
                    .context("--replicas-per-key must be at least 1")?;
                let routes = keys
                    .iter()
                    .map(|key| route(&ring, &strategy, key))
                    .collect::<anyhow::Result<_>>()?;
                Ok(CommandResult::Routes { routes })
            }
            Command::Inspect { hosts } => {
                let ring = build_ring(config, hosts)?;
                Ok(CommandResult::Ring(RingReport::from_ring(&ring)))
            }
            Command::Churn {
                hosts,
                remove,
                sample,
            } => {
                let ring = build_ring(config, hosts)?;
                churn(&ring, remove, *sample).map(CommandResult::Churn)
            }
            Command::Demo => demo(config),
        }
    }
}

fn build_ring(config: &RingConfig, hosts: &[HostSpec]) -> anyhow::Result<HashRing> {
    let ring = HashRing::with_config(config).context("building ring")?;
    for spec in hosts {
        match ring.join_named(spec.id.as_str(), spec.name.as_str()) {
            Ok(()) => info!(host = %spec.id, display_name = %spec.name, "joined ring"),
            Err(err @ RingError::AlreadyExists(_)) => warn!(%err, "skipping duplicate host"),
            Err(err) => return Err(err).with_context(|| format!("joining {:?}", spec.id)),
        }
    }
    Ok(ring)
}

fn route(ring: &HashRing, strategy: &SimpleStrategy, key: &str) -> anyhow::Result<Route> {
    let placement = strategy
        .place(ring, key.as_bytes())
        .with_context(|| format!("routing {key:?}"))?;
    if placement.is_under_replicated() {
        warn!(key, wanted = placement.wanted, found = placement.len(), "not enough hosts");
    }
    Ok(Route {
        key: key.to_string(),
        token: ring.token_for(key.as_bytes()),
        primary: placement.primary,
        replicas: placement.replicas,
    })
}

fn churn(ring: &HashRing, remove: &str, sample: usize) -> anyhow::Result<ChurnReport> {
    let keys: Vec<String> = (0..sample).map(|i| format!("key-{i}")).collect();
    let before = keys
        .iter()
        .map(|k| ring.get(k))
        .collect::<Result<Vec<_>, _>>()
        .context("routing sample keys")?;

    let removed = ring
        .quit(remove)
        .with_context(|| format!("removing {remove:?}"))?;
    info!(host = %removed.id, "quit ring");

    let mut report = ChurnReport {
        removed: removed.id,
        sample,
        moved: 0,
        previously_on_removed: before.iter().filter(|h| *h == remove).count(),
        unexpected_moves: Vec::new(),
    };
    for (key, old) in keys.iter().zip(&before) {
        let new = match ring.get(key) {
            Ok(host) => host,
            // Removing the last host leaves nothing to move to.
            Err(RingError::EmptyRing) => String::new(),
            Err(err) => return Err(err).context("re-routing sample keys"),
        };
        if &new != old {
            report.moved += 1;
            if old != remove {
                report.unexpected_moves.push(key.clone());
            }
        }
    }
    if !report.unexpected_moves.is_empty() {
        warn!(count = report.unexpected_moves.len(), "keys moved off surviving hosts");
    }
    Ok(report)
}

fn demo(config: &RingConfig) -> anyhow::Result<CommandResult> {
    let ring = HashRing::with_config(config).context("building ring")?;
    for (id, name) in DEMO_HOSTS {
        ring.join_named(id, name)?;
        info!(host = id, display_name = name, "joined ring");
    }

    let (first, name) = DEMO_HOSTS[0];
    ring.quit(first)?;
    info!(host = first, "quit ring");
    ring.join_named(first, name)?;
    info!(host = first, display_name = name, "rejoined ring");

    let strategy = SimpleStrategy::new(1)?;
    let routes = DEMO_KEYS
        .iter()
        .map(|key| route(&ring, &strategy, key))
        .collect::<anyhow::Result<_>>()?;
    Ok(CommandResult::Demo {
        ring: RingReport::from_ring(&ring),
        routes,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub key: String,
    pub token: Token,
    pub primary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replicas: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub id: String,
    pub name: String,
    pub positions: Vec<Token>,
    /// Fraction of the token space owned.
    pub ownership: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RingReport {
    pub partitioner: String,
    pub replicas: usize,
    pub positions: Vec<Token>,
    pub hosts: Vec<HostReport>,
}

impl RingReport {
    pub fn from_ring(ring: &HashRing) -> Self {
        let ownership: BTreeMap<String, f64> = ring.topology().ownership();
        let hosts = ring
            .hosts()
            .into_iter()
            .map(|host| HostReport {
                positions: ring.host_positions(&host.id).unwrap_or_default(),
                ownership: ownership.get(&host.id).copied().unwrap_or_default(),
                id: host.id,
                name: host.name,
            })
            .collect();
        Self {
            partitioner: ring.partitioner_name().to_string(),
            replicas: ring.replica_count(),
            positions: ring.positions(),
            hosts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChurnReport {
    pub removed: String,
    pub sample: usize,
    pub moved: usize,
    pub previously_on_removed: usize,
    /// Keys that moved although their owner stayed; always empty on a sound ring.
    pub unexpected_moves: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResult {
    Routes { routes: Vec<Route> },
    Ring(RingReport),
    Churn(ChurnReport),
    Demo { ring: RingReport, routes: Vec<Route> },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] -> {}", self.key, self.token, self.primary)?;
        if !self.replicas.is_empty() {
            write!(f, " (replicas: {})", self.replicas.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for RingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} vnodes ({} per host, {})",
            self.positions.len(),
            self.replicas,
            self.partitioner
        )?;
        for host in &self.hosts {
            let positions: Vec<String> = host.positions.iter().map(Token::to_string).collect();
            writeln!(
                f,
                "  {:<20} {:<12} {:>6.2}%  {}",
                host.id,
                host.name,
                host.ownership * 100.0,
                positions.join(" ")
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Routes { routes } => {
                for route in routes {
                    writeln!(f, "{route}")?;
                }
                Ok(())
            }
            CommandResult::Ring(report) => write!(f, "{report}"),
            CommandResult::Churn(report) => {
                writeln!(
                    f,
                    "removed {}: {}/{} keys moved ({} were on it)",
                    report.removed, report.moved, report.sample, report.previously_on_removed
                )?;
                if !report.unexpected_moves.is_empty() {
                    writeln!(f, "unexpected moves: {}", report.unexpected_moves.join(", "))?;
                }
                Ok(())
            }
            CommandResult::Demo { ring, routes } => {
                write!(f, "{ring}")?;
                for route in routes {
                    writeln!(f, "{route}")?;
                }
                Ok(())
            }
        }
    }
}
