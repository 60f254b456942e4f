//! Subcommands and their rendered results.

use anyhow::{bail, Result};
use clap::Subcommand;
use corelib::HashRing;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

const DEFAULT_SAMPLES: usize = 10_000;

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the member owning each key.
    Locate {
        /// Keys to look up.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show ring ownership and how sampled keys spread across members.
    Stats {
        /// Number of synthetic keys to route.
        #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
    },
    /// Measure how many keys move when one member leaves.
    Churn {
        /// Member to remove.
        #[arg(long)]
        remove: String,
        /// Number of synthetic keys to route.
        #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
    },
}

/// Per-member line of a stats report.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberStats {
    pub id: String,
    pub positions: usize,
    /// Fraction of the hash circle owned.
    pub ownership: f64,
    /// Fraction of sampled keys routed here.
    pub share: f64,
}

/// Output of a command, rendered as plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Located(Vec<(String, String)>),
    Stats {
        partitioner: &'static str,
        replicas: usize,
        vnodes: usize,
        samples: usize,
        members: Vec<MemberStats>,
    },
    Churn {
        removed: String,
        samples: usize,
        /// Keys whose owner changed.
        moved: usize,
        /// Keys that changed owner without having belonged to the removed member.
        misrouted: usize,
    },
}

fn sample_key(i: usize) -> String {
    format!("key-{i}")
}

impl Command {
    pub fn execute(&self, ring: &HashRing<String>) -> Result<CommandResult> {
        match self {
            Command::Locate { keys } => {
                let located = keys
                    .iter()
                    .map(|key| Ok((key.clone(), ring.locate(key)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CommandResult::Located(located))
            }
            Command::Stats { samples } => stats(ring, *samples),
            Command::Churn { remove, samples } => churn(ring, remove, *samples),
        }
    }
}

fn stats(ring: &HashRing<String>, samples: usize) -> Result<CommandResult> {
    let ownership = ring.topology().ownership();

    let mut hits: BTreeMap<String, usize> = BTreeMap::new();
    for i in 0..samples {
        *hits.entry(ring.locate(sample_key(i))?).or_default() += 1;
    }

    let mut ids = ring.identifiers();
    ids.sort();
    let members = ids
        .into_iter()
        .map(|id| MemberStats {
            positions: ring.positions_of(&id).len(),
            ownership: ownership.get(&id).copied().unwrap_or(0.0),
            share: match samples {
                0 => 0.0,
                n => hits.get(&id).copied().unwrap_or(0) as f64 / n as f64,
            },
            id,
        })
        .collect();

    Ok(CommandResult::Stats {
        partitioner: ring.partitioner_name(),
        replicas: ring.replicas(),
        vnodes: ring.vnode_count(),
        samples,
        members,
    })
}

fn churn(ring: &HashRing<String>, remove: &str, samples: usize) -> Result<CommandResult> {
    if !ring.contains(remove) {
        bail!("'{remove}' is not a ring member");
    }
    if ring.len() < 2 {
        bail!("cannot remove the only ring member");
    }

    let before = (0..samples)
        .map(|i| ring.locate(sample_key(i)))
        .collect::<corelib::Result<Vec<_>>>()?;
    ring.delete(remove);

    let mut moved = 0;
    let mut misrouted = 0;
    for (i, owner) in before.iter().enumerate() {
        let now = ring.locate(sample_key(i))?;
        if &now != owner {
            moved += 1;
            if owner != remove {
                misrouted += 1;
            }
        }
    }
    info!(removed = remove, moved, misrouted, samples, "churn measured");

    Ok(CommandResult::Churn {
        removed: remove.to_string(),
        samples,
        moved,
        misrouted,
    })
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Located(rows) => {
                for (i, (key, owner)) in rows.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key}\t{owner}")?;
                }
                Ok(())
            }
            CommandResult::Stats {
                partitioner,
                replicas,
                vnodes,
                samples,
                members,
            } => {
                writeln!(
                    f,
                    "members={} vnodes={vnodes} replicas={replicas} partitioner={partitioner} samples={samples}",
                    members.len()
                )?;
                write!(f, "{:<24} {:>9} {:>10} {:>10}", "member", "positions", "ownership", "share")?;
                for m in members {
                    write!(
                        f,
                        "\n{:<24} {:>9} {:>9.2}% {:>9.2}%",
                        m.id,
                        m.positions,
                        m.ownership * 100.0,
                        m.share * 100.0
                    )?;
                }
                Ok(())
            }
            CommandResult::Churn {
                removed,
                samples,
                moved,
                misrouted,
            } => {
                let pct = match *samples {
                    0 => 0.0,
                    n => *moved as f64 * 100.0 / n as f64,
                };
                write!(
                    f,
                    "removed {removed}: {moved}/{samples} keys moved ({pct:.2}%), {misrouted} moved between surviving members"
                )
            }
        }
    }
}
