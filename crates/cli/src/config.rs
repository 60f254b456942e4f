//! Command line and file configuration.

use crate::commands::Command;
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use corelib::{HashKind, HashRing, RingConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inspect consistent hash ring placement.
#[derive(Debug, Parser)]
#[command(name = "cohash", version, long_about = None)]
pub struct CliConfig {
    /// JSON ring file: `{"ring": {"replicas": 20, "hash": "blake3"}, "nodes": ["a", "b"]}`.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ring members, comma separated. Replaces the file's node list.
    #[arg(short, long, value_delimiter = ',', global = true)]
    pub nodes: Vec<String>,

    /// Virtual nodes per member.
    #[arg(short, long, global = true)]
    pub replicas: Option<usize>,

    /// Hash function (blake3, sip13, xxh3).
    #[arg(long, global = true)]
    pub hash: Option<HashKind>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// On-disk ring description.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingFile {
    pub ring: RingConfig,
    pub nodes: Vec<String>,
}

impl RingFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let file: Self = serde_json::from_str(raw)?;
        file.ring.validate()?;
        Ok(file)
    }
}

impl CliConfig {
    /// Merges the config file (if any) with command line overrides.
    pub fn resolve(&self) -> Result<(RingConfig, Vec<String>)> {
        let file = match &self.config {
            Some(path) => RingFile::load(path)?,
            None => RingFile::default(),
        };

        let mut ring = file.ring;
        if let Some(replicas) = self.replicas {
            ring.replicas = replicas;
        }
        if let Some(hash) = self.hash {
            ring.hash = hash;
        }
        ring.validate()?;

        let nodes = if self.nodes.is_empty() {
            file.nodes
        } else {
            self.nodes.clone()
        };
        if nodes.is_empty() {
            bail!("no nodes configured: pass --nodes or list them in the config file");
        }
        Ok((ring, nodes))
    }

    /// Builds a ring whose items are the member names themselves.
    pub fn build_ring(&self) -> Result<HashRing<String>> {
        let (config, nodes) = self.resolve()?;
        let ring = HashRing::from_config(&config)?;
        for node in nodes {
            ring.put(node.clone(), node)?;
        }
        debug!(
            members = ring.len(),
            vnodes = ring.vnode_count(),
            partitioner = ring.partitioner_name(),
            "ring built"
        );
        Ok(ring)
    }

    pub fn run(self) -> Result<()> {
        setup_tracing(self.verbose);
        let ring = self.build_ring()?;
        let result = self.command.execute(&ring)?;
        println!("{result}");
        Ok(())
    }
}

/// Initialize the `tracing` subscriber on stderr.
///
/// Respects `RUST_LOG` if set, otherwise derives the level from `-v` flags.
fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("cohash").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_build_ring() {
        let cli = parse(&["--nodes", "a,b,c", "--replicas", "5", "--hash", "xxh3", "locate", "k"]);
        let ring = cli.build_ring().unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.vnode_count(), 15);
        assert_eq!(ring.partitioner_name(), "Xxh3Partitioner");
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = parse(&["locate", "k", "-n", "a"]);
        let (config, nodes) = cli.resolve().unwrap();
        assert_eq!(config, RingConfig::default());
        assert_eq!(nodes, vec!["a".to_string()]);
    }

    #[test]
    fn test_no_nodes_is_an_error() {
        let cli = parse(&["stats"]);
        let err = cli.resolve().unwrap_err();
        assert!(err.to_string().contains("no nodes configured"));
    }

    #[test]
    fn test_zero_replicas_is_an_error() {
        let cli = parse(&["-n", "a", "-r", "0", "stats"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_unknown_hash_flag_rejected() {
        let parsed = CliConfig::try_parse_from(["cohash", "--hash", "md5", "stats"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_ring_file_parse() {
        let file = RingFile::parse(
            r#"{ "ring": { "replicas": 3, "hash": "sip13" }, "nodes": ["x", "y"] }"#,
        )
        .unwrap();
        assert_eq!(file.ring.replicas, 3);
        assert_eq!(file.ring.hash, HashKind::Sip13);
        assert_eq!(file.nodes, vec!["x".to_string(), "y".to_string()]);

        assert!(RingFile::parse(r#"{ "ring": { "replicas": 0 } }"#).is_err());
        assert!(RingFile::parse(r#"{ "members": [] }"#).is_err());
    }
}
