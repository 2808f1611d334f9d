//! Command-line and environment configuration for the `otc` binary.
//!
//! | Flag | Env | Default |
//! |---|---|---|
//! | `-p, --port` | `OTC_PORT` | `8282` |
//! | `-c, --cpus` | `OTC_CPUS` | available parallelism |
//! | `--log-dir` | `OTC_LOG_DIR` | `logs` |
//! | `--log-stdout` | | off |
//! | `--storage-dir` | `OTC_STORAGE_DIR` | `$TMPDIR/otc` |

use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogTarget;

#[derive(Debug, Parser)]
#[command(name = "otc", version, about = "REST resource dispatcher over a concurrent object store")]
pub struct Cli {
    /// Port where the REST API will be listening.
    #[arg(short, long, env = "OTC_PORT", default_value_t = 8282)]
    pub port: u16,

    /// Max number of CPUs (worker threads) to use.
    #[arg(short, long, env = "OTC_CPUS")]
    pub cpus: Option<NonZeroUsize>,

    /// Directory for per-start log files.
    #[arg(long, env = "OTC_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log to stdout instead of a file.
    #[arg(long)]
    pub log_stdout: bool,

    /// Directory for media content.
    #[arg(long, env = "OTC_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,
}

/// Resolved runtime configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub workers: usize,
    pub log: LogTarget,
    pub storage_root: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let workers = cli
            .cpus
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get);

        let log = if cli.log_stdout {
            LogTarget::Stdout
        } else {
            LogTarget::Dir(cli.log_dir)
        };

        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, cli.port)),
            workers,
            log,
            storage_root: cli
                .storage_dir
                .unwrap_or_else(|| std::env::temp_dir().join("otc")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let cli = Cli::try_parse_from(std::iter::once("otc").chain(args.iter().copied())).unwrap();
        Config::from_cli(cli)
    }

    #[test]
    fn explicit_flags() {
        let config = parse(&["-p", "9000", "-c", "3", "--log-stdout", "--storage-dir", "/srv/otc"]);
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.workers, 3);
        assert_eq!(config.log, LogTarget::Stdout);
        assert_eq!(config.storage_root, PathBuf::from("/srv/otc"));
    }

    #[test]
    fn log_dir_is_used_unless_stdout() {
        let config = parse(&["--log-dir", "/var/log/otc"]);
        assert_eq!(config.log, LogTarget::Dir(PathBuf::from("/var/log/otc")));
        assert!(config.workers >= 1);
    }

    #[test]
    fn zero_cpus_is_rejected() {
        assert!(Cli::try_parse_from(["otc", "-c", "0"]).is_err());
    }

    #[test]
    fn port_must_fit_u16() {
        assert!(Cli::try_parse_from(["otc", "-p", "70000"]).is_err());
    }
}
