//! Command-line flags and how they feed the Rocket figment

use clap::{ArgAction, Parser};
use rocket::figment::Figment;
use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::MissPolicy;

/// catproxy - caches status-code images from an upstream service on local disk.
#[derive(Parser, Debug)]
#[command(name = "catproxy", version, about, disable_help_flag = true)]
pub struct Cli {
    /// Address to listen on (hostname or IP).
    #[arg(short = 'h', long, value_name = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, value_name = "PORT")]
    pub port: u16,

    /// Cache directory, created if missing.
    #[arg(short, long = "cache", value_name = "DIR")]
    pub cache_dir: PathBuf,

    /// Base URL of the upstream image service.
    #[arg(long = "upstream", env = "UPSTREAM_URL", value_name = "URL")]
    pub upstream_url: Option<String>,

    /// What a GET does on a cache miss.
    #[arg(long = "miss", env = "MISS_POLICY", value_enum, value_name = "POLICY")]
    pub miss_policy: Option<MissPolicy>,

    /// Upstream request timeout in seconds (no timeout by default).
    #[arg(long, env = "UPSTREAM_TIMEOUT", value_name = "SECS")]
    pub upstream_timeout: Option<u64>,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Layer the flags on top of `figment`; flags win over config files.
    pub fn merge_into(&self, figment: Figment, address: IpAddr) -> Figment {
        let mut figment = figment
            .merge(("address", address))
            .merge(("port", self.port))
            .merge(("cache_dir", &self.cache_dir));

        if let Some(url) = &self.upstream_url {
            figment = figment.merge(("upstream_url", url));
        }

        if let Some(policy) = self.miss_policy {
            figment = figment.merge(("miss_policy", policy));
        }

        if let Some(timeout) = self.upstream_timeout {
            figment = figment.merge(("upstream_timeout", timeout));
        }

        figment
    }
}

/// Resolve `host` to the first IP address it maps to.
pub async fn resolve_host(host: &str, port: u16) -> io::Result<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    tokio::net::lookup_host((host, port))
        .await?
        .map(|addr| addr.ip())
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no address for host '{}'", host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn short_flags_match_original_usage() {
        let cli = Cli::try_parse_from(["catproxy", "-h", "127.0.0.1", "-p", "3000", "-c", "./cache"]).unwrap();

        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.cache_dir, PathBuf::from("./cache"));
    }

    #[test]
    fn all_of_host_port_and_cache_are_required() {
        assert!(Cli::try_parse_from(["catproxy", "-p", "3000", "-c", "./cache"]).is_err());
        assert!(Cli::try_parse_from(["catproxy", "-h", "localhost", "-c", "./cache"]).is_err());
        assert!(Cli::try_parse_from(["catproxy", "--host", "localhost", "--port", "3000"]).is_err());
    }

    #[test]
    fn flags_override_figment_values() {
        let cli = Cli::try_parse_from([
            "catproxy",
            "--host",
            "localhost",
            "--port",
            "8080",
            "--cache",
            "/tmp/cats",
            "--miss",
            "not-found",
            "--upstream",
            "http://127.0.0.1:9999",
        ])
        .unwrap();

        let base = Figment::new()
            .merge(("port", 1))
            .merge(("upstream_url", "https://example.invalid"));
        let config = cli
            .merge_into(base, "127.0.0.1".parse().unwrap())
            .extract::<AppConfig>()
            .unwrap();

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cats"));
        assert_eq!(config.miss_policy, MissPolicy::NotFound);
        assert_eq!(config.upstream_url, "http://127.0.0.1:9999");
    }

    #[tokio::test]
    async fn ip_literals_resolve_without_lookup() {
        let ip = resolve_host("0.0.0.0", 80).await.unwrap();
        assert_eq!(ip, "0.0.0.0".parse::<IpAddr>().unwrap());
    }
}
