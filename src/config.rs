use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

use crate::io::census::LoadOptions;
use crate::model::selection::StalePolicy;

pub const DEFAULT_DATA_PATH: &str = "data/sgg_2019_2023_long.csv";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub delimiter: u8,
    pub stale_policy: StalePolicy,
    pub queue_depth: usize,
    pub chart_size: (u32, u32),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            delimiter: b',',
            stale_policy: StalePolicy::Retain,
            queue_depth: 64,
            chart_size: (960, 540),
        }
    }
}

impl DashboardConfig {
    /// Read `HOST`, `PORT` and the `POPDASH_*` variables. Unset variables take
    /// their default; set but invalid ones are an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Some(host) = var("HOST") {
            cfg.host = host;
        }
        if let Some(port) = var("PORT") {
            cfg.port = port.trim().parse().with_context(|| format!("invalid PORT {port:?}"))?;
        }
        if let Some(path) = var("POPDASH_DATA") {
            cfg.data_path = PathBuf::from(path);
        }
        if let Some(delim) = var("POPDASH_DELIMITER") {
            cfg.delimiter = parse_delimiter(&delim)?;
        }
        if let Some(policy) = var("POPDASH_STALE_POLICY") {
            cfg.stale_policy = policy
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("invalid POPDASH_STALE_POLICY")?;
        }
        if let Some(depth) = var("POPDASH_QUEUE_DEPTH") {
            cfg.queue_depth = depth
                .trim()
                .parse()
                .with_context(|| format!("invalid POPDASH_QUEUE_DEPTH {depth:?}"))?;
            anyhow::ensure!(cfg.queue_depth > 0, "POPDASH_QUEUE_DEPTH must be > 0");
        }
        if let Some(size) = var("POPDASH_CHART_SIZE") {
            cfg.chart_size = parse_size(&size)?;
        }

        Ok(cfg)
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid HOST/PORT {}:{}", self.host, self.port))
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(raw: &str) -> anyhow::Result<u8> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 => Ok(s.as_bytes()[0]),
        s => Err(anyhow!("POPDASH_DELIMITER must be a single byte, got {s:?}")),
    }
}

fn parse_size(raw: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = raw
        .trim()
        .split_once(['x', 'X'])
        .with_context(|| format!("POPDASH_CHART_SIZE must look like 960x540, got {raw:?}"))?;
    let w: u32 = w.trim().parse().with_context(|| format!("invalid chart width in {raw:?}"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("invalid chart height in {raw:?}"))?;
    anyhow::ensure!(w >= 100 && h >= 100, "chart size {w}x{h} is too small");
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DashboardConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(cfg.port, 8050);
        assert_eq!(cfg.stale_policy, StalePolicy::Retain);
        assert_eq!(cfg.chart_size, (960, 540));
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8050");
    }

    #[test]
    fn overrides() {
        let cfg = DashboardConfig::from_vars(vars(&[
            ("PORT", "9000"),
            ("POPDASH_DELIMITER", "\\t"),
            ("POPDASH_STALE_POLICY", "reset-all"),
            ("POPDASH_CHART_SIZE", "800x400"),
            ("POPDASH_QUEUE_DEPTH", "8"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.delimiter, b'\t');
        assert_eq!(cfg.stale_policy, StalePolicy::ResetToAll);
        assert_eq!(cfg.chart_size, (800, 400));
        assert_eq!(cfg.queue_depth, 8);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(DashboardConfig::from_vars(vars(&[("PORT", "http")])).is_err());
        assert!(DashboardConfig::from_vars(vars(&[("POPDASH_STALE_POLICY", "forget")])).is_err());
        assert!(DashboardConfig::from_vars(vars(&[("POPDASH_DELIMITER", ";;")])).is_err());
        assert!(DashboardConfig::from_vars(vars(&[("POPDASH_CHART_SIZE", "wide")])).is_err());
        assert!(DashboardConfig::from_vars(vars(&[("POPDASH_QUEUE_DEPTH", "0")])).is_err());
    }
}
