use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::map::WorldWrap;
use crate::risk::smoothing::DEFAULT_STEPS;
use crate::risk::{LatLon, RouteCaps};

/// Command-line flags. Each one overrides the matching config file value.
#[derive(Debug, Parser)]
#[command(name = "risk-map", version, about = "Maritime shipping-risk map in the terminal")]
pub struct Cli {
    /// JSON config file; any field may be omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory holding Natural Earth coastline GeoJSON
    #[arg(long, value_name = "DIR")]
    pub data: Option<PathBuf>,
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Zoom level on start
    #[arg(long, value_name = "N")]
    pub zoom: Option<u8>,
}

/// Runtime settings. Every field has a default so partial config files work.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// [lat, lon] shown on start and after reset
    pub default_center: [f64; 2],
    /// Zoom on start
    pub initial_zoom: u8,
    /// Zoom after a reset
    pub default_zoom: u8,
    /// Zoom applied when a key risk is focused
    pub focus_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Max routes drawn per focused risk id; absent ids show all routes
    pub route_caps: BTreeMap<String, usize>,
    pub smoothing_steps: usize,
    pub world_copies: bool,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_center: [20.0, 120.0],
            initial_zoom: 2,
            default_zoom: 3,
            focus_zoom: 4,
            min_zoom: 2,
            max_zoom: 10,
            route_caps: RouteCaps::default().iter().map(|(k, v)| (k.to_string(), v)).collect(),
            smoothing_steps: DEFAULT_STEPS,
            world_copies: true,
            data_dir: PathBuf::from("data"),
            log_file: PathBuf::from("risk-map.log"),
        }
    }
}

impl TryFrom<Cli> for AppConfig {
    type Error = anyhow::Error;

    /// Load the `--config` file (or defaults), then apply the other flags
    fn try_from(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(dir) = cli.data {
            config.data_dir = dir;
        }
        if let Some(path) = cli.log_file {
            config.log_file = path;
        }
        if let Some(zoom) = cli.zoom {
            config.initial_zoom = zoom;
        }

        config.validate()?;
        Ok(config)
    }
}

impl AppConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let mut bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&mut bytes).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(bytes: &mut [u8]) -> Result<Self> {
        let config: Self = simd_json::serde::from_slice(bytes)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            bail!("min_zoom {} exceeds max_zoom {}", self.min_zoom, self.max_zoom);
        }
        if self.smoothing_steps == 0 {
            bail!("smoothing_steps must be at least 1");
        }
        Ok(())
    }

    pub fn default_center(&self) -> LatLon {
        LatLon::new(self.default_center[0], self.default_center[1])
    }

    pub fn route_caps(&self) -> RouteCaps {
        self.route_caps.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }

    pub fn world_wrap(&self) -> WorldWrap {
        WorldWrap {
            world_copies: self.world_copies,
            home_lon: self.default_center[1],
            ..WorldWrap::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(list: &[&str]) -> Result<AppConfig> {
        let args = std::iter::once("risk-map").chain(list.iter().copied());
        AppConfig::try_from(Cli::try_parse_from(args)?)
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("defaults");
        assert_eq!(config.default_center(), LatLon::new(20.0, 120.0));
        assert_eq!(config.initial_zoom, 2);
        assert_eq!(config.default_zoom, 3);
        assert_eq!(config.focus_zoom, 4);
        assert_eq!((config.min_zoom, config.max_zoom), (2, 10));
        assert_eq!(config.route_caps(), RouteCaps::default());
        assert_eq!(config.smoothing_steps, 4);
    }

    #[test]
    fn test_flags_override() {
        let config = config_from(&["--data", "maps", "--zoom", "5", "--log-file", "/tmp/x.log"]).expect("flags");
        assert_eq!(config.data_dir, PathBuf::from("maps"));
        assert_eq!(config.initial_zoom, 5);
        // Reset zoom is untouched by --zoom
        assert_eq!(config.default_zoom, 3);
        assert_eq!(config.log_file, PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_bad_flags() {
        assert!(Cli::try_parse_from(["risk-map", "--zoom"]).is_err());
        assert!(Cli::try_parse_from(["risk-map", "--zoom", "far"]).is_err());
        assert!(Cli::try_parse_from(["risk-map", "--bogus"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_config_error() {
        let err = Cli::try_parse_from(["risk-map", "--help"]).expect_err("help short-circuits");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_partial_json() {
        let mut bytes = br#"{"focus_zoom": 6, "route_caps": {"taiwan": 2}}"#.to_vec();
        let config = AppConfig::parse(&mut bytes).expect("parse");
        assert_eq!(config.focus_zoom, 6);
        assert_eq!(config.default_zoom, 3);

        // Replacing the map drops the other caps, so their full lists show
        let caps = config.route_caps();
        assert_eq!(caps.limit("taiwan", 4), 2);
        assert_eq!(caps.limit("suez", 2), 2);
        assert_eq!(caps.limit("hormuz", 3), 3);
    }

    #[test]
    fn test_invalid_zoom_bounds() {
        let mut bytes = br#"{"min_zoom": 8, "max_zoom": 3}"#.to_vec();
        let config = AppConfig::parse(&mut bytes).expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(config_from(&["--config", "/nonexistent/risk-map.json"]).is_err());
    }
}
