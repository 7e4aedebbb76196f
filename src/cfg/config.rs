// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Top-level configuration file. Only the `ike_sa_manager` section is
/// consumed by this crate; embedders are free to nest their own sections
/// next to it in the same YAML document.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Settings for the IKE SA registry.
    pub ike_sa_manager: ManagerConfig,
}

/// Construction parameters for [`crate::ike::manager::Manager`], read once
/// at construction per the `ikesa_table_size` / `ikesa_table_segments` /
/// `reuse_ikesa` configuration keys.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ManagerConfig {
    /// Target number of rows in the hash table (`ikesa_table_size`).
    /// Rounded up to the next power of two and clamped to `[1, 2^30]`.
    #[serde(default = "default_table_size")]
    pub table_size: usize,

    /// Target number of segments the table is sharded into
    /// (`ikesa_table_segments`). Rounded up to the next power of two and
    /// clamped to `[1, table_size]`.
    #[serde(default = "default_table_segments")]
    pub table_segments: usize,

    /// If false, `checkout_by_config` never reuses an existing SA and
    /// always creates a new one (`reuse_ikesa`, default true).
    #[serde(default = "default_reuse_ikesa")]
    pub reuse_ikesa: bool,
}

fn default_table_size() -> usize {
    1024
}

fn default_table_segments() -> usize {
    16
}

fn default_reuse_ikesa() -> bool {
    true
}

impl Default for ManagerConfig {
    fn default() -> Self {
        ManagerConfig {
            table_size: default_table_size(),
            table_segments: default_table_segments(),
            reuse_ikesa: default_reuse_ikesa(),
        }
    }
}

impl Config {
    /// Loads the configuration from YAML and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file: {:?}", path.as_ref()))?;
        let cfg: Config =
            serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.ike_sa_manager.validate()?;
        Ok(cfg)
    }
}

impl ManagerConfig {
    /// Checks invariants that `serde` cannot express directly. The actual
    /// power-of-two rounding and clamping happens in
    /// [`crate::ike::table::Table::new`]; this only rejects values that
    /// can never be sanitized into something meaningful (e.g. a segment
    /// count configured far larger than any sane table).
    pub fn validate(&self) -> Result<()> {
        ensure!(self.table_segments > 0 || self.table_size == 0, "table_segments must be positive when table_size is configured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ManagerConfig::default();
        assert_eq!(cfg.table_size, 1024);
        assert_eq!(cfg.table_segments, 16);
        assert!(cfg.reuse_ikesa);
    }

    #[test]
    fn parses_minimal_yaml() {
        let yaml = "ike_sa_manager:\n  table_size: 4\n  table_segments: 2\n  reuse_ikesa: false\n";
        let cfg: Config = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.ike_sa_manager.table_size, 4);
        assert_eq!(cfg.ike_sa_manager.table_segments, 2);
        assert!(!cfg.ike_sa_manager.reuse_ikesa);
    }

    #[test]
    fn defaults_apply_when_keys_are_absent() {
        let yaml = "ike_sa_manager: {}\n";
        let cfg: Config = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(cfg.ike_sa_manager.table_size, 1024);
        assert!(cfg.ike_sa_manager.reuse_ikesa);
    }
}
