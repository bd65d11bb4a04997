// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use std::{fs, path::Path};

use aorta_runtime::RuntimeConfig;
use serde::Deserialize;

use crate::BlinkyError;

/// Blink period in ticks; 100 ticks of 10ms is one toggle per second.
pub const DEFAULT_BLINK_TICKS: u32 = 100;
pub const DEFAULT_TOGGLES: u32 = 10;
pub const DEFAULT_PIN: u8 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlinkyConfig {
	pub runtime: RuntimeConfig,
	pub pin: u8,
	pub blink_ticks: u32,
	/// Number of toggles before the actor stops. 0 blinks forever.
	pub toggles: u32,
}

impl Default for BlinkyConfig {
	fn default() -> Self {
		Self {
			runtime: RuntimeConfig::default(),
			pin: DEFAULT_PIN,
			blink_ticks: DEFAULT_BLINK_TICKS,
			toggles: DEFAULT_TOGGLES,
		}
	}
}

impl BlinkyConfig {
	pub fn load(path: &Path) -> Result<Self, BlinkyError> {
		let raw = fs::read_to_string(path).map_err(|source| BlinkyError::ReadConfig {
			path: path.display().to_string(),
			source,
		})?;
		Self::parse(&raw)
	}

	pub fn parse(raw: &str) -> Result<Self, BlinkyError> {
		Ok(serde_json::from_str(raw)?)
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn test_defaults() {
		let config = BlinkyConfig::parse("{}").unwrap();
		assert_eq!(config.pin, DEFAULT_PIN);
		assert_eq!(config.blink_ticks, DEFAULT_BLINK_TICKS);
		assert_eq!(config.toggles, DEFAULT_TOGGLES);
	}

	#[test]
	fn test_nested_runtime() {
		let config =
			BlinkyConfig::parse(r#"{"blink_ticks": 5, "toggles": 0, "runtime": {"tick_period_ms": 1}}"#).unwrap();
		assert_eq!(config.blink_ticks, 5);
		assert_eq!(config.toggles, 0);
		assert_eq!(config.runtime.tick_period, Duration::from_millis(1));
	}

	#[test]
	fn test_malformed() {
		assert!(matches!(BlinkyConfig::parse("{\"pin\": 300}"), Err(BlinkyError::ParseConfig(_))));
	}
}
