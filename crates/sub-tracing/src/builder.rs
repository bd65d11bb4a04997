// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use tracing::Level;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

use crate::TracingError;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
	/// One line per event.
	#[default]
	Compact,
	/// Multi-line, human oriented.
	Pretty,
	/// One JSON object per event.
	Json,
}

/// Builder for the process-wide `tracing` subscriber.
///
/// Filter precedence: an explicit [`filter`](Self::filter) directive, then `RUST_LOG` when
/// [`from_env`](Self::from_env) is on, then [`level`](Self::level).
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	filter: Option<String>,
	from_env: bool,
	format: Format,
	thread_names: bool,
	target: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			level: Level::INFO,
			filter: None,
			from_env: true,
			format: Format::Compact,
			thread_names: true,
			target: false,
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// `EnvFilter` directive, e.g. `aorta_runtime=trace,info`.
	pub fn filter(mut self, directive: impl Into<String>) -> Self {
		self.filter = Some(directive.into());
		self
	}

	pub fn from_env(mut self, enabled: bool) -> Self {
		self.from_env = enabled;
		self
	}

	pub fn format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	/// Include the emitting thread's name; actor threads are named after their actor.
	pub fn thread_names(mut self, enabled: bool) -> Self {
		self.thread_names = enabled;
		self
	}

	pub fn target(mut self, enabled: bool) -> Self {
		self.target = enabled;
		self
	}

	pub fn build_filter(&self) -> Result<EnvFilter, TracingError> {
		if let Some(directive) = &self.filter {
			return EnvFilter::try_new(directive).map_err(|source| TracingError::Filter {
				directive: directive.clone(),
				source,
			});
		}
		if self.from_env {
			if let Ok(filter) = EnvFilter::try_from_default_env() {
				return Ok(filter);
			}
		}
		Ok(EnvFilter::new(self.level.as_str().to_ascii_lowercase()))
	}

	/// Install the subscriber globally. Fails if one is already installed.
	pub fn init(self) -> Result<(), TracingError> {
		let filter = self.build_filter()?;
		let builder = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_thread_names(self.thread_names)
			.with_target(self.target);

		match self.format {
			Format::Compact => builder.compact().finish().try_init(),
			Format::Pretty => builder.pretty().finish().try_init(),
			Format::Json => builder.json().finish().try_init(),
		}
		.map_err(TracingError::Init)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_explicit_filter_wins() {
		let filter = TracingBuilder::new().level(Level::ERROR).filter("aorta_runtime=trace").build_filter().unwrap();
		assert_eq!(filter.to_string().to_ascii_lowercase(), "aorta_runtime=trace");
	}

	#[test]
	fn test_level_without_env() {
		let filter = TracingBuilder::new().from_env(false).level(Level::DEBUG).build_filter().unwrap();
		assert_eq!(filter.to_string().to_ascii_lowercase(), "debug");
	}

	#[test]
	fn test_invalid_filter() {
		let err = TracingBuilder::new().filter("aorta_runtime=loud").build_filter().unwrap_err();
		assert!(matches!(err, TracingError::Filter { .. }));
	}

	#[test]
	fn test_second_init_fails() {
		let _ = TracingBuilder::new().from_env(false).init();
		let err = TracingBuilder::new().from_env(false).format(Format::Json).init().unwrap_err();
		assert!(matches!(err, TracingError::Init(_)));
	}
}
