// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Subscriber installation for applications built on the actor runtime.
//!
//! ```ignore
//! aorta_sub_tracing::init_with(|tracing| tracing.level(Level::DEBUG).format(Format::Pretty))?;
//! ```

mod builder;

pub use builder::{Format, TracingBuilder};

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
	#[error("invalid log filter `{directive}`")]
	Filter {
		directive: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},

	#[error("failed to install tracing subscriber")]
	Init(#[source] tracing_subscriber::util::TryInitError),
}

/// Install a subscriber with the default configuration.
pub fn init() -> Result<(), TracingError> {
	TracingBuilder::default().init()
}

/// Install a subscriber after letting `configurator` adjust the defaults.
pub fn init_with<F>(configurator: F) -> Result<(), TracingError>
where
	F: FnOnce(TracingBuilder) -> TracingBuilder,
{
	configurator(TracingBuilder::default()).init()
}
