// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Blinks a simulated LED from an actor driven by a periodic time event.
//!
//! ```text
//! blinky [config.json]
//! ```

mod blinky;
mod config;
mod led;

use std::{env, path::PathBuf};

use aorta_runtime::{ActorCell, ActorSystem, StartOptions};
use tracing::{Level, info};

use crate::{
	blinky::{BlinkSignal, Blinky},
	config::BlinkyConfig,
	led::ConsoleLed,
};

#[derive(Debug, thiserror::Error)]
pub enum BlinkyError {
	#[error("failed to read config `{path}`")]
	ReadConfig {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed config")]
	ParseConfig(#[from] serde_json::Error),

	#[error(transparent)]
	Tracing(#[from] aorta_sub_tracing::TracingError),

	#[error(transparent)]
	Runtime(#[from] aorta_runtime::Error),

	#[error(transparent)]
	Join(#[from] aorta_runtime::actor::JoinError),
}

fn main() -> Result<(), BlinkyError> {
	aorta_sub_tracing::init_with(|tracing| tracing.level(Level::INFO).target(true))?;

	let config = match env::args_os().nth(1).map(PathBuf::from) {
		Some(path) => BlinkyConfig::load(&path)?,
		None => BlinkyConfig::default(),
	};
	info!(?config, "starting blinky");

	let system = ActorSystem::new(config.runtime.clone());
	let blinky = ActorCell::new(Blinky::new(ConsoleLed::new(config.pin), config.toggles))
		.start(&system, StartOptions::new(1u8, 10, 64 * 1024).name("blinky"))?;

	let blink = system.time_event(BlinkSignal::Blink, blinky.actor_ref())?;
	blink.arm(config.blink_ticks, config.blink_ticks);
	system.start_ticking()?;

	blinky.join()?;
	system.shutdown();
	info!("blinky stopped");
	Ok(())
}
