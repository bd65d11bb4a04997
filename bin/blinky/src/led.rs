// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use tracing::info;

/// A single digital output driving an LED.
pub trait Led: Send + 'static {
	/// Put the pin into output mode.
	fn configure(&mut self);

	fn set(&mut self, on: bool);
}

/// LED simulated on the log: every level change becomes an `info` event.
#[derive(Debug)]
pub struct ConsoleLed {
	pin: u8,
}

impl ConsoleLed {
	pub fn new(pin: u8) -> Self {
		Self {
			pin,
		}
	}
}

impl Led for ConsoleLed {
	fn configure(&mut self) {
		info!(pin = self.pin, "gpio configured as output");
	}

	fn set(&mut self, on: bool) {
		info!(pin = self.pin, level = if on { "on" } else { "off" }, "gpio level");
	}
}
