// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use aorta_runtime::{Actor, Context, Flow, Message};
use tracing::{info, warn};

use crate::led::Led;

/// User signals understood by [`Blinky`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkSignal {
	Blink,
}

/// Toggles an LED on every [`BlinkSignal::Blink`].
///
/// After `limit` toggles it posts QUIT to itself and stops when that QUIT is dispatched.
pub struct Blinky<L> {
	led: L,
	on: bool,
	toggles: u32,
	limit: u32,
}

impl<L: Led> Blinky<L> {
	/// A `limit` of 0 blinks until the process exits.
	pub fn new(led: L, limit: u32) -> Self {
		Self {
			led,
			on: false,
			toggles: 0,
			limit,
		}
	}
}

impl<L: Led> Actor for Blinky<L> {
	type Message = BlinkSignal;

	fn dispatch(&mut self, msg: Message<BlinkSignal>, ctx: &Context<BlinkSignal>) -> Flow {
		match msg {
			Message::Init => {
				info!(actor = %ctx.name(), "configuring led");
				self.led.configure();
				self.led.set(false);
				self.on = false;
			}
			Message::User(BlinkSignal::Blink) => {
				self.on = !self.on;
				self.led.set(self.on);
				self.toggles += 1;

				if self.toggles == self.limit {
					info!(actor = %ctx.name(), toggles = self.toggles, "blink limit reached");
					if let Err(err) = ctx.self_ref().post_quit() {
						warn!(actor = %ctx.name(), error = %err, "failed to post quit");
						return Flow::Stop;
					}
				}
			}
			Message::Quit => return Flow::Stop,
		}
		Flow::Continue
	}

	fn post_stop(&mut self) {
		self.led.set(false);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use aorta_runtime::{ActorCell, ActorSystem, StartOptions};
	use aorta_testing::util::wait::wait_for;
	use parking_lot::Mutex;

	use super::*;

	#[derive(Clone, Default)]
	struct RecordingLed {
		configured: Arc<Mutex<bool>>,
		levels: Arc<Mutex<Vec<bool>>>,
	}

	impl Led for RecordingLed {
		fn configure(&mut self) {
			*self.configured.lock() = true;
		}

		fn set(&mut self, on: bool) {
			self.levels.lock().push(on);
		}
	}

	fn options() -> StartOptions {
		StartOptions::new(1u8, 10, 64 * 1024).name("blinky")
	}

	#[test]
	fn test_init_turns_led_off() {
		let system = ActorSystem::default();
		let led = RecordingLed::default();

		let handle = ActorCell::new(Blinky::new(led.clone(), 0)).start(&system, options()).unwrap();
		wait_for(|| !led.levels.lock().is_empty(), "init dispatched");

		assert!(*led.configured.lock());
		assert_eq!(*led.levels.lock(), vec![false]);
		assert!(!handle.is_finished());
	}

	#[test]
	fn test_blink_toggles() {
		let system = ActorSystem::default();
		let led = RecordingLed::default();

		let handle = ActorCell::new(Blinky::new(led.clone(), 0)).start(&system, options()).unwrap();
		for _ in 0..3 {
			handle.post(BlinkSignal::Blink).unwrap();
		}

		wait_for(|| led.levels.lock().len() == 4, "three blinks dispatched");
		assert_eq!(*led.levels.lock(), vec![false, true, false, true]);
	}

	#[test]
	fn test_stops_after_limit() {
		let system = ActorSystem::default();
		let led = RecordingLed::default();

		let handle = ActorCell::new(Blinky::new(led.clone(), 2)).start(&system, options()).unwrap();
		handle.post(BlinkSignal::Blink).unwrap();
		handle.post(BlinkSignal::Blink).unwrap();
		handle.join().unwrap();

		// init, two toggles, then off again in post_stop
		assert_eq!(*led.levels.lock(), vec![false, true, false, false]);
	}

	#[test]
	fn test_driven_by_time_event() {
		let system = ActorSystem::default();
		let led = RecordingLed::default();

		let handle = ActorCell::new(Blinky::new(led.clone(), 3)).start(&system, options()).unwrap();
		let blink = system.time_event(BlinkSignal::Blink, handle.actor_ref()).unwrap();
		blink.arm(2, 2);

		for _ in 0..6 {
			system.tick();
		}
		handle.join().unwrap();
		assert_eq!(led.levels.lock().len(), 5);
	}
}
