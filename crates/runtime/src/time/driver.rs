// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use std::{
	sync::Arc,
	thread::{self, JoinHandle},
	time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::{debug, error};

use super::TimeEventRegistry;
use crate::error::{Error, Result};

const THREAD_NAME: &str = "tick-driver";

/// Commands sent to the tick driver thread.
enum DriverCommand {
	Shutdown,
}

/// Calls [`TimeEventRegistry::tick`] once per period on a dedicated thread.
///
/// Plays the role of the periodic tick interrupt. Deadlines are absolute, so a late tick is
/// followed by an immediate catch-up tick rather than shifting every later tick.
#[derive(Debug)]
pub struct TickDriver {
	command_tx: Sender<DriverCommand>,
	join_handle: Option<JoinHandle<()>>,
	period: Duration,
}

impl TickDriver {
	/// Fails with [`Error::InvalidTickPeriod`] for a zero period or one the clock cannot add.
	pub fn spawn(registry: Arc<TimeEventRegistry>, period: Duration) -> Result<Self> {
		if period.is_zero() || Instant::now().checked_add(period).is_none() {
			error!(?period, "refusing to start tick driver");
			return Err(Error::InvalidTickPeriod {
				period,
			});
		}

		let (command_tx, command_rx) = bounded(1);

		let join_handle = thread::Builder::new()
			.name(THREAD_NAME.to_string())
			.spawn(move || drive(command_rx, registry, period))
			.map_err(|source| {
				error!(error = %source, "failed to spawn tick driver");
				Error::Spawn {
					name: THREAD_NAME.to_string(),
					source,
				}
			})?;

		debug!(period_us = period.as_micros() as u64, "tick driver started");

		Ok(Self {
			command_tx,
			join_handle: Some(join_handle),
			period,
		})
	}

	pub fn period(&self) -> Duration {
		self.period
	}

	/// Stop ticking and wait for the thread to exit.
	pub fn shutdown(&mut self) {
		let _ = self.command_tx.try_send(DriverCommand::Shutdown);

		if let Some(handle) = self.join_handle.take() {
			let _ = handle.join();
		}
	}
}

impl Drop for TickDriver {
	fn drop(&mut self) {
		// Signal shutdown; joining here could block the dropping thread for a full period
		let _ = self.command_tx.try_send(DriverCommand::Shutdown);
	}
}

fn drive(command_rx: Receiver<DriverCommand>, registry: Arc<TimeEventRegistry>, period: Duration) {
	let mut deadline = Instant::now();

	loop {
		let Some(next) = deadline.checked_add(period) else {
			error!(?period, "tick deadline overflowed the clock, tick driver stopped");
			return;
		};
		deadline = next;

		let wait = deadline.saturating_duration_since(Instant::now());

		match command_rx.recv_timeout(wait) {
			Ok(DriverCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
				debug!(ticks = registry.ticks(), "tick driver stopped");
				return;
			}
			Err(RecvTimeoutError::Timeout) => {
				registry.tick();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_driver_ticks_until_shutdown() {
		let registry = Arc::new(TimeEventRegistry::new());
		let mut driver = TickDriver::spawn(registry.clone(), Duration::from_millis(1)).unwrap();

		let start = Instant::now();
		while registry.ticks() < 5 && start.elapsed() < Duration::from_secs(5) {
			thread::sleep(Duration::from_millis(1));
		}
		driver.shutdown();

		let ticks = registry.ticks();
		assert!(ticks >= 5, "expected at least 5 ticks, got {}", ticks);

		thread::sleep(Duration::from_millis(20));
		assert_eq!(registry.ticks(), ticks);
	}

	#[test]
	fn test_zero_period_rejected() {
		let registry = Arc::new(TimeEventRegistry::new());
		let err = TickDriver::spawn(registry.clone(), Duration::ZERO).unwrap_err();
		assert!(matches!(err, Error::InvalidTickPeriod { period } if period.is_zero()));

		thread::sleep(Duration::from_millis(5));
		assert_eq!(registry.ticks(), 0);
	}

	#[test]
	fn test_unschedulable_period_rejected() {
		let registry = Arc::new(TimeEventRegistry::new());
		let err = TickDriver::spawn(registry, Duration::MAX).unwrap_err();
		assert!(matches!(err, Error::InvalidTickPeriod { period } if period == Duration::MAX));
	}

	#[test]
	fn test_drop_stops_driver() {
		let registry = Arc::new(TimeEventRegistry::new());
		let driver = TickDriver::spawn(registry.clone(), Duration::from_millis(1)).unwrap();
		assert_eq!(driver.period(), Duration::from_millis(1));
		drop(driver);

		thread::sleep(Duration::from_millis(20));
		let ticks = registry.ticks();
		thread::sleep(Duration::from_millis(20));
		assert_eq!(registry.ticks(), ticks);
	}
}
