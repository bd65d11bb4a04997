// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Runtime and per-actor configuration.

use std::{fmt, time::Duration};

use serde::{Deserialize, Deserializer};

/// Default number of time events a registry can hold.
pub const DEFAULT_TIMER_CAPACITY: usize = 10;

/// Default tick period (100 Hz).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Default mailbox capacity for a started actor.
pub const DEFAULT_QUEUE_LENGTH: usize = 10;

/// Default stack size for an actor thread, in bytes.
pub const DEFAULT_STACK_SIZE: usize = 64 * 1024;

/// What an overflowing mailbox does in addition to returning
/// [`PostError::Full`](crate::PostError::Full).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
	/// Log at `warn`, bump the drop counter and carry on.
	#[default]
	Drop,
	/// Log at `error` and abort the process, whichever thread posted.
	Abort,
}

/// Configuration for an [`ActorSystem`](crate::actor::ActorSystem).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
	/// Maximum number of time events for the lifetime of the system.
	///
	/// Default: 10
	pub timer_capacity: usize,

	/// Period between two ticks of the tick driver.
	///
	/// Default: 10ms
	#[serde(rename = "tick_period_ms", deserialize_with = "duration_from_millis")]
	pub tick_period: Duration,

	/// Overflow behaviour shared by every mailbox of the system.
	pub overflow: OverflowPolicy,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		Self {
			timer_capacity: DEFAULT_TIMER_CAPACITY,
			tick_period: DEFAULT_TICK_PERIOD,
			overflow: OverflowPolicy::Drop,
		}
	}
}

impl RuntimeConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn timer_capacity(mut self, capacity: usize) -> Self {
		self.timer_capacity = capacity;
		self
	}

	pub fn tick_period(mut self, period: Duration) -> Self {
		self.tick_period = period;
		self
	}

	pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
		self.overflow = policy;
		self
	}
}

fn duration_from_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
	D: Deserializer<'de>,
{
	u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Scheduling priority requested for an actor thread.
///
/// Higher is more urgent. Hosted targets record the value on the actor handle and in the start
/// log event; it has no effect on the OS scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub u8);

impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "p{}", self.0)
	}
}

impl From<u8> for Priority {
	fn from(value: u8) -> Self {
		Priority(value)
	}
}

/// How long the dispatch loop waits for the next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecvWait {
	/// Block until a message arrives.
	#[default]
	Forever,
	/// Wake up at least every `Duration` to observe system cancellation.
	Bounded(Duration),
}

/// Parameters for starting an actor.
#[derive(Debug, Clone)]
pub struct StartOptions {
	/// Thread name; also used as the `actor` field in logs.
	pub name: String,
	pub priority: Priority,
	/// Mailbox capacity in messages. Must be non-zero.
	pub queue_length: usize,
	/// Thread stack size in bytes. Must be non-zero.
	pub stack_size: usize,
	pub recv_wait: RecvWait,
}

impl Default for StartOptions {
	fn default() -> Self {
		Self {
			name: "actor".to_string(),
			priority: Priority::default(),
			queue_length: DEFAULT_QUEUE_LENGTH,
			stack_size: DEFAULT_STACK_SIZE,
			recv_wait: RecvWait::Forever,
		}
	}
}

impl StartOptions {
	pub fn new(priority: impl Into<Priority>, queue_length: usize, stack_size: usize) -> Self {
		Self {
			priority: priority.into(),
			queue_length,
			stack_size,
			..Self::default()
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
		self.priority = priority.into();
		self
	}

	pub fn queue_length(mut self, queue_length: usize) -> Self {
		self.queue_length = queue_length;
		self
	}

	pub fn stack_size(mut self, stack_size: usize) -> Self {
		self.stack_size = stack_size;
		self
	}

	pub fn recv_wait(mut self, wait: RecvWait) -> Self {
		self.recv_wait = wait;
		self
	}
}
