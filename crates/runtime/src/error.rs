// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Error types for the runtime.
//!
//! Two families of failure exist:
//! - [`Error`]: hard failures raised while wiring the system together (starting an actor, registering a
//!   time event). These happen at startup and callers are expected to abort on them.
//! - [`PostError`]: soft back-pressure failures when a message cannot be enqueued. The rejected message is
//!   handed back so the caller decides what to do with it.

use std::{fmt, io, time::Duration};

/// Result alias for hard runtime failures.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("actor `{name}` requested a mailbox of zero slots")]
	InvalidQueueLength {
		name: String,
	},

	#[error("actor `{name}` requested a zero byte stack")]
	InvalidStackSize {
		name: String,
	},

	#[error("host failed to spawn thread `{name}`")]
	Spawn {
		name: String,
		#[source]
		source: io::Error,
	},

	#[error("tick period {period:?} is zero or too large to schedule")]
	InvalidTickPeriod {
		period: Duration,
	},

	#[error("time event registry is full ({capacity} slots)")]
	RegistryFull {
		capacity: usize,
	},
}

/// Error returned by [`ActorRef::post`](crate::actor::ActorRef::post).
///
/// Carries the message that could not be delivered.
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum PostError<M> {
	/// The mailbox is at capacity.
	Full(M),
	/// The actor has stopped and its mailbox is gone.
	Closed(M),
}

impl<M> PostError<M> {
	/// Take back the message that was rejected.
	pub fn into_inner(self) -> M {
		match self {
			PostError::Full(msg) | PostError::Closed(msg) => msg,
		}
	}

	pub fn is_full(&self) -> bool {
		matches!(self, PostError::Full(_))
	}

	pub fn is_closed(&self) -> bool {
		matches!(self, PostError::Closed(_))
	}
}

impl<M> fmt::Debug for PostError<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PostError::Full(_) => f.write_str("Full(..)"),
			PostError::Closed(_) => f.write_str("Closed(..)"),
		}
	}
}

impl<M> fmt::Display for PostError<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PostError::Full(_) => f.write_str("mailbox full, message dropped"),
			PostError::Closed(_) => f.write_str("actor stopped, message dropped"),
		}
	}
}

impl<M> std::error::Error for PostError<M> {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_post_error_returns_message() {
		let err = PostError::Full(7u16);
		assert!(err.is_full());
		assert!(!err.is_closed());
		assert_eq!(err.into_inner(), 7);

		let err = PostError::Closed("late");
		assert!(err.is_closed());
		assert_eq!(err.into_inner(), "late");
	}

	#[test]
	fn test_error_display() {
		let err = Error::RegistryFull {
			capacity: 10,
		};
		assert_eq!(err.to_string(), "time event registry is full (10 slots)");

		let err = Error::InvalidQueueLength {
			name: "blinky".to_string(),
		};
		assert_eq!(err.to_string(), "actor `blinky` requested a mailbox of zero slots");
	}
}
