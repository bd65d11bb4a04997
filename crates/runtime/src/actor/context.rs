// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Actor execution context.
//!
//! The context provides actors with access to:
//! - Self reference for receiving messages
//! - Cancellation status for graceful shutdown
//! - Time event registration targeting the actor itself

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use crate::{
	actor::mailbox::ActorRef,
	error::Result,
	time::{TimeEvent, TimeEventRegistry},
};

/// A cancellation token for signaling shutdown.
///
/// This is a simple atomic boolean that can be shared across actors.
#[derive(Clone, Debug)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	/// Create a new cancellation token.
	pub fn new() -> Self {
		Self {
			cancelled: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Signal cancellation.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	/// Check if cancellation was requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

impl Default for CancellationToken {
	fn default() -> Self {
		Self::new()
	}
}

/// Context provided to actors during dispatch.
pub struct Context<M> {
	self_ref: ActorRef<M>,
	registry: Arc<TimeEventRegistry>,
	cancel: CancellationToken,
}

impl<M: Send + 'static> Context<M> {
	pub(crate) fn new(self_ref: ActorRef<M>, registry: Arc<TimeEventRegistry>, cancel: CancellationToken) -> Self {
		Self {
			self_ref,
			registry,
			cancel,
		}
	}

	/// Get a reference to send messages to self.
	pub fn self_ref(&self) -> ActorRef<M> {
		self.self_ref.clone()
	}

	/// Name the actor was started with.
	pub fn name(&self) -> &str {
		self.self_ref.name()
	}

	/// Check if shutdown was requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// The registry serviced by the system's tick.
	pub fn time_events(&self) -> &Arc<TimeEventRegistry> {
		&self.registry
	}
}

impl<M: Clone + Send + Sync + 'static> Context<M> {
	/// Register a disarmed time event that posts `message` to this actor.
	///
	/// Usually called while handling [`Message::Init`](crate::actor::Message::Init).
	pub fn time_event(&self, message: M) -> Result<TimeEvent<M>> {
		self.registry.register(message, &self.self_ref)
	}
}

impl<M> Clone for Context<M> {
	fn clone(&self) -> Self {
		Self {
			self_ref: self.self_ref.clone(),
			registry: self.registry.clone(),
			cancel: self.cancel.clone(),
		}
	}
}
