// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Constructed and running actors.
//!
//! An [`ActorCell`] is an actor whose behavior is bound but which owns no mailbox or thread yet.
//! Starting it consumes the cell and yields an [`ActorHandle`]; there is no way back.

use std::{fmt, thread};

use super::{
	context::Context,
	mailbox::ActorRef,
	message::Message,
	system::ActorSystem,
	traits::{Actor, ActorFn, Flow},
};
use crate::{
	config::{Priority, StartOptions},
	error::{PostError, Result},
};

/// An actor that has been constructed but not started.
pub struct ActorCell<A: Actor> {
	pub(crate) actor: A,
}

impl<A: Actor> ActorCell<A> {
	/// Bind an actor's behavior.
	pub fn new(actor: A) -> Self {
		Self {
			actor,
		}
	}

	/// Allocate the mailbox and thread and enter the dispatch loop.
	pub fn start(self, system: &ActorSystem, options: StartOptions) -> Result<ActorHandle<A::Message>> {
		system.start(self, options)
	}
}

impl<M, F> ActorCell<ActorFn<M, F>>
where
	M: Send + 'static,
	F: FnMut(Message<M>, &Context<M>) -> Flow + Send + 'static,
{
	/// Bind a plain dispatch closure.
	pub fn from_fn(dispatch: F) -> Self {
		Self::new(ActorFn::new(dispatch))
	}
}

/// Error returned by [`ActorHandle::join`] when the actor thread panicked.
#[derive(Debug)]
pub struct JoinError {
	message: String,
}

impl JoinError {
	pub(crate) fn new(message: String) -> Self {
		Self {
			message,
		}
	}
}

impl fmt::Display for JoinError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "actor thread panicked: {}", self.message)
	}
}

impl std::error::Error for JoinError {}

/// Handle to a running actor.
pub struct ActorHandle<M> {
	actor_ref: ActorRef<M>,
	priority: Priority,
	join_handle: Option<thread::JoinHandle<()>>,
}

impl<M> ActorHandle<M> {
	pub(crate) fn new(actor_ref: ActorRef<M>, priority: Priority, join_handle: thread::JoinHandle<()>) -> Self {
		Self {
			actor_ref,
			priority,
			join_handle: Some(join_handle),
		}
	}

	/// Get the actor reference.
	pub fn actor_ref(&self) -> &ActorRef<M> {
		&self.actor_ref
	}

	/// Post an application message. See [`ActorRef::post`].
	pub fn post(&self, msg: M) -> std::result::Result<(), PostError<M>> {
		self.actor_ref.post(msg)
	}

	pub fn name(&self) -> &str {
		self.actor_ref.name()
	}

	pub fn priority(&self) -> Priority {
		self.priority
	}

	/// Whether the actor thread has exited.
	pub fn is_finished(&self) -> bool {
		self.join_handle.as_ref().is_none_or(|handle| handle.is_finished())
	}

	/// Wait for the actor thread to exit.
	///
	/// Only returns once the dispatch loop ends; see [`Flow::Stop`].
	pub fn join(mut self) -> std::result::Result<(), JoinError> {
		if let Some(handle) = self.join_handle.take() {
			handle.join().map_err(|payload| {
				let message = payload
					.downcast_ref::<&str>()
					.map(|s| s.to_string())
					.or_else(|| payload.downcast_ref::<String>().cloned())
					.unwrap_or_else(|| "non-string panic payload".to_string());
				JoinError::new(message)
			})
		} else {
			Ok(())
		}
	}
}

impl<M> fmt::Debug for ActorHandle<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActorHandle")
			.field("name", &self.name())
			.field("priority", &self.priority)
			.field("finished", &self.is_finished())
			.finish()
	}
}
