// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Core actor trait and associated types.
//!
//! This module defines the behavior side of the actor model:
//! - [`Actor`]: The trait that all actors must implement
//! - [`Flow`]: What the dispatch loop does after a message
//! - [`ActorFn`]: Adapter turning a plain dispatch closure into an actor

use std::marker::PhantomData;

use super::{context::Context, message::Message};

/// What the actor wants to do after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
	/// Wait for the next message.
	#[default]
	Continue,

	/// Stop this actor permanently.
	///
	/// The actor's `post_stop` hook runs and its thread exits. Later posts report
	/// [`PostError::Closed`](crate::PostError::Closed).
	Stop,
}

/// The core actor abstraction.
///
/// An actor owns its state exclusively and sees messages one at a time, always on its own thread.
///
/// # Lifecycle
///
/// 1. `dispatch(Message::Init)` - one-time setup, before any posted message
/// 2. Loop: `dispatch()` each message in mailbox order
/// 3. `post_stop()` - only if the loop ends (`Flow::Stop`, cancellation, closed mailbox)
///
/// # Contract
///
/// `dispatch` runs to completion. It must not block or sleep: while it runs, messages for this actor
/// pile up in a mailbox of fixed capacity and further posts are rejected.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Copy)]
/// enum BlinkMsg {
///     Toggle,
/// }
///
/// struct Blinky {
///     on: bool,
/// }
///
/// impl Actor for Blinky {
///     type Message = BlinkMsg;
///
///     fn dispatch(&mut self, msg: Message<BlinkMsg>, _ctx: &Context<BlinkMsg>) -> Flow {
///         match msg {
///             Message::Init => self.on = false,
///             Message::User(BlinkMsg::Toggle) => self.on = !self.on,
///             Message::Quit => return Flow::Stop,
///         }
///         Flow::Continue
///     }
/// }
/// ```
pub trait Actor: Send + 'static {
	/// Application messages this actor can receive.
	type Message: Send + 'static;

	/// Handle a single message. This is the actor's only behavior entry point.
	fn dispatch(&mut self, msg: Message<Self::Message>, ctx: &Context<Self::Message>) -> Flow;

	/// Called once after the dispatch loop ends. The mailbox is already closed.
	fn post_stop(&mut self) {}
}

/// An [`Actor`] backed by a dispatch closure.
///
/// Created through [`ActorCell::from_fn`](super::ActorCell::from_fn).
pub struct ActorFn<M, F> {
	dispatch: F,
	_message: PhantomData<fn(M)>,
}

impl<M, F> ActorFn<M, F>
where
	M: Send + 'static,
	F: FnMut(Message<M>, &Context<M>) -> Flow + Send + 'static,
{
	pub fn new(dispatch: F) -> Self {
		Self {
			dispatch,
			_message: PhantomData,
		}
	}
}

impl<M, F> Actor for ActorFn<M, F>
where
	M: Send + 'static,
	F: FnMut(Message<M>, &Context<M>) -> Flow + Send + 'static,
{
	type Message = M;

	fn dispatch(&mut self, msg: Message<M>, ctx: &Context<M>) -> Flow {
		(self.dispatch)(msg, ctx)
	}
}
