// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Dispatch loop driving an actor on its dedicated thread.

use tracing::{debug, trace};

use crate::{
	actor::{
		context::Context,
		mailbox::{Mailbox, RecvError},
		message::Message,
		traits::{Actor, Flow},
	},
	config::RecvWait,
};

/// Internal runner that drives an actor's execution on a dedicated thread.
///
/// The runner implements a simple blocking run loop:
/// 1. Dispatch the synthesized INIT message
/// 2. Loop: block on the mailbox, dispatch one message
/// 3. Close the mailbox and call the post_stop hook on termination
pub(crate) struct ActorRunner<A: Actor> {
	actor: A,
	mailbox: Mailbox<A::Message>,
	ctx: Context<A::Message>,
	wait: RecvWait,
}

impl<A: Actor> ActorRunner<A> {
	pub fn new(actor: A, mailbox: Mailbox<A::Message>, ctx: Context<A::Message>, wait: RecvWait) -> Self {
		Self {
			actor,
			mailbox,
			ctx,
			wait,
		}
	}

	/// Run the actor to completion.
	pub fn run(mut self) {
		debug!(actor = %self.ctx.name(), "actor starting");

		match self.actor.dispatch(Message::Init, &self.ctx) {
			Flow::Continue => self.run_loop(),
			Flow::Stop => debug!(actor = %self.ctx.name(), "actor stopped during init"),
		}

		// Close the mailbox first: posts racing with post_stop must report Closed.
		let Self {
			mut actor,
			mailbox,
			ctx,
			..
		} = self;
		drop(mailbox);

		actor.post_stop();
		debug!(actor = %ctx.name(), "actor stopped");
	}

	fn run_loop(&mut self) {
		loop {
			if self.ctx.is_cancelled() {
				debug!(actor = %self.ctx.name(), "actor cancelled, stopping");
				return;
			}

			let received = match self.wait {
				RecvWait::Forever => self.mailbox.recv(),
				RecvWait::Bounded(timeout) => self.mailbox.recv_timeout(timeout),
			};

			match received {
				Ok(msg) => {
					trace!(actor = %self.ctx.name(), signal = msg.signal(), "dispatch");
					if self.actor.dispatch(msg, &self.ctx) == Flow::Stop {
						debug!(actor = %self.ctx.name(), "actor returned Flow::Stop");
						return;
					}
				}
				// Re-check cancellation on the next iteration
				Err(RecvError::Timeout) => continue,
				Err(RecvError::Closed) => {
					debug!(actor = %self.ctx.name(), "actor mailbox closed, stopping");
					return;
				}
			}
		}
	}
}
