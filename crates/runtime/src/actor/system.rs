// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! The actor system: the scheduler context every actor and time event lives in.

use std::{fmt, sync::Arc, thread};

use parking_lot::Mutex;
use tracing::{debug, error};

use super::{
	cell::{ActorCell, ActorHandle},
	context::{CancellationToken, Context},
	mailbox::{ActorRef, create_mailbox},
	runner::ActorRunner,
	traits::Actor,
};
use crate::{
	config::{RuntimeConfig, StartOptions},
	error::{Error, Result},
	time::{TickDriver, TickReport, TimeEvent, TimeEventRegistry},
};

struct Inner {
	config: RuntimeConfig,
	registry: Arc<TimeEventRegistry>,
	cancel: CancellationToken,
	driver: Mutex<Option<TickDriver>>,
}

/// Owns the time event registry, the runtime configuration and the shutdown token.
///
/// Cloning creates another reference to the same system.
#[derive(Clone)]
pub struct ActorSystem {
	inner: Arc<Inner>,
}

impl ActorSystem {
	pub fn new(config: RuntimeConfig) -> Self {
		let registry = Arc::new(TimeEventRegistry::with_capacity(config.timer_capacity));
		Self {
			inner: Arc::new(Inner {
				config,
				registry,
				cancel: CancellationToken::new(),
				driver: Mutex::new(None),
			}),
		}
	}

	pub fn config(&self) -> &RuntimeConfig {
		&self.inner.config
	}

	/// The registry serviced by [`tick`](Self::tick).
	pub fn time_events(&self) -> &Arc<TimeEventRegistry> {
		&self.inner.registry
	}

	pub fn cancellation_token(&self) -> CancellationToken {
		self.inner.cancel.clone()
	}

	pub fn is_cancelled(&self) -> bool {
		self.inner.cancel.is_cancelled()
	}

	/// Allocate a mailbox of `options.queue_length` slots and a thread of `options.stack_size` bytes,
	/// then run the actor's dispatch loop on that thread.
	pub fn start<A: Actor>(&self, cell: ActorCell<A>, options: StartOptions) -> Result<ActorHandle<A::Message>> {
		if options.queue_length == 0 {
			error!(actor = %options.name, "refusing to start actor with a zero-length mailbox");
			return Err(Error::InvalidQueueLength {
				name: options.name,
			});
		}
		if options.stack_size == 0 {
			error!(actor = %options.name, "refusing to start actor with a zero byte stack");
			return Err(Error::InvalidStackSize {
				name: options.name,
			});
		}

		let (actor_ref, mailbox) =
			create_mailbox(options.name.as_str(), options.queue_length, self.inner.config.overflow);
		let ctx = Context::new(actor_ref.clone(), self.inner.registry.clone(), self.inner.cancel.clone());
		let runner = ActorRunner::new(cell.actor, mailbox, ctx, options.recv_wait);

		let join_handle = thread::Builder::new()
			.name(options.name.clone())
			.stack_size(options.stack_size)
			.spawn(move || runner.run())
			.map_err(|source| {
				error!(actor = %options.name, error = %source, "failed to spawn actor thread");
				Error::Spawn {
					name: options.name.clone(),
					source,
				}
			})?;

		debug!(
			actor = %options.name,
			priority = %options.priority,
			queue_length = options.queue_length,
			stack_size = options.stack_size,
			"actor started"
		);

		Ok(ActorHandle::new(actor_ref, options.priority, join_handle))
	}

	/// Register a disarmed time event posting `message` to `owner`.
	pub fn time_event<M>(&self, message: M, owner: &ActorRef<M>) -> Result<TimeEvent<M>>
	where
		M: Clone + Send + Sync + 'static,
	{
		self.inner.registry.register(message, owner)
	}

	/// Service every registered time event once.
	pub fn tick(&self) -> TickReport {
		self.inner.registry.tick()
	}

	/// Spawn the tick driver at the configured tick period. Does nothing if it already runs.
	pub fn start_ticking(&self) -> Result<()> {
		let mut driver = self.inner.driver.lock();
		if driver.is_none() {
			*driver = Some(TickDriver::spawn(self.inner.registry.clone(), self.inner.config.tick_period)?);
		}
		Ok(())
	}

	/// Cancel every actor and stop the tick driver.
	///
	/// Actors observe cancellation between two messages, or at the end of a bounded receive wait.
	pub fn shutdown(&self) {
		self.inner.cancel.cancel();
		if let Some(mut driver) = self.inner.driver.lock().take() {
			driver.shutdown();
		}
		debug!("actor system shut down");
	}
}

impl Default for ActorSystem {
	fn default() -> Self {
		Self::new(RuntimeConfig::default())
	}
}

impl fmt::Debug for ActorSystem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActorSystem")
			.field("config", &self.inner.config)
			.field("time_events", &self.inner.registry.len())
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}
