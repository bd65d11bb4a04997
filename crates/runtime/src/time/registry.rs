// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use std::{
	fmt,
	sync::{
		Arc,
		atomic::{AtomicU64, AtomicUsize, Ordering},
	},
};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, error, trace, warn};

use super::event::{Expire, TimeEvent, TimeEventInner};
use crate::{
	actor::ActorRef,
	config::DEFAULT_TIMER_CAPACITY,
	error::{Error, Result},
};

/// Outcome of one [`TimeEventRegistry::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
	/// Expirations delivered to their owner's mailbox.
	pub fired: usize,
	/// Expirations the owner rejected (mailbox full or actor stopped).
	pub dropped: usize,
}

/// Fixed-capacity table of time events and the tick routine servicing them.
///
/// Slots are filled in registration order and never released. Registration is serialized by a
/// mutex; [`tick`](Self::tick) takes no lock and never allocates, so it may run concurrently with
/// registration and with any number of posting threads.
pub struct TimeEventRegistry {
	slots: Box<[OnceCell<Arc<dyn Expire>>]>,
	len: AtomicUsize,
	append: Mutex<()>,
	ticks: AtomicU64,
}

impl TimeEventRegistry {
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_TIMER_CAPACITY)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			slots: (0..capacity).map(|_| OnceCell::new()).collect(),
			len: AtomicUsize::new(0),
			append: Mutex::new(()),
			ticks: AtomicU64::new(0),
		}
	}

	/// Register a disarmed time event that posts a clone of `message` to `owner` on expiration.
	///
	/// Fails with [`Error::RegistryFull`] once every slot is taken.
	pub fn register<M>(&self, message: M, owner: &ActorRef<M>) -> Result<TimeEvent<M>>
	where
		M: Clone + Send + Sync + 'static,
	{
		let _guard = self.append.lock();

		let id = self.len.load(Ordering::Relaxed);
		let Some(slot) = self.slots.get(id) else {
			error!(capacity = self.capacity(), owner = %owner.name(), "time event registry is full");
			return Err(Error::RegistryFull {
				capacity: self.capacity(),
			});
		};

		let inner = Arc::new(TimeEventInner::new(id, message, owner.clone()));
		// Slots at or beyond `len` are only ever written here, under `append`.
		let _ = slot.set(inner.clone() as Arc<dyn Expire>);
		self.len.store(id + 1, Ordering::Release);

		debug!(id, owner = %owner.name(), "time event registered");
		Ok(TimeEvent::new(inner))
	}

	/// Advance every armed time event by one tick, in registration order.
	///
	/// A time event whose countdown reaches zero posts its message to its owner and reloads from its
	/// interval. A rejected post is counted in the report and does not stop a periodic timer.
	pub fn tick(&self) -> TickReport {
		self.ticks.fetch_add(1, Ordering::Relaxed);

		let len = self.len.load(Ordering::Acquire);
		let mut report = TickReport::default();

		for (id, slot) in self.slots[..len].iter().enumerate() {
			let Some(event) = slot.get() else {
				continue;
			};
			if !event.state().advance() {
				continue;
			}
			if event.expire() {
				trace!(id, "time event fired");
				report.fired += 1;
			} else {
				warn!(id, "time event expiration dropped");
				report.dropped += 1;
			}
		}

		report
	}

	/// Number of registered time events.
	pub fn len(&self) -> usize {
		self.len.load(Ordering::Acquire)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Total number of ticks serviced.
	pub fn ticks(&self) -> u64 {
		self.ticks.load(Ordering::Relaxed)
	}
}

impl Default for TimeEventRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for TimeEventRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TimeEventRegistry")
			.field("len", &self.len())
			.field("capacity", &self.capacity())
			.field("ticks", &self.ticks())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		actor::{Mailbox, Message, mailbox::create_mailbox},
		config::OverflowPolicy,
	};

	fn mailbox(capacity: usize) -> (ActorRef<u16>, Mailbox<u16>) {
		create_mailbox("owner", capacity, OverflowPolicy::Drop)
	}

	fn drain(mailbox: &Mailbox<u16>) -> Vec<u16> {
		std::iter::from_fn(|| mailbox.try_recv()).filter_map(Message::into_user).collect()
	}

	#[test]
	fn test_register_until_full() {
		let registry = TimeEventRegistry::with_capacity(2);
		let (owner, _mailbox) = mailbox(4);

		let first = registry.register(1, &owner).unwrap();
		let second = registry.register(2, &owner).unwrap();
		assert_eq!((first.id(), second.id()), (0, 1));
		assert!(!first.is_armed());

		let err = registry.register(3, &owner).unwrap_err();
		assert!(matches!(err, Error::RegistryFull { capacity: 2 }));
		assert_eq!(registry.len(), 2);
	}

	#[test]
	fn test_default_capacity() {
		let registry = TimeEventRegistry::new();
		assert_eq!(registry.capacity(), 10);
		assert!(registry.is_empty());
	}

	#[test]
	fn test_timeout_three_interval_five() {
		let registry = TimeEventRegistry::new();
		let (owner, mailbox) = mailbox(8);
		let event = registry.register(42, &owner).unwrap();
		event.arm(3, 5);

		for _ in 0..3 {
			registry.tick();
		}
		assert_eq!(drain(&mailbox), vec![42]);

		for _ in 0..4 {
			registry.tick();
		}
		assert!(drain(&mailbox).is_empty());
		registry.tick();
		assert_eq!(drain(&mailbox), vec![42]);
		assert_eq!(registry.ticks(), 8);
	}

	#[test]
	fn test_same_tick_fires_in_registration_order() {
		let registry = TimeEventRegistry::new();
		let (owner, mailbox) = mailbox(8);
		let events: Vec<_> = [30, 10, 20].into_iter().map(|sig| registry.register(sig, &owner).unwrap()).collect();
		for event in &events {
			event.arm(2, 0);
		}

		assert_eq!(registry.tick(), TickReport::default());
		assert_eq!(
			registry.tick(),
			TickReport {
				fired: 3,
				dropped: 0
			}
		);
		assert_eq!(drain(&mailbox), vec![30, 10, 20]);
	}

	#[test]
	fn test_full_mailbox_counts_drop_and_keeps_period() {
		let registry = TimeEventRegistry::new();
		let (owner, mailbox) = mailbox(1);
		let event = registry.register(7, &owner).unwrap();
		event.arm(1, 1);

		assert_eq!(registry.tick().fired, 1);
		assert_eq!(registry.tick().dropped, 1);
		assert_eq!(owner.dropped(), 1);
		assert_eq!(event.remaining(), 1);

		assert_eq!(drain(&mailbox), vec![7]);
		assert_eq!(registry.tick().fired, 1);
	}

	#[test]
	fn test_dropped_handle_keeps_slot_and_timer() {
		let registry = TimeEventRegistry::with_capacity(1);
		let (owner, mailbox) = mailbox(4);
		registry.register(9, &owner).unwrap().arm(1, 0);

		registry.tick();
		assert_eq!(drain(&mailbox), vec![9]);
		assert!(registry.register(10, &owner).is_err());
	}
}
