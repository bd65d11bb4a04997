// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Bounded actor mailboxes.
//!
//! A mailbox is a fixed-capacity FIFO with any number of producers ([`ActorRef`]) and exactly one
//! consumer ([`Mailbox`]), owned by the actor's thread. Posting never blocks: a full mailbox rejects
//! the message and hands it back.

use std::{
	fmt, process,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use tracing::{error, warn};

use super::message::Message;
use crate::{config::OverflowPolicy, error::PostError};

struct Shared {
	name: Arc<str>,
	capacity: usize,
	overflow: OverflowPolicy,
	dropped: AtomicU64,
}

/// Sending half of a mailbox. Cheap to clone, safe to use from any thread.
pub struct ActorRef<M> {
	tx: Sender<Message<M>>,
	shared: Arc<Shared>,
}

impl<M> Clone for ActorRef<M> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			shared: self.shared.clone(),
		}
	}
}

impl<M> fmt::Debug for ActorRef<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActorRef")
			.field("name", &self.shared.name)
			.field("capacity", &self.shared.capacity)
			.field("queued", &self.tx.len())
			.field("dropped", &self.dropped())
			.finish()
	}
}

impl<M> ActorRef<M> {
	/// Enqueue an application message without blocking.
	pub fn post(&self, msg: M) -> Result<(), PostError<M>> {
		self.enqueue(Message::User(msg)).map_err(|err| match err {
			PostError::Full(Message::User(msg)) => PostError::Full(msg),
			PostError::Closed(Message::User(msg)) => PostError::Closed(msg),
			_ => unreachable!("only user messages are enqueued here"),
		})
	}

	/// Enqueue the reserved QUIT message without blocking.
	pub fn post_quit(&self) -> Result<(), PostError<()>> {
		self.enqueue(Message::Quit).map_err(|err| match err {
			PostError::Full(_) => PostError::Full(()),
			PostError::Closed(_) => PostError::Closed(()),
		})
	}

	fn enqueue(&self, msg: Message<M>) -> Result<(), PostError<Message<M>>> {
		match self.tx.try_send(msg) {
			Ok(()) => Ok(()),
			Err(TrySendError::Full(msg)) => {
				let dropped = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
				if self.shared.overflow == OverflowPolicy::Abort {
					error!(actor = %self.shared.name, capacity = self.shared.capacity, "mailbox overflowed, aborting");
					process::abort();
				}
				warn!(actor = %self.shared.name, capacity = self.shared.capacity, dropped, "mailbox full, message dropped");
				Err(PostError::Full(msg))
			}
			Err(TrySendError::Disconnected(msg)) => {
				self.shared.dropped.fetch_add(1, Ordering::Relaxed);
				warn!(actor = %self.shared.name, "actor stopped, message dropped");
				Err(PostError::Closed(msg))
			}
		}
	}

	/// Name of the actor behind this reference.
	pub fn name(&self) -> &str {
		&self.shared.name
	}

	/// Mailbox capacity in messages.
	pub fn capacity(&self) -> usize {
		self.shared.capacity
	}

	/// Number of messages currently waiting.
	pub fn queued(&self) -> usize {
		self.tx.len()
	}

	/// Number of messages rejected so far, across every clone of this reference.
	pub fn dropped(&self) -> u64 {
		self.shared.dropped.load(Ordering::Relaxed)
	}
}

/// Why a receive returned without a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
	/// The bounded wait elapsed.
	Timeout,
	/// Every sender is gone.
	Closed,
}

/// Receiving half of a mailbox, owned by the actor thread.
pub struct Mailbox<M> {
	rx: Receiver<Message<M>>,
}

impl<M> Mailbox<M> {
	/// Block until a message is available or every sender is gone.
	pub fn recv(&self) -> Result<Message<M>, RecvError> {
		self.rx.recv().map_err(|_| RecvError::Closed)
	}

	/// Block for at most `timeout`.
	pub fn recv_timeout(&self, timeout: Duration) -> Result<Message<M>, RecvError> {
		self.rx.recv_timeout(timeout).map_err(|err| {
			if err.is_timeout() {
				RecvError::Timeout
			} else {
				RecvError::Closed
			}
		})
	}

	pub fn try_recv(&self) -> Option<Message<M>> {
		self.rx.try_recv().ok()
	}

	pub fn len(&self) -> usize {
		self.rx.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rx.is_empty()
	}
}

/// Create a mailbox with room for `capacity` messages.
///
/// `capacity` must be non-zero; a zero-capacity channel would turn every post into a rendezvous.
pub(crate) fn create_mailbox<M>(
	name: impl Into<Arc<str>>,
	capacity: usize,
	overflow: OverflowPolicy,
) -> (ActorRef<M>, Mailbox<M>) {
	debug_assert!(capacity > 0);
	let (tx, rx) = bounded(capacity);
	let shared = Arc::new(Shared {
		name: name.into(),
		capacity,
		overflow,
		dropped: AtomicU64::new(0),
	});
	(
		ActorRef {
			tx,
			shared,
		},
		Mailbox {
			rx,
		},
	)
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	#[test]
	fn test_capacity_two_rejects_third() {
		let (actor_ref, mailbox) = create_mailbox::<u16>("a", 2, OverflowPolicy::Drop);

		assert!(actor_ref.post(5).is_ok());
		assert!(actor_ref.post(6).is_ok());
		assert_eq!(actor_ref.post(7), Err(PostError::Full(7)));
		assert_eq!(actor_ref.dropped(), 1);

		assert_eq!(mailbox.try_recv(), Some(Message::User(5)));
		assert!(actor_ref.post(7).is_ok());

		assert_eq!(mailbox.try_recv(), Some(Message::User(6)));
		assert_eq!(mailbox.try_recv(), Some(Message::User(7)));
		assert_eq!(mailbox.try_recv(), None);
	}

	#[test]
	fn test_fifo_order() {
		let (actor_ref, mailbox) = create_mailbox::<u32>("fifo", 64, OverflowPolicy::Drop);
		for i in 0..64 {
			actor_ref.post(i).unwrap();
		}
		let received: Vec<_> = std::iter::from_fn(|| mailbox.try_recv()).filter_map(Message::into_user).collect();
		assert_eq!(received, (0..64).collect::<Vec<_>>());
	}

	#[test]
	fn test_post_after_receiver_dropped_is_closed() {
		let (actor_ref, mailbox) = create_mailbox::<u8>("gone", 1, OverflowPolicy::Drop);
		drop(mailbox);
		assert_eq!(actor_ref.post(1), Err(PostError::Closed(1)));
		assert_eq!(actor_ref.post_quit(), Err(PostError::Closed(())));
		assert_eq!(actor_ref.dropped(), 2);
	}

	#[test]
	fn test_quit_is_queued_in_order() {
		let (actor_ref, mailbox) = create_mailbox::<u8>("q", 4, OverflowPolicy::Drop);
		actor_ref.post(1).unwrap();
		actor_ref.post_quit().unwrap();
		assert_eq!(mailbox.try_recv(), Some(Message::User(1)));
		assert_eq!(mailbox.try_recv(), Some(Message::Quit));
	}

	#[test]
	fn test_recv_timeout_and_closed() {
		let (actor_ref, mailbox) = create_mailbox::<u8>("t", 1, OverflowPolicy::Drop);
		assert_eq!(mailbox.recv_timeout(Duration::from_millis(5)), Err(RecvError::Timeout));
		drop(actor_ref);
		assert_eq!(mailbox.recv(), Err(RecvError::Closed));
	}

	#[test]
	fn test_post_from_many_threads() {
		let (actor_ref, mailbox) = create_mailbox::<usize>("mt", 1000, OverflowPolicy::Drop);
		let handles: Vec<_> = (0..4)
			.map(|t| {
				let actor_ref = actor_ref.clone();
				thread::spawn(move || {
					for i in 0..100 {
						actor_ref.post(t * 100 + i).unwrap();
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}
		assert_eq!(mailbox.len(), 400);
		assert_eq!(actor_ref.queued(), 400);
	}
}
