// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

use std::{
	fmt,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use crate::actor::ActorRef;

/// Countdown and reload interval packed into one word so that tick, arm and disarm are each a
/// single atomic read-modify-write.
///
/// Layout: countdown in the high 32 bits, interval in the low 32 bits.
pub(crate) struct TimerState(AtomicU64);

#[inline]
fn pack(countdown: u32, interval: u32) -> u64 {
	((countdown as u64) << 32) | interval as u64
}

#[inline]
fn countdown(state: u64) -> u32 {
	(state >> 32) as u32
}

#[inline]
fn interval(state: u64) -> u32 {
	state as u32
}

impl TimerState {
	fn new() -> Self {
		Self(AtomicU64::new(0))
	}

	fn arm(&self, timeout: u32, interval: u32) {
		self.0.store(pack(timeout, interval), Ordering::Release);
	}

	fn disarm(&self) {
		let _ = self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| Some(pack(0, interval(state))));
	}

	fn rearm(&self) -> bool {
		self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
			let interval = interval(state);
			(interval > 0).then(|| pack(interval, interval))
		})
		.is_ok()
	}

	/// Advance by one tick. Returns `true` when the countdown reached zero on this tick, in which
	/// case the countdown has already been reloaded from the interval.
	pub(crate) fn advance(&self) -> bool {
		self.0.fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| match countdown(state) {
			0 => None,
			1 => Some(pack(interval(state), interval(state))),
			n => Some(pack(n - 1, interval(state))),
		})
		.is_ok_and(|previous| countdown(previous) == 1)
	}

	fn load(&self) -> (u32, u32) {
		let state = self.0.load(Ordering::Acquire);
		(countdown(state), interval(state))
	}
}

/// Type-erased view of a time event, as stored in the registry.
pub(crate) trait Expire: Send + Sync {
	fn state(&self) -> &TimerState;

	/// Post the expiration message. Returns `false` if the owner rejected it.
	fn expire(&self) -> bool;
}

pub(crate) struct TimeEventInner<M> {
	id: usize,
	state: TimerState,
	message: M,
	owner: ActorRef<M>,
}

impl<M> TimeEventInner<M> {
	pub(crate) fn new(id: usize, message: M, owner: ActorRef<M>) -> Self {
		Self {
			id,
			state: TimerState::new(),
			message,
			owner,
		}
	}
}

impl<M: Clone + Send + Sync + 'static> Expire for TimeEventInner<M> {
	fn state(&self) -> &TimerState {
		&self.state
	}

	fn expire(&self) -> bool {
		self.owner.post(self.message.clone()).is_ok()
	}
}

/// A timer that posts a fixed message to its owning actor when its countdown reaches zero.
///
/// Created disarmed by [`TimeEventRegistry::register`](super::TimeEventRegistry::register). The
/// registry keeps its own reference, so dropping this handle does not stop the timer nor free
/// its slot.
pub struct TimeEvent<M> {
	inner: Arc<TimeEventInner<M>>,
}

impl<M> TimeEvent<M> {
	pub(crate) fn new(inner: Arc<TimeEventInner<M>>) -> Self {
		Self {
			inner,
		}
	}

	/// Fire after `timeout` ticks, then every `interval` ticks. An `interval` of 0 fires once.
	///
	/// A `timeout` of 0 leaves the timer disarmed.
	pub fn arm(&self, timeout: u32, interval: u32) {
		self.inner.state.arm(timeout, interval);
	}

	/// Stop the countdown. The interval is kept for [`rearm`](Self::rearm).
	///
	/// An expiration already sitting in the owner's mailbox is not retracted.
	pub fn disarm(&self) {
		self.inner.state.disarm();
	}

	/// Restart using the preserved interval as both timeout and reload.
	///
	/// Returns `false`, leaving the timer untouched, when the interval is 0.
	pub fn rearm(&self) -> bool {
		self.inner.state.rearm()
	}

	pub fn is_armed(&self) -> bool {
		self.remaining() > 0
	}

	/// Ticks left before the next expiration; 0 when disarmed.
	pub fn remaining(&self) -> u32 {
		self.inner.state.load().0
	}

	pub fn interval(&self) -> u32 {
		self.inner.state.load().1
	}

	/// Registration slot, in tick order.
	pub fn id(&self) -> usize {
		self.inner.id
	}

	/// Actor the expirations go to.
	pub fn owner(&self) -> &ActorRef<M> {
		&self.inner.owner
	}

	pub fn message(&self) -> &M {
		&self.inner.message
	}
}

impl<M: fmt::Debug> fmt::Debug for TimeEvent<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (remaining, interval) = self.inner.state.load();
		f.debug_struct("TimeEvent")
			.field("id", &self.inner.id)
			.field("message", &self.inner.message)
			.field("owner", &self.inner.owner.name())
			.field("remaining", &remaining)
			.field("interval", &interval)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_disarmed_never_fires() {
		let state = TimerState::new();
		for _ in 0..100 {
			assert!(!state.advance());
		}
		assert_eq!(state.load(), (0, 0));
	}

	#[test]
	fn test_one_shot() {
		let state = TimerState::new();
		state.arm(3, 0);
		assert!(!state.advance());
		assert!(!state.advance());
		assert!(state.advance());
		assert_eq!(state.load(), (0, 0));
		assert!(!state.advance());
	}

	#[test]
	fn test_periodic_reload() {
		let state = TimerState::new();
		state.arm(2, 3);
		let fired: Vec<bool> = (0..8).map(|_| state.advance()).collect();
		assert_eq!(fired, vec![false, true, false, false, true, false, false, true]);
	}

	#[test]
	fn test_timeout_one_fires_next_tick() {
		let state = TimerState::new();
		state.arm(1, 0);
		assert!(state.advance());
	}

	#[test]
	fn test_zero_timeout_stays_disarmed() {
		let state = TimerState::new();
		state.arm(0, 5);
		assert!(!state.advance());
		assert_eq!(state.load(), (0, 5));
	}

	#[test]
	fn test_disarm_keeps_interval() {
		let state = TimerState::new();
		state.arm(4, 7);
		state.advance();
		state.disarm();
		assert_eq!(state.load(), (0, 7));
		assert!(state.rearm());
		assert_eq!(state.load(), (7, 7));
	}

	#[test]
	fn test_rearm_without_interval() {
		let state = TimerState::new();
		state.arm(4, 0);
		state.disarm();
		assert!(!state.rearm());
		assert_eq!(state.load(), (0, 0));
	}

	#[test]
	fn test_full_width_counts() {
		let state = TimerState::new();
		state.arm(u32::MAX, u32::MAX);
		assert_eq!(state.load(), (u32::MAX, u32::MAX));
		assert!(!state.advance());
		assert_eq!(state.load(), (u32::MAX - 1, u32::MAX));
	}
}
