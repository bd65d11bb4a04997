// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! The message envelope delivered to [`Actor::dispatch`](super::Actor::dispatch).

/// Numeric signal of [`Message::Init`].
pub const INIT_SIGNAL: u16 = 0;

/// Numeric signal of [`Message::Quit`].
pub const QUIT_SIGNAL: u16 = 1;

/// First numeric signal available to applications. Every [`Message::User`] reports this value.
pub const USER_SIGNAL: u16 = 2;

/// A message as seen by an actor.
///
/// The two reserved variants belong to the framework; everything an application defines,
/// timer expirations included, travels as `User(M)` where `M` is the actor's own message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message<M> {
	/// Delivered exactly once, before any posted message.
	Init,
	/// Reserved for applications. The runtime never interprets it.
	Quit,
	/// An application message.
	User(M),
}

impl<M> Message<M> {
	/// Numeric signal for logging and interop with numbered signal schemes.
	pub fn signal(&self) -> u16 {
		match self {
			Message::Init => INIT_SIGNAL,
			Message::Quit => QUIT_SIGNAL,
			Message::User(_) => USER_SIGNAL,
		}
	}

	pub fn is_init(&self) -> bool {
		matches!(self, Message::Init)
	}

	pub fn is_quit(&self) -> bool {
		matches!(self, Message::Quit)
	}

	/// The application payload, if any.
	pub fn user(&self) -> Option<&M> {
		match self {
			Message::User(msg) => Some(msg),
			_ => None,
		}
	}

	pub fn into_user(self) -> Option<M> {
		match self {
			Message::User(msg) => Some(msg),
			_ => None,
		}
	}
}

impl<M> From<M> for Message<M> {
	fn from(msg: M) -> Self {
		Message::User(msg)
	}
}
