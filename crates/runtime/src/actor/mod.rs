// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Active objects.
//!
//! Every actor owns one OS thread and one bounded mailbox. Other code talks to it only by posting
//! messages through an [`ActorRef`]; the actor sees them one at a time, in order, on its own thread.

mod cell;
mod context;
pub(crate) mod mailbox;
mod message;
mod runner;
mod system;
mod traits;

pub use cell::{ActorCell, ActorHandle, JoinError};
pub use context::{CancellationToken, Context};
pub use mailbox::{ActorRef, Mailbox, RecvError};
pub use message::{INIT_SIGNAL, Message, QUIT_SIGNAL, USER_SIGNAL};
pub use system::ActorSystem;
pub use traits::{Actor, ActorFn, Flow};
