// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Active-object runtime with tick-driven time events.
//!
//! - [`actor`]: actors, their bounded mailboxes and the dispatch loop
//! - [`time`]: time events, the registry servicing them once per tick, and the tick driver
//!
//! ```ignore
//! let system = ActorSystem::new(RuntimeConfig::default());
//! let blinky = ActorCell::new(Blinky::default()).start(&system, StartOptions::new(1u8, 10, 16 * 1024))?;
//!
//! let blink = system.time_event(BlinkMsg::Toggle, blinky.actor_ref())?;
//! blink.arm(100, 100);
//!
//! system.start_ticking()?;
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod actor;
pub mod config;
pub mod error;
pub mod time;

pub use actor::{Actor, ActorCell, ActorHandle, ActorRef, ActorSystem, Context, Flow, Message};
pub use config::{OverflowPolicy, Priority, RecvWait, RuntimeConfig, StartOptions};
pub use error::{Error, PostError, Result};
pub use time::{TickDriver, TickReport, TimeEvent, TimeEventRegistry};
