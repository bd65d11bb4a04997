// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Tick-driven time events.
//!
//! This module provides timer functionality for posting messages to actors:
//! - [`TimeEvent`]: A countdown plus reload interval bound to one actor and one message
//! - [`TimeEventRegistry`]: The fixed-capacity table serviced once per tick
//! - [`TickDriver`]: A thread calling [`TimeEventRegistry::tick`] at a fixed period
//!
//! Timeouts are counted in ticks; there is no sub-tick resolution.

mod driver;
mod event;
mod registry;

pub use driver::TickDriver;
pub use event::TimeEvent;
pub use registry::{TickReport, TimeEventRegistry};
