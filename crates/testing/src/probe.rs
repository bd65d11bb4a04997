// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Dispatch probes.
//!
//! A [`Recorder`] is an actor that logs every message it is dispatched; its [`Probe`] reads that log
//! from the test thread. A [`Gate`] holds the recorder inside its INIT dispatch until the test opens
//! it, so messages can be posted against a mailbox nobody drains yet.

use std::sync::Arc;

use aorta_runtime::{Actor, Context, Flow, Message};
use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;

use crate::util::wait::wait_for;

type Log<M> = Arc<Mutex<Vec<Message<M>>>>;

/// Actor recording every dispatched message. Stops on [`Message::Quit`].
pub struct Recorder<M> {
	log: Log<M>,
	gate: Option<Gate>,
}

/// Read side of a [`Recorder`].
pub struct Probe<M> {
	log: Log<M>,
}

/// Create a recorder and the probe observing it.
pub fn recorder<M>() -> (Recorder<M>, Probe<M>) {
	let log: Log<M> = Arc::new(Mutex::new(Vec::new()));
	(
		Recorder {
			log: log.clone(),
			gate: None,
		},
		Probe {
			log,
		},
	)
}

impl<M> Recorder<M> {
	/// Block in the INIT dispatch until `gate` opens.
	pub fn gated(mut self, gate: Gate) -> Self {
		self.gate = Some(gate);
		self
	}
}

impl<M: Send + 'static> Actor for Recorder<M> {
	type Message = M;

	fn dispatch(&mut self, msg: Message<M>, _ctx: &Context<M>) -> Flow {
		let quit = msg.is_quit();
		let init = msg.is_init();
		self.log.lock().push(msg);

		if init {
			if let Some(gate) = self.gate.take() {
				gate.wait();
			}
		}

		if quit {
			Flow::Stop
		} else {
			Flow::Continue
		}
	}
}

impl<M: Clone> Probe<M> {
	/// Every message dispatched so far, in dispatch order.
	pub fn messages(&self) -> Vec<Message<M>> {
		self.log.lock().clone()
	}

	/// Application payloads dispatched so far, in dispatch order.
	pub fn users(&self) -> Vec<M> {
		self.log.lock().iter().filter_map(|msg| msg.user().cloned()).collect()
	}
}

impl<M> Probe<M> {
	pub fn len(&self) -> usize {
		self.log.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Wait until at least `count` messages, INIT included, have been dispatched.
	pub fn wait_for_len(&self, count: usize) {
		wait_for(|| self.len() >= count, &format!("expected {} dispatched messages", count));
	}
}

/// Holds a dispatch until the matching [`GateKey`] opens it.
pub struct Gate {
	rx: Receiver<()>,
}

/// Opens a [`Gate`]. Dropping the key opens it as well.
pub struct GateKey {
	tx: Sender<()>,
}

pub fn gate() -> (Gate, GateKey) {
	let (tx, rx) = bounded(1);
	(
		Gate {
			rx,
		},
		GateKey {
			tx,
		},
	)
}

impl Gate {
	fn wait(self) {
		let _ = self.rx.recv();
	}
}

impl GateKey {
	pub fn open(self) {
		let _ = self.tx.send(());
	}
}
