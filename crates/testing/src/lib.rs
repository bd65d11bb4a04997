// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Aorta Developers

//! Test support for actor runtime crates.

pub mod probe;
pub mod util;
