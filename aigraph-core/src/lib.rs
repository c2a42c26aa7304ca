/*
 * This file is part of aigraph, a concurrent engine for exploring
 * And-Inverter Graphs.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! # aigraph-core
//!
//! A concurrent store for And-Inverter Graphs (AIGs) and the cut-enumeration
//! engine that walks them. See `aig` for the graph itself, `cut` for the
//! expansion algorithm, `sync` for the concurrency substrate that lets many
//! worker threads enumerate cuts in parallel, and `parser`/`config` for the
//! ambient machinery that feeds a graph from netlist text.

#[macro_use]
extern crate log;

pub mod aig;
pub mod compiler;
pub mod config;
pub mod cut;
pub mod error;
pub mod mem;
pub mod parser;
pub mod sync;

#[cfg(test)]
mod tests;

pub use aig::{Aig, Signal};
pub use cut::{create_cut, release_cut, Cut};
