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

//! Reads a line-oriented netlist text format into an AIG via the
//! [`NetlistEvents`] seam, surfacing malformed or undefined input through
//! a caller-supplied [`DiagnosticSink`].

mod diag;
mod events;
mod netlist;

pub use diag::{Diagnostic, DiagnosticSink, LoggingSink, Severity};
pub use events::NetlistEvents;
pub use netlist::parse;
