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

//! The interface between the netlist parser and whatever builds a graph
//! from it. Plain trait dispatch rather than boxed callbacks, so a test
//! double can record events without depending on `Aig` at all.

use crate::aig::{Aig, Signal};

pub trait NetlistEvents {
    type Signal: Copy;

    fn create_pi(&mut self) -> Self::Signal;
    fn create_and(&mut self, a: Self::Signal, b: Self::Signal) -> Self::Signal;
    fn create_po(&mut self, s: Self::Signal);
    fn negate(&mut self, s: Self::Signal) -> Self::Signal;
    /// The constant signal an undefined reference is bound to, so one bad
    /// line doesn't stop the rest of the file from parsing.
    fn constant(&self, value: bool) -> Self::Signal;
}

impl NetlistEvents for Aig {
    type Signal = Signal;

    fn create_pi(&mut self) -> Signal {
        Aig::create_pi(self)
    }

    fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        Aig::create_and(self, a, b)
    }

    fn create_po(&mut self, s: Signal) {
        Aig::create_po(self, s)
    }

    fn negate(&mut self, s: Signal) -> Signal {
        s.negate()
    }

    fn constant(&self, value: bool) -> Signal {
        Aig::get_constant(value)
    }
}
