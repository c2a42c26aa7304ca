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

//! Small branch-prediction hints used on the hot paths of claim contention
//! and cut expansion.

#[cold]
#[inline(never)]
pub const fn cold() {}

/// Hints that `b` is expected to be `true`.
pub const fn likely(b: bool) -> bool {
    if !b {
        cold()
    }
    b
}

/// Hints that `b` is expected to be `false`.
pub const fn unlikely(b: bool) -> bool {
    if b {
        cold()
    }
    b
}
