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

use aigraph_core::error::{ConfigError, ParseError};
use std::fmt;
use std::io;

pub type CliResult<T> = Result<T, CliError>;

/// Top-level CLI error, composing the core crate's taxonomies with the
/// errors that only make sense at the command-line boundary.
pub enum CliError {
    Config(ConfigError),
    Parse(ParseError),
    Io(io::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Parse(e) => write!(f, "netlist parse error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}
