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

//! Error taxonomy for the parts of the engine that have a legitimate,
//! recoverable failure mode. Claim contention and invariant violations are
//! *not* here: the former is a sentinel return value (an empty cut), the
//! latter is a programmer error and fails fast via `assert!`.

use core::fmt;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A bad configuration value, surfaced to the CLI rather than panicked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// worker count of zero was requested
    ZeroWorkers,
    /// queue depth of zero was requested
    ZeroQueueDepth,
    /// cut size limit of zero was requested
    ZeroCutSizeLimit,
    /// the config file could not be read
    Io(String),
    /// the config file could not be parsed as YAML
    Deserialize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "worker count must be at least 1"),
            Self::ZeroQueueDepth => write!(f, "queue depth must be at least 1"),
            Self::ZeroCutSizeLimit => write!(f, "cut size limit must be at least 1"),
            Self::Io(e) => write!(f, "failed to read config file: {e}"),
            Self::Deserialize(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Stops the netlist parser outright. Non-fatal problems go through the
/// caller's `DiagnosticSink` instead; this is reserved for conditions the
/// parser cannot recover line-by-line from, including a sink escalating a
/// diagnostic to `Fatal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// a line matched none of the four statement forms
    MalformedLine { line: usize, text: String },
    /// a sink escalated a diagnostic to `Severity::Fatal`
    Fatal { line: usize, message: String },
    /// the same name was bound twice
    DuplicateBinding { line: usize, name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line, text } => {
                write!(f, "line {line}: malformed statement: {text:?}")
            }
            Self::Fatal { line, message } => write!(f, "line {line}: fatal: {message}"),
            Self::DuplicateBinding { line, name } => {
                write!(f, "line {line}: {name:?} is already bound")
            }
        }
    }
}

impl std::error::Error for ParseError {}
