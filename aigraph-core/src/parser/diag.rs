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

//! Diagnostics raised while reading netlist text. These never reach the
//! graph itself — undefined-reference handling is entirely the parser's
//! concern.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ignore,
    Note,
    Remark,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ignore => "ignore",
            Self::Note => "note",
            Self::Remark => "remark",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, line: usize) -> Self {
        Self {
            severity,
            message: message.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}: line {line}: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Receives diagnostics as the parser encounters them. A `Vec<Diagnostic>`
/// is the obvious sink for tests and simple callers; the CLI instead logs
/// each one at the matching `log` level.
///
/// `report` returns `true` if the parser should stop after the current
/// line as a result of this diagnostic — by convention, whenever its
/// severity is `Fatal`. A sink may escalate on other grounds too (e.g. a
/// caller that treats `Warning` as fatal in strict mode).
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic) -> bool;
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) -> bool {
        let stop = diagnostic.severity == Severity::Fatal;
        self.push(diagnostic);
        stop
    }
}

/// Logs every diagnostic at the `log` level matching its severity.
pub struct LoggingSink;

impl DiagnosticSink for LoggingSink {
    fn report(&mut self, diagnostic: Diagnostic) -> bool {
        let stop = diagnostic.severity == Severity::Fatal;
        match diagnostic.severity {
            Severity::Ignore => {}
            Severity::Note | Severity::Remark => debug!("{diagnostic}"),
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Error | Severity::Fatal => error!("{diagnostic}"),
        }
        stop
    }
}
