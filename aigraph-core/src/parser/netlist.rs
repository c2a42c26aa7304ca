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

//! A line-oriented textual netlist reader. Four statement kinds, one per
//! line; not a Verilog dialect, just enough grammar to exercise the graph
//! builder from a file. See `NetlistEvents` for the seam this drives.

use super::diag::{Diagnostic, DiagnosticSink, Severity};
use super::events::NetlistEvents;
use crate::error::{ParseError, ParseResult};
use std::collections::HashMap;

/// Parses `source` line by line, driving `events` and reporting problems to
/// `sink`. Stops early on a structurally unreadable line with no plausible
/// statement form, or as soon as `sink` escalates any diagnostic on the
/// current line (signaled by `DiagnosticSink::report` returning `true`,
/// the case `Severity::Fatal` is always escalated for).
pub fn parse<E, S>(source: &str, events: &mut E, sink: &mut S) -> ParseResult<()>
where
    E: NetlistEvents,
    S: DiagnosticSink,
{
    let mut bindings: HashMap<String, E::Signal> = HashMap::new();

    for (lineno, raw) in source.lines().enumerate() {
        let line_number = lineno + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("input ") {
            let name = rest.trim();
            let signal = events.create_pi();
            bind(&mut bindings, sink, line_number, name, signal)?;
            continue;
        }

        if let Some(rest) = line.strip_prefix("output ") {
            let name = rest.trim();
            let signal = resolve(&bindings, events, sink, line_number, name)?;
            events.create_po(signal);
            continue;
        }

        if let Some((lhs, rhs)) = line.split_once('=') {
            let lhs = lhs.trim();
            let rhs = rhs.trim();

            let signal = if let Some(inner) = rhs
                .strip_prefix("and(")
                .and_then(|s| s.strip_suffix(')'))
            {
                let Some((a_text, b_text)) = inner.split_once(',') else {
                    return Err(ParseError::MalformedLine {
                        line: line_number,
                        text: line.to_string(),
                    });
                };
                let a = resolve(&bindings, events, sink, line_number, a_text.trim())?;
                let b = resolve(&bindings, events, sink, line_number, b_text.trim())?;
                events.create_and(a, b)
            } else {
                resolve(&bindings, events, sink, line_number, rhs)?
            };

            bind(&mut bindings, sink, line_number, lhs, signal)?;
            continue;
        }

        return Err(ParseError::MalformedLine {
            line: line_number,
            text: line.to_string(),
        });
    }

    Ok(())
}

/// Reports `diagnostic` to `sink`; if the sink escalates it, stops parsing
/// after the current line by returning `ParseError::Fatal`.
fn report_or_stop<S: DiagnosticSink>(sink: &mut S, diagnostic: Diagnostic) -> ParseResult<()> {
    let line = diagnostic.line.unwrap_or(0);
    let message = diagnostic.message.clone();
    if sink.report(diagnostic) {
        return Err(ParseError::Fatal { line, message });
    }
    Ok(())
}

fn bind<E, S>(
    bindings: &mut HashMap<String, E::Signal>,
    sink: &mut S,
    line: usize,
    name: &str,
    signal: E::Signal,
) -> ParseResult<()>
where
    E: NetlistEvents,
    S: DiagnosticSink,
{
    if bindings.insert(name.to_string(), signal).is_some() {
        report_or_stop(
            sink,
            Diagnostic::new(
                Severity::Warning,
                format!("{name:?} rebound, previous binding shadowed"),
                line,
            ),
        )?;
    }
    Ok(())
}

/// Resolves a (possibly `~`-prefixed) reference against `bindings`. An
/// undefined name is reported at `Severity::Error` and bound to constant-0
/// so the rest of the file still parses, unless the sink escalates it.
fn resolve<E, S>(
    bindings: &HashMap<String, E::Signal>,
    events: &mut E,
    sink: &mut S,
    line: usize,
    text: &str,
) -> ParseResult<E::Signal>
where
    E: NetlistEvents,
    S: DiagnosticSink,
{
    let (negated, name) = match text.strip_prefix('~') {
        Some(rest) => (true, rest.trim()),
        None => (false, text),
    };

    let signal = match bindings.get(name) {
        Some(&signal) => signal,
        None => {
            report_or_stop(
                sink,
                Diagnostic::new(
                    Severity::Error,
                    format!("undefined reference {name:?}, bound to constant-0"),
                    line,
                ),
            )?;
            events.constant(false)
        }
    };

    Ok(if negated { events.negate(signal) } else { signal })
}
