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

use aigraph_core::config::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"#;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, help_template = HELP_TEMPLATE)]
pub struct Cli {
    /// Netlist file to load.
    #[arg(value_name = "NETLIST")]
    pub netlist: PathBuf,

    /// Optional YAML config file (defaults < file < these flags).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of worker threads to enumerate cuts with.
    #[arg(long, value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Bounded task queue depth.
    #[arg(long = "queue-depth", value_name = "DEPTH")]
    pub queue_depth: Option<usize>,

    /// Target cut width.
    #[arg(long = "cut-limit", value_name = "SIZE")]
    pub cut_limit: Option<usize>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workers: self.workers,
            queue_depth: self.queue_depth,
            cut_size_limit: self.cut_limit,
        }
    }
}
