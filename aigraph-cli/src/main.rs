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

use aigraph_core::aig::Aig;
use aigraph_core::config::Configuration;
use aigraph_core::cut::{create_cut, release_cut};
use aigraph_core::parser::{parse, LoggingSink};
use aigraph_core::sync::pool::WorkerPool;
use clap::Parser;
use env_logger::Builder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::{env, process};

#[macro_use]
extern crate log;

mod cli;
mod error;

use cli::Cli;
use error::CliResult;

fn main() {
    Builder::new()
        .parse_filters(&env::var("AIGRAPH_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    if let Err(e) = run() {
        error!("aigraph exited with error: {e}");
        process::exit(0x01);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = Configuration::load(cli.config.as_deref(), cli.overrides())?;
    info!(
        "configuration: workers={} queue_depth={} cut_size_limit={}",
        config.workers, config.queue_depth, config.cut_size_limit
    );

    let source = std::fs::read_to_string(&cli.netlist)?;
    let mut aig = Aig::new();
    let mut sink = LoggingSink;
    parse(&source, &mut aig, &mut sink)?;
    info!(
        "loaded netlist: {} nodes, {} PIs, {} outputs",
        aig.node_count(),
        aig.pi_count(),
        aig.outputs().len()
    );

    let and_nodes: Vec<u32> = {
        let mut v = Vec::new();
        aig.foreach_node(|n| {
            if !aig.is_constant(n) && !aig.is_pi(n) {
                v.push(n);
            }
        });
        v
    };

    let aig = Arc::new(aig);
    let pool = WorkerPool::new(config.workers, config.queue_depth);
    let cuts_found = Arc::new(AtomicUsize::new(0));
    let total_leaves = Arc::new(AtomicUsize::new(0));
    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    for n in and_nodes {
        let aig = aig.clone();
        let cuts_found = cuts_found.clone();
        let total_leaves = total_leaves.clone();
        let errors = errors.clone();
        pool.submit(move |thread_id| {
            let cut = create_cut(&aig, n, thread_id, config.cut_size_limit);
            if cut.is_empty() {
                errors
                    .lock()
                    .unwrap()
                    .push(format!("n{n} could not be claimed"));
                return;
            }
            cuts_found.fetch_add(1, Ordering::SeqCst);
            total_leaves.fetch_add(cut.len(), Ordering::SeqCst);
            release_cut(&aig, n, thread_id);
        });
    }
    drop(pool);

    let found = cuts_found.load(Ordering::SeqCst);
    let leaves = total_leaves.load(Ordering::SeqCst);
    for message in errors.lock().unwrap().iter() {
        warn!("{message}");
    }
    println!("cuts enumerated: {found}");
    if found > 0 {
        println!("average cut width: {:.2}", leaves as f64 / found as f64);
    }

    Ok(())
}
