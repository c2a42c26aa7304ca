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

//! End-to-end tests that exercise the whole vertical slice: text in,
//! worker pool out. Unit behavior for each module lives beside that
//! module; this is the glue that proves they cooperate.

use crate::aig::Aig;
use crate::cut::{create_cut, release_cut};
use crate::parser::parse;
use crate::sync::pool::WorkerPool;
use std::sync::{Arc, Mutex};

fn ripple_carry_netlist(bits: usize) -> String {
    let mut src = String::new();
    for i in 0..bits {
        src.push_str(&format!("input a{i}\ninput b{i}\n"));
    }
    src.push_str("input cin\n");
    let mut carry = "cin".to_string();
    for i in 0..bits {
        src.push_str(&format!("t{i} = and(a{i}, b{i})\n"));
        src.push_str(&format!("x{i} = and(a{i}, {carry})\n"));
        src.push_str(&format!("y{i} = and(b{i}, {carry})\n"));
        src.push_str(&format!("s{i} = and(~t{i}, ~x{i})\n"));
        carry = format!("t{i}");
    }
    src
}

#[test]
fn parses_and_builds_a_ripple_carry_adder() {
    let source = ripple_carry_netlist(8);
    let mut aig = Aig::new();
    let mut diags = Vec::new();
    parse(&source, &mut aig, &mut diags).unwrap();
    assert!(diags.is_empty());
    assert_eq!(aig.pi_count(), 17); // 8 a, 8 b, 1 cin
}

/// Every AND node of a moderately large graph gets claimed by exactly one
/// worker's cut request, concurrently, across a real worker pool.
#[test]
fn worker_pool_drives_cut_enumeration_without_double_claims() {
    let mut aig = Aig::new();
    let mut prev = aig.create_pi();
    for _ in 0..200 {
        let next_pi = aig.create_pi();
        prev = aig.create_and(prev, next_pi);
    }
    let aig = Arc::new(aig);

    let and_nodes: Vec<u32> = {
        let mut v = Vec::new();
        aig.foreach_node(|n| {
            if !aig.is_constant(n) && !aig.is_pi(n) {
                v.push(n);
            }
        });
        v
    };

    let pool = WorkerPool::new(6, 32);
    let claimed = Arc::new(Mutex::new(Vec::new()));

    for &n in &and_nodes {
        let aig = aig.clone();
        let claimed = claimed.clone();
        pool.submit(move |thread_id| {
            let cut = create_cut(&aig, n, thread_id, 6);
            if !cut.is_empty() {
                claimed.lock().unwrap().push(n);
                release_cut(&aig, n, thread_id);
            }
        });
    }
    drop(pool);

    let mut claimed = claimed.lock().unwrap().clone();
    claimed.sort_unstable();
    let mut expected = and_nodes.clone();
    expected.sort_unstable();
    assert_eq!(claimed, expected, "every AND node should have been claimable");

    aig.foreach_node(|n| assert_eq!(aig.mark(n), 0, "node {n} leaked a claim"));
}
