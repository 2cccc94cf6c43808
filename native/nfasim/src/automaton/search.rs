//! Nondeterministic acceptance search over an automaton graph.

use crate::automaton::graph::AutomatonGraph;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, SymbolId};

/// One pending branch of the traversal: the state to enter, how much input
/// has been consumed, and the states this branch has entered through
/// epsilon edges since it last consumed a symbol. The visited set exists
/// solely to terminate epsilon cycles.
struct Frame {
    state: StateId,
    pos: usize,
    visited: StateSet,
}

/// Decide whether `graph` accepts `input`.
///
/// True iff some path from the start state consumes exactly `input` through
/// symbol edges, interleaved with any number of epsilon edges, and ends on
/// a final state. The traversal is an exhaustive depth-first search over an
/// explicit worklist, so input length and epsilon-chain length never hit
/// the call-stack limit. Every epsilon-only stretch of a branch is bounded
/// by the number of states, which guarantees termination for any
/// epsilon-cycle topology.
///
/// `decide` is a pure function of the graph and the input: the visited set
/// is constructed fresh for every call, and an undefined transition simply
/// ends a branch, so the search itself never errors.
pub fn decide(graph: &AutomatonGraph, input: &str) -> bool {
    // Input characters outside the alphabet resolve to no symbol, and
    // therefore to no edges.
    let symbols: Vec<Option<SymbolId>> = input
        .chars()
        .map(|c| graph.symbols().get_char(c))
        .collect();

    let mut worklist = vec![Frame {
        state: graph.start_state(),
        pos: 0,
        visited: StateSet::with_capacity(graph.num_states()),
    }];

    while let Some(Frame {
        state,
        pos,
        visited,
    }) = worklist.pop()
    {
        // Looped back to a state already entered without consuming input:
        // the branch is an epsilon cycle and is abandoned.
        if visited.contains(state) {
            continue;
        }

        let current = graph.state(state);
        if pos == symbols.len() && current.is_final() {
            return true;
        }

        // Epsilon branches keep the input position and extend the visited
        // set with the state being left.
        let epsilon_destinations = current.destinations_for(EPSILON);
        if !epsilon_destinations.is_empty() {
            let mut extended = visited;
            extended.insert(state);
            for &dest in epsilon_destinations {
                worklist.push(Frame {
                    state: dest,
                    pos,
                    visited: extended.clone(),
                });
            }
        }

        // Symbol branches consume the next input character; consuming
        // resets the epsilon cycle guard.
        if let Some(&Some(symbol)) = symbols.get(pos) {
            for &dest in current.destinations_for(symbol) {
                worklist.push(Frame {
                    state: dest,
                    pos: pos + 1,
                    visited: StateSet::with_capacity(graph.num_states()),
                });
            }
        }
    }

    false
}
