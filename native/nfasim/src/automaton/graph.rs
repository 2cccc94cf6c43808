//! The automaton graph: state arena, alphabet, start and final designation.

use crate::automaton::state::{State, StateId, StateSet};
use crate::automaton::symbol::{EPSILON, EPSILON_TOKEN, SymbolTable, is_epsilon};
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

/// Errors raised while building an automaton graph from a description.
///
/// All of these are fatal to the build; the caller must fix the description
/// and rebuild. Simulation itself never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The designated start state is not among the declared states.
    UnknownStartState(String),
    /// A designated final state is not among the declared states.
    UnknownFinalState(String),
    /// A transition rule references an undeclared state.
    UnknownTransitionEndpoint(String),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStartState(name) => {
                write!(f, "start state `{name}` is not a declared state")
            }
            Self::UnknownFinalState(name) => {
                write!(f, "final state `{name}` is not a declared state")
            }
            Self::UnknownTransitionEndpoint(name) => {
                write!(f, "transition endpoint `{name}` is not a declared state")
            }
        }
    }
}

impl Error for ConstructionError {}

/// A nondeterministic finite automaton with epsilon transitions.
///
/// States live in a fixed arena and reference each other by `StateId`, so
/// lookup is O(1) and the graph has no interior reference cycles. The graph
/// is immutable once built; rebuilding replaces it wholesale. Deciding
/// inputs against a shared graph from several threads needs no locking.
#[derive(Debug, Clone)]
pub struct AutomatonGraph {
    states: Vec<State>,
    names: IndexMap<String, StateId>,
    symbols: SymbolTable,
    start: StateId,
}

impl AutomatonGraph {
    /// Build a graph from a description.
    ///
    /// Creates one state per name in `state_names` (duplicates collapse to
    /// one state), interns the declared alphabet (epsilon is a member
    /// regardless of the description), marks the start and final states,
    /// and registers every `(from, symbol, to)` rule. Rule symbols outside
    /// the declared alphabet are tolerated and interned on first use;
    /// unresolved state names are not.
    pub fn build(
        state_names: &[&str],
        alphabet_symbols: &[&str],
        start_name: &str,
        final_names: &[&str],
        rules: &[(&str, &str, &str)],
    ) -> Result<Self, ConstructionError> {
        let mut names: IndexMap<String, StateId> = IndexMap::with_capacity(state_names.len());
        let mut states: Vec<State> = Vec::with_capacity(state_names.len());
        for &name in state_names {
            if !names.contains_key(name) {
                names.insert(name.to_owned(), states.len() as StateId);
                states.push(State::new(name));
            }
        }

        let mut symbols = SymbolTable::new();
        for &symbol in alphabet_symbols {
            symbols.intern(symbol);
        }

        let start = *names
            .get(start_name)
            .ok_or_else(|| ConstructionError::UnknownStartState(start_name.to_owned()))?;
        states[start as usize].mark_start();

        for &name in final_names {
            let id = *names
                .get(name)
                .ok_or_else(|| ConstructionError::UnknownFinalState(name.to_owned()))?;
            states[id as usize].mark_final();
        }

        for (from, symbol, to) in rules {
            let from_id = *names
                .get(*from)
                .ok_or_else(|| ConstructionError::UnknownTransitionEndpoint((*from).to_owned()))?;
            let to_id = *names
                .get(*to)
                .ok_or_else(|| ConstructionError::UnknownTransitionEndpoint((*to).to_owned()))?;
            let symbol_id = symbols.intern(symbol);
            states[from_id as usize].add_transition(symbol_id, to_id);
        }

        Ok(Self {
            states,
            names,
            symbols,
            start,
        })
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// The designated start state.
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// Borrow a state by id.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    /// Resolve a state id by its declared name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// The symbol table; epsilon is always a member.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Ids of all final states.
    pub fn final_states(&self) -> StateSet {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_final())
            .map(|(id, _)| id as StateId)
            .collect()
    }

    /// Compute the set of states reachable from `state` using only epsilon
    /// edges, `state` itself included. Iterative DFS.
    pub fn epsilon_closure(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if closure.contains(s) {
                continue;
            }
            closure.insert(s);

            for &dest in self.state(s).destinations_for(EPSILON) {
                if !closure.contains(dest) {
                    stack.push(dest);
                }
            }
        }

        closure
    }

    /// Check if the automaton accepts any string at all (i.e., whether the
    /// language is non-empty). BFS from the start closure following symbol
    /// edges through their epsilon closures.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue: VecDeque<StateId> = self.epsilon_closure(self.start).iter().collect();

        while let Some(state) = queue.pop_front() {
            if visited.contains(state) {
                continue;
            }
            visited.insert(state);

            if self.state(state).is_final() {
                return false;
            }

            for (symbol, destinations) in self.state(state).transitions() {
                if is_epsilon(symbol) {
                    continue;
                }
                for &dest in destinations {
                    for next in self.epsilon_closure(dest).iter() {
                        if !visited.contains(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        true
    }
}

impl fmt::Display for AutomatonGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States:")?;
        for state in &self.states {
            write!(
                f,
                "  Name: {}, Start: {}, Final: {}, Rules:",
                state.name(),
                state.is_start(),
                state.is_final()
            )?;
            let mut first = true;
            for (symbol, destinations) in state.transitions() {
                for &dest in destinations {
                    let sep = if first { " " } else { ", " };
                    first = false;
                    write!(
                        f,
                        "{sep}{}:{}",
                        self.symbols.text(symbol).unwrap_or("?"),
                        self.state(dest).name()
                    )?;
                }
            }
            writeln!(f)?;
        }
        let mut alphabet = vec![EPSILON_TOKEN];
        alphabet.extend(self.symbols.iter().map(|(text, _)| text));
        write!(f, "Alphabet: {{{}}}", alphabet.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> AutomatonGraph {
        AutomatonGraph::build(
            &["S", "M", "F"],
            &["a", "b"],
            "S",
            &["F"],
            &[("S", "a", "M"), ("M", "b", "F")],
        )
        .unwrap()
    }

    #[test]
    fn test_build_basic() {
        let graph = sample_graph();

        assert_eq!(graph.num_states(), 3);
        assert_eq!(graph.start_state(), graph.state_id("S").unwrap());
        assert!(graph.state(graph.start_state()).is_start());
        assert!(graph.state(graph.state_id("F").unwrap()).is_final());
        assert!(!graph.state(graph.state_id("M").unwrap()).is_final());
        assert_eq!(graph.final_states().len(), 1);
    }

    #[test]
    fn test_build_duplicate_names_collapse() {
        let graph = AutomatonGraph::build(&["A", "A", "B"], &["x"], "A", &["B"], &[]).unwrap();
        assert_eq!(graph.num_states(), 2);
    }

    #[test]
    fn test_unknown_start_state() {
        let err = AutomatonGraph::build(&["A"], &["x"], "Z", &[], &[]).unwrap_err();
        assert_eq!(err, ConstructionError::UnknownStartState("Z".to_owned()));
    }

    #[test]
    fn test_unknown_final_state() {
        let err = AutomatonGraph::build(&["A"], &["x"], "A", &["Z"], &[]).unwrap_err();
        assert_eq!(err, ConstructionError::UnknownFinalState("Z".to_owned()));
    }

    #[test]
    fn test_unknown_transition_endpoint() {
        let err = AutomatonGraph::build(&["A"], &["x"], "A", &[], &[("A", "x", "Z")]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::UnknownTransitionEndpoint("Z".to_owned())
        );

        let err = AutomatonGraph::build(&["A"], &["x"], "A", &[], &[("Z", "x", "A")]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::UnknownTransitionEndpoint("Z".to_owned())
        );
    }

    #[test]
    fn test_undeclared_rule_symbol_tolerated() {
        // `c` is not in the declared alphabet; the rule still registers.
        let graph =
            AutomatonGraph::build(&["A", "B"], &["a"], "A", &["B"], &[("A", "c", "B")]).unwrap();
        let c = graph.symbols().get("c").unwrap();
        assert_eq!(
            graph.state(graph.start_state()).destinations_for(c),
            &[graph.state_id("B").unwrap()]
        );
    }

    #[test]
    fn test_epsilon_closure_chain() {
        // A -ε-> B -ε-> C
        let graph = AutomatonGraph::build(
            &["A", "B", "C"],
            &["x"],
            "A",
            &[],
            &[("A", "@", "B"), ("B", "@", "C")],
        )
        .unwrap();

        let closure = graph.epsilon_closure(graph.start_state());
        assert_eq!(closure.len(), 3);
        assert!(closure.contains(graph.state_id("A").unwrap()));
        assert!(closure.contains(graph.state_id("B").unwrap()));
        assert!(closure.contains(graph.state_id("C").unwrap()));
    }

    #[test]
    fn test_epsilon_closure_cycle() {
        let graph = AutomatonGraph::build(
            &["A", "B"],
            &["x"],
            "A",
            &[],
            &[("A", "@", "B"), ("B", "@", "A")],
        )
        .unwrap();

        let closure = graph.epsilon_closure(graph.start_state());
        assert_eq!(closure.len(), 2);
    }

    #[test]
    fn test_is_empty() {
        // No path from start to the final state.
        let graph = AutomatonGraph::build(&["A", "B"], &["x"], "A", &["B"], &[]).unwrap();
        assert!(graph.is_empty());

        let graph =
            AutomatonGraph::build(&["A", "B"], &["x"], "A", &["B"], &[("A", "x", "B")]).unwrap();
        assert!(!graph.is_empty());

        // Final state only reachable through an epsilon edge.
        let graph =
            AutomatonGraph::build(&["A", "B"], &["x"], "A", &["B"], &[("A", "@", "B")]).unwrap();
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_display() {
        let rendered = sample_graph().to_string();
        assert!(rendered.contains("Name: S, Start: true, Final: false, Rules: a:M"));
        assert!(rendered.contains("Alphabet: {@, a, b}"));
    }
}
