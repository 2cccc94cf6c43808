//! State types for automata.

use crate::automaton::symbol::SymbolId;
use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A single automaton state: its name, start/final flags, and the outgoing
/// transition table.
///
/// The transition table maps each symbol to the ordered list of destination
/// states reachable on it. A symbol may have any number of destinations
/// (nondeterminism); symbols are not checked against the alphabet here,
/// membership is settled once at graph-build time.
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    is_start: bool,
    is_final: bool,
    transitions: IndexMap<SymbolId, Vec<StateId>>,
}

impl State {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_start: false,
            is_final: false,
            transitions: IndexMap::new(),
        }
    }

    /// The state's name as declared in the description.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the designated start state.
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    /// Whether this state accepts when input is exhausted on it.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn mark_start(&mut self) {
        self.is_start = true;
    }

    pub(crate) fn mark_final(&mut self) {
        self.is_final = true;
    }

    /// Register one nondeterministic edge, appending to the destination
    /// list for `symbol` or creating it on first use.
    pub(crate) fn add_transition(&mut self, symbol: SymbolId, destination: StateId) {
        self.transitions.entry(symbol).or_default().push(destination);
    }

    /// Destinations reachable on `symbol`; the empty slice when no edge
    /// exists, never a sentinel.
    pub fn destinations_for(&self, symbol: SymbolId) -> &[StateId] {
        self.transitions.get(&symbol).map_or(&[], Vec::as_slice)
    }

    /// Iterate over the transition table in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (SymbolId, &[StateId])> + '_ {
        self.transitions
            .iter()
            .map(|(&symbol, destinations)| (symbol, destinations.as_slice()))
    }
}

/// A set of states implemented using a fixed-size bit set for efficiency.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}
