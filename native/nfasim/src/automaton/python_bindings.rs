//! PyO3 bindings for the automaton module.
//!
//! Exposes graph construction and the acceptance decision to Python; the
//! description-file parsing and batch input handling stay on the Python
//! side.

use crate::automaton::graph::{AutomatonGraph, ConstructionError};
use crate::automaton::search;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<ConstructionError> for PyErr {
    fn from(err: ConstructionError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// An immutable epsilon-NFA.
#[pyclass(name = "Automaton", module = "nfasim.rustylib.automaton", frozen)]
pub struct PyAutomaton {
    graph: AutomatonGraph,
}

#[pymethods]
impl PyAutomaton {
    /// Build an automaton from its description: declared states, declared
    /// alphabet (epsilon `@` is always included), start state name, final
    /// state names, and `(from, symbol, to)` transition rules.
    ///
    /// Raises `ValueError` when a named state does not exist.
    #[new]
    fn py_new(
        state_names: Vec<String>,
        alphabet_symbols: Vec<String>,
        start_name: &str,
        final_names: Vec<String>,
        rules: Vec<(String, String, String)>,
    ) -> PyResult<Self> {
        let state_names: Vec<&str> = state_names.iter().map(String::as_str).collect();
        let alphabet_symbols: Vec<&str> = alphabet_symbols.iter().map(String::as_str).collect();
        let final_names: Vec<&str> = final_names.iter().map(String::as_str).collect();
        let rules: Vec<(&str, &str, &str)> = rules
            .iter()
            .map(|(from, symbol, to)| (from.as_str(), symbol.as_str(), to.as_str()))
            .collect();

        let graph = AutomatonGraph::build(
            &state_names,
            &alphabet_symbols,
            start_name,
            &final_names,
            &rules,
        )?;
        Ok(Self { graph })
    }

    /// True iff the automaton accepts `input`.
    fn decide(&self, input: &str) -> bool {
        search::decide(&self.graph, input)
    }

    /// True iff the automaton accepts no string at all.
    fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.graph.num_states()
    }

    #[getter]
    fn start_state(&self) -> String {
        self.graph.state(self.graph.start_state()).name().to_owned()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, start={:?}, finals={})",
            self.graph.num_states(),
            self.graph.state(self.graph.start_state()).name(),
            self.graph.final_states().len()
        )
    }

    fn __str__(&self) -> String {
        self.graph.to_string()
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    Ok(())
}
