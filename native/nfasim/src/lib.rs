pub mod automaton;

use pyo3::prelude::*;

#[pymodule]
fn rustylib(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    let submodule = PyModule::new(py, "automaton")?;
    automaton::automaton(&submodule)?;

    // Register under the package path so `import nfasim.rustylib.automaton`
    // resolves the submodule directly.
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item("nfasim.rustylib.automaton", submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}
