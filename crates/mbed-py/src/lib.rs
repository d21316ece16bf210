//! PyO3 bindings for the `mbed` refiner.
//!
//! Notes
//! - Keep bindings thin: plain lists and tuples in, plain lists out. NumPy
//!   conversion happens in the Python wrapper.

use pyo3::prelude::*;

mod common;
mod refine;

#[pymodule]
fn mbed_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", mbed::VERSION)?;
    refine::register(m)?;
    Ok(())
}
