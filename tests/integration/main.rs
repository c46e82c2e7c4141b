//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem against
//! mock adapters.  All tests run on the host with no GPIO chip required.

mod mock_hw;
mod pipeline_tests;
mod trace_tests;
