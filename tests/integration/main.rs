//! Integration test harness.
//!
//! Each submodule under `tests/integration/` covers one slice of the
//! crate; shared setup lives in `helpers`.

mod helpers;

mod cli_test;
mod parser_test;
mod render_test;
mod store_test;
