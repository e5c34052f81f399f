//! Library side of the `wdi-charts` CLI: logging setup and the pipeline
//! stages, exposed for integration tests.

pub mod logging;
pub mod pipeline;
pub mod types;
