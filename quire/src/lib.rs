//! Library side of the `quire` binary. The site pipeline is exposed so the
//! integration tests and benchmarks can drive it without the CLI.
pub mod cli;
#[cfg(feature = "serve")]
pub mod serve;
pub mod site;
pub mod utils;
