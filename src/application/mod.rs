//! Application layer: pipeline orchestration over the domain core.

pub mod compiler;
pub mod error;

pub use compiler::{CompileStats, CompiledKeys, KeyCompiler};
pub use error::{ApplicationError, ApplicationResult};
