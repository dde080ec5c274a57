//! Error types for the autodiff engine.

use thiserror::Error;

/// Errors surfaced by graph construction.
///
/// The only input-validation failure in the engine is an unsupported
/// operation; numeric degradation (division by zero, overflow in `exp`) is
/// never an error and instead produces IEEE-754 special values that flow
/// through the graph silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
