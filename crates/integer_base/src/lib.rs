/* 📖 # Why have integer_base as a core library?
integer_base provides the foundational error handling, tracing setup and platform abstraction
(file access and HTTP serving) used by the engine and the binary.
This keeps the sequence engine free of I/O and prevents circular dependencies between crates.
*/

pub mod error;
mod error_tests;
pub mod pal;
mod pal_tests;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, IntegerError, IntegerResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
