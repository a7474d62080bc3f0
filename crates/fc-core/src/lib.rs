//! fc-core: stable foundation for foamcase.
//!
//! Contains:
//! - dimension (SI exponent vector carried by field files)
//! - entry (dotted entry paths addressing into dictionary files)
//! - process (the synchronous external-command boundary)
//! - error (shared error types)

pub mod dimension;
pub mod entry;
pub mod error;
pub mod process;

// Re-exports: nice ergonomics for downstream crates
pub use dimension::Dimension;
pub use entry::EntryPath;
pub use error::{CoreError, CoreResult};
pub use process::{CommandOutput, CommandRunner, Invocation, SystemRunner};
