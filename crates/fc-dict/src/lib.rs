//! fc-dict: typed access to solver dictionary files.
//!
//! Provides:
//! - `DictionaryTool`, the seam every read/write/delete goes through
//! - `FoamDictionary`, the backend that runs the solver's `foamDictionary`
//! - `MemoryDictionary`, an in-process backend for tests and dry runs
//! - `DictView`/`Node`, read-only snapshots with dotted-path lookup
//! - `DictFile` and `FieldFile`, the caching file handles
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fc_dict::{DictFile, FoamDictionary};
//!
//! let tool = Arc::new(FoamDictionary::default());
//! let mut fv_solution = DictFile::open("cavity/system/fvSolution", tool).unwrap();
//! let solver = fv_solution.get("solvers.p.solver").unwrap();
//! println!("p solver: {solver}");
//! fv_solution.set("solvers.p.solver", "GAMG").unwrap();
//! ```

pub mod error;
pub mod field;
pub mod file;
pub mod foam_dictionary;
pub mod memory;
pub mod query;
pub mod view;

// Re-exports for ergonomics
pub use error::{DictError, DictResult};
pub use field::FieldFile;
pub use file::DictFile;
pub use foam_dictionary::FoamDictionary;
pub use memory::MemoryDictionary;
pub use query::{DictionaryTool, Query, QueryMode};
pub use view::{DictView, Node};
