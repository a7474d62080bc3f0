//! fc-case: structured view over a solver case directory.
//!
//! A [`Case`] owns three directory views (`0/`, `constant/`, `system/`), each
//! holding one caching file handle per file, and wraps the solver-suite tools
//! that change case state (meshing, field initialisation, solving, time
//! listing, cloning).
//!
//! ```no_run
//! use fc_case::{Case, FoamConfig, Toolchain};
//!
//! let mut case = Case::open("cavity", Toolchain::system(FoamConfig::default())).unwrap();
//! case.system_mut()
//!     .control_dict_mut()
//!     .set("writeInterval", 0.01)
//!     .unwrap();
//! case.block_mesh().unwrap();
//! case.run_application().unwrap();
//! println!("finished: {}", case.is_finished().unwrap());
//! ```

pub mod case;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;

pub use case::Case;
pub use config::{FoamConfig, ToolNames, Toolchain};
pub use directory::{ConfigDir, Directory, FileHandle, InitialStateDir, PropertiesDir};
pub use error::{CaseError, CaseResult};
