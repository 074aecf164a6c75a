//! # projj-deck-core
//!
//! Read-only access to the state that `projj` keeps under `~/.projj`:
//! - [`ConfigReader`] loads the base directories, aliases and hooks
//! - [`CacheReader`] loads the managed projects, accepting both cache layouts
//!   the manager has written over time
//! - [`ManagerPaths`] resolves where those files live
//!
//! Nothing here spawns processes or writes files. Every read produces a
//! fresh snapshot.
//!
//! # Examples
//!
//! ```no_run
//! use projj_deck_core::{CacheReader, ManagerPaths};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = ManagerPaths::discover()?;
//! match CacheReader::new(&paths).load() {
//!     Some(projects) => println!("{} projects", projects.len()),
//!     None => println!("no readable cache"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use cache::{normalize_cache, CacheReader, RESERVED_CACHE_KEYS};
pub use config::ConfigReader;
pub use error::{Error, Result};
pub use paths::{get_home_dir, ManagerPaths, CLONE_SCRIPT_NAME, MANAGER_NAME};
pub use types::{InstallationStatus, ManagedProject, ManagerConfig};
