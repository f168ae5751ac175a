pub mod config;
pub mod error;
pub mod mount;
pub mod output;
pub mod translate;

pub use config::Config;
pub use error::{Result, WslPathError};
pub use mount::{FindmntSource, MountMapping, MountRecord, MountSource, StaticMounts};
pub use translate::{Direction, PathTranslator, convert_path, guess};
