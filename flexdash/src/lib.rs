#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc, clippy::doc_markdown)]

pub mod dashboard;
pub mod debounce;
pub mod settings;

pub use dashboard::*;
pub use debounce::*;
pub use settings::*;

use std::path::PathBuf;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref DATA_DIR: PathBuf = std::env::var("FLEXDASH_CONFIG_HOME").map_or_else(
        |_| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("flexdash")
        },
        PathBuf::from,
    );
    pub static ref SETTINGS_PATH: PathBuf = DATA_DIR.join("flexdash-settings.json");
}
