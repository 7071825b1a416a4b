pub mod app;
pub mod config;
pub mod domain;
pub mod storage;
pub mod utils;

pub use app::control::{LibraryControl, MenuOption};
pub use config::CliConfig;
pub use domain::catalog::Library;
pub use domain::model::{Book, LibraryUser, Magazine, Publication};
pub use domain::ports::FileManager;
pub use storage::csv::CsvFileManager;
pub use utils::error::{LibraryError, Result};
