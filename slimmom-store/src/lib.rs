pub mod file;
pub mod storage;

pub use file::FileStorage;
pub use storage::{load_json, save_json, Error, MemoryStorage, MockStorage, Result, Storage};

/// Key holding the last validated measurement record.
pub const PARAMS_KEY: &str = "params";
