use std::env;
use std::path::PathBuf;

const DOTENV_PATH_VAR: &str = "IDASH_DOTENV";

/// Load `.env` from the working directory, then the file named by `$IDASH_DOTENV`
///
/// Returns the files that were loaded. Runs before logging is set up, so the caller
/// reports them.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }
    if let Ok(extra) = env::var(DOTENV_PATH_VAR) {
        let extra = PathBuf::from(extra);
        if dotenv::from_path(&extra).is_ok() {
            loaded.push(extra);
        }
    }
    loaded
}
