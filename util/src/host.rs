//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the root of the software checkout.
pub const SW_ROOT_ENV_VAR: &str = "ROUTE_SW_ROOT";

/// Get the root directory of the software.
///
/// Read from `ROUTE_SW_ROOT`, falling back to the current working directory
/// when the variable isn't set.
pub fn get_sw_root() -> std::io::Result<PathBuf> {
    match env::var_os(SW_ROOT_ENV_VAR) {
        Some(r) => Ok(PathBuf::from(r)),
        None => env::current_dir()
    }
}
