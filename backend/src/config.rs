//! Server configuration, read from the environment with built-in defaults.
//!
//! - `ROLLCALL_HOST` / `ROLLCALL_PORT`: bind address of the HTTP server.
//! - `ROLLCALL_DB`: path of the SQLite database file.

use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_FILE: &str = "rollcall.sqlite";

pub fn host() -> String {
    env::var("ROLLCALL_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string())
}

pub fn port() -> u16 {
    env::var("ROLLCALL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn db_path() -> PathBuf {
    env::var("ROLLCALL_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE))
}
