//! Shared helpers for tests that mutate process-wide state (env vars).

use std::env;
use std::ffi::OsString;
use std::sync::Mutex;

pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clears the given env vars for the duration of a test and restores the
/// previous values on drop.
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    pub fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::new();
        for &key in keys {
            saved.push((key.to_string(), env::var_os(key)));
            env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
        }
    }
}
