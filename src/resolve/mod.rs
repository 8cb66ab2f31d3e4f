//! Weather and location resolution.
//!
//! Both resolvers walk an ordered list of sources and stop at the first one
//! that yields a plausible value. A source that fails, times out, or replies
//! with something that looks like an error page is skipped silently.
//!
//! # Module Structure
//!
//! - `weather`: weather text service queries and the manual-entry fallback
//! - `location`: GPS helper, configured default and operator override

pub mod location;
pub mod weather;

pub use location::{
    select_location_provider, DefaultProvider, GpsHelperProvider, LocationProvider,
    OverrideProvider,
};
pub use weather::{CurlWeatherSource, WeatherFormat, WeatherQuery, WeatherResolver, WeatherSource};

use crate::constants;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// True when `value` is usable as a weather line from an automatic source.
///
/// The value must be non-empty, at most 100 characters, and free of the
/// error markers a weather service puts in failure replies.
pub fn is_valid_weather(value: &str) -> bool {
    passes_checks(
        value,
        constants::MAX_WEATHER_LEN,
        constants::WEATHER_ERROR_INDICATORS,
    )
}

/// True when `value` is usable as a location from the GPS helper.
pub fn is_valid_location(value: &str) -> bool {
    passes_checks(
        value,
        constants::MAX_LOCATION_LEN,
        constants::LOCATION_ERROR_INDICATORS,
    )
}

fn passes_checks(value: &str, max_len: usize, indicators: &[&str]) -> bool {
    if value.is_empty() || value.chars().count() > max_len {
        return false;
    }
    let lowered = value.to_lowercase();
    !indicators.iter().any(|marker| lowered.contains(marker))
}

/// Runs `program` with `args`, giving up after `timeout`.
///
/// Returns trimmed standard output when the process exits with status 0.
/// Spawn failures, non-zero exits and timeouts all yield `None`; a process
/// that overruns its timeout is killed and reaped.
pub fn run_with_timeout<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    timeout: Duration,
) -> Option<String> {
    let program = program.as_ref();
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(error) => {
            debug!(program = ?program, error = %error, "spawn failed");
            return None;
        }
    };

    match child.wait_timeout(timeout) {
        Ok(Some(status)) if status.success() => {
            let mut output = String::new();
            let read = child
                .stdout
                .take()
                .map(|mut stream| stream.read_to_string(&mut output));
            match read {
                Some(Ok(_)) => Some(output.trim().to_string()),
                Some(Err(error)) => {
                    debug!(program = ?program, error = %error, "unreadable output");
                    None
                }
                None => None,
            }
        }
        Ok(Some(status)) => {
            debug!(program = ?program, status = ?status.code(), "non-zero exit");
            None
        }
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            warn!(program = ?program, timeout_secs = timeout.as_secs_f32(), "timed out");
            None
        }
        Err(error) => {
            debug!(program = ?program, error = %error, "wait failed");
            None
        }
    }
}
