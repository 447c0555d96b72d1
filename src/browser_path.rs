//! Locating a Chrome/Chromium binary on the host

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::RenderConfig;

/// Environment variable naming an explicit browser binary
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

#[cfg(target_os = "macos")]
const KNOWN_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Google Chrome Canary.app/Contents/MacOS/Google Chrome Canary",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(target_os = "windows")]
const KNOWN_LOCATIONS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
    r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const KNOWN_LOCATIONS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/bin/microsoft-edge",
];

// Looked up on PATH after the fixed locations
const COMMAND_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "msedge",
];

/// Find the browser binary to launch.
///
/// `config.chrome_path` wins when it names an existing executable, then the
/// platform's well-known install locations, then well-known command names on
/// `PATH`. `None` leaves the choice to the CDP crate's own detection.
pub fn locate_browser(config: &RenderConfig) -> Option<PathBuf> {
    if let Some(explicit) = &config.chrome_path {
        if is_executable(explicit) {
            debug!("using browser from configuration: {}", explicit.display());
            return Some(explicit.clone());
        }
        warn!("configured browser {} is not an executable file; searching defaults", explicit.display());
    }

    let found = first_executable(KNOWN_LOCATIONS.iter().map(PathBuf::from))
        .or_else(|| COMMAND_NAMES.iter().find_map(|name| which::which(name).ok()));

    match &found {
        Some(p) => debug!("found browser at {}", p.display()),
        None => debug!("no browser in known locations"),
    }
    found
}

/// The first candidate that is an executable file
pub fn first_executable<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|p| is_executable(p))
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
