//! svgshot
//!
//! Convert SVG files to PNG by rendering them in a headless Chrome and
//! capturing a screenshot of exactly the right size.
//!
//! # Features
//!
//! - **Size resolution**: intrinsic size from `width`/`height` or `viewBox`,
//!   with width, height, fit-box and scale overrides
//! - **Browser fallback**: SVGs without size metadata are measured in the page
//! - **CDP Backend** (default): Chrome DevTools Protocol via `headless_chrome`
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "cdp")]
//! # fn main() {
//! use svgshot::cdp::ChromeConverter;
//! use svgshot::{ConversionOptions, ConversionRequest, RenderConfig};
//!
//! let request = ConversionRequest::new("logo.svg").with_options(ConversionOptions {
//!     width: Some(512.0),
//!     ..Default::default()
//! });
//!
//! let outcome = ChromeConverter::convert_once(RenderConfig::from_env(), &request);
//! match outcome.dimensions() {
//!     Some(size) => println!("wrote {size}"),
//!     None => eprintln!("{}", outcome.error().unwrap_or("unknown error")),
//! }
//! # }
//! # #[cfg(not(feature = "cdp"))]
//! # fn main() {}
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod browser_path;
pub mod options;
pub mod page;
pub mod size;

pub mod converter;

// Async-friendly facade (worker-thread backed)
pub mod async_api;

#[cfg(feature = "cdp")]
pub mod cdp;

pub use async_api::AsyncConverter;
pub use converter::{ConversionOutcome, ConversionRequest, Converter};
pub use options::{normalize_background, validate_options, Background, ConversionOptions};
pub use size::{extract_intrinsic_size, resolve, PixelSize, Size, TargetSize};

#[cfg(feature = "cdp")]
pub use cdp::CdpRenderer;

/// Configuration for the rendering backend
///
/// The defaults keep Chrome sandboxed and give page loads the same 30s budget
/// a regular browser session would get.
///
/// # Examples
///
/// ```
/// let cfg = svgshot::RenderConfig::default();
/// assert_eq!(cfg.timeout_ms, 30000);
/// assert!(cfg.sandbox);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Explicit browser binary; searched for when absent
    pub chrome_path: Option<PathBuf>,
    /// Timeout for page loads and protocol calls in milliseconds
    pub timeout_ms: u64,
    /// Pause after navigation before capturing, in milliseconds
    pub settle_ms: u64,
    /// Whether to keep Chrome's sandbox enabled
    pub sandbox: bool,
    /// How long the browser may sit idle between conversions before it exits
    pub idle_timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            timeout_ms: 30000,
            settle_ms: 100,
            sandbox: true,
            idle_timeout_ms: 300000,
        }
    }
}

impl RenderConfig {
    /// Defaults plus `CHROME_PATH` from the environment
    pub fn from_env() -> Self {
        let chrome_path = std::env::var_os(browser_path::CHROME_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            chrome_path,
            ..Default::default()
        }
    }
}

/// What the orchestrator asks a renderer to draw
#[derive(Debug, Clone)]
pub struct RenderJob<'a> {
    /// Raw SVG markup, embedded as-is
    pub svg: &'a str,
    /// Viewport and capture size
    pub size: PixelSize,
    pub background: &'a Background,
}

/// Core trait for rendering backends
///
/// A renderer is a long-lived handle to a browser. [`Converter`] launches one
/// lazily and reuses it for every conversion until shut down.
pub trait Renderer {
    /// Start the backend
    fn launch(config: &RenderConfig) -> Result<Self>
    where
        Self: Sized;

    /// Render `job.svg` at `job.size` and return PNG bytes
    fn render(&mut self, job: &RenderJob<'_>) -> Result<Vec<u8>>;

    /// Measure an SVG that declares no size of its own
    fn measure(&mut self, svg: &str) -> Result<Size>;

    /// Release the backend and its browser process
    fn close(self) -> Result<()>;
}
