//! Chrome DevTools Protocol renderer implementation

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::{Emulation, Page, DOM};
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, warn};
use serde::Deserialize;

use crate::browser_path::locate_browser;
use crate::converter::Converter;
use crate::page::{data_url, measure_page, render_page, MEASURE_SCRIPT};
use crate::size::{measured_size, Size};
use crate::{Error, RenderConfig, RenderJob, Renderer, Result};

/// Converter backed by headless Chrome
pub type ChromeConverter = Converter<CdpRenderer>;

/// CDP-based renderer (uses the `headless_chrome` crate)
///
/// Launches one headless Chrome, keeps a single tab, and loads each SVG into it
/// as a `data:` URL page. Dropping the renderer terminates the browser.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
    config: RenderConfig,
}

impl Renderer for CdpRenderer {
    fn launch(config: &RenderConfig) -> Result<Self> {
        let path = locate_browser(config);

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(config.sandbox)
            .path(path)
            .idle_browser_timeout(Duration::from_millis(config.idle_timeout_ms))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;
        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        debug!("browser launched");
        Ok(Self {
            browser,
            tab,
            config: config.clone(),
        })
    }

    fn render(&mut self, job: &RenderJob<'_>) -> Result<Vec<u8>> {
        let width = f64::from(job.size.width);
        let height = f64::from(job.size.height);

        self.tab
            .set_bounds(Bounds::Normal {
                left: Some(0),
                top: Some(0),
                width: Some(width),
                height: Some(height),
            })
            .map_err(|e| Error::RenderFailure(format!("Failed to resize window: {}", e)))?;

        self.load(&render_page(job.svg, job.size, job.background))?;

        // A cleared override restores Chrome's opaque white default.
        let color = job.background.is_transparent().then_some(DOM::RGBA {
            r: 0,
            g: 0,
            b: 0,
            a: Some(0.0),
        });
        self.tab
            .call_method(Emulation::SetDefaultBackgroundColorOverride { color })
            .map_err(|e| Error::RenderFailure(format!("Failed to set background: {}", e)))?;

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height,
            scale: 1.0,
        };
        let png = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)?;

        Ok(png)
    }

    fn measure(&mut self, svg: &str) -> Result<Size> {
        self.load(&measure_page(svg))?;

        let eval = self
            .tab
            .evaluate(MEASURE_SCRIPT, false)
            .map_err(|e| Error::RenderFailure(format!("Measurement failed: {}", e)))?;

        let size = match eval.value {
            Some(value) => parse_measurement(&value)?,
            None => {
                warn!("measurement returned no value; using default size");
                measured_size(None, None)
            }
        };
        debug!("measured size {}", size);
        Ok(size)
    }

    fn close(self) -> Result<()> {
        // Dropping the browser kills the child process.
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}

impl CdpRenderer {
    fn load(&self, html: &str) -> Result<()> {
        self.tab
            .navigate_to(&data_url(html))
            .map_err(|e| Error::RenderFailure(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::RenderFailure(format!("Wait for navigation failed: {}", e)))?;

        if self.config.settle_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.settle_ms));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Measurement {
    bbox: Option<Extent>,
    client: Option<Extent>,
}

#[derive(Debug, Deserialize)]
struct Extent {
    width: f64,
    height: f64,
}

impl From<Extent> for Size {
    fn from(e: Extent) -> Self {
        Size::new(e.width, e.height)
    }
}

/// Turn the value returned by [`MEASURE_SCRIPT`] into a size.
///
/// The script returns a JSON string; an already decoded object is accepted
/// too.
pub fn parse_measurement(value: &serde_json::Value) -> Result<Size> {
    let parsed = match value.as_str() {
        Some(s) => serde_json::from_str::<Measurement>(s),
        None => serde_json::from_value::<Measurement>(value.clone()),
    }
    .map_err(|e| Error::RenderFailure(format!("Unexpected measurement result {}: {}", value, e)))?;

    Ok(measured_size(parsed.bbox.map(Size::from), parsed.client.map(Size::from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn measurement_prefers_bbox() {
        let v = json!(r#"{"bbox":{"width":48,"height":24},"client":{"width":300,"height":150}}"#);
        assert_eq!(parse_measurement(&v).unwrap(), Size::new(48.0, 24.0));
    }

    #[test]
    fn measurement_falls_back_to_client_then_default() {
        let v = json!({"bbox": {"width": 0, "height": 0}, "client": {"width": 300, "height": 150}});
        assert_eq!(parse_measurement(&v).unwrap(), Size::new(300.0, 150.0));

        let v = json!(r#"{"bbox":null,"client":{"width":0,"height":0}}"#);
        assert_eq!(parse_measurement(&v).unwrap(), Size::new(300.0, 300.0));
    }

    #[test]
    fn malformed_measurement_is_an_error() {
        let v = json!("not json");
        assert!(matches!(parse_measurement(&v), Err(Error::RenderFailure(_))));
    }

    #[test]
    fn test_cdp_renderer_launch() {
        // This test requires Chrome to be installed, so we skip it in CI
        if std::env::var("CI").is_ok() {
            return;
        }
        let result = CdpRenderer::launch(&RenderConfig::from_env());
        match result {
            Ok(renderer) => assert!(renderer.close().is_ok()),
            Err(e) => eprintln!("Skipping CDP launch test because Chrome is not available or failed to launch: {}", e),
        }
    }
}
