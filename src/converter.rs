//! Conversion pipeline: input checks, sizing, rendering, and output

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::options::{normalize_background, validate_options, ConversionOptions};
use crate::size::{extract_intrinsic_size, resolve, PixelSize};
use crate::{Error, RenderConfig, RenderJob, Renderer, Result};

/// One SVG to convert and how
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Path to the `.svg` input
    pub input: PathBuf,
    /// Where to write the PNG; next to the input when absent
    pub output: Option<PathBuf>,
    pub options: ConversionOptions,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            options: ConversionOptions::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of a single conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted {
        output: PathBuf,
        dimensions: PixelSize,
    },
    Failed {
        /// The output path the conversion would have written
        output: PathBuf,
        /// Human-readable error message
        error: String,
    },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }

    pub fn output(&self) -> &Path {
        match self {
            ConversionOutcome::Converted { output, .. } | ConversionOutcome::Failed { output, .. } => output,
        }
    }

    pub fn dimensions(&self) -> Option<PixelSize> {
        match self {
            ConversionOutcome::Converted { dimensions, .. } => Some(*dimensions),
            ConversionOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConversionOutcome::Converted { .. } => None,
            ConversionOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Runs conversions against a lazily launched renderer.
///
/// The renderer is started on the first conversion that needs it and reused
/// afterwards. Call [`Converter::shutdown`] to release it; dropping the
/// converter does the same.
pub struct Converter<R: Renderer> {
    config: RenderConfig,
    renderer: Option<R>,
}

impl<R: Renderer> Converter<R> {
    pub fn new(config: RenderConfig) -> Self {
        Self { config, renderer: None }
    }

    /// Use an already running renderer instead of launching one
    pub fn with_renderer(config: RenderConfig, renderer: R) -> Self {
        Self {
            config,
            renderer: Some(renderer),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Whether a renderer is currently held
    pub fn is_running(&self) -> bool {
        self.renderer.is_some()
    }

    /// Convert one SVG. Failures at any stage come back as
    /// [`ConversionOutcome::Failed`]; this never returns early with an error.
    pub fn convert(&mut self, request: &ConversionRequest) -> ConversionOutcome {
        let output = output_path_for(&request.input, request.output.as_deref());
        match self.run(request, &output) {
            Ok(dimensions) => {
                info!("converted {} -> {} ({})", request.input.display(), output.display(), dimensions);
                ConversionOutcome::Converted { output, dimensions }
            }
            Err(e) => {
                warn!("conversion of {} failed: {}", request.input.display(), e);
                ConversionOutcome::Failed {
                    output,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Convert one request on a fresh converter and shut it down afterwards,
    /// whether or not the conversion succeeded.
    pub fn convert_once(config: RenderConfig, request: &ConversionRequest) -> ConversionOutcome {
        let mut converter = Self::new(config);
        let outcome = converter.convert(request);
        if let Err(e) = converter.shutdown() {
            warn!("renderer shutdown failed: {}", e);
        }
        outcome
    }

    /// Close the renderer if one is running. Safe to call repeatedly.
    pub fn shutdown(&mut self) -> Result<()> {
        match self.renderer.take() {
            Some(renderer) => {
                debug!("shutting down renderer");
                renderer.close()
            }
            None => Ok(()),
        }
    }

    fn run(&mut self, request: &ConversionRequest, output: &Path) -> Result<PixelSize> {
        check_input(&request.input)?;
        validate_options(&request.options)?;

        let bytes = fs::read(&request.input).map_err(|source| Error::InputUnreadable {
            path: request.input.clone(),
            source,
        })?;
        // The size scan is ASCII; legacy encodings only lose non-ASCII text.
        let svg = String::from_utf8_lossy(&bytes);

        let intrinsic = match extract_intrinsic_size(&svg) {
            Ok(size) => size,
            Err(Error::DimensionsUnavailable) => {
                info!("{} declares no size; measuring in the browser", request.input.display());
                self.renderer()?.measure(&svg)?
            }
            Err(e) => return Err(e),
        };
        // Guards Renderer::measure implementations that return an unusable size.
        if !intrinsic.is_valid() {
            return Err(Error::DimensionsUnavailable);
        }

        let size = resolve(intrinsic, &request.options.target());
        let background = normalize_background(request.options.background.as_deref())?;
        debug!("intrinsic {} resolved to {} over {}", intrinsic, size, background);

        if let Some(quality) = request.options.quality {
            debug!("quality {} accepted; PNG bytes are written as captured", quality);
        }

        let png = self.renderer()?.render(&RenderJob {
            svg: &svg,
            size,
            background: &background,
        })?;

        fs::write(output, &png).map_err(|source| Error::WriteFailure {
            path: output.to_path_buf(),
            source,
        })?;

        Ok(size)
    }

    fn renderer(&mut self) -> Result<&mut R> {
        let renderer = match self.renderer.take() {
            Some(r) => r,
            None => {
                info!("launching renderer");
                R::launch(&self.config)?
            }
        };
        Ok(self.renderer.insert(renderer))
    }
}

impl<R: Renderer> Drop for Converter<R> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("renderer shutdown on drop failed: {}", e);
        }
    }
}

/// Where the PNG for `input` goes: `output` when given, else the input path
/// with its `.svg` extension swapped for `.png`.
pub fn output_path_for(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("png"),
    }
}

/// Check that `path` exists and carries an `.svg` or `.SVG` extension.
pub fn check_input(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") | Some("SVG") => Ok(()),
        _ => Err(Error::InputWrongExtension(path.to_path_buf())),
    }
}
