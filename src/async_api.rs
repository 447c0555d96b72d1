use crate::converter::{ConversionOutcome, ConversionRequest, Converter};
use crate::{Error, RenderConfig, Renderer, Result};
use log::warn;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Convert(ConversionRequest, oneshot::Sender<ConversionOutcome>),
    Shutdown(oneshot::Sender<Result<()>>),
}

/// An async-friendly converter backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous [`Converter`] and runs requests sent
/// from async tasks one at a time, so the renderer never needs to be `Send`
/// and never sees two conversions at once. Clones share the same worker.
#[derive(Clone)]
pub struct AsyncConverter {
    cmd_tx: Sender<Command>,
}

impl AsyncConverter {
    /// Spawn a worker converting with headless Chrome.
    #[cfg(feature = "cdp")]
    pub fn new(config: RenderConfig) -> Self {
        Self::with_backend::<crate::cdp::CdpRenderer>(config)
    }

    /// Spawn a worker converting with renderer `R`. The renderer is launched on
    /// the worker thread when the first conversion needs it.
    pub fn with_backend<R: Renderer + 'static>(config: RenderConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            let mut converter = Converter::<R>::new(config);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Convert(request, resp) => {
                        let outcome = converter.convert(&request);
                        let _ = resp.send(outcome);
                    }
                    Command::Shutdown(resp) => {
                        let res = converter.shutdown();
                        let _ = resp.send(res);
                        break;
                    }
                }
            }

            // All handles dropped without an explicit shutdown.
            if let Err(e) = converter.shutdown() {
                warn!("renderer shutdown failed: {}", e);
            }
        });

        Self { cmd_tx }
    }

    /// Convert one SVG on the worker thread
    pub async fn convert(&self, request: ConversionRequest) -> Result<ConversionOutcome> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Convert(request, tx))
            .map_err(|_| Error::Other("Converter worker has shut down".into()))?;
        rx.await
            .map_err(|e| Error::Other(format!("Convert canceled: {}", e)))
    }

    /// Close the renderer and stop the worker.
    pub async fn shutdown(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown(tx))
            .map_err(|_| Error::Other("Converter worker has shut down".into()))?;
        rx.await
            .map_err(|e| Error::Other(format!("Shutdown canceled: {}", e)))?
    }
}
