//! Sequenced asynchronous image fetches for the selected entry.
//!
//! Selection can move faster than fetches complete, so every fetch is
//! tagged with a monotonically increasing sequence number. A completion is
//! applied only while its tag is still the most recently issued one; a
//! newer request additionally aborts the superseded fetch task. Failed
//! loads always clear the visible preview, stale or not — a broken image
//! must never linger.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{AppError, Result};
use crate::event::Event;

/// A successfully probed image: enough metadata to fill the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub name: String,
    pub format: String,
    pub width: usize,
    pub height: usize,
    pub bytes: u64,
}

/// Completion of one fetch, tagged with the sequence it was issued under.
#[derive(Debug)]
pub struct PreviewDone {
    pub sequence: u64,
    pub index: usize,
    pub result: Result<PreviewImage>,
}

/// The single reusable preview surface.
#[derive(Debug, Default)]
pub struct PreviewState {
    image: Option<PreviewImage>,
}

impl PreviewState {
    pub fn image(&self) -> Option<&PreviewImage> {
        self.image.as_ref()
    }

    pub fn show(&mut self, image: PreviewImage) {
        self.image = Some(image);
    }

    pub fn clear(&mut self) {
        self.image = None;
    }
}

/// Issues fetches and tracks which sequence number is current.
pub struct PreviewLoader {
    sequence: u64,
    max_bytes: u64,
    events: mpsc::UnboundedSender<Event>,
    in_flight: Option<JoinHandle<()>>,
}

impl PreviewLoader {
    pub fn new(events: mpsc::UnboundedSender<Event>, max_bytes: u64) -> Self {
        Self {
            sequence: 0,
            max_bytes,
            events,
            in_flight: None,
        }
    }

    /// The most recently issued sequence number. Completions carrying
    /// anything else are stale.
    pub fn current(&self) -> u64 {
        self.sequence
    }

    /// Start a fetch for the entry at `index`. The path is resolved by the
    /// caller from the index; the filename is carried for logging only.
    pub fn request(&mut self, index: usize, path: PathBuf) -> u64 {
        self.sequence += 1;
        let sequence = self.sequence;

        if let Some(superseded) = self.in_flight.take() {
            superseded.abort();
        }

        tracing::debug!(sequence, index, file = %path.display(), "preview fetch issued");
        let events = self.events.clone();
        let max_bytes = self.max_bytes;
        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch(&path, max_bytes).await;
            let _ = events.send(Event::Preview(PreviewDone {
                sequence,
                index,
                result,
            }));
        }));
        sequence
    }
}

/// Read the file and probe it as an image.
async fn fetch(path: &Path, max_bytes: u64) -> Result<PreviewImage> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(AppError::Preview(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_bytes {
        return Err(AppError::Preview(format!(
            "{} exceeds the preview size cap ({} bytes)",
            path.display(),
            max_bytes
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let kind = imagesize::image_type(&bytes)
        .map_err(|e| AppError::Preview(format!("unrecognized image data: {e}")))?;
    let size = imagesize::blob_size(&bytes)
        .map_err(|e| AppError::Preview(format!("unreadable image dimensions: {e}")))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(PreviewImage {
        name,
        format: format!("{:?}", kind),
        width: size.width,
        height: size.height,
        bytes: metadata.len(),
    })
}
