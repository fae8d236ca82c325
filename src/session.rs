//! The caller side of document generation.
//!
//! A [`GenerationSession`] stands in for the download buttons: it refuses a second build while
//! one is running, hands finished bytes to an [`ArtifactSink`] and records a status message. The
//! session is driven through shared references, so a trigger fired from inside a running build
//! (a render callback, a UI event handler) reaches the in-progress check. The flag is owned by a
//! guard and is cleared on every exit path.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::builder::{DocumentBuilder, RenderedDocument};
use crate::error::GuideError;

/// Destination for finished documents.
pub trait ArtifactSink {
    /// Persists `bytes` under `filename` and returns where they ended up.
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError>;
}

/// Writes artifacts into a directory.
///
/// Bytes go to a temporary file in the same directory first and are renamed into place, so a
/// failed write never leaves a truncated PDF under the final name.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Creates a sink that writes into `directory`, creating it on first delivery.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError> {
        let target = self.directory.join(filename);
        let partial = self.directory.join(format!(".{filename}.part"));
        let save_error = |source| GuideError::Save {
            path: target.clone(),
            source,
        };

        fs::create_dir_all(&self.directory).map_err(save_error)?;
        let written = fs::File::create(&partial)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&partial, &target));
        if let Err(source) = written {
            let _ = fs::remove_file(&partial);
            return Err(save_error(source));
        }
        Ok(target)
    }
}

/// Keeps artifacts in memory instead of writing files.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Delivered artifacts in order.
    pub fn artifacts(&self) -> &[(String, Vec<u8>)] {
        &self.artifacts
    }
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError> {
        self.artifacts.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// Last observed state of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Nothing generated yet.
    Idle,
    /// A build is running.
    Generating,
    /// The last artifact was saved here.
    Saved(PathBuf),
    /// The last build or save failed with this message.
    Failed(String),
}

/// Clears the in-progress flag when dropped.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, GuideError> {
        if flag.replace(true) {
            return Err(GuideError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Single-threaded generation front end.
#[derive(Debug)]
pub struct GenerationSession {
    busy: Cell<bool>,
    status: RefCell<Status>,
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self {
            busy: Cell::new(false),
            status: RefCell::new(Status::Idle),
        }
    }

    /// Whether a build is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Status of the last generation.
    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    /// Builds a document and delivers it to `sink`.
    pub fn generate(
        &self,
        builder: &DocumentBuilder,
        sink: &mut dyn ArtifactSink,
    ) -> Result<PathBuf, GuideError> {
        self.run(sink, || builder.build())
    }

    /// Runs an arbitrary render step under the busy flag and delivers its result.
    ///
    /// A failed render never reaches the sink. A call made while another one is in flight returns
    /// [`GuideError::Busy`] and leaves the status untouched.
    pub fn run<F>(&self, sink: &mut dyn ArtifactSink, render: F) -> Result<PathBuf, GuideError>
    where
        F: FnOnce() -> Result<RenderedDocument, GuideError>,
    {
        let guard = BusyGuard::acquire(&self.busy)?;
        self.set_status(Status::Generating);

        let result =
            render().and_then(|document| sink.deliver(document.filename, &document.bytes));
        drop(guard);

        match &result {
            Ok(path) => {
                info!("Saved {}", path.display());
                self.set_status(Status::Saved(path.clone()));
            }
            Err(err) => {
                error!("Document generation failed: {err}");
                self.set_status(Status::Failed(err.to_string()));
            }
        }
        result
    }

    fn set_status(&self, status: Status) {
        *self.status.borrow_mut() = status;
    }
}
