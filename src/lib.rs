//! Core entry point for the fsa_guide crate.
//!
//! The crate renders the three FSA ID documents (full guide, checklist and template) and models
//! the small amount of state the interactive guide keeps between runs.

pub mod app;
pub mod builder;
pub mod canvas;
pub mod config;
pub mod content;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod session;
pub mod store;
pub mod style;
pub mod troubleshoot;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use app::{reduce, Action, AppState, Tab};
pub use builder::{DocumentBuilder, DocumentKind, RenderedDocument};
pub use error::{GuideError, StoreError};
pub use session::{ArtifactSink, DirectorySink, GenerationSession, Status};
pub use troubleshoot::Flowchart;
