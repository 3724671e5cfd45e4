//! Tokio-backed runtime for stream graphs.

/// Mailbox delivering signals into a stage task.
mod tokio_mailbox;
/// Materializer spawning one task per stage.
mod tokio_materializer;

pub use tokio_materializer::TokioMaterializer;
