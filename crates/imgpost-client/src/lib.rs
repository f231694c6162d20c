pub mod control;
pub mod error;
pub mod handler;
pub mod http_client;
pub mod log;
pub mod transport;

pub use control::{Activation, ActivationStream, FileInput, FileInputControl, SubmitControl};
pub use error::UploadError;
pub use handler::{UploadHandler, UploadOutcome};
pub use http_client::HttpUploadClient;
pub use log::{ConsoleLog, DiagnosticLog, LogEntry, MemoryLog, TracingLog};
pub use transport::{TransportConfig, UploadTransport};
