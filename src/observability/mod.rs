//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider
//!     → FileSpanExporter → SpanFormatter (OTLP JSON) → RotatingFileWriter
//! ```
//!
//! Traces land in `<data_dir>/bookfinder-otlp.json`, one OTLP document per
//! line, rotated at 10 MiB with three numbered backups. The filter level
//! comes from the `trace_level` plugin option (default `info`) and accepts
//! any `EnvFilter` directive, e.g. `bookfinder=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and file span exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{RotatingFileWriter, RotationPolicy};
pub use init::{init_tracing, TRACE_FILE_NAME};
