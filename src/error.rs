use std::io;

use thiserror::Error;

/// Failure kinds shared by all three samplers.
///
/// Every failure is terminal for the run: the binaries print a diagnostic
/// and exit non-zero, there is no retry path.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The OS statistics interface could not be opened or queried.
    #[error("cannot read {subject}: {source}")]
    SourceUnavailable {
        subject: String,
        #[source]
        source: io::Error,
    },

    /// The interface was readable but the expected fields were missing
    /// or not parseable.
    #[error("malformed data in {subject}: {detail}")]
    MalformedData { subject: String, detail: String },

    /// Fields were present and well-formed but the derived denominator
    /// is zero, so the percentage is undefined.
    #[error("degenerate sample from {subject}: {detail}")]
    DegenerateSample { subject: String, detail: String },
}

pub type Result<T> = std::result::Result<T, SampleError>;
