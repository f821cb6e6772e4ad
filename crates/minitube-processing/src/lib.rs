//! Local media probing for uploads.
//!
//! Duration extraction is best-effort: any failure degrades to `00:00` instead
//! of failing the upload.

pub mod duration;
pub mod probe;
pub mod source;

pub use duration::{extract_duration, DurationLabel};
pub use probe::{DurationProbe, FfprobeProbe, ProbeError};
pub use source::MediaSource;
