pub mod document;
pub mod lenient;
pub mod resume;

pub use document::{DocumentSummary, NewDocument, RenderedTemplate, UploadedDocument};
pub use resume::{ParsedResume, ResumeVariant};
