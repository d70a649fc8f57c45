pub mod contact;
pub mod document;
pub mod project;
pub mod timestamp;

pub use contact::{ContactForm, ContactReceipt, ContactSubmission};
pub use document::{Document, Fields};
