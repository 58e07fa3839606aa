//! Studymate docs — document references and plain-text extraction.
//!
//! Tools receive a document argument as an opaque string. How that string is
//! interpreted depends on the deployment's `AddressingMode`: a filesystem
//! path, or an abstract handle resolved by some other backend. This crate
//! defines the `DocumentLoader` seam and the filesystem implementation.

pub mod loader;
pub mod reference;

pub use loader::{DocumentLoader, FsDocumentLoader};
pub use reference::{AddressingMode, DocumentRef};
