//! HTTP handlers for the etudiant resource.

pub mod etudiant;
pub use etudiant::*;
