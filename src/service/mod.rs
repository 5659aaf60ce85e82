//! EtudiantService: resource logic over the storage collaborator.

mod crud;
mod validation;
pub use crud::EtudiantService;
pub use validation::RequestValidator;
