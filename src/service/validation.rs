//! Identifier rules applied to request bodies before they reach the store.

use crate::error::AppError;
use crate::model::{Etudiant, ENTITY_NAME};

pub struct RequestValidator;

impl RequestValidator {
    /// A new entity must not carry an identifier.
    pub fn validate_new(body: &Etudiant) -> Result<(), AppError> {
        if body.id.is_some() {
            return Err(AppError::bad_request_alert(
                "A new etudiant cannot already have an ID",
                ENTITY_NAME,
                "idexists",
            ));
        }
        Ok(())
    }

    /// An update body must carry the identifier given in the path.
    pub fn validate_update(path_id: i64, body: &Etudiant) -> Result<i64, AppError> {
        match body.id {
            None => Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull")),
            Some(id) if id != path_id => Err(AppError::bad_request_alert("Invalid ID", ENTITY_NAME, "idinvalid")),
            Some(id) => Ok(id),
        }
    }

    pub fn not_found() -> AppError {
        AppError::bad_request_alert("Entity not found", ENTITY_NAME, "idnotfound")
    }
}
