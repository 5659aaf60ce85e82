//! The `Etudiant` (student) entity.

use serde::{Deserialize, Serialize};

/// Entity name used in alert headers and error payloads.
pub const ENTITY_NAME: &str = "ms3Etudiant";

/// A student record. `id` is absent until the store assigns one on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Etudiant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, alias = "prenom", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "nom", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, alias = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl Etudiant {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Overlay every attribute present in `patch` onto `self`. Absent attributes keep their stored value;
    /// the identifier is never touched.
    pub fn merge(&mut self, patch: Etudiant) {
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ana() -> Etudiant {
        Etudiant {
            id: Some(1),
            first_name: Some("Ana".into()),
            last_name: Some("Lopez".into()),
            address: Some("1 rue de Paris".into()),
            age: Some(19),
        }
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let e = Etudiant {
            first_name: Some("Ana".into()),
            ..Default::default()
        }
        .with_id(1);
        assert_eq!(serde_json::to_value(&e).unwrap(), json!({ "id": 1, "firstName": "Ana" }));
    }

    #[test]
    fn french_column_names_are_accepted_on_input() {
        let e: Etudiant = serde_json::from_value(json!({ "prenom": "Ana", "nom": "Lopez", "adresse": "Lyon" })).unwrap();
        assert_eq!(e.first_name.as_deref(), Some("Ana"));
        assert_eq!(e.last_name.as_deref(), Some("Lopez"));
        assert_eq!(e.address.as_deref(), Some("Lyon"));
        assert_eq!(e.id, None);
    }

    #[test]
    fn merge_keeps_absent_and_null_fields() {
        let mut stored = ana();
        let patch: Etudiant = serde_json::from_value(json!({ "id": 1, "age": 20, "lastName": null })).unwrap();
        stored.merge(patch);
        assert_eq!(stored.age, Some(20));
        assert_eq!(stored.last_name.as_deref(), Some("Lopez"));
        assert_eq!(stored.first_name.as_deref(), Some("Ana"));
        assert_eq!(stored.address.as_deref(), Some("1 rue de Paris"));
    }

    #[test]
    fn merge_overwrites_with_empty_text() {
        let mut stored = ana();
        stored.merge(Etudiant {
            address: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(stored.address.as_deref(), Some(""));
    }

    #[test]
    fn merge_never_changes_the_identifier() {
        let mut stored = ana();
        stored.merge(Etudiant::default().with_id(99));
        assert_eq!(stored.id, Some(1));
    }
}
