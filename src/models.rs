//! Core data models for the contact book.
//!
//! [`Contact`] is the persisted record. [`NewContact`] carries the fields a
//! caller supplies on creation; [`ContactPatch`] is the partial-update
//! structure where every field is individually optional, so "omitted" and
//! "explicitly set" are distinguished at the type level.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

use crate::error::{StoreError, StoreResult};

/// A stored contact record.
///
/// `id` is assigned by the store on creation and never changes. The
/// `birthday` year only anchors the month/day — the upcoming-birthday
/// view ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
}

/// Fields supplied when creating a contact.
///
/// Everything except `additional_info` is mandatory; [`validate`](Self::validate)
/// must pass before the record touches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl NewContact {
    /// Check required fields are non-empty and the email is well-formed.
    pub fn validate(&self) -> StoreResult<()> {
        require_non_empty("first_name", &self.first_name)?;
        require_non_empty("last_name", &self.last_name)?;
        require_non_empty("phone_number", &self.phone_number)?;
        validate_email(&self.email)
    }
}

/// Partial update for a contact.
///
/// A field left as `None` means "leave unchanged". `additional_info` is
/// double-wrapped so an explicit JSON `null` (clear the note) is distinct
/// from omitting the key entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_info: Option<Option<String>>,
}

impl ContactPatch {
    /// Check every supplied field the same way creation would.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(v) = &self.first_name {
            require_non_empty("first_name", v)?;
        }
        if let Some(v) = &self.last_name {
            require_non_empty("last_name", v)?;
        }
        if let Some(v) = &self.phone_number {
            require_non_empty("phone_number", v)?;
        }
        if let Some(v) = &self.email {
            validate_email(v)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into an existing record, one field at a
    /// time. Absent fields leave the record untouched; `id` is never
    /// patchable.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(v) = &self.first_name {
            contact.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            contact.last_name = v.clone();
        }
        if let Some(v) = &self.email {
            contact.email = v.clone();
        }
        if let Some(v) = &self.phone_number {
            contact.phone_number = v.clone();
        }
        if let Some(v) = self.birthday {
            contact.birthday = v;
        }
        if let Some(v) = &self.additional_info {
            contact.additional_info = v.clone();
        }
    }
}

/// Deserialize a field so that a present `null` becomes `Some(None)` while
/// an absent key stays `None` (via `#[serde(default)]`).
fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

fn require_non_empty(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// Syntactic email check: one `@`, non-empty local part, a dot in the
/// domain, no whitespace.
fn validate_email(email: &str) -> StoreResult<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    });
    if re.is_match(email) {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact() -> Contact {
        Contact {
            id: 1,
            first_name: "Anna".to_string(),
            last_name: "Symonenko".to_string(),
            email: "anna@example.com".to_string(),
            phone_number: "+380501234567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 3, 5).unwrap(),
            additional_info: Some("college friend".to_string()),
        }
    }

    #[test]
    fn test_new_contact_valid() {
        let new = NewContact {
            first_name: "Anna".to_string(),
            last_name: "Symonenko".to_string(),
            email: "anna@example.com".to_string(),
            phone_number: "+380501234567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 3, 5).unwrap(),
            additional_info: None,
        };
        assert!(new.validate().is_ok());
    }

    #[test]
    fn test_new_contact_rejects_empty_fields() {
        let mut new = NewContact {
            first_name: "  ".to_string(),
            last_name: "Symonenko".to_string(),
            email: "anna@example.com".to_string(),
            phone_number: "+380501234567".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 3, 5).unwrap(),
            additional_info: None,
        };
        assert!(matches!(new.validate(), Err(StoreError::Validation(_))));

        new.first_name = "Anna".to_string();
        new.phone_number = String::new();
        assert!(matches!(new.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_email_validation() {
        for good in ["a@b.co", "first.last@sub.domain.org", "x+tag@y.dev"] {
            assert!(validate_email(good).is_ok(), "should accept {}", good);
        }
        for bad in ["", "plainaddress", "a@b", "a b@c.de", "@missing.local", "a@"] {
            assert!(validate_email(bad).is_err(), "should reject {}", bad);
        }
    }

    #[test]
    fn test_patch_omitted_vs_null_additional_info() {
        // Key absent: leave unchanged.
        let patch: ContactPatch = serde_json::from_str(r#"{"phone_number": "123"}"#).unwrap();
        assert!(patch.additional_info.is_none());

        // Key present as null: clear the note.
        let patch: ContactPatch = serde_json::from_str(r#"{"additional_info": null}"#).unwrap();
        assert_eq!(patch.additional_info, Some(None));

        // Key present with a value: replace the note.
        let patch: ContactPatch =
            serde_json::from_str(r#"{"additional_info": "met at RustConf"}"#).unwrap();
        assert_eq!(
            patch.additional_info,
            Some(Some("met at RustConf".to_string()))
        );
    }

    #[test]
    fn test_patch_apply_merges_only_present_fields() {
        let mut contact = sample_contact();
        let patch: ContactPatch = serde_json::from_str(r#"{"phone_number": "555"}"#).unwrap();
        patch.apply_to(&mut contact);

        assert_eq!(contact.phone_number, "555");
        assert_eq!(contact.first_name, "Anna");
        assert_eq!(contact.email, "anna@example.com");
        assert_eq!(contact.additional_info, Some("college friend".to_string()));
    }

    #[test]
    fn test_patch_null_clears_additional_info() {
        let mut contact = sample_contact();
        let patch: ContactPatch = serde_json::from_str(r#"{"additional_info": null}"#).unwrap();
        patch.apply_to(&mut contact);
        assert_eq!(contact.additional_info, None);
    }

    #[test]
    fn test_patch_validates_supplied_fields_only() {
        let patch = ContactPatch {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(StoreError::Validation(_))));

        let patch = ContactPatch {
            birthday: NaiveDate::from_ymd_opt(1988, 2, 29),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }
}
