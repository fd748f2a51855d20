//! Employee records and form payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identity key of an employee (creation timestamp in ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl EmployeeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single roster entry
///
/// Serialized with the stored wire names (`id`, `name`, `jobTitle`, `email`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub email: String,
}

impl Employee {
    /// Build a record from validated fields
    pub fn new(id: EmployeeId, fields: ValidFields) -> Self {
        let EmployeeFields {
            name,
            job_title,
            email,
        } = fields.0;
        Self {
            id,
            name,
            job_title,
            email,
        }
    }

    /// Replace every field except `id`
    pub fn replace_fields(&mut self, fields: ValidFields) {
        let EmployeeFields {
            name,
            job_title,
            email,
        } = fields.0;
        self.name = name;
        self.job_title = job_title;
        self.email = email;
    }

    /// Current values as an (unvalidated) form payload
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            job_title: self.job_title.clone(),
            email: self.email.clone(),
        }
    }
}

/// Names the three editable inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    JobTitle,
    Email,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::JobTitle, Field::Email];

    /// Input `name` attribute used by the form markup
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::JobTitle => "jobTitle",
            Field::Email => "email",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Field::Name),
            "jobTitle" | "job_title" => Some(Field::JobTitle),
            "email" => Some(Field::Email),
            _ => None,
        }
    }
}

/// Raw form values, not yet validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub job_title: String,
    pub email: String,
}

impl EmployeeFields {
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            job_title: job_title.into(),
            email: email.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::JobTitle => &self.job_title,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::JobTitle => self.job_title = value,
            Field::Email => self.email = value,
        }
    }

    /// Check the only rule the roster enforces: a non-empty name
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }

    pub fn validate(self) -> Result<ValidFields, ValidationError> {
        self.check()?;
        Ok(ValidFields(self))
    }
}

/// Form values that passed validation; the only input the store accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields(EmployeeFields);

impl ValidFields {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn into_inner(self) -> EmployeeFields {
        self.0
    }
}

impl TryFrom<EmployeeFields> for ValidFields {
    type Error = ValidationError;

    fn try_from(fields: EmployeeFields) -> Result<Self, Self::Error> {
        fields.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let fields = EmployeeFields::new("", "Eng", "a@x.com");
        assert_eq!(fields.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn test_whitespace_name_accepted() {
        let valid = EmployeeFields::new(" ", "", "").validate().unwrap();
        assert_eq!(valid.name(), " ");
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let valid = EmployeeFields::new("Ada", "", "").validate().unwrap();
        assert_eq!(valid.name(), "Ada");
    }

    #[test]
    fn test_wire_names() {
        let emp = Employee {
            id: EmployeeId(1700000000000),
            name: "Ada".into(),
            job_title: "Eng".into(),
            email: "a@x.com".into(),
        };
        let json = serde_json::to_value(&emp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1700000000000u64,
                "name": "Ada",
                "jobTitle": "Eng",
                "email": "a@x.com"
            })
        );
    }

    #[test]
    fn test_missing_optional_fields_decode_empty() {
        let emp: Employee = serde_json::from_str(r#"{"id":1,"name":"Bo"}"#).unwrap();
        assert_eq!(emp.job_title, "");
        assert_eq!(emp.email, "");
    }

    #[test]
    fn test_replace_fields_keeps_id() {
        let mut emp = Employee::new(
            EmployeeId(1),
            EmployeeFields::new("Bo", "", "").validate().unwrap(),
        );
        emp.replace_fields(EmployeeFields::new("Bo", "Lead", "b@x.com").validate().unwrap());
        assert_eq!(emp.id, EmployeeId(1));
        assert_eq!(emp.job_title, "Lead");
        assert_eq!(emp.email, "b@x.com");
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_str(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_str("salary"), None);
    }
}
