//! Add/edit form and its editing workflow
//!
//! The same form adds new employees (Idle) and edits the selected one
//! (Editing). While editing, the name input is disabled.

use crate::employee::{Employee, EmployeeFields, EmployeeId, Field};
use crate::error::ValidationError;
use crate::store::RosterStore;

/// Which record, if any, the form is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing { id: EmployeeId },
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(Employee),
    /// `found` is false when the record vanished while being edited
    Updated { id: EmployeeId, found: bool },
}

/// Form values, inline error and edit mode
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    values: EmployeeFields,
    error: Option<ValidationError>,
    mode: EditMode,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &EmployeeFields {
        &self.values
    }

    /// Inline message to show under the name input
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn selection(&self) -> Option<EmployeeId> {
        match self.mode {
            EditMode::Idle => None,
            EditMode::Editing { id } => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.selection().is_some()
    }

    /// Disabled inputs ignore changes
    pub fn is_editable(&self, field: Field) -> bool {
        !(self.is_editing() && field == Field::Name)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Employee"
        } else {
            "Add Employee"
        }
    }

    /// Apply a keystroke; returns false if the field is disabled
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        self.values.set(field, value.into());
        self.error = self.values.check().err();
        true
    }

    /// Bind the form to `employee`, replacing any current selection
    pub fn begin_edit(&mut self, employee: &Employee) {
        if let Some(prev) = self.selection().filter(|prev| *prev != employee.id) {
            log::debug!("Edit selection moved from {} to {}", prev, employee.id);
        }
        self.values = employee.fields();
        self.error = None;
        self.mode = EditMode::Editing { id: employee.id };
    }

    /// Drop in-progress edits without touching the roster
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validate, then add (Idle) or update (Editing) and reset to Idle
    ///
    /// On failure the values and mode are kept and the error is recorded.
    pub fn submit(&mut self, store: &mut RosterStore) -> Result<Submitted, ValidationError> {
        let fields = match self.values.clone().validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.error = Some(e);
                return Err(e);
            }
        };

        let outcome = match self.mode {
            EditMode::Idle => Submitted::Added(store.add(fields)),
            EditMode::Editing { id } => Submitted::Updated {
                id,
                found: store.update(id, fields),
            },
        };
        self.reset();
        Ok(outcome)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROSTER_KEY;
    use crate::platform::{ManualClock, MemoryStorage};
    use proptest::prelude::*;

    fn store_with(json: &str) -> RosterStore {
        RosterStore::load(MemoryStorage::with_item(ROSTER_KEY, json), ManualClock::new(100))
    }

    fn type_into(form: &mut EmployeeForm, name: &str, job_title: &str, email: &str) {
        form.set_field(Field::Name, name);
        form.set_field(Field::JobTitle, job_title);
        form.set_field(Field::Email, email);
    }

    #[test]
    fn test_fresh_form_has_no_error() {
        let form = EmployeeForm::new();
        assert_eq!(form.error(), None);
        assert_eq!(form.mode(), EditMode::Idle);
        assert_eq!(form.submit_label(), "Add Employee");
    }

    #[test]
    fn test_error_tracks_every_change() {
        let mut form = EmployeeForm::new();
        form.set_field(Field::JobTitle, "Eng");
        assert_eq!(form.error(), Some(ValidationError::NameRequired));
        form.set_field(Field::Name, "A");
        assert_eq!(form.error(), None);
        form.set_field(Field::Name, "");
        assert_eq!(form.error(), Some(ValidationError::NameRequired));
    }

    #[test]
    fn test_submit_blocked_without_name() {
        let mut store = store_with("[]");
        let mut form = EmployeeForm::new();
        form.set_field(Field::Email, "a@x.com");

        assert_eq!(form.submit(&mut store), Err(ValidationError::NameRequired));
        assert!(store.is_empty());
        assert_eq!(form.values().email, "a@x.com");
        assert_eq!(form.error().map(|e| e.to_string()).as_deref(), Some("Employee name is required"));
    }

    #[test]
    fn test_idle_submit_adds_and_resets() {
        let mut store = store_with("[]");
        let mut form = EmployeeForm::new();
        type_into(&mut form, "Ada", "Eng", "a@x.com");

        let outcome = form.submit(&mut store).unwrap();
        let Submitted::Added(ada) = outcome else {
            panic!("expected an add");
        };
        assert_eq!(ada.name, "Ada");
        assert_eq!(store.len(), 1);
        assert_eq!(form.values(), &EmployeeFields::default());
        assert_eq!(form.mode(), EditMode::Idle);
    }

    #[test]
    fn test_edit_workflow_keeps_name() {
        let mut store = store_with(r#"[{"id":1,"name":"Bo"},{"id":2,"name":"Cy"}]"#);
        let mut form = EmployeeForm::new();
        let bo = store.get(EmployeeId(1)).cloned().unwrap();

        form.begin_edit(&bo);
        assert_eq!(form.submit_label(), "Update Employee");
        assert!(!form.set_field(Field::Name, "Robert"));
        type_into(&mut form, "ignored", "Lead", "b@x.com");

        let outcome = form.submit(&mut store).unwrap();
        assert_eq!(outcome, Submitted::Updated { id: EmployeeId(1), found: true });
        let bo = store.get(EmployeeId(1)).unwrap();
        assert_eq!(bo.name, "Bo");
        assert_eq!(bo.job_title, "Lead");
        assert_eq!(bo.email, "b@x.com");
        assert_eq!(store.employees()[1].name, "Cy");
        assert_eq!(form.mode(), EditMode::Idle);
    }

    #[test]
    fn test_cancel_discards_edits() {
        let json = r#"[{"id":1,"name":"Bo","jobTitle":"Dev","email":""}]"#;
        let mut store = store_with(json);
        let mut form = EmployeeForm::new();
        form.begin_edit(&store.employees()[0].clone());
        form.set_field(Field::JobTitle, "CEO");
        form.cancel();

        assert_eq!(form.mode(), EditMode::Idle);
        assert_eq!(store.employees()[0].job_title, "Dev");
        // Next submit is an add again
        type_into(&mut form, "Cy", "", "");
        assert!(matches!(form.submit(&mut store), Ok(Submitted::Added(_))));
    }

    #[test]
    fn test_second_edit_replaces_selection() {
        let store = store_with(r#"[{"id":1,"name":"Bo"},{"id":2,"name":"Cy"}]"#);
        let mut form = EmployeeForm::new();
        form.begin_edit(&store.employees()[0]);
        form.set_field(Field::JobTitle, "half typed");
        form.begin_edit(&store.employees()[1]);

        assert_eq!(form.selection(), Some(EmployeeId(2)));
        assert_eq!(form.values().name, "Cy");
        assert_eq!(form.values().job_title, "");
    }

    #[test]
    fn test_edit_of_deleted_record_is_noop() {
        let mut store = store_with(r#"[{"id":1,"name":"Bo"}]"#);
        let mut form = EmployeeForm::new();
        form.begin_edit(&store.employees()[0].clone());
        store.delete(EmployeeId(1));

        let outcome = form.submit(&mut store).unwrap();
        assert_eq!(outcome, Submitted::Updated { id: EmployeeId(1), found: false });
        assert!(store.is_empty());
        assert_eq!(form.mode(), EditMode::Idle);
    }

    proptest! {
        #[test]
        fn prop_edit_changes_only_target(
            count in 1usize..6,
            pick in 0usize..6,
            job_title in "[A-Za-z ]{0,10}",
            email in "[a-z@.]{0,10}",
        ) {
            let mut store = store_with("[]");
            let mut form = EmployeeForm::new();
            for i in 0..count {
                type_into(&mut form, &format!("E{}", i), "T", "e@x.com");
                form.submit(&mut store).unwrap();
            }
            let before = store.employees().to_vec();
            let target = before[pick % count].clone();

            form.begin_edit(&target);
            form.set_field(Field::Name, "changed");
            form.set_field(Field::JobTitle, job_title.clone());
            form.set_field(Field::Email, email.clone());
            form.submit(&mut store).unwrap();

            prop_assert_eq!(store.len(), before.len());
            for (old, new) in before.iter().zip(store.employees()) {
                prop_assert_eq!(old.id, new.id);
                prop_assert_eq!(&old.name, &new.name);
                if old.id == target.id {
                    prop_assert_eq!(&new.job_title, &job_title);
                    prop_assert_eq!(&new.email, &email);
                } else {
                    prop_assert_eq!(old, new);
                }
            }
        }
    }
}
