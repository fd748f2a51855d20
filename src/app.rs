//! Roster controller
//!
//! Owns the store, the form and the filter query. The presentation layer
//! feeds it [`UiEvent`]s and reads back the state it needs to draw.

use crate::editor::{EmployeeForm, Submitted};
use crate::employee::{Employee, EmployeeId, Field};
use crate::error::ValidationError;
use crate::filter::filter;
use crate::notify::Notice;
use crate::settings::Settings;
use crate::store::{RosterEvent, RosterStore};

/// Input coming from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FieldChanged(Field, String),
    Submit,
    FilterChanged(String),
    EditClicked(EmployeeId),
    DeleteClicked(EmployeeId),
    CancelEdit,
}

#[derive(Debug)]
pub struct RosterApp {
    store: RosterStore,
    form: EmployeeForm,
    query: String,
    settings: Settings,
}

impl RosterApp {
    pub fn new(store: RosterStore, settings: Settings) -> Self {
        Self {
            store,
            form: EmployeeForm::new(),
            query: String::new(),
            settings,
        }
    }

    pub fn roster(&self) -> &[Employee] {
        self.store.employees()
    }

    /// Roster rows matching the current filter
    pub fn visible(&self) -> Vec<&Employee> {
        filter(self.store.employees(), &self.query)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.store.get(id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> Option<&Employee> {
        self.form.selection().and_then(|id| self.store.get(id))
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Direct store access, e.g. to subscribe for redraws
    pub fn store_mut(&mut self) -> &mut RosterStore {
        &mut self.store
    }

    /// Apply one UI event; returns the notifications to show
    pub fn handle(&mut self, event: UiEvent) -> Vec<Notice> {
        match event {
            UiEvent::FieldChanged(field, value) => {
                self.form.set_field(field, value);
                Vec::new()
            }
            UiEvent::Submit => match self.submit() {
                Ok(notices) => notices,
                Err(e) => {
                    log::debug!("Submit blocked: {}", e);
                    Vec::new()
                }
            },
            UiEvent::FilterChanged(query) => {
                self.query = query;
                Vec::new()
            }
            UiEvent::EditClicked(id) => {
                match self.store.get(id) {
                    Some(employee) => self.form.begin_edit(employee),
                    None => log::debug!("Edit ignored, no employee with id {}", id),
                }
                Vec::new()
            }
            UiEvent::DeleteClicked(id) => {
                if self.form.selection() == Some(id) {
                    self.form.cancel();
                }
                if self.store.delete(id) {
                    self.present(RosterEvent::Deleted(id))
                } else {
                    Vec::new()
                }
            }
            UiEvent::CancelEdit => {
                self.form.cancel();
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Result<Vec<Notice>, ValidationError> {
        let notices = match self.form.submit(&mut self.store)? {
            Submitted::Added(employee) => self.present(RosterEvent::Added(employee)),
            Submitted::Updated { .. } => Vec::new(),
        };
        Ok(notices)
    }

    fn present(&self, event: RosterEvent) -> Vec<Notice> {
        event
            .notice()
            .and_then(|notice| self.settings.present(notice))
            .into_iter()
            .collect()
    }
}
