//! Roster store
//!
//! Single source of truth for the employee list. Every successful mutation is
//! written through to storage in full and then announced to subscribers, so a
//! presentation layer can redraw from the latest state.

use std::collections::HashSet;

use crate::consts::ROSTER_KEY;
use crate::employee::{Employee, EmployeeId, ValidFields};
use crate::notify::Notice;
use crate::persistence;
use crate::platform::{Clock, KeyValueStorage};

/// Change announced after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    Added(Employee),
    Updated(Employee),
    Deleted(EmployeeId),
}

impl RosterEvent {
    /// Success notification owed to the user, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            RosterEvent::Added(emp) => Some(Notice::employee_added(&emp.name)),
            RosterEvent::Updated(_) => None,
            RosterEvent::Deleted(_) => Some(Notice::employee_deleted()),
        }
    }
}

/// Handle returned by [`RosterStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RosterEvent)>;

/// Ordered employee roster mirrored to key-value storage
pub struct RosterStore {
    employees: Vec<Employee>,
    storage: Box<dyn KeyValueStorage>,
    clock: Box<dyn Clock>,
    key: String,
    /// Highest id issued or loaded; new ids go above it while there is room
    last_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl RosterStore {
    /// Load the roster stored under the default key
    pub fn load(storage: impl KeyValueStorage + 'static, clock: impl Clock + 'static) -> Self {
        Self::load_from(Box::new(storage), Box::new(clock), ROSTER_KEY)
    }

    /// Load from an explicit key; missing or unreadable data gives an empty roster
    pub fn load_from(
        storage: Box<dyn KeyValueStorage>,
        clock: Box<dyn Clock>,
        key: &str,
    ) -> Self {
        let employees = persistence::load_or_empty(storage.as_ref(), key);
        let last_id = employees.iter().map(|e| e.id.get()).max().unwrap_or(0);
        Self {
            employees,
            storage,
            clock,
            key: key.to_string(),
            last_id,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Append a new employee with a fresh id
    pub fn add(&mut self, fields: ValidFields) -> Employee {
        let id = self.next_id();
        let employee = Employee::new(id, fields);
        self.employees.push(employee.clone());
        log::info!("Added employee {} ({})", employee.id, employee.name);

        self.persist();
        self.emit(RosterEvent::Added(employee.clone()));
        employee
    }

    /// Replace the fields of `id`; returns false (and changes nothing) if absent
    pub fn update(&mut self, id: EmployeeId, fields: ValidFields) -> bool {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            log::debug!("Update ignored, no employee with id {}", id);
            return false;
        };
        employee.replace_fields(fields);
        let updated = employee.clone();
        log::info!("Updated employee {}", id);

        self.persist();
        self.emit(RosterEvent::Updated(updated));
        true
    }

    /// Remove `id`; returns false (and changes nothing) if absent
    pub fn delete(&mut self, id: EmployeeId) -> bool {
        let Some(pos) = self.employees.iter().position(|e| e.id == id) else {
            log::debug!("Delete ignored, no employee with id {}", id);
            return false;
        };
        self.employees.remove(pos);
        log::info!("Deleted employee {}", id);

        self.persist();
        self.emit(RosterEvent::Deleted(id));
        true
    }

    /// Register a listener called after every successful mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&RosterEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Timestamp id, bumped past anything already issued
    ///
    /// Once the high-water mark sits at `u64::MAX` there is nothing above it;
    /// the lowest id not held by a current record is used instead.
    fn next_id(&mut self) -> EmployeeId {
        let Some(floor) = self.last_id.checked_add(1) else {
            let id = self.lowest_free_id();
            log::warn!("Employee ids exhausted, reusing free id {}", id);
            return id;
        };
        let id = self.clock.now_ms().max(floor);
        self.last_id = id;
        EmployeeId(id)
    }

    fn lowest_free_id(&self) -> EmployeeId {
        let taken: HashSet<u64> = self.employees.iter().map(|e| e.id.get()).collect();
        // The roster is finite, so some id in 0..=len is free
        (0..=self.employees.len() as u64)
            .find(|id| !taken.contains(id))
            .map(EmployeeId)
            .unwrap_or(EmployeeId(0))
    }

    fn persist(&mut self) {
        persistence::save(self.storage.as_mut(), &self.key, &self.employees);
    }

    fn emit(&mut self, event: RosterEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for RosterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterStore")
            .field("employees", &self.employees)
            .field("key", &self.key)
            .field("last_id", &self.last_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
