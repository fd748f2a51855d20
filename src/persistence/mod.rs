//! Roster persistence
//!
//! The stored shape is a bare JSON array of employee objects under one key:
//! `[{"id":1700000000000,"name":"Ada","jobTitle":"Eng","email":"a@x.com"}]`.
//! There is no envelope and no versioning; the whole roster is rewritten on
//! every save.

use std::collections::HashSet;

use crate::employee::Employee;
use crate::error::PersistenceError;
use crate::platform::KeyValueStorage;

/// Encode the full roster
pub fn encode(employees: &[Employee]) -> Result<String, PersistenceError> {
    serde_json::to_string(employees).map_err(PersistenceError::Encode)
}

/// Decode a stored roster
///
/// Records that break the roster invariants (empty name, repeated id) are
/// dropped, keeping the first occurrence of each id.
pub fn decode(json: &str) -> Result<Vec<Employee>, PersistenceError> {
    let decoded: Vec<Employee> = serde_json::from_str(json).map_err(PersistenceError::Decode)?;
    let total = decoded.len();

    let mut seen = HashSet::with_capacity(total);
    let employees: Vec<Employee> = decoded
        .into_iter()
        .filter(|emp| !emp.name.is_empty() && seen.insert(emp.id))
        .collect();

    if employees.len() != total {
        log::warn!(
            "Dropped {} invalid stored employee records",
            total - employees.len()
        );
    }
    Ok(employees)
}

/// Read the roster stored under `key`; `Ok(None)` if nothing was ever saved
pub fn read(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Vec<Employee>>, PersistenceError> {
    match storage.get_item(key)? {
        Some(json) => decode(&json).map(Some),
        None => Ok(None),
    }
}

/// Write the full roster under `key`
pub fn write(
    storage: &mut dyn KeyValueStorage,
    key: &str,
    employees: &[Employee],
) -> Result<(), PersistenceError> {
    let json = encode(employees)?;
    storage.set_item(key, &json)?;
    Ok(())
}

/// Load with fallback: any failure is logged and yields an empty roster
pub fn load_or_empty(storage: &dyn KeyValueStorage, key: &str) -> Vec<Employee> {
    match read(storage, key) {
        Ok(Some(employees)) => {
            log::info!("Loaded {} employees", employees.len());
            employees
        }
        Ok(None) => {
            log::info!("No stored roster found, starting empty");
            Vec::new()
        }
        Err(e) => {
            log::warn!("Could not read stored roster, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Best-effort save: failures are logged, never returned
pub fn save(storage: &mut dyn KeyValueStorage, key: &str, employees: &[Employee]) {
    match write(storage, key, employees) {
        Ok(()) => log::info!("Roster saved ({} employees)", employees.len()),
        Err(e) => log::error!("Roster save failed: {}", e),
    }
}
