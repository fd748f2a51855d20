//! Name filter for the displayed roster

use crate::employee::Employee;

/// Records whose name contains `query`, ignoring case, in roster order
///
/// Never mutates the roster; an empty query keeps every record.
pub fn filter<'a, I>(employees: I, query: &str) -> Vec<&'a Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let needle = query.to_lowercase();
    employees
        .into_iter()
        .filter(|emp| name_matches(&emp.name, &needle))
        .collect()
}

/// True if `name` matches an already-lowercased needle
fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}
