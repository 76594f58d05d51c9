//! Employee record types shared by the store and the transport layer.

use serde::{Deserialize, Serialize};

/// One employee record.
///
/// `id` is the store key and never changes after creation. `name` and
/// `department` are replaced together by an [`EmployeePatch`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// Caller-supplied unique key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department code. Older clients send this as `dept`.
    #[serde(alias = "dept")]
    pub department: String,
}

impl Employee {
    /// Creates a record from its three fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
        }
    }

    /// Overwrites the mutable fields with the patch values. `id` is untouched.
    pub fn apply(&mut self, patch: &EmployeePatch) {
        self.name.clone_from(&patch.name);
        self.department.clone_from(&patch.department);
    }
}

/// Replacement values for the mutable fields of an [`Employee`].
///
/// Unknown fields (including `id`) are ignored on deserialization, so an
/// update body can be a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub name: String,
    #[serde(alias = "dept")]
    pub department: String,
}

impl EmployeePatch {
    #[must_use]
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
        }
    }
}

/// Number of records in the startup seed set.
pub const SEED_COUNT: usize = 5;

/// Fixed startup data: ids `"1"`..`"5"`, names `User1`..`User5`, all in `ENG`.
#[must_use]
pub fn seed_employees() -> Vec<Employee> {
    (1..=SEED_COUNT)
        .map(|i| Employee::new(i.to_string(), format!("User{i}"), "ENG"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_name_and_department_only() {
        let mut employee = Employee::new("1", "User1", "ENG");
        employee.apply(&EmployeePatch::new("Bob", "OPS"));

        assert_eq!(employee, Employee::new("1", "Bob", "OPS"));
    }

    #[test]
    fn serializes_with_department_field() {
        let json = serde_json::to_value(Employee::new("6", "Alice", "ENG")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "6", "name": "Alice", "department": "ENG"})
        );
    }

    #[test]
    fn accepts_legacy_dept_alias() {
        let employee: Employee =
            serde_json::from_str(r#"{"id":"7","name":"Eve","dept":"SEC"}"#).unwrap();
        assert_eq!(employee.department, "SEC");

        let patch: EmployeePatch =
            serde_json::from_str(r#"{"name":"Eve","dept":"OPS"}"#).unwrap();
        assert_eq!(patch.department, "OPS");
    }

    #[test]
    fn patch_ignores_id_in_body() {
        let patch: EmployeePatch =
            serde_json::from_str(r#"{"id":"99","name":"Bob","department":"OPS"}"#).unwrap();
        assert_eq!(patch, EmployeePatch::new("Bob", "OPS"));
    }

    #[test]
    fn patch_requires_both_fields() {
        let result: Result<EmployeePatch, _> = serde_json::from_str(r#"{"name":"Bob"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seed_set_has_five_eng_users() {
        let seed = seed_employees();
        assert_eq!(seed.len(), SEED_COUNT);
        assert_eq!(seed[0], Employee::new("1", "User1", "ENG"));
        assert_eq!(seed[4], Employee::new("5", "User5", "ENG"));
        assert!(seed.iter().all(|e| e.department == "ENG"));
    }
}
