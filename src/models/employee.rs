//! Employee model and related types.
//!
//! An employee is a user's employment record within one company and,
//! optionally, one department.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// The employee's role within the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    /// Manages a department.
    Manager,
    /// Regular staff member.
    Staff,
}

/// The employee's gender, used for gender-restricted leave types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or unspecified.
    Other,
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The user account paired with this employee.
    pub user_id: String,
    /// The company the employee belongs to.
    pub company_id: String,
    /// The department, if assigned.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Full name.
    pub name: String,
    /// Role within the company.
    pub role: EmployeeRole,
    /// Gender.
    pub gender: Gender,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// False once the employee has been terminated.
    pub is_active: bool,
    /// The date the employee joined.
    pub join_date: NaiveDate,
}

impl Employee {
    /// Returns true if the employee is female.
    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    /// Fails with [`PolicyError::EmployeeInactive`] for terminated employees.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_policy_engine::models::{Employee, EmployeeRole, Gender};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     user_id: "user_001".to_string(),
    ///     company_id: "acme".to_string(),
    ///     department_id: None,
    ///     name: "Linh Tran".to_string(),
    ///     role: EmployeeRole::Staff,
    ///     gender: Gender::Female,
    ///     base_salary: Decimal::from(5_000_000),
    ///     is_active: true,
    ///     join_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    /// };
    /// assert!(employee.ensure_active().is_ok());
    ///
    /// employee.is_active = false;
    /// assert!(employee.ensure_active().is_err());
    /// ```
    pub fn ensure_active(&self) -> PolicyResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(PolicyError::EmployeeInactive {
                employee_id: self.id.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "user_id": "user_001",
            "company_id": "acme",
            "name": "Minh Nguyen",
            "role": "MANAGER",
            "gender": "MALE",
            "base_salary": "5000000",
            "is_active": true,
            "join_date": "2023-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.role, EmployeeRole::Manager);
        assert_eq!(employee.gender, Gender::Male);
        assert_eq!(employee.department_id, None);
        assert_eq!(employee.base_salary, Decimal::from(5_000_000));
        assert!(!employee.is_female());
    }

    #[test]
    fn test_enum_serialization_is_uppercase() {
        assert_eq!(
            serde_json::to_string(&EmployeeRole::Staff).unwrap(),
            "\"STAFF\""
        );
        assert_eq!(
            serde_json::to_string(&Gender::Female).unwrap(),
            "\"FEMALE\""
        );
    }
}
