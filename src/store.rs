//! In-process record store.
//!
//! All tables live behind a single [`tokio::sync::RwLock`]. Mutating
//! operations take the write guard once and run their whole
//! read-check-write sequence under it, which is what makes the
//! one-attendance-per-day, one-pending-leave and one-payslip-per-period
//! rules hold under concurrent requests. Attendance is additionally keyed
//! by `(employee_id, date)`.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{ActivityEntry, Attendance, Company, Employee, Leave, Salary};

/// The tables held by a [`Store`].
#[derive(Debug, Default)]
pub struct Tables {
    companies: HashMap<String, Company>,
    employees: HashMap<String, Employee>,
    attendance: BTreeMap<(String, NaiveDate), Attendance>,
    leaves: HashMap<Uuid, Leave>,
    salaries: HashMap<Uuid, Salary>,
    activity: Vec<ActivityEntry>,
}

impl Tables {
    /// Looks up a company.
    pub fn company(&self, company_id: &str) -> PolicyResult<&Company> {
        self.companies
            .get(company_id)
            .ok_or_else(|| PolicyError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Looks up a company for modification.
    pub fn company_mut(&mut self, company_id: &str) -> PolicyResult<&mut Company> {
        self.companies
            .get_mut(company_id)
            .ok_or_else(|| PolicyError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Inserts or replaces a company.
    pub fn put_company(&mut self, company: Company) {
        self.companies.insert(company.id.clone(), company);
    }

    /// Looks up an employee by employee id.
    pub fn employee(&self, employee_id: &str) -> PolicyResult<&Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| PolicyError::EmployeeNotFound {
                reference: employee_id.to_string(),
            })
    }

    /// Looks up an employee by employee id for modification.
    pub fn employee_mut(&mut self, employee_id: &str) -> PolicyResult<&mut Employee> {
        self.employees
            .get_mut(employee_id)
            .ok_or_else(|| PolicyError::EmployeeNotFound {
                reference: employee_id.to_string(),
            })
    }

    /// Looks up an employee by the paired user id. Surrounding whitespace
    /// is ignored.
    pub fn employee_by_user(&self, user_id: &str) -> PolicyResult<&Employee> {
        let user_id = user_id.trim();
        self.employees
            .values()
            .find(|e| e.user_id == user_id)
            .ok_or_else(|| PolicyError::EmployeeNotFound {
                reference: user_id.to_string(),
            })
    }

    /// Inserts a new employee. Employee ids and user ids are both unique.
    pub fn insert_employee(&mut self, employee: Employee) -> PolicyResult<()> {
        if self.employees.values().any(|e| e.user_id == employee.user_id) {
            return Err(PolicyError::DuplicateEmployee {
                user_id: employee.user_id,
            });
        }
        if self.employees.contains_key(&employee.id) {
            return Err(PolicyError::invalid_field(
                "id",
                format!("employee '{}' already exists", employee.id),
            ));
        }
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// The attendance record for an employee's day, if any.
    pub fn attendance(&self, employee_id: &str, date: NaiveDate) -> Option<&Attendance> {
        self.attendance.get(&(employee_id.to_string(), date))
    }

    /// Inserts or replaces the record for the record's (employee, date).
    pub fn upsert_attendance(&mut self, record: Attendance) {
        self.attendance
            .insert((record.employee_id.clone(), record.date), record);
    }

    /// All attendance records of an employee, oldest first.
    pub fn attendance_for(&self, employee_id: &str) -> impl Iterator<Item = &Attendance> {
        let from = (employee_id.to_string(), NaiveDate::MIN);
        let to = (employee_id.to_string(), NaiveDate::MAX);
        self.attendance.range(from..=to).map(|(_, record)| record)
    }

    /// Looks up a leave.
    pub fn leave(&self, leave_id: Uuid) -> PolicyResult<&Leave> {
        self.leaves
            .get(&leave_id)
            .ok_or(PolicyError::LeaveNotFound { leave_id })
    }

    /// Looks up a leave for modification.
    pub fn leave_mut(&mut self, leave_id: Uuid) -> PolicyResult<&mut Leave> {
        self.leaves
            .get_mut(&leave_id)
            .ok_or(PolicyError::LeaveNotFound { leave_id })
    }

    /// Inserts a new leave.
    pub fn insert_leave(&mut self, leave: Leave) {
        self.leaves.insert(leave.id, leave);
    }

    /// Copies of an employee's leaves, oldest start date first.
    pub fn leaves_for(&self, employee_id: &str) -> Vec<Leave> {
        let mut leaves: Vec<Leave> = self
            .leaves
            .values()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        leaves.sort_by(|a, b| (a.start_date, a.created_at).cmp(&(b.start_date, b.created_at)));
        leaves
    }

    /// Looks up a payslip.
    pub fn salary(&self, salary_id: Uuid) -> PolicyResult<&Salary> {
        self.salaries
            .get(&salary_id)
            .ok_or(PolicyError::SalaryNotFound { salary_id })
    }

    /// Looks up a payslip for modification.
    pub fn salary_mut(&mut self, salary_id: Uuid) -> PolicyResult<&mut Salary> {
        self.salaries
            .get_mut(&salary_id)
            .ok_or(PolicyError::SalaryNotFound { salary_id })
    }

    /// The payslip for an employee's (month, year), if any.
    pub fn salary_for_period(&self, employee_id: &str, month: u32, year: i32) -> Option<&Salary> {
        self.salaries
            .values()
            .find(|s| s.employee_id == employee_id && s.month == month && s.year == year)
    }

    /// Inserts a new payslip. At most one payslip per (employee, month, year).
    pub fn insert_salary(&mut self, salary: Salary) -> PolicyResult<()> {
        if self
            .salary_for_period(&salary.employee_id, salary.month, salary.year)
            .is_some()
        {
            return Err(PolicyError::DuplicateSalary {
                employee_id: salary.employee_id,
                month: salary.month,
                year: salary.year,
            });
        }
        self.salaries.insert(salary.id, salary);
        Ok(())
    }

    /// Appends an entry to the activity log.
    pub fn record_activity(&mut self, entry: ActivityEntry) {
        self.activity.push(entry);
    }

    /// A company's activity log, oldest first.
    pub fn activity_for(&self, company_id: &str) -> Vec<ActivityEntry> {
        self.activity
            .iter()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect()
    }
}

/// Shared record store.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given companies.
    pub fn with_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        let mut tables = Tables::default();
        for company in companies {
            tables.put_company(company);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Acquires shared read access.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquires exclusive write access.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
