//! SQLite-backed store.
//!
//! Tables are created on open if they do not exist, so a fresh database file
//! is usable immediately and an existing one keeps its data across restarts.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Employee, NewEmployee, NewSalaryRecord, SalaryRecord};

use super::{EmployeePredicate, RecordPredicate, Store};

const SQLITE_URL_PREFIX: &str = "sqlite://";

// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS employee (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  position TEXT NOT NULL,
  department TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS salary_record (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  employee_id INTEGER NOT NULL,
  base_hours REAL NOT NULL,
  hourly_rate REAL NOT NULL,
  overtime_hours REAL NOT NULL,
  deductions REAL NOT NULL,
  period_start TEXT NOT NULL,
  period_end TEXT NOT NULL,
  calculated_salary REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS salary_record_employee_id ON salary_record (employee_id);
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Memory,
    File(PathBuf),
}

/// Parses a `sqlite://` database URL.
///
/// The path follows the URL's third slash, so `sqlite:///payroll.db` is
/// relative and `sqlite:////var/lib/payroll.db` is absolute.
fn parse_url(database_url: &str) -> ServiceResult<Location> {
    let unsupported = || ServiceError::ConfigParseError {
        path: "database_url".to_string(),
        message: format!("unsupported database url '{}'", database_url),
    };

    let rest = database_url
        .strip_prefix(SQLITE_URL_PREFIX)
        .ok_or_else(unsupported)?;
    match rest {
        "" | "/:memory:" => Ok(Location::Memory),
        _ => match rest.strip_prefix('/') {
            Some(path) if !path.is_empty() => Ok(Location::File(PathBuf::from(path))),
            _ => Err(unsupported()),
        },
    }
}

fn storage_error(e: rusqlite::Error) -> ServiceError {
    ServiceError::Storage {
        message: e.to_string(),
    }
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        position: row.get(2)?,
        department: row.get(3)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SalaryRecord> {
    Ok(SalaryRecord {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        base_hours: row.get(2)?,
        hourly_rate: row.get(3)?,
        overtime_hours: row.get(4)?,
        deductions: row.get(5)?,
        period_start: row.get(6)?,
        period_end: row.get(7)?,
        calculated_salary: row.get(8)?,
    })
}

/// Reads the left-joined employee columns that follow the record columns.
fn joined_employee_from_row(row: &Row<'_>) -> rusqlite::Result<Option<Employee>> {
    let Some(id) = row.get::<_, Option<i64>>(9)? else {
        return Ok(None);
    };
    Ok(Some(Employee {
        id,
        name: row.get(10)?,
        position: row.get(11)?,
        department: row.get(12)?,
    }))
}

/// A [`Store`] persisted in a SQLite database.
///
/// One connection is shared behind a mutex; each store call holds it for the
/// duration of that call only.
///
/// # Example
///
/// ```
/// use payroll_service::models::NewEmployee;
/// use payroll_service::store::{SqliteStore, Store};
///
/// let store = SqliteStore::open("sqlite:///:memory:")?;
/// let employee = store.insert_employee(NewEmployee {
///     name: "Ada".to_string(),
///     position: "Engineer".to_string(),
///     department: "R&D".to_string(),
/// })?;
/// assert_eq!(store.get_employee(employee.id)?, Some(employee));
/// # Ok::<(), payroll_service::error::ServiceError>(())
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens the database named by a `sqlite://` URL, creating the file and
    /// tables if needed.
    ///
    /// Returns `ConfigParseError` for URLs that are not `sqlite://` URLs and
    /// `Storage` if the database cannot be opened.
    pub fn open(database_url: &str) -> ServiceResult<Self> {
        match parse_url(database_url)? {
            Location::Memory => Self::open_in_memory(),
            Location::File(path) => Self::open_path(&path),
        }
    }

    /// Opens (or creates) a database file.
    pub fn open_path(path: &Path) -> ServiceResult<Self> {
        let conn = Connection::open(path).map_err(storage_error)?;
        info!(path = %path.display(), "Opened SQLite database");
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> ServiceResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> ServiceResult<Self> {
        conn.execute_batch(SCHEMA).map_err(storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> ServiceResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ServiceError::Storage {
            message: "database connection lock poisoned".to_string(),
        })
    }
}

impl Store for SqliteStore {
    fn insert_employee(&self, new: NewEmployee) -> ServiceResult<Employee> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO employee (name, position, department) VALUES (?1, ?2, ?3)",
            params![new.name, new.position, new.department],
        )
        .map_err(storage_error)?;
        let employee = Employee::from_new(conn.last_insert_rowid(), new);
        debug!(employee_id = employee.id, "Inserted employee");
        Ok(employee)
    }

    fn get_employee(&self, id: i64) -> ServiceResult<Option<Employee>> {
        self.lock()?
            .query_row(
                "SELECT id, name, position, department FROM employee WHERE id = ?1",
                params![id],
                employee_from_row,
            )
            .optional()
            .map_err(storage_error)
    }

    fn update_employee(&self, employee: &Employee) -> ServiceResult<bool> {
        let changed = self
            .lock()?
            .execute(
                "UPDATE employee SET name = ?2, position = ?3, department = ?4 WHERE id = ?1",
                params![
                    employee.id,
                    employee.name,
                    employee.position,
                    employee.department
                ],
            )
            .map_err(storage_error)?;
        Ok(changed > 0)
    }

    fn delete_employee(&self, id: i64) -> ServiceResult<bool> {
        let changed = self
            .lock()?
            .execute("DELETE FROM employee WHERE id = ?1", params![id])
            .map_err(storage_error)?;
        Ok(changed > 0)
    }

    fn query_employees(&self, predicate: EmployeePredicate<'_>) -> ServiceResult<Vec<Employee>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name, position, department FROM employee ORDER BY id")
            .map_err(storage_error)?;
        let employees = stmt
            .query_map([], employee_from_row)
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;

        Ok(employees
            .into_iter()
            .filter(|employee| predicate(employee))
            .collect())
    }

    fn insert_record(&self, new: NewSalaryRecord) -> ServiceResult<SalaryRecord> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO salary_record (
               employee_id, base_hours, hourly_rate, overtime_hours, deductions,
               period_start, period_end, calculated_salary
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.employee_id,
                new.base_hours,
                new.hourly_rate,
                new.overtime_hours,
                new.deductions,
                new.period_start,
                new.period_end,
                new.calculated_salary
            ],
        )
        .map_err(storage_error)?;
        let record = SalaryRecord::from_new(conn.last_insert_rowid(), new);
        debug!(
            record_id = record.id,
            employee_id = record.employee_id,
            "Inserted salary record"
        );
        Ok(record)
    }

    fn get_record(&self, id: i64) -> ServiceResult<Option<SalaryRecord>> {
        self.lock()?
            .query_row(
                "SELECT id, employee_id, base_hours, hourly_rate, overtime_hours, deductions,
                        period_start, period_end, calculated_salary
                 FROM salary_record WHERE id = ?1",
                params![id],
                record_from_row,
            )
            .optional()
            .map_err(storage_error)
    }

    fn delete_record(&self, id: i64) -> ServiceResult<bool> {
        let changed = self
            .lock()?
            .execute("DELETE FROM salary_record WHERE id = ?1", params![id])
            .map_err(storage_error)?;
        Ok(changed > 0)
    }

    fn query_records(&self, predicate: RecordPredicate<'_>) -> ServiceResult<Vec<SalaryRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT r.id, r.employee_id, r.base_hours, r.hourly_rate, r.overtime_hours,
                        r.deductions, r.period_start, r.period_end, r.calculated_salary,
                        e.id, e.name, e.position, e.department
                 FROM salary_record r
                 LEFT JOIN employee e ON e.id = r.employee_id
                 ORDER BY r.id",
            )
            .map_err(storage_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((record_from_row(row)?, joined_employee_from_row(row)?))
            })
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .filter(|(record, employee)| predicate(record, employee.as_ref()))
            .map(|(record, _)| record)
            .collect())
    }
}
