//! Salary record service.
//!
//! Bridges the pay calculator to the store: records are computed and then
//! inserted in one step, and can be looked up by id, by period (optionally
//! narrowed to a department) or by employee.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::{debug, info};

use crate::calculation::compute_rounded;
use crate::config::RecordPolicy;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Employee, PayBreakdown, PayParameters, Period, SalaryRecord, SalaryRecordDraft};
use crate::store::Store;

/// Resource name used in `NotFound` errors for salary records.
pub const SALARY_RECORD_RESOURCE: &str = "salary record";

/// Resource name used in `NotFound` errors for employees.
pub const EMPLOYEE_RESOURCE: &str = "employee";

/// Computes, stores and queries salary records.
#[derive(Clone)]
pub struct SalaryRecordService {
    store: Arc<dyn Store>,
    policy: RecordPolicy,
}

impl SalaryRecordService {
    /// Creates a service over `store` that applies `policy` on creation.
    pub fn new(store: Arc<dyn Store>, policy: RecordPolicy) -> Self {
        Self { store, policy }
    }

    /// Computes a rounded pay breakdown without storing anything.
    pub fn compute_only(&self, params: &PayParameters) -> ServiceResult<PayBreakdown> {
        compute_rounded(params)
    }

    /// Computes net pay for `draft` and stores it as a new salary record.
    ///
    /// Pay parameters are validated first, then the period and the employee
    /// reference as the policy requires. Nothing is stored if any check fails.
    pub fn create_record(&self, draft: SalaryRecordDraft) -> ServiceResult<SalaryRecord> {
        draft.parameters.validate()?;
        if self.policy.validate_period {
            draft.period().validate()?;
        }
        if self.policy.enforce_employee_reference
            && self.store.get_employee(draft.employee_id)?.is_none()
        {
            return Err(ServiceError::not_found(EMPLOYEE_RESOURCE, draft.employee_id));
        }

        let breakdown = compute_rounded(&draft.parameters)?;
        let record = self
            .store
            .insert_record(draft.into_new_record(breakdown.net_salary))?;

        info!(
            record_id = record.id,
            employee_id = record.employee_id,
            net_salary = record.calculated_salary,
            "Created salary record"
        );
        Ok(record)
    }

    /// Returns the salary record with the given id.
    pub fn get_record_by_id(&self, id: i64) -> ServiceResult<SalaryRecord> {
        self.store
            .get_record(id)?
            .ok_or_else(|| ServiceError::not_found(SALARY_RECORD_RESOURCE, id))
    }

    /// Returns the records whose period lies entirely within `period`.
    ///
    /// With a `department`, only records whose employee belongs to that
    /// department are returned; records without a stored employee never
    /// match a department. An empty department string is treated as absent.
    /// Results are in insertion order.
    pub fn get_records_by_period(
        &self,
        period: Period,
        department: Option<&str>,
    ) -> ServiceResult<Vec<SalaryRecord>> {
        let department = department.filter(|d| !d.is_empty());

        let predicate = |record: &SalaryRecord, employee: Option<&Employee>| {
            period.contains(&record.period())
                && match department {
                    Some(department) => employee.is_some_and(|e| e.department == department),
                    None => true,
                }
        };
        let records = self.store.query_records(&predicate)?;

        debug!(
            period_start = %period.start,
            period_end = %period.end,
            department = department.unwrap_or(""),
            count = records.len(),
            "Queried salary records by period"
        );
        Ok(records)
    }

    /// Returns an employee's records, most recent period first.
    ///
    /// Fails with `EmployeeRecordsNotFound` when the employee has no records,
    /// whether or not the employee exists.
    pub fn get_records_by_employee(&self, employee_id: i64) -> ServiceResult<Vec<SalaryRecord>> {
        let mut records = self
            .store
            .query_records(&|record: &SalaryRecord, _: Option<&Employee>| {
                record.employee_id == employee_id
            })?;

        if records.is_empty() {
            return Err(ServiceError::EmployeeRecordsNotFound { employee_id });
        }

        records.sort_by_key(|record| Reverse(record.period_start));
        Ok(records)
    }

    /// Deletes the salary record with the given id.
    pub fn delete_record(&self, id: i64) -> ServiceResult<()> {
        if !self.store.delete_record(id)? {
            return Err(ServiceError::not_found(SALARY_RECORD_RESOURCE, id));
        }
        info!(record_id = id, "Deleted salary record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEmployee;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(policy: RecordPolicy) -> (Arc<MemoryStore>, SalaryRecordService) {
        let store = Arc::new(MemoryStore::new());
        let service = SalaryRecordService::new(store.clone(), policy);
        (store, service)
    }

    fn add_employee(store: &MemoryStore, department: &str) -> Employee {
        store
            .insert_employee(NewEmployee {
                name: "Test Employee".to_string(),
                position: "Engineer".to_string(),
                department: department.to_string(),
            })
            .unwrap()
    }

    fn draft(employee_id: i64, start: NaiveDate, end: NaiveDate) -> SalaryRecordDraft {
        SalaryRecordDraft {
            employee_id,
            parameters: PayParameters::new(160.0, 25.0)
                .with_overtime(10.0)
                .with_deductions(200.0),
            period_start: start,
            period_end: end,
        }
    }

    fn january(employee_id: i64) -> SalaryRecordDraft {
        draft(employee_id, date(2025, 1, 1), date(2025, 1, 31))
    }

    fn february(employee_id: i64) -> SalaryRecordDraft {
        draft(employee_id, date(2025, 2, 1), date(2025, 2, 28))
    }

    #[test]
    fn test_compute_only_is_rounded_and_not_stored() {
        let (store, service) = setup(RecordPolicy::default());
        let breakdown = service
            .compute_only(&PayParameters::new(160.0, 100.0))
            .unwrap();
        assert_eq!(breakdown.net_salary, 17600.0);
        assert!(
            store
                .query_records(&|_: &SalaryRecord, _: Option<&Employee>| true)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_create_record_stores_calculated_salary() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");

        let record = service.create_record(january(employee.id)).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.employee_id, employee.id);
        assert_eq!(record.calculated_salary, 4575.0);
        assert_eq!(record.deductions, 200.0);
        assert_eq!(store.get_record(record.id).unwrap(), Some(record));
    }

    #[test]
    fn test_create_record_rejects_unknown_employee() {
        let (store, service) = setup(RecordPolicy::default());

        let result = service.create_record(january(99));

        match result {
            Err(ServiceError::NotFound { resource, id }) => {
                assert_eq!(resource, EMPLOYEE_RESOURCE);
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(store.get_record(1).unwrap().is_none());
    }

    #[test]
    fn test_permissive_policy_allows_orphan_record() {
        let (_, service) = setup(RecordPolicy::permissive());
        let record = service.create_record(january(99)).unwrap();
        assert_eq!(record.employee_id, 99);
    }

    #[test]
    fn test_create_record_rejects_reversed_period() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");

        let result = service.create_record(draft(employee.id, date(2025, 1, 31), date(2025, 1, 1)));

        assert!(matches!(result, Err(ServiceError::InvalidPeriod { .. })));
        assert!(store.get_record(1).unwrap().is_none());
    }

    #[test]
    fn test_create_record_rejects_negative_parameters() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        let mut bad = january(employee.id);
        bad.parameters.hourly_rate = -1.0;

        assert!(matches!(
            service.create_record(bad),
            Err(ServiceError::Validation { .. })
        ));
        assert!(store.get_record(1).unwrap().is_none());
    }

    #[test]
    fn test_invalid_parameters_reported_before_reference_checks() {
        let (store, service) = setup(RecordPolicy::default());
        let mut bad = draft(99, date(2025, 1, 31), date(2025, 1, 1));
        bad.parameters.base_hours = -40.0;

        match service.create_record(bad) {
            Err(ServiceError::Validation { field, .. }) => assert_eq!(field, "base_hours"),
            other => panic!("expected Validation, got {:?}", other),
        }
        assert!(store.get_record(1).unwrap().is_none());
    }

    #[test]
    fn test_create_record_rejects_overflowing_salary() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        let mut huge = january(employee.id);
        huge.parameters = PayParameters::new(1e200, 1e200);

        assert!(matches!(
            service.create_record(huge),
            Err(ServiceError::Validation { .. })
        ));
        assert!(store.get_record(1).unwrap().is_none());
    }

    #[test]
    fn test_get_record_by_id_missing() {
        let (_, service) = setup(RecordPolicy::default());
        assert!(matches!(
            service.get_record_by_id(1),
            Err(ServiceError::NotFound { id: 1, .. })
        ));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        let record = service.create_record(january(employee.id)).unwrap();

        service.delete_record(record.id).unwrap();

        assert!(matches!(
            service.get_record_by_id(record.id),
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_record(record.id),
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_period_query_requires_containment() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        service.create_record(january(employee.id)).unwrap();
        service.create_record(february(employee.id)).unwrap();

        let january_only = service
            .get_records_by_period(Period::new(date(2025, 1, 1), date(2025, 1, 31)), None)
            .unwrap();
        assert_eq!(january_only.len(), 1);
        assert_eq!(january_only[0].period_start, date(2025, 1, 1));

        let whole_year = service
            .get_records_by_period(Period::new(date(2025, 1, 1), date(2025, 12, 31)), None)
            .unwrap();
        assert_eq!(whole_year.len(), 2);
        assert_eq!(whole_year[0].period_start, date(2025, 1, 1));
    }

    #[test]
    fn test_period_query_excludes_partial_overlap() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        service.create_record(february(employee.id)).unwrap();

        let records = service
            .get_records_by_period(Period::new(date(2025, 2, 15), date(2025, 3, 31)), None)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_period_query_filters_by_department() {
        let (store, service) = setup(RecordPolicy::default());
        let engineer = add_employee(&store, "Engineering");
        let designer = add_employee(&store, "Design");
        service.create_record(january(engineer.id)).unwrap();
        service.create_record(february(engineer.id)).unwrap();
        service.create_record(january(designer.id)).unwrap();
        let year = Period::new(date(2025, 1, 1), date(2025, 12, 31));

        let engineering = service
            .get_records_by_period(year, Some("Engineering"))
            .unwrap();
        assert_eq!(engineering.len(), 2);
        assert!(engineering.iter().all(|r| r.employee_id == engineer.id));

        let marketing = service.get_records_by_period(year, Some("Marketing")).unwrap();
        assert!(marketing.is_empty());
    }

    #[test]
    fn test_empty_department_means_no_filter() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        service.create_record(january(employee.id)).unwrap();
        let year = Period::new(date(2025, 1, 1), date(2025, 12, 31));

        assert_eq!(service.get_records_by_period(year, Some("")).unwrap().len(), 1);
    }

    #[test]
    fn test_department_filter_skips_orphaned_records() {
        let (store, service) = setup(RecordPolicy::permissive());
        let employee = add_employee(&store, "Engineering");
        service.create_record(january(employee.id)).unwrap();
        service.create_record(january(42)).unwrap();
        let year = Period::new(date(2025, 1, 1), date(2025, 12, 31));

        assert_eq!(service.get_records_by_period(year, None).unwrap().len(), 2);
        assert_eq!(
            service
                .get_records_by_period(year, Some("Engineering"))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_records_by_employee_most_recent_first() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");
        let other = add_employee(&store, "Engineering");
        service.create_record(january(employee.id)).unwrap();
        service.create_record(january(other.id)).unwrap();
        service.create_record(february(employee.id)).unwrap();

        let records = service.get_records_by_employee(employee.id).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].period_start, date(2025, 2, 1));
        assert_eq!(records[1].period_start, date(2025, 1, 1));
    }

    #[test]
    fn test_records_by_employee_none_is_not_found() {
        let (store, service) = setup(RecordPolicy::default());
        let employee = add_employee(&store, "Engineering");

        assert!(matches!(
            service.get_records_by_employee(employee.id),
            Err(ServiceError::EmployeeRecordsNotFound { employee_id }) if employee_id == employee.id
        ));
    }
}
