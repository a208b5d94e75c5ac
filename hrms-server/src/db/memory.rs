//! In-memory store
//!
//! Backs the integration tests and development runs without a database.
//! Every operation holds one lock for its whole duration, which gives the
//! attendance read-then-append the same atomicity the PostgreSQL store gets
//! from its advisory lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    AttendanceRecord, CheckAction, DayStatus, Department, Employee, EmployeeReview,
    EmployeeUpdate, Leave, LeaveStats, LeaveStatus, LeaveView, NewLeave, NewReview,
    ReviewCandidate, ReviewOverview, Role, UserProfile,
};
use shared::util::local_today;
use tokio::sync::Mutex;

use super::{
    AttendanceStore, Credentials, DepartmentStore, LeaveStore, NewUser, ProfileChanges,
    RepoError, RepoResult, ReviewStore, Store, UserStore, normalize_email,
};
use crate::attendance::{self, DayWindow, TransitionOutcome};

#[derive(Debug, Clone)]
struct UserRow {
    employee: Employee,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct ReviewRow {
    id: i64,
    employee_id: i64,
    reviewer_id: Option<i64>,
    rating: i32,
    comments: Option<String>,
    review_date: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, UserRow>,
    departments: BTreeMap<i64, Department>,
    attendance: Vec<AttendanceRecord>,
    leaves: BTreeMap<i64, Leave>,
    reviews: Vec<ReviewRow>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn department_name(&self, id: Option<i64>) -> Option<String> {
        id.and_then(|id| self.departments.get(&id)).map(|d| d.name.clone())
    }

    /// Mirrors the `users.department_id` foreign key
    fn check_department(&self, id: Option<i64>) -> RepoResult<()> {
        match id {
            Some(id) if !self.departments.contains_key(&id) => Err(RepoError::Constraint(
                format!("users.department_id {id} has no department"),
            )),
            _ => Ok(()),
        }
    }

    /// Employee with the joined department name filled in
    fn employee(&self, row: &UserRow) -> Employee {
        Employee {
            department_name: self.department_name(row.employee.department_id),
            ..row.employee.clone()
        }
    }

    fn user_mut(&mut self, id: i64) -> Option<&mut Employee> {
        self.users.get_mut(&id).map(|row| &mut row.employee)
    }

    fn updated(&self, id: i64) -> Option<Employee> {
        self.users.get(&id).map(|row| self.employee(row))
    }

    fn leave_view(&self, leave: &Leave) -> Option<LeaveView> {
        let requester = &self.users.get(&leave.user_id)?.employee;
        let approver = leave
            .approved_by
            .and_then(|id| self.users.get(&id))
            .map(|row| &row.employee);
        Some(LeaveView {
            leave: leave.clone(),
            first_name: requester.first_name.clone(),
            last_name: requester.last_name.clone(),
            email: requester.email.clone(),
            approver_first_name: approver.map(|a| a.first_name.clone()),
            approver_last_name: approver.map(|a| a.last_name.clone()),
        })
    }

    fn latest_in(&self, user_id: i64, window: DayWindow) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| r.user_id == user_id && window.contains(r.check_time))
            .max_by_key(|r| (r.check_time, r.id))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Credentials>> {
        let email = normalize_email(email);
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|row| row.employee.email == email)
            .map(|row| Credentials {
                user: tables.employee(row),
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        Ok(self.tables.lock().await.updated(id))
    }

    async fn find_active_by_id(&self, id: i64) -> RepoResult<Option<UserProfile>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .get(&id)
            .filter(|row| row.employee.is_active)
            .map(|row| row.employee.profile()))
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<Employee> {
        let email = normalize_email(&user.email);
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|row| row.employee.email == email) {
            return Err(RepoError::Duplicate(format!("users.email {email}")));
        }
        tables.check_department(user.department_id)?;
        let id = tables.next_id();
        let now = Utc::now();
        let employee = Employee {
            id,
            email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            department_id: user.department_id,
            department_name: None,
            position: user.position,
            hire_date: local_today(),
            salary: user.salary.unwrap_or(Decimal::ZERO),
            phone: user.phone,
            address: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let row = UserRow {
            employee,
            password_hash: user.password_hash,
        };
        let created = tables.employee(&row);
        tables.users.insert(id, row);
        Ok(created)
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> RepoResult<Option<Employee>> {
        let mut tables = self.tables.lock().await;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        if let Some(v) = changes.first_name {
            user.first_name = v;
        }
        if let Some(v) = changes.last_name {
            user.last_name = v;
        }
        if let Some(v) = changes.department_id {
            user.department_id = Some(v);
        }
        if let Some(v) = changes.position {
            user.position = Some(v);
        }
        user.updated_at = Utc::now();
        Ok(tables.updated(id))
    }

    async fn update_employee(&self, id: i64, changes: EmployeeUpdate) -> RepoResult<Option<Employee>> {
        let mut tables = self.tables.lock().await;
        tables.check_department(changes.department_id)?;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        if let Some(v) = changes.first_name {
            user.first_name = v;
        }
        if let Some(v) = changes.last_name {
            user.last_name = v;
        }
        if let Some(v) = changes.department_id {
            user.department_id = Some(v);
        }
        if let Some(v) = changes.position {
            user.position = Some(v);
        }
        if let Some(v) = changes.salary {
            user.salary = v;
        }
        if let Some(v) = changes.phone {
            user.phone = Some(v);
        }
        if let Some(v) = changes.address {
            user.address = Some(v);
        }
        user.updated_at = Utc::now();
        Ok(tables.updated(id))
    }

    async fn set_active(&self, id: i64, active: bool) -> RepoResult<Option<Employee>> {
        let mut tables = self.tables.lock().await;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        user.is_active = active;
        user.updated_at = Utc::now();
        Ok(tables.updated(id))
    }

    async fn set_role(&self, id: i64, role: Role) -> RepoResult<Option<Employee>> {
        let mut tables = self.tables.lock().await;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        user.role = role;
        user.updated_at = Utc::now();
        Ok(tables.updated(id))
    }

    async fn delete_non_admin(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().await;
        match tables.users.get(&id) {
            Some(row) if row.employee.role != Role::Admin => {}
            _ => return Ok(false),
        }
        tables.users.remove(&id);
        tables.attendance.retain(|r| r.user_id != id);
        tables.leaves.retain(|_, l| l.user_id != id);
        for leave in tables.leaves.values_mut() {
            if leave.approved_by == Some(id) {
                leave.approved_by = None;
            }
        }
        tables.reviews.retain(|r| r.employee_id != id);
        for review in &mut tables.reviews {
            if review.reviewer_id == Some(id) {
                review.reviewer_id = None;
            }
        }
        Ok(true)
    }

    async fn list_non_admin(&self) -> RepoResult<Vec<Employee>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<Employee> = tables
            .users
            .values()
            .filter(|row| row.employee.role != Role::Admin)
            .map(|row| tables.employee(row))
            .collect();
        list.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(list)
    }

    async fn list_active_employees(&self) -> RepoResult<Vec<ReviewCandidate>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<ReviewCandidate> = tables
            .users
            .values()
            .map(|row| &row.employee)
            .filter(|e| e.role == Role::Employee && e.is_active)
            .map(|e| ReviewCandidate {
                id: e.id,
                first_name: e.first_name.clone(),
                last_name: e.last_name.clone(),
                email: e.email.clone(),
                position: e.position.clone(),
                department_name: tables.department_name(e.department_id),
            })
            .collect();
        list.sort_by(|a, b| (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name)));
        Ok(list)
    }
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>> {
        Ok(self.tables.lock().await.departments.get(&id).cloned())
    }

    async fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let name = name.trim().to_lowercase();
        let tables = self.tables.lock().await;
        Ok(tables
            .departments
            .values()
            .find(|d| d.name.to_lowercase() == name)
            .cloned())
    }

    async fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<Department> = tables.departments.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn ensure_departments(&self, departments: &[(&str, &str)]) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        for (name, description) in departments {
            if tables.departments.values().any(|d| d.name == *name) {
                continue;
            }
            let id = tables.next_id();
            tables.departments.insert(
                id,
                Department {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    created_at: Utc::now(),
                },
            );
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn latest_in(
        &self,
        user_id: i64,
        window: DayWindow,
    ) -> RepoResult<Option<AttendanceRecord>> {
        Ok(self.tables.lock().await.latest_in(user_id, window).cloned())
    }

    async fn transition(
        &self,
        user_id: i64,
        action: CheckAction,
        notes: Option<String>,
    ) -> RepoResult<TransitionOutcome> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let window = DayWindow::containing(now);
        let current = DayStatus::from(tables.latest_in(user_id, window).map(|r| r.status));
        let status = match attendance::apply(current, action) {
            Ok(status) => status,
            Err(rejected) => return Ok(TransitionOutcome::Rejected(rejected)),
        };
        let record = AttendanceRecord {
            id: tables.next_id(),
            user_id,
            status,
            check_time: now,
            notes,
        };
        tables.attendance.push(record.clone());
        Ok(TransitionOutcome::Applied(record))
    }

    async fn history(&self, user_id: i64, since: DateTime<Utc>) -> RepoResult<Vec<AttendanceRecord>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<AttendanceRecord> = tables
            .attendance
            .iter()
            .filter(|r| r.user_id == user_id && r.check_time >= since)
            .cloned()
            .collect();
        list.sort_by(|a, b| (b.check_time, b.id).cmp(&(a.check_time, a.id)));
        Ok(list)
    }
}

#[async_trait]
impl LeaveStore for MemoryStore {
    async fn create_leave(&self, leave: NewLeave) -> RepoResult<Leave> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&leave.user_id) {
            return Err(RepoError::NotFound(format!("User {}", leave.user_id)));
        }
        let now = Utc::now();
        let created = Leave {
            id: tables.next_id(),
            user_id: leave.user_id,
            leave_type: leave.leave_type,
            start_date: leave.start_date,
            end_date: leave.end_date,
            reason: leave.reason,
            status: LeaveStatus::Pending,
            approved_by: None,
            created_at: now,
            updated_at: now,
        };
        tables.leaves.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_leave(&self, id: i64) -> RepoResult<Option<LeaveView>> {
        let tables = self.tables.lock().await;
        Ok(tables.leaves.get(&id).and_then(|l| tables.leave_view(l)))
    }

    async fn list_leaves(&self, owner: Option<i64>) -> RepoResult<Vec<LeaveView>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<LeaveView> = tables
            .leaves
            .values()
            .filter(|l| owner.is_none_or(|o| l.user_id == o))
            .filter_map(|l| tables.leave_view(l))
            .collect();
        list.sort_by(|a, b| {
            (b.leave.created_at, b.leave.id).cmp(&(a.leave.created_at, a.leave.id))
        });
        Ok(list)
    }

    async fn set_leave_status(
        &self,
        id: i64,
        status: LeaveStatus,
        approver_id: i64,
    ) -> RepoResult<Option<Leave>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.leaves.get_mut(&id).map(|leave| {
            leave.status = status;
            leave.approved_by = Some(approver_id);
            leave.updated_at = Utc::now();
            leave.clone()
        }))
    }

    async fn delete_pending_leave(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().await;
        match tables.leaves.get(&id) {
            Some(leave) if leave.status == LeaveStatus::Pending => {
                tables.leaves.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn leave_stats(&self, owner: Option<i64>) -> RepoResult<LeaveStats> {
        let tables = self.tables.lock().await;
        let mut stats = LeaveStats::default();
        tables
            .leaves
            .values()
            .filter(|l| owner.is_none_or(|o| l.user_id == o))
            .for_each(|l| stats.count(l.status));
        Ok(stats)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn add_review(&self, review: NewReview) -> RepoResult<i64> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&review.employee_id) {
            return Err(RepoError::NotFound(format!("Employee {}", review.employee_id)));
        }
        let id = tables.next_id();
        tables.reviews.push(ReviewRow {
            id,
            employee_id: review.employee_id,
            reviewer_id: Some(review.reviewer_id),
            rating: review.rating,
            comments: review.comments,
            review_date: Utc::now(),
        });
        Ok(id)
    }

    async fn reviews_for(&self, employee_id: i64) -> RepoResult<Vec<EmployeeReview>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<EmployeeReview> = tables
            .reviews
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .map(|r| {
                let reviewer = r
                    .reviewer_id
                    .and_then(|id| tables.users.get(&id))
                    .map(|row| &row.employee);
                EmployeeReview {
                    id: r.id,
                    rating: r.rating,
                    comments: r.comments.clone(),
                    review_date: r.review_date,
                    reviewer_first_name: reviewer.map(|u| u.first_name.clone()),
                    reviewer_last_name: reviewer.map(|u| u.last_name.clone()),
                    reviewer_role: reviewer.map(|u| u.role),
                }
            })
            .collect();
        list.sort_by(|a, b| (b.review_date, b.id).cmp(&(a.review_date, a.id)));
        Ok(list)
    }

    async fn all_reviews(&self) -> RepoResult<Vec<ReviewOverview>> {
        let tables = self.tables.lock().await;
        let mut list: Vec<ReviewOverview> = tables
            .reviews
            .iter()
            .filter_map(|r| {
                let employee = &tables.users.get(&r.employee_id)?.employee;
                let reviewer = r
                    .reviewer_id
                    .and_then(|id| tables.users.get(&id))
                    .map(|row| &row.employee);
                Some(ReviewOverview {
                    id: r.id,
                    rating: r.rating,
                    comments: r.comments.clone(),
                    review_date: r.review_date,
                    employee_first_name: employee.first_name.clone(),
                    employee_last_name: employee.last_name.clone(),
                    employee_email: employee.email.clone(),
                    employee_position: employee.position.clone(),
                    employee_department: tables.department_name(employee.department_id),
                    reviewer_first_name: reviewer.map(|u| u.first_name.clone()),
                    reviewer_last_name: reviewer.map(|u| u.last_name.clone()),
                    reviewer_role: reviewer.map(|u| u.role),
                })
            })
            .collect();
        list.sort_by(|a, b| (b.review_date, b.id).cmp(&(a.review_date, a.id)));
        Ok(list)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
