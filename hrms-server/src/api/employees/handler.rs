//! Employee API Handlers
//!
//! Admin-only except reading and updating one's own record.

use axum::Json;
use axum::extract::{Path, State};
use http::StatusCode;
use shared::error::{AppError, ErrorCode, FieldError, ResourceError};
use shared::models::{
    ActiveUpdate, Department, Employee, EmployeeCreate, EmployeeUpdate, Role, RoleUpdate,
};
use shared::response::SuccessEnvelope;

use crate::api::extract::ResourceJson;
use crate::api::validate::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_POSITION_LEN, is_present, is_valid_email,
    optional_too_long, too_long, trimmed,
};
use crate::auth::CurrentUser;
use crate::auth::password::{self, ADMIN_COST, DEFAULT_COST};
use crate::db::{NewUser, normalize_email};
use crate::error::ServiceError;
use crate::security_log;
use crate::state::AppState;

type EmployeeResult<T> = Result<Json<SuccessEnvelope<T>>, ResourceError>;

const MIN_PASSWORD_LEN: usize = 6;
const MIN_ADMIN_PASSWORD_LEN: usize = 8;

/// GET /api/employees
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> EmployeeResult<Vec<Employee>> {
    user.require_admin()?;
    let employees = state.store.list_non_admin().await?;
    Ok(Json(SuccessEnvelope::data(employees)))
}

/// GET /api/employees/departments and /api/employees/departments/list
pub async fn departments(State(state): State<AppState>) -> EmployeeResult<Vec<Department>> {
    let departments = state.store.list_departments().await?;
    Ok(Json(SuccessEnvelope::data(departments)))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> EmployeeResult<Employee> {
    user.require_self_or_admin(id)?;
    let employee = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ErrorCode::EmployeeNotFound)?;
    Ok(Json(SuccessEnvelope::data(employee)))
}

fn account_errors(req: &EmployeeCreate) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Valid email is required"));
    }
    if !is_present(&req.first_name) {
        errors.push(FieldError::new("first_name", "First name is required"));
    }
    if !is_present(&req.last_name) {
        errors.push(FieldError::new("last_name", "Last name is required"));
    }
    errors.extend(
        [
            too_long("email", req.email.trim(), MAX_EMAIL_LEN),
            too_long("first_name", req.first_name.trim(), MAX_NAME_LEN),
            too_long("last_name", req.last_name.trim(), MAX_NAME_LEN),
            optional_too_long("position", req.position.as_deref().map(str::trim), MAX_POSITION_LEN),
            optional_too_long("phone", req.phone.as_deref().map(str::trim), MAX_PHONE_LEN),
        ]
        .into_iter()
        .flatten(),
    );
    errors
}

/// The referenced department must exist
async fn require_department(state: &AppState, id: Option<i64>) -> Result<(), ResourceError> {
    let Some(id) = id else {
        return Ok(());
    };
    match state.store.find_department(id).await? {
        Some(_) => Ok(()),
        None => Err(ErrorCode::DepartmentNotFound.into()),
    }
}

/// Shared tail of both create endpoints
async fn create_account(
    state: &AppState,
    req: EmployeeCreate,
    role: Role,
    cost: u32,
) -> Result<Employee, ResourceError> {
    let email = normalize_email(&req.email);
    if state.store.find_by_email(&email).await?.is_some() {
        return Err(ErrorCode::DuplicateEmail.into());
    }
    require_department(state, req.department_id).await?;

    let password_hash = password::hash_password(&req.password, cost)
        .await
        .map_err(ServiceError::from)?;

    let employee = state
        .store
        .create_user(NewUser {
            email,
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            role,
            department_id: req.department_id,
            position: trimmed(req.position),
            salary: req.salary,
            phone: trimmed(req.phone),
        })
        .await?;
    Ok(employee)
}

/// POST /api/employees
///
/// Creates `employee` or `manager` accounts; admins go through `/admin`.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ResourceJson(req): ResourceJson<EmployeeCreate>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Employee>>), ResourceError> {
    user.require_admin()?;

    let role = match req.role.as_deref().map(str::parse::<Role>) {
        None => Role::Employee,
        Some(Ok(Role::Admin)) => {
            return Err(AppError::forbidden(
                "Use /api/employees/admin endpoint to create admin accounts",
            )
            .into());
        }
        Some(Ok(role)) => role,
        Some(Err(_)) => return Err(ErrorCode::InvalidRole.into()),
    };

    let mut errors = account_errors(&req);
    if req.password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }

    let employee = create_account(&state, req, role, DEFAULT_COST).await?;
    tracing::info!(employee_id = employee.id, created_by = user.id, "Employee created");
    Ok((StatusCode::CREATED, Json(SuccessEnvelope::data(employee))))
}

/// POST /api/employees/admin
pub async fn create_admin(
    State(state): State<AppState>,
    user: CurrentUser,
    ResourceJson(req): ResourceJson<EmployeeCreate>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Employee>>), ResourceError> {
    user.require_admin()?;

    if req.password.len() < MIN_ADMIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            "Admin passwords must be at least 8 characters long",
        )
        .into());
    }
    let errors = account_errors(&req);
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }

    let admin = create_account(&state, req, Role::Admin, ADMIN_COST).await?;
    security_log!(
        "INFO",
        "admin_created",
        created_by = user.email.clone(),
        admin_email = admin.email.clone()
    );
    Ok((StatusCode::CREATED, Json(SuccessEnvelope::data(admin))))
}

/// PUT /api/employees/{id}
///
/// Salary and department are admin-only fields.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ResourceJson(mut req): ResourceJson<EmployeeUpdate>,
) -> EmployeeResult<Employee> {
    user.require_self_or_admin(id)?;
    if req.touches_admin_fields() {
        user.require_admin()?;
    }

    req.first_name = trimmed(req.first_name);
    req.last_name = trimmed(req.last_name);
    let errors: Vec<FieldError> = [
        optional_too_long("first_name", req.first_name.as_deref(), MAX_NAME_LEN),
        optional_too_long("last_name", req.last_name.as_deref(), MAX_NAME_LEN),
        optional_too_long("position", req.position.as_deref(), MAX_POSITION_LEN),
        optional_too_long("phone", req.phone.as_deref(), MAX_PHONE_LEN),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }
    require_department(&state, req.department_id).await?;

    let employee = state
        .store
        .update_employee(id, req)
        .await?
        .ok_or(ErrorCode::EmployeeNotFound)?;
    Ok(Json(SuccessEnvelope::data(employee)))
}

/// DELETE /api/employees/{id}
///
/// Admin accounts are never deleted and report as not found.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessEnvelope<()>>, ResourceError> {
    user.require_admin()?;
    if !state.store.delete_non_admin(id).await? {
        return Err(ErrorCode::EmployeeNotFound.into());
    }
    tracing::info!(employee_id = id, deleted_by = user.id, "Employee deleted");
    Ok(Json(SuccessEnvelope::message("Employee deleted successfully")))
}

/// An admin cannot demote or deactivate themselves
fn forbid_self(user: &CurrentUser, id: i64) -> Result<(), ResourceError> {
    if user.id == id {
        return Err(ErrorCode::CannotModifyAdmin.into());
    }
    Ok(())
}

/// PUT /api/employees/{id}/status
pub async fn set_active(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ResourceJson(req): ResourceJson<ActiveUpdate>,
) -> EmployeeResult<Employee> {
    user.require_admin()?;
    forbid_self(&user, id)?;

    let employee = state
        .store
        .set_active(id, req.is_active)
        .await?
        .ok_or(ErrorCode::EmployeeNotFound)?;
    security_log!(
        "INFO",
        "account_active_changed",
        user_id = id,
        is_active = req.is_active,
        changed_by = user.id
    );
    Ok(Json(SuccessEnvelope::data(employee)))
}

/// PUT /api/employees/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ResourceJson(req): ResourceJson<RoleUpdate>,
) -> EmployeeResult<Employee> {
    user.require_admin()?;
    let role: Role = req.role.parse().map_err(|_| ErrorCode::InvalidRole)?;
    forbid_self(&user, id)?;

    let employee = state
        .store
        .set_role(id, role)
        .await?
        .ok_or(ErrorCode::EmployeeNotFound)?;
    security_log!(
        "INFO",
        "account_role_changed",
        user_id = id,
        role = role.as_str(),
        changed_by = user.id
    );
    Ok(Json(SuccessEnvelope::data(employee)))
}
