use crate::{
    error::ApiError,
    model::{
        employee::Employee,
        response::{CreatedResponse, ErrorResponse, MessageResponse},
        statistics::{SalaryBucket, fill_buckets},
    },
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::MySqlPool;
use tracing::{debug, error, info};
use utoipa::ToSchema;

/// Body of both `POST /employees` and `PUT /employees/{id}`. An update
/// replaces the name, contact and salary columns; `department_id` only
/// changes when the field is present, and an explicit `null` clears it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmployeePayload {
    #[schema(example = "Dana")]
    pub first_name: String,
    #[schema(example = "Cohen")]
    pub last_name: String,
    #[schema(example = "dana.cohen@hospital.org", format = "email", nullable = true)]
    pub email: Option<String>,
    #[schema(example = "+972501234567", nullable = true)]
    pub phone_number: Option<String>,
    #[schema(example = 60000.0)]
    pub salary: f64,
    /// Absent: `None`. Explicit `null`: `Some(None)`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<u64>, example = 2, nullable = true)]
    pub department_id: Option<Option<u64>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EmployeePayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.first_name.trim().is_empty() {
            return Err(ApiError::BadRequest("first_name must not be empty".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(ApiError::BadRequest("last_name must not be empty".into()));
        }
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(ApiError::BadRequest(
                "salary must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT
            employee_id,
            first_name,
            last_name,
            email,
            phone_number,
            CAST(salary AS DOUBLE) AS salary,
            department_id
        FROM employees
        ORDER BY employee_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        ApiError::Internal
    })?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = MessageResponse, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT
            employee_id,
            first_name,
            last_name,
            email,
            phone_number,
            CAST(salary AS DOUBLE) AS salary,
            department_id
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee");
        ApiError::Internal
    })?
    .ok_or(ApiError::NotFound("Employee not found"))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = CreatedResponse),
        (status = 400, description = "Invalid body", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<EmployeePayload>,
) -> actix_web::Result<impl Responder> {
    payload.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (first_name, last_name, email, phone_number, salary, department_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(payload.salary)
    .bind(payload.department_id.flatten())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        ApiError::Internal
    })?;

    let employee_id = result.last_insert_id();
    info!(employee_id, "Employee created");

    Ok(HttpResponse::Created().json(CreatedResponse {
        id: employee_id,
        message: "Employee added successfully".to_string(),
    }))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = MessageResponse, example = json!({
            "message": "Employee updated successfully"
        })),
        (status = 400, description = "Invalid body", body = MessageResponse),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<EmployeePayload>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    payload.validate()?;

    let sql = if payload.department_id.is_some() {
        r#"
        UPDATE employees
        SET first_name = ?, last_name = ?, email = ?, phone_number = ?, salary = ?, department_id = ?
        WHERE employee_id = ?
        "#
    } else {
        r#"
        UPDATE employees
        SET first_name = ?, last_name = ?, email = ?, phone_number = ?, salary = ?
        WHERE employee_id = ?
        "#
    };

    let mut query = sqlx::query(sql)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone_number)
        .bind(payload.salary);
    if let Some(department_id) = payload.department_id {
        query = query.bind(department_id);
    }

    let result = query
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to update employee");
            ApiError::Internal
        })?;

    // MySQL reports changed rows, so an identical PUT also lands here.
    if result.rows_affected() == 0 {
        let matching = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE employee_id = ?",
        )
        .bind(employee_id)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to check employee existence");
            ApiError::Internal
        })?;

        if matching == 0 {
            return Err(ApiError::NotFound("Employee not found").into());
        }
        debug!(employee_id, "Update left employee unchanged");
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Employee updated successfully")))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to delete employee");
            ApiError::Internal
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Employee not found").into());
    }

    info!(employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Employee deleted successfully")))
}

/// Salary distribution
#[utoipa::path(
    get,
    path = "/api/employees/salary-distribution",
    responses(
        (status = 200, description = "Employee count per salary range", body = [SalaryBucket], example = json!([
            { "salary_range": "Below 50k", "employee_count": 3 },
            { "salary_range": "50k-100k", "employee_count": 10 },
            { "salary_range": "100k-150k", "employee_count": 4 },
            { "salary_range": "Above 150k", "employee_count": 1 }
        ])),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn salary_distribution(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT
            CASE
                WHEN salary < 50000 THEN 'Below 50k'
                WHEN salary <= 100000 THEN '50k-100k'
                WHEN salary <= 150000 THEN '100k-150k'
                ELSE 'Above 150k'
            END AS salary_range,
            COUNT(*) AS employee_count
        FROM employees
        GROUP BY salary_range
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch salary distribution");
        ApiError::Internal
    })?;

    let buckets = fill_buckets(&rows).map_err(|e| {
        error!(error = %e, ?rows, "Unexpected salary range label");
        ApiError::Internal
    })?;

    Ok(HttpResponse::Ok().json(buckets))
}
