use crate::{
    error::ApiError,
    model::{
        department::Department,
        response::{ErrorResponse, MessageResponse},
        statistics::DepartmentStatistics,
    },
};
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;
use tracing::error;

#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments", body = [Department]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT department_id, department_name FROM departments ORDER BY department_id",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch departments");
        ApiError::Internal
    })?;

    Ok(HttpResponse::Ok().json(departments))
}

#[utoipa::path(
    get,
    path = "/api/departments/{department_id}",
    params(
        ("department_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = Department),
        (status = 404, description = "Department not found", body = MessageResponse, example = json!({
            "message": "Department not found"
        })),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let department_id = path.into_inner();

    let department = sqlx::query_as::<_, Department>(
        "SELECT department_id, department_name FROM departments WHERE department_id = ?",
    )
    .bind(department_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, department_id, "Failed to fetch department");
        ApiError::Internal
    })?
    .ok_or(ApiError::NotFound("Department not found"))?;

    Ok(HttpResponse::Ok().json(department))
}

/// Head count and average salary per department. Departments without
/// employees report a count of 0 and a `null` average.
#[utoipa::path(
    get,
    path = "/api/departments/statistics",
    responses(
        (status = 200, description = "Per-department statistics", body = [DepartmentStatistics]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn department_statistics(
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let statistics = sqlx::query_as::<_, DepartmentStatistics>(
        r#"
        SELECT
            d.department_id,
            d.department_name,
            COUNT(e.employee_id) AS employee_count,
            CAST(AVG(e.salary) AS DOUBLE) AS average_salary
        FROM departments d
        LEFT JOIN employees e ON d.department_id = e.department_id
        GROUP BY d.department_id, d.department_name
        ORDER BY d.department_id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch department statistics");
        ApiError::Internal
    })?;

    Ok(HttpResponse::Ok().json(statistics))
}
