use crate::api::employee::EmployeePayload;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::response::{CreatedResponse, ErrorResponse, MessageResponse};
use crate::model::statistics::{DepartmentStatistics, SalaryBucket, SalaryRange};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital Management System API",
        version = "1.0.0",
        description = r#"
## Hospital staff API

CRUD over hospital **employees** and read access to **departments**, plus two
aggregate views:

- **Department statistics**: head count and average salary per department
- **Salary distribution**: employee count per fixed salary range

### Response format
- JSON bodies everywhere
- `404` answers `{"message": ...}`, `500` answers `{"error": "Internal server error"}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::index::index,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::salary_distribution,

        crate::api::department::list_departments,
        crate::api::department::get_department,
        crate::api::department::department_statistics
    ),
    components(
        schemas(
            Employee,
            EmployeePayload,
            Department,
            DepartmentStatistics,
            SalaryBucket,
            SalaryRange,
            MessageResponse,
            CreatedResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Service", description = "Service metadata"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Department", description = "Department APIs"),
    )
)]
pub struct ApiDoc;
