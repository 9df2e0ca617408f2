use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": 1,
        "first_name": "Dana",
        "last_name": "Cohen",
        "email": "dana.cohen@hospital.org",
        "phone_number": "+972501234567",
        "salary": 60000.0,
        "department_id": 2
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "Dana")]
    pub first_name: String,

    #[schema(example = "Cohen")]
    pub last_name: String,

    #[schema(example = "dana.cohen@hospital.org", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+972501234567", nullable = true)]
    pub phone_number: Option<String>,

    #[schema(example = 60000.0)]
    pub salary: f64,

    #[schema(example = 2, nullable = true)]
    pub department_id: Option<u64>,
}
