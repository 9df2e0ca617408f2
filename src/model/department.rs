use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = 2)]
    pub department_id: u64,
    #[schema(example = "Cardiology")]
    pub department_name: String,
}
