use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use utoipa::ToSchema;

/// One row of the departments/employees left join.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentStatistics {
    #[schema(example = 2)]
    pub department_id: u64,
    #[schema(example = "Cardiology")]
    pub department_name: String,
    /// Zero for a department nobody works in.
    #[schema(example = 12)]
    pub employee_count: i64,
    /// `null` when the department has no employees.
    #[schema(example = 87500.0, nullable = true)]
    pub average_salary: Option<f64>,
}

/// Fixed, contiguous salary ranges. Declaration order is response order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, EnumIter, EnumString,
)]
pub enum SalaryRange {
    #[serde(rename = "Below 50k")]
    #[strum(serialize = "Below 50k")]
    Below50k,

    #[serde(rename = "50k-100k")]
    #[strum(serialize = "50k-100k")]
    From50kTo100k,

    #[serde(rename = "100k-150k")]
    #[strum(serialize = "100k-150k")]
    From100kTo150k,

    #[serde(rename = "Above 150k")]
    #[strum(serialize = "Above 150k")]
    Above150k,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalaryBucket {
    pub salary_range: SalaryRange,
    #[schema(example = 7)]
    pub employee_count: i64,
}

/// Turns grouped `(label, count)` rows into all four buckets, in range order,
/// with absent ranges reported as zero.
pub fn fill_buckets(rows: &[(String, i64)]) -> Result<Vec<SalaryBucket>, strum::ParseError> {
    let mut buckets: Vec<SalaryBucket> = SalaryRange::iter()
        .map(|salary_range| SalaryBucket {
            salary_range,
            employee_count: 0,
        })
        .collect();

    for (label, count) in rows {
        let range: SalaryRange = label.parse()?;
        if let Some(bucket) = buckets.iter_mut().find(|b| b.salary_range == range) {
            bucket.employee_count += count;
        }
    }

    Ok(buckets)
}
