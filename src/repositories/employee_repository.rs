use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::models::{Employee, WasteType};

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    name: String,
    role: String,
    available: bool,
    competencies: Vec<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let competencies = row
            .competencies
            .iter()
            .map(|c| c.parse::<WasteType>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Employee {
            id: row.id,
            name: row.name,
            role: row.role.parse()?,
            available: row.available,
            competencies,
        })
    }
}

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeRepository {
    async fn find_available(&self) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT * FROM employees WHERE available = TRUE ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn save(&self, employee: Employee) -> StoreResult<Employee> {
        let competencies: Vec<String> = employee
            .competencies
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            INSERT INTO employees (id, name, role, available, competencies)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                role = EXCLUDED.role,
                available = EXCLUDED.available,
                competencies = EXCLUDED.competencies
            RETURNING *
            "#,
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.role.as_str())
        .bind(employee.available)
        .bind(competencies)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn reserve(&self, id: Uuid) -> StoreResult<Option<bool>> {
        let previous: Option<(bool,)> = sqlx::query_as(
            r#"
            UPDATE employees e
            SET available = FALSE
            FROM (SELECT id, available FROM employees WHERE id = $1 FOR UPDATE) old
            WHERE e.id = old.id
            RETURNING old.available
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(previous.map(|(available,)| available))
    }

    async fn release(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("UPDATE employees SET available = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn row(role: &str, competencies: &[&str]) -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            name: "Sami Tounsi".to_string(),
            role: role.to_string(),
            available: true,
            competencies: competencies.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_row_converts_competencies() {
        let employee = Employee::try_from(row("COLLECTOR", &["GLASS", "ORGANIC"])).unwrap();
        assert_eq!(employee.role, Role::Collector);
        assert_eq!(employee.competencies, vec![WasteType::Glass, WasteType::Organic]);
    }

    #[test]
    fn test_unknown_role_or_competency_is_corrupt() {
        assert!(matches!(Employee::try_from(row("MANAGER", &[])), Err(StoreError::Corrupt(_))));
        assert!(matches!(
            Employee::try_from(row("DRIVER", &["NUCLEAR"])),
            Err(StoreError::Corrupt(_))
        ));
    }
}
