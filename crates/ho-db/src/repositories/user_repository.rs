//! Account repository backing the admin user-management surface.

use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use ho_core::{Role, User};

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// A user together with how many entries they have created. Drives the
/// admin listing without a per-user count query.
#[derive(Debug, Clone)]
pub struct UserWithEntryCount {
    pub user: User,
    pub entry_count: i64,
}

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at, updated_at";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE users
                SET email = ?, password_hash = ?, name = ?, role = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.updated_at.timestamp())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    /// Newest accounts first, each with its entry count. `search` matches a
    /// substring of email or name.
    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbErrorResult<Vec<UserWithEntryCount>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {}, \
             (SELECT COUNT(*) FROM ho_entries e WHERE e.created_by = users.id) AS entry_count \
             FROM users",
            USER_COLUMNS
        ));
        push_search(&mut qb, search);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| -> DbErrorResult<UserWithEntryCount> {
                Ok(UserWithEntryCount {
                    user: user_from_row(r)?,
                    entry_count: r.try_get("entry_count")?,
                })
            })
            .collect()
    }

    pub async fn count(&self, search: Option<&str>) -> DbErrorResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users");
        push_search(&mut qb, search);

        let count = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, search: Option<&str>) {
    if let Some(search) = search {
        let pattern = format!("%{}%", search);
        qb.push(" WHERE (email LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR name LIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

fn user_from_row(row: &SqliteRow) -> DbErrorResult<User> {
    let role_raw: String = row.try_get("role")?;

    Ok(User {
        id: parse_uuid(row.try_get::<String, _>("id")?.as_str(), "user.id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        role: Role::from_str(&role_raw)
            .map_err(|e| DbError::decode(format!("Invalid role in user.role: {}", e)))?,
        created_at: parse_timestamp(row.try_get("created_at")?, "user.created_at")?,
        updated_at: parse_timestamp(row.try_get("updated_at")?, "user.updated_at")?,
    })
}
