use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserModel {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: Option<String>,
}

impl UserModel {
    fn into_entity(self) -> anyhow::Result<entities::User> {
        let role = self
            .role
            .as_deref()
            .map(entities::Role::from_str)
            .transpose()
            .context("decode role")?;

        Ok(entities::User {
            id: entities::UserId::from(self.id),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role,
        })
    }
}

fn into_entities(models: Vec<UserModel>) -> anyhow::Result<Vec<entities::User>> {
    models
        .into_iter()
        .map(UserModel::into_entity)
        .collect::<anyhow::Result<Vec<_>>>()
        .context("convert User")
}

fn duplicate_field(err: &sqlx::Error) -> Option<&'static str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("users_username_key") => Some("username"),
                Some("users_email_key") => Some("email"),
                _ => None,
            }
        }
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct UsersRepositoryImpl {
    pool: PgPool,
}

impl UsersRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ports::UsersRepository for UsersRepositoryImpl {
    async fn find_all_by_ids(
        &self,
        ids: &[entities::UserId],
    ) -> anyhow::Result<Vec<entities::User>> {
        let ids = ids.iter().map(|id| i64::from(*id)).collect::<Vec<_>>();

        let models = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                role
            FROM
                users
            WHERE
                id = Any($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("fetch users")?;

        into_entities(models)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<entities::User>> {
        let models = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                role
            FROM
                users
            ORDER BY
                id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("fetch users")?;

        into_entities(models)
    }

    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<entities::User>> {
        let model = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                role
            FROM
                users
            WHERE
                username = $1
                OR
                email = $1
            ORDER BY
                id ASC
            LIMIT 1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .context("fetch user by login")?;

        model.map(UserModel::into_entity).transpose()
    }

    async fn create(
        &self,
        new_user: entities::NewUser,
    ) -> Result<entities::User, ports::CreateUserError> {
        let model = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT
                INTO users (
                    username,
                    email,
                    password_hash,
                    role
                ) VALUES ($1, $2, $3, $4)
            RETURNING
                id,
                username,
                email,
                password_hash,
                role
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.map(|role| role.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match duplicate_field(&err) {
            Some(field) => ports::CreateUserError::Duplicate(field),
            None => anyhow::Error::from(err).context("insert user").into(),
        })?;

        Ok(model.into_entity()?)
    }

    async fn delete(&self, id: entities::UserId) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
                WHERE
                    id = $1
            "#,
        )
        .bind(i64::from(id))
        .execute(&self.pool)
        .await
        .context("delete user")?;

        Ok(result.rows_affected() > 0)
    }
}
