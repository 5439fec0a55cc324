use std::ops::RangeInclusive;

use anyhow::Context;
use chrono::{DateTime, Utc};

use super::UserInputError;
use crate::password;
use crate::token::TokenService;
use crate::{entities, ports};

const PASSWORD_LENGTH: RangeInclusive<usize> = 7..=64;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn validate(input: &SignUpInput) -> Result<(), UserInputError> {
    if input.username.is_empty() {
        return Err(UserInputError::Empty("username"));
    }
    if input.email.is_empty() {
        return Err(UserInputError::Empty("email"));
    }
    if !is_email(&input.email) {
        return Err(UserInputError::InvalidEmail);
    }
    if input.password.is_empty() {
        return Err(UserInputError::Empty("password"));
    }
    if !PASSWORD_LENGTH.contains(&input.password.chars().count()) {
        return Err(UserInputError::PasswordLength);
    }
    Ok(())
}

pub async fn create_user(
    store: &ports::Store,
    input: SignUpInput,
    role: Option<entities::Role>,
) -> anyhow::Result<entities::User> {
    validate(&input)?;
    let password_hash = password::hash_password(&input.password)?;

    let user = store
        .users
        .create(entities::NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            role,
        })
        .await
        .map_err(|e| match e {
            ports::CreateUserError::Duplicate(field) => UserInputError::Duplicate(field).into(),
            ports::CreateUserError::Other(e) => e.context("create user"),
        })?;

    tracing::info!("user created: id={}", user.id);
    Ok(user)
}

pub async fn sign_up(
    store: &ports::Store,
    token_service: &TokenService,
    now: DateTime<Utc>,
    input: SignUpInput,
) -> anyhow::Result<String> {
    let user = create_user(store, input, None).await?;
    token_service.issue(user.id, now)
}

pub async fn sign_in(
    store: &ports::Store,
    token_service: &TokenService,
    now: DateTime<Utc>,
    login: &str,
    password: &str,
) -> anyhow::Result<String> {
    let user = store
        .users
        .find_by_login(login)
        .await
        .context("find user by login")?
        .ok_or(UserInputError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash) {
        return Err(UserInputError::InvalidCredentials.into());
    }

    token_service.issue(user.id, now)
}

pub async fn delete_user(store: &ports::Store, id: entities::UserId) -> anyhow::Result<bool> {
    let deleted = store.users.delete(id).await.context("delete user")?;
    if deleted {
        tracing::info!("user deleted: id={}", id);
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::adapters::InMemoryStore;

    fn input(username: &str, email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn tokens() -> TokenService {
        TokenService::new(b"secret", Duration::minutes(30))
    }

    #[test]
    fn test_validate() {
        let valid = input("ddavids", "hello@david.com", "ddavids");
        assert_eq!(validate(&valid), Ok(()));

        let cases = [
            (input("", "hello@david.com", "ddavids"), UserInputError::Empty("username")),
            (input("ddavids", "", "ddavids"), UserInputError::Empty("email")),
            (input("ddavids", "bad address", "ddavids"), UserInputError::InvalidEmail),
            (input("ddavids", "hello@david.com", ""), UserInputError::Empty("password")),
            (input("ddavids", "hello@david.com", "aaaaaa"), UserInputError::PasswordLength),
            (
                input("ddavids", "hello@david.com", &"a".repeat(65)),
                UserInputError::PasswordLength,
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(validate(&input), Err(expected));
        }
        assert_eq!(validate(&input("x", "a@b.c", &"a".repeat(64))), Ok(()));
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let store = InMemoryStore::new().into_store();
        let tokens = tokens();
        let now = Utc::now();

        let token = sign_up(&store, &tokens, now, input("ddavids", "hello@david.com", "ddavids"))
            .await
            .unwrap();
        let user_id = tokens.verify(&token, now).unwrap();

        let by_name = sign_in(&store, &tokens, now, "ddavids", "ddavids").await.unwrap();
        assert_eq!(tokens.verify(&by_name, now).unwrap(), user_id);
        let by_email = sign_in(&store, &tokens, now, "hello@david.com", "ddavids")
            .await
            .unwrap();
        assert_eq!(tokens.verify(&by_email, now).unwrap(), user_id);

        for (login, password) in [("ddavids", "bad"), ("bad", "ddavids")] {
            let err = sign_in(&store, &tokens, now, login, password)
                .await
                .unwrap_err();
            assert_eq!(
                err.downcast_ref::<UserInputError>(),
                Some(&UserInputError::InvalidCredentials)
            );
        }
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicates() {
        let store = InMemoryStore::new().into_store();
        let tokens = tokens();
        let now = Utc::now();
        sign_up(&store, &tokens, now, input("ddavids", "hello@david.com", "ddavids"))
            .await
            .unwrap();

        let err = sign_up(&store, &tokens, now, input("ddavids", "other@david.com", "ddavids"))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<UserInputError>(),
            Some(&UserInputError::Duplicate("username"))
        );
        assert_eq!(err.to_string(), "username must be unique");

        let err = sign_up(&store, &tokens, now, input("other", "hello@david.com", "ddavids"))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<UserInputError>(),
            Some(&UserInputError::Duplicate("email"))
        );
    }

    #[tokio::test]
    async fn test_delete_user() {
        let store = InMemoryStore::new().into_store();
        let user = create_user(
            &store,
            input("ddavids", "hello@david.com", "ddavids"),
            None,
        )
        .await
        .unwrap();

        assert!(delete_user(&store, user.id).await.unwrap());
        assert!(!delete_user(&store, user.id).await.unwrap());
    }
}
