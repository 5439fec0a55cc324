use chrono::{DateTime, Duration, Utc};

use crate::commands::{message_commands, user_commands, UserInputError};
use crate::{entities, ports};

struct SeedUser {
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: Option<entities::Role>,
    messages: &'static [&'static str],
}

const SEED_USERS: [SeedUser; 2] = [
    SeedUser {
        username: "Deveritas",
        email: "themrdeveritas@gmail.com",
        password: "wasddoom",
        role: Some(entities::Role::Admin),
        messages: &["Published the Road to learn React"],
    },
    SeedUser {
        username: "ddavids",
        email: "hello@david.com",
        password: "ddavids",
        role: None,
        messages: &["Happy to release ...", "Published a complete ..."],
    },
];

/// Creates the sample users and their messages. Users that already exist are
/// left untouched, so running it twice is harmless.
pub async fn seed_users_with_messages(
    store: &ports::Store,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let mut created_at = now;
    for seed in SEED_USERS.iter() {
        let result = user_commands::create_user(
            store,
            user_commands::SignUpInput {
                username: seed.username.to_string(),
                email: seed.email.to_string(),
                password: seed.password.to_string(),
            },
            seed.role,
        )
        .await;

        let user = match result {
            Ok(user) => user,
            Err(e)
                if matches!(
                    e.downcast_ref::<UserInputError>(),
                    Some(UserInputError::Duplicate(_))
                ) =>
            {
                tracing::info!("seed user already exists: {}", seed.username);
                continue;
            }
            Err(e) => return Err(e),
        };

        for text in seed.messages {
            created_at += Duration::seconds(1);
            message_commands::create_message(store, created_at, user.id, text.to_string())
                .await?;
        }
    }

    tracing::info!("seed data ready");
    Ok(())
}
