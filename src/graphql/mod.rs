use anyhow::anyhow;
use derive_more::From;
use juniper::{EmptySubscription, GraphQLEnum, GraphQLObject, RootNode, ID};

use crate::access_error::AccessError;
use crate::commands::{message_commands, user_commands};
use crate::entities;

mod app_ctx;
mod common;
pub mod guards;
mod loaders;

pub use app_ctx::*;
pub use common::*;

#[derive(GraphQLEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[graphql(name = "Role")]
pub enum GraphqlRole {
    Admin,
}

impl From<entities::Role> for GraphqlRole {
    fn from(role: entities::Role) -> Self {
        match role {
            entities::Role::Admin => GraphqlRole::Admin,
        }
    }
}

#[derive(Clone, Debug, From)]
pub struct User(entities::User);

#[juniper::graphql_object(context = AppCtx)]
impl User {
    fn id(&self) -> ID {
        ID::new(self.0.id.to_string())
    }

    fn username(&self) -> &str {
        &self.0.username
    }

    fn email(&self) -> &str {
        &self.0.email
    }

    fn role(&self) -> Option<GraphqlRole> {
        self.0.role.map(GraphqlRole::from)
    }

    async fn messages(&self, ctx: &AppCtx) -> Result<Vec<Message>, ApiError> {
        let messages = ctx
            .loaders
            .messages_by_user_loader
            .load(self.0.id)
            .await
            .map_err(AccessError::from)?;
        Ok(messages.into_iter().map(Message::from).collect())
    }
}

#[derive(Clone, Debug, From)]
pub struct Message(entities::Message);

#[juniper::graphql_object(context = AppCtx)]
impl Message {
    fn id(&self) -> ID {
        ID::new(self.0.id.to_string())
    }

    fn text(&self) -> &str {
        &self.0.text
    }

    fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }

    async fn user(&self, ctx: &AppCtx) -> Result<Option<User>, ApiError> {
        Ok(ctx.load_user(self.0.user_id).await?.map(User::from))
    }
}

#[derive(GraphQLObject, Clone, Debug)]
pub struct Token {
    pub token: String,
}

#[derive(GraphQLObject, Clone, Debug)]
#[graphql(context = AppCtx)]
pub struct MessageConnection {
    pub edges: Vec<Message>,
    pub page_info: PageInfo,
}

#[derive(Clone, Debug)]
pub struct QueryRoot;

#[juniper::graphql_object(context = AppCtx, name = "Query")]
impl QueryRoot {
    async fn users(ctx: &AppCtx) -> Result<Vec<User>, ApiError> {
        let users = ctx.store.users.find_all().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn user(ctx: &AppCtx, id: ID) -> Result<Option<User>, ApiError> {
        let id = decode_id::<entities::UserId>(&id)?;
        Ok(ctx.load_user(id).await?.map(User::from))
    }

    async fn me(ctx: &AppCtx) -> Result<Option<User>, ApiError> {
        let Some(user_id) = ctx.identity() else {
            return Ok(None);
        };
        Ok(ctx.load_user(user_id).await?.map(User::from))
    }

    async fn messages(
        ctx: &AppCtx,
        cursor: Option<String>,
        limit: Option<i32>,
    ) -> Result<MessageConnection, ApiError> {
        let limit = encode_limit(limit)?.value();
        let before = cursor.as_deref().map(decode_cursor).transpose()?;

        // 1件多く取って次ページの有無を判定する
        let mut messages = ctx.store.messages.list(before, limit + 1).await?;
        let has_next_page = messages.len() > limit as usize;
        messages.truncate(limit as usize);

        Ok(MessageConnection {
            page_info: PageInfo {
                has_next_page,
                end_cursor: messages.last().map(|message| encode_cursor(message.created_at)),
            },
            edges: messages.into_iter().map(Message::from).collect(),
        })
    }

    async fn message(ctx: &AppCtx, id: ID) -> Result<Option<Message>, ApiError> {
        let id = decode_id::<entities::MessageId>(&id)?;
        let message = ctx
            .loaders
            .message_by_id_loader
            .load(id)
            .await
            .map_err(AccessError::from)?;
        Ok(message.map(Message::from))
    }
}

#[derive(Clone, Debug)]
pub struct MutationRoot;

#[juniper::graphql_object(context = AppCtx, name = "Mutation")]
impl MutationRoot {
    async fn sign_up(
        ctx: &AppCtx,
        username: String,
        email: String,
        password: String,
    ) -> Result<Token, ApiError> {
        let token = user_commands::sign_up(
            &ctx.store,
            token_service(ctx)?,
            ctx.now,
            user_commands::SignUpInput {
                username,
                email,
                password,
            },
        )
        .await?;
        Ok(Token { token })
    }

    async fn sign_in(ctx: &AppCtx, login: String, password: String) -> Result<Token, ApiError> {
        let token =
            user_commands::sign_in(&ctx.store, token_service(ctx)?, ctx.now, &login, &password)
                .await?;
        Ok(Token { token })
    }

    async fn delete_user(ctx: &AppCtx, id: ID) -> Result<bool, ApiError> {
        ctx.require_role(entities::Role::Admin).await?;
        let id = decode_id::<entities::UserId>(&id)?;
        Ok(user_commands::delete_user(&ctx.store, id).await?)
    }

    async fn create_message(ctx: &AppCtx, text: String) -> Result<Message, ApiError> {
        let user_id = ctx.require_authenticated()?;
        let message = message_commands::create_message(&ctx.store, ctx.now, user_id, text).await?;
        Ok(Message::from(message))
    }

    async fn delete_message(ctx: &AppCtx, id: ID) -> Result<bool, ApiError> {
        let id = decode_id::<entities::MessageId>(&id)?;
        if guards::require_message_owner(ctx, id).await?.is_none() {
            return Ok(false);
        }
        Ok(message_commands::delete_message(&ctx.store, id).await?)
    }
}

fn token_service(ctx: &AppCtx) -> anyhow::Result<&crate::token::TokenService> {
    ctx.token_service
        .as_deref()
        .ok_or_else(|| anyhow!("token service is not available in this context"))
}

pub type Schema = RootNode<'static, QueryRoot, MutationRoot, EmptySubscription<AppCtx>>;

pub fn create_schema() -> Schema {
    Schema::new(QueryRoot, MutationRoot, EmptySubscription::<AppCtx>::new())
}
