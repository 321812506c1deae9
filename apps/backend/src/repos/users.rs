//! User repository functions, generic over `ConnectionTrait`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DerivePartialModel, EntityTrait,
    FromQueryResult, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::auth::roles::Role;
use crate::entities::users;

/// Public-safe projection of a user row.
///
/// This is the only shape the session resolver ever selects; the query it
/// generates cannot touch the password hash column.
#[derive(Debug, Clone, PartialEq, DerivePartialModel, FromQueryResult)]
#[sea_orm(entity = "users::Entity")]
pub struct UserPublic {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
}

/// Look up an active user by id, selecting public fields only.
pub async fn find_active_public_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<UserPublic>, DbErr> {
    users::Entity::find_by_id(id)
        .filter(users::Column::IsActive.eq(true))
        .into_partial_model::<UserPublic>()
        .one(conn)
        .await
}

/// Full row lookup by email, for the login flow (needs the password hash
/// and active flag).
pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

/// Insert a new active user.
pub async fn create_user<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<users::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(Some(email.to_string())),
        password_hash: Set(Some(password_hash.to_string())),
        role: Set(role),
        telegram_id: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    user.insert(conn).await
}
