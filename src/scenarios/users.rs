use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint;
use crate::error::ContractError;
use crate::expect::{self, JsonKind};
use crate::protocol::{CreatedUser, Page, Single, UpdatedUser, User};
use crate::schema::SchemaName;

use super::ScenarioContext;

const USER_FIELDS: [&str; 5] = ["id", "email", "first_name", "last_name", "avatar"];
const CREATED_FIELDS: [&str; 4] = ["name", "job", "id", "createdAt"];

async fn list(ctx: &ScenarioContext) -> Result<Page<User>, ContractError> {
    ctx.client.get(&endpoint::users_page(ctx.fixtures.users_page)).await
}

async fn first_listed(ctx: &ScenarioContext) -> Result<User, ContractError> {
    list(ctx)
        .await?
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ContractError::expectation("data", "at least one entry", "none"))
}

async fn create(ctx: &ScenarioContext) -> Result<CreatedUser, ContractError> {
    ctx.client
        .create(endpoint::USERS, &ctx.fixtures.new_user)
        .await?
        .into_success()
}

/// Create a user, then update it through the id the service handed back.
async fn create_then_update<T: DeserializeOwned>(ctx: &ScenarioContext) -> Result<T, ContractError> {
    let created = create(ctx).await?;
    ctx.client
        .update(&endpoint::user(&created.id), &ctx.fixtures.updated_user)
        .await
}

pub async fn list_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .get_value(&endpoint::users_page(ctx.fixtures.users_page))
        .await?;
    ctx.schemas.validate(SchemaName::Users, &body)?;
    Ok(())
}

pub async fn list_not_empty(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let page = list(ctx).await?;
    expect::non_empty_list("data", &page.data)
}

pub async fn list_has_required_fields(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .get_value(&endpoint::users_page(ctx.fixtures.users_page))
        .await?;
    expect::has_fields("data[0]", &body["data"][0], &USER_FIELDS)
}

pub async fn email_format(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let user = first_listed(ctx).await?;
    expect::matches("data[0].email", &expect::EMAIL, &user.email)
}

pub async fn avatar_format(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let user = first_listed(ctx).await?;
    expect::matches("data[0].avatar", &expect::AVATAR_URL, &user.avatar)
}

pub async fn id_is_integer(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .get_value(&endpoint::users_page(ctx.fixtures.users_page))
        .await?;
    expect::kind("data[0].id", &body["data"][0]["id"], JsonKind::Integer)
}

pub async fn by_id_matches_fixture(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let expected = &ctx.fixtures.known_user;
    let single: Single<User> = ctx.client.get(&endpoint::user(expected.id)).await?;
    expect::equals("data", expected, &single.data)
}

pub async fn create_returns_properties(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .create_value(endpoint::USERS, &ctx.fixtures.new_user)
        .await?
        .into_success()?;
    expect::has_fields("body", &body, &CREATED_FIELDS)
}

pub async fn create_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .create_value(endpoint::USERS, &ctx.fixtures.new_user)
        .await?
        .into_success()?;
    ctx.schemas.validate(SchemaName::CreatedUser, &body)?;
    Ok(())
}

pub async fn create_echoes_payload(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let payload = &ctx.fixtures.new_user;
    let created = create(ctx).await?;
    expect::equals("name", payload.name.as_str(), created.name.as_str())?;
    expect::equals("job", payload.job.as_str(), created.job.as_str())
}

pub async fn create_created_at_is_timestamp(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let created = create(ctx).await?;
    expect::timestamp("createdAt", &created.created_at)?;
    Ok(())
}

pub async fn update_echoes_payload(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let payload = &ctx.fixtures.updated_user;
    let updated: UpdatedUser = create_then_update(ctx).await?;
    expect::equals("name", payload.name.as_str(), updated.name.as_str())?;
    expect::equals("job", payload.job.as_str(), updated.job.as_str())
}

pub async fn update_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body: Value = create_then_update(ctx).await?;
    ctx.schemas.validate(SchemaName::UpdatedUser, &body)?;
    Ok(())
}

pub async fn update_updated_at_is_timestamp(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let updated: UpdatedUser = create_then_update(ctx).await?;
    expect::equals("job", ctx.fixtures.updated_user.job.as_str(), updated.job.as_str())?;
    expect::timestamp("updatedAt", &updated.updated_at)?;
    Ok(())
}

pub async fn delete_returns_no_content(ctx: &ScenarioContext) -> Result<(), ContractError> {
    ctx.client
        .remove(&endpoint::user(ctx.fixtures.deletable_user_id))
        .await
}

pub async fn delete_missing_returns_not_found(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let path = endpoint::user(ctx.fixtures.missing_user_id);
    expect::not_found(ctx.client.remove(&path).await)
}

pub async fn delete_malformed_returns_not_found(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let path = endpoint::user(&ctx.fixtures.malformed_user_id);
    expect::not_found(ctx.client.remove(&path).await)
}
