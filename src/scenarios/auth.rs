use crate::endpoint;
use crate::error::ContractError;
use crate::expect;
use crate::protocol::{Credentials, Registration, Token};
use crate::schema::SchemaName;

use super::ScenarioContext;

pub async fn login_returns_token(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let login: Token = ctx
        .client
        .authenticate(endpoint::LOGIN, &ctx.fixtures.login)
        .await?
        .into_success()?;

    expect::non_empty("token", &login.token)
}

pub async fn login_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .authenticate_value(endpoint::LOGIN, &ctx.fixtures.login)
        .await?
        .into_success()?;

    ctx.schemas.validate(SchemaName::Login, &body)?;
    Ok(())
}

pub async fn login_unknown_user_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(ctx, endpoint::LOGIN, &fixtures.unknown_login, &fixtures.messages.user_not_found).await
}

pub async fn login_blank_email_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(
        ctx,
        endpoint::LOGIN,
        &fixtures.login.without_email(),
        &fixtures.messages.missing_email,
    )
    .await
}

pub async fn login_blank_password_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(
        ctx,
        endpoint::LOGIN,
        &fixtures.login.without_password(),
        &fixtures.messages.missing_password,
    )
    .await
}

pub async fn register_returns_id_and_token(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let registration: Registration = ctx
        .client
        .authenticate(endpoint::REGISTER, &ctx.fixtures.register)
        .await?
        .into_success()?;

    expect::non_zero("id", registration.id)?;
    expect::non_empty("token", &registration.token)
}

pub async fn register_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx
        .client
        .authenticate_value(endpoint::REGISTER, &ctx.fixtures.register)
        .await?
        .into_success()?;

    ctx.schemas.validate(SchemaName::Register, &body)?;
    Ok(())
}

pub async fn register_undefined_user_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(
        ctx,
        endpoint::REGISTER,
        &fixtures.undefined_register,
        &fixtures.messages.undefined_registration,
    )
    .await
}

pub async fn register_blank_email_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(
        ctx,
        endpoint::REGISTER,
        &fixtures.register.without_email(),
        &fixtures.messages.missing_email,
    )
    .await
}

pub async fn register_blank_password_rejected(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let fixtures = &ctx.fixtures;
    expect_rejection(
        ctx,
        endpoint::REGISTER,
        &fixtures.register.without_password(),
        &fixtures.messages.missing_password,
    )
    .await
}

async fn expect_rejection(
    ctx: &ScenarioContext,
    path: &str,
    credentials: &Credentials,
    message: &str,
) -> Result<(), ContractError> {
    let rejection = ctx
        .client
        .authenticate_value(path, credentials)
        .await?
        .into_rejected()?;

    expect::equals("error", message, rejection.error.as_str())
}
