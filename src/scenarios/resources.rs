use serde_json::Value;

use crate::endpoint;
use crate::error::ContractError;
use crate::expect::{self, JsonKind};
use crate::protocol::{Page, Resource, Single};
use crate::schema::SchemaName;

use super::ScenarioContext;

const RESOURCE_FIELDS: [&str; 5] = ["id", "name", "year", "color", "pantone_value"];

async fn list(ctx: &ScenarioContext) -> Result<Page<Resource>, ContractError> {
    ctx.client.get(endpoint::RESOURCES).await
}

fn entries(body: &Value) -> Result<&Vec<Value>, ContractError> {
    body["data"]
        .as_array()
        .ok_or_else(|| ContractError::expectation("data", JsonKind::Array, &body["data"]))
}

pub async fn list_matches_schema(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx.client.get_value(endpoint::RESOURCES).await?;
    ctx.schemas.validate(SchemaName::Resources, &body)?;
    Ok(())
}

pub async fn list_not_empty(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let page = list(ctx).await?;
    expect::non_empty_list("data", &page.data)
}

pub async fn list_has_required_fields(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx.client.get_value(endpoint::RESOURCES).await?;
    expect::has_fields("data[0]", &body["data"][0], &RESOURCE_FIELDS)
}

pub async fn list_is_first_page(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx.client.get_value(endpoint::RESOURCES).await?;
    expect::kind("page", &body["page"], JsonKind::Integer)?;
    expect::equals("page", Some(1), body["page"].as_u64())
}

pub async fn colors_are_hex(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let page = list(ctx).await?;
    for (i, resource) in page.data.iter().enumerate() {
        expect::matches(&format!("data[{i}].color"), &expect::HEX_COLOR, &resource.color)?;
    }
    Ok(())
}

pub async fn ids_unique(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let page = list(ctx).await?;
    expect::unique("data[].id", page.data.iter().map(|r| r.id))
}

/// Checked on the raw body so a wrongly typed field is named, not just
/// reported as a decode failure.
pub async fn field_types(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let body = ctx.client.get_value(endpoint::RESOURCES).await?;
    for (i, entry) in entries(&body)?.iter().enumerate() {
        expect::kind(&format!("data[{i}].year"), &entry["year"], JsonKind::Number)?;
        expect::kind(&format!("data[{i}].name"), &entry["name"], JsonKind::String)?;
        expect::kind(&format!("data[{i}].pantone_value"), &entry["pantone_value"], JsonKind::String)?;
    }
    Ok(())
}

pub async fn by_id_matches_fixture(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let expected = &ctx.fixtures.known_resource;
    let single: Single<Resource> = ctx.client.get(&endpoint::resource(expected.id)).await?;
    expect::equals("data", expected, &single.data)
}

pub async fn missing_returns_not_found(ctx: &ScenarioContext) -> Result<(), ContractError> {
    let path = endpoint::resource(ctx.fixtures.missing_resource_id);
    expect::not_found(ctx.client.get_value(&path).await)
}
