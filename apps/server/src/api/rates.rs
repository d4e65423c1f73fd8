use std::{str::FromStr, sync::Arc};

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use nbp_fx_core::fx::fx_model::serialize_decimal;
use nbp_fx_core::fx::{ConversionQuery, ExchangeRate, RateProviderTrait};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct RateParams {
    base: String,
    term: String,
    date: Option<NaiveDate>,
}

impl RateParams {
    fn into_query(self) -> ConversionQuery {
        let query = ConversionQuery::new(self.base, self.term);
        match self.date {
            Some(date) => query.on(date),
            None => query,
        }
    }
}

#[derive(Deserialize)]
struct LatestParams {
    base: String,
    term: String,
}

/// Amount arrives as text so no precision is lost to a float parse.
#[derive(Deserialize)]
struct ConvertParams {
    amount: String,
    base: String,
    term: String,
    date: Option<NaiveDate>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ConversionResponse {
    #[serde(serialize_with = "serialize_decimal")]
    amount: Decimal,
    base: String,
    term: String,
    #[serde(serialize_with = "serialize_decimal")]
    converted: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    factor: Decimal,
}

async fn get_exchange_rate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RateParams>,
) -> ApiResult<Json<ExchangeRate>> {
    let rate = state
        .rate_provider
        .get_exchange_rate(&params.into_query())
        .await?;
    Ok(Json(rate))
}

async fn get_latest_exchange_rate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LatestParams>,
) -> ApiResult<Json<ExchangeRate>> {
    let rate = state
        .rate_provider
        .get_latest_exchange_rate(&params.base, &params.term)
        .await?;
    Ok(Json(rate))
}

async fn convert_amount(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> ApiResult<Json<ConversionResponse>> {
    let amount = Decimal::from_str(params.amount.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid amount {}: {}", params.amount, e)))?;

    let query = RateParams {
        base: params.base,
        term: params.term,
        date: params.date,
    }
    .into_query();
    let conversion = state.rate_provider.convert(amount, &query).await?;

    Ok(Json(ConversionResponse {
        amount: conversion.amount,
        converted: conversion.converted,
        base: conversion.rate.base_currency,
        term: conversion.rate.term_currency,
        factor: conversion.rate.factor,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rates", get(get_exchange_rate))
        .route("/rates/latest", get(get_latest_exchange_rate))
        .route("/convert", get(convert_amount))
}
