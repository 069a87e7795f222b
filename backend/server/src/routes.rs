use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    analytics::{overview, price_gaps, profitability, retention_analysis, segment_breakdown},
    database::Collection,
    error::AppError,
    models::{
        CityAnalysis, CompetitorPrice, Customer, InitializeResponse, Order, Overview,
        PriceGapReport, ProfitabilityReport, ProfitabilityScenario, RetentionAnalysis,
        SegmentBreakdown,
    },
    seed::SeedData,
    state::State,
};

type Shared = AxumState<Arc<State>>;

pub async fn initialize_handler(
    AxumState(state): Shared,
) -> Result<Json<InitializeResponse>, AppError> {
    let data = SeedData::generate();
    let database = &state.database;

    let customers = database.replace_all(Collection::Customers, &data.customers).await?;
    let orders = database.replace_all(Collection::Orders, &data.orders).await?;
    let prices = database.replace_all(Collection::CompetitorPrices, &data.prices).await?;
    let cities = database.replace_all(Collection::CityAnalysis, &data.cities).await?;

    info!("Reseeded {customers} customers, {orders} orders, {prices} prices, {cities} cities");

    Ok(Json(InitializeResponse {
        message: "Sample data initialized successfully".to_string(),
        customers,
        orders,
    }))
}

pub async fn customers_handler(AxumState(state): Shared) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.database.fetch_all(Collection::Customers).await?))
}

pub async fn segments_handler(
    AxumState(state): Shared,
) -> Result<Json<SegmentBreakdown>, AppError> {
    let customers: Vec<Customer> = state.database.fetch_all(Collection::Customers).await?;

    Ok(Json(segment_breakdown(&customers)))
}

pub async fn competitor_prices_handler(
    AxumState(state): Shared,
) -> Result<Json<Vec<CompetitorPrice>>, AppError> {
    Ok(Json(state.database.fetch_all(Collection::CompetitorPrices).await?))
}

pub async fn city_analysis_handler(
    AxumState(state): Shared,
) -> Result<Json<Vec<CityAnalysis>>, AppError> {
    Ok(Json(state.database.fetch_all(Collection::CityAnalysis).await?))
}

pub async fn orders_handler(AxumState(state): Shared) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.database.fetch_all(Collection::Orders).await?))
}

pub async fn profitability_handler(
    payload: Result<Json<ProfitabilityScenario>, JsonRejection>,
) -> Result<Json<ProfitabilityReport>, AppError> {
    let Json(scenario) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    Ok(Json(profitability(&scenario)))
}

pub async fn retention_handler(
    AxumState(state): Shared,
) -> Result<Json<RetentionAnalysis>, AppError> {
    let (customers, orders) = fetch_customers_and_orders(&state).await?;

    Ok(Json(retention_analysis(&customers, &orders)))
}

pub async fn price_gaps_handler(
    AxumState(state): Shared,
) -> Result<Json<PriceGapReport>, AppError> {
    let prices: Vec<CompetitorPrice> =
        state.database.fetch_all(Collection::CompetitorPrices).await?;

    Ok(Json(price_gaps(&prices)))
}

pub async fn overview_handler(AxumState(state): Shared) -> Result<Json<Overview>, AppError> {
    let (customers, orders) = fetch_customers_and_orders(&state).await?;

    Ok(Json(overview(&customers, &orders)))
}

pub async fn health_handler(AxumState(state): Shared) -> Result<Json<Value>, AppError> {
    state.database.ping().await?;

    Ok(Json(json!({ "status": "ok" })))
}

async fn fetch_customers_and_orders(
    state: &State,
) -> Result<(Vec<Customer>, Vec<Order>), AppError> {
    let customers = state.database.fetch_all(Collection::Customers).await?;
    let orders = state.database.fetch_all(Collection::Orders).await?;

    Ok((customers, orders))
}
