//! # Records
//!
//! Shapes of the four stored collections plus the request/response bodies of the analytics routes.
//!
//! Documents are stored as JSON, so these structs are the only schema the store has. A document
//! that no longer matches its struct surfaces as [`crate::error::AppError::CorruptDocument`].
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Premium,
    Regular,
    Budget,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Cancelled,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    #[serde(rename = "tier-1")]
    Tier1,
    #[serde(rename = "tier-2")]
    Tier2,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub segment: Segment,
    pub avg_order_value: f64,
    pub total_orders: u32,
    pub retention_rate: f64,
    pub last_order_date: String,
    pub city: String,
    pub created_at: String,
}

impl Customer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        email: &str,
        segment: Segment,
        avg_order_value: f64,
        total_orders: u32,
        retention_rate: f64,
        last_order_date: &str,
        city: &str,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            segment,
            avg_order_value,
            total_orders,
            retention_rate,
            last_order_date: last_order_date.to_string(),
            city: city.to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    /// Weak reference, never checked against the customers collection.
    pub customer_id: String,
    pub order_value: f64,
    pub delivery_time_minutes: u32,
    pub status: OrderStatus,
    pub order_date: String,
    pub items: Vec<String>,
    pub city: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompetitorPrice {
    pub id: String,
    pub product: String,
    pub our_price: f64,
    pub blinkit_price: f64,
    pub zepto_price: f64,
    pub bigbasket_price: f64,
    pub category: String,
}

impl CompetitorPrice {
    pub fn competitors(&self) -> [(&'static str, f64); 3] {
        [
            ("blinkit", self.blinkit_price),
            ("zepto", self.zepto_price),
            ("bigbasket", self.bigbasket_price),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CityAnalysis {
    pub id: String,
    pub city: String,
    pub tier: Tier,
    pub avg_delivery_cost: f64,
    pub monthly_demand: u32,
    pub smartphone_penetration: f64,
    pub feasibility_score: f64,
    pub margin_potential: f64,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// What-if inputs, never persisted.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct ProfitabilityScenario {
    pub discount_rate: f64,
    pub delivery_cost: f64,
    pub demand_multiplier: f64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InitializeResponse {
    pub message: String,
    pub customers: usize,
    pub orders: usize,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SegmentStats {
    pub count: usize,
    pub avg_aov: f64,
    pub avg_retention: f64,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SegmentBuckets {
    pub premium: Vec<Customer>,
    pub regular: Vec<Customer>,
    pub budget: Vec<Customer>,
}

impl SegmentBuckets {
    pub fn bucket(&self, segment: Segment) -> &[Customer] {
        match segment {
            Segment::Premium => &self.premium,
            Segment::Regular => &self.regular,
            Segment::Budget => &self.budget,
        }
    }

    pub fn bucket_mut(&mut self, segment: Segment) -> &mut Vec<Customer> {
        match segment {
            Segment::Premium => &mut self.premium,
            Segment::Regular => &mut self.regular,
            Segment::Budget => &mut self.budget,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SegmentSummary {
    pub premium: SegmentStats,
    pub regular: SegmentStats,
    pub budget: SegmentStats,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SegmentBreakdown {
    pub segments: SegmentBuckets,
    pub summary: SegmentSummary,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct RetentionBySegment {
    pub premium: f64,
    pub regular: f64,
    pub budget: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct RetentionAnalysis {
    pub avg_delivery_time: f64,
    pub high_retention_count: usize,
    pub medium_retention_count: usize,
    pub low_retention_count: usize,
    pub retention_by_segment: RetentionBySegment,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ProfitabilityReport {
    pub revenue: f64,
    pub orders: f64,
    pub delivery_costs: f64,
    pub discount_costs: f64,
    pub total_costs: f64,
    pub profit: f64,
    pub margin_percent: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct PriceGap {
    pub product: String,
    pub category: String,
    pub our_price: f64,
    pub cheapest_competitor: String,
    pub cheapest_price: f64,
    pub difference: f64,
    pub difference_percent: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct PriceGapReport {
    pub gaps: Vec<PriceGap>,
    pub avg_difference: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Overview {
    pub total_customers: usize,
    pub total_orders: usize,
    pub completed_orders: usize,
    pub avg_retention: f64,
    pub avg_order_value: f64,
}
