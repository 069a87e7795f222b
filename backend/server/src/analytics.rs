//! # Analytics
//!
//! Aggregations over the stored collections and the profitability what-if.
//!
//! Nothing in here touches the store. Handlers fetch the collections and pass slices in, which
//! keeps every number the API returns reproducible from plain vectors.
//!
//! ## Rounding
//! - Retention, delivery time, money: 2 decimals
//! - Projected order count: 0 decimals
//! - Segment summary averages are left unrounded
//!
//! ## Empty input
//! Every mean over an empty set is `0`, never an error.
use crate::{
    models::{
        CompetitorPrice, Customer, Order, OrderStatus, Overview, PriceGap, PriceGapReport,
        ProfitabilityReport, ProfitabilityScenario, RetentionAnalysis, RetentionBySegment,
        Segment, SegmentBreakdown, SegmentBuckets, SegmentStats, SegmentSummary,
    },
    utils::{mean, round_to},
};

pub const BASE_REVENUE: f64 = 1_000_000.0;
pub const BASE_ORDERS: f64 = 10_000.0;
pub const FIXED_COSTS: f64 = 150_000.0;
pub const COGS_RATIO: f64 = 0.65;

pub const HIGH_RETENTION: f64 = 75.0;
pub const MEDIUM_RETENTION: f64 = 50.0;

pub fn segment_breakdown(customers: &[Customer]) -> SegmentBreakdown {
    let mut segments = SegmentBuckets::default();

    for customer in customers {
        segments.bucket_mut(customer.segment).push(customer.clone());
    }

    let stats = |segment| segment_stats(segments.bucket(segment));
    let summary = SegmentSummary {
        premium: stats(Segment::Premium),
        regular: stats(Segment::Regular),
        budget: stats(Segment::Budget),
    };

    SegmentBreakdown { segments, summary }
}

fn segment_stats(bucket: &[Customer]) -> SegmentStats {
    SegmentStats {
        count: bucket.len(),
        avg_aov: mean(bucket.iter().map(|c| c.avg_order_value)),
        avg_retention: mean(bucket.iter().map(|c| c.retention_rate)),
    }
}

pub fn retention_analysis(customers: &[Customer], orders: &[Order]) -> RetentionAnalysis {
    let avg_delivery_time = mean(
        orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .map(|o| o.delivery_time_minutes as f64),
    );

    let (mut high, mut medium, mut low) = (0, 0, 0);
    for customer in customers {
        match customer.retention_rate {
            rate if rate >= HIGH_RETENTION => high += 1,
            rate if rate >= MEDIUM_RETENTION => medium += 1,
            _ => low += 1,
        }
    }

    let segment_retention = |segment: Segment| {
        round_to(
            mean(
                customers
                    .iter()
                    .filter(|c| c.segment == segment)
                    .map(|c| c.retention_rate),
            ),
            2,
        )
    };

    RetentionAnalysis {
        avg_delivery_time: round_to(avg_delivery_time, 2),
        high_retention_count: high,
        medium_retention_count: medium,
        low_retention_count: low,
        retention_by_segment: RetentionBySegment {
            premium: segment_retention(Segment::Premium),
            regular: segment_retention(Segment::Regular),
            budget: segment_retention(Segment::Budget),
        },
    }
}

/// No bounds checks: negative or extreme inputs give arithmetically consistent extremes.
pub fn profitability(scenario: &ProfitabilityScenario) -> ProfitabilityReport {
    let base_aov = BASE_REVENUE / BASE_ORDERS;

    let new_orders = BASE_ORDERS * scenario.demand_multiplier;
    let new_revenue = new_orders * base_aov;

    let delivery_costs = new_orders * scenario.delivery_cost;
    let discount_costs = new_revenue * (scenario.discount_rate / 100.0);
    let cogs = new_revenue * COGS_RATIO;

    let total_costs = delivery_costs + discount_costs + FIXED_COSTS + cogs;
    let profit = new_revenue - total_costs;
    let margin = if new_revenue > 0.0 {
        profit / new_revenue * 100.0
    } else {
        0.0
    };

    ProfitabilityReport {
        revenue: round_to(new_revenue, 2),
        orders: round_to(new_orders, 0),
        delivery_costs: round_to(delivery_costs, 2),
        discount_costs: round_to(discount_costs, 2),
        total_costs: round_to(total_costs, 2),
        profit: round_to(profit, 2),
        margin_percent: round_to(margin, 2),
    }
}

pub fn price_gaps(prices: &[CompetitorPrice]) -> PriceGapReport {
    let gaps: Vec<PriceGap> = prices.iter().map(price_gap).collect();
    let avg_difference = round_to(mean(gaps.iter().map(|g| g.difference)), 2);

    PriceGapReport {
        gaps,
        avg_difference,
    }
}

fn price_gap(price: &CompetitorPrice) -> PriceGap {
    let (cheapest_competitor, cheapest_price) = price
        .competitors()
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or(("none", price.our_price));

    let difference = price.our_price - cheapest_price;
    let difference_percent = if cheapest_price != 0.0 {
        difference / cheapest_price * 100.0
    } else {
        0.0
    };

    PriceGap {
        product: price.product.clone(),
        category: price.category.clone(),
        our_price: price.our_price,
        cheapest_competitor: cheapest_competitor.to_string(),
        cheapest_price,
        difference: round_to(difference, 2),
        difference_percent: round_to(difference_percent, 2),
    }
}

pub fn overview(customers: &[Customer], orders: &[Order]) -> Overview {
    Overview {
        total_customers: customers.len(),
        total_orders: orders.len(),
        completed_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .count(),
        avg_retention: round_to(mean(customers.iter().map(|c| c.retention_rate)), 2),
        avg_order_value: round_to(mean(customers.iter().map(|c| c.avg_order_value)), 2),
    }
}
