//! # Sample Data
//!
//! Fixed dataset written by `POST /initialize-data`.
//!
//! - 8 customers across the three segments
//! - 5 orders, each pointing at one of the first five customers
//! - 8 competitor price points
//! - 6 cities, three per tier
//!
//! Ids and creation timestamps are regenerated on every reseed, everything else is constant.
use crate::models::{
    CityAnalysis, CompetitorPrice, Customer, Order, OrderStatus,
    Segment::{Budget, Premium, Regular},
    Tier::{self, Tier1, Tier2},
    new_id,
};

pub struct SeedData {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub prices: Vec<CompetitorPrice>,
    pub cities: Vec<CityAnalysis>,
}

impl SeedData {
    pub fn generate() -> Self {
        let customers = customers();
        let orders = orders(&customers);

        Self {
            customers,
            orders,
            prices: prices(),
            cities: cities(),
        }
    }
}

fn customers() -> Vec<Customer> {
    vec![
        Customer::new(
            "Rajesh Kumar",
            "rajesh@example.com",
            Premium,
            1850.0,
            45,
            85.0,
            "2025-01-15",
            "Mumbai",
        ),
        Customer::new(
            "Priya Sharma",
            "priya@example.com",
            Regular,
            680.0,
            22,
            62.0,
            "2025-01-10",
            "Delhi",
        ),
        Customer::new(
            "Amit Patel",
            "amit@example.com",
            Premium,
            2100.0,
            38,
            78.0,
            "2025-01-17",
            "Bangalore",
        ),
        Customer::new(
            "Sneha Reddy",
            "sneha@example.com",
            Budget,
            420.0,
            15,
            45.0,
            "2024-12-20",
            "Hyderabad",
        ),
        Customer::new(
            "Vikram Singh",
            "vikram@example.com",
            Regular,
            950.0,
            30,
            70.0,
            "2025-01-12",
            "Mumbai",
        ),
        Customer::new(
            "Anjali Gupta",
            "anjali@example.com",
            Premium,
            1920.0,
            52,
            88.0,
            "2025-01-16",
            "Delhi",
        ),
        Customer::new(
            "Rohit Mehta",
            "rohit@example.com",
            Budget,
            380.0,
            12,
            40.0,
            "2024-12-15",
            "Pune",
        ),
        Customer::new(
            "Kavya Iyer",
            "kavya@example.com",
            Regular,
            850.0,
            28,
            65.0,
            "2025-01-14",
            "Chennai",
        ),
    ]
}

fn order(
    customer: &Customer,
    order_value: f64,
    delivery_time_minutes: u32,
    status: OrderStatus,
    order_date: &str,
    items: &[&str],
) -> Order {
    Order {
        id: new_id(),
        customer_id: customer.id.clone(),
        order_value,
        delivery_time_minutes,
        status,
        order_date: order_date.to_string(),
        items: items.iter().map(|item| item.to_string()).collect(),
        city: customer.city.clone(),
    }
}

fn orders(customers: &[Customer]) -> Vec<Order> {
    use OrderStatus::{Cancelled, Completed};

    vec![
        order(&customers[0], 1850.0, 12, Completed, "2025-01-15", &["Milk", "Bread", "Eggs"]),
        order(&customers[1], 680.0, 35, Completed, "2025-01-10", &["Rice", "Dal"]),
        order(
            &customers[2],
            2100.0,
            10,
            Completed,
            "2025-01-17",
            &["Fruits", "Vegetables", "Snacks"],
        ),
        order(&customers[3], 420.0, 45, Cancelled, "2024-12-20", &["Chips"]),
        order(&customers[4], 950.0, 18, Completed, "2025-01-12", &["Beverages", "Biscuits"]),
    ]
}

fn price(
    product: &str,
    ours: f64,
    blinkit: f64,
    zepto: f64,
    bigbasket: f64,
    category: &str,
) -> CompetitorPrice {
    CompetitorPrice {
        id: new_id(),
        product: product.to_string(),
        our_price: ours,
        blinkit_price: blinkit,
        zepto_price: zepto,
        bigbasket_price: bigbasket,
        category: category.to_string(),
    }
}

fn prices() -> Vec<CompetitorPrice> {
    vec![
        price("Milk (1L)", 62.0, 58.0, 59.0, 60.0, "Dairy"),
        price("Bread (400g)", 42.0, 38.0, 39.0, 40.0, "Bakery"),
        price("Rice (5kg)", 385.0, 370.0, 375.0, 380.0, "Staples"),
        price("Eggs (12 pcs)", 95.0, 88.0, 90.0, 92.0, "Dairy"),
        price("Chips (100g)", 25.0, 20.0, 22.0, 23.0, "Snacks"),
        price("Soft Drink (2L)", 95.0, 85.0, 88.0, 90.0, "Beverages"),
        price("Detergent (1kg)", 245.0, 235.0, 240.0, 242.0, "Household"),
        price("Cooking Oil (1L)", 185.0, 175.0, 178.0, 180.0, "Staples"),
    ]
}

fn city(
    name: &str,
    tier: Tier,
    avg_delivery_cost: f64,
    monthly_demand: u32,
    smartphone_penetration: f64,
    feasibility_score: f64,
    margin_potential: f64,
) -> CityAnalysis {
    CityAnalysis {
        id: new_id(),
        city: name.to_string(),
        tier,
        avg_delivery_cost,
        monthly_demand,
        smartphone_penetration,
        feasibility_score,
        margin_potential,
    }
}

fn cities() -> Vec<CityAnalysis> {
    vec![
        city("Mumbai", Tier1, 45.0, 15000, 92.0, 88.0, 12.5),
        city("Delhi", Tier1, 42.0, 14500, 90.0, 86.0, 11.8),
        city("Bangalore", Tier1, 48.0, 13800, 94.0, 90.0, 13.2),
        city("Indore", Tier2, 35.0, 4200, 68.0, 72.0, 9.5),
        city("Bhopal", Tier2, 32.0, 3800, 65.0, 68.0, 8.8),
        city("Coimbatore", Tier2, 38.0, 4500, 71.0, 75.0, 10.2),
    ]
}
