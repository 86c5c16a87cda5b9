//! Order approval board. Transitions are local only; nothing is written
//! back to the order feed.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use shared::{
    domain::{OrderId, OrderStatus},
    protocol::{Order, OrderItem},
};
use tracing::{info, warn};

use crate::{eligibility, error::OrderError, transport::OrderFeed, types::StatusFilter};

/// Result of a status change request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied(OrderStatus),
    /// The order had already settled; its status is left as is.
    Unchanged(OrderStatus),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Board preloaded with the sample orders shown before the feed answers.
    pub fn seeded() -> Self {
        Self::new(seed_orders())
    }

    /// Replaces the orders from the feed. On failure the current orders stay.
    pub async fn load(&mut self, feed: &dyn OrderFeed) -> bool {
        match feed.list_orders().await {
            Ok(orders) => {
                info!(count = orders.len(), "orders loaded");
                self.orders = orders;
                true
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to fetch orders; keeping current board");
                false
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == order_id)
    }

    pub fn filter(&self, filter: StatusFilter) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| filter.matches(order))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.orders
            .iter()
            .fold(StatusCounts::default(), |mut counts, order| {
                match order.status {
                    OrderStatus::Pending => counts.pending += 1,
                    OrderStatus::Approved => counts.approved += 1,
                    OrderStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Whether the approve action should be offered for this order.
    pub fn can_approve(&self, order_id: &OrderId) -> bool {
        self.get(order_id).is_some_and(|order| {
            order.status == OrderStatus::Pending
                && eligibility::is_eligible(&order.delivery_location)
        })
    }

    pub fn approve(&mut self, order_id: &OrderId) -> Result<Transition, OrderError> {
        let order = self.get_mut(order_id)?;
        if order.status.is_terminal() {
            return Ok(Transition::Unchanged(order.status));
        }
        if !eligibility::is_eligible(&order.delivery_location) {
            return Err(OrderError::IneligibleLocation {
                order_id: order_id.clone(),
                location: order.delivery_location.clone(),
            });
        }
        order.status = OrderStatus::Approved;
        info!(%order_id, "order approved");
        Ok(Transition::Applied(OrderStatus::Approved))
    }

    pub fn reject(&mut self, order_id: &OrderId) -> Result<Transition, OrderError> {
        let order = self.get_mut(order_id)?;
        if order.status.is_terminal() {
            return Ok(Transition::Unchanged(order.status));
        }
        order.status = OrderStatus::Rejected;
        info!(%order_id, "order rejected");
        Ok(Transition::Applied(OrderStatus::Rejected))
    }

    fn get_mut(&mut self, order_id: &OrderId) -> Result<&mut Order, OrderError> {
        self.orders
            .iter_mut()
            .find(|order| &order.id == order_id)
            .ok_or_else(|| OrderError::UnknownOrder(order_id.clone()))
    }
}

fn item(name: &str, quantity: u32, price: f64) -> OrderItem {
    OrderItem {
        name: name.into(),
        quantity: NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
        price,
    }
}

fn seed_order(
    id: &str,
    customer_name: &str,
    (year, month, day): (i32, u32, u32),
    items: Vec<OrderItem>,
    total_amount: f64,
    delivery_location: &str,
) -> Order {
    Order {
        id: OrderId::new(id),
        customer_name: customer_name.into(),
        order_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        items,
        total_amount,
        status: OrderStatus::Pending,
        delivery_location: delivery_location.into(),
    }
}

fn seed_orders() -> Vec<Order> {
    vec![
        seed_order(
            "1",
            "John Doe",
            (2023, 5, 15),
            vec![item("coffee", 2, 10.0), item("mojito", 1, 20.0)],
            30.0,
            "New York, USA",
        ),
        seed_order(
            "2",
            "Jane Smith",
            (2023, 5, 16),
            vec![item("limejuice", 3, 15.0)],
            45.0,
            "London, UK",
        ),
        seed_order(
            "3",
            "Mike Johnson",
            (2023, 5, 17),
            vec![item("fanta soda", 1, 25.0), item("martini", 2, 30.0)],
            85.0,
            "Paris, France",
        ),
    ]
}

#[cfg(test)]
#[path = "tests/orders_tests.rs"]
mod tests;
