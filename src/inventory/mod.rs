//! On-hand stock levels derived from purchase and sale flows

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{Purchase, Sale};

/// Direction of a single stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Inbound,
    Outbound,
}

/// One row of an item's movement log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub date: NaiveDateTime,
    pub description: String,
    pub quantity: i64,
    pub direction: FlowDirection,
}

/// Derived stock position for one item type
///
/// `total_in` and `total_out` are the raw flow sums; `on_hand` is clamped
/// at zero, so `total_out > total_in` is the signal a caller can use to
/// spot entries recorded out of order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub item_type: String,
    pub total_in: i64,
    pub total_out: i64,
    /// Current stock; never negative
    pub on_hand: i64,
    /// Share of inbound stock sold on, in [0, 1]
    pub turnover_ratio: BigDecimal,
}

impl InventoryLevel {
    /// Whether on-hand stock sits at or below the configured threshold
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.on_hand <= threshold
    }
}

/// Compute the stock position of one item type
///
/// Inbound = non-return purchases plus sale returns (returned goods
/// re-enter stock); outbound = non-return sales plus purchase returns.
/// Negative computed stock is clamped to zero by policy rather than
/// surfaced as an error. The turnover ratio counts only genuine sales in
/// its numerator and is capped at 1.
pub fn level_for(item_type: &str, sales: &[Sale], purchases: &[Purchase]) -> InventoryLevel {
    let regular_in: i64 = purchases
        .iter()
        .filter(|p| p.item_type == item_type && !p.is_return)
        .map(|p| p.quantity)
        .sum();
    let return_in: i64 = sales
        .iter()
        .filter(|s| s.item_type == item_type && s.is_return)
        .map(|s| s.quantity)
        .sum();
    let regular_out: i64 = sales
        .iter()
        .filter(|s| s.item_type == item_type && !s.is_return)
        .map(|s| s.quantity)
        .sum();
    let return_out: i64 = purchases
        .iter()
        .filter(|p| p.item_type == item_type && p.is_return)
        .map(|p| p.quantity)
        .sum();

    let total_in = regular_in + return_in;
    let total_out = regular_out + return_out;
    let on_hand = (total_in - total_out).max(0);

    let turnover_ratio = if total_in > 0 {
        let ratio = BigDecimal::from(regular_out) / BigDecimal::from(total_in);
        if ratio > BigDecimal::from(1) {
            BigDecimal::from(1)
        } else {
            ratio
        }
    } else {
        BigDecimal::from(0)
    };

    InventoryLevel {
        item_type: item_type.to_string(),
        total_in,
        total_out,
        on_hand,
        turnover_ratio,
    }
}

/// Movement log for one item type, newest first
pub fn movements(item_type: &str, sales: &[Sale], purchases: &[Purchase]) -> Vec<StockMovement> {
    let mut log: Vec<StockMovement> = Vec::new();

    for purchase in purchases.iter().filter(|p| p.item_type == item_type) {
        let (description, direction) = if purchase.is_return {
            ("Supplier return".to_string(), FlowDirection::Outbound)
        } else {
            (
                format!("Supply from {}", purchase.supplier_name),
                FlowDirection::Inbound,
            )
        };
        log.push(StockMovement {
            date: purchase.date,
            description,
            quantity: purchase.quantity,
            direction,
        });
    }
    for sale in sales.iter().filter(|s| s.item_type == item_type) {
        let (description, direction) = if sale.is_return {
            ("Customer return".to_string(), FlowDirection::Inbound)
        } else {
            (
                format!("Sale to {}", sale.customer_name),
                FlowDirection::Outbound,
            )
        };
        log.push(StockMovement {
            date: sale.date,
            description,
            quantity: sale.quantity,
            direction,
        });
    }

    log.sort_by(|a, b| b.date.cmp(&a.date));
    log
}
