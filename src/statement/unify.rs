//! Merging heterogeneous records into one ordered statement sequence

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{
    Currency, EntityKind, OpeningBalance, Purchase, Record, Sale, Voucher, VoucherKind,
};

/// What kind of record a statement line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSource {
    Opening,
    Invoice,
    Supply,
    Receipt,
    Payment,
}

/// One row of a unified, not-yet-accumulated statement
///
/// Debit and credit are kept in the record's original currency; conversion
/// happens later in the balance accumulator so both display modes stay
/// available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub date: NaiveDateTime,
    pub description: String,
    pub source: LineSource,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub currency: Currency,
}

/// Merge an entity's records into one chronological statement sequence
///
/// The opening balance, when present and non-zero, is always the first
/// line regardless of its date: it stands for everything before recorded
/// history began. The remaining lines are sorted by timestamp ascending;
/// records at the same instant keep assembly order (sales or purchases
/// before vouchers, source order within each), which makes reruns over the
/// same snapshot byte-identical.
///
/// Statements are not filtered by settlement status: cash and credit
/// activity both appear. Only the debt aggregator is credit-only.
pub fn unify(
    entity_id: Uuid,
    kind: EntityKind,
    sales: &[Sale],
    purchases: &[Purchase],
    vouchers: &[Voucher],
    opening: Option<&OpeningBalance>,
) -> Vec<StatementLine> {
    let mut lines = Vec::new();

    if let Some(opening) = opening {
        if opening.amount != BigDecimal::from(0) {
            lines.push(opening_line(opening));
        }
    }

    let mut records: Vec<Record> = Vec::new();
    match kind {
        EntityKind::Customer => {
            records.extend(sales.iter().cloned().map(Record::Sale));
        }
        EntityKind::Supplier => {
            records.extend(purchases.iter().cloned().map(Record::Purchase));
        }
    }
    records.extend(
        vouchers
            .iter()
            .filter(|v| v.entity_kind == kind)
            .cloned()
            .map(Record::Voucher),
    );

    // Walk-in sales carry no entity id and drop out here.
    records.retain(|r| r.entity_id() == Some(entity_id));
    // Stable sort: equal timestamps keep assembly order.
    records.sort_by_key(Record::timestamp);

    lines.extend(records.iter().filter_map(|record| line_for(record, kind)));
    lines
}

fn opening_line(opening: &OpeningBalance) -> StatementLine {
    let zero = BigDecimal::from(0);
    let (debit, credit) = if opening.amount > zero {
        (opening.amount.clone(), zero)
    } else {
        (zero, opening.amount.abs())
    };
    StatementLine {
        date: opening.date,
        description: opening
            .note
            .clone()
            .unwrap_or_else(|| "Opening balance (prior debt)".to_string()),
        source: LineSource::Opening,
        debit,
        credit,
        currency: opening.currency,
    }
}

/// Map one record onto its debit/credit legs for the given entity side
fn line_for(record: &Record, kind: EntityKind) -> Option<StatementLine> {
    let zero = BigDecimal::from(0);
    match record {
        Record::Sale(sale) => {
            debug_assert_eq!(kind, EntityKind::Customer);
            let (debit, credit) = if sale.is_return {
                (zero, sale.total.clone())
            } else {
                (sale.total.clone(), zero)
            };
            Some(StatementLine {
                date: sale.date,
                description: item_description(&sale.item_type, sale.quantity, sale.is_return),
                source: LineSource::Invoice,
                debit,
                credit,
                currency: sale.currency,
            })
        }
        Record::Purchase(purchase) => {
            debug_assert_eq!(kind, EntityKind::Supplier);
            let (debit, credit) = if purchase.is_return {
                (purchase.total_cost.clone(), zero)
            } else {
                (zero, purchase.total_cost.clone())
            };
            Some(StatementLine {
                date: purchase.date,
                description: item_description(
                    &purchase.item_type,
                    purchase.quantity,
                    purchase.is_return,
                ),
                source: LineSource::Supply,
                debit,
                credit,
                currency: purchase.currency,
            })
        }
        Record::Voucher(voucher) => {
            let (debit, credit, source, default_desc) = match voucher.kind {
                VoucherKind::Payment => (
                    voucher.amount.clone(),
                    zero,
                    LineSource::Payment,
                    "Cash paid out",
                ),
                VoucherKind::Receipt => (
                    zero,
                    voucher.amount.clone(),
                    LineSource::Receipt,
                    "Cash received",
                ),
            };
            Some(StatementLine {
                date: voucher.date,
                description: voucher
                    .notes
                    .clone()
                    .unwrap_or_else(|| default_desc.to_string()),
                source,
                debit,
                credit,
                currency: voucher.currency,
            })
        }
        // Expenses belong to no entity and opening balances are pinned
        // ahead of the sorted body.
        Record::Expense(_) | Record::Opening(_) => None,
    }
}

fn item_description(item_type: &str, quantity: i64, is_return: bool) -> String {
    if is_return {
        format!("Return: {} ({})", item_type, quantity)
    } else {
        format!("{} ({})", item_type, quantity)
    }
}
