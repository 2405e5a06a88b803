//! Basic statement walkthrough with historically dated exchange rates

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use ledger_core::utils::MemorySource;
use ledger_core::{
    Currency, Customer, EntityKind, ExchangeRateSnapshot, LedgerEngine, OpeningBalance,
    PaymentStatus, Sale, Voucher, VoucherKind,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📒 Ledger Core - Statement Example\n");

    let source = MemorySource::new();
    let day = |d: u32| {
        NaiveDate::from_ymd_opt(2024, 4, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    };

    // 1. Rate history, newest first once both days are recorded
    println!("💱 Recording exchange rates...");
    source.record_rate_snapshot(ExchangeRateSnapshot::new(
        BigDecimal::from(420),
        BigDecimal::from(415),
        day(1).date(),
    ))?;
    source.record_rate_snapshot(ExchangeRateSnapshot::new(
        BigDecimal::from(400),
        BigDecimal::from(410),
        day(2).date(),
    ))?;
    println!("  ✓ Day 1: SAR = 420   Day 2: SAR = 400\n");

    // 2. A customer with prior debt
    let customer = Customer::new("Ahmad").with_opening_balance(OpeningBalance {
        amount: BigDecimal::from(1000),
        currency: Currency::YER,
        date: day(1),
        note: Some("Balance carried from the old notebook".to_string()),
    });
    let customer_id = customer.id;
    source.add_customer(customer);

    // 3. A credit sale in SAR on day 1, converted at that day's rate
    source.record_sale(Sale::new(
        day(1),
        Some(customer_id),
        "Ahmad",
        "TypeA",
        2,
        BigDecimal::from(5),
        Currency::SAR,
        PaymentStatus::Credit,
    ))?;

    // 4. A cash receipt on day 3
    source.record_voucher(Voucher::new(
        day(3),
        customer_id,
        "Ahmad",
        EntityKind::Customer,
        BigDecimal::from(2000),
        Currency::YER,
        VoucherKind::Receipt,
    ))?;

    // 5. Build the statement
    let engine = LedgerEngine::new(source);
    let statement = engine.statement(customer_id, EntityKind::Customer).await?;

    println!("🧾 Statement for {}:", statement.entity_name);
    for entry in &statement.entries {
        println!(
            "  {} | {:<40} | debit {:>8} | credit {:>8} | rate {:>5} | balance {:>8}",
            entry.date.date(),
            entry.description,
            entry.debit,
            entry.credit,
            entry.rate_used,
            entry.running_balance
        );
    }
    println!(
        "\n  Closing balance: {} YER ({:?})",
        statement.summary.final_balance, statement.summary.position
    );

    Ok(())
}
