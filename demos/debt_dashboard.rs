//! Debt dashboard walkthrough: exposure ranking, aging, daily figures

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use ledger_core::utils::MemorySource;
use ledger_core::{
    total_exposure, Currency, Customer, EngineConfig, ExchangeRateSnapshot, LedgerEngine,
    OpeningBalance, PaymentStatus, Purchase, Sale, Supplier,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💰 Ledger Core - Debt Dashboard Example\n");

    let source = MemorySource::new();
    let day = |d: u32| {
        NaiveDate::from_ymd_opt(2024, 4, d)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    };

    source.record_rate_snapshot(ExchangeRateSnapshot::new(
        BigDecimal::from(400),
        BigDecimal::from(410),
        day(10).date(),
    ))?;
    source.add_item_type("TypeA");

    // Customers with different exposure profiles
    let ahmad = Customer::new("Ahmad").with_opening_balance(OpeningBalance {
        amount: BigDecimal::from(150_000),
        currency: Currency::YER,
        date: day(1),
        note: None,
    });
    let salem = Customer::new("Salem");
    let salem_id = salem.id;
    source.add_customer(ahmad);
    source.add_customer(salem.clone());

    source.record_sale(Sale::new(
        day(9),
        Some(salem_id),
        "Salem",
        "TypeA",
        10,
        BigDecimal::from(100),
        Currency::SAR,
        PaymentStatus::Credit,
    ))?;

    let supplier = Supplier::new("Al-Madina");
    source.add_supplier(supplier.clone());
    source.record_purchase(Purchase::new(
        day(8),
        supplier.id,
        "Al-Madina",
        "TypeA",
        50,
        BigDecimal::from(60),
        Currency::YER,
        PaymentStatus::Credit,
    ))?;

    let config = EngineConfig::default();
    let engine = LedgerEngine::with_config(source, config);
    let rates = engine.rates().await?;

    // Ranked by present-day exposure, largest first
    println!("📊 Customer debts (ranked by exposure):");
    let debts = engine.customer_debts().await?;
    for debt in &debts {
        let bucket = debt.aging(day(10), &engine.config().aging);
        println!(
            "  {:<10} total {:>10} YER  [{:?}]",
            debt.entity_name,
            debt.total_in_base(&rates),
            bucket
        );
        for currency in Currency::ALL {
            let balance = &debt.balances[&currency];
            if *balance != BigDecimal::from(0) {
                println!("      {} {}", balance, currency.code());
            }
        }
    }
    println!(
        "\n  Total outstanding: {} YER",
        total_exposure(&debts, &rates)
    );

    println!("\n🚚 Supplier balances:");
    for debt in engine.supplier_debts().await? {
        println!(
            "  {:<10} total {:>10} YER",
            debt.entity_name,
            debt.total_in_base(&rates)
        );
    }

    println!("\n📅 Daily summary for {}:", day(9).date());
    let summary = engine.daily_summary(day(9).date()).await?;
    println!("  Sales:     {} YER", summary.total_sales);
    println!("  Purchases: {} YER", summary.total_purchases);
    println!("  Net:       {} YER", summary.net);

    Ok(())
}
