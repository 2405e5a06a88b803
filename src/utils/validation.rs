//! Validation utilities

use crate::currency::ExchangeRateSnapshot;
use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> EngineResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(EngineError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a quantity is strictly positive
pub fn validate_quantity(quantity: i64) -> EngineResult<()> {
    if quantity <= 0 {
        Err(EngineError::Validation(
            "Quantity must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an entity name is usable
pub fn validate_entity_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::Validation(
            "Entity name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(EngineError::Validation(
            "Entity name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an item type name is usable
pub fn validate_item_type(item_type: &str) -> EngineResult<()> {
    if item_type.trim().is_empty() {
        return Err(EngineError::Validation(
            "Item type cannot be empty".to_string(),
        ));
    }

    if item_type.len() > 50 {
        return Err(EngineError::Validation(
            "Item type cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced record validator with consistency checks on derived totals
pub struct EnhancedRecordValidator;

impl RecordValidator for EnhancedRecordValidator {
    fn validate_sale(&self, sale: &Sale) -> EngineResult<()> {
        DefaultRecordValidator.validate_sale(sale)?;
        validate_quantity(sale.quantity)?;
        validate_entity_name(&sale.customer_name)?;
        validate_item_type(&sale.item_type)?;

        let expected = &sale.unit_price * BigDecimal::from(sale.quantity);
        if sale.total != expected {
            return Err(EngineError::Validation(format!(
                "Sale total {} does not match quantity x unit price {}",
                sale.total, expected
            )));
        }

        Ok(())
    }

    fn validate_purchase(&self, purchase: &Purchase) -> EngineResult<()> {
        DefaultRecordValidator.validate_purchase(purchase)?;
        validate_quantity(purchase.quantity)?;
        validate_entity_name(&purchase.supplier_name)?;
        validate_item_type(&purchase.item_type)?;

        let expected = &purchase.cost_price * BigDecimal::from(purchase.quantity);
        if purchase.total_cost != expected {
            return Err(EngineError::Validation(format!(
                "Purchase total {} does not match quantity x cost price {}",
                purchase.total_cost, expected
            )));
        }

        Ok(())
    }

    fn validate_voucher(&self, voucher: &Voucher) -> EngineResult<()> {
        DefaultRecordValidator.validate_voucher(voucher)?;
        validate_positive_amount(&voucher.amount)?;
        validate_entity_name(&voucher.entity_name)
    }

    fn validate_expense(&self, expense: &Expense) -> EngineResult<()> {
        DefaultRecordValidator.validate_expense(expense)?;
        if expense.description.len() > 500 {
            return Err(EngineError::Validation(
                "Expense description cannot exceed 500 characters".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_rate_snapshot(&self, snapshot: &ExchangeRateSnapshot) -> EngineResult<()> {
        snapshot.validate()
    }
}
