//! Validation helpers shared by registration and listing forms

use rust_decimal::Decimal;

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength (minimum length only)
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() >= 8 {
        Ok(())
    } else {
        Err("Password must be at least 8 characters")
    }
}

/// Validate a listing price (donations are zero, so non-negative)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price >= Decimal::ZERO {
        Ok(())
    } else {
        Err("Price cannot be negative")
    }
}

/// Validate a requested quantity against known stock
pub fn validate_quantity(quantity: u32, stock: Option<u32>) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must be at least 1");
    }
    if let Some(stock) = stock {
        if quantity > stock {
            return Err("Quantity exceeds available stock");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_checks() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("nope").is_err());
    }

    #[test]
    fn quantity_respects_stock() {
        assert!(validate_quantity(3, Some(5)).is_ok());
        assert!(validate_quantity(6, Some(5)).is_err());
        assert!(validate_quantity(0, None).is_err());
        assert!(validate_quantity(100, None).is_ok());
    }
}
