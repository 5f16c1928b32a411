//! Validation of raw payment form input.
//!
//! The store accepts whatever it is given; this is the check a UI runs
//! before calling [`PaymentService::add_payment`](super::PaymentService::add_payment).

use chrono::NaiveDate;
use shared::{NewPayment, PaymentFormInput, ValidationError, ValidationResult, Wallet};

pub struct PaymentValidator;

impl PaymentValidator {
    /// Collect every problem with `input`. When there are none, the result
    /// carries the cleaned payment with surrounding whitespace trimmed.
    pub fn validate(input: &PaymentFormInput) -> ValidationResult {
        let mut errors = Vec::new();

        let amount = Self::validate_amount(&input.amount).map_err(|e| errors.push(e)).ok();

        let description = input.description.trim();
        if description.is_empty() {
            errors.push(ValidationError::EmptyDescription);
        }

        let place = input.place.trim();
        if place.is_empty() {
            errors.push(ValidationError::EmptyPlace);
        }

        let wallet = Self::validate_wallet(input.wallet.as_deref()).map_err(|e| errors.push(e)).ok();
        let date = Self::validate_date(&input.date).map_err(|e| errors.push(e)).ok();

        let payment = match (amount, wallet, date) {
            (Some(amount), Some(wallet), Some(date)) if errors.is_empty() => Some(NewPayment {
                amount,
                description: description.to_string(),
                place: place.to_string(),
                wallet,
                date,
            }),
            _ => None,
        };

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            payment,
        }
    }

    fn validate_amount(raw: &str) -> Result<f64, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAmount);
        }

        let amount = trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidAmount(raw.to_string()))?;

        if amount <= 0.0 {
            return Err(ValidationError::AmountNotPositive);
        }
        Ok(amount)
    }

    fn validate_wallet(raw: Option<&str>) -> Result<Wallet, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Err(ValidationError::MissingWallet),
            Some(value) => value
                .parse::<Wallet>()
                .map_err(|_| ValidationError::InvalidWallet(value.to_string())),
        }
    }

    fn validate_date(raw: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
    }
}
