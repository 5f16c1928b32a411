use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A single logged expense.
///
/// Field names are persisted in camelCase so the stored slot keeps the
/// `id, amount, description, place, wallet, date, createdAt` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// UUID v4, assigned when the payment is added
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub place: String,
    pub wallet: Wallet,
    /// Day the payment happened (YYYY-MM-DD), chosen by the user
    pub date: NaiveDate,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

/// Virtual wallet a payment was made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wallet {
    #[serde(rename = "mercadopago")]
    MercadoPago,
    #[serde(rename = "cuenta-dni")]
    CuentaDni,
}

impl Wallet {
    pub const ALL: [Wallet; 2] = [Wallet::MercadoPago, Wallet::CuentaDni];

    /// Identifier used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Wallet::MercadoPago => "mercadopago",
            Wallet::CuentaDni => "cuenta-dni",
        }
    }

    /// Human-readable name for display
    pub fn label(&self) -> &'static str {
        match self {
            Wallet::MercadoPago => "Mercado Pago",
            Wallet::CuentaDni => "Cuenta DNI",
        }
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wallet {
    type Err = ParseWalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wallet::ALL
            .into_iter()
            .find(|wallet| wallet.as_str() == s)
            .ok_or_else(|| ParseWalletError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseWalletError(pub String);

impl fmt::Display for ParseWalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown wallet: {}", self.0)
    }
}

impl std::error::Error for ParseWalletError {}

/// Fields supplied by the caller when adding a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub amount: f64,
    pub description: String,
    pub place: String,
    pub wallet: Wallet,
    pub date: NaiveDate,
}

impl NewPayment {
    /// Turn the input into a stored record with a fresh id and creation time
    pub fn into_payment(self, created_at: DateTime<Utc>) -> Payment {
        Payment {
            id: uuid::Uuid::new_v4().to_string(),
            amount: self.amount,
            description: self.description,
            place: self.place,
            wallet: self.wallet,
            date: self.date,
            created_at,
        }
    }
}

/// Partial update; fields left as `None` keep their current value.
/// `id` and `created_at` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub place: Option<String>,
    pub wallet: Option<Wallet>,
    pub date: Option<NaiveDate>,
}

impl PaymentUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.place.is_none()
            && self.wallet.is_none()
            && self.date.is_none()
    }
}

/// Aggregates derived from the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_amount: f64,
    pub total_payments: usize,
    /// Every wallet is present, zero when it has no payments
    pub by_wallet: BTreeMap<Wallet, f64>,
    /// Month label (e.g. "January 2024") -> amount, unordered
    pub by_month: HashMap<String, f64>,
}

/// Amount spent in a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub amount: f64,
}

/// A wallet's part of the overall spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletShare {
    pub wallet: Wallet,
    pub label: String,
    pub amount: f64,
    /// 0.0..=100.0
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletFilter {
    #[default]
    All,
    Only(Wallet),
}

impl WalletFilter {
    pub fn matches(&self, wallet: Wallet) -> bool {
        match self {
            WalletFilter::All => true,
            WalletFilter::Only(selected) => *selected == wallet,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentListRequest {
    pub wallet: WalletFilter,
    /// Case-insensitive match against description and place
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    /// Matching payments, newest date first
    pub payments: Vec<Payment>,
    /// Number of stored payments before filtering
    pub total_count: usize,
}

/// Raw form values, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFormInput {
    pub amount: String,
    pub description: String,
    pub place: String,
    pub wallet: Option<String>,
    pub date: String,
}

/// Validation result for payment form input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    /// Cleaned payment, present only when the input is valid
    pub payment: Option<NewPayment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    EmptyAmount,
    InvalidAmount(String),
    AmountNotPositive,
    EmptyDescription,
    EmptyPlace,
    MissingWallet,
    InvalidWallet(String),
    InvalidDate(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyAmount => write!(f, "Amount is required"),
            ValidationError::InvalidAmount(raw) => write!(f, "Invalid amount: {}", raw),
            ValidationError::AmountNotPositive => write!(f, "Amount must be positive"),
            ValidationError::EmptyDescription => write!(f, "Description is required"),
            ValidationError::EmptyPlace => write!(f, "Place is required"),
            ValidationError::MissingWallet => write!(f, "Wallet is required"),
            ValidationError::InvalidWallet(raw) => write!(f, "Unknown wallet: {}", raw),
            ValidationError::InvalidDate(raw) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", raw),
        }
    }
}
