//! Aggregated spending statistics.
//!
//! Nothing is cached: every call reloads the collection and recomputes.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use shared::{MonthlyTotal, Payment, PaymentStats, Wallet, WalletShare};
use tracing::debug;

use super::date_utils::MonthLabelLocale;
use crate::storage::PaymentRepository;

#[derive(Clone)]
pub struct StatsService {
    repository: PaymentRepository,
    locale: MonthLabelLocale,
}

impl StatsService {
    pub fn new(repository: PaymentRepository, locale: MonthLabelLocale) -> Self {
        Self { repository, locale }
    }

    pub fn locale(&self) -> MonthLabelLocale {
        self.locale
    }

    pub fn get_payment_stats(&self) -> PaymentStats {
        let payments = self.repository.load();
        let stats = compute_stats(&payments, self.locale);
        debug!(
            "Computed stats over {} payments: total {:.2}",
            stats.total_payments, stats.total_amount
        );
        stats
    }

    /// Per-month totals in chronological order, keeping only the most
    /// recent `limit` months that have payments
    pub fn recent_monthly_totals(&self, limit: usize) -> Vec<MonthlyTotal> {
        monthly_totals(&self.repository.load(), self.locale, limit)
    }

    /// Share of total spending per wallet, skipping wallets with nothing spent
    pub fn wallet_breakdown(&self) -> Vec<WalletShare> {
        wallet_breakdown(&compute_stats(&self.repository.load(), self.locale))
    }
}

pub fn compute_stats(payments: &[Payment], locale: MonthLabelLocale) -> PaymentStats {
    let mut by_wallet: BTreeMap<Wallet, f64> = Wallet::ALL.iter().map(|w| (*w, 0.0)).collect();
    let mut by_month: HashMap<String, f64> = HashMap::new();
    let mut total_amount = 0.0;

    for payment in payments {
        total_amount += payment.amount;
        *by_wallet.entry(payment.wallet).or_insert(0.0) += payment.amount;
        *by_month.entry(locale.label_for_date(payment.date)).or_insert(0.0) += payment.amount;
    }

    PaymentStats {
        total_amount,
        total_payments: payments.len(),
        by_wallet,
        by_month,
    }
}

pub fn monthly_totals(payments: &[Payment], locale: MonthLabelLocale, limit: usize) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for payment in payments {
        *by_month
            .entry((payment.date.year(), payment.date.month()))
            .or_insert(0.0) += payment.amount;
    }

    let skip = by_month.len().saturating_sub(limit);
    by_month
        .into_iter()
        .skip(skip)
        .map(|((year, month), amount)| MonthlyTotal {
            year,
            month,
            label: locale.month_label(year, month),
            amount,
        })
        .collect()
}

pub fn wallet_breakdown(stats: &PaymentStats) -> Vec<WalletShare> {
    Wallet::ALL
        .iter()
        .filter_map(|wallet| {
            let amount = stats.by_wallet.get(wallet).copied().unwrap_or(0.0);
            if amount <= 0.0 {
                return None;
            }
            let percentage = if stats.total_amount > 0.0 {
                amount / stats.total_amount * 100.0
            } else {
                0.0
            };
            Some(WalletShare {
                wallet: *wallet,
                label: wallet.label().to_string(),
                amount,
                percentage,
            })
        })
        .collect()
}
