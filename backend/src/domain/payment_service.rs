//! Payment service: create, update, delete and list payments.
//!
//! Every mutation loads the whole collection, changes it and writes it back.
//! The load-mutate-save sequence runs under a shared write guard, so
//! overlapping calls through the same service (or its clones) cannot
//! overwrite each other's changes.

use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use shared::{NewPayment, Payment, PaymentListRequest, PaymentListResponse, PaymentUpdate};
use tracing::{debug, info, warn};

use crate::storage::PaymentRepository;

#[derive(Clone)]
pub struct PaymentService {
    repository: PaymentRepository,
    write_guard: Arc<Mutex<()>>,
}

impl PaymentService {
    pub fn new(repository: PaymentRepository) -> Self {
        Self {
            repository,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn repository(&self) -> &PaymentRepository {
        &self.repository
    }

    // The guard protects no data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new payment with a fresh id and creation time. No validation
    /// happens here; see [`PaymentValidator`](super::PaymentValidator).
    pub fn add_payment(&self, new_payment: NewPayment) -> Payment {
        let _guard = self.lock();

        let payment = new_payment.into_payment(Utc::now());
        let mut payments = self.repository.load();
        payments.push(payment.clone());
        self.repository.save(&payments);

        info!(
            "Added payment {} ({:.2} via {}) on {}",
            payment.id, payment.amount, payment.wallet, payment.date
        );
        payment
    }

    /// Merge `update` over the payment with `id`. Returns `None`, without
    /// writing anything, if there is no such payment.
    pub fn update_payment(&self, id: &str, update: PaymentUpdate) -> Option<Payment> {
        let _guard = self.lock();

        let mut payments = self.repository.load();
        let Some(payment) = payments.iter_mut().find(|p| p.id == id) else {
            warn!("Cannot update payment {}: not found", id);
            return None;
        };

        if update.is_empty() {
            debug!("Empty update for payment {}, nothing to write", id);
            return Some(payment.clone());
        }

        apply_update(payment, update);
        let updated = payment.clone();
        self.repository.save(&payments);

        info!("Updated payment {}", id);
        Some(updated)
    }

    /// Remove the payment with `id`. Returns false, without writing
    /// anything, if there is no such payment.
    pub fn delete_payment(&self, id: &str) -> bool {
        let _guard = self.lock();

        let payments = self.repository.load();
        let original_count = payments.len();
        let remaining: Vec<Payment> = payments.into_iter().filter(|p| p.id != id).collect();

        if remaining.len() == original_count {
            warn!("Cannot delete payment {}: not found", id);
            return false;
        }

        self.repository.save(&remaining);
        info!("Deleted payment {}", id);
        true
    }

    /// All stored payments, in storage order
    pub fn get_payments(&self) -> Vec<Payment> {
        self.repository.load()
    }

    pub fn get_payment(&self, id: &str) -> Option<Payment> {
        self.repository.load().into_iter().find(|p| p.id == id)
    }

    /// Payments matching the wallet filter and search term, newest date first
    pub fn list_payments(&self, request: &PaymentListRequest) -> PaymentListResponse {
        let payments = self.repository.load();
        let total_count = payments.len();

        let search = request
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        let mut matching: Vec<Payment> = payments
            .into_iter()
            .filter(|p| request.wallet.matches(p.wallet))
            .filter(|p| match &search {
                Some(term) => matches_search(p, term),
                None => true,
            })
            .collect();

        matching.sort_by_key(|p| (Reverse(p.date), Reverse(p.created_at)));

        debug!(
            "Listing {} of {} payments (wallet: {:?}, search: {:?})",
            matching.len(),
            total_count,
            request.wallet,
            search
        );

        PaymentListResponse {
            payments: matching,
            total_count,
        }
    }
}

fn apply_update(payment: &mut Payment, update: PaymentUpdate) {
    if let Some(amount) = update.amount {
        payment.amount = amount;
    }
    if let Some(description) = update.description {
        payment.description = description;
    }
    if let Some(place) = update.place {
        payment.place = place;
    }
    if let Some(wallet) = update.wallet {
        payment.wallet = wallet;
    }
    if let Some(date) = update.date {
        payment.date = date;
    }
}

/// `term` must already be lowercase
fn matches_search(payment: &Payment, term: &str) -> bool {
    payment.description.to_lowercase().contains(term) || payment.place.to_lowercase().contains(term)
}
