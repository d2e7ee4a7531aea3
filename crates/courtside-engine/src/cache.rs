use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

use courtside_core::errors::EligibilityError;
use courtside_core::result::EligibilityResult;
use courtside_core::spec::category::CategoryEligibilityData;
use courtside_core::traits::EligibilityClassifier;

use crate::eligibility::{check_inputs, DefaultClassifier};

const DEFAULT_CAPACITY: usize = 256;

/// Deterministic hash of a classification input.
///
/// Floats are hashed by bit pattern so that `None` and NaN ratings, or
/// `0.0` and `-0.0`, never share a key.
pub fn input_fingerprint(
    categories: &[CategoryEligibilityData],
    rating: Option<f64>,
    buffer_range: f64,
) -> String {
    let mut canonical = String::new();
    for c in categories {
        let name = c.category.as_str();
        canonical.push_str(&format!(
            "{}#{name}:{:016x}:{:016x}:{}:{},",
            name.len(),
            c.min_elo.to_bits(),
            c.max_elo.to_bits(),
            c.max_participants,
            c.current_participants
        ));
    }
    match rating {
        Some(r) => canonical.push_str(&format!("|rating:{:016x}", r.to_bits())),
        None => canonical.push_str("|rating:none"),
    }
    canonical.push_str(&format!("|buffer:{:016x}", buffer_range.to_bits()));
    format!("sha256:{:x}", Sha256::digest(canonical.as_bytes()))
}

/// Classifier that remembers results for identical inputs.
///
/// Results are identical to the wrapped classifier's. The memo is bounded:
/// once `capacity` distinct inputs are stored it is cleared and refilled.
/// Safe to share across threads by reference.
pub struct MemoizedClassifier<C = DefaultClassifier> {
    inner: C,
    capacity: usize,
    entries: Mutex<HashMap<String, EligibilityResult>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for MemoizedClassifier<DefaultClassifier> {
    fn default() -> Self {
        Self::new(DefaultClassifier)
    }
}

impl<C: EligibilityClassifier> MemoizedClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: C, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // The memo only holds finished results, so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, EligibilityResult>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: EligibilityClassifier> EligibilityClassifier for MemoizedClassifier<C> {
    fn classify(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> EligibilityResult {
        let key = input_fingerprint(categories, rating, buffer_range);
        if let Some(hit) = self.lock().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(fingerprint = %key, "memo hit");
            return hit;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        // Computed outside the lock; a concurrent miss on the same key
        // produces the same value.
        let result = self.inner.classify(categories, rating, buffer_range);

        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "memo full, clearing");
            entries.clear();
        }
        entries.insert(key, result.clone());
        result
    }

    fn classify_strict(
        &self,
        categories: &[CategoryEligibilityData],
        rating: Option<f64>,
        buffer_range: f64,
    ) -> Result<EligibilityResult, EligibilityError> {
        check_inputs(categories, rating, buffer_range)?;
        Ok(self.classify(categories, rating, buffer_range))
    }
}
