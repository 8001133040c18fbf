use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::grant::FundingOpportunity;

/// In-memory grant collection, kept in insertion order.
///
/// Cloning the handle shares the underlying collection. All mutation goes
/// through the single mutex; no lock is held across an await point. Contents
/// are volatile and reset on process restart.
#[derive(Clone, Default)]
pub struct GrantStore {
    inner: Arc<Mutex<Vec<FundingOpportunity>>>,
}

impl GrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given grants, assigning an id
    /// to any record that lacks one.
    pub fn with_seed(grants: Vec<FundingOpportunity>) -> Self {
        let seeded = grants
            .into_iter()
            .map(|mut g| {
                g.id.get_or_insert_with(Uuid::new_v4);
                g
            })
            .collect();
        Self {
            inner: Arc::new(Mutex::new(seeded)),
        }
    }

    /// Returns all grants in insertion order.
    pub fn list(&self) -> Vec<FundingOpportunity> {
        self.inner.lock().expect("grant store poisoned").clone()
    }

    /// Validates and inserts a grant, assigning its id. Returns the stored record.
    pub fn insert(&self, mut grant: FundingOpportunity) -> Result<FundingOpportunity, AppError> {
        validate(&grant)?;
        grant.id = Some(Uuid::new_v4());
        let mut grants = self.inner.lock().expect("grant store poisoned");
        grants.push(grant.clone());
        Ok(grant)
    }

    /// Removes and returns the grant at `position`.
    pub fn remove(&self, position: usize) -> Result<FundingOpportunity, AppError> {
        let mut grants = self.inner.lock().expect("grant store poisoned");
        if position >= grants.len() {
            return Err(AppError::NotFound(format!("Grant {position} not found")));
        }
        Ok(grants.remove(position))
    }

    /// Flips the `won` flag of the grant at `position` and returns the
    /// updated record.
    pub fn toggle_won(&self, position: usize) -> Result<FundingOpportunity, AppError> {
        let mut grants = self.inner.lock().expect("grant store poisoned");
        let grant = grants
            .get_mut(position)
            .ok_or_else(|| AppError::NotFound(format!("Grant {position} not found")))?;
        grant.won = !grant.won;
        Ok(grant.clone())
    }

    /// Removes every grant.
    pub fn clear(&self) {
        self.inner.lock().expect("grant store poisoned").clear();
    }
}

fn validate(grant: &FundingOpportunity) -> Result<(), AppError> {
    for (field, value) in [
        ("title", &grant.title),
        ("url", &grant.url),
        ("summary", &grant.summary),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    if !(0.0..=100.0).contains(&grant.company_affinity) {
        return Err(AppError::Validation(
            "company_affinity must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}
