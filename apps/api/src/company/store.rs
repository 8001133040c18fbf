use std::sync::{Arc, Mutex};

use crate::errors::AppError;
use crate::models::company::CompanyProfile;

/// Single-slot store for the company profile. The profile is replaced
/// wholesale; there is no partial merge.
#[derive(Clone, Default)]
pub struct ProfileStore {
    inner: Arc<Mutex<Option<CompanyProfile>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<CompanyProfile> {
        self.inner.lock().expect("profile store poisoned").clone()
    }

    /// Validates and replaces the stored profile.
    pub fn replace(&self, profile: CompanyProfile) -> Result<CompanyProfile, AppError> {
        for (field, value) in [
            ("name", &profile.name),
            ("url", &profile.url),
            ("scope", &profile.scope),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        let mut slot = self.inner.lock().expect("profile store poisoned");
        *slot = Some(profile.clone());
        Ok(profile)
    }
}
