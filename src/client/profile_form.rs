use std::time::{Duration, Instant};

use tracing::warn;

use super::ProfileTransport;
use crate::profiles::dto::{CompanyType, EmploymentType, Profile};

pub const SAVED_CONFIRMATION: Duration = Duration::from_secs(2);

/// What the save button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
}

impl SaveState {
    pub fn label(self) -> &'static str {
        match self {
            SaveState::Idle => "Opslaan",
            SaveState::Saving => "Opslaan...",
            SaveState::Saved => "\u{2713} Opgeslagen",
        }
    }
}

/// Local copy of the profile, mirrored to the server on save.
#[derive(Debug)]
pub struct ProfileForm {
    profile: Profile,
    saving: bool,
    saved_at: Option<Instant>,
}

impl ProfileForm {
    pub fn new(initial: Option<Profile>) -> Self {
        Self {
            profile: initial.unwrap_or_default(),
            saving: false,
            saved_at: None,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_employment_type(&mut self, value: Option<EmploymentType>) {
        self.profile.employment_type = value;
    }

    /// Takes the raw text of the income field. The leading whole number is
    /// kept (`"52000.50"` is 52000); text without one clears the field.
    pub fn set_yearly_income(&mut self, raw: &str) {
        self.profile.yearly_income = leading_integer(raw);
    }

    pub fn set_has_partner(&mut self, value: bool) {
        self.profile.has_partner = value;
    }

    pub fn set_has_mortgage(&mut self, value: bool) {
        self.profile.has_mortgage = value;
    }

    pub fn set_has_company(&mut self, value: bool) {
        self.profile.has_company = value;
    }

    pub fn set_company_type(&mut self, value: Option<CompanyType>) {
        self.profile.company_type = value;
    }

    /// The company type field is only shown to users who have a company.
    pub fn shows_company_type(&self) -> bool {
        self.profile.has_company
    }

    pub fn save_state(&self, now: Instant) -> SaveState {
        if self.saving {
            SaveState::Saving
        } else if self
            .saved_at
            .is_some_and(|at| now.saturating_duration_since(at) < SAVED_CONFIRMATION)
        {
            SaveState::Saved
        } else {
            SaveState::Idle
        }
    }

    /// Sends the whole local profile. Failures are logged, never surfaced;
    /// the confirmation is shown either way.
    pub async fn save<T: ProfileTransport + ?Sized>(&mut self, transport: &T) {
        self.saving = true;
        if let Err(e) = transport.save_profile(&self.profile).await {
            warn!(error = %e, "profile save failed");
        }
        self.saving = false;
        self.saved_at = Some(Instant::now());
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let digits_from = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_from);
    if end == digits_from {
        return None;
    }
    s[..end].parse().ok()
}
