//! Common types used across the search module
//!
//! This module contains the module catalogue, caller permissions and the
//! fixed-shape result returned by every search path.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use super::errors::SearchError;
use super::records::{
    Client, Lead, Payment, Preferences, Profile, Property, Reservation, Review, StaffMember,
};

/// One searchable entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Properties,
    Leads,
    Reservations,
    Payments,
    Reviews,
    Team,
    Clients,
    Profile,
    Preferences,
}

impl Module {
    pub const ALL: [Module; 9] = [
        Module::Properties,
        Module::Leads,
        Module::Reservations,
        Module::Payments,
        Module::Reviews,
        Module::Team,
        Module::Clients,
        Module::Profile,
        Module::Preferences,
    ];

    /// Stable wire name, also the `SearchResponse` field name
    pub fn as_str(self) -> &'static str {
        match self {
            Module::Properties => "properties",
            Module::Leads => "leads",
            Module::Reservations => "reservations",
            Module::Payments => "payments",
            Module::Reviews => "reviews",
            Module::Team => "team",
            Module::Clients => "clients",
            Module::Profile => "profile",
            Module::Preferences => "preferences",
        }
    }

    /// `profile` and `preferences` resolve to one record, everything else to a list
    pub fn is_singular(self) -> bool {
        matches!(self, Module::Profile | Module::Preferences)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties" | "resources" => Ok(Module::Properties),
            "leads" => Ok(Module::Leads),
            "reservations" => Ok(Module::Reservations),
            "payments" => Ok(Module::Payments),
            "reviews" => Ok(Module::Reviews),
            "team" | "staff" => Ok(Module::Team),
            "clients" => Ok(Module::Clients),
            "profile" => Ok(Module::Profile),
            "preferences" => Ok(Module::Preferences),
            _ => Err(SearchError::UnknownModule(s.to_string())),
        }
    }
}

/// Per-module read permissions resolved by the caller
///
/// The engine never derives permissions; it only honours them. A module that
/// is not granted is never fetched, scored or returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: BTreeSet<Module>,
}

impl PermissionSet {
    /// No module granted
    pub fn none() -> Self {
        Self::default()
    }

    /// Every module granted
    pub fn all() -> Self {
        Module::ALL.into_iter().collect()
    }

    /// Build from a name → flag map as produced by a role resolver
    ///
    /// # Errors
    ///
    /// Returns `SearchError::UnknownModule` when a key does not name a module.
    pub fn from_flags<K: AsRef<str>>(flags: &HashMap<K, bool>) -> Result<Self, SearchError> {
        let mut granted = BTreeSet::new();
        for (name, allowed) in flags {
            let module: Module = name.as_ref().parse()?;
            if *allowed {
                granted.insert(module);
            }
        }
        Ok(Self { granted })
    }

    #[must_use]
    pub fn grant(mut self, module: Module) -> Self {
        self.granted.insert(module);
        self
    }

    #[must_use]
    pub fn deny(mut self, module: Module) -> Self {
        self.granted.remove(&module);
        self
    }

    #[inline]
    pub fn allows(&self, module: Module) -> bool {
        self.granted.contains(&module)
    }

    pub fn granted(&self) -> impl Iterator<Item = Module> + '_ {
        self.granted.iter().copied()
    }

    /// Deterministic cache-key fragment: sorted granted module names
    pub fn signature(&self) -> String {
        let mut names: Vec<&str> = self.granted.iter().map(|m| m.as_str()).collect();
        names.sort_unstable();
        names.join(",")
    }
}

impl FromIterator<Module> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

/// Merged result of one search, identical in shape for every search path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub properties: Vec<Property>,
    pub leads: Vec<Lead>,
    pub reservations: Vec<Reservation>,
    pub payments: Vec<Payment>,
    pub reviews: Vec<Review>,
    pub team: Vec<StaffMember>,
    pub clients: Vec<Client>,
    pub profile: Option<Profile>,
    pub preferences: Option<Preferences>,
    /// Reserved for the remote path; local search never fills it
    pub activity_logs: Vec<serde_json::Value>,
    /// Epoch milliseconds at which the result was assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<i64>,
}

impl SearchResponse {
    /// The canonical empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no module carries a match (timestamp ignored)
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.leads.is_empty()
            && self.reservations.is_empty()
            && self.payments.is_empty()
            && self.reviews.is_empty()
            && self.team.is_empty()
            && self.clients.is_empty()
            && self.profile.is_none()
            && self.preferences.is_none()
            && self.activity_logs.is_empty()
    }

    /// Number of entries a module contributes
    pub fn count(&self, module: Module) -> usize {
        match module {
            Module::Properties => self.properties.len(),
            Module::Leads => self.leads.len(),
            Module::Reservations => self.reservations.len(),
            Module::Payments => self.payments.len(),
            Module::Reviews => self.reviews.len(),
            Module::Team => self.team.len(),
            Module::Clients => self.clients.len(),
            Module::Profile => usize::from(self.profile.is_some()),
            Module::Preferences => usize::from(self.preferences.is_some()),
        }
    }

    pub fn total_count(&self) -> usize {
        Module::ALL.iter().map(|m| self.count(*m)).sum()
    }

    /// Empty out a module's entry
    pub fn clear(&mut self, module: Module) {
        match module {
            Module::Properties => self.properties.clear(),
            Module::Leads => self.leads.clear(),
            Module::Reservations => self.reservations.clear(),
            Module::Payments => self.payments.clear(),
            Module::Reviews => self.reviews.clear(),
            Module::Team => self.team.clear(),
            Module::Clients => self.clients.clear(),
            Module::Profile => self.profile = None,
            Module::Preferences => self.preferences = None,
        }
    }

    /// Bound every list to `limit` entries
    pub fn truncate(&mut self, limit: usize) {
        self.properties.truncate(limit);
        self.leads.truncate(limit);
        self.reservations.truncate(limit);
        self.payments.truncate(limit);
        self.reviews.truncate(limit);
        self.team.truncate(limit);
        self.clients.truncate(limit);
    }

    /// Clear every module the caller may not see
    pub fn retain_permitted(&mut self, permissions: &PermissionSet) {
        for module in Module::ALL {
            if !permissions.allows(module) {
                self.clear(module);
            }
        }
    }
}
