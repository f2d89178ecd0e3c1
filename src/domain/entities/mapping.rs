//! Domain mapping entity: a domain routed to a site.

use chrono::{DateTime, Utc};

/// A domain attached to a site.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub id: i64,
    pub site_id: i64,
    pub domain: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(
        id: i64,
        site_id: i64,
        domain: String,
        active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            site_id,
            domain,
            active,
            created_at,
        }
    }
}

/// Input data for mapping a freshly purchased domain.
///
/// Purchased domains are mapped as active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub site_id: i64,
    pub domain: String,
}

/// Result of a guarded mapping insert.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    Inserted(Mapping),
    /// The site already has a mapping and multi-domain mode is off.
    SiteAlreadyMapped,
    /// A site or another mapping already answers on this domain.
    DomainClaimed,
}
