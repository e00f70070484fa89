use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    HubId, LeadEmail, LeadId, LeadName, LeadSource, OwnerId, TypeConstraintError,
};

/// Pipeline stage of a lead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    /// Every status in pipeline order.
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown lead status `{s}`")))
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub hub_id: HubId,
    pub name: LeadName,
    pub email: Option<LeadEmail>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: Option<LeadSource>,
    pub owner_id: Option<OwnerId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Lead payload prior to persistence.
#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub hub_id: HubId,
    pub name: LeadName,
    pub email: Option<LeadEmail>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: Option<LeadSource>,
    pub owner_id: Option<OwnerId>,
    pub created_at: NaiveDateTime,
}

impl NewLead {
    /// Starts a `new`, unassigned lead created now.
    #[must_use]
    pub fn new(hub_id: HubId, name: LeadName) -> Self {
        Self {
            hub_id,
            name,
            email: None,
            phone: None,
            company: None,
            status: LeadStatus::New,
            source: None,
            owner_id: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn email(mut self, email: LeadEmail) -> Self {
        self.email = Some(email);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into().trim().to_string()).filter(|s| !s.is_empty());
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into().trim().to_string()).filter(|s| !s.is_empty());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn source(mut self, source: LeadSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}
