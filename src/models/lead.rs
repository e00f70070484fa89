use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::{
    HubId, LeadEmail, LeadId, LeadName, LeadSource, OwnerId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub status: &'a str,
    pub source: Option<&'a str>,
    pub owner_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::new(lead.id)?,
            hub_id: HubId::new(lead.hub_id)?,
            name: LeadName::new(lead.name)?,
            // Legacy rows may hold malformed addresses; show them as missing.
            email: lead.email.and_then(|email| LeadEmail::new(email).ok()),
            phone: lead.phone,
            company: lead.company,
            status: lead.status.parse()?,
            source: lead.source.and_then(|source| LeadSource::new(source).ok()),
            owner_id: lead.owner_id.map(OwnerId::new).transpose()?,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            hub_id: lead.hub_id.get(),
            name: lead.name.as_str(),
            email: lead.email.as_ref().map(LeadEmail::as_str),
            phone: lead.phone.as_deref(),
            company: lead.company.as_deref(),
            status: lead.status.as_str(),
            source: lead.source.as_ref().map(LeadSource::as_str),
            owner_id: lead.owner_id.map(OwnerId::get),
            created_at: lead.created_at,
            updated_at: lead.created_at,
        }
    }
}
