// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub owner_id: OwnerId,
    pub owner_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyField {
    LegalDescription,
    Location,
    AccountNumber,
    CurrentAppraisal,
    SquareFootage,
    Acres,
    TotalAcreagePercent,
    OwnedBy,
    Exemption,
    County,
    NameOnAccount,
    MailingAddress,
    ManagementNotes,
    Status,
}

impl PropertyField {
    pub const ALL: [Self; 14] = [
        Self::LegalDescription,
        Self::Location,
        Self::AccountNumber,
        Self::CurrentAppraisal,
        Self::SquareFootage,
        Self::Acres,
        Self::TotalAcreagePercent,
        Self::OwnedBy,
        Self::Exemption,
        Self::County,
        Self::NameOnAccount,
        Self::MailingAddress,
        Self::ManagementNotes,
        Self::Status,
    ];

    /// Fields shown in the compact table row, after the asset number.
    pub const COMPACT: [Self; 5] = [
        Self::LegalDescription,
        Self::Location,
        Self::OwnedBy,
        Self::ManagementNotes,
        Self::Status,
    ];

    /// Fields shown only in the expanded detail panel.
    pub const DETAIL: [Self; 9] = [
        Self::AccountNumber,
        Self::CurrentAppraisal,
        Self::SquareFootage,
        Self::Acres,
        Self::TotalAcreagePercent,
        Self::Exemption,
        Self::County,
        Self::NameOnAccount,
        Self::MailingAddress,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::LegalDescription => "legal_description",
            Self::Location => "location",
            Self::AccountNumber => "account_number",
            Self::CurrentAppraisal => "current_appraisal",
            Self::SquareFootage => "square_footage",
            Self::Acres => "acres",
            Self::TotalAcreagePercent => "total_acreage_percent",
            Self::OwnedBy => "owned_by",
            Self::Exemption => "exemption",
            Self::County => "county",
            Self::NameOnAccount => "name_on_account",
            Self::MailingAddress => "mailing_address",
            Self::ManagementNotes => "management_notes",
            Self::Status => "status",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LegalDescription => "Legal Description",
            Self::Location => "Location",
            Self::AccountNumber => "Account #",
            Self::CurrentAppraisal => "Appraisal",
            Self::SquareFootage => "Square Footage",
            Self::Acres => "Acres",
            Self::TotalAcreagePercent => "Total Acreage %",
            Self::OwnedBy => "Owned By",
            Self::Exemption => "Exemption",
            Self::County => "County",
            Self::NameOnAccount => "Name on Account",
            Self::MailingAddress => "Mailing Address",
            Self::ManagementNotes => "Management Notes",
            Self::Status => "Status",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::CurrentAppraisal | Self::SquareFootage | Self::Acres | Self::TotalAcreagePercent
        )
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == value)
    }
}

/// Every property column except the key. All of them are nullable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDetails {
    pub legal_description: Option<String>,
    pub location: Option<String>,
    pub account_number: Option<String>,
    pub current_appraisal: Option<f64>,
    pub square_footage: Option<f64>,
    pub acres: Option<f64>,
    pub total_acreage_percent: Option<f64>,
    pub owned_by: Option<String>,
    pub exemption: Option<String>,
    pub county: Option<String>,
    pub name_on_account: Option<String>,
    pub mailing_address: Option<String>,
    pub management_notes: Option<String>,
    pub status: Option<String>,
}

impl PropertyDetails {
    pub fn text(&self, field: PropertyField) -> Option<&str> {
        let value = match field {
            PropertyField::LegalDescription => &self.legal_description,
            PropertyField::Location => &self.location,
            PropertyField::AccountNumber => &self.account_number,
            PropertyField::OwnedBy => &self.owned_by,
            PropertyField::Exemption => &self.exemption,
            PropertyField::County => &self.county,
            PropertyField::NameOnAccount => &self.name_on_account,
            PropertyField::MailingAddress => &self.mailing_address,
            PropertyField::ManagementNotes => &self.management_notes,
            PropertyField::Status => &self.status,
            PropertyField::CurrentAppraisal
            | PropertyField::SquareFootage
            | PropertyField::Acres
            | PropertyField::TotalAcreagePercent => return None,
        };
        value.as_deref()
    }

    pub fn number(&self, field: PropertyField) -> Option<f64> {
        match field {
            PropertyField::CurrentAppraisal => self.current_appraisal,
            PropertyField::SquareFootage => self.square_footage,
            PropertyField::Acres => self.acres,
            PropertyField::TotalAcreagePercent => self.total_acreage_percent,
            _ => None,
        }
    }

    /// Cell text for a field; nulls render empty.
    pub fn display(&self, field: PropertyField) -> String {
        if field.is_numeric() {
            return self.number(field).map(format_number).unwrap_or_default();
        }
        self.text(field).unwrap_or_default().to_owned()
    }

    pub(crate) fn set_text(&mut self, field: PropertyField, value: Option<String>) {
        let slot = match field {
            PropertyField::LegalDescription => &mut self.legal_description,
            PropertyField::Location => &mut self.location,
            PropertyField::AccountNumber => &mut self.account_number,
            PropertyField::OwnedBy => &mut self.owned_by,
            PropertyField::Exemption => &mut self.exemption,
            PropertyField::County => &mut self.county,
            PropertyField::NameOnAccount => &mut self.name_on_account,
            PropertyField::MailingAddress => &mut self.mailing_address,
            PropertyField::ManagementNotes => &mut self.management_notes,
            PropertyField::Status => &mut self.status,
            PropertyField::CurrentAppraisal
            | PropertyField::SquareFootage
            | PropertyField::Acres
            | PropertyField::TotalAcreagePercent => return,
        };
        *slot = value;
    }

    pub(crate) fn set_number(&mut self, field: PropertyField, value: Option<f64>) {
        match field {
            PropertyField::CurrentAppraisal => self.current_appraisal = value,
            PropertyField::SquareFootage => self.square_footage = value,
            PropertyField::Acres => self.acres = value,
            PropertyField::TotalAcreagePercent => self.total_acreage_percent = value,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(alias = "asset_#")]
    pub asset_num: AssetNum,
    #[serde(flatten)]
    pub details: PropertyDetails,
}

/// Create payload. `asset_num` is omitted when the server allocates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_num: Option<AssetNum>,
    #[serde(flatten)]
    pub details: PropertyDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Stored. The server may or may not echo the record back.
    Created(Option<Property>),
    /// The server answered with an `{error}` body.
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetNumbering {
    #[default]
    Server,
    Client,
}

impl AssetNumbering {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "server" => Some(Self::Server),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

/// Provisional asset number for client-side numbering: one past the largest
/// existing number, or 1 for an empty list.
pub fn next_asset_num(properties: &[Property]) -> AssetNum {
    let max = properties
        .iter()
        .map(|property| property.asset_num.get())
        .max()
        .unwrap_or(0);
    AssetNum::new(max + 1)
}

pub fn format_number(value: f64) -> String {
    // -0.0 compares equal to 0.0 but would print as "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
