// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::{AssetNum, NewProperty, Property, PropertyDetails, PropertyField};

/// String-valued input buffer with one entry per property field.
///
/// Used both for the always-live "new property" form and for the edit
/// buffer of the row being edited. Values are kept exactly as typed; they are
/// only normalized when converted into a wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyDraft {
    values: BTreeMap<PropertyField, String>,
}

impl PropertyDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_property(property: &Property) -> Self {
        let values = PropertyField::ALL
            .into_iter()
            .map(|field| (field, property.details.display(field)))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: PropertyField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: PropertyField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn push_char(&mut self, field: PropertyField, ch: char) {
        self.values.entry(field).or_default().push(ch);
    }

    pub fn pop_char(&mut self, field: PropertyField) {
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }

    /// Normalizes the buffer: blank entries become `None`, numeric entries
    /// are parsed as floating point.
    pub fn to_details(&self) -> Result<PropertyDetails> {
        let mut details = PropertyDetails::default();
        for field in PropertyField::ALL {
            let raw = self.get(field).trim();
            if field.is_numeric() {
                let value = if raw.is_empty() {
                    None
                } else {
                    Some(parse_number(field, raw)?)
                };
                details.set_number(field, value);
            } else {
                let value = (!raw.is_empty()).then(|| raw.to_owned());
                details.set_text(field, value);
            }
        }
        Ok(details)
    }

    pub fn to_property(&self, asset_num: AssetNum) -> Result<Property> {
        Ok(Property {
            asset_num,
            details: self.to_details()?,
        })
    }

    /// Builds a create payload. A new record needs a legal description.
    pub fn to_new_property(&self, asset_num: Option<AssetNum>) -> Result<NewProperty> {
        let details = self.to_details()?;
        if details.legal_description.is_none() {
            bail!("legal description is required -- fill it in before adding");
        }
        Ok(NewProperty { asset_num, details })
    }
}

fn parse_number(field: PropertyField, raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|ch| *ch != ',' && *ch != '$').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => bail!(
            "{} must be a number, got {raw:?} -- fix the value and retry",
            field.label().to_ascii_lowercase()
        ),
    }
}
