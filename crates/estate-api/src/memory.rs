// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use estate_app::{
    AssetNum, CreateOutcome, NewProperty, Owner, OwnerId, Property, next_asset_num,
};
use log::info;

use crate::Backend;

/// In-process stand-in for the REST backend, used by `--demo` and tests.
///
/// Ownership is derived from `owned_by` text: an owner is associated with
/// every property whose `owned_by` mentions the owner's name.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    owners: Vec<Owner>,
    properties: Vec<Property>,
    credentials: Option<(String, String)>,
}

impl MemoryBackend {
    pub fn new(owners: Vec<Owner>, properties: Vec<Property>) -> Self {
        Self {
            owners,
            properties,
            credentials: None,
        }
    }

    /// Requires `username`/`password` on login. Without credentials every
    /// login succeeds.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_owned(), password.to_owned()));
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn owns(owner: &Owner, property: &Property) -> bool {
        property
            .details
            .owned_by
            .as_deref()
            .is_some_and(|owned_by| owned_by.contains(owner.owner_name.as_str()))
    }

    fn position(&self, asset_num: AssetNum) -> Option<usize> {
        self.properties
            .iter()
            .position(|property| property.asset_num == asset_num)
    }
}

impl Backend for MemoryBackend {
    fn list_owners(&self) -> Result<Vec<Owner>> {
        Ok(self.owners.clone())
    }

    fn list_properties(&self, owner: Option<OwnerId>) -> Result<Vec<Property>> {
        let Some(owner_id) = owner else {
            return Ok(self.properties.clone());
        };
        let Some(owner) = self.owners.iter().find(|owner| owner.owner_id == owner_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .properties
            .iter()
            .filter(|property| Self::owns(owner, property))
            .cloned()
            .collect())
    }

    fn create_property(&mut self, payload: &NewProperty) -> Result<CreateOutcome> {
        if payload.details.legal_description.is_none() {
            return Ok(CreateOutcome::Rejected(
                "legal_description is required".to_owned(),
            ));
        }

        let asset_num = match payload.asset_num {
            Some(asset_num) if asset_num.get() <= 0 => {
                return Ok(CreateOutcome::Rejected(format!(
                    "asset #{asset_num} is not a valid asset number"
                )));
            }
            Some(asset_num) if self.position(asset_num).is_some() => {
                return Ok(CreateOutcome::Rejected(format!(
                    "asset #{asset_num} already exists"
                )));
            }
            Some(asset_num) => asset_num,
            None => next_asset_num(&self.properties),
        };

        let property = Property {
            asset_num,
            details: payload.details.clone(),
        };
        self.properties.push(property.clone());
        info!("memory backend stored property #{asset_num}");
        Ok(CreateOutcome::Created(Some(property)))
    }

    fn update_property(&mut self, asset_num: AssetNum, record: &Property) -> Result<()> {
        let Some(index) = self.position(asset_num) else {
            bail!("server error (404): property #{asset_num} not found");
        };
        self.properties[index] = Property {
            asset_num,
            details: record.details.clone(),
        };
        Ok(())
    }

    fn delete_property(&mut self, asset_num: AssetNum) -> Result<()> {
        let Some(index) = self.position(asset_num) else {
            bail!("server error (404): property #{asset_num} not found");
        };
        self.properties.remove(index);
        Ok(())
    }

    fn login(&self, username: &str, password: &str) -> Result<()> {
        let Some((expected_user, expected_password)) = &self.credentials else {
            return Ok(());
        };
        if expected_user != username {
            bail!("unknown user {username:?}");
        }
        if expected_password != password {
            bail!("wrong password");
        }
        Ok(())
    }
}
