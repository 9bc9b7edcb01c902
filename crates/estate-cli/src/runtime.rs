// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use estate_api::Backend;
use estate_app::{AssetNum, CreateOutcome, NewProperty, Owner, OwnerFilter, Property};

/// Adapts any [`Backend`] to the terminal UI's runtime seam.
pub struct ApiRuntime<B: Backend> {
    backend: B,
    username: String,
}

impl<B: Backend> ApiRuntime<B> {
    pub fn new(backend: B, username: &str) -> Self {
        Self {
            backend,
            username: username.to_owned(),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> estate_tui::AppRuntime for ApiRuntime<B> {
    fn load_owners(&mut self) -> Result<Vec<Owner>> {
        self.backend.list_owners()
    }

    fn load_properties(&mut self, filter: OwnerFilter) -> Result<Vec<Property>> {
        self.backend.list_properties(filter.owner_id())
    }

    fn create_property(&mut self, payload: &NewProperty) -> Result<CreateOutcome> {
        self.backend.create_property(payload)
    }

    fn update_property(&mut self, asset_num: AssetNum, record: &Property) -> Result<()> {
        self.backend.update_property(asset_num, record)
    }

    fn delete_property(&mut self, asset_num: AssetNum) -> Result<()> {
        self.backend.delete_property(asset_num)
    }

    fn login(&mut self, password: &str) -> Result<()> {
        self.backend.login(&self.username, password)
    }
}
