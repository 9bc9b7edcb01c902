// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod client;
mod memory;

use anyhow::Result;
use estate_app::{AssetNum, CreateOutcome, NewProperty, Owner, OwnerId, Property};

pub use client::{Client, DEFAULT_USERNAME};
pub use memory::MemoryBackend;

/// The owners/properties REST surface, as seen from the client.
pub trait Backend {
    fn list_owners(&self) -> Result<Vec<Owner>>;

    /// `None` lists every property; `Some` passes the owner id through verbatim.
    fn list_properties(&self, owner: Option<OwnerId>) -> Result<Vec<Property>>;

    /// `Ok(Rejected)` is a domain error reported by the server; `Err` is a
    /// transport or HTTP failure.
    fn create_property(&mut self, payload: &NewProperty) -> Result<CreateOutcome>;

    fn update_property(&mut self, asset_num: AssetNum, record: &Property) -> Result<()>;

    fn delete_property(&mut self, asset_num: AssetNum) -> Result<()>;

    fn login(&self, username: &str, password: &str) -> Result<()>;
}
