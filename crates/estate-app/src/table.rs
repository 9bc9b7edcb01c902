// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AssetNum, EditSlot, Property, PropertyField};

pub const ASSET_COLUMN_LABEL: &str = "Asset #";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Display,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub asset_num: AssetNum,
    pub mode: RowMode,
    pub expanded: bool,
    /// Asset number followed by one cell per [`PropertyField::COMPACT`] field.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub asset_num: AssetNum,
    pub entries: Vec<(PropertyField, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub detail: Option<DetailPanel>,
}

impl TableView {
    pub fn column_labels() -> Vec<&'static str> {
        std::iter::once(ASSET_COLUMN_LABEL)
            .chain(PropertyField::COMPACT.iter().map(|field| field.label()))
            .collect()
    }

    pub fn project(
        properties: &[Property],
        edit: &EditSlot,
        expanded: Option<AssetNum>,
    ) -> Self {
        let rows = properties
            .iter()
            .map(|property| project_row(property, edit, expanded))
            .collect();

        let detail = expanded.and_then(|asset_num| {
            properties
                .iter()
                .find(|property| property.asset_num == asset_num)
                .map(|property| DetailPanel {
                    asset_num,
                    entries: PropertyField::DETAIL
                        .into_iter()
                        .map(|field| (field, property.details.display(field)))
                        .collect(),
                })
        });

        Self { rows, detail }
    }
}

fn project_row(property: &Property, edit: &EditSlot, expanded: Option<AssetNum>) -> RowView {
    let asset_num = property.asset_num;
    let mut cells = Vec::with_capacity(PropertyField::COMPACT.len() + 1);
    cells.push(asset_num.to_string());

    let mode = match edit {
        EditSlot::Editing {
            asset_num: editing,
            buffer,
        } if *editing == asset_num => {
            cells.extend(
                PropertyField::COMPACT
                    .into_iter()
                    .map(|field| buffer.get(field).to_owned()),
            );
            RowMode::Edit
        }
        _ => {
            cells.extend(
                PropertyField::COMPACT
                    .into_iter()
                    .map(|field| property.details.display(field)),
            );
            RowMode::Display
        }
    };

    RowView {
        asset_num,
        mode,
        expanded: expanded == Some(asset_num),
        cells,
    }
}
