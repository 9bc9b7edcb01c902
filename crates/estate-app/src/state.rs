// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::{
    AssetNum, AssetNumbering, CreateOutcome, NewProperty, Owner, OwnerId, Property,
    PropertyDraft, PropertyField, next_asset_num,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerFilter {
    #[default]
    All,
    Owner(OwnerId),
}

impl OwnerFilter {
    pub const fn owner_id(self) -> Option<OwnerId> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(id),
        }
    }
}

impl From<Option<OwnerId>> for OwnerFilter {
    fn from(value: Option<OwnerId>) -> Self {
        value.map_or(Self::All, Self::Owner)
    }
}

/// The single edit slot. Only one row can be edited at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSlot {
    #[default]
    Idle,
    Editing {
        asset_num: AssetNum,
        buffer: PropertyDraft,
    },
}

impl EditSlot {
    pub fn asset_num(&self) -> Option<AssetNum> {
        match self {
            Self::Idle => None,
            Self::Editing { asset_num, .. } => Some(*asset_num),
        }
    }

    pub fn buffer(&self) -> Option<&PropertyDraft> {
        match self {
            Self::Idle => None,
            Self::Editing { buffer, .. } => Some(buffer),
        }
    }

    pub fn is_editing(&self, asset_num: AssetNum) -> bool {
        self.asset_num() == Some(asset_num)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormPolicy {
    pub asset_numbering: AssetNumbering,
    /// Clear the add form even when the server rejects the submission.
    pub reset_form_on_rejection: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub owners: Vec<Owner>,
    pub owner_filter: OwnerFilter,
    pub properties: Vec<Property>,
    pub loaded_at: Option<OffsetDateTime>,
    pub edit: EditSlot,
    pub expanded: Option<AssetNum>,
    pub new_property: PropertyDraft,
    pub pending_delete: Option<AssetNum>,
    pub password: String,
    pub policy: FormPolicy,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Properties,
            owners: Vec::new(),
            owner_filter: OwnerFilter::All,
            properties: Vec::new(),
            loaded_at: None,
            edit: EditSlot::Idle,
            expanded: None,
            new_property: PropertyDraft::blank(),
            pending_delete: None,
            password: String::new(),
            policy: FormPolicy::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Start,
    LoginInput(char),
    LoginBackspace,
    SubmitLogin,
    LoginCompleted(Result<(), String>),
    Reload,
    OwnersLoaded(Vec<Owner>),
    PropertiesLoaded {
        filter: OwnerFilter,
        properties: Vec<Property>,
        loaded_at: OffsetDateTime,
    },
    LoadFailed(String),
    SelectOwner(Option<OwnerId>),
    CycleOwner(isize),
    ToggleExpand(AssetNum),
    StartEdit(AssetNum),
    EditField(PropertyField, String),
    EditInput(PropertyField, char),
    EditBackspace(PropertyField),
    SaveEdit,
    SaveCompleted {
        record: Property,
        result: Result<(), String>,
    },
    CancelEdit,
    DraftField(PropertyField, String),
    DraftInput(PropertyField, char),
    DraftBackspace(PropertyField),
    SubmitNewProperty,
    CreateCompleted(Result<CreateOutcome, String>),
    RequestDelete(AssetNum),
    ConfirmDelete,
    CancelDelete,
    DeleteCompleted {
        asset_num: AssetNum,
        result: Result<(), String>,
    },
    SetStatus(String),
    ClearStatus,
}

/// State changes and I/O requests produced by [`AppState::dispatch`].
///
/// The `*Requested` variants ask the host to perform a remote call and feed
/// the outcome back as the matching `*Completed`/`*Loaded` command.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    OwnersRequested,
    ReloadRequested(OwnerFilter),
    LoginRequested(String),
    SaveRequested {
        asset_num: AssetNum,
        record: Property,
    },
    CreateRequested(NewProperty),
    DeleteRequested(AssetNum),
    ScreenChanged(Screen),
    FilterChanged(OwnerFilter),
    ExpandChanged(Option<AssetNum>),
    EditChanged(Option<AssetNum>),
    DeletePrompted(AssetNum),
    ListReplaced(usize),
    DraftReset,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(policy: FormPolicy, require_login: bool) -> Self {
        Self {
            screen: if require_login {
                Screen::Login
            } else {
                Screen::Properties
            },
            policy,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Start => match self.screen {
                Screen::Login => vec![self.set_status("enter password")],
                Screen::Properties => vec![
                    AppEvent::OwnersRequested,
                    AppEvent::ReloadRequested(self.owner_filter),
                ],
            },
            AppCommand::LoginInput(ch) => {
                self.password.push(ch);
                Vec::new()
            }
            AppCommand::LoginBackspace => {
                self.password.pop();
                Vec::new()
            }
            AppCommand::SubmitLogin => {
                if self.screen != Screen::Login {
                    return Vec::new();
                }
                if self.password.is_empty() {
                    return vec![self.set_status("enter a password first")];
                }
                vec![AppEvent::LoginRequested(self.password.clone())]
            }
            AppCommand::LoginCompleted(result) => self.finish_login(result),
            AppCommand::Reload => {
                if self.screen != Screen::Properties {
                    return Vec::new();
                }
                vec![AppEvent::ReloadRequested(self.owner_filter)]
            }
            AppCommand::OwnersLoaded(owners) => {
                self.owners = owners;
                Vec::new()
            }
            AppCommand::PropertiesLoaded {
                filter,
                properties,
                loaded_at,
            } => self.replace_properties(filter, properties, loaded_at),
            AppCommand::LoadFailed(message) => {
                vec![self.set_status(&format!("load failed: {message}"))]
            }
            AppCommand::SelectOwner(owner_id) => self.select_owner(OwnerFilter::from(owner_id)),
            AppCommand::CycleOwner(delta) => self.cycle_owner(delta),
            AppCommand::ToggleExpand(asset_num) => {
                self.expanded = if self.expanded == Some(asset_num) {
                    None
                } else {
                    Some(asset_num)
                };
                vec![AppEvent::ExpandChanged(self.expanded)]
            }
            AppCommand::StartEdit(asset_num) => self.start_edit(asset_num),
            AppCommand::EditField(field, value) => {
                if let EditSlot::Editing { buffer, .. } = &mut self.edit {
                    buffer.set(field, value);
                }
                Vec::new()
            }
            AppCommand::EditInput(field, ch) => {
                if let EditSlot::Editing { buffer, .. } = &mut self.edit {
                    buffer.push_char(field, ch);
                }
                Vec::new()
            }
            AppCommand::EditBackspace(field) => {
                if let EditSlot::Editing { buffer, .. } = &mut self.edit {
                    buffer.pop_char(field);
                }
                Vec::new()
            }
            AppCommand::SaveEdit => self.save_edit(),
            AppCommand::SaveCompleted { record, result } => self.finish_save(record, result),
            AppCommand::CancelEdit => {
                if self.edit == EditSlot::Idle {
                    return Vec::new();
                }
                self.edit = EditSlot::Idle;
                vec![AppEvent::EditChanged(None), self.set_status("edit canceled")]
            }
            AppCommand::DraftField(field, value) => {
                self.new_property.set(field, value);
                Vec::new()
            }
            AppCommand::DraftInput(field, ch) => {
                self.new_property.push_char(field, ch);
                Vec::new()
            }
            AppCommand::DraftBackspace(field) => {
                self.new_property.pop_char(field);
                Vec::new()
            }
            AppCommand::SubmitNewProperty => self.submit_new_property(),
            AppCommand::CreateCompleted(result) => self.finish_create(result),
            AppCommand::RequestDelete(asset_num) => {
                if !self.contains(asset_num) {
                    return vec![self.set_status(&format!("no property with asset #{asset_num}"))];
                }
                self.pending_delete = Some(asset_num);
                vec![
                    AppEvent::DeletePrompted(asset_num),
                    self.set_status(&format!(
                        "delete property #{asset_num}? y to confirm, n to cancel"
                    )),
                ]
            }
            AppCommand::ConfirmDelete => match self.pending_delete.take() {
                Some(asset_num) => vec![AppEvent::DeleteRequested(asset_num)],
                None => Vec::new(),
            },
            AppCommand::CancelDelete => {
                if self.pending_delete.take().is_none() {
                    return Vec::new();
                }
                vec![self.set_status("delete canceled")]
            }
            AppCommand::DeleteCompleted { asset_num, result } => {
                self.finish_delete(asset_num, result)
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn owner_label(&self, filter: OwnerFilter) -> String {
        match filter {
            OwnerFilter::All => "all owners".to_owned(),
            OwnerFilter::Owner(id) => self
                .owners
                .iter()
                .find(|owner| owner.owner_id == id)
                .map(|owner| owner.owner_name.clone())
                .unwrap_or_else(|| format!("owner {id}")),
        }
    }

    pub fn property(&self, asset_num: AssetNum) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.asset_num == asset_num)
    }

    /// Position of `asset_num` in the current list, for cursor mapping.
    pub fn row_index(&self, asset_num: AssetNum) -> Option<usize> {
        self.properties
            .iter()
            .position(|property| property.asset_num == asset_num)
    }

    fn contains(&self, asset_num: AssetNum) -> bool {
        self.property(asset_num).is_some()
    }

    fn finish_login(&mut self, result: Result<(), String>) -> Vec<AppEvent> {
        self.password.clear();
        match result {
            Ok(()) => {
                self.screen = Screen::Properties;
                vec![
                    AppEvent::ScreenChanged(self.screen),
                    self.set_status("logged in"),
                    AppEvent::OwnersRequested,
                    AppEvent::ReloadRequested(self.owner_filter),
                ]
            }
            Err(message) => vec![self.set_status(&format!("login failed: {message}"))],
        }
    }

    fn replace_properties(
        &mut self,
        filter: OwnerFilter,
        properties: Vec<Property>,
        loaded_at: OffsetDateTime,
    ) -> Vec<AppEvent> {
        // A response for a filter the user already left is stale.
        if filter != self.owner_filter {
            return Vec::new();
        }

        self.properties = properties;
        self.loaded_at = Some(loaded_at);

        let mut events = vec![AppEvent::ListReplaced(self.properties.len())];
        if let Some(asset_num) = self.expanded
            && !self.contains(asset_num)
        {
            self.expanded = None;
            events.push(AppEvent::ExpandChanged(None));
        }
        if let Some(asset_num) = self.edit.asset_num()
            && !self.contains(asset_num)
        {
            self.edit = EditSlot::Idle;
            events.push(AppEvent::EditChanged(None));
            events.push(self.set_status(&format!(
                "edit of #{asset_num} discarded; row is no longer listed"
            )));
        }
        if let Some(asset_num) = self.pending_delete
            && !self.contains(asset_num)
        {
            self.pending_delete = None;
        }
        events
    }

    fn select_owner(&mut self, filter: OwnerFilter) -> Vec<AppEvent> {
        self.owner_filter = filter;
        let label = self.owner_label(filter);
        vec![
            AppEvent::FilterChanged(filter),
            self.set_status(&format!("owner: {label}")),
            AppEvent::ReloadRequested(filter),
        ]
    }

    fn cycle_owner(&mut self, delta: isize) -> Vec<AppEvent> {
        let choices: Vec<OwnerFilter> = std::iter::once(OwnerFilter::All)
            .chain(
                self.owners
                    .iter()
                    .map(|owner| OwnerFilter::Owner(owner.owner_id)),
            )
            .collect();
        let current = choices
            .iter()
            .position(|choice| *choice == self.owner_filter)
            .unwrap_or(0) as isize;
        let len = choices.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_owner(choices[next])
    }

    fn start_edit(&mut self, asset_num: AssetNum) -> Vec<AppEvent> {
        let Some(property) = self.property(asset_num) else {
            return vec![self.set_status(&format!("no property with asset #{asset_num}"))];
        };
        self.edit = EditSlot::Editing {
            asset_num,
            buffer: PropertyDraft::from_property(property),
        };
        vec![
            AppEvent::EditChanged(Some(asset_num)),
            self.set_status(&format!("editing #{asset_num}")),
        ]
    }

    fn save_edit(&mut self) -> Vec<AppEvent> {
        let EditSlot::Editing { asset_num, buffer } = &self.edit else {
            return vec![self.set_status("nothing to save")];
        };
        let asset_num = *asset_num;
        match buffer.to_property(asset_num) {
            Ok(record) => vec![AppEvent::SaveRequested { asset_num, record }],
            Err(error) => vec![self.set_status(&error.to_string())],
        }
    }

    fn finish_save(&mut self, record: Property, result: Result<(), String>) -> Vec<AppEvent> {
        let asset_num = record.asset_num;
        match result {
            Ok(()) => {
                if let Some(existing) = self
                    .properties
                    .iter_mut()
                    .find(|property| property.asset_num == asset_num)
                {
                    *existing = record;
                }
                let mut events = Vec::new();
                if self.edit.is_editing(asset_num) {
                    self.edit = EditSlot::Idle;
                    events.push(AppEvent::EditChanged(None));
                }
                events.push(self.set_status(&format!("saved #{asset_num}")));
                events.push(AppEvent::ReloadRequested(self.owner_filter));
                events
            }
            Err(message) => vec![self.set_status(&format!("failed to save changes: {message}"))],
        }
    }

    fn submit_new_property(&mut self) -> Vec<AppEvent> {
        if self.new_property.is_blank() {
            return vec![self.set_status("nothing to add; fill in the form first")];
        }
        let asset_num = match self.policy.asset_numbering {
            AssetNumbering::Server => None,
            AssetNumbering::Client => Some(next_asset_num(&self.properties)),
        };
        match self.new_property.to_new_property(asset_num) {
            Ok(payload) => vec![AppEvent::CreateRequested(payload)],
            Err(error) => vec![self.set_status(&error.to_string())],
        }
    }

    fn finish_create(&mut self, result: Result<CreateOutcome, String>) -> Vec<AppEvent> {
        match result {
            Ok(CreateOutcome::Created(stored)) => {
                self.new_property = PropertyDraft::blank();
                let message = match stored {
                    Some(property) => format!("added property #{}", property.asset_num),
                    None => "property added".to_owned(),
                };
                vec![
                    AppEvent::DraftReset,
                    self.set_status(&message),
                    AppEvent::ReloadRequested(self.owner_filter),
                ]
            }
            Ok(CreateOutcome::Rejected(message)) => {
                let mut events = Vec::new();
                if self.policy.reset_form_on_rejection {
                    self.new_property = PropertyDraft::blank();
                    events.push(AppEvent::DraftReset);
                }
                events.push(self.set_status(&message));
                events
            }
            Err(message) => vec![self.set_status(&format!("failed to add property: {message}"))],
        }
    }

    fn finish_delete(&mut self, asset_num: AssetNum, result: Result<(), String>) -> Vec<AppEvent> {
        match result {
            Ok(()) => {
                self.properties
                    .retain(|property| property.asset_num != asset_num);
                let mut events = Vec::new();
                if self.expanded == Some(asset_num) {
                    self.expanded = None;
                    events.push(AppEvent::ExpandChanged(None));
                }
                if self.edit.is_editing(asset_num) {
                    self.edit = EditSlot::Idle;
                    events.push(AppEvent::EditChanged(None));
                }
                events.push(self.set_status(&format!("deleted #{asset_num}")));
                events.push(AppEvent::ReloadRequested(self.owner_filter));
                events
            }
            Err(message) => vec![self.set_status(&format!(
                "failed to delete property with asset #{asset_num}: {message}"
            ))],
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, EditSlot, FormPolicy, OwnerFilter, Screen};
    use crate::{
        AssetNum, AssetNumbering, CreateOutcome, Owner, OwnerId, Property, PropertyDetails,
        PropertyField,
    };
    use time::OffsetDateTime;

    fn property(asset_num: i64, status: &str) -> Property {
        Property {
            asset_num: AssetNum::new(asset_num),
            details: PropertyDetails {
                location: Some(format!("Tract {asset_num}")),
                status: Some(status.to_owned()),
                ..PropertyDetails::default()
            },
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState {
            owners: vec![
                Owner {
                    owner_id: OwnerId::new(1),
                    owner_name: "JLA".to_owned(),
                },
                Owner {
                    owner_id: OwnerId::new(2),
                    owner_name: "DLE".to_owned(),
                },
            ],
            ..AppState::default()
        };
        state.dispatch(AppCommand::PropertiesLoaded {
            filter: OwnerFilter::All,
            properties: vec![property(1, "owned"), property(3, "leased"), property(7, "owned")],
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        });
        state
    }

    fn status_of(state: &AppState, asset_num: i64) -> Option<String> {
        state
            .property(AssetNum::new(asset_num))
            .and_then(|property| property.details.status.clone())
    }

    fn is_request(event: &AppEvent) -> bool {
        matches!(
            event,
            AppEvent::OwnersRequested
                | AppEvent::ReloadRequested(_)
                | AppEvent::LoginRequested(_)
                | AppEvent::SaveRequested { .. }
                | AppEvent::CreateRequested(_)
                | AppEvent::DeleteRequested(_)
        )
    }

    fn reload_with(state: &mut AppState, properties: Vec<Property>) -> Vec<AppEvent> {
        let filter = state.owner_filter;
        state.dispatch(AppCommand::PropertiesLoaded {
            filter,
            properties,
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        })
    }

    #[test]
    fn start_requests_owners_and_unfiltered_list() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::Start);
        assert_eq!(
            events,
            vec![
                AppEvent::OwnersRequested,
                AppEvent::ReloadRequested(OwnerFilter::All),
            ]
        );
    }

    #[test]
    fn edit_then_cancel_keeps_original_value() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(7)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));
        let events = state.dispatch(AppCommand::CancelEdit);

        assert_eq!(state.edit, EditSlot::Idle);
        assert!(events.iter().all(|event| !is_request(event)));
        assert_eq!(status_of(&state, 7).as_deref(), Some("owned"));
    }

    #[test]
    fn save_success_merges_buffer_and_requests_reload() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(7)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));

        let events = state.dispatch(AppCommand::SaveEdit);
        let [AppEvent::SaveRequested { asset_num, record }] = events.as_slice() else {
            panic!("expected a single save request, got {events:?}");
        };
        assert_eq!(*asset_num, AssetNum::new(7));
        assert_eq!(record.details.status.as_deref(), Some("sold"));
        assert_eq!(record.details.location.as_deref(), Some("Tract 7"));

        let events = state.dispatch(AppCommand::SaveCompleted {
            record: record.clone(),
            result: Ok(()),
        });
        assert_eq!(state.edit, EditSlot::Idle);
        assert_eq!(status_of(&state, 7).as_deref(), Some("sold"));
        assert!(events.contains(&AppEvent::ReloadRequested(OwnerFilter::All)));
    }

    #[test]
    fn save_failure_stays_in_edit_mode_with_user_value() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(7)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));
        let events = state.dispatch(AppCommand::SaveEdit);
        let Some(AppEvent::SaveRequested { record, .. }) = events.into_iter().next() else {
            panic!("expected save request");
        };

        let events = state.dispatch(AppCommand::SaveCompleted {
            record,
            result: Err("server returned 500".to_owned()),
        });
        assert!(state.edit.is_editing(AssetNum::new(7)));
        assert_eq!(
            state.edit.buffer().map(|buffer| buffer.get(PropertyField::Status)),
            Some("sold")
        );
        assert_eq!(status_of(&state, 7).as_deref(), Some("owned"));
        assert!(events.iter().all(|event| !is_request(event)));
        assert!(
            state
                .status_line
                .as_deref()
                .is_some_and(|line| line.starts_with("failed to save changes"))
        );
    }

    #[test]
    fn save_with_invalid_number_issues_no_request() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(3)));
        state.dispatch(AppCommand::EditField(PropertyField::Acres, "lots".to_owned()));
        let events = state.dispatch(AppCommand::SaveEdit);
        assert!(events.iter().all(|event| !is_request(event)));
        assert!(state.edit.is_editing(AssetNum::new(3)));
    }

    #[test]
    fn starting_a_second_edit_replaces_the_first() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(1)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));
        state.dispatch(AppCommand::StartEdit(AssetNum::new(3)));

        assert_eq!(state.edit.asset_num(), Some(AssetNum::new(3)));
        assert_eq!(
            state.edit.buffer().map(|buffer| buffer.get(PropertyField::Status)),
            Some("leased")
        );
    }

    #[test]
    fn expand_is_a_single_slot_toggle() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(1)));
        assert_eq!(state.expanded, Some(AssetNum::new(1)));
        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(1)));
        assert_eq!(state.expanded, None);

        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(1)));
        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(3)));
        assert_eq!(state.expanded, Some(AssetNum::new(3)));
    }

    #[test]
    fn cancelled_delete_issues_no_request() {
        let mut state = loaded_state();
        let before = state.properties.clone();
        state.dispatch(AppCommand::RequestDelete(AssetNum::new(3)));
        assert_eq!(state.pending_delete, Some(AssetNum::new(3)));

        let events = state.dispatch(AppCommand::CancelDelete);
        assert!(events.iter().all(|event| !is_request(event)));
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.properties, before);
        assert!(state.dispatch(AppCommand::ConfirmDelete).is_empty());
    }

    #[test]
    fn confirmed_delete_requests_then_reloads() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(3)));
        state.dispatch(AppCommand::RequestDelete(AssetNum::new(3)));
        let events = state.dispatch(AppCommand::ConfirmDelete);
        assert_eq!(events, vec![AppEvent::DeleteRequested(AssetNum::new(3))]);

        let events = state.dispatch(AppCommand::DeleteCompleted {
            asset_num: AssetNum::new(3),
            result: Ok(()),
        });
        assert!(state.property(AssetNum::new(3)).is_none());
        assert_eq!(state.expanded, None);
        assert!(events.contains(&AppEvent::ReloadRequested(OwnerFilter::All)));
    }

    #[test]
    fn failed_delete_keeps_row_and_reports_asset() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::DeleteCompleted {
            asset_num: AssetNum::new(3),
            result: Err("server returned 404".to_owned()),
        });
        assert!(state.property(AssetNum::new(3)).is_some());
        assert!(
            state
                .status_line
                .as_deref()
                .is_some_and(|line| line.contains("asset #3"))
        );
    }

    #[test]
    fn client_numbering_assigns_next_asset_num() {
        let mut state = AppState::new(
            FormPolicy {
                asset_numbering: AssetNumbering::Client,
                reset_form_on_rejection: false,
            },
            false,
        );
        state.dispatch(AppCommand::PropertiesLoaded {
            filter: OwnerFilter::All,
            properties: vec![property(1, "a"), property(3, "b"), property(4, "c")],
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        });
        state.dispatch(AppCommand::DraftField(
            PropertyField::LegalDescription,
            "Lot 9".to_owned(),
        ));

        let events = state.dispatch(AppCommand::SubmitNewProperty);
        let [AppEvent::CreateRequested(payload)] = events.as_slice() else {
            panic!("expected create request, got {events:?}");
        };
        assert_eq!(payload.asset_num, Some(AssetNum::new(5)));
        assert_eq!(payload.details.status, None);
    }

    #[test]
    fn server_numbering_omits_asset_num() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::DraftField(
            PropertyField::LegalDescription,
            "Lot 9".to_owned(),
        ));
        let events = state.dispatch(AppCommand::SubmitNewProperty);
        let [AppEvent::CreateRequested(payload)] = events.as_slice() else {
            panic!("expected create request, got {events:?}");
        };
        assert_eq!(payload.asset_num, None);
    }

    #[test]
    fn created_resets_draft_and_requests_reload() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::DraftField(PropertyField::County, "Knox".to_owned()));
        let events = state.dispatch(AppCommand::CreateCompleted(Ok(CreateOutcome::Created(
            Some(property(8, "owned")),
        ))));
        assert!(state.new_property.is_blank());
        assert!(events.contains(&AppEvent::ReloadRequested(OwnerFilter::All)));
        assert_eq!(state.status_line.as_deref(), Some("added property #8"));
    }

    #[test]
    fn rejection_keeps_draft_unless_policy_resets() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::DraftField(PropertyField::County, "Knox".to_owned()));
        let events = state.dispatch(AppCommand::CreateCompleted(Ok(CreateOutcome::Rejected(
            "asset #3 already exists".to_owned(),
        ))));
        assert_eq!(state.new_property.get(PropertyField::County), "Knox");
        assert_eq!(
            state.status_line.as_deref(),
            Some("asset #3 already exists")
        );
        assert!(events.iter().all(|event| !is_request(event)));

        state.policy.reset_form_on_rejection = true;
        state.dispatch(AppCommand::CreateCompleted(Ok(CreateOutcome::Rejected(
            "nope".to_owned(),
        ))));
        assert!(state.new_property.is_blank());
    }

    #[test]
    fn owner_cycle_wraps_through_all() {
        let mut state = loaded_state();
        let events = state.dispatch(AppCommand::CycleOwner(1));
        assert_eq!(state.owner_filter, OwnerFilter::Owner(OwnerId::new(1)));
        assert!(events.contains(&AppEvent::ReloadRequested(OwnerFilter::Owner(
            OwnerId::new(1)
        ))));
        assert_eq!(state.status_line.as_deref(), Some("owner: JLA"));

        state.dispatch(AppCommand::CycleOwner(-2));
        assert_eq!(state.owner_filter, OwnerFilter::Owner(OwnerId::new(2)));
        state.dispatch(AppCommand::CycleOwner(1));
        assert_eq!(state.owner_filter, OwnerFilter::All);
    }

    #[test]
    fn stale_list_for_previous_filter_is_discarded() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::SelectOwner(Some(OwnerId::new(2))));
        let events = state.dispatch(AppCommand::PropertiesLoaded {
            filter: OwnerFilter::All,
            properties: Vec::new(),
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        });
        assert!(events.is_empty());
        assert_eq!(state.properties.len(), 3);
    }

    #[test]
    fn reload_drops_expansion_of_vanished_row() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::ToggleExpand(AssetNum::new(7)));
        state.dispatch(AppCommand::PropertiesLoaded {
            filter: OwnerFilter::All,
            properties: vec![property(1, "owned")],
            loaded_at: OffsetDateTime::UNIX_EPOCH,
        });
        assert_eq!(state.expanded, None);
    }

    #[test]
    fn login_gate_switches_screen_on_success() {
        let mut state = AppState::new(FormPolicy::default(), true);
        assert_eq!(state.screen, Screen::Login);
        assert!(state.dispatch(AppCommand::Reload).is_empty());

        state.dispatch(AppCommand::LoginInput('h'));
        state.dispatch(AppCommand::LoginInput('i'));
        assert_eq!(
            state.dispatch(AppCommand::SubmitLogin),
            vec![AppEvent::LoginRequested("hi".to_owned())]
        );

        let events = state.dispatch(AppCommand::LoginCompleted(Ok(())));
        assert_eq!(state.screen, Screen::Properties);
        assert!(state.password.is_empty());
        assert!(events.contains(&AppEvent::OwnersRequested));
    }

    #[test]
    fn login_failure_clears_password_and_stays() {
        let mut state = AppState::new(FormPolicy::default(), true);
        state.dispatch(AppCommand::LoginInput('x'));
        state.dispatch(AppCommand::LoginCompleted(Err("wrong password".to_owned())));
        assert_eq!(state.screen, Screen::Login);
        assert!(state.password.is_empty());
        assert_eq!(
            state.status_line.as_deref(),
            Some("login failed: wrong password")
        );
    }

    #[test]
    fn keystrokes_edit_the_focused_buffer_field() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(3)));
        state.dispatch(AppCommand::EditBackspace(PropertyField::Status));
        state.dispatch(AppCommand::EditInput(PropertyField::Status, 'e'));
        assert_eq!(
            state.edit.buffer().map(|buffer| buffer.get(PropertyField::Status)),
            Some("leasee")
        );

        state.dispatch(AppCommand::DraftInput(PropertyField::County, 'K'));
        state.dispatch(AppCommand::DraftInput(PropertyField::County, 'x'));
        state.dispatch(AppCommand::DraftBackspace(PropertyField::County));
        assert_eq!(state.new_property.get(PropertyField::County), "K");
    }

    #[test]
    fn edit_keystrokes_without_active_edit_are_ignored() {
        let mut state = loaded_state();
        let events = state.dispatch(AppCommand::EditInput(PropertyField::Status, 'x'));
        assert!(events.is_empty());
        assert_eq!(state.edit, EditSlot::Idle);
    }

    #[test]
    fn row_index_follows_list_order() {
        let state = loaded_state();
        assert_eq!(state.row_index(AssetNum::new(1)), Some(0));
        assert_eq!(state.row_index(AssetNum::new(7)), Some(2));
        assert_eq!(state.row_index(AssetNum::new(9)), None);
    }

    #[test]
    fn start_edit_on_unknown_asset_stays_idle() {
        let mut state = loaded_state();
        let events = state.dispatch(AppCommand::StartEdit(AssetNum::new(42)));
        assert_eq!(state.edit, EditSlot::Idle);
        assert!(!events.iter().any(|event| matches!(event, AppEvent::EditChanged(_))));
        assert_eq!(
            state.status_line.as_deref(),
            Some("no property with asset #42")
        );
    }

    #[test]
    fn reload_discards_edit_of_vanished_row() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(7)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));

        let events = reload_with(&mut state, vec![property(1, "owned"), property(3, "leased")]);
        assert_eq!(state.edit, EditSlot::Idle);
        assert!(events.contains(&AppEvent::EditChanged(None)));
        assert_eq!(
            state.status_line.as_deref(),
            Some("edit of #7 discarded; row is no longer listed")
        );
    }

    #[test]
    fn reload_keeps_edit_of_listed_row() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(7)));
        state.dispatch(AppCommand::EditField(PropertyField::Status, "sold".to_owned()));

        reload_with(&mut state, vec![property(7, "owned")]);
        assert!(state.edit.is_editing(AssetNum::new(7)));
        assert_eq!(
            state.edit.buffer().map(|buffer| buffer.get(PropertyField::Status)),
            Some("sold")
        );
    }

    #[test]
    fn reload_clears_delete_prompt_of_vanished_row() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::RequestDelete(AssetNum::new(3)));
        assert_eq!(state.pending_delete, Some(AssetNum::new(3)));

        reload_with(&mut state, vec![property(1, "owned"), property(7, "owned")]);
        assert_eq!(state.pending_delete, None);
        assert!(state.dispatch(AppCommand::ConfirmDelete).is_empty());
    }

    #[test]
    fn deleting_the_edited_row_ends_the_edit() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::StartEdit(AssetNum::new(3)));

        let events = state.dispatch(AppCommand::DeleteCompleted {
            asset_num: AssetNum::new(3),
            result: Ok(()),
        });
        assert_eq!(state.edit, EditSlot::Idle);
        assert!(events.contains(&AppEvent::EditChanged(None)));
        assert!(events.contains(&AppEvent::ReloadRequested(OwnerFilter::All)));
        assert_eq!(state.row_index(AssetNum::new(3)), None);
    }

    #[test]
    fn blank_form_submit_issues_no_request() {
        let mut state = loaded_state();
        let events = state.dispatch(AppCommand::SubmitNewProperty);
        assert!(events.iter().all(|event| !is_request(event)));
        assert_eq!(
            state.status_line.as_deref(),
            Some("nothing to add; fill in the form first")
        );

        state.dispatch(AppCommand::DraftField(PropertyField::County, "Knox".to_owned()));
        state.dispatch(AppCommand::SubmitNewProperty);
        assert_eq!(
            state.status_line.as_deref(),
            Some("legal description is required -- fill it in before adding")
        );
    }
}
