// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use estate_app::{
    AppCommand, AppEvent, AppState, AssetNum, CreateOutcome, DetailPanel, NewProperty, Owner,
    OwnerFilter, Property, PropertyDraft, PropertyField, RowMode, Screen, TableView,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::format_description;

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const EXPANDED_MARK: &str = "▾";
const COLLAPSED_MARK: &str = "▸";

/// I/O seam between the terminal loop and whatever backend serves the data.
pub trait AppRuntime {
    fn load_owners(&mut self) -> Result<Vec<Owner>>;
    fn load_properties(&mut self, filter: OwnerFilter) -> Result<Vec<Property>>;
    fn create_property(&mut self, payload: &NewProperty) -> Result<CreateOutcome>;
    fn update_property(&mut self, asset_num: AssetNum, record: &Property) -> Result<()>;
    fn delete_property(&mut self, asset_num: AssetNum) -> Result<()>;
    fn login(&mut self, password: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FormUiState {
    visible: bool,
    field_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ViewData {
    selected_row: usize,
    edit_field: usize,
    form: FormUiState,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    debug!("terminal UI started on {:?} screen", state.screen);
    dispatch_and_run(
        state,
        runtime,
        &mut view_data,
        &internal_tx,
        AppCommand::Start,
    );

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    debug!("terminal UI stopped");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Dispatches `command`, services every request it produces, and keeps the
/// cursor on the same asset across list replacements.
fn dispatch_and_run<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let selected = selected_asset(state, view_data);
    let events = state.dispatch(command);
    let applied = run_effects(state, runtime, events);
    sync_view_data(state, view_data, &applied, selected);

    if applied
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

/// Drains request events against the runtime, feeding each outcome back into
/// the state machine until nothing is left to fetch. Returns every event
/// that was observed, in order.
fn run_effects<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    events: Vec<AppEvent>,
) -> Vec<AppEvent> {
    let mut pending: VecDeque<AppEvent> = events.into();
    let mut applied = Vec::new();
    while let Some(event) = pending.pop_front() {
        if let Some(command) = perform_request(runtime, &event) {
            pending.extend(state.dispatch(command));
        }
        applied.push(event);
    }
    applied
}

fn perform_request<R: AppRuntime>(runtime: &mut R, event: &AppEvent) -> Option<AppCommand> {
    let command = match event {
        AppEvent::OwnersRequested => match runtime.load_owners() {
            Ok(owners) => AppCommand::OwnersLoaded(owners),
            Err(error) => {
                warn!("load owners: {error:#}");
                AppCommand::LoadFailed(error_text(&error))
            }
        },
        AppEvent::ReloadRequested(filter) => match runtime.load_properties(*filter) {
            Ok(properties) => AppCommand::PropertiesLoaded {
                filter: *filter,
                properties,
                loaded_at: OffsetDateTime::now_utc(),
            },
            Err(error) => {
                warn!("load properties for {filter:?}: {error:#}");
                AppCommand::LoadFailed(error_text(&error))
            }
        },
        AppEvent::LoginRequested(password) => {
            let result = runtime.login(password);
            if let Err(error) = &result {
                warn!("login: {error:#}");
            }
            AppCommand::LoginCompleted(result.map_err(|error| error_text(&error)))
        }
        AppEvent::SaveRequested { asset_num, record } => {
            let result = runtime.update_property(*asset_num, record);
            if let Err(error) = &result {
                warn!("update property #{asset_num}: {error:#}");
            }
            AppCommand::SaveCompleted {
                record: record.clone(),
                result: result.map_err(|error| error_text(&error)),
            }
        }
        AppEvent::CreateRequested(payload) => {
            let result = runtime.create_property(payload);
            match &result {
                Ok(CreateOutcome::Rejected(message)) => warn!("create rejected: {message}"),
                Err(error) => warn!("create property: {error:#}"),
                Ok(CreateOutcome::Created(_)) => {}
            }
            AppCommand::CreateCompleted(result.map_err(|error| error_text(&error)))
        }
        AppEvent::DeleteRequested(asset_num) => {
            let result = runtime.delete_property(*asset_num);
            if let Err(error) = &result {
                warn!("delete property #{asset_num}: {error:#}");
            }
            AppCommand::DeleteCompleted {
                asset_num: *asset_num,
                result: result.map_err(|error| error_text(&error)),
            }
        }
        _ => return None,
    };
    Some(command)
}

fn error_text(error: &anyhow::Error) -> String {
    format!("{error:#}")
}

fn sync_view_data(
    state: &AppState,
    view_data: &mut ViewData,
    applied: &[AppEvent],
    previously_selected: Option<AssetNum>,
) {
    for event in applied {
        match event {
            AppEvent::EditChanged(Some(asset_num)) => {
                view_data.edit_field = 0;
                if let Some(index) = state.row_index(*asset_num) {
                    view_data.selected_row = index;
                }
            }
            AppEvent::DraftReset => view_data.form.field_index = 0,
            AppEvent::FilterChanged(_) => view_data.selected_row = 0,
            _ => {}
        }
    }

    let list_changed = applied
        .iter()
        .any(|event| matches!(event, AppEvent::ListReplaced(_)));
    if list_changed
        && let Some(asset_num) = previously_selected
        && let Some(index) = state.row_index(asset_num)
    {
        view_data.selected_row = index;
    }
    clamp_selection(state, view_data);
}

fn selected_asset(state: &AppState, view_data: &ViewData) -> Option<AssetNum> {
    state
        .properties
        .get(view_data.selected_row)
        .map(|property| property.asset_num)
}

fn clamp_selection(state: &AppState, view_data: &mut ViewData) {
    view_data.selected_row = view_data
        .selected_row
        .min(state.properties.len().saturating_sub(1));
}

fn move_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let row_count = state.properties.len();
    if row_count == 0 {
        view_data.selected_row = 0;
        return;
    }

    let current = view_data.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.selected_row = next.min(row_count.saturating_sub(1));
}

fn move_field(index: usize, delta: isize) -> usize {
    let len = PropertyField::ALL.len() as isize;
    (index as isize + delta).rem_euclid(len) as usize
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.screen == Screen::Login {
        handle_login_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.pending_delete.is_some() {
        handle_confirm_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.edit.asset_num().is_some() {
        handle_edit_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.form.visible {
        handle_form_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    handle_nav_key(state, runtime, view_data, internal_tx, key);
    false
}

fn handle_login_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match key.code {
        KeyCode::Enter => AppCommand::SubmitLogin,
        KeyCode::Backspace => AppCommand::LoginBackspace,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::LoginInput(ch)
        }
        _ => return,
    };
    dispatch_and_run(state, runtime, view_data, internal_tx, command);
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => AppCommand::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => AppCommand::CancelDelete,
        _ => return,
    };
    dispatch_and_run(state, runtime, view_data, internal_tx, command);
}

fn handle_edit_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = PropertyField::ALL[view_data.edit_field.min(PropertyField::ALL.len() - 1)];

    let command = match key.code {
        KeyCode::Esc => AppCommand::CancelEdit,
        KeyCode::Enter => AppCommand::SaveEdit,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => AppCommand::SaveEdit,
        KeyCode::Tab => {
            view_data.edit_field = move_field(view_data.edit_field, 1);
            return;
        }
        KeyCode::BackTab => {
            view_data.edit_field = move_field(view_data.edit_field, -1);
            return;
        }
        KeyCode::Backspace => AppCommand::EditBackspace(field),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::EditInput(field, ch)
        }
        _ => return,
    };
    dispatch_and_run(state, runtime, view_data, internal_tx, command);
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = PropertyField::ALL[view_data.form.field_index.min(PropertyField::ALL.len() - 1)];

    let command = match key.code {
        KeyCode::Esc => {
            // The draft survives; reopening the form picks it back up.
            view_data.form.visible = false;
            return;
        }
        KeyCode::Enter => AppCommand::SubmitNewProperty,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::SubmitNewProperty
        }
        KeyCode::Tab => {
            view_data.form.field_index = move_field(view_data.form.field_index, 1);
            return;
        }
        KeyCode::BackTab => {
            view_data.form.field_index = move_field(view_data.form.field_index, -1);
            return;
        }
        KeyCode::Backspace => AppCommand::DraftBackspace(field),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::DraftInput(field, ch)
        }
        _ => return,
    };
    dispatch_and_run(state, runtime, view_data, internal_tx, command);
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            move_row(state, view_data, 1);
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_row(state, view_data, -1);
            return;
        }
        KeyCode::Char('g') | KeyCode::Home => {
            view_data.selected_row = 0;
            return;
        }
        KeyCode::Char('G') | KeyCode::End => {
            view_data.selected_row = state.properties.len().saturating_sub(1);
            return;
        }
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            return;
        }
        KeyCode::Char('a') => {
            view_data.form.visible = true;
            emit_status(
                state,
                view_data,
                internal_tx,
                "add property: tab moves between fields, enter submits",
            );
            return;
        }
        KeyCode::Char('o') => AppCommand::CycleOwner(1),
        KeyCode::Char('O') => AppCommand::CycleOwner(-1),
        KeyCode::Char('0') => AppCommand::SelectOwner(None),
        KeyCode::Char('r') => AppCommand::Reload,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e') | KeyCode::Char('d') => {
            let Some(asset_num) = selected_asset(state, view_data) else {
                emit_status(state, view_data, internal_tx, "no property selected");
                return;
            };
            match key.code {
                KeyCode::Char('e') => AppCommand::StartEdit(asset_num),
                KeyCode::Char('d') => AppCommand::RequestDelete(asset_num),
                _ => AppCommand::ToggleExpand(asset_num),
            }
        }
        _ => return,
    };
    dispatch_and_run(state, runtime, view_data, internal_tx, command);
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("estate").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    match state.screen {
        Screen::Login => render_login(frame, layout[1], state),
        Screen::Properties => render_properties(frame, layout[1], state, view_data),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let Some(asset_num) = state.pending_delete {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let confirm = Paragraph::new(confirm_delete_text(state, asset_num)).block(
            Block::default()
                .title("delete")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(confirm, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(state: &AppState) -> String {
    if state.screen == Screen::Login {
        return "sign in to continue".to_owned();
    }
    format!(
        "owner: {} | {} properties",
        state.owner_label(state.owner_filter),
        state.properties.len()
    )
}

fn render_login(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState) {
    let prompt = Paragraph::new(login_text(state)).block(
        Block::default()
            .title("login")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(prompt, centered_rect(50, 40, area));
}

fn login_text(state: &AppState) -> String {
    format!(
        "password: {}\n\nenter sign in | ctrl+q quit",
        "*".repeat(state.password.chars().count())
    )
}

fn render_properties(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let view = TableView::project(&state.properties, &state.edit, state.expanded);
    let side = side_pane(state, view_data, view.detail.as_ref());

    let (table_area, side_area) = match side {
        Some(_) => {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(area);
            (split[0], Some(split[1]))
        }
        None => (area, None),
    };

    render_table(frame, table_area, state, view_data, &view);

    if let (Some((title, body)), Some(side_area)) = (side, side_area) {
        let pane = Paragraph::new(body).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(pane, side_area);
    }
}

/// Title and body for the right-hand pane. The edit buffer wins over the add
/// form, which wins over the detail panel.
fn side_pane(
    state: &AppState,
    view_data: &ViewData,
    detail: Option<&DetailPanel>,
) -> Option<(String, String)> {
    if let (Some(asset_num), Some(buffer)) = (state.edit.asset_num(), state.edit.buffer()) {
        return Some((
            format!("edit #{asset_num}"),
            render_draft_text(buffer, view_data.edit_field, "enter save | esc cancel"),
        ));
    }
    if view_data.form.visible {
        return Some((
            "new property".to_owned(),
            render_draft_text(
                &state.new_property,
                view_data.form.field_index,
                "enter add | esc hide",
            ),
        ));
    }
    detail.map(|detail| (format!("#{}", detail.asset_num), render_detail_text(detail)))
}

fn render_draft_text(draft: &PropertyDraft, focus: usize, hint: &str) -> String {
    let mut lines = PropertyField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let marker = if index == focus { ">" } else { " " };
            format!("{marker} {:<18} {}", field.label(), draft.get(*field))
        })
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push(format!("tab/shift+tab field | {hint}"));
    lines.join("\n")
}

fn render_detail_text(detail: &DetailPanel) -> String {
    detail
        .entries
        .iter()
        .map(|(field, value)| format!("{:<18} {value}", field.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    view: &TableView,
) {
    let labels = TableView::column_labels();
    let mut widths = vec![Constraint::Length(9)];
    widths.extend(std::iter::repeat_n(Constraint::Min(8), labels.len() - 1));

    let header = Row::new(labels.into_iter().map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = view.rows.iter().enumerate().map(|(row_index, row)| {
        let selected = row_index == view_data.selected_row;
        let mut style = Style::default();
        if row.expanded {
            style = style.fg(Color::Cyan);
        }
        if row.mode == RowMode::Edit {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        if selected {
            style = style.bg(Color::DarkGray);
        }

        let cells = row.cells.iter().enumerate().map(|(column, text)| {
            if column == 0 {
                let mark = if row.expanded {
                    EXPANDED_MARK
                } else {
                    COLLAPSED_MARK
                };
                Cell::from(format!("{mark} {text}"))
            } else {
                Cell::from(text.clone())
            }
        });
        Row::new(cells).style(style)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(state))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn table_title(state: &AppState) -> String {
    let loaded = state
        .loaded_at
        .and_then(|loaded_at| {
            loaded_at
                .format(&format_description!("[hour]:[minute]:[second]"))
                .ok()
        })
        .map_or_else(|| "not loaded".to_owned(), |stamp| format!("loaded {stamp}"));
    match state.owner_filter {
        OwnerFilter::All => format!("properties | {loaded}"),
        filter => format!("properties ({}) | {loaded}", state.owner_label(filter)),
    }
}

fn confirm_delete_text(state: &AppState, asset_num: AssetNum) -> String {
    let description = state
        .property(asset_num)
        .and_then(|property| property.details.legal_description.clone())
        .unwrap_or_default();
    format!("delete property #{asset_num}?\n{description}\n\ny confirm | n/esc cancel")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k move | g/G first/last | enter/space expand | r reload\n\
nav: e edit | d delete | a add | o/O next/prev owner | 0 all owners\n\
edit/add: tab/shift+tab field | type to change | backspace | enter or ctrl+s save | esc cancel\n\
delete: y confirm | n/esc cancel\n\
help: ? or esc close"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let mode = mode_label(state, view_data);
    let hints = match mode {
        "LOGIN" => "type password | enter sign in | ctrl+q",
        "CONFIRM" => "y delete | n/esc cancel",
        "EDIT" => "tab field | enter save | esc cancel",
        "FORM" => "tab field | enter add | esc hide",
        _ => "j/k g/G | enter expand | e edit | d del | a add | o/O/0 owner | r reload | ? | ctrl+q",
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn mode_label(state: &AppState, view_data: &ViewData) -> &'static str {
    if state.screen == Screen::Login {
        "LOGIN"
    } else if state.pending_delete.is_some() {
        "CONFIRM"
    } else if state.edit.asset_num().is_some() {
        "EDIT"
    } else if view_data.form.visible {
        "FORM"
    } else {
        "NAV"
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
