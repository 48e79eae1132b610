//! Zellij plugin wrapper and entry point.
//!
//! This module connects the Actionboard library to the Zellij plugin system.
//! It implements `ZellijPlugin`, registers the worker, maps keys to
//! library events and executes the returned actions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌───────────────────┐   │
//! │  │  State (plugin)   │   │  ← UI state, event handling
//! │  └───────────────────┘   │
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │ ActionboardWorker │   │  ← Queries, CSV writes, KV flag
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! While a toast is visible any key dismisses it and does nothing else.
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `l`/`]`, `h`/`[`: Next/previous page
//! - `Tab`: Switch between Corporate Actions and Holding Processing
//! - `1`/`2`: Pending/Completed tab
//! - `/`: Search
//! - `t`: Cycle the action type filter
//! - `f`/`F`: Type the effective date from/to bound
//! - `s`/`e`: Sort by announcement/effective date
//! - `c`: Clear filters
//! - `x`: Export CSV
//! - `Enter`: Open detail, or confirm processing on the detail screen
//! - `m`: Manage holding types
//! - `?`: Instructions
//! - `L`: Switch language
//! - `Esc`: Back
//! - `q`: Close
//!
//! In search and date input: characters edit, `Enter` applies, `Esc` leaves.
//! In dialogs: `Space` toggles a checklist item, `Enter` submits, `Esc` cancels.

#![allow(clippy::multiple_crate_versions)]

use actionboard::app::{DateBound, HoldingTab, Overlay};
use actionboard::engine::SortKey;
use actionboard::worker::{ActionboardWorker, WorkerMessage, WorkerResponse};
use actionboard::{handle_event, Action, AppState, Config, Event, InputMode};
use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

register_plugin!(State);
register_worker!(ActionboardWorker, actionboard_worker, ACTIONBOARD_WORKER);

/// Name the worker is registered under; also used as the message name.
const WORKER_NAME: &str = "actionboard";

/// Plugin state wrapper.
#[derive(Default)]
struct State {
    /// `None` until `load` succeeds.
    app: Option<AppState>,
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests the
    /// host filesystem permission and subscribes to events. Data is requested
    /// from the worker once permission is answered.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        actionboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(locale = %config.locale, export_dir = %config.export_dir, "parsed configuration");
        match actionboard::initialize(&config) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize plugin");
                return;
            }
        }

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs the library handler and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let Some(app) = self.app.as_mut() else {
            return false;
        };

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(app, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Timer,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => vec![PermissionType::FullHdAccess],
                    PermissionStatus::Denied => {
                        tracing::warn!("host filesystem access denied - exports and settings will not persist");
                        vec![]
                    }
                };
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(app) = &self.app {
            actionboard::ui::render(app, rows, cols);
        }
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps a key to an application event according to what has focus.
    fn map_key_event(app: &AppState, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if app.toast.is_some() {
            return Some(Event::DismissToast);
        }

        match &app.overlay {
            Some(Overlay::ManageTypes { .. }) => {
                return match key.bare_key {
                    BareKey::Down | BareKey::Char('j') => Some(Event::MoveDown),
                    BareKey::Up | BareKey::Char('k') => Some(Event::MoveUp),
                    BareKey::Char(' ') => Some(Event::Toggle),
                    BareKey::Enter => Some(Event::Submit),
                    BareKey::Esc => Some(Event::Escape),
                    _ => None,
                };
            }
            Some(Overlay::ConfirmProcessing { .. } | Overlay::Instructions) => {
                return Self::map_text_key(key);
            }
            None => {}
        }

        match app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Down => Some(Event::MoveDown),
                BareKey::Up => Some(Event::MoveUp),
                _ => Self::map_text_key(key),
            },
            InputMode::DateInput(_) => Self::map_text_key(key),
            InputMode::Normal => Self::map_command_key(key),
        }
    }

    fn map_text_key(key: &KeyWithModifier) -> Option<Event> {
        match key.bare_key {
            BareKey::Enter => Some(Event::Submit),
            BareKey::Esc => Some(Event::Escape),
            BareKey::Backspace => Some(Event::Backspace),
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Some(Event::Char(c)),
            _ => None,
        }
    }

    fn map_command_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Right | BareKey::Char('l' | ']') => Event::NextPage,
            BareKey::Left | BareKey::Char('h' | '[') => Event::PrevPage,
            BareKey::Tab => Event::SwitchView,
            BareKey::Char('1') => Event::ShowTab(HoldingTab::Pending),
            BareKey::Char('2') => Event::ShowTab(HoldingTab::Completed),
            BareKey::Char('/') => Event::StartSearch,
            BareKey::Char('t') => Event::CycleActionType,
            BareKey::Char('f') => Event::StartDateInput(DateBound::From),
            BareKey::Char('F') => Event::StartDateInput(DateBound::To),
            BareKey::Char('s') => Event::ToggleSort(SortKey::AnnouncementDate),
            BareKey::Char('e') => Event::ToggleSort(SortKey::EffectiveDate),
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('x') => Event::Export,
            BareKey::Enter => Event::Select,
            BareKey::Char('m') => Event::ManageTypes,
            BareKey::Char('?') => Event::ShowInstructions,
            BareKey::Char('L') => Event::SwitchLocale,
            BareKey::Esc => Event::Escape,
            BareKey::Char('q') => Event::Close,
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` and posts it to the worker. Failures are logged.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(kind = message.kind(), payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            #[allow(clippy::cast_precision_loss)]
            Action::SetTimeout(seconds) => set_timeout(*seconds as f64),
        }
    }
}
