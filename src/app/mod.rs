//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: views, tabs, input modes and overlays
//! - [`state`]: application state and view model computation
//!
//! # Example
//!
//! ```
//! use actionboard::app::{handle_event, Action, AppState, Event};
//! use actionboard::i18n::{Dictionary, Locale};
//! use actionboard::ui::Theme;
//!
//! let dictionary = Dictionary::load(Locale::En)?;
//! let mut state = AppState::new(Theme::default(), Locale::En, dictionary, "/host".into());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: vec![] })?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), actionboard::ActionboardError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DateBound, HoldingTab, InputMode, Overlay, View};
pub use state::{AppState, DetailState, ListId, ListState};
