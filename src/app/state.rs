//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the UI. It owns one
//! [`ListState`] per list view. Each list keeps its own [`Query`] and the last
//! result the worker computed for it. Results are `None` until the first reply
//! arrives, so "nothing computed yet" and "nothing matched" never look alike.
//!
//! Every query sent to the worker is stamped with a fresh generation. Only the
//! reply carrying the latest generation is accepted; anything older is dropped,
//! so a slow reply can never overwrite a newer result.

use super::actions::Action;
use super::modes::{DateBound, HoldingTab, InputMode, Overlay, View};
use crate::domain::error::Result;
use crate::domain::{ActionRecord, ActionType, ClientHolding, ProcessingStatus};
use crate::engine::{self, Page, Query, SortDirection, SortKey, PAGE_SIZE};
use crate::i18n::{Dictionary, Locale};
use crate::storage::RecordScope;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, ChecklistItem, Column, ColumnWidth, DetailInfo, DisplayCell, DisplayRow, EmptyState,
    FilterBarInfo, FilterSegment, FooterInfo, HeaderInfo, InputBoxInfo, NavItem, OverlayInfo,
    TableInfo, ToastInfo, ToastKind, UIViewModel,
};
use crate::worker::WorkerMessage;

/// Seconds a toast stays up unless a key dismisses it first.
pub const TOAST_SECONDS: u64 = 3;

/// Identifies the two result lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListId {
    CorporateActions,
    HoldingProcessing,
}

/// Query, last result and cursor of one list view.
#[derive(Debug, Clone)]
pub struct ListState {
    pub query: Query,
    /// Filtered and sorted records; `None` until computed.
    pub results: Option<Vec<ActionRecord>>,
    /// Cursor within the visible rows (the current page when paginated).
    pub selected: usize,
}

impl ListState {
    #[must_use]
    pub fn new(paginated: bool) -> Self {
        Self {
            query: if paginated {
                Query::paginated()
            } else {
                Query::default()
            },
            results: None,
            selected: 0,
        }
    }

    /// Rows currently on screen.
    ///
    /// Paginated lists show one page; the others show everything and scroll.
    #[must_use]
    pub fn visible(&self) -> Option<Page> {
        let records = self.results.as_ref()?;
        Some(match self.query.page {
            Some(page) => engine::paginate(records, page, PAGE_SIZE),
            None => engine::paginate(records, 1, records.len()),
        })
    }

    fn visible_len(&self) -> usize {
        self.visible().map_or(0, |page| page.records.len())
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<ActionRecord> {
        self.visible()?.records.into_iter().nth(self.selected)
    }

    pub fn move_down(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Moves one page forward or back, clamped. Returns whether the page changed.
    pub fn turn_page(&mut self, forward: bool) -> bool {
        let (Some(page), Some(records)) = (self.query.page, self.results.as_ref()) else {
            return false;
        };
        let last = engine::total_pages(records.len(), PAGE_SIZE);
        let target = if forward {
            (page + 1).min(last)
        } else {
            page.saturating_sub(1).max(1)
        };
        if target == page {
            return false;
        }
        self.query.page = Some(target);
        self.selected = 0;
        true
    }

    /// Stores a fresh result and pulls page and cursor back into range.
    fn set_results(&mut self, records: Vec<ActionRecord>) {
        if let Some(page) = self.query.page {
            let last = engine::total_pages(records.len(), PAGE_SIZE);
            self.query.page = Some(page.clamp(1, last));
        }
        self.results = Some(records);
        let len = self.visible_len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Detail screen lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading { id: String },
    Loaded {
        record: ActionRecord,
        holdings: Vec<ClientHolding>,
    },
    NotFound { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

/// Central application state, mutated only by [`handle_event`](crate::app::handle_event).
#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: Theme,
    pub locale: Locale,
    pub dictionary: Dictionary,
    /// Directory CSV exports are written to.
    pub export_dir: String,

    pub view: View,
    pub tab: HoldingTab,
    pub input_mode: InputMode,
    /// Text typed in date entry mode.
    pub input_buffer: String,
    /// Validation message for the date buffer.
    pub input_error: Option<String>,
    pub overlay: Option<Overlay>,

    pub corporate_actions: ListState,
    pub holding_processing: ListState,
    /// Action types listed in Holding Processing.
    pub holding_types: Vec<ActionType>,
    /// Ids shown with the "New" tag.
    pub newest_ids: Vec<String>,
    pub detail: Option<DetailState>,

    pub toast: Option<Toast>,
    toast_timers: usize,

    generation: u64,
    in_flight: Option<(u64, ListId)>,
    pub started: bool,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, locale: Locale, dictionary: Dictionary, export_dir: String) -> Self {
        Self {
            theme,
            locale,
            dictionary,
            export_dir,
            view: View::CorporateActions,
            tab: HoldingTab::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            overlay: None,
            corporate_actions: ListState::new(true),
            holding_processing: ListState::new(false),
            holding_types: ActionType::HOLDING.to_vec(),
            newest_ids: Vec::new(),
            detail: None,
            toast: None,
            toast_timers: 0,
            generation: 0,
            in_flight: None,
            started: false,
        }
    }

    /// List behind the current view; `None` on the detail screen.
    #[must_use]
    pub const fn active_list_id(&self) -> Option<ListId> {
        match self.view {
            View::CorporateActions => Some(ListId::CorporateActions),
            View::HoldingProcessing => Some(ListId::HoldingProcessing),
            View::HoldingDetail => None,
        }
    }

    #[must_use]
    pub const fn list(&self, id: ListId) -> &ListState {
        match id {
            ListId::CorporateActions => &self.corporate_actions,
            ListId::HoldingProcessing => &self.holding_processing,
        }
    }

    pub fn list_mut(&mut self, id: ListId) -> &mut ListState {
        match id {
            ListId::CorporateActions => &mut self.corporate_actions,
            ListId::HoldingProcessing => &mut self.holding_processing,
        }
    }

    /// Action types offered by the type filter of `id`.
    #[must_use]
    pub fn type_options(&self, id: ListId) -> &[ActionType] {
        match id {
            ListId::CorporateActions => &ActionType::ALL,
            ListId::HoldingProcessing => &self.holding_types,
        }
    }

    #[must_use]
    pub fn scope(&self, id: ListId) -> RecordScope {
        match id {
            ListId::CorporateActions => RecordScope::AllActions,
            ListId::HoldingProcessing => {
                let types = self.holding_types.clone();
                match self.tab {
                    HoldingTab::Pending => RecordScope::Pending { types },
                    HoldingTab::Completed => RecordScope::Completed { types },
                }
            }
        }
    }

    /// Sends the current query of `id` to the worker under a new generation.
    pub fn dispatch_query(&mut self, id: ListId) -> Action {
        self.generation += 1;
        self.in_flight = Some((self.generation, id));

        let _span = tracing::debug_span!("dispatch_query", generation = self.generation, list = ?id).entered();
        tracing::debug!(query = ?self.list(id).query, "query dispatched");

        Action::PostToWorker(WorkerMessage::run_query(
            self.generation,
            self.scope(id),
            self.list(id).query.clone(),
        ))
    }

    /// Whether a query is awaiting its reply.
    #[must_use]
    pub const fn is_computing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Stores a worker result if it answers the latest query.
    ///
    /// Returns `false` for superseded generations, which are discarded.
    pub fn accept_results(&mut self, generation: u64, records: Vec<ActionRecord>) -> bool {
        match self.in_flight {
            Some((latest, id)) if latest == generation => {
                self.in_flight = None;
                self.list_mut(id).set_results(records);
                true
            }
            _ => {
                tracing::debug!(generation, latest = self.generation, "dropping stale query result");
                false
            }
        }
    }

    /// Shows a toast and returns the timer that will hide it.
    pub fn show_toast(&mut self, kind: ToastKind, title: String, description: String) -> Action {
        tracing::debug!(?kind, title = %title, "showing toast");
        self.toast = Some(Toast {
            kind,
            title,
            description,
        });
        self.toast_timers += 1;
        Action::SetTimeout(TOAST_SECONDS)
    }

    /// Handles one elapsed toast timer. Only the timer of the latest toast
    /// hides it. Returns whether a toast was removed.
    pub fn expire_toast(&mut self) -> bool {
        self.toast_timers = self.toast_timers.saturating_sub(1);
        self.toast_timers == 0 && self.toast.take().is_some()
    }

    /// Switches to the next locale.
    ///
    /// # Errors
    ///
    /// Returns the dictionary error; the current locale stays active.
    pub fn cycle_locale(&mut self) -> Result<()> {
        let next = self.locale.next();
        self.dictionary = Dictionary::load(next)?;
        self.locale = next;
        tracing::info!(locale = %next, "locale switched");
        Ok(())
    }

    /// Builds the render snapshot for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let dict = &self.dictionary;
        let input = self.compute_input_box();
        let chrome = CHROME_ROWS + if input.is_some() { INPUT_BOX_ROWS } else { 0 };

        UIViewModel {
            header: HeaderInfo {
                title: dict.layout.title.clone(),
                subtitle: dict.layout.description.clone(),
                busy: self
                    .is_computing()
                    .then(|| dict.layout.loading_spinner_text.clone()),
            },
            nav: vec![
                NavItem {
                    label: dict.sidebar.corporate_actions.clone(),
                    active: self.view == View::CorporateActions,
                },
                NavItem {
                    label: dict.sidebar.holding_processing.clone(),
                    active: self.view != View::CorporateActions,
                },
            ],
            tabs: self.compute_tabs(),
            filters: self.active_list_id().map(|id| self.compute_filter_bar(id)),
            input,
            body: self.compute_body(rows.saturating_sub(chrome), cols),
            toast: self.toast.as_ref().map(|toast| ToastInfo {
                kind: toast.kind,
                title: toast.title.clone(),
                description: toast.description.clone(),
                hint: dict.keys.dismiss.clone(),
            }),
            overlay: self.overlay.as_ref().map(|overlay| self.compute_overlay(overlay)),
            footer: self.compute_footer(),
        }
    }

    fn compute_tabs(&self) -> Vec<NavItem> {
        if self.view != View::HoldingProcessing {
            return Vec::new();
        }
        let holding = &self.dictionary.holding;
        vec![
            NavItem {
                label: holding.pending_tab.clone(),
                active: self.tab == HoldingTab::Pending,
            },
            NavItem {
                label: holding.completed_tab.clone(),
                active: self.tab == HoldingTab::Completed,
            },
        ]
    }

    fn compute_filter_bar(&self, id: ListId) -> FilterBarInfo {
        let tracker = &self.dictionary.tracker;
        let query = &self.list(id).query;

        let action_type = query.action_type.map_or_else(
            || tracker.all_action_types.clone(),
            |t| self.dictionary.action_type(t).to_string(),
        );
        let date_range = query
            .date_range
            .filter(|range| !range.is_open())
            .map_or_else(
                || tracker.select_date_range.clone(),
                |range| {
                    let from = range.from.map(|d| d.to_string()).unwrap_or_default();
                    let to = range.to.map(|d| d.to_string()).unwrap_or_default();
                    format!("{from} ~ {to}")
                },
            );
        let sort = query.sort.map_or_else(String::new, |spec| {
            format!("{} {}", self.sort_key_label(spec.key), arrow(spec.direction))
        });

        FilterBarInfo {
            segments: vec![
                FilterSegment {
                    label: tracker.search_label.clone(),
                    active: !query.search_term.is_empty(),
                    value: if query.search_term.is_empty() {
                        tracker.search_placeholder.clone()
                    } else {
                        query.search_term.clone()
                    },
                },
                FilterSegment {
                    label: tracker.action_type_label.clone(),
                    active: query.action_type.is_some(),
                    value: action_type,
                },
                FilterSegment {
                    label: tracker.date_range_label.clone(),
                    active: query.date_range.is_some_and(|r| !r.is_open()),
                    value: date_range,
                },
                FilterSegment {
                    label: tracker.sort_label.clone(),
                    active: query.sort != Some(engine::SortSpec::DEFAULT),
                    value: sort,
                },
            ],
        }
    }

    fn sort_key_label(&self, key: SortKey) -> &str {
        match key {
            SortKey::AnnouncementDate => &self.dictionary.tracker.table_header_announce_date,
            SortKey::EffectiveDate => &self.dictionary.tracker.table_header_effective_date,
        }
    }

    fn compute_input_box(&self) -> Option<InputBoxInfo> {
        let tracker = &self.dictionary.tracker;
        let id = self.active_list_id()?;
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::Search => Some(InputBoxInfo {
                label: tracker.search_label.clone(),
                value: self.list(id).query.search_term.clone(),
                placeholder: tracker.search_placeholder.clone(),
                error: None,
            }),
            InputMode::DateInput(bound) => Some(InputBoxInfo {
                label: match bound {
                    DateBound::From => tracker.date_from_prompt.clone(),
                    DateBound::To => tracker.date_to_prompt.clone(),
                },
                value: self.input_buffer.clone(),
                placeholder: "YYYY-MM-DD".to_string(),
                error: self.input_error.clone(),
            }),
        }
    }

    fn compute_body(&self, available_rows: usize, cols: usize) -> Body {
        match self.active_list_id() {
            Some(id) => self.compute_list_body(id, available_rows, cols),
            None => self.compute_detail_body(cols),
        }
    }

    fn compute_list_body(&self, id: ListId, available_rows: usize, cols: usize) -> Body {
        let dict = &self.dictionary;
        let list = self.list(id);
        let Some(page) = list.visible() else {
            return Body::Loading(dict.layout.loading_spinner_text.clone());
        };

        if page.records.is_empty() {
            let message = match (id, self.tab) {
                (ListId::CorporateActions, _) => &dict.tracker.no_actions_found,
                (ListId::HoldingProcessing, HoldingTab::Pending) => &dict.holding.no_pending_actions,
                (ListId::HoldingProcessing, HoldingTab::Completed) => {
                    &dict.holding.no_completed_actions
                }
            };
            let subtitle = if list.query.has_filters() {
                format!("c: {}", dict.tracker.clear_filters_button)
            } else {
                String::new()
            };
            return Body::Empty(EmptyState {
                message: message.clone(),
                subtitle,
            });
        }

        let kind = match (id, self.tab) {
            (ListId::CorporateActions, _) => TableKind::CorporateActions,
            (ListId::HoldingProcessing, HoldingTab::Pending) => TableKind::Pending,
            (ListId::HoldingProcessing, HoldingTab::Completed) => TableKind::Completed,
        };

        let tag_width = if kind == TableKind::CorporateActions {
            dict.tracker.new_tag.chars().count() + 1
        } else {
            0
        };
        let columns = Column::layout(&self.column_specs(kind, &list.query), cols.saturating_sub(tag_width));

        // Scrolling lists keep the cursor roughly centered.
        let rows_fit = available_rows.max(1);
        let mut start = list.selected.saturating_sub(rows_fit / 2);
        let end = (start + rows_fit).min(page.records.len());
        if end - start < rows_fit && page.records.len() >= rows_fit {
            start = end.saturating_sub(rows_fit);
        }

        let needle = list.query.search_term.to_lowercase();
        let rows = page.records[start..end]
            .iter()
            .enumerate()
            .map(|(offset, record)| DisplayRow {
                cells: self.row_cells(kind, record, &columns, &needle),
                tag: (kind == TableKind::CorporateActions && self.newest_ids.contains(&record.id))
                    .then(|| dict.tracker.new_tag.clone()),
                is_selected: start + offset == list.selected,
            })
            .collect();

        let pager = list.query.page.map(|_| {
            Dictionary::fill(
                &dict.tracker.page_indicator,
                &[
                    ("currentPage", page.page.to_string().as_str()),
                    ("totalPages", page.total_pages.to_string().as_str()),
                ],
            )
        });

        Body::Table(TableInfo {
            columns,
            rows,
            tag_width,
            pager,
        })
    }

    fn column_specs(&self, kind: TableKind, query: &Query) -> Vec<(String, ColumnWidth)> {
        let tracker = &self.dictionary.tracker;
        let holding = &self.dictionary.holding;
        let sorted = |key: SortKey, title: &str| match query.sort {
            Some(spec) if spec.key == key => format!("{title} {}", arrow(spec.direction)),
            _ => title.to_string(),
        };
        let announced = sorted(SortKey::AnnouncementDate, &tracker.table_header_announce_date);
        let effective = sorted(SortKey::EffectiveDate, &tracker.table_header_effective_date);

        match kind {
            TableKind::CorporateActions => vec![
                (announced, ColumnWidth::Fixed(DATE_WIDTH)),
                (tracker.table_header_ticker.clone(), ColumnWidth::Fixed(TICKER_WIDTH)),
                (tracker.table_header_company_name.clone(), ColumnWidth::Flex(2)),
                (tracker.table_header_action_type.clone(), ColumnWidth::Fixed(TYPE_WIDTH)),
                (effective, ColumnWidth::Fixed(DATE_WIDTH)),
                (tracker.table_header_details.clone(), ColumnWidth::Flex(3)),
            ],
            TableKind::Pending => vec![
                (announced, ColumnWidth::Fixed(DATE_WIDTH)),
                (tracker.table_header_ticker.clone(), ColumnWidth::Fixed(TICKER_WIDTH)),
                (tracker.table_header_company_name.clone(), ColumnWidth::Flex(1)),
                (tracker.table_header_action_type.clone(), ColumnWidth::Fixed(TYPE_WIDTH)),
                (effective, ColumnWidth::Fixed(DATE_WIDTH)),
            ],
            TableKind::Completed => vec![
                (tracker.table_header_ticker.clone(), ColumnWidth::Fixed(TICKER_WIDTH)),
                (tracker.table_header_company_name.clone(), ColumnWidth::Flex(2)),
                (tracker.table_header_action_type.clone(), ColumnWidth::Fixed(TYPE_WIDTH)),
                (holding.table_header_processor.clone(), ColumnWidth::Fixed(12)),
                (holding.table_header_processed_date.clone(), ColumnWidth::Fixed(DATE_WIDTH)),
                (holding.table_header_remarks.clone(), ColumnWidth::Flex(3)),
            ],
        }
    }

    fn row_cells(&self, kind: TableKind, record: &ActionRecord, columns: &[Column], needle: &str) -> Vec<DisplayCell> {
        let type_label = self.dictionary.action_type(record.action_type).to_string();
        let searchable = |text: &str, col: usize| DisplayCell::fitted(text, columns[col].width, needle);
        let plain = |text: String, col: usize| DisplayCell::fitted(&text, columns[col].width, "");

        match kind {
            TableKind::CorporateActions => vec![
                plain(record.announcement_date.to_string(), 0),
                searchable(&record.ticker, 1),
                searchable(&record.company_name, 2),
                plain(type_label, 3),
                plain(record.effective_date.to_string(), 4),
                plain(record.action_details.clone(), 5),
            ],
            TableKind::Pending => vec![
                plain(record.announcement_date.to_string(), 0),
                searchable(&record.ticker, 1),
                searchable(&record.company_name, 2),
                plain(type_label, 3),
                plain(record.effective_date.to_string(), 4),
            ],
            TableKind::Completed => {
                let info = record.status.completion();
                vec![
                    searchable(&record.ticker, 0),
                    searchable(&record.company_name, 1),
                    plain(type_label, 2),
                    plain(info.map(|i| i.processor.clone()).unwrap_or_default(), 3),
                    plain(info.map(|i| i.processed_date.to_string()).unwrap_or_default(), 4),
                    plain(info.map(|i| i.remarks.clone()).unwrap_or_default(), 5),
                ]
            }
        }
    }

    fn compute_detail_body(&self, cols: usize) -> Body {
        let dict = &self.dictionary;
        match &self.detail {
            None | Some(DetailState::Loading { .. }) => {
                Body::Loading(dict.layout.loading_spinner_text.clone())
            }
            Some(DetailState::NotFound { id }) => Body::Empty(EmptyState {
                message: dict.layout.not_found_title.clone(),
                subtitle: Dictionary::fill(&dict.layout.not_found_description, &[("id", id.as_str())]),
            }),
            Some(DetailState::Loaded { record, holdings }) => {
                Body::Detail(self.compute_detail(record, holdings, cols))
            }
        }
    }

    fn compute_detail(&self, record: &ActionRecord, holdings: &[ClientHolding], cols: usize) -> DetailInfo {
        let dict = &self.dictionary;
        let tracker = &dict.tracker;
        let holding = &dict.holding;

        let mut fields = vec![
            (tracker.table_header_company_name.clone(), record.company_name.clone()),
            (
                tracker.table_header_action_type.clone(),
                dict.action_type(record.action_type).to_string(),
            ),
            (tracker.table_header_details.clone(), record.action_details.clone()),
            (
                tracker.table_header_announce_date.clone(),
                record.announcement_date.to_string(),
            ),
            (
                tracker.table_header_effective_date.clone(),
                record.effective_date.to_string(),
            ),
        ];
        if let Some(before) = &record.value_before {
            fields.push((holding.before_label.clone(), before.clone()));
        }
        if let Some(after) = &record.value_after {
            fields.push((holding.after_label.clone(), after.clone()));
        }
        if let ProcessingStatus::Completed(info) = &record.status {
            fields.push((holding.table_header_processor.clone(), info.processor.clone()));
            fields.push((
                holding.table_header_processed_date.clone(),
                info.processed_date.to_string(),
            ));
            fields.push((holding.table_header_remarks.clone(), info.remarks.clone()));
        }

        let labels = &holding.details_table;
        let columns = Column::layout(
            &[
                (labels.chinese_name.clone(), ColumnWidth::Flex(1)),
                (labels.english_name.clone(), ColumnWidth::Flex(1)),
                (labels.account_number.clone(), ColumnWidth::Fixed(16)),
                (labels.quantity.clone(), ColumnWidth::Fixed(12)),
            ],
            cols,
        );
        let rows = holdings
            .iter()
            .map(|h| DisplayRow {
                cells: vec![
                    DisplayCell::fitted(&h.chinese_name, columns[0].width, ""),
                    DisplayCell::fitted(&h.english_name, columns[1].width, ""),
                    DisplayCell::fitted(&h.account_number, columns[2].width, ""),
                    DisplayCell::fitted(&h.formatted_quantity(), columns[3].width, ""),
                ],
                tag: None,
                is_selected: false,
            })
            .collect();

        DetailInfo {
            title: Dictionary::fill(&holding.holding_details_for, &[("ticker", record.ticker.as_str())]),
            fields,
            holdings: TableInfo {
                columns,
                rows,
                tag_width: 0,
                pager: None,
            },
        }
    }

    fn compute_overlay(&self, overlay: &Overlay) -> OverlayInfo {
        let dict = &self.dictionary;
        match overlay {
            Overlay::Instructions => OverlayInfo::Message {
                title: dict.instructions.title.clone(),
                lines: vec![dict.instructions.step1.clone(), dict.instructions.step2.clone()],
                hint: format!("Esc: {}", dict.instructions.close_button),
            },
            Overlay::ConfirmProcessing {
                remarks,
                show_required,
            } => {
                let dialog = &dict.holding.dialog;
                let ticker = match &self.detail {
                    Some(DetailState::Loaded { record, .. }) => record.ticker.as_str(),
                    _ => "",
                };
                OverlayInfo::Form {
                    title: dialog.title.clone(),
                    description: Dictionary::fill(&dialog.description, &[("ticker", ticker)]),
                    label: dialog.remarks_label.clone(),
                    value: remarks.clone(),
                    placeholder: dialog.remarks_placeholder.clone(),
                    error: show_required.then(|| dialog.remarks_required.clone()),
                    hint: format!(
                        "Enter: {}  Esc: {}",
                        dialog.submit_button, dialog.cancel_button
                    ),
                }
            }
            Overlay::ManageTypes {
                selected,
                cursor,
                show_required,
            } => {
                let manage = &dict.holding.manage_dialog;
                OverlayInfo::Checklist {
                    title: manage.title.clone(),
                    description: manage.description.clone(),
                    items: ActionType::ALL
                        .iter()
                        .zip(selected)
                        .enumerate()
                        .map(|(idx, (t, checked))| ChecklistItem {
                            label: dict.action_type(*t).to_string(),
                            checked: *checked,
                            is_cursor: idx == *cursor,
                        })
                        .collect(),
                    error: show_required.then(|| manage.at_least_one.clone()),
                    hint: format!(
                        "Space: {}  Enter: {}  Esc: {}",
                        dict.keys.toggle, manage.submit_button, manage.cancel_button
                    ),
                }
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keys = &self.dictionary.keys;
        let hints: Vec<(&str, &str)> = match (&self.overlay, self.input_mode, self.view) {
            (Some(Overlay::Instructions), _, _) => vec![("Esc", keys.back.as_str())],
            (Some(Overlay::ConfirmProcessing { .. }), _, _) => {
                vec![("Enter", keys.submit.as_str()), ("Esc", keys.cancel.as_str())]
            }
            (Some(Overlay::ManageTypes { .. }), _, _) => vec![
                ("j/k", keys.navigate.as_str()),
                ("Space", keys.toggle.as_str()),
                ("Enter", keys.apply.as_str()),
                ("Esc", keys.cancel.as_str()),
            ],
            (None, InputMode::Search, _) => vec![("Enter", keys.confirm.as_str()), ("Esc", keys.back.as_str())],
            (None, InputMode::DateInput(_), _) => vec![("Enter", keys.apply.as_str()), ("Esc", keys.cancel.as_str())],
            (None, InputMode::Normal, View::CorporateActions) => vec![
                ("j/k", keys.navigate.as_str()),
                ("h/l", keys.page.as_str()),
                ("/", keys.search.as_str()),
                ("t", keys.action_type.as_str()),
                ("f", keys.date_from.as_str()),
                ("F", keys.date_to.as_str()),
                ("s", keys.sort_announced.as_str()),
                ("e", keys.sort_effective.as_str()),
                ("c", keys.clear.as_str()),
                ("x", keys.export.as_str()),
                ("Tab", keys.switch_view.as_str()),
                ("?", keys.help.as_str()),
                ("L", keys.language.as_str()),
                ("q", keys.quit.as_str()),
            ],
            (None, InputMode::Normal, View::HoldingProcessing) => vec![
                ("j/k", keys.navigate.as_str()),
                ("1/2", keys.tabs.as_str()),
                ("Enter", keys.details.as_str()),
                ("/", keys.search.as_str()),
                ("t", keys.action_type.as_str()),
                ("f", keys.date_from.as_str()),
                ("F", keys.date_to.as_str()),
                ("s", keys.sort_announced.as_str()),
                ("e", keys.sort_effective.as_str()),
                ("c", keys.clear.as_str()),
                ("x", keys.export.as_str()),
                ("m", keys.manage.as_str()),
                ("Tab", keys.switch_view.as_str()),
                ("?", keys.help.as_str()),
                ("q", keys.quit.as_str()),
            ],
            (None, InputMode::Normal, View::HoldingDetail) => {
                let mut hints = vec![("Esc", keys.back.as_str())];
                if self.detail_is_pending() {
                    hints.insert(0, ("Enter", keys.confirm.as_str()));
                }
                hints.push(("q", keys.quit.as_str()));
                hints
            }
        };

        FooterInfo {
            keybindings: hints
                .iter()
                .map(|(key, label)| format!("{key}: {label}"))
                .collect::<Vec<_>>()
                .join("  "),
        }
    }

    /// Whether the detail screen shows an action that can still be processed.
    #[must_use]
    pub fn detail_is_pending(&self) -> bool {
        matches!(
            &self.detail,
            Some(DetailState::Loaded { record, .. }) if !record.status.is_completed()
        )
    }
}

/// Rows taken by everything except the list body.
const CHROME_ROWS: usize = 11;
const INPUT_BOX_ROWS: usize = 3;

const DATE_WIDTH: usize = 10;
const TICKER_WIDTH: usize = 8;
const TYPE_WIDTH: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    CorporateActions,
    Pending,
    Completed,
}

const fn arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "↑",
        SortDirection::Descending => "↓",
    }
}
