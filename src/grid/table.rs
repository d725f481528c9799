//! The data grid: composes the column registry, filter, sort, paginator,
//! selection, width store and persistence into one table instance.
//!
//! Every gesture is synchronous. After a gesture that affects which rows are
//! visible, the filter → sort pipeline is recomputed eagerly over row
//! indices, so reads never observe stale results.

use std::collections::HashSet;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::actions::RowAction;
use super::column::{Column, ColumnWidth};
use super::filter;
use super::owned::Owned;
use super::paginate::{self, is_valid_page_size, DEFAULT_ITEMS_PER_PAGE};
use super::persist::{MemoryStorage, PersistedSlice, PersistenceBridge, Storage, DEFAULT_NAMESPACE};
use super::registry::{ColumnRegistry, VisibleColumns};
use super::resize::{ColumnWidths, WidthStore};
use super::row::{positional_id, GridRow, RowIdFn, TableData};
use super::selection::{HeaderCheckState, SelectionManager};
use super::sort::{self, SortState};
use crate::error::GridError;

/// Called with the full configuration whenever sort, page, page size or
/// column visibility changes.
pub type ConfigChangeHandler = Box<dyn FnMut(&ConfigSnapshot)>;

/// Called with the clicked row and its page index.
pub type RowClickHandler<T> = Box<dyn FnMut(&T, usize)>;

/// Called with the new selection.
pub type SelectionChangeHandler = Box<dyn FnMut(&HashSet<String>)>;

/// The host-visible table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// Sort state.
    pub sort: SortState,
    /// Zero-based page index.
    pub current_page: usize,
    /// Rows per page.
    pub items_per_page: usize,
    /// Column visibility.
    pub visible_columns: VisibleColumns,
}

/// Construction options for a [`DataGrid`].
///
/// Every `controlled_*` setter hands ownership of that slice to the host.
pub struct GridOptions<T> {
    table_id: String,
    namespace: String,
    storage: Rc<dyn Storage>,
    selectable: bool,
    default_items_per_page: usize,
    sort: Option<SortState>,
    current_page: Option<usize>,
    items_per_page: Option<usize>,
    visible_columns: Option<VisibleColumns>,
    search_term: Option<String>,
    selected_row_ids: Option<HashSet<String>>,
    row_id: Option<RowIdFn<T>>,
    row_actions: Vec<RowAction<T>>,
    header_controls: Option<String>,
    on_config_change: Option<ConfigChangeHandler>,
    on_row_click: Option<RowClickHandler<T>>,
    on_selection_change: Option<SelectionChangeHandler>,
}

impl<T> GridOptions<T> {
    /// Options for the table `table_id`, backed by ephemeral in-memory storage.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            storage: Rc::new(MemoryStorage::new()),
            selectable: true,
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            sort: None,
            current_page: None,
            items_per_page: None,
            visible_columns: None,
            search_term: None,
            selected_row_ids: None,
            row_id: None,
            row_actions: Vec::new(),
            header_controls: None,
            on_config_change: None,
            on_row_click: None,
            on_selection_change: None,
        }
    }

    /// Prefix of persisted keys.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Durable storage for preferences.
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Rc::new(storage);
        self
    }

    /// Shared durable storage for preferences.
    pub fn shared_storage(mut self, storage: Rc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Enable or disable the checkbox column.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Page size used when the host does not control it.
    pub fn default_items_per_page(mut self, size: usize) -> Self {
        self.default_items_per_page = size;
        self
    }

    /// Host-controlled sort.
    pub fn controlled_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Host-controlled page index.
    pub fn controlled_current_page(mut self, page: usize) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Host-controlled page size.
    pub fn controlled_items_per_page(mut self, size: usize) -> Self {
        self.items_per_page = Some(size);
        self
    }

    /// Host-controlled column visibility.
    pub fn controlled_visible_columns(mut self, visible: VisibleColumns) -> Self {
        self.visible_columns = Some(visible);
        self
    }

    /// Host-controlled search term.
    pub fn controlled_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Host-controlled selection.
    pub fn controlled_selection(mut self, ids: HashSet<String>) -> Self {
        self.selected_row_ids = Some(ids);
        self
    }

    /// Explicit row identity. Without it the row's own id is used, falling
    /// back to the row's position on its page.
    pub fn row_id(mut self, row_id: impl Fn(&T) -> String + 'static) -> Self {
        self.row_id = Some(Rc::new(row_id));
        self
    }

    /// Append a row action.
    pub fn row_action(mut self, action: RowAction<T>) -> Self {
        self.row_actions.push(action);
        self
    }

    /// Opaque content for the header's action area.
    pub fn header_controls(mut self, controls: impl Into<String>) -> Self {
        self.header_controls = Some(controls.into());
        self
    }

    /// Listen for configuration changes.
    pub fn on_config_change(mut self, handler: impl FnMut(&ConfigSnapshot) + 'static) -> Self {
        self.on_config_change = Some(Box::new(handler));
        self
    }

    /// Listen for row clicks.
    pub fn on_row_click(mut self, handler: impl FnMut(&T, usize) + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    /// Listen for selection changes.
    pub fn on_selection_change(mut self, handler: impl FnMut(&HashSet<String>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(handler));
        self
    }
}

/// Partial configuration change requested by a gesture.
#[derive(Debug, Default)]
struct ConfigProposal {
    sort: Option<SortState>,
    current_page: Option<usize>,
    items_per_page: Option<usize>,
    visible_columns: Option<VisibleColumns>,
}

/// A sorted, filtered, paginated, selectable and resizable table view over
/// rows of type `T`.
pub struct DataGrid<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) registry: ColumnRegistry<T>,
    persistence: PersistenceBridge,
    pub(crate) visible: Owned<VisibleColumns>,
    pub(crate) sort: Owned<SortState>,
    current_page: Owned<usize>,
    items_per_page: Owned<usize>,
    search: Owned<String>,
    selection: Owned<SelectionManager>,
    pub(crate) widths: WidthStore,
    /// Filtered and sorted positions into `rows`.
    processed: Vec<usize>,
    pub(crate) hovered_row: Option<usize>,
    pub(crate) selectable: bool,
    row_id: Option<RowIdFn<T>>,
    pub(crate) row_actions: Vec<RowAction<T>>,
    pub(crate) header_controls: Option<String>,
    on_config_change: Option<ConfigChangeHandler>,
    on_row_click: Option<RowClickHandler<T>>,
    on_selection_change: Option<SelectionChangeHandler>,
}

impl<T: GridRow> DataGrid<T> {
    /// Build a grid.
    ///
    /// Each slice starts from the host's controlled value if given, else the
    /// last persisted value for the table id, else schema defaults.
    ///
    /// # Errors
    ///
    /// Fails when the table id is blank, column ids repeat, or a page size
    /// is not one of the allowed options.
    pub fn new(
        data: impl Into<TableData<T>>,
        columns: Vec<Column<T>>,
        options: GridOptions<T>,
    ) -> Result<Self, GridError> {
        if options.table_id.trim().is_empty() {
            return Err(GridError::EmptyTableId);
        }
        for size in [Some(options.default_items_per_page), options.items_per_page]
            .into_iter()
            .flatten()
        {
            if !is_valid_page_size(size) {
                return Err(GridError::InvalidPageSize(size));
            }
        }

        let registry = ColumnRegistry::new(columns)?;
        let persistence =
            PersistenceBridge::new(options.storage, options.namespace, options.table_id.clone());

        let visible = Owned::from_override(
            options.visible_columns.map(|v| registry.reconcile(&v)),
            || {
                persistence
                    .load::<VisibleColumns>(PersistedSlice::Columns)
                    .map(|v| registry.reconcile(&v))
                    .unwrap_or_else(|| registry.default_visibility())
            },
        );
        let sort = Owned::from_override(options.sort.map(SortState::normalized), || {
            persistence
                .load::<SortState>(PersistedSlice::Sort)
                .map(SortState::normalized)
                .filter(|s| {
                    s.column
                        .as_deref()
                        .map_or(true, |id| registry.column(id).is_some_and(|c| c.is_sortable()))
                })
                .unwrap_or_default()
        });
        let widths = WidthStore::new(
            persistence
                .load::<ColumnWidths>(PersistedSlice::Widths)
                .unwrap_or_default(),
        );

        let default_items_per_page = options.default_items_per_page;
        let mut grid = Self {
            rows: data.into().into_rows(),
            registry,
            persistence,
            visible,
            sort,
            current_page: Owned::from_override(options.current_page, || 0),
            items_per_page: Owned::from_override(options.items_per_page, || default_items_per_page),
            search: Owned::from_override(options.search_term, String::new),
            selection: Owned::from_override(
                options.selected_row_ids.map(SelectionManager::from_ids),
                SelectionManager::new,
            ),
            widths,
            processed: Vec::new(),
            hovered_row: None,
            selectable: options.selectable,
            row_id: options.row_id,
            row_actions: options.row_actions,
            header_controls: options.header_controls,
            on_config_change: options.on_config_change,
            on_row_click: options.on_row_click,
            on_selection_change: options.on_selection_change,
        };
        grid.refresh();

        debug!(
            table_id = %options.table_id,
            rows = grid.rows.len(),
            columns = grid.registry.columns().len(),
            "Data grid created"
        );
        Ok(grid)
    }

    // ----- Data ---------------------------------------------------------

    /// All rows in input order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Replace the dataset. Selection is kept as is; an internally owned
    /// page that no longer exists is reset to the first page.
    pub fn set_data(&mut self, data: impl Into<TableData<T>>) {
        self.rows = data.into().into_rows();
        self.refresh();
        let page = *self.current_page.get();
        if page > 0 && page >= self.total_pages() && !self.current_page.is_external() {
            self.propose(ConfigProposal {
                current_page: Some(0),
                ..Default::default()
            });
        }
    }

    /// The column schema.
    pub fn columns(&self) -> &[Column<T>] {
        self.registry.columns()
    }

    /// Rows after filtering and sorting.
    pub fn processed_rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.processed.iter().map(move |&i| &self.rows[i])
    }

    /// Number of rows after filtering.
    pub fn filtered_count(&self) -> usize {
        self.processed.len()
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        self.page_indices().iter().map(|&i| &self.rows[i]).collect()
    }

    /// Identities of the rows on the current page.
    pub fn page_row_ids(&self) -> Vec<String> {
        self.page_indices()
            .iter()
            .enumerate()
            .map(|(index, &i)| self.identity(&self.rows[i], index))
            .collect()
    }

    pub(crate) fn page_indices(&self) -> &[usize] {
        paginate::slice(&self.processed, *self.current_page.get(), *self.items_per_page.get())
    }

    pub(crate) fn identity(&self, row: &T, index_on_page: usize) -> String {
        if let Some(row_id) = &self.row_id {
            return row_id(row);
        }
        row.row_id().unwrap_or_else(|| positional_id(index_on_page))
    }

    fn refresh(&mut self) {
        let mut indices = filter::filter_indices(&self.rows, self.registry.columns(), self.search.get());
        let sort = self.sort.get();
        if sort.is_active() {
            if let Some(column) = sort.column.as_deref().and_then(|id| self.registry.column(id)) {
                sort::sort_indices(&self.rows, &mut indices, column, sort.direction);
            }
        }
        trace!(visible = indices.len(), total = self.rows.len(), "Recomputed rows");
        self.processed = indices;
    }

    // ----- Configuration ------------------------------------------------

    /// Current configuration.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            sort: self.sort.get().clone(),
            current_page: *self.current_page.get(),
            items_per_page: *self.items_per_page.get(),
            visible_columns: self.visible.get().clone(),
        }
    }

    /// Apply a gesture's configuration change to the slices the grid owns,
    /// persist what changed and notify the host with the proposed snapshot.
    fn propose(&mut self, proposal: ConfigProposal) {
        let before = self.snapshot();
        let proposed = ConfigSnapshot {
            sort: proposal.sort.clone().unwrap_or_else(|| before.sort.clone()),
            current_page: proposal.current_page.unwrap_or(before.current_page),
            items_per_page: proposal.items_per_page.unwrap_or(before.items_per_page),
            visible_columns: proposal
                .visible_columns
                .clone()
                .unwrap_or_else(|| before.visible_columns.clone()),
        };

        if let Some(sort) = proposal.sort {
            if *self.sort.get() != sort && self.sort.apply_local(sort) {
                self.persistence.save(PersistedSlice::Sort, self.sort.get());
                self.refresh();
            }
        }
        if let Some(visible) = proposal.visible_columns {
            if *self.visible.get() != visible && self.visible.apply_local(visible) {
                self.persistence.save(PersistedSlice::Columns, self.visible.get());
            }
        }
        if let Some(size) = proposal.items_per_page {
            self.items_per_page.apply_local(size);
        }
        if let Some(page) = proposal.current_page {
            self.current_page.apply_local(page);
        }

        if proposed != before {
            debug!(
                sort = ?proposed.sort,
                page = proposed.current_page,
                page_size = proposed.items_per_page,
                "Table configuration changed"
            );
            if let Some(handler) = self.on_config_change.as_mut() {
                handler(&proposed);
            }
        }
    }

    /// Forget persisted preferences and return owned slices to schema
    /// defaults.
    pub fn reset_preferences(&mut self) {
        self.propose(ConfigProposal {
            sort: Some(SortState::default()),
            visible_columns: Some(self.registry.default_visibility()),
            current_page: Some(0),
            ..Default::default()
        });
        self.widths.clear();
        self.persistence.clear();
    }

    // ----- Column registry ----------------------------------------------

    /// Columns currently shown, in schema order.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.registry.visible(self.visible.get())
    }

    /// Visibility per column id.
    pub fn visibility(&self) -> &VisibleColumns {
        self.visible.get()
    }

    /// Flip one column's visibility. Unknown and custom-header columns are
    /// ignored.
    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        let Some(next) = self.registry.toggled(self.visible.get(), column_id) else {
            debug!(column_id, "Ignoring toggle of a non-toggleable column");
            return false;
        };
        self.propose(ConfigProposal {
            visible_columns: Some(next),
            ..Default::default()
        });
        true
    }

    /// Show every toggleable column.
    pub fn show_all_columns(&mut self) {
        let next = self.registry.with_all(self.visible.get(), true);
        self.propose(ConfigProposal {
            visible_columns: Some(next),
            ..Default::default()
        });
    }

    /// Hide every toggleable column.
    pub fn hide_all_columns(&mut self) {
        let next = self.registry.with_all(self.visible.get(), false);
        self.propose(ConfigProposal {
            visible_columns: Some(next),
            ..Default::default()
        });
    }

    /// Mirror host-controlled visibility.
    pub fn sync_visible_columns(&mut self, visible: VisibleColumns) {
        let visible = self.registry.reconcile(&visible);
        if *self.visible.get() != visible && self.visible.sync(visible) {
            self.persistence.save(PersistedSlice::Columns, self.visible.get());
        }
    }

    // ----- Sort ---------------------------------------------------------

    /// Current sort state.
    pub fn sort_state(&self) -> &SortState {
        self.sort.get()
    }

    /// Header click on `column_id`. Returns `false` for unknown or
    /// non-sortable columns, which are ignored.
    pub fn sort_by(&mut self, column_id: &str) -> bool {
        match self.registry.column(column_id) {
            Some(column) if column.is_sortable() => {}
            _ => {
                debug!(column_id, "Ignoring sort on a non-sortable column");
                return false;
            }
        }
        let next = self.sort.get().clicked(column_id);
        self.propose(ConfigProposal {
            sort: Some(next),
            current_page: Some(0),
            ..Default::default()
        });
        true
    }

    /// Keyboard activation of a header cell: `Enter` or `Space` sorts.
    pub fn handle_header_key(&mut self, column_id: &str, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.sort_by(column_id),
            _ => false,
        }
    }

    /// Mirror a host-controlled sort.
    pub fn sync_sort(&mut self, sort: SortState) {
        let sort = sort.normalized();
        if *self.sort.get() != sort && self.sort.sync(sort) {
            self.persistence.save(PersistedSlice::Sort, self.sort.get());
            self.refresh();
        }
    }

    // ----- Filter -------------------------------------------------------

    /// Current search term.
    pub fn search_term(&self) -> &str {
        self.search.get()
    }

    /// Change the search term and return to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if *self.search.get() == term {
            return;
        }
        if !self.search.apply_local(term) {
            debug!("Search term is host-controlled, ignoring local edit");
            return;
        }
        self.refresh();
        self.propose(ConfigProposal {
            current_page: Some(0),
            ..Default::default()
        });
    }

    /// Mirror a host-controlled search term.
    pub fn sync_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if *self.search.get() != term && self.search.sync(term) {
            self.refresh();
        }
    }

    // ----- Pagination ---------------------------------------------------

    /// Zero-based current page.
    pub fn current_page(&self) -> usize {
        *self.current_page.get()
    }

    /// Rows per page.
    pub fn items_per_page(&self) -> usize {
        *self.items_per_page.get()
    }

    /// Number of pages over the filtered rows.
    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.processed.len(), self.items_per_page())
    }

    /// Go to `page`. Pages outside `[0, total_pages)` are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page >= self.total_pages() {
            debug!(page, total_pages = self.total_pages(), "Ignoring out-of-range page");
            return false;
        }
        self.propose(ConfigProposal {
            current_page: Some(page),
            ..Default::default()
        });
        true
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page().saturating_add(1))
    }

    /// Go to the previous page, if any.
    pub fn prev_page(&mut self) -> bool {
        match self.current_page().checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    /// Go to the first page.
    pub fn first_page(&mut self) -> bool {
        self.set_page(0)
    }

    /// Go to the last page.
    pub fn last_page(&mut self) -> bool {
        match self.total_pages().checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    /// Change the page size and return to the first page.
    pub fn set_items_per_page(&mut self, size: usize) -> bool {
        if !is_valid_page_size(size) {
            debug!(size, "Ignoring unsupported page size");
            return false;
        }
        self.propose(ConfigProposal {
            items_per_page: Some(size),
            current_page: Some(0),
            ..Default::default()
        });
        true
    }

    /// Mirror a host-controlled page.
    pub fn sync_current_page(&mut self, page: usize) {
        self.current_page.sync(page);
    }

    /// Mirror a host-controlled page size.
    pub fn sync_items_per_page(&mut self, size: usize) {
        if is_valid_page_size(size) {
            self.items_per_page.sync(size);
        }
    }

    // ----- Selection ----------------------------------------------------

    /// Selected row ids.
    pub fn selected_ids(&self) -> &HashSet<String> {
        self.selection.get().ids()
    }

    /// Check if `row_id` is selected.
    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selection.get().is_selected(row_id)
    }

    /// Header checkbox state for the current page.
    pub fn header_check_state(&self) -> HeaderCheckState {
        self.selection.get().header_state(&self.page_row_ids())
    }

    /// Every row on the current page is selected.
    pub fn all_selected(&self) -> bool {
        self.header_check_state().all_selected
    }

    /// Some, but not all, rows on the current page are selected.
    pub fn some_selected(&self) -> bool {
        self.header_check_state().some_selected
    }

    /// Flip one row's selection.
    pub fn toggle_row(&mut self, row_id: &str) {
        let next = self.selection.get().toggled(row_id);
        self.commit_selection(next);
    }

    /// Header checkbox: `true` adds the current page's rows, `false` clears
    /// the whole selection.
    pub fn select_all(&mut self, checked: bool) {
        let next = self.selection.get().with_all(checked, &self.page_row_ids());
        self.commit_selection(next);
    }

    /// Mirror a host-controlled selection.
    pub fn sync_selected_row_ids(&mut self, ids: HashSet<String>) {
        self.selection.sync(SelectionManager::from_ids(ids));
    }

    fn commit_selection(&mut self, next: SelectionManager) {
        if !self.selectable {
            debug!("Ignoring selection change on a non-selectable grid");
            return;
        }
        if next == *self.selection.get() {
            return;
        }
        if let Some(handler) = self.on_selection_change.as_mut() {
            handler(next.ids());
        }
        self.selection.apply_local(next);
    }

    // ----- Widths -------------------------------------------------------

    /// Resolved width of `column_id`.
    pub fn column_width(&self, column_id: &str) -> Option<ColumnWidth> {
        self.registry
            .column(column_id)
            .map(|c| self.widths.width_for(c))
    }

    /// Explicit widths.
    pub fn column_widths(&self) -> &ColumnWidths {
        self.widths.widths()
    }

    /// Whether a column edge is being dragged.
    pub fn is_resizing(&self) -> bool {
        self.widths.is_resizing()
    }

    /// Start dragging `column_id`. `rendered` holds the on-screen pixel
    /// width of each visible column, which is frozen for the drag.
    pub fn begin_resize(&mut self, column_id: &str, start_x: f64, rendered: &[(String, f64)]) -> bool {
        let started = self.widths.begin_resize(column_id, start_x, rendered);
        if started {
            self.persistence.save(PersistedSlice::Widths, self.widths.widths());
        }
        started
    }

    /// Pointer moved to `current_x` during a drag.
    pub fn drag_resize(&mut self, current_x: f64) -> Option<f64> {
        let width = self.widths.drag_to(current_x)?;
        self.persistence.save(PersistedSlice::Widths, self.widths.widths());
        Some(width)
    }

    /// Pointer released.
    pub fn end_resize(&mut self) -> bool {
        self.widths.end_resize()
    }

    // ----- Rows ---------------------------------------------------------

    /// Mark the row at `index` on the current page as hovered or focused.
    pub fn set_hovered_row(&mut self, index: Option<usize>) {
        self.hovered_row = index;
    }

    /// Click on the row at `index` on the current page.
    pub fn click_row(&mut self, index: usize) -> bool {
        let Some(&row_index) = self.page_indices().get(index) else {
            return false;
        };
        if let Some(handler) = self.on_row_click.as_mut() {
            handler(&self.rows[row_index], index);
        }
        true
    }

    /// Run `action_id` on the row at `index` on the current page. Returns
    /// `false` if the row or action does not exist or the action is disabled
    /// for that row.
    pub fn trigger_row_action(&self, action_id: &str, index: usize) -> bool {
        let Some(&row_index) = self.page_indices().get(index) else {
            return false;
        };
        let Some(action) = self.row_actions.iter().find(|a| a.id == action_id) else {
            debug!(action_id, "Unknown row action");
            return false;
        };
        action.invoke(&self.rows[row_index], index)
    }
}
