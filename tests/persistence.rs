//! Preference persistence across grid instances.

use std::fs;
use std::rc::Rc;

use serde_json::{json, Value};
use taskgrid::grid::{
    Column, ColumnWidth, DataGrid, DisabledStorage, FileStorage, GridOptions, MemoryStorage,
    SortState, Storage,
};
use tempfile::tempdir;

fn rows() -> Vec<Value> {
    (0..8)
        .map(|i| json!({"id": i, "title": format!("Item {}", i), "owner": "ops", "due": null}))
        .collect()
}

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::new("title", "Title").sortable().searchable(),
        Column::new("owner", "Owner").sortable(),
        Column::new("due", "Due").sortable().hidden(),
    ]
}

fn customize(grid: &mut DataGrid<Value>) {
    grid.sort_by("owner");
    grid.sort_by("owner");
    grid.toggle_column("due");
    grid.toggle_column("title");
    let rendered = vec![("owner".to_string(), 150.0), ("due".to_string(), 120.0)];
    assert!(grid.begin_resize("owner", 10.0, &rendered));
    grid.drag_resize(60.0);
    grid.end_resize();
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempdir().unwrap();
    let mut grid = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks").storage(FileStorage::new(dir.path())),
    )
    .unwrap();
    customize(&mut grid);
    let expected = (
        grid.sort_state().clone(),
        grid.visibility().clone(),
        grid.column_widths().clone(),
    );

    let reloaded = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks").storage(FileStorage::new(dir.path())),
    )
    .unwrap();
    assert_eq!(reloaded.sort_state(), &expected.0);
    assert_eq!(reloaded.visibility(), &expected.1);
    assert_eq!(reloaded.column_widths(), &expected.2);

    assert_eq!(reloaded.sort_state(), &SortState::desc("owner"));
    assert_eq!(reloaded.column_widths()["owner"], ColumnWidth::Px(200.0));
    assert_eq!(reloaded.column_widths()["due"], ColumnWidth::Px(120.0));
    let visible: Vec<&str> = reloaded.visible_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(visible, vec!["owner", "due"]);
}

#[test]
fn test_keys_are_namespaced_per_table() {
    let storage = MemoryStorage::new();
    let mut first = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("first").namespace("acme").storage(storage.clone()),
    )
    .unwrap();
    first.sort_by("title");

    assert!(storage.get_item("acme.first.sort").unwrap().is_some());
    assert!(storage.get_item("datagrid.first.sort").unwrap().is_none());

    let second = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("second").namespace("acme").storage(storage),
    )
    .unwrap();
    assert_eq!(second.sort_state(), &SortState::default());
}

#[test]
fn test_file_names_follow_keys() {
    let dir = tempdir().unwrap();
    let mut grid = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks").storage(FileStorage::new(dir.path())),
    )
    .unwrap();
    grid.sort_by("title");

    let raw = fs::read_to_string(dir.path().join("datagrid.tasks.sort.json")).unwrap();
    let stored: SortState = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, SortState::asc("title"));
}

#[test]
fn test_corrupt_preferences_fall_back_to_defaults() {
    let storage = MemoryStorage::new();
    storage.set_item("datagrid.tasks.sort", "{not json").unwrap();
    storage.set_item("datagrid.tasks.columns", "[1,2,3]").unwrap();
    storage.set_item("datagrid.tasks.widths", r#"{"title": 42}"#).unwrap();

    let grid = DataGrid::new(rows(), columns(), GridOptions::new("tasks").storage(storage)).unwrap();
    assert_eq!(grid.sort_state(), &SortState::default());
    assert_eq!(grid.visible_columns().len(), 2);
    assert!(grid.column_widths().is_empty());
}

#[test]
fn test_disabled_storage_never_blocks_gestures() {
    let mut grid = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks").storage(DisabledStorage),
    )
    .unwrap();
    customize(&mut grid);
    assert_eq!(grid.sort_state(), &SortState::desc("owner"));
    assert_eq!(grid.column_width("owner"), Some(ColumnWidth::Px(200.0)));
    grid.reset_preferences();
    assert_eq!(grid.sort_state(), &SortState::default());
}

#[test]
fn test_selection_and_pagination_are_not_persisted() {
    let storage = MemoryStorage::new();
    let shared: Rc<dyn Storage> = Rc::new(storage.clone());
    let mut grid = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks").shared_storage(Rc::clone(&shared)),
    )
    .unwrap();
    grid.set_items_per_page(5);
    grid.set_page(1);
    grid.toggle_row("3");
    assert!(storage.is_empty());

    let reloaded = DataGrid::new(rows(), columns(), GridOptions::new("tasks").shared_storage(shared)).unwrap();
    assert_eq!(reloaded.current_page(), 0);
    assert_eq!(reloaded.items_per_page(), 10);
    assert!(reloaded.selected_ids().is_empty());
}

#[test]
fn test_controlled_visibility_still_persists_effective_value() {
    let storage = MemoryStorage::new();
    let mut grid = DataGrid::new(
        rows(),
        columns(),
        GridOptions::new("tasks")
            .storage(storage.clone())
            .controlled_visible_columns(Default::default()),
    )
    .unwrap();
    grid.toggle_column("title");
    assert!(storage.get_item("datagrid.tasks.columns").unwrap().is_none());

    let mut next = grid.visibility().clone();
    next.insert("title".into(), false);
    grid.sync_visible_columns(next);
    let raw = storage.get_item("datagrid.tasks.columns").unwrap().unwrap();
    assert!(raw.contains(r#""title":false"#));
}
