use checklist::{StoreError, Task, TaskStore};

#[test]
fn missing_file_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("checklist_data.json"));

    let tasks = store.load().unwrap();
    assert!(tasks.is_empty());
}

#[test]
fn save_then_load_round_trips_text_order_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("checklist_data.json"));

    let mut tasks = vec![
        Task::new("Week 1: read chapter 1"),
        Task::new("Week 2: practice"),
        Task::new("Week 3: review"),
    ];
    tasks[1].completed = true;

    store.save(&tasks).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.len(), tasks.len());
    for (loaded, original) in loaded.iter().zip(&tasks) {
        assert_eq!(loaded.text, original.text);
        assert_eq!(loaded.completed, original.completed);
    }

    // Second cycle through the same file stays stable.
    store.save(&loaded).unwrap();
    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.len(), tasks.len());
    assert_eq!(reloaded[1].text, "Week 2: practice");
    assert!(reloaded[1].completed);
}

#[test]
fn persisted_document_is_the_plain_wire_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("checklist_data.json"));

    store.save(&[Task::new("only")]).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, r#"[{"task":"only","completed":false}]"#);
}

#[test]
fn save_overwrites_the_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("checklist_data.json"));

    store
        .save(&[Task::new("one"), Task::new("two")])
        .unwrap();
    store.save(&[Task::new("three")]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].text, "three");
}

#[test]
fn malformed_document_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checklist_data.json");
    std::fs::write(&path, "{not a task list").unwrap();

    let store = TaskStore::new(&path);
    match store.load() {
        Err(StoreError::Parse { path: errored, .. }) => assert_eq!(errored, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn store_error_display_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checklist_data.json");
    std::fs::write(&path, "[]garbage").unwrap();

    let err = TaskStore::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("checklist_data.json"));
}
