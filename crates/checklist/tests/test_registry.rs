use checklist::{TaskRegistry, CHECKED_PREFIX, UNCHECKED_PREFIX};
use uuid::Uuid;

#[test]
fn add_appends_unchecked_in_order() {
    let mut registry = TaskRegistry::default();
    registry.add("first").unwrap();
    registry.add("second").unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.tasks()[0].text, "first");
    assert_eq!(registry.tasks()[1].text, "second");
    assert!(registry.tasks().iter().all(|task| !task.completed));
}

#[test]
fn blank_text_is_rejected() {
    let mut registry = TaskRegistry::default();
    assert!(registry.add("").is_none());
    assert!(registry.add("   ").is_none());
    assert!(registry.add("\t\n").is_none());
    assert!(registry.is_empty());
}

#[test]
fn add_trims_surrounding_whitespace() {
    let mut registry = TaskRegistry::default();
    registry.add("  padded  ").unwrap();
    assert_eq!(registry.tasks()[0].text, "padded");
}

#[test]
fn remove_deletes_only_the_addressed_task() {
    let mut registry = TaskRegistry::default();
    let first = registry.add("first").unwrap();
    registry.add("second").unwrap();

    assert!(registry.remove(first));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.tasks()[0].text, "second");
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let mut registry = TaskRegistry::default();
    registry.add("only").unwrap();

    assert!(!registry.remove(Uuid::new_v4()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn toggle_flips_and_reports_the_new_state() {
    let mut registry = TaskRegistry::default();
    let id = registry.add("flip me").unwrap();

    assert_eq!(registry.toggle(id), Some(true));
    assert!(registry.tasks()[0].completed);
    assert_eq!(registry.toggle(id), Some(false));
    assert!(!registry.tasks()[0].completed);
}

#[test]
fn toggle_unknown_id_is_a_noop() {
    let mut registry = TaskRegistry::default();
    registry.add("only").unwrap();

    assert_eq!(registry.toggle(Uuid::new_v4()), None);
    assert!(!registry.tasks()[0].completed);
}

#[test]
fn render_lines_prefixes_by_completion() {
    let mut registry = TaskRegistry::default();
    registry.add("done").unwrap();
    let pending = registry.add("pending").unwrap();
    let done = registry.tasks()[0].id;
    registry.toggle(done).unwrap();

    let lines = registry.render_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{CHECKED_PREFIX}done"));
    assert_eq!(lines[1], format!("{UNCHECKED_PREFIX}pending"));

    // Order tracks the registry, not mutation order.
    registry.remove(pending);
    assert_eq!(registry.render_lines(), vec![format!("{CHECKED_PREFIX}done")]);
}

#[test]
fn append_lines_counts_only_non_blank_lines() {
    let mut registry = TaskRegistry::default();
    let appended = registry.append_lines(["Week 1: read chapter 1", "", "Week 2: practice"]);

    assert_eq!(appended, 2);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.tasks()[0].text, "Week 1: read chapter 1");
    assert_eq!(registry.tasks()[1].text, "Week 2: practice");
}
