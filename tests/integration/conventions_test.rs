//! Convention Store Integration Tests
//!
//! Exercises the keyed convention stores and the prefix scalar against a
//! real bootstrapped directory tree:
//! - regenerate discipline (status, priority, complexity)
//! - splice discipline and section isolation (layer, component, feature)
//! - case-insensitive keys, conflicts, and error-to-status mapping
//! - prefix sanitization rules

use std::fs;
use tempfile::TempDir;

use totem_core::{
    init_project, AppError, ConventionEntry, ConventionKind, ConventionStore, EntryUpdate,
    PrefixStore, TotemPaths,
};

// ============================================================================
// Helpers
// ============================================================================

fn project() -> (TempDir, TotemPaths) {
    let temp = TempDir::new().unwrap();
    let paths = TotemPaths::new(temp.path());
    init_project(&paths).unwrap();
    (temp, paths)
}

// ============================================================================
// Regenerate discipline (status, priority, complexity)
// ============================================================================

#[test]
fn test_status_lookup_is_case_insensitive_with_stored_casing() {
    let (_temp, paths) = project();
    fs::write(
        paths.convention_file(ConventionKind::Status),
        "# status\n\nStatuses a ticket can be in.\n\n- **open** - Ready for work, not started\n- **done** - Completed and deployed\n",
    )
    .unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Status);
    let entry = store.get_by_key("OPEN").unwrap();
    assert_eq!(entry.key, "open");
    assert_eq!(entry.description, "Ready for work, not started");
}

#[test]
fn test_update_with_rename_rewrites_the_matched_line() {
    let (_temp, paths) = project();
    fs::write(
        paths.convention_file(ConventionKind::Status),
        "# status\n\nStatuses a ticket can be in.\n\n- **open** - Ready for work, not started\n- **done** - Completed and deployed\n",
    )
    .unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Status);
    store
        .update("open", &EntryUpdate::rename("Work started", "inprogress"))
        .unwrap();

    let content = fs::read_to_string(paths.convention_file(ConventionKind::Status)).unwrap();
    assert!(content.contains("- **inprogress** - Work started"));
    assert!(!content.contains("**open**"));

    let keys: Vec<String> = store.get_all().unwrap().into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["inprogress", "done"]);
}

#[test]
fn test_add_then_get_all_round_trips_order_and_content() {
    let (_temp, paths) = project();
    let store = ConventionStore::new(&paths, ConventionKind::Priority);

    store.add(&ConventionEntry::new("urgent", "Same day")).unwrap();
    store.add(&ConventionEntry::new("someday", "No deadline")).unwrap();

    let entries = store.get_all().unwrap();
    let tail: Vec<(&str, &str)> = entries
        .iter()
        .rev()
        .take(2)
        .rev()
        .map(|e| (e.key.as_str(), e.description.as_str()))
        .collect();
    assert_eq!(tail, vec![("urgent", "Same day"), ("someday", "No deadline")]);
}

#[test]
fn test_regenerated_file_discards_stray_prose_on_write() {
    let (_temp, paths) = project();
    let file = paths.convention_file(ConventionKind::Complexity);
    fs::write(
        &file,
        "# complexity\n\nOld intro.\n\nStray paragraph someone added.\n\n- **small** - Hours of work\n",
    )
    .unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Complexity);
    store.add(&ConventionEntry::new("epic", "Weeks of work")).unwrap();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.starts_with("# complexity\n\nComplexity levels used to size work.\n"));
    assert!(!content.contains("Stray paragraph"));
    assert!(content.contains("- **small** - Hours of work\n- **epic** - Weeks of work\n"));
}

// ============================================================================
// Splice discipline and section isolation (layer, component, feature)
// ============================================================================

const ID_FILE: &str = "# Id\n\nConventions used to compose ticket ids.\n\n## Prefix\n\nTOT\n\n## Layer\n\n- **api** - Edge handlers\n- **core** - Domain logic\n\n## Component\n\n- **tickets** - Ticket records\n\n## Feature\n\n- **crud** - Create, read, update, delete\n";

#[test]
fn test_layer_mutations_never_touch_sibling_sections() {
    let (_temp, paths) = project();
    fs::write(paths.id_file(), ID_FILE).unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Layer);
    store.add(&ConventionEntry::new("ui", "Frontend")).unwrap();
    store
        .update("api", &EntryUpdate::description("HTTP boundary"))
        .unwrap();
    store.delete("core").unwrap();

    let content = fs::read_to_string(paths.id_file()).unwrap();
    assert!(content.starts_with("# Id\n\nConventions used to compose ticket ids.\n\n## Prefix\n\nTOT\n"));
    assert!(content.contains("## Component\n\n- **tickets** - Ticket records\n"));
    assert!(content.ends_with("## Feature\n\n- **crud** - Create, read, update, delete\n"));
    assert!(content.contains("- **api** - HTTP boundary\n- **ui** - Frontend\n"));
    assert!(!content.contains("**core**"));
}

#[test]
fn test_each_splice_kind_reads_only_its_own_section() {
    let (_temp, paths) = project();
    fs::write(paths.id_file(), ID_FILE).unwrap();

    let layers = ConventionStore::new(&paths, ConventionKind::Layer).get_all().unwrap();
    let components = ConventionStore::new(&paths, ConventionKind::Component).get_all().unwrap();
    let features = ConventionStore::new(&paths, ConventionKind::Feature).get_all().unwrap();

    assert_eq!(layers.len(), 2);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].key, "tickets");
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].key, "crud");
}

#[test]
fn test_empty_section_is_found_but_empty() {
    let (_temp, paths) = project();
    fs::write(paths.id_file(), "# Id\n\n## Prefix\n\nTOT\n\n## Layer\n\n## Component\n").unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Layer);
    assert!(store.get_all().unwrap().is_empty());
}

// ============================================================================
// Error taxonomy and HTTP mapping
// ============================================================================

#[test]
fn test_duplicate_add_is_conflict_and_maps_to_409() {
    let (_temp, paths) = project();
    let store = ConventionStore::new(&paths, ConventionKind::Status);

    let err = store
        .add(&ConventionEntry::new("OPEN", "Duplicate of the seeded key"))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.http_status(), 409);
}

#[test]
fn test_unencodable_key_is_rejected_up_front() {
    let (_temp, paths) = project();
    let store = ConventionStore::new(&paths, ConventionKind::Status);

    let err = store
        .add(&ConventionEntry::new("hot*fix", "Fast patch"))
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.http_status(), 400);

    // a retry fails the same way instead of appending a second invisible line
    let err = store
        .add(&ConventionEntry::new("hot*fix", "Fast patch"))
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    assert!(matches!(
        store.get_by_key("hot*fix").unwrap_err(),
        AppError::NotFound(_)
    ));
    let content = fs::read_to_string(paths.convention_file(ConventionKind::Status)).unwrap();
    assert!(!content.contains("hot*fix"));
}

#[test]
fn test_multiline_description_cannot_plant_extra_entries() {
    let (_temp, paths) = project();
    fs::write(paths.id_file(), ID_FILE).unwrap();

    let store = ConventionStore::new(&paths, ConventionKind::Layer);
    let err = store
        .add(&ConventionEntry::new(
            "cache",
            "Fast lookups\n- **ghost** - Planted",
        ))
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let keys: Vec<String> = store.get_all().unwrap().into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["api", "core"]);
    // the rejected write leaves the shared file byte-identical
    assert_eq!(fs::read_to_string(paths.id_file()).unwrap(), ID_FILE);
}

#[test]
fn test_delete_then_get_maps_to_404() {
    let (_temp, paths) = project();
    let store = ConventionStore::new(&paths, ConventionKind::Status);

    store.delete("blocked").unwrap();
    let err = store.get_by_key("blocked").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.http_status(), 404);
}

#[test]
fn test_missing_file_and_missing_section_are_distinct_404s() {
    let temp = TempDir::new().unwrap();
    let paths = TotemPaths::new(temp.path());

    let err = ConventionStore::new(&paths, ConventionKind::Status)
        .get_all()
        .unwrap_err();
    assert!(matches!(err, AppError::FileNotFound(_)));

    init_project(&paths).unwrap();
    fs::write(paths.id_file(), "# Id\n\n## Prefix\n\nTOT\n").unwrap();
    let err = ConventionStore::new(&paths, ConventionKind::Feature)
        .get_all()
        .unwrap_err();
    assert!(matches!(err, AppError::SectionNotFound(_)));
    assert_eq!(err.http_status(), 404);
}

#[test]
fn test_rename_onto_existing_key_is_rejected() {
    let (_temp, paths) = project();
    let store = ConventionStore::new(&paths, ConventionKind::Status);

    let err = store
        .update("open", &EntryUpdate::rename("Finished", "done"))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // the failed rename must leave the file unchanged
    assert!(store.get_by_key("open").is_ok());
    assert!(store.get_by_key("done").is_ok());
}

// ============================================================================
// Prefix scalar
// ============================================================================

#[test]
fn test_prefix_set_and_get_uppercase() {
    let (_temp, paths) = project();
    let store = PrefixStore::new(&paths);

    assert_eq!(store.get().unwrap(), "TOT");
    assert_eq!(store.set("abcdef").unwrap(), "ABCDEF");
    assert_eq!(store.get().unwrap(), "ABCDEF");
}

#[test]
fn test_prefix_rejects_whitespace_and_overlong_input() {
    let (_temp, paths) = project();
    let store = PrefixStore::new(&paths);

    let err = store.set("ab c!@#").unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.http_status(), 400);

    let err = store.set("longprefixname").unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // failed sets leave the stored prefix alone
    assert_eq!(store.get().unwrap(), "TOT");
}

#[test]
fn test_prefix_set_does_not_disturb_sections() {
    let (_temp, paths) = project();
    fs::write(paths.id_file(), ID_FILE).unwrap();

    PrefixStore::new(&paths).set("NEW").unwrap();

    let content = fs::read_to_string(paths.id_file()).unwrap();
    assert!(content.contains("## Prefix\n\nNEW\n"));
    assert!(content.contains("## Layer\n\n- **api** - Edge handlers\n- **core** - Domain logic\n"));
}
