//! Ticket Store Integration Tests
//!
//! Full lifecycle over a real temporary tree: parse and serialize through
//! the store, listing robustness against corrupt files, filename
//! disambiguation, and the dependency id lists.

use std::fs;
use tempfile::TempDir;

use totem_core::{
    init_project, parse_ticket, AcceptanceCriterion, AppError, Ticket, TicketStore, TotemPaths,
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

fn rich_ticket() -> Ticket {
    let mut ticket = Ticket::new("TOT-CORE-TICKETS-CRUD-001", "Ship the ticket store");
    ticket.status = "in-progress".to_string();
    ticket.priority = "high".to_string();
    ticket.complexity = "large".to_string();
    ticket.persona = Some("backend-reviewer".to_string());
    ticket.collaborator = Some("grace-hopper".to_string());
    ticket.effort_days = Some(2.5);
    ticket.blocks = vec!["TOT-CORE-TICKETS-CRUD-002".to_string()];
    ticket.blocked_by = vec!["TOT-CORE-STORE-PARSING-001".to_string()];
    ticket.description = "Persist tickets as markdown files.".to_string();
    ticket.acceptance_criteria = vec![
        AcceptanceCriterion::new("List returns every parseable ticket"),
        AcceptanceCriterion {
            criteria: "Create writes a slug-named file".to_string(),
            complete: true,
        },
    ];
    ticket.resources = vec!["tickets/format.md".to_string()];
    ticket.risks = vec![
        "Slug collisions between ids".to_string(),
        "Lost updates on concurrent writes".to_string(),
    ];
    ticket.tags = vec!["backend".to_string(), "storage".to_string()];
    ticket
}

// ============================================================================
// Store lifecycle
// ============================================================================

#[test]
fn test_rich_ticket_survives_store_round_trip() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);

    let ticket = rich_ticket();
    store.create(&ticket).unwrap();

    let fetched = store.get("TOT-CORE-TICKETS-CRUD-001").unwrap();
    assert_eq!(fetched, ticket);
    assert!(fetched.acceptance_criteria[1].complete);
    assert_eq!(fetched.risks.len(), 2);
}

#[test]
fn test_ticket_file_on_disk_is_parseable_markdown() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);
    store.create(&rich_ticket()).unwrap();

    let path = paths.tickets_dir().join("tot-core-tickets-crud-001.md");
    let on_disk = fs::read_to_string(&path).unwrap();

    assert!(on_disk.starts_with("```yaml\nid: TOT-CORE-TICKETS-CRUD-001\n"));
    assert!(on_disk.contains("# Ship the ticket store"));
    assert!(on_disk.contains("- [x] Create writes a slug-named file"));
    assert_eq!(parse_ticket(&on_disk).unwrap(), rich_ticket());
}

#[test]
fn test_listing_skips_corrupt_files_and_sorts_by_id() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);

    let mut second = rich_ticket();
    second.id = "TOT-CORE-TICKETS-CRUD-002".to_string();
    store.create(&second).unwrap();
    store.create(&rich_ticket()).unwrap();
    fs::write(paths.tickets_dir().join("scratch.md"), "just notes, no ticket\n").unwrap();

    let ids: Vec<String> = store.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(
        ids,
        vec!["TOT-CORE-TICKETS-CRUD-001", "TOT-CORE-TICKETS-CRUD-002"]
    );
}

#[test]
fn test_update_and_delete_lifecycle() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);

    store.create(&rich_ticket()).unwrap();

    let mut done = rich_ticket();
    done.status = "done".to_string();
    for criterion in &mut done.acceptance_criteria {
        criterion.complete = true;
    }
    store.update("TOT-CORE-TICKETS-CRUD-001", &done).unwrap();

    let fetched = store.get("TOT-CORE-TICKETS-CRUD-001").unwrap();
    assert_eq!(fetched.status, "done");
    assert!(fetched.acceptance_criteria.iter().all(|c| c.complete));

    store.delete("TOT-CORE-TICKETS-CRUD-001").unwrap();
    let err = store.get("TOT-CORE-TICKETS-CRUD-001").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.http_status(), 404);
}

#[test]
fn test_ids_with_same_slug_coexist() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);

    let mut dotted = rich_ticket();
    dotted.id = "TOT.001".to_string();
    let mut dashed = rich_ticket();
    dashed.id = "TOT-001".to_string();

    store.create(&dotted).unwrap();
    store.create(&dashed).unwrap();

    assert!(paths.tickets_dir().join("tot-001.md").is_file());
    assert!(paths.tickets_dir().join("tot-001-01.md").is_file());
    assert_eq!(store.get("TOT.001").unwrap().id, "TOT.001");
    assert_eq!(store.get("TOT-001").unwrap().id, "TOT-001");
}

#[test]
fn test_create_conflicts_and_update_id_guard() {
    let (_temp, paths) = project();
    let store = TicketStore::new(&paths);

    store.create(&rich_ticket()).unwrap();

    let err = store.create(&rich_ticket()).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.http_status(), 409);

    let mut renamed = rich_ticket();
    renamed.id = "TOT-OTHER-001".to_string();
    let err = store
        .update("TOT-CORE-TICKETS-CRUD-001", &renamed)
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.http_status(), 400);
}
