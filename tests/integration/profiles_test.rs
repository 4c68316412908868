//! Persona and Contributor Store Integration Tests
//!
//! Full lifecycle over a real temporary tree: create, list, get, update,
//! delete, plus the skip-and-warn listing behavior for corrupt files and
//! markdown round-trip fidelity for every section kind.

use std::fs;
use tempfile::TempDir;

use totem_core::{
    init_project, parse_contributor, parse_persona, serialize_contributor, serialize_persona,
    AppError, Contributor, ContributorStore, DomainContext, Persona, PersonaStore, TotemPaths,
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

fn sample_persona() -> Persona {
    let mut persona = Persona::new("Backend Reviewer");
    persona.description = "Reviews server-side changes.".to_string();
    persona.decision_framework = vec![
        "Prefer boring technology".to_string(),
        "Data integrity over speed".to_string(),
    ];
    persona.code_patterns = vec!["Small pure functions".to_string()];
    persona.requirements_patterns = vec!["Criteria must be testable".to_string()];
    persona.domain_contexts = vec![DomainContext {
        name: "Billing".to_string(),
        notes: vec!["Invoices are immutable".to_string()],
    }];
    persona.review_checklist = vec!["Check error paths".to_string()];
    persona
}

fn sample_contributor() -> Contributor {
    let mut contributor = Contributor::new("Grace Hopper");
    contributor.description = "Compiler pioneer.".to_string();
    contributor.git_profile.username = Some("ghopper".to_string());
    contributor.git_profile.email = Some("grace@example.com".to_string());
    contributor.role = Some("Staff Engineer".to_string());
    contributor.responsibilities = vec!["Owns the build system".to_string()];
    contributor.timezone = Some("UTC-5".to_string());
    contributor.expertise_areas = vec!["Compilers".to_string()];
    contributor
}

// ============================================================================
// Persona store lifecycle
// ============================================================================

#[test]
fn test_persona_store_full_cycle() {
    let (_temp, paths) = project();
    let store = PersonaStore::new(&paths);

    let persona = sample_persona();
    store.create(&persona).unwrap();

    assert!(paths.personas_dir().join("backend-reviewer.md").is_file());
    assert_eq!(store.get("Backend Reviewer").unwrap(), persona);

    let mut updated = persona.clone();
    updated.review_checklist.push("Check log noise".to_string());
    store.update("backend-reviewer", &updated).unwrap();
    assert_eq!(store.get("backend-reviewer").unwrap(), updated);

    store.delete("Backend Reviewer").unwrap();
    assert!(matches!(
        store.get("Backend Reviewer").unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn test_persona_file_round_trips_through_disk() {
    let (_temp, paths) = project();
    let store = PersonaStore::new(&paths);

    let persona = sample_persona();
    store.create(&persona).unwrap();

    let on_disk = fs::read_to_string(paths.personas_dir().join("backend-reviewer.md")).unwrap();
    assert_eq!(parse_persona(&on_disk).unwrap(), persona);
    assert_eq!(serialize_persona(&persona), on_disk);
}

#[test]
fn test_persona_listing_skips_corrupt_files() {
    let (_temp, paths) = project();
    let store = PersonaStore::new(&paths);

    store.create(&sample_persona()).unwrap();
    fs::write(paths.personas_dir().join("corrupt.md"), "## no title\n").unwrap();

    let personas = store.list().unwrap();
    assert_eq!(personas.len(), 1);
    assert_eq!(personas[0].name, "Backend Reviewer");
}

// ============================================================================
// Contributor store lifecycle
// ============================================================================

#[test]
fn test_contributor_store_full_cycle() {
    let (_temp, paths) = project();
    let store = ContributorStore::new(&paths);

    let contributor = sample_contributor();
    store.create(&contributor).unwrap();

    let err = store.create(&contributor).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.http_status(), 409);

    let fetched = store.get("grace-hopper").unwrap();
    assert_eq!(fetched, contributor);
    assert_eq!(fetched.git_profile.username.as_deref(), Some("ghopper"));

    store.delete("grace-hopper").unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_contributor_file_round_trips_through_disk() {
    let (_temp, paths) = project();
    let store = ContributorStore::new(&paths);

    let contributor = sample_contributor();
    store.create(&contributor).unwrap();

    let on_disk = fs::read_to_string(paths.contributors_dir().join("grace-hopper.md")).unwrap();
    assert_eq!(parse_contributor(&on_disk).unwrap(), contributor);
    assert_eq!(serialize_contributor(&contributor), on_disk);
}

#[test]
fn test_contributor_hand_written_file_is_readable() {
    let (_temp, paths) = project();

    fs::write(
        paths.contributors_dir().join("ada.md"),
        "# Ada\n\nWrote the first program.\n\n## Git Profile\n\n- **Username**: ada\n\n## Fun Facts\n\n- Predated the hardware\n",
    )
    .unwrap();

    let store = ContributorStore::new(&paths);
    let ada = store.get("Ada").unwrap();
    assert_eq!(ada.git_profile.username.as_deref(), Some("ada"));
    assert_eq!(ada.fun_facts, vec!["Predated the hardware"]);
    assert!(ada.git_profile.email.is_none());
}
