//! Integration tests for class conflict rules over the built-in catalog

use arcanum::classes::ConflictKind;
use arcanum::content::{builtin, Catalogs};
use arcanum::core::types::ClassId;

fn id(name: &str) -> ClassId {
    ClassId::from(name)
}

/// Test 1: Registered exclusivity blocks in both directions
#[test]
fn test_exclusivity_symmetric_over_builtins() {
    let catalogs = Catalogs::with_builtins();

    let wizard = id(builtin::WIZARD);
    let muggle = id(builtin::MUGGLE);

    assert!(!catalogs
        .conflicts
        .can_add(&catalogs.classes, &muggle, &[wizard.clone()]));
    assert!(!catalogs
        .conflicts
        .can_add(&catalogs.classes, &wizard, &[muggle.clone()]));
}

/// Test 2: A class can never be added twice
#[test]
fn test_duplicate_blocked() {
    let catalogs = Catalogs::with_builtins();
    let auror = id(builtin::AUROR);

    assert!(!catalogs
        .conflicts
        .can_add(&catalogs.classes, &auror, &[auror.clone()]));
    assert_eq!(
        catalogs.conflicts.classify(&catalogs.classes, &auror, &auror),
        ConflictKind::Duplicate
    );
}

/// Test 3: Two Organization classes block with no registered pair
#[test]
fn test_singleton_category_blocks_without_registration() {
    let catalogs = Catalogs::with_builtins();
    let ministry = id(builtin::MINISTRY_EMPLOYEE);
    let order = id(builtin::ORDER_MEMBER);

    assert!(!catalogs.conflicts.is_explicitly_exclusive(&ministry, &order));
    assert!(!catalogs
        .conflicts
        .can_add(&catalogs.classes, &order, &[ministry.clone()]));
    assert_eq!(
        catalogs.conflicts.classify(&catalogs.classes, &ministry, &order),
        ConflictKind::MutuallyExclusive
    );
}

/// Test 4: Auror and dark wizard are compatible but flagged
#[test]
fn test_soft_conflict_allows_but_flags() {
    let catalogs = Catalogs::with_builtins();
    let auror = id(builtin::AUROR);
    let dark_wizard = id(builtin::DARK_WIZARD);

    assert!(catalogs
        .conflicts
        .can_add(&catalogs.classes, &dark_wizard, &[auror.clone()]));
    assert_eq!(
        catalogs
            .conflicts
            .classify(&catalogs.classes, &auror, &dark_wizard),
        ConflictKind::ConflictingAbilities
    );
}

/// Test 5: Diagnostics name exactly the members that block
#[test]
fn test_conflicting_members_diagnostic() {
    let catalogs = Catalogs::with_builtins();
    let held = [id(builtin::AUROR)];

    let blockers =
        catalogs
            .conflicts
            .conflicting_members(&catalogs.classes, &id(builtin::DEATH_EATER), &held);
    assert_eq!(blockers, vec![id(builtin::AUROR)]);

    // A compatible candidate reports no blockers against the same holding
    let blockers =
        catalogs
            .conflicts
            .conflicting_members(&catalogs.classes, &id(builtin::HEALER), &held);
    assert!(blockers.is_empty());
}

/// Test 6: Cross-category exclusivity works alongside category rules
#[test]
fn test_cross_category_exclusive_pair() {
    let catalogs = Catalogs::with_builtins();

    // auror (Role) vs death_eater (Organization) is a registered pair
    assert!(catalogs
        .conflicts
        .is_explicitly_exclusive(&id(builtin::AUROR), &id(builtin::DEATH_EATER)));

    // but auror happily joins a different organization
    assert!(catalogs.conflicts.can_add(
        &catalogs.classes,
        &id(builtin::MINISTRY_EMPLOYEE),
        &[id(builtin::AUROR)]
    ));
}

/// Test 7: The none sentinel can never join a holding
#[test]
fn test_sentinel_never_grantable() {
    let catalogs = Catalogs::with_builtins();
    assert!(!catalogs
        .conflicts
        .can_add(&catalogs.classes, &ClassId::none(), &[]));
}

/// Test 8: A legal multi-class build passes every guard
#[test]
fn test_legal_build_accumulates() {
    let catalogs = Catalogs::with_builtins();
    let mut held: Vec<ClassId> = Vec::new();

    for name in [
        builtin::WIZARD,
        builtin::AUROR,
        builtin::ANIMAGUS,
        builtin::MINISTRY_EMPLOYEE,
        builtin::HALF_BLOOD,
        builtin::LIGHT,
    ] {
        let candidate = id(name);
        assert!(
            catalogs.conflicts.can_add(&catalogs.classes, &candidate, &held),
            "{} should be addable",
            name
        );
        held.push(candidate);
    }
    assert_eq!(held.len(), 6);
}

/// Test 9: The sample extension pack layers onto the builtins
#[test]
fn test_extension_pack_layers_on_builtins() {
    let pack = std::path::Path::new("data/extensions/quidditch.toml");
    if !pack.exists() {
        return;
    }

    let mut catalogs = Catalogs::with_builtins();
    let summary = catalogs.load_extension_file(pack).unwrap();
    assert_eq!(summary.name, "quidditch");
    assert_eq!(summary.classes, 2);

    let player = id("quidditch_player");
    let referee = id("quidditch_referee");

    assert_eq!(
        catalogs.conflicts.classify(&catalogs.classes, &player, &referee),
        ConflictKind::MutuallyExclusive
    );
    assert_eq!(
        catalogs
            .conflicts
            .classify(&catalogs.classes, &player, &id(builtin::PROFESSOR)),
        ConflictKind::ConflictingAbilities
    );
    // Pack roles join the Role category rules like any built-in
    assert!(catalogs
        .conflicts
        .can_add(&catalogs.classes, &player, &[id(builtin::STUDENT)]));
}
