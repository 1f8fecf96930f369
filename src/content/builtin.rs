//! Built-in wizarding class and ability catalog
//!
//! Installed by `Catalogs::with_builtins`. Extension packs layer on top
//! of this baseline and may re-tune individual grants.

use crate::abilities::{Ability, AbilityKind};
use crate::classes::{Category, ClassDefinition};
use crate::content::catalogs::Catalogs;
use crate::core::types::ClassId;

// Base
pub const WIZARD: &str = "wizard";
pub const MUGGLE: &str = "muggle";
pub const SQUIB: &str = "squib";

// Transformation
pub const WEREWOLF: &str = "werewolf";
pub const ANIMAGUS: &str = "animagus";
pub const VAMPIRE: &str = "vampire";

// Role
pub const STUDENT: &str = "student";
pub const PROFESSOR: &str = "professor";
pub const AUROR: &str = "auror";
pub const DARK_WIZARD: &str = "dark_wizard";
pub const HEALER: &str = "healer";

// Organization (singleton category)
pub const DEATH_EATER: &str = "death_eater";
pub const ORDER_MEMBER: &str = "order_member";
pub const MINISTRY_EMPLOYEE: &str = "ministry_employee";

// BloodStatus (singleton category)
pub const PURE_BLOOD: &str = "pure_blood";
pub const HALF_BLOOD: &str = "half_blood";
pub const MUGGLE_BORN: &str = "muggle_born";

// Alignment
pub const LIGHT: &str = "light";
pub const DARK: &str = "dark";

/// Install the built-in catalog into a build-phase surface
pub(crate) fn install(catalogs: &mut Catalogs) {
    install_classes(catalogs);
    install_conflicts(catalogs);
    install_abilities(catalogs);
}

fn install_classes(catalogs: &mut Catalogs) {
    let defs = [
        ClassDefinition::new(WIZARD, "Wizard", Category::Base)
            .with_description("A trained magic user"),
        ClassDefinition::new(MUGGLE, "Muggle", Category::Base)
            .with_description("No magical ability whatsoever"),
        ClassDefinition::new(SQUIB, "Squib", Category::Base)
            .with_description("Magical parentage, no spellwork"),
        ClassDefinition::new(WEREWOLF, "Werewolf", Category::Transformation),
        ClassDefinition::new(ANIMAGUS, "Animagus", Category::Transformation)
            .with_description("Transforms into an animal at will"),
        ClassDefinition::new(VAMPIRE, "Vampire", Category::Transformation),
        ClassDefinition::new(STUDENT, "Student", Category::Role),
        ClassDefinition::new(PROFESSOR, "Professor", Category::Role),
        ClassDefinition::new(AUROR, "Auror", Category::Role)
            .with_description("Dark wizard catcher"),
        ClassDefinition::new(DARK_WIZARD, "Dark Wizard", Category::Role),
        ClassDefinition::new(HEALER, "Healer", Category::Role),
        ClassDefinition::new(DEATH_EATER, "Death Eater", Category::Organization),
        ClassDefinition::new(ORDER_MEMBER, "Order Member", Category::Organization)
            .with_description("Member of the Order of the Phoenix"),
        ClassDefinition::new(MINISTRY_EMPLOYEE, "Ministry Employee", Category::Organization),
        ClassDefinition::new(PURE_BLOOD, "Pure-blood", Category::BloodStatus),
        ClassDefinition::new(HALF_BLOOD, "Half-blood", Category::BloodStatus),
        ClassDefinition::new(MUGGLE_BORN, "Muggle-born", Category::BloodStatus),
        ClassDefinition::new(LIGHT, "Light", Category::Alignment),
        ClassDefinition::new(DARK, "Dark", Category::Alignment),
    ];

    for def in defs {
        catalogs.register_class(def);
    }
}

fn install_conflicts(catalogs: &mut Catalogs) {
    // Hard pairs. Organization and BloodStatus members exclude each other
    // by category already and are not listed.
    let exclusive = [
        (WIZARD, MUGGLE),
        (WIZARD, SQUIB),
        (MUGGLE, SQUIB),
        (WEREWOLF, VAMPIRE),
        (STUDENT, PROFESSOR),
        (DEATH_EATER, ORDER_MEMBER),
        (AUROR, DEATH_EATER),
        (LIGHT, DARK),
    ];
    for (a, b) in exclusive {
        catalogs.register_mutually_exclusive(ClassId::from(a), ClassId::from(b));
    }

    // Soft pairs: holdable together, grants collide
    let soft = [(AUROR, DARK_WIZARD)];
    for (a, b) in soft {
        catalogs.register_conflicting_abilities(ClassId::from(a), ClassId::from(b));
    }
}

fn install_abilities(catalogs: &mut Catalogs) {
    use AbilityKind::{Active, Passive, Permission, StatModifier};

    let grants = [
        (WIZARD, Ability::new("spellcasting", "Spellcasting", Permission, 10)),
        (WIZARD, Ability::new("apparition", "Apparition", Permission, 10)),
        (WIZARD, Ability::new("broom_flight", "Broom Flight", Active, 10)),
        (SQUIB, Ability::new("magical_sight", "Magical Sight", Passive, 10)),
        (
            STUDENT,
            Ability::new("spellcasting", "Spellcasting", Permission, 5)
                .with_description("Supervised spellwork only")
                .with_property("trace", "true"),
        ),
        (STUDENT, Ability::new("hogwarts_access", "Hogwarts Access", Permission, 10)),
        (
            PROFESSOR,
            Ability::new("hogwarts_access", "Hogwarts Access", Permission, 20)
                .with_property("clearance", "staff"),
        ),
        (PROFESSOR, Ability::new("award_points", "Award Points", Active, 10)),
        (
            PROFESSOR,
            Ability::new("floo_network_access", "Floo Network Access", Permission, 10),
        ),
        (
            AUROR,
            Ability::new("apparition", "Apparition", Permission, 20)
                .with_property("restricted_zones", "true"),
        ),
        (AUROR, Ability::new("track_dark_magic", "Track Dark Magic", Active, 10)),
        (
            DARK_WIZARD,
            Ability::new("unforgivable_curses", "Unforgivable Curses", Permission, 10),
        ),
        (DARK_WIZARD, Ability::new("dark_arts", "Dark Arts", Active, 10)),
        (HEALER, Ability::new("mend_wounds", "Mend Wounds", Active, 10)),
        (DEATH_EATER, Ability::new("dark_mark", "Dark Mark", Passive, 10)),
        (
            DEATH_EATER,
            Ability::new("unforgivable_curses", "Unforgivable Curses", Permission, 20),
        ),
        (ORDER_MEMBER, Ability::new("secret_keeper", "Secret Keeper", Permission, 10)),
        (
            MINISTRY_EMPLOYEE,
            Ability::new("ministry_clearance", "Ministry Clearance", Permission, 10),
        ),
        (
            MINISTRY_EMPLOYEE,
            Ability::new("floo_network_access", "Floo Network Access", Permission, 10),
        ),
        (
            WEREWOLF,
            Ability::new("night_form", "Night Form", StatModifier, 10)
                .with_property("strength_bonus", "4"),
        ),
        (WEREWOLF, Ability::new("beast_senses", "Beast Senses", Passive, 10)),
        (ANIMAGUS, Ability::new("animal_form", "Animal Form", Active, 10)),
        (
            VAMPIRE,
            Ability::new("night_form", "Night Form", StatModifier, 20)
                .with_property("strength_bonus", "6"),
        ),
        (LIGHT, Ability::new("patronus_affinity", "Patronus Affinity", Passive, 10)),
        (DARK, Ability::new("dark_arts_affinity", "Dark Arts Affinity", Passive, 10)),
    ];

    for (class, ability) in grants {
        catalogs.register_ability(ClassId::from(class), ability);
    }
}
