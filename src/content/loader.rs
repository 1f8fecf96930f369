//! Extension pack loading
//!
//! Packs are TOML files registering new classes, conflict relations and
//! ability grants during the build phase. A pack is validated as a whole
//! before anything is applied, so a bad file never leaves the catalogs
//! half-updated.
//!
//! Format:
//!
//! ```toml
//! name = "quidditch"
//!
//! [[classes]]
//! id = "quidditch_player"
//! display_name = "Quidditch Player"
//! category = "role"
//!
//! [[exclusive]]
//! a = "quidditch_player"
//! b = "quidditch_referee"
//!
//! [[abilities]]
//! class = "quidditch_player"
//! id = "broom_flight"
//! name = "Broom Flight"
//! kind = "active"
//! priority = 20
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::abilities::{Ability, AbilityKind};
use crate::classes::ClassDefinition;
use crate::content::catalogs::Catalogs;
use crate::core::error::{ArcanumError, Result};
use crate::core::types::{AbilityId, ClassId};

#[derive(Debug, Deserialize)]
struct PackFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    classes: Vec<ClassDefinition>,
    #[serde(default)]
    exclusive: Vec<PairEntry>,
    #[serde(default)]
    soft: Vec<PairEntry>,
    #[serde(default)]
    abilities: Vec<GrantEntry>,
}

#[derive(Debug, Deserialize)]
struct PairEntry {
    a: ClassId,
    b: ClassId,
}

#[derive(Debug, Deserialize)]
struct GrantEntry {
    class: ClassId,
    id: AbilityId,
    name: String,
    #[serde(default)]
    description: String,
    kind: AbilityKind,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    properties: HashMap<String, String>,
}

/// What one pack contributed, for logging and the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub name: String,
    pub classes: usize,
    pub conflicts: usize,
    pub grants: usize,
}

/// Load one extension pack into a build-phase surface
pub fn load_pack_file(catalogs: &mut Catalogs, path: &Path) -> Result<PackSummary> {
    let content = std::fs::read_to_string(path)?;
    let pack: PackFile = toml::from_str(&content).map_err(|e| ArcanumError::PackParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let name = pack.name.clone().unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pack".to_string())
    });

    apply_pack(catalogs, pack, &name)
}

/// Load every .toml pack under a directory, recursively
///
/// Files load in path order so that overwrites between packs are
/// deterministic. A missing directory means no packs.
pub fn load_pack_dir(catalogs: &mut Catalogs, dir: &Path) -> Result<Vec<PackSummary>> {
    let mut summaries = Vec::new();
    if !dir.exists() {
        tracing::debug!("Extension directory {} not present", dir.display());
        return Ok(summaries);
    }

    let mut paths = Vec::new();
    collect_pack_paths(dir, &mut paths)?;
    paths.sort();

    for path in paths {
        let summary = load_pack_file(catalogs, &path)?;
        tracing::info!(
            "Loaded extension pack {} ({} classes, {} conflicts, {} grants)",
            summary.name,
            summary.classes,
            summary.conflicts,
            summary.grants
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

fn collect_pack_paths(dir: &Path, paths: &mut Vec<std::path::PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            collect_pack_paths(&entry_path, paths)?;
        } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
            paths.push(entry_path);
        }
    }
    Ok(())
}

fn apply_pack(catalogs: &mut Catalogs, pack: PackFile, name: &str) -> Result<PackSummary> {
    // Validate every class reference before touching the catalogs. A
    // referenced class must come from this pack or already be registered.
    let mut errors = Vec::new();
    let known = |id: &ClassId| {
        catalogs.classes.contains(id) || pack.classes.iter().any(|def| &def.id == id)
    };

    for def in &pack.classes {
        if def.id.is_none_class() {
            errors.push(format!("{}: 'none' is reserved and cannot be a class id", name));
        }
    }
    for (label, pairs) in [("exclusive", &pack.exclusive), ("soft", &pack.soft)] {
        for pair in pairs {
            for side in [&pair.a, &pair.b] {
                if !known(side) {
                    errors.push(format!("{}: {} pair references unknown class {}", name, label, side));
                }
            }
        }
    }
    for grant in &pack.abilities {
        if !known(&grant.class) {
            errors.push(format!(
                "{}: ability {} granted by unknown class {}",
                name, grant.id, grant.class
            ));
        }
    }

    if !errors.is_empty() {
        return Err(ArcanumError::PackValidation(errors));
    }

    let summary = PackSummary {
        name: name.to_string(),
        classes: pack.classes.len(),
        conflicts: pack.exclusive.len() + pack.soft.len(),
        grants: pack.abilities.len(),
    };

    for def in pack.classes {
        catalogs.register_class(def);
    }
    for pair in pack.exclusive {
        catalogs.register_mutually_exclusive(pair.a, pair.b);
    }
    for pair in pack.soft {
        catalogs.register_conflicting_abilities(pair.a, pair.b);
    }
    for grant in pack.abilities {
        let mut ability = Ability::new(grant.id.as_str(), grant.name, grant.kind, grant.priority)
            .with_description(grant.description);
        ability.properties = grant.properties;
        catalogs.register_ability(grant.class, ability);
    }

    Ok(summary)
}
