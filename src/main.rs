//! Arcanum - Dev Console Entry Point
//!
//! Interactive console for exercising the class engine: grant and revoke
//! classes on a test agent, pin the primary, inspect resolved abilities,
//! and check conflict relations. Extension packs under the configured
//! directory are loaded at startup.

use arcanum::abilities::AbilityKind;
use arcanum::agent::{ClassService, JsonFileStore, LogSync};
use arcanum::classes::Category;
use arcanum::content::Catalogs;
use arcanum::core::config::ServiceConfig;
use arcanum::core::error::Result;
use arcanum::core::types::AgentId;

use std::io::{self, Write};

fn main() -> Result<()> {
    let config = ServiceConfig::default();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    tracing::info!("Arcanum class engine starting...");

    if let Err(e) = config.validate() {
        tracing::warn!("Configuration problem: {}", e);
    }

    // Build phase: builtins, then extension packs, then freeze
    let mut catalogs = Catalogs::with_builtins();
    match catalogs.load_extension_dir(&config.extension_dir) {
        Ok(summaries) => {
            for summary in &summaries {
                println!(
                    "Extension pack '{}': {} classes, {} conflicts, {} grants",
                    summary.name, summary.classes, summary.conflicts, summary.grants
                );
            }
        }
        Err(e) => tracing::warn!("Extension packs skipped: {}", e),
    }
    let catalogs = catalogs.freeze();

    let store = Box::new(JsonFileStore::new(&config.state_dir));
    let mut service = ClassService::new(catalogs, store, Box::new(LogSync))
        .with_autosave(config.autosave);

    // One throwaway agent per console session
    let agent = AgentId::new();
    service.on_agent_connected(agent);

    println!("\n=== ARCANUM CLASS CONSOLE ===");
    println!("Class and ability resolution playground");
    println!();
    println!("Commands:");
    println!("  grant <class>      - Grant a class to the test agent");
    println!("  revoke <class>     - Revoke a class");
    println!("  primary [class|-]  - Show, pin or clear the primary class");
    println!("  abilities [kind]   - Show resolved abilities");
    println!("  classes [category] - List registered classes");
    println!("  grants             - List raw class ability grants");
    println!("  conflicts <class>  - Show conflict partners of a class");
    println!("  status / s         - Show agent status");
    println!("  quit / q           - Save and exit");
    println!();

    loop {
        display_status(&service, agent);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&service, agent);
            continue;
        }

        if input == "classes" {
            display_classes(&service);
            continue;
        }

        if let Some(name) = input.strip_prefix("classes ") {
            match Category::parse(name.trim()) {
                Some(category) => display_category(&service, category),
                None => println!(
                    "Unknown category. One of: base, transformation, role, organization, blood_status, alignment"
                ),
            }
            continue;
        }

        if input == "grants" {
            display_grants(&service);
            continue;
        }

        if input == "abilities" {
            display_abilities(&service, agent, None);
            continue;
        }

        if let Some(kind_name) = input.strip_prefix("abilities ") {
            match AbilityKind::parse(kind_name.trim()) {
                Some(kind) => display_abilities(&service, agent, Some(kind)),
                None => println!("Unknown kind. One of: passive, active, permission, stat_modifier"),
            }
            continue;
        }

        if let Some(name) = input.strip_prefix("grant ") {
            let class = service.manager().catalogs().classes.parse(name.trim());
            if class.is_none_class() {
                println!("Unknown class '{}'", name.trim());
                continue;
            }
            match service.grant(agent, class.clone(), "console") {
                Ok(()) => println!("Granted {}.", class),
                Err(denied) => println!("Denied: {}", denied),
            }
            continue;
        }

        if let Some(name) = input.strip_prefix("revoke ") {
            let class = service.manager().catalogs().classes.parse(name.trim());
            if class.is_none_class() {
                println!("Unknown class '{}'", name.trim());
                continue;
            }
            if service.revoke(agent, &class) {
                println!("Revoked {}.", class);
            } else {
                println!("{} is not held.", class);
            }
            continue;
        }

        if input == "primary" {
            println!("Primary: {}", service.manager().primary_class(agent));
            continue;
        }

        if let Some(arg) = input.strip_prefix("primary ") {
            let arg = arg.trim();
            let result = if arg == "-" {
                service.set_primary_override(agent, None)
            } else {
                let class = service.manager().catalogs().classes.parse(arg);
                if class.is_none_class() {
                    println!("Unknown class '{}'", arg);
                    continue;
                }
                service.set_primary_override(agent, Some(class))
            };
            match result {
                Ok(()) => println!("Primary is now {}.", service.manager().primary_class(agent)),
                Err(e) => println!("Cannot pin: {}", e),
            }
            continue;
        }

        if let Some(name) = input.strip_prefix("conflicts ") {
            display_conflicts(&service, name.trim());
            continue;
        }

        println!("Unknown command. Available: grant, revoke, primary, abilities, classes, grants, conflicts, status, quit");
    }

    service.on_agent_disconnected(agent)?;
    println!("\nGoodbye! State saved.");
    Ok(())
}

/// Display a brief status line
fn display_status(service: &ClassService, agent: AgentId) {
    let manager = service.manager();
    let held = manager.held_classes(agent);
    println!();
    println!(
        "--- Primary: {} | {} classes held | {} abilities ---",
        manager.primary_class(agent),
        held.len(),
        manager.abilities(agent).len()
    );
}

/// Display held classes with their metadata
fn display_detailed_status(service: &ClassService, agent: AgentId) {
    let manager = service.manager();
    println!();
    println!("=== Agent {:?} ===", agent);
    println!("Primary: {}", manager.primary_class(agent));

    if manager.held_classes(agent).is_empty() {
        println!("No classes held.");
        return;
    }

    for class in manager.held_classes(agent) {
        let category = manager
            .catalogs()
            .classes
            .category_of(class)
            .map(|c| format!("{:?}", c))
            .unwrap_or_else(|| "?".to_string());
        match manager.metadata(agent, class) {
            Some(meta) => println!(
                "  {} [{}] acquired via '{}' at {}",
                class, category, meta.acquired_by, meta.acquired_at
            ),
            None => println!("  {} [{}]", class, category),
        }
    }
}

fn display_classes(service: &ClassService) {
    for category in Category::priority_order() {
        let empty = service
            .manager()
            .catalogs()
            .classes
            .get_by_category(category)
            .is_empty();
        if !empty {
            display_category(service, category);
        }
    }
}

fn display_category(service: &ClassService, category: Category) {
    let catalogs = service.manager().catalogs();
    let defs = catalogs.classes.get_by_category(category);
    println!();
    if defs.is_empty() {
        println!("No classes registered in {:?}.", category);
        return;
    }
    let singleton = if category.is_singleton() { " (singleton)" } else { "" };
    println!("{:?}{}:", category, singleton);
    for def in defs {
        if def.description.is_empty() {
            println!("  {} - {}", def.id, def.display_name);
        } else {
            println!("  {} - {} ({})", def.id, def.display_name, def.description);
        }
    }
}

fn display_grants(service: &ClassService) {
    let catalogs = service.manager().catalogs();
    println!();
    if catalogs.abilities.is_empty() {
        println!("No ability grants registered.");
        return;
    }
    for class in catalogs.abilities.granting_classes() {
        println!("{}:", class);
        for ability in catalogs.abilities.abilities_for_class(&class) {
            println!(
                "  {} ({:?}, priority {})",
                ability.id, ability.kind, ability.priority
            );
        }
    }
}

fn display_abilities(service: &ClassService, agent: AgentId, kind: Option<AbilityKind>) {
    let manager = service.manager();
    let abilities = manager.abilities(agent);
    let filtered: Vec<_> = abilities
        .iter()
        .filter(|a| kind.map_or(true, |k| a.ability.kind == k))
        .collect();

    println!();
    if filtered.is_empty() {
        println!("No abilities.");
        return;
    }
    for active in filtered {
        print!(
            "  {} ({:?}, priority {}) via {}",
            active.ability.id, active.ability.kind, active.ability.priority, active.granted_by
        );
        if active.ability.properties.is_empty() {
            println!();
        } else {
            let mut props: Vec<String> = active
                .ability
                .properties
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            props.sort();
            println!(" [{}]", props.join(", "));
        }
    }
}

fn display_conflicts(service: &ClassService, name: &str) {
    let catalogs = service.manager().catalogs();
    let class = catalogs.classes.parse(name);
    if class.is_none_class() {
        println!("Unknown class '{}'", name);
        return;
    }

    let exclusive = catalogs.conflicts.exclusive_partners(&class);
    let soft = catalogs.conflicts.soft_partners(&class);

    println!();
    if exclusive.is_empty() && soft.is_empty() {
        println!("{} has no registered conflicts.", class);
    }
    for partner in exclusive {
        println!("  {} <-> {} (mutually exclusive)", class, partner);
    }
    for partner in soft {
        println!("  {} <-> {} (conflicting abilities)", class, partner);
    }
    if let Some(category) = catalogs.classes.category_of(&class) {
        if category.is_singleton() {
            println!(
                "  {} is in singleton category {:?}; its members exclude each other",
                class, category
            );
        }
    }
}
