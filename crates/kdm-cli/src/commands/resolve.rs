use anyhow::Result;
use kdm_core::monster::{Bestiary, find_variant, resolve_nemesis, resolve_quarry};

pub fn nemesis(name: &str) -> Result<()> {
    let bestiary = Bestiary::standard();
    let resolution = resolve_nemesis(bestiary.nemeses(), name);

    match bestiary.nemesis(resolution.id()) {
        Some(record) => println!("{} -> nemesis #{} ({})", name, resolution.id(), record.node),
        None => print_unresolved(name, resolution.id(), bestiary.nemeses()),
    }
    Ok(())
}

pub fn quarry(name: &str) -> Result<()> {
    let bestiary = Bestiary::standard();
    let resolved = resolve_quarry(bestiary.quarries(), name);

    if resolved.resolution.is_resolved() {
        println!("{} -> quarry #{} ({})", name, resolved.id(), resolved.node);
    } else {
        print_unresolved(name, resolved.id(), bestiary.quarries());
        println!("  node defaults to {}", resolved.node);
    }
    Ok(())
}

fn print_unresolved(
    name: &str,
    sentinel: i64,
    table: &std::collections::BTreeMap<i64, kdm_core::monster::MonsterRecord>,
) {
    println!("{} -> unresolved (id {})", name, sentinel);
    if let Some(variant) = find_variant(table, name) {
        println!(
            "  '{}' is a {:?} variant of {} (#{})",
            name, variant.kind, variant.record.name, variant.id
        );
    }
}
