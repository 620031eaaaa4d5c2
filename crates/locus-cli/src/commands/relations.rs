//! Relation vocabulary command

use anyhow::{bail, Result};
use locus_relation::Relation;

pub fn run(format: &str) -> Result<()> {
    let vocabulary = Relation::vocabulary();

    match format {
        "json" => {
            let entries: Vec<_> = vocabulary
                .iter()
                .map(|rel| {
                    serde_json::json!({
                        "token": rel.as_str(),
                        "family": rel.family(),
                        "arity": rel.arity(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        "text" => {
            println!("{} relations:", vocabulary.len());
            for rel in &vocabulary {
                let against = if rel.arity() == 1 { "room" } else { "object" };
                println!("  {:<5} {:<10} (against {})", rel.as_str(), rel.family(), against);
            }
        }
        _ => bail!("Unknown format: {}", format),
    }

    Ok(())
}
