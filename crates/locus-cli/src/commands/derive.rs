//! Scenario derivation command

use super::load_config;
use anyhow::{anyhow, Context, Result};
use locus_relation::RelationAlgebra;
use locus_solver::{derive_scenario, DeriveOptions, FactFamily, Placement};

pub struct DeriveArgs {
    pub layout: String,
    pub name: String,
    pub query: Option<(String, String)>,
    pub family: Option<FactFamily>,
    pub inside: bool,
    pub boundary: bool,
    pub distance: Option<u8>,
    pub hops: Option<usize>,
    pub no_regions: bool,
    pub no_directions: bool,
    pub config: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl DeriveArgs {
    /// Fact families to derive, from the named family or the individual flags
    fn options(&self) -> DeriveOptions {
        let options = match self.family {
            Some(family) => family.options(),
            None => DeriveOptions {
                regions: !self.no_regions,
                inside: self.inside,
                boundary: self.boundary,
                directions: !self.no_directions,
                distance3: self.distance == Some(3),
                distance2: self.distance == Some(2),
                hops: None,
            },
        };
        DeriveOptions {
            hops: self.hops,
            ..options
        }
    }
}

pub fn run(args: DeriveArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.width, args.height)?;
    let layout = Placement::load_file(&args.layout)
        .with_context(|| format!("Failed to load layout from {}", args.layout))?;

    let layout = match &args.query {
        Some((subject, target)) => order_for_query(&layout, subject, target)?,
        None => layout,
    };

    let options = args.options();

    let algebra = RelationAlgebra::new(config.room);
    let (scenario, expected) = derive_scenario(&args.name, &layout, &algebra, &options)
        .context("Failed to derive scenario")?;

    match args.family {
        Some(family) => println!(
            "# Derived from {} in a {} room ({} facts)",
            args.layout, config.room, family
        ),
        None => println!("# Derived from {} in a {} room", args.layout, config.room),
    }
    println!("# True label: {} ({})", expected.token(), expected.phrase());
    print!("{}", scenario.to_toml()?);

    Ok(())
}

/// Reorder a layout so the query subject comes first and its target last
fn order_for_query(layout: &Placement, subject: &str, target: &str) -> Result<Placement> {
    let position = |name: &str| {
        layout
            .get(name)
            .ok_or_else(|| anyhow!("Object '{}' is not in the layout", name))
    };
    let first = position(subject)?;
    let last = position(target)?;

    let mut ordered = Placement::new();
    ordered.place(subject, first);
    for obj in layout.iter() {
        if obj.name != subject && obj.name != target {
            ordered.place(obj.name.clone(), obj.position);
        }
    }
    ordered.place(target, last);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_core::GridPoint;

    fn args() -> DeriveArgs {
        DeriveArgs {
            layout: "layout.toml".to_string(),
            name: "derived".to_string(),
            query: None,
            family: None,
            inside: false,
            boundary: false,
            distance: None,
            hops: None,
            no_regions: false,
            no_directions: false,
            config: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_flags_map_to_options() {
        let options = DeriveArgs {
            inside: true,
            no_directions: true,
            distance: Some(2),
            ..args()
        }
        .options();
        assert!(options.regions && options.inside && options.distance2);
        assert!(!options.boundary && !options.directions && !options.distance3);

        assert_eq!(args().options(), DeriveOptions::default());
    }

    #[test]
    fn test_family_maps_to_options() {
        let options = DeriveArgs {
            family: Some(FactFamily::O2D3),
            hops: Some(3),
            ..args()
        }
        .options();
        assert_eq!(
            options,
            DeriveOptions {
                hops: Some(3),
                ..FactFamily::O2D3.options()
            }
        );
        assert!(options.inside && options.directions && options.distance3 && !options.regions);
    }

    #[test]
    fn test_order_for_query() {
        let layout: Placement = [("bed", 1, 1), ("desk", 5, 5), ("lamp", 9, 9)]
            .iter()
            .map(|&(n, x, y)| (n.to_string(), GridPoint::new(x, y)))
            .collect();

        let ordered = order_for_query(&layout, "desk", "bed").unwrap();
        let names: Vec<&str> = ordered.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["desk", "lamp", "bed"]);
        assert_eq!(ordered.get("bed"), Some(GridPoint::new(1, 1)));

        assert!(order_for_query(&layout, "desk", "sofa").is_err());
    }
}
