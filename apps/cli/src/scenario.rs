use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use qualitative_model::{
    Correlation, Direction, Entity, EntityState, LandmarkRef, Quantity, QuantitySpace, Relation,
};

/// A fully resolved model plus the state exploration starts from.
pub struct Scenario {
    pub entity: Arc<Entity>,
    pub seed: EntityState,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    entity: String,
    quantities: Vec<QuantityDef>,
    #[serde(default)]
    relations: Vec<RelationDef>,
    seed: BTreeMap<String, SeedValue>,
}

#[derive(Debug, Deserialize)]
struct QuantityDef {
    name: String,
    landmarks: Vec<String>,
    #[serde(default)]
    zero: usize,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RelationDef {
    Influence {
        source: String,
        target: String,
        correlation: CorrelationDef,
    },
    Proportional {
        source: String,
        target: String,
        correlation: CorrelationDef,
    },
    Correspondence {
        left: LandmarkDef,
        right: LandmarkDef,
    },
}

#[derive(Debug, Deserialize)]
struct LandmarkDef {
    quantity: String,
    landmark: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CorrelationDef {
    Positive,
    Negative,
}

impl From<CorrelationDef> for Correlation {
    fn from(def: CorrelationDef) -> Self {
        match def {
            CorrelationDef::Positive => Correlation::Positive,
            CorrelationDef::Negative => Correlation::Negative,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeedValue {
    landmark: String,
    derivative: DerivativeDef,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DerivativeDef {
    Negative,
    Neutral,
    Positive,
    Ambiguous,
}

impl From<DerivativeDef> for Direction {
    fn from(def: DerivativeDef) -> Self {
        match def {
            DerivativeDef::Negative => Direction::Negative,
            DerivativeDef::Neutral => Direction::Neutral,
            DerivativeDef::Positive => Direction::Positive,
            DerivativeDef::Ambiguous => Direction::Ambiguous,
        }
    }
}

/// Load a scenario from a JSON file on disk.
pub fn load(path: &Path) -> Result<Scenario, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read scenario {}: {e}", path.display()))?;
    parse(&raw).map_err(|e| format!("invalid scenario {}: {e}", path.display()))
}

fn parse(raw: &str) -> Result<Scenario, String> {
    let file: ScenarioFile = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let quantities = file
        .quantities
        .into_iter()
        .map(|def| {
            if def.zero >= def.landmarks.len() {
                return Err(format!(
                    "zero landmark index {} out of range for quantity '{}'",
                    def.zero, def.name
                ));
            }
            let space = QuantitySpace::new(def.landmarks).centered_at(def.zero);
            Ok(Quantity::new(def.name, space))
        })
        .collect::<Result<Vec<_>, String>>()?;

    let relations = file
        .relations
        .into_iter()
        .map(|def| match def {
            RelationDef::Influence {
                source,
                target,
                correlation,
            } => Relation::influence(source, target, correlation.into()),
            RelationDef::Proportional {
                source,
                target,
                correlation,
            } => Relation::proportional(source, target, correlation.into()),
            RelationDef::Correspondence { left, right } => Relation::correspondence(
                LandmarkRef::new(left.quantity, left.landmark),
                LandmarkRef::new(right.quantity, right.landmark),
            ),
        })
        .collect();

    let entity =
        Arc::new(Entity::new(file.entity, quantities, relations).map_err(|e| e.to_string())?);

    let assignments: Vec<(&str, &str, Direction)> = file
        .seed
        .iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                value.landmark.as_str(),
                Direction::from(value.derivative),
            )
        })
        .collect();
    let seed =
        EntityState::from_landmarks(entity.clone(), &assignments).map_err(|e| e.to_string())?;

    Ok(Scenario { entity, seed })
}

/// The built-in scenarios, by name.
pub fn builtin(name: &str) -> Option<Scenario> {
    match name {
        "container" => Some(container()),
        "container-bonus" => Some(container_bonus()),
        _ => None,
    }
}

pub fn builtin_names() -> &'static [&'static str] {
    &["container", "container-bonus"]
}

/// The classic filling container: an exogenous tap, a volume driven by the
/// two flows, and an outflow proportional to volume.
fn container() -> Scenario {
    let quantities = vec![
        Quantity::new("inflow", QuantitySpace::new(["ZERO", "PLUS"])),
        Quantity::new("outflow", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
        Quantity::new("volume", QuantitySpace::new(["ZERO", "PLUS", "MAX"])),
    ];
    let relations = vec![
        Relation::influence("inflow", "volume", Correlation::Positive),
        Relation::influence("outflow", "volume", Correlation::Negative),
        Relation::proportional("volume", "outflow", Correlation::Positive),
        Relation::correspondence(
            LandmarkRef::new("volume", "MAX"),
            LandmarkRef::new("outflow", "MAX"),
        ),
        Relation::correspondence(
            LandmarkRef::new("volume", "ZERO"),
            LandmarkRef::new("outflow", "ZERO"),
        ),
    ];
    let entity = Arc::new(
        Entity::new("container", quantities, relations).expect("built-in scenario is well formed"),
    );
    let seed = EntityState::from_landmarks(
        entity.clone(),
        &[
            ("inflow", "ZERO", Direction::Positive),
            ("volume", "ZERO", Direction::Neutral),
            ("outflow", "ZERO", Direction::Neutral),
        ],
    )
    .expect("built-in seed is well formed");
    Scenario { entity, seed }
}

/// The extended container: water height and bottom pressure sit between
/// volume and outflow, with corresponding landmarks along the whole chain.
fn container_bonus() -> Scenario {
    let extended = || QuantitySpace::new(["ZERO", "PLUS", "MAX"]);
    let quantities = vec![
        Quantity::new("inflow", QuantitySpace::new(["ZERO", "PLUS"])),
        Quantity::new("outflow", extended()),
        Quantity::new("volume", extended()),
        Quantity::new("height", extended()),
        Quantity::new("pressure", extended()),
    ];
    let pair = |left: (&str, &str), right: (&str, &str)| {
        Relation::correspondence(
            LandmarkRef::new(left.0, left.1),
            LandmarkRef::new(right.0, right.1),
        )
    };
    let relations = vec![
        Relation::influence("inflow", "volume", Correlation::Positive),
        Relation::influence("outflow", "volume", Correlation::Negative),
        Relation::proportional("volume", "height", Correlation::Positive),
        Relation::proportional("height", "pressure", Correlation::Positive),
        Relation::proportional("pressure", "outflow", Correlation::Positive),
        pair(("volume", "MAX"), ("height", "MAX")),
        pair(("volume", "ZERO"), ("height", "ZERO")),
        pair(("height", "MAX"), ("pressure", "MAX")),
        pair(("height", "ZERO"), ("pressure", "ZERO")),
        pair(("pressure", "MAX"), ("outflow", "MAX")),
        pair(("pressure", "ZERO"), ("outflow", "ZERO")),
    ];
    let entity = Arc::new(
        Entity::new("container", quantities, relations).expect("built-in scenario is well formed"),
    );
    let seed = EntityState::from_landmarks(
        entity.clone(),
        &[
            ("inflow", "ZERO", Direction::Positive),
            ("volume", "ZERO", Direction::Neutral),
            ("outflow", "ZERO", Direction::Neutral),
            ("height", "ZERO", Direction::Neutral),
            ("pressure", "ZERO", Direction::Neutral),
        ],
    )
    .expect("built-in seed is well formed");
    Scenario { entity, seed }
}

#[cfg(test)]
mod tests {
    use qualitative_model::Direction;

    use super::{builtin, builtin_names, parse};

    #[test]
    fn builtins_resolve_by_name() {
        for name in builtin_names() {
            assert!(builtin(name).is_some(), "missing builtin {name}");
        }
        assert!(builtin("perpetuum-mobile").is_none());
    }

    #[test]
    fn container_seed_opens_the_tap() {
        let scenario = builtin("container").unwrap();
        let inflow = scenario.seed.pair("inflow").unwrap();
        assert_eq!(inflow.derivative, Direction::Positive);
        assert!(scenario.entity.is_exogenous("inflow"));
        assert!(!scenario.entity.is_exogenous("volume"));
    }

    #[test]
    fn json_scenario_round_trips_into_a_model() {
        let raw = r#"{
            "entity": "kettle",
            "quantities": [
                {"name": "heat", "landmarks": ["ZERO", "PLUS"]},
                {"name": "temperature", "landmarks": ["COLD", "WARM", "BOILING"]}
            ],
            "relations": [
                {"type": "influence", "source": "heat", "target": "temperature",
                 "correlation": "positive"}
            ],
            "seed": {
                "heat": {"landmark": "ZERO", "derivative": "positive"},
                "temperature": {"landmark": "COLD", "derivative": "neutral"}
            }
        }"#;
        let scenario = parse(raw).expect("scenario parses");
        assert_eq!(scenario.entity.name(), "kettle");
        assert_eq!(scenario.entity.quantities().len(), 2);
        assert!(scenario.entity.is_exogenous("heat"));
        let heat = scenario.seed.pair("heat").unwrap();
        assert_eq!(heat.derivative, Direction::Positive);
    }

    #[test]
    fn unknown_relation_quantity_is_rejected() {
        let raw = r#"{
            "entity": "kettle",
            "quantities": [{"name": "heat", "landmarks": ["ZERO", "PLUS"]}],
            "relations": [
                {"type": "proportional", "source": "heat", "target": "steam",
                 "correlation": "positive"}
            ],
            "seed": {"heat": {"landmark": "ZERO", "derivative": "neutral"}}
        }"#;
        assert!(parse(raw).is_err());
    }

    #[test]
    fn seed_must_cover_every_quantity() {
        let raw = r#"{
            "entity": "kettle",
            "quantities": [
                {"name": "heat", "landmarks": ["ZERO", "PLUS"]},
                {"name": "temperature", "landmarks": ["COLD", "WARM"]}
            ],
            "seed": {"heat": {"landmark": "ZERO", "derivative": "neutral"}}
        }"#;
        assert!(parse(raw).is_err());
    }
}
