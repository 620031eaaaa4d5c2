//! Facts and queries

use locus_core::{LocusError, Result, ROOM};
use locus_relation::{BinaryRelation, Direction, Relation, UnaryRelation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The object slot of a fact or query: another object, or the room itself
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Room,
    Object(String),
}

impl Target {
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(LocusError::MalformedFact("empty object name".to_string()));
        }
        if name == ROOM {
            Ok(Target::Room)
        } else {
            Ok(Target::Object(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Target::Room => ROOM,
            Target::Object(name) => name,
        }
    }

    pub fn object(&self) -> Option<&str> {
        match self {
            Target::Room => None,
            Target::Object(name) => Some(name),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_subject(subject: &str) -> Result<()> {
    if subject.is_empty() {
        return Err(LocusError::MalformedFact("empty subject name".to_string()));
    }
    if subject == ROOM {
        return Err(LocusError::MalformedFact(format!(
            "'{}' cannot be the subject of a fact",
            ROOM
        )));
    }
    Ok(())
}

/// A single spatial fact: `subject relation object`.
///
/// A fact against the room is a unary constraint on its subject, any other
/// fact is a binary constraint between two objects. The relation's arity is
/// checked against the object slot on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "(String, String, String)",
    into = "(String, String, String)"
)]
pub struct Fact {
    subject: String,
    relation: Relation,
    object: Target,
}

impl Fact {
    pub fn new(subject: impl Into<String>, relation: Relation, object: Target) -> Result<Self> {
        let subject = subject.into();
        check_subject(&subject)?;

        match (&object, relation.arity()) {
            (Target::Room, 2) => {
                return Err(LocusError::MalformedFact(format!(
                    "'{} {} {}': {} relates two objects, not an object and the room",
                    subject, relation, object, relation
                )))
            }
            (Target::Object(_), 1) => {
                return Err(LocusError::MalformedFact(format!(
                    "'{} {} {}': {} can only be stated against the room",
                    subject, relation, object, relation
                )))
            }
            _ => {}
        }

        Ok(Self {
            subject,
            relation,
            object,
        })
    }

    /// Parse a fact from its three string tokens
    pub fn parse(subject: &str, relation: &str, object: &str) -> Result<Self> {
        let relation: Relation = relation.parse()?;
        Self::new(subject, relation, Target::parse(object)?)
    }

    /// Parse a list of string triples, failing on the first bad entry
    pub fn parse_all<S: AsRef<str>>(triples: &[(S, S, S)]) -> Result<Vec<Self>> {
        triples
            .iter()
            .map(|(s, r, o)| Self::parse(s.as_ref(), r.as_ref(), o.as_ref()))
            .collect()
    }

    /// A unary fact against the room
    pub fn unary(subject: impl Into<String>, relation: UnaryRelation) -> Result<Self> {
        Self::new(subject, relation.into(), Target::Room)
    }

    /// A binary fact between two objects
    pub fn binary(
        subject: impl Into<String>,
        relation: BinaryRelation,
        object: impl Into<String>,
    ) -> Result<Self> {
        let object = object.into();
        Self::new(subject, relation.into(), Target::parse(&object)?)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn object(&self) -> &Target {
        &self.object
    }
}

impl TryFrom<(String, String, String)> for Fact {
    type Error = LocusError;

    fn try_from((subject, relation, object): (String, String, String)) -> Result<Self> {
        Self::parse(&subject, &relation, &object)
    }
}

impl From<Fact> for (String, String, String) {
    fn from(fact: Fact) -> Self {
        (
            fact.subject,
            fact.relation.to_string(),
            fact.object.to_string(),
        )
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.relation, self.object)
    }
}

/// The object pair whose relation is being asked about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuery", into = "(String, String)")]
pub struct Query {
    subject: String,
    target: Target,
}

impl Query {
    pub fn new(subject: &str, target: &str) -> Result<Self> {
        check_subject(subject).map_err(|e| LocusError::InvalidQuery(e.to_string()))?;
        let target =
            Target::parse(target).map_err(|e| LocusError::InvalidQuery(e.to_string()))?;
        Ok(Self {
            subject: subject.to_string(),
            target,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Object names the query needs as variables
    pub fn objects(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subject.as_str()).chain(self.target.object())
    }

    /// The fact asserting `label` between the query pair.
    ///
    /// `None` when the target is the room, which no direction fact can name.
    pub fn with_label(&self, label: Direction) -> Option<Fact> {
        match self.target {
            Target::Room => None,
            Target::Object(_) => Some(Fact {
                subject: self.subject.clone(),
                relation: Relation::Direction(label),
                object: self.target.clone(),
            }),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, ?, {})", self.subject, self.target)
    }
}

/// Accepted on-disk query shapes.
///
/// Generated benchmark data stores queries as `(subject, relation, target)`
/// triples, sometimes as a list of them where only the last one counts.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuery {
    Pair(String, String),
    Triple(String, String, String),
    History(Vec<(String, String, String)>),
}

impl TryFrom<RawQuery> for Query {
    type Error = LocusError;

    fn try_from(raw: RawQuery) -> Result<Self> {
        match raw {
            RawQuery::Pair(subject, target) | RawQuery::Triple(subject, _, target) => {
                Query::new(&subject, &target)
            }
            RawQuery::History(entries) => match entries.last() {
                Some((subject, _, target)) => Query::new(subject, target),
                None => Err(LocusError::InvalidQuery("empty query list".to_string())),
            },
        }
    }
}

impl From<Query> for (String, String) {
    fn from(query: Query) -> Self {
        (query.subject, query.target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locus_relation::{Boundary, RoomRegion};

    #[test]
    fn test_parse_unary_fact() {
        let fact = Fact::parse("chair", "NR", "room").unwrap();
        assert_eq!(fact.subject(), "chair");
        assert_eq!(fact.relation(), Relation::Region(RoomRegion::North));
        assert_eq!(fact.object(), &Target::Room);
    }

    #[test]
    fn test_parse_binary_fact() {
        let fact = Fact::parse("lamp", "N", "chair").unwrap();
        assert_eq!(fact.object(), &Target::Object("chair".to_string()));
        assert_eq!(fact.to_string(), "(lamp, N, chair)");
    }

    #[test]
    fn test_unknown_relation_fails_fast() {
        let err = Fact::parse("lamp", "ABOVE", "chair").unwrap_err();
        assert!(matches!(err, LocusError::UnknownRelation(t) if t == "ABOVE"));
    }

    #[test]
    fn test_arity_mismatch_is_malformed() {
        assert!(matches!(
            Fact::parse("lamp", "N", "room"),
            Err(LocusError::MalformedFact(_))
        ));
        assert!(matches!(
            Fact::parse("lamp", "TPP", "chair"),
            Err(LocusError::MalformedFact(_))
        ));
        assert!(matches!(
            Fact::parse("room", "CR", "room"),
            Err(LocusError::MalformedFact(_))
        ));
        assert!(matches!(
            Fact::parse("", "N", "chair"),
            Err(LocusError::MalformedFact(_))
        ));
        assert!(matches!(
            Fact::parse("lamp", "N", ""),
            Err(LocusError::MalformedFact(_))
        ));
    }

    #[test]
    fn test_parse_all_stops_on_error() {
        let ok = Fact::parse_all(&[("a", "N", "b"), ("a", "TPP", "room")]).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(Fact::parse_all(&[("a", "N", "b"), ("a", "XX", "room")]).is_err());
    }

    #[test]
    fn test_typed_constructors() {
        let fact = Fact::unary("sofa", UnaryRelation::Boundary(Boundary::Touching)).unwrap();
        assert_eq!(fact.relation().as_str(), "TPP");

        let fact =
            Fact::binary("sofa", BinaryRelation::Direction(Direction::West), "tv").unwrap();
        assert_eq!(fact.relation().as_str(), "W");
        assert!(Fact::binary("sofa", BinaryRelation::Direction(Direction::West), "room").is_err());
    }

    #[test]
    fn test_fact_serde_as_triple() {
        let fact = Fact::parse("lamp", "SE", "chair").unwrap();
        let json = serde_json::to_string(&fact).unwrap();
        assert_eq!(json, r#"["lamp","SE","chair"]"#);

        let back: Fact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fact);

        assert!(serde_json::from_str::<Fact>(r#"["lamp","SE"]"#).is_err());
        assert!(serde_json::from_str::<Fact>(r#"["lamp","XX","chair"]"#).is_err());
    }

    #[test]
    fn test_query_shapes() {
        let q: Query = serde_json::from_str(r#"["lamp","chair"]"#).unwrap();
        assert_eq!(q.subject(), "lamp");
        assert_eq!(q.target(), &Target::Object("chair".to_string()));

        let q: Query = serde_json::from_str(r#"["lamp","NE","chair"]"#).unwrap();
        assert_eq!(q.subject(), "lamp");

        let q: Query =
            serde_json::from_str(r#"[["a","N","b"],["lamp","SW","sofa"]]"#).unwrap();
        assert_eq!(q.subject(), "lamp");
        assert_eq!(q.target().as_str(), "sofa");

        assert!(serde_json::from_str::<Query>("[]").is_err());
        assert!(serde_json::from_str::<Query>(r#"["room","lamp"]"#).is_err());
    }

    #[test]
    fn test_query_with_label() {
        let q = Query::new("lamp", "chair").unwrap();
        let fact = q.with_label(Direction::NorthEast).unwrap();
        assert_eq!(fact, Fact::parse("lamp", "NE", "chair").unwrap());

        let room_query = Query::new("lamp", "room").unwrap();
        assert!(room_query.with_label(Direction::North).is_none());
        assert_eq!(room_query.objects().collect::<Vec<_>>(), vec!["lamp"]);
    }
}
