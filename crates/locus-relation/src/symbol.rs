//! Relation symbol definitions

use locus_core::{GridPoint, LocusError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Cardinal/ordinal direction of a subject relative to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Overlap,
}

impl Direction {
    /// Candidate labels in the order they are enumerated
    pub const ALL: [Direction; 9] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::Overlap,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
            Direction::Overlap => "O",
        }
    }

    /// Hyphenated human-readable form, e.g. `north-east`
    pub fn phrase(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "north-east",
            Direction::NorthWest => "north-west",
            Direction::SouthEast => "south-east",
            Direction::SouthWest => "south-west",
            Direction::Overlap => "overlap",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }

    /// Parse a phrase such as `north-east` or `overlap` via [`abbreviate`]
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let abbreviation = abbreviate(phrase);
        Self::from_token(&abbreviation).ok_or_else(|| {
            LocusError::UnknownRelation(format!(
                "'{}' (abbreviated to '{}') is not a direction",
                phrase, abbreviation
            ))
        })
    }

    /// Whether `subject` lies in this direction from `object`
    pub fn holds(&self, subject: GridPoint, object: GridPoint) -> bool {
        let (sx, sy, ox, oy) = (subject.x, subject.y, object.x, object.y);
        match self {
            Direction::North => sy > oy && sx == ox,
            Direction::South => sy < oy && sx == ox,
            Direction::East => sx > ox && sy == oy,
            Direction::West => sx < ox && sy == oy,
            Direction::NorthEast => sy > oy && sx > ox,
            Direction::NorthWest => sy > oy && sx < ox,
            Direction::SouthEast => sy < oy && sx > ox,
            Direction::SouthWest => sy < oy && sx < ox,
            Direction::Overlap => sx == ox && sy == oy,
        }
    }

    /// The single direction that holds between two points
    pub fn between(subject: GridPoint, object: GridPoint) -> Self {
        match (subject.y.cmp(&object.y), subject.x.cmp(&object.x)) {
            (Ordering::Greater, Ordering::Equal) => Direction::North,
            (Ordering::Less, Ordering::Equal) => Direction::South,
            (Ordering::Equal, Ordering::Greater) => Direction::East,
            (Ordering::Equal, Ordering::Less) => Direction::West,
            (Ordering::Greater, Ordering::Greater) => Direction::NorthEast,
            (Ordering::Greater, Ordering::Less) => Direction::NorthWest,
            (Ordering::Less, Ordering::Greater) => Direction::SouthEast,
            (Ordering::Less, Ordering::Less) => Direction::SouthWest,
            (Ordering::Equal, Ordering::Equal) => Direction::Overlap,
        }
    }

    /// The direction with subject and object swapped
    pub fn inverse(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::Overlap => Direction::Overlap,
        }
    }

    /// The room region named after this direction (overlap maps to the centre)
    pub fn room_region(&self) -> RoomRegion {
        match self {
            Direction::North => RoomRegion::North,
            Direction::South => RoomRegion::South,
            Direction::East => RoomRegion::East,
            Direction::West => RoomRegion::West,
            Direction::NorthEast => RoomRegion::NorthEast,
            Direction::NorthWest => RoomRegion::NorthWest,
            Direction::SouthEast => RoomRegion::SouthEast,
            Direction::SouthWest => RoomRegion::SouthWest,
            Direction::Overlap => RoomRegion::Center,
        }
    }
}

/// One of the nine thirds-based sectors of the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoomRegion {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Center,
}

impl RoomRegion {
    pub const ALL: [RoomRegion; 9] = [
        RoomRegion::North,
        RoomRegion::South,
        RoomRegion::East,
        RoomRegion::West,
        RoomRegion::NorthEast,
        RoomRegion::NorthWest,
        RoomRegion::SouthEast,
        RoomRegion::SouthWest,
        RoomRegion::Center,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            RoomRegion::North => "NR",
            RoomRegion::South => "SR",
            RoomRegion::East => "ER",
            RoomRegion::West => "WR",
            RoomRegion::NorthEast => "NER",
            RoomRegion::NorthWest => "NWR",
            RoomRegion::SouthEast => "SER",
            RoomRegion::SouthWest => "SWR",
            RoomRegion::Center => "CR",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.token() == token)
    }
}

/// Containment and boundary contact with the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Boundary {
    /// `INR`: inside the room at all
    Inside,
    /// `TPP`: touches the room boundary
    Touching,
    /// `NTPP`: strictly inside, not touching the boundary
    Interior,
}

impl Boundary {
    pub const ALL: [Boundary; 3] = [Boundary::Inside, Boundary::Touching, Boundary::Interior];

    pub fn token(&self) -> &'static str {
        match self {
            Boundary::Inside => "INR",
            Boundary::Touching => "TPP",
            Boundary::Interior => "NTPP",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.token() == token)
    }
}

/// Three-way distance band, relative to the room diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Distance3 {
    Close,
    Medium,
    Far,
}

impl Distance3 {
    pub const ALL: [Distance3; 3] = [Distance3::Close, Distance3::Medium, Distance3::Far];

    pub fn token(&self) -> &'static str {
        match self {
            Distance3::Close => "CL3",
            Distance3::Medium => "MD3",
            Distance3::Far => "FR3",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }
}

/// Two-way distance band, relative to half the room width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Distance2 {
    Close,
    Far,
}

impl Distance2 {
    pub const ALL: [Distance2; 2] = [Distance2::Close, Distance2::Far];

    pub fn token(&self) -> &'static str {
        match self {
            Distance2::Close => "CL2",
            Distance2::Far => "FR2",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }
}

/// Relations over a single object, stated against the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryRelation {
    Region(RoomRegion),
    Boundary(Boundary),
}

/// Relations between two objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryRelation {
    Direction(Direction),
    Distance3(Distance3),
    Distance2(Distance2),
}

/// Any symbol of the relation vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Relation {
    Direction(Direction),
    Region(RoomRegion),
    Boundary(Boundary),
    Distance3(Distance3),
    Distance2(Distance2),
}

impl Relation {
    /// The full vocabulary, grouped by family
    pub fn vocabulary() -> Vec<Relation> {
        let mut all = Vec::with_capacity(26);
        all.extend(Direction::ALL.map(Relation::Direction));
        all.extend(RoomRegion::ALL.map(Relation::Region));
        all.extend(Boundary::ALL.map(Relation::Boundary));
        all.extend(Distance3::ALL.map(Relation::Distance3));
        all.extend(Distance2::ALL.map(Relation::Distance2));
        all
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Direction(d) => d.token(),
            Relation::Region(r) => r.token(),
            Relation::Boundary(b) => b.token(),
            Relation::Distance3(d) => d.token(),
            Relation::Distance2(d) => d.token(),
        }
    }

    /// Short family name for listings
    pub fn family(&self) -> &'static str {
        match self {
            Relation::Direction(_) => "direction",
            Relation::Region(_) => "room region",
            Relation::Boundary(_) => "boundary",
            Relation::Distance3(_) => "distance (3-way)",
            Relation::Distance2(_) => "distance (2-way)",
        }
    }

    /// Number of objects the predicate takes
    pub fn arity(&self) -> usize {
        match self {
            Relation::Region(_) | Relation::Boundary(_) => 1,
            Relation::Direction(_) | Relation::Distance3(_) | Relation::Distance2(_) => 2,
        }
    }

    pub fn as_unary(&self) -> Option<UnaryRelation> {
        match *self {
            Relation::Region(r) => Some(UnaryRelation::Region(r)),
            Relation::Boundary(b) => Some(UnaryRelation::Boundary(b)),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<BinaryRelation> {
        match *self {
            Relation::Direction(d) => Some(BinaryRelation::Direction(d)),
            Relation::Distance3(d) => Some(BinaryRelation::Distance3(d)),
            Relation::Distance2(d) => Some(BinaryRelation::Distance2(d)),
            _ => None,
        }
    }
}

impl FromStr for Relation {
    type Err = LocusError;

    fn from_str(token: &str) -> Result<Self> {
        Direction::from_token(token)
            .map(Relation::Direction)
            .or_else(|| RoomRegion::from_token(token).map(Relation::Region))
            .or_else(|| Boundary::from_token(token).map(Relation::Boundary))
            .or_else(|| Distance3::from_token(token).map(Relation::Distance3))
            .or_else(|| Distance2::from_token(token).map(Relation::Distance2))
            .ok_or_else(|| LocusError::UnknownRelation(token.to_string()))
    }
}

impl From<UnaryRelation> for Relation {
    fn from(rel: UnaryRelation) -> Self {
        match rel {
            UnaryRelation::Region(r) => Relation::Region(r),
            UnaryRelation::Boundary(b) => Relation::Boundary(b),
        }
    }
}

impl From<BinaryRelation> for Relation {
    fn from(rel: BinaryRelation) -> Self {
        match rel {
            BinaryRelation::Direction(d) => Relation::Direction(d),
            BinaryRelation::Distance3(d) => Relation::Distance3(d),
            BinaryRelation::Distance2(d) => Relation::Distance2(d),
        }
    }
}

/// Abbreviate a hyphenated phrase: the uppercased first letter of each segment.
///
/// `north-east` becomes `NE`, `overlap` becomes `O`.
pub fn abbreviate(phrase: &str) -> String {
    phrase
        .split('-')
        .filter_map(|word| word.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

// String conversions shared by every symbol enum: parse through `Relation`
// so the error message is uniform, then narrow to the family.

impl TryFrom<String> for Relation {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<Relation> for String {
    fn from(rel: Relation) -> Self {
        rel.as_str().to_string()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LocusError;

    fn from_str(token: &str) -> Result<Self> {
        Direction::from_token(token).ok_or_else(|| LocusError::UnknownRelation(token.to_string()))
    }
}

impl TryFrom<String> for Direction {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.token().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl TryFrom<String> for RoomRegion {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        RoomRegion::from_token(&token).ok_or(LocusError::UnknownRelation(token))
    }
}

impl From<RoomRegion> for String {
    fn from(r: RoomRegion) -> Self {
        r.token().to_string()
    }
}

impl TryFrom<String> for Boundary {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        Boundary::from_token(&token).ok_or(LocusError::UnknownRelation(token))
    }
}

impl From<Boundary> for String {
    fn from(b: Boundary) -> Self {
        b.token().to_string()
    }
}

impl TryFrom<String> for Distance3 {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        Distance3::from_token(&token).ok_or(LocusError::UnknownRelation(token))
    }
}

impl From<Distance3> for String {
    fn from(d: Distance3) -> Self {
        d.token().to_string()
    }
}

impl TryFrom<String> for Distance2 {
    type Error = LocusError;

    fn try_from(token: String) -> Result<Self> {
        Distance2::from_token(&token).ok_or(LocusError::UnknownRelation(token))
    }
}

impl From<Distance2> for String {
    fn from(d: Distance2) -> Self {
        d.token().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_round_trips_through_tokens() {
        let vocabulary = Relation::vocabulary();
        assert_eq!(vocabulary.len(), 26);
        for rel in vocabulary {
            assert_eq!(rel.as_str().parse::<Relation>().unwrap(), rel);
        }
    }

    #[test]
    fn test_unknown_token() {
        let err = "UP".parse::<Relation>().unwrap_err();
        assert!(matches!(err, LocusError::UnknownRelation(t) if t == "UP"));
        assert!("n".parse::<Relation>().is_err());
        assert!("".parse::<Relation>().is_err());
    }

    #[test]
    fn test_arity_split() {
        let north: Relation = "N".parse().unwrap();
        assert_eq!(north.arity(), 2);
        assert!(north.as_unary().is_none());
        assert_eq!(
            north.as_binary(),
            Some(BinaryRelation::Direction(Direction::North))
        );

        let tpp: Relation = "TPP".parse().unwrap();
        assert_eq!(tpp.arity(), 1);
        assert_eq!(
            tpp.as_unary(),
            Some(UnaryRelation::Boundary(Boundary::Touching))
        );
        assert!(tpp.as_binary().is_none());

        let far: Relation = "FR3".parse().unwrap();
        assert_eq!(far.as_binary(), Some(BinaryRelation::Distance3(Distance3::Far)));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("north-east"), "NE");
        assert_eq!(abbreviate("south-west"), "SW");
        assert_eq!(abbreviate("north"), "N");
        assert_eq!(abbreviate("overlap"), "O");
        assert_eq!(abbreviate(""), "");
    }

    #[test]
    fn test_direction_from_phrase() {
        assert_eq!(
            Direction::from_phrase("north-west").unwrap(),
            Direction::NorthWest
        );
        assert_eq!(Direction::from_phrase("overlap").unwrap(), Direction::Overlap);
        assert!(Direction::from_phrase("up").is_err());
        // Already-abbreviated tokens collapse to their first letter
        assert_eq!(Direction::from_phrase("NE").unwrap(), Direction::North);
    }

    #[test]
    fn test_phrase_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_phrase(d.phrase()).unwrap(), d);
        }
    }

    #[test]
    fn test_direction_predicates() {
        let a = GridPoint::new(3, 7);
        let b = GridPoint::new(3, 2);
        assert!(Direction::North.holds(a, b));
        assert!(Direction::South.holds(b, a));
        assert!(!Direction::NorthEast.holds(a, b));
        assert!(Direction::Overlap.holds(a, a));

        let c = GridPoint::new(5, 9);
        assert!(Direction::NorthEast.holds(c, b));
        assert!(Direction::SouthWest.holds(b, c));
        assert!(!Direction::North.holds(c, b));
    }

    #[test]
    fn test_exactly_one_direction_holds() {
        let points: Vec<GridPoint> = (0..4)
            .flat_map(|x| (0..4).map(move |y| GridPoint::new(x, y)))
            .collect();
        for &p in &points {
            for &q in &points {
                let holding: Vec<Direction> =
                    Direction::ALL.into_iter().filter(|d| d.holds(p, q)).collect();
                assert_eq!(holding, vec![Direction::between(p, q)]);
            }
        }
    }

    #[test]
    fn test_inverse_swaps_arguments() {
        let p = GridPoint::new(1, 4);
        let q = GridPoint::new(6, 0);
        for d in Direction::ALL {
            assert_eq!(d.holds(p, q), d.inverse().holds(q, p));
            assert_eq!(d.inverse().inverse(), d);
        }
    }

    #[test]
    fn test_serde_as_token() {
        let json = serde_json::to_string(&Relation::Region(RoomRegion::NorthEast)).unwrap();
        assert_eq!(json, "\"NER\"");
        let back: Relation = serde_json::from_str("\"MD3\"").unwrap();
        assert_eq!(back, Relation::Distance3(Distance3::Medium));
        assert!(serde_json::from_str::<Relation>("\"XX\"").is_err());

        let d: Direction = serde_json::from_str("\"SE\"").unwrap();
        assert_eq!(d, Direction::SouthEast);
        assert!(serde_json::from_str::<Direction>("\"NR\"").is_err());
    }

    #[test]
    fn test_room_region_of_direction() {
        assert_eq!(Direction::North.room_region(), RoomRegion::North);
        assert_eq!(Direction::Overlap.room_region(), RoomRegion::Center);
        assert_eq!(Direction::SouthEast.room_region().token(), "SER");
    }
}
