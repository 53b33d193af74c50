//! Search form schema
//!
//! The form is described by a static table mapping each [`Field`] to an
//! ordered list of [`Rule`]s. Every field is validated independently; the
//! first rule that fails produces that field's only error message.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::SchemaError;

// =============================================================================
// Fields
// =============================================================================

/// A named input of the search form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Species,
    Status,
    MinEpisodes,
    Accept,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Species,
        Field::Status,
        Field::MinEpisodes,
        Field::Accept,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Species => "species",
            Field::Status => "status",
            Field::MinEpisodes => "minEpisodes",
            Field::Accept => "accept",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownField(s.to_string()))
    }
}

/// Raw value of a single field as typed or selected by the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

// =============================================================================
// Choices
// =============================================================================

/// Species filter accepted by the character API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    #[default]
    Any,
    Human,
    Alien,
    Humanoid,
    Robot,
    Animal,
    MythologicalCreature,
    Cronenberg,
    Disease,
    Poopybutthole,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Any,
        Species::Human,
        Species::Alien,
        Species::Humanoid,
        Species::Robot,
        Species::Animal,
        Species::MythologicalCreature,
        Species::Cronenberg,
        Species::Disease,
        Species::Poopybutthole,
    ];

    /// Value sent to the API. Empty for [`Species::Any`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Any => "",
            Species::Human => "Human",
            Species::Alien => "Alien",
            Species::Humanoid => "Humanoid",
            Species::Robot => "Robot",
            Species::Animal => "Animal",
            Species::MythologicalCreature => "Mythological Creature",
            Species::Cronenberg => "Cronenberg",
            Species::Disease => "Disease",
            Species::Poopybutthole => "Poopybutthole",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::Any => ANY_LABEL,
            other => other.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Species::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Life status filter accepted by the character API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Any,
    Alive,
    Dead,
    Unknown,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Any, Status::Alive, Status::Dead, Status::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Any => "",
            Status::Alive => "alive",
            Status::Dead => "dead",
            Status::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Any => ANY_LABEL,
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Status::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

const ANY_LABEL: &str = "(any)";

const SPECIES_VALUES: [&str; 10] = [
    "",
    "Human",
    "Alien",
    "Humanoid",
    "Robot",
    "Animal",
    "Mythological Creature",
    "Cronenberg",
    "Disease",
    "Poopybutthole",
];

const STATUS_VALUES: [&str; 4] = ["", "alive", "dead", "unknown"];

// =============================================================================
// Rules
// =============================================================================

/// A single validation rule. Rules never look at other fields.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    /// Text no longer than `max` UTF-16 code units.
    MaxLength { max: usize, message: &'static str },
    /// Text must not be empty.
    Required { message: &'static str },
    /// Text must look like `local@domain.tld`.
    Email { message: &'static str },
    /// Text must be one of the listed values.
    OneOf { values: &'static [&'static str], message: &'static str },
    /// Text must read as a number.
    Number { message: &'static str },
    /// Number must have no fractional part.
    Integer { message: &'static str },
    Min { min: f64, message: &'static str },
    Max { max: f64, message: &'static str },
    /// Flag must be set.
    MustBeTrue { message: &'static str },
}

impl Rule {
    /// Returns the rule's message when `value` violates it.
    pub fn check(&self, value: &FieldValue) -> Option<&'static str> {
        let passed = match (self, value) {
            (Rule::MustBeTrue { .. }, FieldValue::Flag(flag)) => *flag,
            (Rule::MustBeTrue { .. }, FieldValue::Text(_)) => false,
            (_, FieldValue::Flag(_)) => false,
            (Rule::MaxLength { max, .. }, FieldValue::Text(text)) => text.encode_utf16().count() <= *max,
            (Rule::Required { .. }, FieldValue::Text(text)) => !text.is_empty(),
            // Empty input is left to `Required`.
            (Rule::Email { .. }, FieldValue::Text(text)) => text.is_empty() || is_email(text),
            (Rule::OneOf { values, .. }, FieldValue::Text(text)) => values.iter().any(|v| *v == text.as_str()),
            (Rule::Number { .. }, FieldValue::Text(text)) => parse_number(text).is_some(),
            (Rule::Integer { .. }, FieldValue::Text(text)) => {
                parse_number(text).map_or(true, |n| n.fract() == 0.0)
            }
            (Rule::Min { min, .. }, FieldValue::Text(text)) => {
                parse_number(text).map_or(true, |n| n >= *min)
            }
            (Rule::Max { max, .. }, FieldValue::Text(text)) => {
                parse_number(text).map_or(true, |n| n <= *max)
            }
        };
        (!passed).then_some(self.message())
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::MaxLength { message, .. }
            | Rule::Required { message }
            | Rule::Email { message }
            | Rule::OneOf { message, .. }
            | Rule::Number { message }
            | Rule::Integer { message }
            | Rule::Min { message, .. }
            | Rule::Max { message, .. }
            | Rule::MustBeTrue { message } => message,
        }
    }
}

pub const NAME_MAX_CHARS: usize = 30;
pub const MIN_EPISODES_LIMIT: u32 = 1000;

/// The search form, field by field.
pub static SCHEMA: [(Field, &[Rule]); 6] = [
    (
        Field::Name,
        &[Rule::MaxLength { max: NAME_MAX_CHARS, message: "Max 30 characters" }],
    ),
    (
        Field::Email,
        &[
            Rule::Required { message: "Required" },
            Rule::Email { message: "Invalid email" },
        ],
    ),
    (
        Field::Species,
        &[Rule::OneOf { values: &SPECIES_VALUES, message: "Invalid species" }],
    ),
    (
        Field::Status,
        &[Rule::OneOf { values: &STATUS_VALUES, message: "Invalid status" }],
    ),
    (
        Field::MinEpisodes,
        &[
            Rule::Number { message: "Must be a number" },
            Rule::Integer { message: "Must be an integer" },
            Rule::Min { min: 0.0, message: "Minimum 0" },
            Rule::Max { max: MIN_EPISODES_LIMIT as f64, message: "Too high" },
        ],
    ),
    (
        Field::Accept,
        &[Rule::MustBeTrue { message: "You must accept the terms" }],
    ),
];

pub fn rules_for(field: Field) -> &'static [Rule] {
    SCHEMA
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

/// Numeric coercion for text inputs, following browser `Number()` rules:
/// whitespace is ignored, empty reads as 0, `0x`/`0o`/`0b` literals and
/// `Infinity` are numbers.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return Some(n);
    }
    // Keeps out `inf`, `nan` and friends, which Rust accepts and browsers do not.
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let prefix = text.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

fn is_email(text: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

// =============================================================================
// Form values
// =============================================================================

/// Raw, unvalidated form contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub species: String,
    pub status: String,
    pub min_episodes: String,
    pub accept: bool,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            species: String::new(),
            status: String::new(),
            min_episodes: "0".into(),
            accept: false,
        }
    }
}

impl FormInput {
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Name => FieldValue::Text(self.name.clone()),
            Field::Email => FieldValue::Text(self.email.clone()),
            Field::Species => FieldValue::Text(self.species.clone()),
            Field::Status => FieldValue::Text(self.status.clone()),
            Field::MinEpisodes => FieldValue::Text(self.min_episodes.clone()),
            Field::Accept => FieldValue::Flag(self.accept),
        }
    }

    /// Replaces one field. The value kind must match the field.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), SchemaError> {
        match (field, value) {
            (Field::Accept, FieldValue::Flag(flag)) => self.accept = flag,
            (Field::Accept, _) => return Err(SchemaError::WrongKind { field, expected: "flag" }),
            (_, FieldValue::Flag(_)) => return Err(SchemaError::WrongKind { field, expected: "text" }),
            (Field::Name, FieldValue::Text(text)) => self.name = text,
            (Field::Email, FieldValue::Text(text)) => self.email = text,
            (Field::Species, FieldValue::Text(text)) => self.species = text,
            (Field::Status, FieldValue::Text(text)) => self.status = text,
            (Field::MinEpisodes, FieldValue::Text(text)) => self.min_episodes = text,
        }
        Ok(())
    }
}

/// A validated value set: every field satisfied its rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub species: Species,
    pub status: Status,
    pub min_episodes: u32,
    pub accept: bool,
}

/// Field → message for every field that failed. Ordered by field.
pub type FieldErrors = BTreeMap<Field, String>;

/// Validates one field, returning its error message if any.
pub fn validate_field(field: Field, input: &FormInput) -> Option<String> {
    let value = input.get(field);
    rules_for(field)
        .iter()
        .find_map(|rule| rule.check(&value))
        .map(str::to_string)
}

/// Validates the whole form.
pub fn validate(input: &FormInput) -> Result<FormValues, FieldErrors> {
    let errors: FieldErrors = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, input).map(|message| (field, message)))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every rule passed, so the typed conversions below cannot miss.
    let min_episodes = parse_number(&input.min_episodes).unwrap_or(0.0) as u32;
    Ok(FormValues {
        name: input.name.clone(),
        email: input.email.clone(),
        species: Species::parse(&input.species).unwrap_or_default(),
        status: Status::parse(&input.status).unwrap_or_default(),
        min_episodes,
        accept: input.accept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> FormInput {
        FormInput {
            name: "Rick".into(),
            email: "rick@citadel.org".into(),
            species: "Human".into(),
            status: "alive".into(),
            min_episodes: "10".into(),
            accept: true,
        }
    }

    fn only_error(input: &FormInput) -> (Field, String) {
        let errors = validate(input).unwrap_err();
        assert_eq!(errors.len(), 1, "expected a single error, got {:?}", errors);
        errors.into_iter().next().unwrap()
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let values = validate(&valid_input()).unwrap();
        assert_eq!(values.species, Species::Human);
        assert_eq!(values.status, Status::Alive);
        assert_eq!(values.min_episodes, 10);
    }

    #[test]
    fn test_defaults_fail_only_email_and_accept() {
        let errors = validate(&FormInput::default()).unwrap_err();
        let fields: Vec<Field> = errors.keys().copied().collect();
        assert_eq!(fields, vec![Field::Email, Field::Accept]);
        assert_eq!(errors[&Field::Email], "Required");
    }

    #[test]
    fn test_bad_email() {
        let mut input = valid_input();
        input.email = "not-an-email".into();
        assert_eq!(only_error(&input), (Field::Email, "Invalid email".into()));

        input.email = "morty@nodot".into();
        assert_eq!(only_error(&input).0, Field::Email);
    }

    #[test]
    fn test_name_length() {
        let mut input = valid_input();
        input.name = "a".repeat(30);
        assert!(validate(&input).is_ok());
        input.name = "a".repeat(31);
        assert_eq!(only_error(&input), (Field::Name, "Max 30 characters".into()));
    }

    #[test]
    fn test_name_length_counts_utf16_units() {
        let mut input = valid_input();
        input.name = "🧪".repeat(15);
        assert!(validate(&input).is_ok());
        input.name = "🧪".repeat(16);
        assert_eq!(only_error(&input), (Field::Name, "Max 30 characters".into()));
    }

    #[test]
    fn test_min_episodes_browser_number_literals() {
        let mut input = valid_input();
        input.min_episodes = "0x10".into();
        assert_eq!(validate(&input).unwrap().min_episodes, 16);
        input.min_episodes = "0b101".into();
        assert_eq!(validate(&input).unwrap().min_episodes, 5);
        input.min_episodes = "1e2".into();
        assert_eq!(validate(&input).unwrap().min_episodes, 100);

        input.min_episodes = "Infinity".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Must be an integer".into()));
        input.min_episodes = "-Infinity".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Must be an integer".into()));

        for text in ["inf", "NaN", "-0x10", "0x", "0xZZ"] {
            input.min_episodes = text.into();
            assert_eq!(only_error(&input), (Field::MinEpisodes, "Must be a number".into()), "{}", text);
        }
    }

    #[test]
    fn test_min_episodes_range() {
        let mut input = valid_input();
        input.min_episodes = "-1".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Minimum 0".into()));
        input.min_episodes = "1001".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Too high".into()));
        input.min_episodes = "1000".into();
        assert_eq!(validate(&input).unwrap().min_episodes, 1000);
    }

    #[test]
    fn test_min_episodes_type_errors_differ_from_range() {
        let mut input = valid_input();
        input.min_episodes = "many".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Must be a number".into()));
        input.min_episodes = "2.5".into();
        assert_eq!(only_error(&input), (Field::MinEpisodes, "Must be an integer".into()));
    }

    #[test]
    fn test_min_episodes_blank_reads_as_zero() {
        let mut input = valid_input();
        input.min_episodes = "  ".into();
        assert_eq!(validate(&input).unwrap().min_episodes, 0);
    }

    #[test]
    fn test_accept_required() {
        let mut input = valid_input();
        input.accept = false;
        assert_eq!(only_error(&input), (Field::Accept, "You must accept the terms".into()));
    }

    #[test]
    fn test_enum_membership() {
        let mut input = valid_input();
        input.species = "Gazorpian".into();
        assert_eq!(only_error(&input), (Field::Species, "Invalid species".into()));

        let mut input = valid_input();
        input.status = "Alive".into();
        assert_eq!(only_error(&input), (Field::Status, "Invalid status".into()));
    }

    #[test]
    fn test_every_species_choice_validates() {
        for species in Species::ALL {
            let mut input = valid_input();
            input.species = species.as_str().into();
            assert_eq!(validate(&input).unwrap().species, species);
        }
    }

    #[test]
    fn test_set_rejects_wrong_kind() {
        let mut input = FormInput::default();
        assert!(input.set(Field::Accept, "yes".into()).is_err());
        assert!(input.set(Field::Name, true.into()).is_err());
        input.set(Field::MinEpisodes, "7".into()).unwrap();
        assert_eq!(input.get(Field::MinEpisodes), FieldValue::Text("7".into()));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("episodes".parse::<Field>().is_err());
    }
}
