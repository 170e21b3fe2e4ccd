//! Request body validation: presence of required fields in a fixed order, then field shapes.

use crate::error::AppError;
use crate::models::{NewPeople, NewPlanet, NewUser};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Text,
    }
}

const fn integer(name: &'static str) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Integer,
    }
}

pub const USER_FIELDS: &[FieldRule] = &[text("name"), text("email"), text("password")];

pub const PLANET_FIELDS: &[FieldRule] = &[
    text("name"),
    integer("population"),
    integer("diameter"),
    text("climated"),
    text("terrain"),
];

pub const PEOPLE_FIELDS: &[FieldRule] = &[
    text("name"),
    text("specie"),
    text("gender"),
    integer("height"),
    integer("weight"),
    integer("age"),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule in order: first all presences, then all shapes. `null` counts as missing.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            if body.get(rule.name).map_or(true, Value::is_null) {
                return Err(AppError::MissingField(rule.name));
            }
        }
        for rule in rules {
            match rule.kind {
                FieldKind::Text => {
                    text_field(body, rule.name)?;
                }
                FieldKind::Integer => {
                    integer_field(body, rule.name)?;
                }
            }
        }
        Ok(())
    }

    pub fn new_user(body: &Map<String, Value>) -> Result<NewUser, AppError> {
        Self::validate(body, USER_FIELDS)?;
        Ok(NewUser {
            name: text_field(body, "name")?,
            email: text_field(body, "email")?,
            password: text_field(body, "password")?,
        })
    }

    pub fn new_planet(body: &Map<String, Value>) -> Result<NewPlanet, AppError> {
        Self::validate(body, PLANET_FIELDS)?;
        Ok(NewPlanet {
            name: text_field(body, "name")?,
            population: integer_field(body, "population")?,
            diameter: integer_field(body, "diameter")?,
            climated: text_field(body, "climated")?,
            terrain: text_field(body, "terrain")?,
        })
    }

    pub fn new_people(body: &Map<String, Value>) -> Result<NewPeople, AppError> {
        Self::validate(body, PEOPLE_FIELDS)?;
        Ok(NewPeople {
            name: text_field(body, "name")?,
            specie: text_field(body, "specie")?,
            gender: text_field(body, "gender")?,
            height: integer_field(body, "height")?,
            weight: integer_field(body, "weight")?,
            age: integer_field(body, "age")?,
            planet_id: optional_id(body, "planet_id")?,
        })
    }
}

/// Strings are taken verbatim; numbers and booleans keep their JSON text.
/// NUL characters are refused: PostgreSQL `TEXT` cannot store them.
fn text_field(body: &Map<String, Value>, field: &'static str) -> Result<String, AppError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.contains('\0') => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(Value::Null) | None => Err(AppError::MissingField(field)),
        Some(_) => Err(AppError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

/// JSON integers, or strings holding one (surrounding whitespace allowed).
fn integer_field(body: &Map<String, Value>, field: &'static str) -> Result<i64, AppError> {
    let invalid = || AppError::InvalidField {
        field,
        expected: "an integer",
    };
    match body.get(field) {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        Some(Value::Null) | None => Err(AppError::MissingField(field)),
        Some(_) => Err(invalid()),
    }
}

fn optional_id(body: &Map<String, Value>, field: &'static str) -> Result<Option<i32>, AppError> {
    let invalid = || AppError::InvalidField {
        field,
        expected: "an integer",
    };
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn first_missing_field_wins() {
        let body = object(json!({ "name": "Tatooine", "climated": "arid" }));
        let err = RequestValidator::new_planet(&body).unwrap_err();
        assert!(matches!(err, AppError::MissingField("population")));
    }

    #[test]
    fn presence_is_checked_before_shape() {
        let body = object(json!({ "name": ["not", "text"], "email": "a@b.c" }));
        let err = RequestValidator::new_user(&body).unwrap_err();
        assert!(matches!(err, AppError::MissingField("password")));
    }

    #[test]
    fn null_counts_as_missing() {
        let body = object(json!({ "name": "Leia", "email": null, "password": "x" }));
        let err = RequestValidator::new_user(&body).unwrap_err();
        assert!(matches!(err, AppError::MissingField("email")));
    }

    #[test]
    fn integer_strings_are_accepted() {
        let body = object(json!({
            "name": "Dagobah",
            "population": "0",
            "diameter": 8900,
            "climated": "murky",
            "terrain": "swamp"
        }));
        let planet = RequestValidator::new_planet(&body).unwrap();
        assert_eq!(planet.population, 0);
        assert_eq!(planet.diameter, 8900);
    }

    #[test]
    fn non_integer_is_rejected() {
        let body = object(json!({
            "name": "Chewbacca",
            "specie": "Wookiee",
            "gender": "male",
            "height": "tall",
            "weight": 112,
            "age": 200
        }));
        let err = RequestValidator::new_people(&body).unwrap_err();
        assert_eq!(err.to_string(), "The height field must be an integer.");
    }

    #[test]
    fn fractional_numbers_are_not_integers() {
        let body = object(json!({
            "name": "R2-D2",
            "specie": "Droid",
            "gender": "n/a",
            "height": 96,
            "weight": 32.5,
            "age": 33
        }));
        let err = RequestValidator::new_people(&body).unwrap_err();
        assert!(matches!(err, AppError::InvalidField { field: "weight", .. }));
    }

    #[test]
    fn numeric_text_fields_keep_their_json_text() {
        let body = object(json!({ "name": 1138, "email": "thx@1138.com", "password": true }));
        let user = RequestValidator::new_user(&body).unwrap();
        assert_eq!(user.name, "1138");
        assert_eq!(user.password, "true");
    }

    #[test]
    fn nul_characters_are_refused() {
        let body = object(json!({ "name": "Hoth\u{0000}", "email": "echo@base.org", "password": "x" }));
        let err = RequestValidator::new_user(&body).unwrap_err();
        assert_eq!(err.to_string(), "The name field must be a string.");
    }

    #[test]
    fn optional_planet_id() {
        let mut body = object(json!({
            "name": "Luke",
            "specie": "Human",
            "gender": "male",
            "height": 172,
            "weight": 77,
            "age": 19
        }));
        assert_eq!(RequestValidator::new_people(&body).unwrap().planet_id, None);
        body.insert("planet_id".into(), json!("3"));
        assert_eq!(RequestValidator::new_people(&body).unwrap().planet_id, Some(3));
        body.insert("planet_id".into(), json!(5_000_000_000_i64));
        assert!(RequestValidator::new_people(&body).is_err());
    }
}
