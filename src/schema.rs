//! Schema validation for movie candidates.
//!
//! Candidates arrive as untyped JSON. [`validate`] checks a full record and
//! produces a [`MovieDraft`]; [`validate_partial`] applies the same per-field
//! rules but treats every field as optional and produces a [`MoviePatch`].
//! Every violated field is reported, in schema order, not just the first.
//!
//! Keys outside the schema (including a client-supplied `id`) are ignored.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::model::{Genre, MovieDraft, MoviePatch};

pub const MIN_YEAR: i128 = 1900;
pub const MAX_YEAR: i128 = 2024;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
pub const DEFAULT_RATE: f64 = 0.0;

const TITLE: &str = "title";
const YEAR: &str = "year";
const DIRECTOR: &str = "director";
const DURATION: &str = "duration";
const RATE: &str = "rate";
const POSTER: &str = "poster";
const GENRE: &str = "genre";
const BODY: &str = "body";

const REQUIRED: &str = "Required";

/// Distinguishes the ways a single field can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field is absent.
    Missing,
    /// The value has the wrong JSON type (including `null`).
    InvalidType,
    /// A numeric value lies outside its allowed range.
    OutOfRange,
    /// A string or list that must have content is empty.
    Empty,
    /// The value is not an absolute URL.
    InvalidUrl,
    /// A genre outside the closed set.
    InvalidEnum,
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(rename = "code")]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    fn invalid_type(field: &str, expected: &str, received: &Value) -> Self {
        Self::new(
            field,
            FieldErrorKind::InvalidType,
            format!("Expected {}, received {}", expected, type_name(received)),
        )
    }
}

/// Ordered list of field errors produced by a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the errors reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

type Check<T> = fn(&Value) -> Result<T, ValidationErrors>;

/// Walks the fields of one candidate object, collecting errors as it goes.
struct Fields<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    fn of(candidate: &'a Value) -> Result<Self, ValidationErrors> {
        let object = candidate
            .as_object()
            .ok_or_else(|| FieldError::invalid_type(BODY, "object", candidate))?;
        Ok(Self {
            object,
            errors: ValidationErrors::new(),
        })
    }

    fn required<T>(&mut self, name: &str, missing: &str, check: Check<T>) -> Option<T> {
        if !self.object.contains_key(name) {
            self.errors
                .push(FieldError::new(name, FieldErrorKind::Missing, missing));
            return None;
        }
        self.optional(name, check)
    }

    fn optional<T>(&mut self, name: &str, check: Check<T>) -> Option<T> {
        let value = self.object.get(name)?;
        match check(value) {
            Ok(v) => Some(v),
            Err(errors) => {
                self.errors.extend(errors);
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Validates a complete movie candidate.
///
/// `rate` may be omitted and defaults to [`DEFAULT_RATE`]; every other field
/// is required.
pub fn validate(candidate: &Value) -> Result<MovieDraft, ValidationErrors> {
    let mut fields = Fields::of(candidate)?;

    let title = fields.required(TITLE, "Movie title is required", check_title);
    let year = fields.required(YEAR, REQUIRED, check_year);
    let director = fields.required(DIRECTOR, REQUIRED, check_director);
    let duration = fields.required(DURATION, REQUIRED, check_duration);
    let rate = fields.optional(RATE, check_rate);
    let poster = fields.required(POSTER, REQUIRED, check_poster);
    let genre = fields.required(GENRE, "Movie genre is required", check_genre);

    match (title, year, director, duration, poster, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(poster), Some(genre))
            if fields.errors.is_empty() =>
        {
            Ok(MovieDraft {
                title,
                year,
                director,
                duration,
                rate: rate.unwrap_or(DEFAULT_RATE),
                poster,
                genre,
            })
        }
        _ => Err(fields.errors),
    }
}

/// Validates a partial movie candidate. Absent fields are skipped; present
/// fields must satisfy the same constraints as in [`validate`].
pub fn validate_partial(candidate: &Value) -> Result<MoviePatch, ValidationErrors> {
    let mut fields = Fields::of(candidate)?;

    let patch = MoviePatch {
        title: fields.optional(TITLE, check_title),
        year: fields.optional(YEAR, check_year),
        director: fields.optional(DIRECTOR, check_director),
        duration: fields.optional(DURATION, check_duration),
        rate: fields.optional(RATE, check_rate),
        poster: fields.optional(POSTER, check_poster),
        genre: fields.optional(GENRE, check_genre),
    };
    fields.finish(patch)
}

fn check_title(value: &Value) -> Result<String, ValidationErrors> {
    let title = value.as_str().ok_or_else(|| {
        FieldError::new(TITLE, FieldErrorKind::InvalidType, "Title must be a string")
    })?;
    if title.is_empty() {
        return Err(FieldError::new(TITLE, FieldErrorKind::Empty, "Title must not be empty").into());
    }
    Ok(title.to_string())
}

fn check_year(value: &Value) -> Result<u16, ValidationErrors> {
    let year = integer(YEAR, value)?;
    if year < MIN_YEAR {
        return Err(too_small(YEAR, MIN_YEAR));
    }
    if year > MAX_YEAR {
        return Err(too_big(YEAR, MAX_YEAR));
    }
    u16::try_from(year).map_err(|_| too_big(YEAR, MAX_YEAR))
}

fn check_director(value: &Value) -> Result<String, ValidationErrors> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::invalid_type(DIRECTOR, "string", value).into())
}

fn check_duration(value: &Value) -> Result<u64, ValidationErrors> {
    let duration = integer(DURATION, value)?;
    if duration <= 0 {
        return Err(FieldError::new(
            DURATION,
            FieldErrorKind::OutOfRange,
            "Number must be greater than 0",
        )
        .into());
    }
    u64::try_from(duration).map_err(|_| too_big(DURATION, u64::MAX.into()))
}

fn check_rate(value: &Value) -> Result<f64, ValidationErrors> {
    let rate = value
        .as_f64()
        .ok_or_else(|| FieldError::invalid_type(RATE, "number", value))?;
    if rate < MIN_RATE {
        return Err(FieldError::new(
            RATE,
            FieldErrorKind::OutOfRange,
            format!("Number must be greater than or equal to {}", MIN_RATE),
        )
        .into());
    }
    if rate > MAX_RATE {
        return Err(FieldError::new(
            RATE,
            FieldErrorKind::OutOfRange,
            format!("Number must be less than or equal to {}", MAX_RATE),
        )
        .into());
    }
    Ok(rate)
}

fn check_poster(value: &Value) -> Result<String, ValidationErrors> {
    let poster = value
        .as_str()
        .ok_or_else(|| FieldError::invalid_type(POSTER, "string", value))?;
    if Url::parse(poster).is_err() {
        return Err(FieldError::new(
            POSTER,
            FieldErrorKind::InvalidUrl,
            "Poster must be a valid URL",
        )
        .into());
    }
    Ok(poster.to_string())
}

fn check_genre(value: &Value) -> Result<Vec<Genre>, ValidationErrors> {
    let items = value.as_array().ok_or_else(|| {
        FieldError::new(
            GENRE,
            FieldErrorKind::InvalidType,
            "Movie genre must be an array of enum genres",
        )
    })?;
    if items.is_empty() {
        return Err(FieldError::new(
            GENRE,
            FieldErrorKind::Empty,
            "Movie genre must contain at least one genre",
        )
        .into());
    }

    let mut errors = ValidationErrors::new();
    let mut genres = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let field = format!("{}.{}", GENRE, index);
        match item.as_str() {
            Some(name) => match Genre::from_name(name) {
                Some(genre) => genres.push(genre),
                None => errors.push(FieldError::new(
                    field,
                    FieldErrorKind::InvalidEnum,
                    format!("Invalid enum value. Expected {}, received '{}'", expected_genres(), name),
                )),
            },
            None => errors.push(FieldError::invalid_type(&field, &expected_genres(), item)),
        }
    }

    if errors.is_empty() {
        Ok(genres)
    } else {
        Err(errors)
    }
}

/// Reads an integral JSON number. Floats with a zero fraction count as
/// integers, so `2010.0` is accepted as `2010`.
fn integer(field: &str, value: &Value) -> Result<i128, ValidationErrors> {
    let Value::Number(n) = value else {
        return Err(FieldError::invalid_type(field, "number", value).into());
    };
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e30 => Ok(f as i128),
        _ => Err(FieldError::new(field, FieldErrorKind::InvalidType, "Expected integer, received float").into()),
    }
}

fn too_small(field: &str, min: i128) -> ValidationErrors {
    FieldError::new(
        field,
        FieldErrorKind::OutOfRange,
        format!("Number must be greater than or equal to {}", min),
    )
    .into()
}

fn too_big(field: &str, max: i128) -> ValidationErrors {
    FieldError::new(
        field,
        FieldErrorKind::OutOfRange,
        format!("Number must be less than or equal to {}", max),
    )
    .into()
}

fn expected_genres() -> String {
    Genre::ALL
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inception() -> Value {
        json!({
            "title": "Inception",
            "year": 2010,
            "director": "Nolan",
            "duration": 148,
            "poster": "http://x.com/p.jpg",
            "genre": ["Sci-Fi"]
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut candidate = inception();
        candidate[field] = value;
        candidate
    }

    fn without(field: &str) -> Value {
        let mut candidate = inception();
        candidate.as_object_mut().unwrap().remove(field);
        candidate
    }

    fn kinds(errors: &ValidationErrors, field: &str) -> Vec<FieldErrorKind> {
        errors.for_field(field).map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_record_defaults_rate() {
        let draft = validate(&inception()).unwrap();
        assert_eq!(draft.title, "Inception");
        assert_eq!(draft.year, 2010);
        assert_eq!(draft.director, "Nolan");
        assert_eq!(draft.duration, 148);
        assert_eq!(draft.rate, 0.0);
        assert_eq!(draft.poster, "http://x.com/p.jpg");
        assert_eq!(draft.genre, vec![Genre::SciFi]);
    }

    #[test]
    fn test_explicit_rate_is_kept() {
        let draft = validate(&with("rate", json!(8.8))).unwrap();
        assert_eq!(draft.rate, 8.8);
    }

    #[test]
    fn test_missing_required_fields_are_each_reported() {
        for field in [TITLE, YEAR, DIRECTOR, DURATION, POSTER, GENRE] {
            let errors = validate(&without(field)).unwrap_err();
            assert_eq!(kinds(&errors, field), vec![FieldErrorKind::Missing], "field {}", field);
        }
        let errors = validate(&without(TITLE)).unwrap_err();
        assert_eq!(errors.iter().next().unwrap().message, "Movie title is required");
    }

    #[test]
    fn test_rate_is_optional() {
        assert!(validate(&without(RATE)).is_ok());
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(validate(&with(YEAR, json!(1900))).unwrap().year, 1900);
        assert_eq!(validate(&with(YEAR, json!(2024))).unwrap().year, 2024);
        for year in [1899, 2025, 1800] {
            let errors = validate(&with(YEAR, json!(year))).unwrap_err();
            assert_eq!(kinds(&errors, YEAR), vec![FieldErrorKind::OutOfRange], "year {}", year);
        }
    }

    #[test]
    fn test_year_must_be_integer() {
        let errors = validate(&with(YEAR, json!(2010.5))).unwrap_err();
        assert_eq!(kinds(&errors, YEAR), vec![FieldErrorKind::InvalidType]);

        let errors = validate(&with(YEAR, json!("2010"))).unwrap_err();
        assert_eq!(kinds(&errors, YEAR), vec![FieldErrorKind::InvalidType]);

        assert_eq!(validate(&with(YEAR, json!(2010.0))).unwrap().year, 2010);
    }

    #[test]
    fn test_duration_must_be_positive() {
        for duration in [json!(0), json!(-5)] {
            let errors = validate(&with(DURATION, duration)).unwrap_err();
            assert_eq!(kinds(&errors, DURATION), vec![FieldErrorKind::OutOfRange]);
        }
        assert_eq!(validate(&with(DURATION, json!(1))).unwrap().duration, 1);
    }

    #[test]
    fn test_rate_bounds() {
        assert_eq!(validate(&with(RATE, json!(0))).unwrap().rate, 0.0);
        assert_eq!(validate(&with(RATE, json!(10))).unwrap().rate, 10.0);
        for rate in [json!(-0.1), json!(10.5)] {
            let errors = validate(&with(RATE, rate)).unwrap_err();
            assert_eq!(kinds(&errors, RATE), vec![FieldErrorKind::OutOfRange]);
        }
        let errors = validate(&with(RATE, json!("high"))).unwrap_err();
        assert_eq!(kinds(&errors, RATE), vec![FieldErrorKind::InvalidType]);
    }

    #[test]
    fn test_title_type_and_content() {
        let errors = validate(&with(TITLE, json!(42))).unwrap_err();
        assert_eq!(kinds(&errors, TITLE), vec![FieldErrorKind::InvalidType]);
        assert_eq!(errors.iter().next().unwrap().message, "Title must be a string");

        let errors = validate(&with(TITLE, json!(""))).unwrap_err();
        assert_eq!(kinds(&errors, TITLE), vec![FieldErrorKind::Empty]);
    }

    #[test]
    fn test_null_is_a_type_error_not_a_missing_field() {
        let errors = validate(&with(DIRECTOR, Value::Null)).unwrap_err();
        assert_eq!(kinds(&errors, DIRECTOR), vec![FieldErrorKind::InvalidType]);
        assert_eq!(errors.iter().next().unwrap().message, "Expected string, received null");
    }

    #[test]
    fn test_poster_must_be_url() {
        let errors = validate(&with(POSTER, json!("not a url"))).unwrap_err();
        assert_eq!(kinds(&errors, POSTER), vec![FieldErrorKind::InvalidUrl]);
        assert_eq!(errors.iter().next().unwrap().message, "Poster must be a valid URL");

        let errors = validate(&with(POSTER, json!("/relative/p.jpg"))).unwrap_err();
        assert_eq!(kinds(&errors, POSTER), vec![FieldErrorKind::InvalidUrl]);
    }

    #[test]
    fn test_genre_rules() {
        let errors = validate(&with(GENRE, json!([]))).unwrap_err();
        assert_eq!(kinds(&errors, GENRE), vec![FieldErrorKind::Empty]);

        let errors = validate(&with(GENRE, json!("Action"))).unwrap_err();
        assert_eq!(kinds(&errors, GENRE), vec![FieldErrorKind::InvalidType]);

        let errors = validate(&with(GENRE, json!(["Action", "Western", "action", 3]))).unwrap_err();
        assert_eq!(kinds(&errors, "genre.1"), vec![FieldErrorKind::InvalidEnum]);
        assert_eq!(kinds(&errors, "genre.2"), vec![FieldErrorKind::InvalidEnum]);
        assert_eq!(kinds(&errors, "genre.3"), vec![FieldErrorKind::InvalidType]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_all_violations_are_reported_in_schema_order() {
        let candidate = json!({
            "title": 1,
            "year": 1800,
            "duration": 0,
            "poster": "nope",
            "genre": ["Western"]
        });
        let errors = validate(&candidate).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "year", "director", "duration", "poster", "genre.0"]);
    }

    #[test]
    fn test_non_object_candidate() {
        for candidate in [json!([]), json!("movie"), Value::Null] {
            let errors = validate(&candidate).unwrap_err();
            assert_eq!(kinds(&errors, BODY), vec![FieldErrorKind::InvalidType]);
            assert!(validate_partial(&candidate).is_err());
        }
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut candidate = inception();
        candidate["id"] = json!("client-chosen");
        candidate["budget"] = json!(160_000_000);
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_validation_does_not_mutate_candidate() {
        let candidate = inception();
        let before = candidate.clone();
        validate(&candidate).unwrap();
        validate_partial(&candidate).unwrap();
        assert_eq!(candidate, before);
    }

    #[test]
    fn test_partial_empty_is_valid() {
        let patch = validate_partial(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_partial_keeps_only_present_fields() {
        let patch = validate_partial(&json!({ "year": 1999, "genre": ["Drama"] })).unwrap();
        assert_eq!(patch.year, Some(1999));
        assert_eq!(patch.genre, Some(vec![Genre::Drama]));
        assert_eq!(patch.title, None);
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn test_partial_constrains_present_fields() {
        let errors = validate_partial(&json!({ "year": 2025, "rate": 11 })).unwrap_err();
        assert_eq!(kinds(&errors, YEAR), vec![FieldErrorKind::OutOfRange]);
        assert_eq!(kinds(&errors, RATE), vec![FieldErrorKind::OutOfRange]);

        let errors = validate_partial(&json!({ "title": null })).unwrap_err();
        assert_eq!(kinds(&errors, TITLE), vec![FieldErrorKind::InvalidType]);
    }

    #[test]
    fn test_errors_serialize_as_field_message_list() {
        let errors = validate_partial(&json!({ "year": 1800 })).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([{
                "field": "year",
                "message": "Number must be greater than or equal to 1900",
                "code": "out_of_range"
            }])
        );
        assert_eq!(errors.to_string(), "year: Number must be greater than or equal to 1900");
    }
}
