//! Fail-fast validation of raw upstream records.
//!
//! Checks run in a fixed order and stop at the first violation:
//! 1. the value is a JSON object
//! 2. every required scalar is present
//! 3. every required scalar has the right primitive type
//! 4. string formats (email, image URL, birth date)
//! 5. nested address and company objects, when present, checked the same way

use serde_json::{Map, Value};

use super::formats::{is_email, is_timestamp, is_url};
use super::{Problem, ValidationError, ValidationResult};
use crate::models::{Address, Company, Profile};

/// Name used for the record itself when it is not an object.
const ROOT: &str = "profile";

/// Required top-level fields, in reporting order.
const REQUIRED: &[&str] = &[
    "id",
    "firstName",
    "lastName",
    "age",
    "email",
    "phone",
    "username",
    "image",
];

const ADDRESS_REQUIRED: &[&str] = &["address", "city", "state", "country"];
const COMPANY_REQUIRED: &[&str] = &["name", "title"];

/// Validate one raw record and narrow it into a [`Profile`].
///
/// Unknown fields are ignored; known fields are copied without coercion.
pub fn validate(raw: &Value) -> ValidationResult {
    let fields = Fields::root(raw)?;
    fields.require_all(REQUIRED)?;

    let id = fields.unsigned("id")?;
    let first_name = fields.string("firstName")?;
    let last_name = fields.string("lastName")?;
    let age = fields.unsigned("age")?;
    let email = fields.string("email")?;
    let phone = fields.string("phone")?;
    let username = fields.string("username")?;
    let image = fields.string("image")?;
    let birth_date = fields.optional_string("birthDate")?;

    let age = u32::try_from(age).map_err(|_| fields.error("age", Problem::OutOfRange))?;

    if !is_email(email) {
        return Err(fields.error("email", Problem::InvalidFormat));
    }
    if !is_url(image) {
        return Err(fields.error("image", Problem::InvalidFormat));
    }
    if let Some(date) = birth_date {
        if !is_timestamp(date) {
            return Err(fields.error("birthDate", Problem::InvalidFormat));
        }
    }

    let address = match fields.optional_object("address")? {
        Some(nested) => {
            nested.require_all(ADDRESS_REQUIRED)?;
            Some(Address {
                address: nested.string("address")?.to_string(),
                city: nested.string("city")?.to_string(),
                state: nested.string("state")?.to_string(),
                country: nested.string("country")?.to_string(),
            })
        }
        None => None,
    };

    let company = match fields.optional_object("company")? {
        Some(nested) => {
            nested.require_all(COMPANY_REQUIRED)?;
            Some(Company {
                name: nested.string("name")?.to_string(),
                title: nested.string("title")?.to_string(),
            })
        }
        None => None,
    };

    Ok(Profile {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age,
        email: email.to_string(),
        phone: phone.to_string(),
        username: username.to_string(),
        image: image.to_string(),
        birth_date: birth_date.map(str::to_string),
        address,
        company,
    })
}

/// Validate a batch, splitting survivors from rejections.
///
/// Order of the surviving profiles follows the input order.
pub fn validate_all(records: &[Value]) -> (Vec<Profile>, Vec<ValidationError>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match validate(record) {
            Ok(profile) => valid.push(profile),
            Err(error) => rejected.push(error),
        }
    }

    (valid, rejected)
}

/// Typed accessors over one JSON object, reporting dotted field paths.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    prefix: Option<&'a str>,
}

impl<'a> Fields<'a> {
    fn root(raw: &'a Value) -> Result<Self, ValidationError> {
        match raw {
            Value::Object(map) => Ok(Self { map, prefix: None }),
            _ => Err(ValidationError::new(ROOT, Problem::Expected("object"))),
        }
    }

    fn path(&self, name: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.to_string(),
        }
    }

    fn error(&self, name: &str, problem: Problem) -> ValidationError {
        ValidationError::new(self.path(name), problem)
    }

    fn required(&self, name: &str) -> Result<&'a Value, ValidationError> {
        match self.map.get(name) {
            Some(Value::Null) | None => Err(self.error(name, Problem::Missing)),
            Some(value) => Ok(value),
        }
    }

    /// Report the first of `names` that is absent, before any type check.
    fn require_all(&self, names: &[&str]) -> Result<(), ValidationError> {
        for name in names {
            self.required(name)?;
        }
        Ok(())
    }

    fn string(&self, name: &str) -> Result<&'a str, ValidationError> {
        self.required(name)?
            .as_str()
            .ok_or_else(|| self.error(name, Problem::Expected("string")))
    }

    fn unsigned(&self, name: &str) -> Result<u64, ValidationError> {
        let value = self.required(name)?;
        if !value.is_number() {
            return Err(self.error(name, Problem::Expected("number")));
        }
        value
            .as_u64()
            .ok_or_else(|| self.error(name, Problem::Expected("non-negative integer")))
    }

    fn optional_string(&self, name: &str) -> Result<Option<&'a str>, ValidationError> {
        match self.map.get(name) {
            Some(Value::Null) | None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.error(name, Problem::Expected("string"))),
        }
    }

    fn optional_object(&self, name: &'a str) -> Result<Option<Fields<'a>>, ValidationError> {
        match self.map.get(name) {
            Some(Value::Null) | None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Fields {
                map,
                prefix: Some(name),
            })),
            Some(_) => Err(self.error(name, Problem::Expected("object"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_profile() -> Value {
        json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "age": 28,
            "gender": "female",
            "email": "emily.johnson@x.dummyjson.com",
            "phone": "+81 965-431-3024",
            "username": "emilys",
            "birthDate": "1996-5-30",
            "image": "https://dummyjson.com/icon/emilys/128",
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Mississippi",
                "stateCode": "MS",
                "country": "United States"
            },
            "company": {
                "department": "Engineering",
                "name": "Dooley, Kozey and Cronin",
                "title": "Sales Manager"
            }
        })
    }

    fn reason(raw: &Value) -> String {
        validate(raw).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_profile_is_narrowed() {
        let profile = validate(&raw_profile()).unwrap();

        assert_eq!(profile.id, 1);
        assert_eq!(profile.first_name, "Emily");
        assert_eq!(profile.age, 28);
        assert_eq!(profile.birth_date.as_deref(), Some("1996-5-30"));
        assert_eq!(profile.address.as_ref().unwrap().city, "Phoenix");
        assert_eq!(profile.company.as_ref().unwrap().title, "Sales Manager");

        // Unknown fields are dropped, not carried through
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("maidenName").is_none());
        assert!(json["address"].get("stateCode").is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(reason(&Value::Null), "profile: expected object");
        assert_eq!(reason(&json!([1, 2])), "profile: expected object");
        assert_eq!(reason(&json!("emily")), "profile: expected object");
    }

    #[test]
    fn test_invalid_email() {
        let mut raw = raw_profile();
        raw["email"] = json!("not-an-email");
        assert_eq!(reason(&raw), "email: invalid format");
    }

    #[test]
    fn test_missing_field_named() {
        let mut raw = raw_profile();
        raw.as_object_mut().unwrap().remove("username");
        assert_eq!(reason(&raw), "username: missing");
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let mut raw = raw_profile();
        raw["phone"] = Value::Null;
        assert_eq!(reason(&raw), "phone: missing");
    }

    #[test]
    fn test_wrong_primitive_types() {
        let mut raw = raw_profile();
        raw["firstName"] = json!(12);
        assert_eq!(reason(&raw), "firstName: expected string");

        let mut raw = raw_profile();
        raw["age"] = json!("28");
        assert_eq!(reason(&raw), "age: expected number");

        let mut raw = raw_profile();
        raw["age"] = json!(-3);
        assert_eq!(reason(&raw), "age: expected non-negative integer");

        let mut raw = raw_profile();
        raw["id"] = json!(1.5);
        assert_eq!(reason(&raw), "id: expected non-negative integer");
    }

    #[test]
    fn test_age_out_of_range() {
        let mut raw = raw_profile();
        raw["age"] = json!(u64::from(u32::MAX) + 1);
        assert_eq!(reason(&raw), "age: out of range");
    }

    #[test]
    fn test_first_violation_wins() {
        // Type checks run before format checks
        let mut raw = raw_profile();
        raw["email"] = json!("not-an-email");
        raw["image"] = json!("not a url");
        raw.as_object_mut().unwrap().remove("lastName");
        assert_eq!(reason(&raw), "lastName: missing");

        // Email is checked before the image URL
        let mut raw = raw_profile();
        raw["email"] = json!("not-an-email");
        raw["image"] = json!("not a url");
        assert_eq!(reason(&raw), "email: invalid format");
    }

    #[test]
    fn test_missing_field_beats_earlier_wrong_type() {
        let mut raw = raw_profile();
        raw["firstName"] = json!(12);
        raw["age"] = json!("old");
        raw.as_object_mut().unwrap().remove("username");
        assert_eq!(reason(&raw), "username: missing");

        let mut raw = raw_profile();
        raw["address"]["address"] = json!(626);
        raw["address"].as_object_mut().unwrap().remove("country");
        assert_eq!(reason(&raw), "address.country: missing");
    }

    #[test]
    fn test_image_must_be_url() {
        let mut raw = raw_profile();
        raw["image"] = json!("emilys.png");
        assert_eq!(reason(&raw), "image: invalid format");
    }

    #[test]
    fn test_birth_date_format() {
        let mut raw = raw_profile();
        raw["birthDate"] = json!("30/05/1996");
        assert_eq!(reason(&raw), "birthDate: invalid format");

        let mut raw = raw_profile();
        raw["birthDate"] = json!(19960530);
        assert_eq!(reason(&raw), "birthDate: expected string");
    }

    #[test]
    fn test_optional_sections_may_be_absent() {
        let mut raw = raw_profile();
        let map = raw.as_object_mut().unwrap();
        map.remove("address");
        map.remove("birthDate");
        map.insert("company".to_string(), Value::Null);

        let profile = validate(&raw).unwrap();
        assert!(profile.address.is_none());
        assert!(profile.company.is_none());
        assert!(profile.birth_date.is_none());
    }

    #[test]
    fn test_nested_fields_use_dotted_paths() {
        let mut raw = raw_profile();
        raw["address"].as_object_mut().unwrap().remove("city");
        assert_eq!(reason(&raw), "address.city: missing");

        let mut raw = raw_profile();
        raw["company"]["title"] = json!(false);
        assert_eq!(reason(&raw), "company.title: expected string");

        let mut raw = raw_profile();
        raw["address"] = json!("626 Main Street");
        assert_eq!(reason(&raw), "address: expected object");
    }

    #[test]
    fn test_revalidation_is_identity() {
        let profile = validate(&raw_profile()).unwrap();
        let again = validate(&serde_json::to_value(&profile).unwrap()).unwrap();
        assert_eq!(profile, again);
    }

    #[test]
    fn test_validate_all_splits_batch() {
        let mut broken = raw_profile();
        broken["email"] = json!("nope");

        let mut second = raw_profile();
        second["id"] = json!(2);

        let (valid, rejected) = validate_all(&[raw_profile(), broken, json!(null), second]);

        assert_eq!(valid.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].to_string(), "email: invalid format");
        assert_eq!(rejected[1].to_string(), "profile: expected object");
    }
}
