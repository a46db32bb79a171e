//! Payload validation.
//!
//! One generic routine interprets the constraint tables in [`crate::schema`].
//! Fields are checked in declaration order and errors accumulate across fields;
//! each field contributes at most one error (the first check it fails).

use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::format;
use crate::instance::{FieldValue, ValidatedInstance};
use crate::schema::{Constraints, EnumSchema, FieldSpec, FieldType, ObjectSchema};

/// A schema that can check an untyped payload.
pub trait Validate {
    type Output;

    /// Pure function of schema and payload. Malformed input is reported as data, never a panic.
    fn validate(&self, raw: &Value) -> Result<Self::Output, Vec<ValidationError>>;
}

/// `validate(schema, raw_payload) -> Result<instance, errors>`.
pub fn validate<S>(schema: &S, raw: &Value) -> Result<S::Output, Vec<ValidationError>>
where
    S: Validate + ?Sized,
{
    schema.validate(raw)
}

impl Validate for ObjectSchema {
    type Output = ValidatedInstance;

    fn validate(&self, raw: &Value) -> Result<ValidatedInstance, Vec<ValidationError>> {
        let Some(obj) = raw.as_object() else {
            return Err(vec![ValidationError::type_mismatch("", "value is not a valid dict")]);
        };

        let mut fields = Vec::with_capacity(self.fields().len());
        let mut errors = Vec::new();

        for spec in self.fields() {
            match resolve_field(spec, obj.get(spec.name())) {
                Ok(value) => fields.push((spec.name().to_string(), value)),
                Err(mut errs) => errors.append(&mut errs),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedInstance::from_fields(fields))
        } else {
            tracing::trace!(schema = self.name(), errors = errors.len(), "payload rejected");
            Err(errors)
        }
    }
}

impl Validate for EnumSchema {
    type Output = String;

    fn validate(&self, raw: &Value) -> Result<String, Vec<ValidationError>> {
        check_enum(self, raw, "").map_err(|e| vec![e])
    }
}

fn resolve_field(spec: &FieldSpec, raw: Option<&Value>) -> Result<FieldValue, Vec<ValidationError>> {
    let path = spec.name();
    match raw {
        None | Some(Value::Null) if !spec.is_required() => {
            Ok(spec.default_value().cloned().unwrap_or(FieldValue::Null))
        }
        None => Err(vec![ValidationError::missing(path)]),
        Some(Value::Null) => Err(vec![ValidationError::type_mismatch(
            path,
            "none is not an allowed value",
        )]),
        Some(value) => check_value(spec, value, path),
    }
}

/// Coerce and check one present, non-null value against its spec.
pub(crate) fn check_value(
    spec: &FieldSpec,
    raw: &Value,
    path: &str,
) -> Result<FieldValue, Vec<ValidationError>> {
    let constraints = spec.constraints();
    let single = |e: ValidationError| vec![e];

    match spec.field_type() {
        FieldType::String => {
            let s = coerce_string(raw)
                .ok_or_else(|| single(ValidationError::type_mismatch(path, "str type expected")))?;
            check_length(constraints, &s, path).map_err(single)?;
            Ok(FieldValue::String(s))
        }
        FieldType::Integer => {
            let n = coerce_integer(raw).ok_or_else(|| {
                single(ValidationError::type_mismatch(path, "value is not a valid integer"))
            })?;
            check_bounds(constraints, n, path).map_err(single)?;
            Ok(FieldValue::Integer(n))
        }
        FieldType::Boolean => coerce_bool(raw).map(FieldValue::Boolean).ok_or_else(|| {
            single(ValidationError::type_mismatch(
                path,
                "value could not be parsed to a boolean",
            ))
        }),
        FieldType::Email => {
            let s = expect_str(raw, path).map_err(single)?;
            check_length(constraints, s, path).map_err(single)?;
            if !format::is_valid_email(s) {
                return Err(single(ValidationError::new(
                    path,
                    ErrorKind::MalformedFormat,
                    "value is not a valid email address",
                )));
            }
            Ok(FieldValue::Email(s.to_owned()))
        }
        FieldType::Url => {
            let s = expect_str(raw, path).map_err(single)?;
            check_length(constraints, s, path).map_err(single)?;
            format::check_http_url(s).map_err(|msg| {
                single(ValidationError::new(path, ErrorKind::MalformedFormat, msg))
            })?;
            Ok(FieldValue::Url(s.to_owned()))
        }
        FieldType::Enum { schema } => check_enum(schema, raw, path)
            .map(FieldValue::Enum)
            .map_err(single),
        FieldType::Object { schema } => schema.validate(raw).map(FieldValue::Object).map_err(|errors| {
            errors.into_iter().map(|e| e.nested_under(path)).collect()
        }),
    }
}

fn expect_str<'v>(raw: &'v Value, path: &str) -> Result<&'v str, ValidationError> {
    raw.as_str()
        .ok_or_else(|| ValidationError::type_mismatch(path, "str type expected"))
}

/// Plain strings also accept numbers, as their decimal text.
fn coerce_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            let integral = f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64;
            integral.then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn check_length(c: &Constraints, s: &str, path: &str) -> Result<(), ValidationError> {
    let len = s.chars().count();
    if let Some(min) = c.min_length {
        if len < min {
            return Err(ValidationError::new(
                path,
                ErrorKind::TooShort,
                format!("ensure this value has at least {min} characters"),
            ));
        }
    }
    if let Some(max) = c.max_length {
        if len > max {
            return Err(ValidationError::new(
                path,
                ErrorKind::TooLong,
                format!("ensure this value has at most {max} characters"),
            ));
        }
    }
    Ok(())
}

fn check_bounds(c: &Constraints, n: i64, path: &str) -> Result<(), ValidationError> {
    let violated = |msg: String| Err(ValidationError::new(path, ErrorKind::OutOfRange, msg));

    if let Some(gt) = c.gt {
        if n <= gt {
            return violated(format!("ensure this value is greater than {gt}"));
        }
    }
    if let Some(ge) = c.ge {
        if n < ge {
            return violated(format!("ensure this value is greater than or equal to {ge}"));
        }
    }
    if let Some(lt) = c.lt {
        if n >= lt {
            return violated(format!("ensure this value is less than {lt}"));
        }
    }
    if let Some(le) = c.le {
        if n > le {
            return violated(format!("ensure this value is less than or equal to {le}"));
        }
    }
    Ok(())
}

fn check_enum(schema: &EnumSchema, raw: &Value, path: &str) -> Result<String, ValidationError> {
    match raw.as_str() {
        Some(label) if schema.contains(label) => Ok(label.to_owned()),
        _ => {
            let permitted = schema
                .labels()
                .iter()
                .map(|l| format!("'{l}'"))
                .collect::<Vec<_>>()
                .join(", ");
            Err(ValidationError::new(
                path,
                ErrorKind::NotInEnum,
                format!("value is not a valid enumeration member; permitted: {permitted}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use proptest::prelude::*;
    use serde_json::json;

    fn hair_color() -> Arc<EnumSchema> {
        Arc::new(EnumSchema::new("HairColor", ["white", "black", "brown", "blonde", "red"]).unwrap())
    }

    fn location() -> Arc<ObjectSchema> {
        let text = |name: &str| FieldSpec::string(name).min_length(1).max_length(50);
        Arc::new(
            ObjectSchema::builder("Location")
                .field(text("city"))
                .field(text("state"))
                .field(text("country"))
                .build()
                .unwrap(),
        )
    }

    fn person() -> Arc<ObjectSchema> {
        Arc::new(
            ObjectSchema::builder("Person")
                .field(FieldSpec::string("first_name").min_length(1).max_length(50))
                .field(FieldSpec::string("last_name").min_length(1).max_length(50))
                .field(FieldSpec::integer("age").gt(0).le(115))
                .field(FieldSpec::enumeration("hair_color", hair_color()).optional())
                .field(FieldSpec::boolean("is_married").optional())
                .field(FieldSpec::email("email").optional())
                .field(FieldSpec::url("website").optional())
                .build()
                .unwrap(),
        )
    }

    fn composite() -> ObjectSchema {
        ObjectSchema::builder("UpdatePerson")
            .field(FieldSpec::object("person", person()))
            .field(FieldSpec::object("location", location()))
            .build()
            .unwrap()
    }

    fn valid_person() -> Value {
        json!({"first_name": "Miguel", "last_name": "Torres", "age": 25})
    }

    fn kinds(errors: &[ValidationError]) -> Vec<(&str, ErrorKind)> {
        errors.iter().map(|e| (e.path.as_str(), e.kind)).collect()
    }

    #[test]
    fn valid_payload_yields_coerced_instance() {
        let raw = json!({
            "first_name": "Miguel",
            "last_name": "Torres",
            "age": "25",
            "hair_color": "black",
            "is_married": "false",
            "email": "miguel@hola.com",
            "website": "https://www.platzi.com"
        });

        let instance = validate(person().as_ref(), &raw).unwrap();
        assert_eq!(instance.integer("age").unwrap(), 25);
        assert_eq!(instance.get("hair_color"), Some(&FieldValue::Enum("black".into())));
        assert_eq!(instance.opt_boolean("is_married").unwrap(), Some(false));
        assert_eq!(instance.get("email"), Some(&FieldValue::Email("miguel@hola.com".into())));
    }

    #[test]
    fn optional_absent_fields_are_null() {
        let instance = validate(person().as_ref(), &valid_person()).unwrap();
        assert_eq!(instance.len(), 7);
        assert!(instance.get("hair_color").unwrap().is_null());
        assert!(instance.get("website").unwrap().is_null());
    }

    #[test]
    fn optional_absent_field_takes_default() {
        let schema = ObjectSchema::builder("LoginOut")
            .field(FieldSpec::string("username").max_length(20))
            .field(FieldSpec::string("message").optional().default("Login successfully!"))
            .build()
            .unwrap();

        let instance = validate(&schema, &json!({"username": "miguel2021"})).unwrap();
        assert_eq!(instance.str("message").unwrap(), "Login successfully!");
    }

    #[test]
    fn missing_required_fields_accumulate() {
        let errors = validate(person().as_ref(), &json!({"last_name": "Torres"})).unwrap_err();
        assert_eq!(
            kinds(&errors),
            [("first_name", ErrorKind::MissingRequired), ("age", ErrorKind::MissingRequired)]
        );
    }

    #[test]
    fn every_violation_is_reported_at_once() {
        let raw = json!({
            "first_name": "",
            "last_name": "x".repeat(51),
            "age": 0,
            "hair_color": "purple",
            "email": "nope",
            "website": "platzi.com"
        });
        let errors = validate(person().as_ref(), &raw).unwrap_err();
        assert_eq!(
            kinds(&errors),
            [
                ("first_name", ErrorKind::TooShort),
                ("last_name", ErrorKind::TooLong),
                ("age", ErrorKind::OutOfRange),
                ("hair_color", ErrorKind::NotInEnum),
                ("email", ErrorKind::MalformedFormat),
                ("website", ErrorKind::MalformedFormat),
            ]
        );
    }

    #[test]
    fn age_bounds() {
        let check = |age: Value| {
            let mut raw = valid_person();
            raw["age"] = age;
            validate(person().as_ref(), &raw)
        };

        assert_eq!(check(json!(0)).unwrap_err()[0].kind, ErrorKind::OutOfRange);
        assert!(check(json!(1)).is_ok());
        assert!(check(json!(115)).is_ok());
        assert_eq!(check(json!(116)).unwrap_err()[0].kind, ErrorKind::OutOfRange);
        assert_eq!(
            check(json!("twenty")).unwrap_err()[0].kind,
            ErrorKind::TypeMismatch
        );
        assert_eq!(check(json!(25.5)).unwrap_err()[0].kind, ErrorKind::TypeMismatch);
        assert!(check(json!(25.0)).is_ok());
    }

    #[test]
    fn null_on_required_is_type_mismatch() {
        let mut raw = valid_person();
        raw["age"] = Value::Null;
        let errors = validate(person().as_ref(), &raw).unwrap_err();
        assert_eq!(kinds(&errors), [("age", ErrorKind::TypeMismatch)]);
    }

    #[test]
    fn numbers_are_accepted_as_their_text() {
        let mut raw = valid_person();
        raw["first_name"] = json!(42);
        raw["last_name"] = json!(1.5);
        let instance = validate(person().as_ref(), &raw).unwrap();
        assert_eq!(instance.str("first_name").unwrap(), "42");
        assert_eq!(instance.str("last_name").unwrap(), "1.5");

        let password = ObjectSchema::builder("Secret")
            .field(FieldSpec::string("password").min_length(8))
            .build()
            .unwrap();
        let instance = validate(&password, &json!({"password": 12345678})).unwrap();
        assert_eq!(instance.str("password").unwrap(), "12345678");

        let errors = validate(&password, &json!({"password": 1234})).unwrap_err();
        assert_eq!(kinds(&errors), [("password", ErrorKind::TooShort)]);
    }

    #[test]
    fn strings_reject_booleans_and_containers() {
        for bad in [json!(true), json!(["Miguel"]), json!({"name": "Miguel"})] {
            let mut raw = valid_person();
            raw["first_name"] = bad;
            let errors = validate(person().as_ref(), &raw).unwrap_err();
            assert_eq!(kinds(&errors), [("first_name", ErrorKind::TypeMismatch)]);
        }
    }

    #[test]
    fn formats_and_enums_reject_numbers() {
        let mut raw = valid_person();
        raw["email"] = json!(42);
        raw["hair_color"] = json!(5);
        let errors = validate(person().as_ref(), &raw).unwrap_err();
        assert_eq!(
            kinds(&errors),
            [("hair_color", ErrorKind::NotInEnum), ("email", ErrorKind::TypeMismatch)]
        );
    }

    #[test]
    fn boolean_coercion() {
        for (raw, expected) in [
            (json!(true), Some(true)),
            (json!("yes"), Some(true)),
            (json!("OFF"), Some(false)),
            (json!(0), Some(false)),
            (json!("maybe"), None),
            (json!(2), None),
        ] {
            assert_eq!(coerce_bool(&raw), expected, "{raw}");
        }
    }

    #[test]
    fn nested_missing_field_is_located_by_dotted_path() {
        let raw = json!({
            "person": {"first_name": "Miguel", "last_name": "Torres", "age": 200},
            "location": {"city": "Caracas", "state": "Distrito Capital"}
        });

        let errors = validate(&composite(), &raw).unwrap_err();
        assert_eq!(
            kinds(&errors),
            [
                ("person.age", ErrorKind::OutOfRange),
                ("location.country", ErrorKind::MissingRequired),
            ]
        );
    }

    #[test]
    fn nested_object_of_wrong_type() {
        let raw = json!({"person": "Miguel", "location": {"city": "a", "state": "b", "country": "c"}});
        let errors = validate(&composite(), &raw).unwrap_err();
        assert_eq!(kinds(&errors), [("person", ErrorKind::TypeMismatch)]);
    }

    #[test]
    fn non_object_payload_fails_at_root() {
        let errors = validate(person().as_ref(), &json!([1, 2])).unwrap_err();
        assert_eq!(kinds(&errors), [("", ErrorKind::TypeMismatch)]);
    }

    #[test]
    fn undeclared_keys_are_ignored() {
        let mut raw = valid_person();
        raw["nickname"] = json!("Mike");
        let instance = validate(person().as_ref(), &raw).unwrap();
        assert!(instance.get("nickname").is_none());
    }

    #[test]
    fn enum_schema_validates_bare_scalars() {
        let colors = hair_color();
        assert_eq!(validate(colors.as_ref(), &json!("black")).unwrap(), "black");

        let errors = validate(colors.as_ref(), &json!("purple")).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::NotInEnum);
        assert!(errors[0].message.contains("'blonde'"));

        assert!(validate(colors.as_ref(), &json!("Black")).is_err());
    }

    fn person_strategy() -> impl Strategy<Value = Value> {
        (
            "[A-Za-z]{1,50}",
            "[A-Za-z]{1,50}",
            1i64..=115,
            proptest::option::of(prop::sample::select(vec!["white", "black", "brown", "blonde", "red"])),
            proptest::option::of(any::<bool>()),
            proptest::option::of("[a-z]{1,12}@[a-z]{1,12}\\.(com|org|io)"),
            proptest::option::of("https?://[a-z]{1,12}\\.(com|org)(/[a-z]{0,8})?"),
        )
            .prop_map(|(first, last, age, hair, married, email, website)| {
                let mut raw = json!({"first_name": first, "last_name": last, "age": age});
                if let Some(h) = hair {
                    raw["hair_color"] = json!(h);
                }
                if let Some(m) = married {
                    raw["is_married"] = json!(m);
                }
                if let Some(e) = email {
                    raw["email"] = json!(e);
                }
                if let Some(w) = website {
                    raw["website"] = json!(w);
                }
                raw
            })
    }

    fn location_strategy() -> impl Strategy<Value = Value> {
        ("[A-Za-z ]{1,50}", "[A-Za-z ]{1,50}", "[A-Za-z ]{1,50}")
            .prop_map(|(city, state, country)| json!({"city": city, "state": state, "country": country}))
    }

    fn login_out() -> ObjectSchema {
        ObjectSchema::builder("LoginOut")
            .field(FieldSpec::string("username").max_length(20))
            .field(FieldSpec::string("message").optional().default("Login successfully!"))
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: valid payloads pass and echo their input values.
        #[test]
        fn valid_payloads_round_trip(raw in person_strategy()) {
            let instance = validate(person().as_ref(), &raw).unwrap();
            for (name, value) in raw.as_object().unwrap() {
                prop_assert_eq!(&instance.get(name).unwrap().to_value(), value);
            }
        }

        /// Property: validating an instance's raw form again is a fixed point.
        #[test]
        fn validation_is_idempotent(raw in person_strategy()) {
            let schema = person();
            let first = validate(schema.as_ref(), &raw).unwrap();
            let second = validate(schema.as_ref(), &first.to_value()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: nested objects and format fields survive a second pass unchanged.
        #[test]
        fn nested_validation_is_idempotent(person in person_strategy(), location in location_strategy()) {
            let schema = composite();
            let raw = json!({"person": person, "location": location});
            let first = validate(&schema, &raw).unwrap();
            let second = validate(&schema, &first.to_value()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: a filled-in default is stable when validated again.
        #[test]
        fn defaults_are_idempotent(username in "[a-z0-9]{1,20}", message in proptest::option::of("[A-Za-z ]{0,40}")) {
            let schema = login_out();
            let mut raw = json!({"username": username});
            if let Some(m) = &message {
                raw["message"] = json!(m);
            }
            let first = validate(&schema, &raw).unwrap();
            prop_assert_eq!(
                first.str("message").unwrap(),
                message.as_deref().unwrap_or("Login successfully!")
            );
            let second = validate(&schema, &first.to_value()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: length limits are inclusive; one past them fails with the matching kind.
        #[test]
        fn string_length_boundaries(len in 0usize..60) {
            let mut raw = valid_person();
            raw["first_name"] = json!("a".repeat(len));
            let result = validate(person().as_ref(), &raw);
            match len {
                0 => prop_assert_eq!(result.unwrap_err()[0].kind, ErrorKind::TooShort),
                1..=50 => prop_assert!(result.is_ok()),
                _ => prop_assert_eq!(result.unwrap_err()[0].kind, ErrorKind::TooLong),
            }
        }

        /// Property: one missing required field yields exactly one missing_required for it.
        #[test]
        fn single_missing_field(idx in 0usize..3) {
            let field = ["first_name", "last_name", "age"][idx];
            let mut raw = valid_person();
            raw.as_object_mut().unwrap().remove(field);
            let errors = validate(person().as_ref(), &raw).unwrap_err();
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(errors[0].path.as_str(), field);
            prop_assert_eq!(errors[0].kind, ErrorKind::MissingRequired);
        }
    }
}
