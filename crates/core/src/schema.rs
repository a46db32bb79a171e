//! Declarative schema definitions.
//!
//! A schema is a data-driven constraint table: each [`FieldSpec`] carries its type,
//! optionality, constraint descriptor and documentation metadata as plain values,
//! so constraints can be inspected (and serialized) independently of validation.
//!
//! Schemas are only obtainable through [`ObjectSchemaBuilder::build`] and
//! [`EnumSchema::new`], which reject internally inconsistent declarations.
//! Once built they are immutable and meant to be shared behind `Arc`.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::instance::FieldValue;
use crate::validator;

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Email,
    Url,
    Enum { schema: Arc<EnumSchema> },
    Object { schema: Arc<ObjectSchema> },
}

impl FieldType {
    /// Returns the type name used in error messages and schema descriptions.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Enum { .. } => "enum",
            FieldType::Object { .. } => "object",
        }
    }

    /// Whether length constraints apply to values of this type.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Email | FieldType::Url)
    }
}

/// Constraint descriptor for one field.
///
/// Lengths count characters, not bytes. `gt`/`lt` are exclusive bounds,
/// `ge`/`le` inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub le: Option<i64>,
}

impl Constraints {
    fn has_length(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    fn has_bounds(&self) -> bool {
        self.gt.is_some() || self.ge.is_some() || self.lt.is_some() || self.le.is_some()
    }

    /// Inclusive range of integers the bounds admit; `None` when no integer does.
    ///
    /// An exclusive bound at the edge of `i64` (`gt(i64::MAX)`, `lt(i64::MIN)`) admits nothing.
    pub fn admitted_range(&self) -> Option<(i64, i64)> {
        let mut lo = match self.gt {
            Some(gt) => gt.checked_add(1)?,
            None => i64::MIN,
        };
        if let Some(ge) = self.ge {
            lo = lo.max(ge);
        }
        let mut hi = match self.lt {
            Some(lt) => lt.checked_sub(1)?,
            None => i64::MAX,
        };
        if let Some(le) = self.le {
            hi = hi.min(le);
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// Documentation metadata. Never affects validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// A single field's type and constraint declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    name: String,
    #[serde(flatten)]
    field_type: FieldType,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    constraints: Constraints,
    #[serde(flatten)]
    meta: FieldMeta,
    #[serde(skip)]
    resolved_default: Option<FieldValue>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            constraints: Constraints::default(),
            meta: FieldMeta::default(),
            resolved_default: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Url)
    }

    pub fn enumeration(name: impl Into<String>, schema: Arc<EnumSchema>) -> Self {
        Self::new(name, FieldType::Enum { schema })
    }

    pub fn object(name: impl Into<String>, schema: Arc<ObjectSchema>) -> Self {
        Self::new(name, FieldType::Object { schema })
    }

    /// Mark the field optional. Absent (or `null`) values resolve to the default, or `null`.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Declare a default. Only legal on optional fields; checked at build time.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.constraints.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.constraints.max_length = Some(n);
        self
    }

    pub fn gt(mut self, n: i64) -> Self {
        self.constraints.gt = Some(n);
        self
    }

    pub fn ge(mut self, n: i64) -> Self {
        self.constraints.ge = Some(n);
        self
    }

    pub fn lt(mut self, n: i64) -> Self {
        self.constraints.lt = Some(n);
        self
    }

    pub fn le(mut self, n: i64) -> Self {
        self.constraints.le = Some(n);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.meta.example = Some(example.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    /// The declared default as a validated value (set once the owning schema is built).
    pub fn default_value(&self) -> Option<&FieldValue> {
        self.resolved_default.as_ref()
    }

    /// Check the field's own consistency and resolve its default.
    fn seal(&mut self, schema: &str) -> SchemaResult<()> {
        let c = &self.constraints;

        if c.has_length() && !self.field_type.is_textual() {
            return Err(self.inapplicable(schema, "min_length/max_length"));
        }
        if c.has_bounds() && self.field_type != FieldType::Integer {
            return Err(self.inapplicable(schema, "gt/ge/lt/le"));
        }
        if let (Some(min), Some(max)) = (c.min_length, c.max_length) {
            if min > max {
                return Err(SchemaError::InvertedLength {
                    schema: schema.to_string(),
                    field: self.name.clone(),
                    min,
                    max,
                });
            }
        }
        if c.has_bounds() && c.admitted_range().is_none() {
            return Err(SchemaError::ContradictoryBounds {
                schema: schema.to_string(),
                field: self.name.clone(),
                detail: format!("no integer satisfies {}", describe_bounds(c)),
            });
        }

        let Some(default) = &self.default else {
            return Ok(());
        };
        if self.required {
            return Err(SchemaError::RequiredWithDefault {
                schema: schema.to_string(),
                field: self.name.clone(),
            });
        }
        let resolved = if default.is_null() {
            FieldValue::Null
        } else {
            validator::check_value(self, default, &self.name).map_err(|errors| {
                SchemaError::InvalidDefault {
                    schema: schema.to_string(),
                    field: self.name.clone(),
                    reason: errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                }
            })?
        };
        self.resolved_default = Some(resolved);
        Ok(())
    }

    fn inapplicable(&self, schema: &str, constraint: &'static str) -> SchemaError {
        SchemaError::InapplicableConstraint {
            schema: schema.to_string(),
            field: self.name.clone(),
            field_type: self.field_type.type_name(),
            constraint,
        }
    }
}

fn describe_bounds(c: &Constraints) -> String {
    [("gt", c.gt), ("ge", c.ge), ("lt", c.lt), ("le", c.le)]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| format!("{k}={v}")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Composite, possibly nested record type definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn builder(name: impl Into<String>) -> ObjectSchemaBuilder {
        ObjectSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`ObjectSchema`]; consistency is checked in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ObjectSchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ObjectSchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Copy every field of `base`, in order (schema inheritance).
    pub fn extend(mut self, base: &ObjectSchema) -> Self {
        self.fields.extend(base.fields.iter().cloned());
        self
    }

    pub fn build(self) -> SchemaResult<ObjectSchema> {
        let ObjectSchemaBuilder { name, mut fields } = self;

        let mut seen = HashSet::with_capacity(fields.len());
        for spec in &mut fields {
            if !seen.insert(spec.name.clone()) {
                return Err(SchemaError::DuplicateField {
                    schema: name,
                    field: spec.name.clone(),
                });
            }
            spec.seal(&name)?;
        }

        tracing::trace!(schema = %name, fields = fields.len(), "object schema built");
        Ok(ObjectSchema { name, fields })
    }
}

/// A closed set of permitted string labels. Membership is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSchema {
    name: String,
    labels: Vec<String>,
}

impl EnumSchema {
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(SchemaError::EmptyEnum(name));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(SchemaError::DuplicateEnumLabel {
                    name,
                    label: label.clone(),
                });
            }
        }

        Ok(Self { name, labels })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> Arc<EnumSchema> {
        Arc::new(EnumSchema::new("HairColor", ["white", "black"]).unwrap())
    }

    #[test]
    fn builds_in_declaration_order() {
        let schema = ObjectSchema::builder("Location")
            .field(FieldSpec::string("city"))
            .field(FieldSpec::string("state"))
            .field(FieldSpec::string("country"))
            .build()
            .unwrap();

        let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["city", "state", "country"]);
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let err = ObjectSchema::builder("Person")
            .field(FieldSpec::string("first_name"))
            .field(FieldSpec::integer("first_name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { field, .. } if field == "first_name"));
    }

    #[test]
    fn extend_conflicting_with_base_is_a_duplicate() {
        let base = ObjectSchema::builder("Base")
            .field(FieldSpec::string("name"))
            .build()
            .unwrap();
        let err = ObjectSchema::builder("Derived")
            .extend(&base)
            .field(FieldSpec::string("name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn required_field_cannot_carry_default() {
        let err = ObjectSchema::builder("LoginOut")
            .field(FieldSpec::string("message").default("hi"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::RequiredWithDefault { .. }));
    }

    #[test]
    fn gt_must_be_below_le() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::integer("age").gt(115).le(115))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));

        assert!(ObjectSchema::builder("P")
            .field(FieldSpec::integer("age").gt(114).le(115))
            .build()
            .is_ok());
    }

    #[test]
    fn exclusive_bounds_leave_no_gap() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::integer("n").gt(1).lt(2))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));
    }

    #[test]
    fn exclusive_bounds_at_the_edge_of_i64_admit_nothing() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::integer("n").gt(i64::MAX).le(i64::MAX))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));

        let err = ObjectSchema::builder("P")
            .field(FieldSpec::integer("n").lt(i64::MIN))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ContradictoryBounds { .. }));

        let schema = ObjectSchema::builder("P")
            .field(FieldSpec::integer("n").ge(i64::MAX).le(i64::MAX))
            .build()
            .unwrap();
        assert!(crate::validate(&schema, &json!({"n": i64::MAX})).is_ok());
    }

    #[test]
    fn admitted_range_combines_bounds() {
        let c = Constraints {
            gt: Some(0),
            le: Some(115),
            ..Constraints::default()
        };
        assert_eq!(c.admitted_range(), Some((1, 115)));
        assert_eq!(Constraints::default().admitted_range(), Some((i64::MIN, i64::MAX)));
    }

    #[test]
    fn inverted_length_is_rejected() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::string("name").min_length(5).max_length(2))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvertedLength { min: 5, max: 2, .. }));
    }

    #[test]
    fn constraints_must_match_type() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::integer("age").max_length(3))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InapplicableConstraint { .. }));

        let err = ObjectSchema::builder("P")
            .field(FieldSpec::string("name").gt(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InapplicableConstraint { .. }));
    }

    #[test]
    fn default_must_satisfy_field_constraints() {
        let err = ObjectSchema::builder("P")
            .field(FieldSpec::enumeration("hair_color", colors()).optional().default("purple"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));

        let schema = ObjectSchema::builder("P")
            .field(FieldSpec::enumeration("hair_color", colors()).optional().default("black"))
            .build()
            .unwrap();
        assert_eq!(
            schema.field("hair_color").unwrap().default_value(),
            Some(&FieldValue::Enum("black".into()))
        );
    }

    #[test]
    fn enum_requires_unique_non_empty_labels() {
        assert!(matches!(
            EnumSchema::new("Empty", Vec::<String>::new()),
            Err(SchemaError::EmptyEnum(_))
        ));
        assert!(matches!(
            EnumSchema::new("Dup", ["red", "red"]),
            Err(SchemaError::DuplicateEnumLabel { .. })
        ));
    }

    #[test]
    fn enum_membership_is_case_sensitive() {
        let e = colors();
        assert!(e.contains("black"));
        assert!(!e.contains("Black"));
    }

    #[test]
    fn schema_description_exposes_constraints() {
        let schema = ObjectSchema::builder("Person")
            .field(
                FieldSpec::integer("age")
                    .gt(0)
                    .le(115)
                    .example(25),
            )
            .field(FieldSpec::enumeration("hair_color", colors()).optional())
            .build()
            .unwrap();

        let described = serde_json::to_value(&schema).unwrap();
        assert_eq!(described["name"], "Person");
        assert_eq!(described["fields"][0]["type"], "integer");
        assert_eq!(described["fields"][0]["constraints"], json!({"gt": 0, "le": 115}));
        assert_eq!(described["fields"][0]["example"], 25);
        assert_eq!(described["fields"][1]["required"], false);
        assert_eq!(described["fields"][1]["schema"]["labels"], json!(["white", "black"]));
    }
}
