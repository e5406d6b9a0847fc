//! Column type and default value definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store column types.
///
/// Serialized as the lowercase store name. Names that are not recognised parse
/// to [`ColumnType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColumnType {
    /// `int`
    Int,
    /// `integer`
    Integer,
    /// `tinyint`
    TinyInt,
    /// `smallint`
    SmallInt,
    /// `mediumint`
    MediumInt,
    /// `bigint`
    BigInt,
    /// `decimal`
    Decimal,
    /// `numeric`
    Numeric,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `double precision`
    DoublePrecision,
    /// `real`
    Real,
    /// `boolean`
    Boolean,
    /// `char`
    Char,
    /// `varchar`
    Varchar,
    /// `nvarchar`
    NVarchar,
    /// `text`
    Text,
    /// `binary`
    Binary,
    /// `varbinary`
    VarBinary,
    /// `blob`
    Blob,
    /// `bytea`
    Bytea,
    /// `date`
    Date,
    /// `time`
    Time,
    /// `datetime`
    DateTime,
    /// `timestamp`
    Timestamp,
    /// `timestamp with time zone`
    TimestampTz,
    /// `json`
    Json,
    /// `jsonb`
    Jsonb,
    /// `uuid`
    Uuid,
    /// `enum`
    Enum,
    /// `geometry`
    Geometry,
    /// `geography`
    Geography,
    /// `simple-array`, stored as a delimited string.
    SimpleArray,
    /// `simple-json`, stored as a serialized string.
    SimpleJson,
    /// Any other store-specific type name.
    Other(String),
}

impl ColumnType {
    /// Store name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Integer => "integer",
            ColumnType::TinyInt => "tinyint",
            ColumnType::SmallInt => "smallint",
            ColumnType::MediumInt => "mediumint",
            ColumnType::BigInt => "bigint",
            ColumnType::Decimal => "decimal",
            ColumnType::Numeric => "numeric",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::DoublePrecision => "double precision",
            ColumnType::Real => "real",
            ColumnType::Boolean => "boolean",
            ColumnType::Char => "char",
            ColumnType::Varchar => "varchar",
            ColumnType::NVarchar => "nvarchar",
            ColumnType::Text => "text",
            ColumnType::Binary => "binary",
            ColumnType::VarBinary => "varbinary",
            ColumnType::Blob => "blob",
            ColumnType::Bytea => "bytea",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::DateTime => "datetime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::TimestampTz => "timestamp with time zone",
            ColumnType::Json => "json",
            ColumnType::Jsonb => "jsonb",
            ColumnType::Uuid => "uuid",
            ColumnType::Enum => "enum",
            ColumnType::Geometry => "geometry",
            ColumnType::Geography => "geography",
            ColumnType::SimpleArray => "simple-array",
            ColumnType::SimpleJson => "simple-json",
            ColumnType::Other(name) => name,
        }
    }

    /// Check if the `length` option applies to this type.
    pub fn supports_length(&self) -> bool {
        matches!(
            self,
            ColumnType::Char
                | ColumnType::Varchar
                | ColumnType::NVarchar
                | ColumnType::Binary
                | ColumnType::VarBinary
        )
    }

    /// Check if the display `width` option applies to this type.
    pub fn supports_width(&self) -> bool {
        matches!(
            self,
            ColumnType::Int
                | ColumnType::TinyInt
                | ColumnType::SmallInt
                | ColumnType::MediumInt
                | ColumnType::BigInt
        )
    }

    /// Check if `precision` and `scale` apply to this type.
    pub fn supports_precision(&self) -> bool {
        matches!(
            self,
            ColumnType::Decimal
                | ColumnType::Numeric
                | ColumnType::Float
                | ColumnType::Double
                | ColumnType::DoublePrecision
                | ColumnType::Real
                | ColumnType::Time
                | ColumnType::DateTime
                | ColumnType::Timestamp
                | ColumnType::TimestampTz
        )
    }

    /// Check if this is a spatial type.
    pub fn is_spatial(&self) -> bool {
        matches!(self, ColumnType::Geometry | ColumnType::Geography)
    }

    /// Check if this type can back a generated primary key.
    pub fn is_generatable(&self) -> bool {
        matches!(
            self,
            ColumnType::Int
                | ColumnType::Integer
                | ColumnType::TinyInt
                | ColumnType::SmallInt
                | ColumnType::MediumInt
                | ColumnType::BigInt
                | ColumnType::Decimal
                | ColumnType::Numeric
        )
    }
}

impl FromStr for ColumnType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "int" => ColumnType::Int,
            "integer" | "int4" => ColumnType::Integer,
            "tinyint" => ColumnType::TinyInt,
            "smallint" | "int2" => ColumnType::SmallInt,
            "mediumint" => ColumnType::MediumInt,
            "bigint" | "int8" => ColumnType::BigInt,
            "decimal" | "dec" => ColumnType::Decimal,
            "numeric" => ColumnType::Numeric,
            "float" => ColumnType::Float,
            "double" => ColumnType::Double,
            "double precision" => ColumnType::DoublePrecision,
            "real" => ColumnType::Real,
            "boolean" | "bool" => ColumnType::Boolean,
            "char" | "character" => ColumnType::Char,
            "varchar" | "character varying" => ColumnType::Varchar,
            "nvarchar" => ColumnType::NVarchar,
            "text" => ColumnType::Text,
            "binary" => ColumnType::Binary,
            "varbinary" => ColumnType::VarBinary,
            "blob" => ColumnType::Blob,
            "bytea" => ColumnType::Bytea,
            "date" => ColumnType::Date,
            "time" => ColumnType::Time,
            "datetime" => ColumnType::DateTime,
            "timestamp" => ColumnType::Timestamp,
            "timestamp with time zone" | "timestamptz" => ColumnType::TimestampTz,
            "json" => ColumnType::Json,
            "jsonb" => ColumnType::Jsonb,
            "uuid" => ColumnType::Uuid,
            "enum" => ColumnType::Enum,
            "geometry" => ColumnType::Geometry,
            "geography" => ColumnType::Geography,
            "simple-array" => ColumnType::SimpleArray,
            "simple-json" => ColumnType::SimpleJson,
            _ => ColumnType::Other(s.to_string()),
        };
        Ok(ty)
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default database value for a column.
///
/// Deserialized from plain JSON scalars; expressions are written as
/// `{"expression": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String literal.
    String(String),
    /// Raw store expression, e.g. `CURRENT_TIMESTAMP`.
    Expression {
        /// Expression text.
        expression: String,
    },
}

impl DefaultValue {
    /// Create an expression default.
    pub fn expression(expression: impl Into<String>) -> Self {
        DefaultValue::Expression {
            expression: expression.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_aliased_types() {
        assert_eq!("varchar".parse::<ColumnType>().unwrap(), ColumnType::Varchar);
        assert_eq!("INT8".parse::<ColumnType>().unwrap(), ColumnType::BigInt);
        assert_eq!(
            "timestamptz".parse::<ColumnType>().unwrap(),
            ColumnType::TimestampTz
        );
        assert_eq!(
            "hstore".parse::<ColumnType>().unwrap(),
            ColumnType::Other("hstore".into())
        );
    }

    #[test]
    fn test_type_capabilities() {
        assert!(ColumnType::Varchar.supports_length());
        assert!(!ColumnType::Text.supports_length());
        assert!(ColumnType::Int.supports_width());
        assert!(!ColumnType::Integer.supports_width());
        assert!(ColumnType::Decimal.supports_precision());
        assert!(!ColumnType::Varchar.supports_precision());
        assert!(ColumnType::Geography.is_spatial());
        assert!(ColumnType::BigInt.is_generatable());
        assert!(!ColumnType::Uuid.is_generatable());
    }

    #[test]
    fn test_column_type_serde_as_string() {
        let json = serde_json::to_string(&ColumnType::DoublePrecision).unwrap();
        assert_eq!(json, "\"double precision\"");

        let parsed: ColumnType = serde_json::from_str("\"citext\"").unwrap();
        assert_eq!(parsed, ColumnType::Other("citext".into()));
    }

    #[test]
    fn test_default_value_from_json() {
        let values: Vec<DefaultValue> =
            serde_json::from_str(r#"[null, true, 3, 1.5, "x", {"expression": "now()"}]"#)
                .unwrap();

        assert_eq!(
            values,
            vec![
                DefaultValue::Null,
                DefaultValue::Bool(true),
                DefaultValue::Int(3),
                DefaultValue::Float(1.5),
                DefaultValue::String("x".into()),
                DefaultValue::expression("now()"),
            ]
        );
    }
}
