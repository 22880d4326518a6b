//! Named property registry.
//!
//! Properties are hierarchical dotted or slashed names (`soc/cluster/nb_core`) carrying a
//! typed value. Each property is declared exactly once with a default, a cast, an optional
//! allowed-value set, and a description. User overrides are recorded as raw strings before the
//! declarations run and are cast and checked at declaration time, so bad input fails at the
//! boundary instead of at first use.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::common::ConfigError;

/// Type a property value is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cast {
    /// Unsigned integer; accepts decimal, `0x` hex, and `_` separators.
    Int,
    /// Free-form string.
    Str,
    /// Boolean; accepts `true`/`false`/`1`/`0`.
    Bool,
}

impl Cast {
    const fn name(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Str => "string",
            Self::Bool => "boolean",
        }
    }

    fn apply(self, name: &str, raw: &str) -> Result<PropertyValue, ConfigError> {
        let invalid = || ConfigError::InvalidPropertyValue {
            name: name.to_string(),
            value: raw.to_string(),
            expected: self.name(),
        };
        match self {
            Self::Int => parse_int(raw).map(PropertyValue::Int).ok_or_else(invalid),
            Self::Str => Ok(PropertyValue::Str(raw.to_string())),
            Self::Bool => match raw.trim() {
                "true" | "1" => Ok(PropertyValue::Bool(true)),
                "false" | "0" => Ok(PropertyValue::Bool(false)),
                _ => Err(invalid()),
            },
        }
    }
}

fn parse_int(raw: &str) -> Option<u64> {
    let digits: String = raw.trim().chars().filter(|&c| c != '_').collect();
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()
    } else {
        digits.parse().ok()
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Unsigned integer.
    Int(u64),
    /// String.
    Str(String),
    /// Boolean.
    Bool(bool),
}

impl PropertyValue {
    /// Returns the integer payload, if any.
    pub const fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v:#x}"),
            Self::Str(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Declaration of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecl {
    /// Hierarchical name.
    pub name: String,
    /// Value used when no override is given.
    pub default: PropertyValue,
    /// Cast applied to overrides.
    pub cast: Cast,
    /// Accepted values, compared on their string form; `None` accepts anything castable.
    pub allowed: Option<Vec<String>>,
    /// Human description.
    pub description: String,
}

impl PropertyDecl {
    /// Declares an integer property.
    pub fn int(name: impl Into<String>, default: u64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: PropertyValue::Int(default),
            cast: Cast::Int,
            allowed: None,
            description: description.into(),
        }
    }

    /// Declares a string property.
    pub fn string(
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default: PropertyValue::Str(default.into()),
            cast: Cast::Str,
            allowed: None,
            description: description.into(),
        }
    }

    /// Declares a boolean property.
    pub fn boolean(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: PropertyValue::Bool(default),
            cast: Cast::Bool,
            allowed: None,
            description: description.into(),
        }
    }

    /// Restricts the property to the given values.
    #[must_use]
    pub fn allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn check_allowed(&self, value: &PropertyValue) -> Result<(), ConfigError> {
        let Some(allowed) = &self.allowed else {
            return Ok(());
        };
        let text = match value {
            PropertyValue::Int(v) => v.to_string(),
            other => other.to_string(),
        };
        if allowed.iter().any(|a| *a == text) {
            Ok(())
        } else {
            Err(ConfigError::NotAllowed {
                name: self.name.clone(),
                value: text,
                allowed: allowed.clone(),
            })
        }
    }
}

/// A declared property and its effective value.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// The declaration.
    pub decl: PropertyDecl,
    /// Effective value (override if given, else default).
    pub value: PropertyValue,
    /// Whether `value` came from a user override.
    pub overridden: bool,
}

/// Registry of declared properties and pending user overrides.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    declared: BTreeMap<String, Property>,
    overrides: BTreeMap<String, String>,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a user override for `name`.
    ///
    /// Overrides must be recorded before the property is declared; declared values are
    /// never changed afterwards.
    ///
    /// # Returns
    ///
    /// `LateOverride` if `name` is already declared. The registry is unchanged on error.
    pub fn set_override(
        &mut self,
        name: impl Into<String>,
        raw: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.declared.contains_key(&name) {
            return Err(ConfigError::LateOverride(name));
        }
        let _ = self.overrides.insert(name, raw.into());
        Ok(())
    }

    /// Records an override given as `name=value`.
    pub fn set_override_pair(&mut self, pair: &str) -> Result<(), ConfigError> {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidPropertyValue {
                name: pair.to_string(),
                value: String::new(),
                expected: "name=value",
            })?;
        self.set_override(name.trim(), raw.trim())
    }

    /// Declares a property and returns its effective value.
    ///
    /// # Arguments
    ///
    /// * `decl` - Name, default, cast, allowed values, and description.
    ///
    /// # Returns
    ///
    /// The override cast to `decl.cast` when one was recorded, otherwise the default.
    /// Fails with `DuplicateProperty` if the name is already declared, or with a cast or
    /// allowed-value error for a bad override.
    pub fn declare(&mut self, decl: PropertyDecl) -> Result<PropertyValue, ConfigError> {
        if self.declared.contains_key(&decl.name) {
            return Err(ConfigError::DuplicateProperty(decl.name));
        }
        let (value, overridden) = match self.overrides.get(&decl.name) {
            Some(raw) => (decl.cast.apply(&decl.name, raw)?, true),
            None => (decl.default.clone(), false),
        };
        decl.check_allowed(&value)?;
        tracing::debug!(property = %decl.name, %value, overridden, "declared property");
        let name = decl.name.clone();
        let _ = self.declared.insert(
            name,
            Property {
                decl,
                value: value.clone(),
                overridden,
            },
        );
        Ok(value)
    }

    /// Declares an integer property and returns its value.
    pub fn declare_int(
        &mut self,
        name: &str,
        default: u64,
        description: &str,
    ) -> Result<u64, ConfigError> {
        let value = self.declare(PropertyDecl::int(name, default, description))?;
        value.as_int().ok_or_else(|| mismatch(name, &value, Cast::Int))
    }

    /// Declares an integer property that must fit in `usize`.
    pub fn declare_usize(
        &mut self,
        name: &str,
        default: usize,
        description: &str,
    ) -> Result<usize, ConfigError> {
        let value = self.declare_int(name, default as u64, description)?;
        usize::try_from(value).map_err(|_| ConfigError::InvalidPropertyValue {
            name: name.to_string(),
            value: value.to_string(),
            expected: "integer fitting in usize",
        })
    }

    /// Declares a string property restricted to `allowed` and returns its value.
    pub fn declare_choice(
        &mut self,
        name: &str,
        default: &str,
        allowed: &[&str],
        description: &str,
    ) -> Result<String, ConfigError> {
        let decl = PropertyDecl::string(name, default, description).allowed(allowed.iter().copied());
        let value = self.declare(decl)?;
        match value {
            PropertyValue::Str(s) => Ok(s),
            other => Err(mismatch(name, &other, Cast::Str)),
        }
    }

    /// Returns the effective value of a declared property.
    pub fn get(&self, name: &str) -> Result<&PropertyValue, ConfigError> {
        self.declared
            .get(name)
            .map(|p| &p.value)
            .ok_or_else(|| ConfigError::UndeclaredProperty(name.to_string()))
    }

    /// Returns `true` if `name` has been declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    /// Rejects overrides that name no declared property.
    ///
    /// Call once every component has declared its properties.
    pub fn finish(&self) -> Result<(), ConfigError> {
        match self
            .overrides
            .keys()
            .find(|name| !self.declared.contains_key(*name))
        {
            Some(name) => Err(ConfigError::UnknownProperty(name.clone())),
            None => Ok(()),
        }
    }

    /// Iterates over declared properties in name order.
    pub fn describe(&self) -> impl Iterator<Item = &Property> {
        self.declared.values()
    }
}

fn mismatch(name: &str, value: &PropertyValue, cast: Cast) -> ConfigError {
    ConfigError::InvalidPropertyValue {
        name: name.to_string(),
        value: value.to_string(),
        expected: cast.name(),
    }
}
