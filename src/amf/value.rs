//! AMF value types
//!
//! A single enum covers every AMF0 value type used by FLV metadata.
//! Object and ECMA-array properties are stored as ordered key/value
//! pairs: encoding emits them in insertion order, never re-sorted, and
//! duplicate keys are passed through untouched.

/// AMF0 value representation
///
/// One variant per AMF0 type marker. `MovieClip` exists so the reserved
/// marker has a name; the encoder rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum AmfValue {
    /// IEEE 754 double-precision floating point (0x00)
    Number(f64),

    /// Boolean value (0x01)
    Boolean(bool),

    /// UTF-8 string with 16-bit length prefix (0x02), at most 65535 bytes
    String(String),

    /// Key-value object (0x03), pairs kept in insertion order
    Object(Vec<(String, AmfValue)>),

    /// Reserved MovieClip marker (0x04), never encodable
    MovieClip,

    /// Null value (0x05)
    Null,

    /// Undefined value (0x06)
    Undefined,

    /// Index into a previously transmitted object (0x07), carried verbatim
    Reference(u16),

    /// Associative array (0x08) with an informational entry count
    ///
    /// The count is encoded as written; it is not required to match the
    /// number of pairs. `with_property` keeps the two in sync for trees
    /// built through the API.
    EcmaArray {
        count: u32,
        properties: Vec<(String, AmfValue)>,
    },

    /// Dense array (0x0A), elements only, no terminator
    StrictArray(Vec<AmfValue>),

    /// Date (0x0B) as milliseconds since Unix epoch plus a legacy
    /// timezone offset (write 0 when unknown)
    Date { unix_ms: f64, timezone: i16 },

    /// UTF-8 string with 32-bit length prefix (0x0C)
    LongString(String),
}

impl AmfValue {
    /// Create an empty Object
    pub fn object() -> Self {
        AmfValue::Object(Vec::new())
    }

    /// Create an empty ECMA array
    pub fn ecma_array() -> Self {
        AmfValue::EcmaArray {
            count: 0,
            properties: Vec::new(),
        }
    }

    /// Create an empty strict array
    pub fn strict_array() -> Self {
        AmfValue::StrictArray(Vec::new())
    }

    /// Append a property to an Object or ECMA array, returning the value
    ///
    /// ECMA arrays also bump their entry count. On any other variant the
    /// value is returned unchanged.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<AmfValue>) -> Self {
        match &mut self {
            AmfValue::Object(props) => {
                props.push((key.into(), value.into()));
            }
            AmfValue::EcmaArray { count, properties } => {
                properties.push((key.into(), value.into()));
                *count += 1;
            }
            _ => {}
        }
        self
    }

    /// Append an element to a strict array, returning the value
    ///
    /// On any other variant the value is returned unchanged.
    pub fn with_element(mut self, value: impl Into<AmfValue>) -> Self {
        if let AmfValue::StrictArray(elements) = &mut self {
            elements.push(value.into());
        }
        self
    }

    /// Try to get this value as a string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AmfValue::String(s) | AmfValue::LongString(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AmfValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AmfValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AmfValue::Null)
    }

    /// Get the property pairs of an Object or ECMA array
    pub fn properties(&self) -> Option<&[(String, AmfValue)]> {
        match self {
            AmfValue::Object(props) => Some(props),
            AmfValue::EcmaArray { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Get a property from an Object or ECMA array (first match wins)
    pub fn get(&self, key: &str) -> Option<&AmfValue> {
        self.properties()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get a string property from an object value
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Get a number property from an object value
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_number()
    }
}

impl Default for AmfValue {
    fn default() -> Self {
        AmfValue::Null
    }
}

impl From<bool> for AmfValue {
    fn from(v: bool) -> Self {
        AmfValue::Boolean(v)
    }
}

impl From<f64> for AmfValue {
    fn from(v: f64) -> Self {
        AmfValue::Number(v)
    }
}

impl From<i32> for AmfValue {
    fn from(v: i32) -> Self {
        AmfValue::Number(v as f64)
    }
}

impl From<u32> for AmfValue {
    fn from(v: u32) -> Self {
        AmfValue::Number(v as f64)
    }
}

impl From<String> for AmfValue {
    fn from(v: String) -> Self {
        AmfValue::String(v)
    }
}

impl From<&str> for AmfValue {
    fn from(v: &str) -> Self {
        AmfValue::String(v.to_string())
    }
}

impl<V: Into<AmfValue>> From<Vec<V>> for AmfValue {
    fn from(v: Vec<V>) -> Self {
        AmfValue::StrictArray(v.into_iter().map(|x| x.into()).collect())
    }
}
