// File: crates/chart-core/src/types.rs
// Summary: Shared sizes, paddings and the raw/typed value model fed to the normalizer.

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Room for `#1,234,567` on the left, a legend row on top and
    /// 45 degree date labels underneath.
    fn default() -> Self {
        Self::new(96, 32, 48, 104)
    }
}

/// One entry of the server's value array, before validation.
///
/// The server contract is `number | null`, but spreadsheet-backed data
/// also produces empty strings and numbers serialized as text.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Null,
}

impl RawValue {
    /// True for values the normalizer always drops: null and empty text.
    pub fn is_absent(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Finite numeric reading of the value, if it has one.
    pub fn as_finite(&self) -> Option<f64> {
        let v = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            RawValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self { RawValue::Number(v) }
}

impl From<Option<f64>> for RawValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(RawValue::Null, RawValue::Number)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self { RawValue::Text(v.to_string()) }
}
