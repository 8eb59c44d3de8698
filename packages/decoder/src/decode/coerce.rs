//! Conversion of extracted text into field values.
//!
//! Numeric conversion is lenient about surrounding text: the first numeric
//! lexeme is used, so `"$42.00"` and `"42 items"` decode without cleanup.
//! Empty text decodes to zero.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use super::record::Decode;
use crate::document::Document;
use crate::error::{DecodeError, Result};

/// Signed integer lexeme.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]+").expect("valid regex"));

/// Signed decimal lexeme with optional fraction and exponent.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?").expect("valid regex")
});

/// First integer lexeme in `text`.
///
/// # Examples
/// ```
/// use markup_decoder::decode::integer_lexeme;
///
/// assert_eq!(integer_lexeme("42 items"), Some("42"));
/// assert_eq!(integer_lexeme("balance: -7"), Some("-7"));
/// assert_eq!(integer_lexeme("abc"), None);
/// ```
#[must_use]
pub fn integer_lexeme(text: &str) -> Option<&str> {
    INTEGER_PATTERN.find(text).map(|m| m.as_str())
}

/// First floating-point lexeme in `text`.
///
/// # Examples
/// ```
/// use markup_decoder::decode::float_lexeme;
///
/// assert_eq!(float_lexeme("$42.00"), Some("42.00"));
/// assert_eq!(float_lexeme("6.02e23 atoms"), Some("6.02e23"));
/// assert_eq!(float_lexeme("n/a"), None);
/// ```
#[must_use]
pub fn float_lexeme(text: &str) -> Option<&str> {
    FLOAT_PATTERN.find(text).map(|m| m.as_str())
}

/// Parse the first integer in `text` into `T`, checking its range.
pub fn parse_integer<T>(text: &str) -> Result<T>
where
    T: TryFrom<i128> + Default,
{
    if text.is_empty() {
        return Ok(T::default());
    }

    integer_lexeme(text)
        .and_then(|lexeme| lexeme.parse::<i128>().ok())
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| coercion_error::<T>(text))
}

/// Parse the first decimal number in `text` into `T`.
///
/// Values outside the range of `T` are errors rather than infinity.
pub fn parse_float<T>(text: &str) -> Result<T>
where
    T: FromStr + Default + Copy + Into<f64>,
{
    if text.is_empty() {
        return Ok(T::default());
    }

    float_lexeme(text)
        .and_then(|lexeme| lexeme.parse::<T>().ok())
        .filter(|value| Into::<f64>::into(*value).is_finite())
        .ok_or_else(|| coercion_error::<T>(text))
}

fn coercion_error<T>(text: &str) -> DecodeError {
    DecodeError::Coercion {
        text: text.to_string(),
        target: std::any::type_name::<T>(),
    }
}

impl Decode for String {
    fn decode(&mut self, document: &dyn Document) -> Result<()> {
        *self = document.text();
        Ok(())
    }
}

macro_rules! decode_integer {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode(&mut self, document: &dyn Document) -> Result<()> {
                    *self = parse_integer(&document.text())?;
                    Ok(())
                }
            }
        )*
    };
}

decode_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! decode_float {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode(&mut self, document: &dyn Document) -> Result<()> {
                    *self = parse_float(&document.text())?;
                    Ok(())
                }
            }
        )*
    };
}

decode_float!(f32, f64);

/// Sequences decode one element per node of the document.
///
/// The field is replaced only once every element has decoded.
impl<T> Decode for Vec<T>
where
    T: Decode + Default,
{
    fn decode(&mut self, document: &dyn Document) -> Result<()> {
        let parts = document.decompose();
        let mut items = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            let mut item = T::default();
            item.decode(part.as_ref())
                .map_err(|err| err.at_index(index))?;
            items.push(item);
        }

        *self = items;
        Ok(())
    }
}
