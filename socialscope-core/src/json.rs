//! JSON decoding without a nesting limit.
//!
//! Reply trees come back as deep as the server makes them. `serde_json`
//! stops at 128 levels by default, so every decode of server data goes
//! through these helpers instead: the recursion limit is off and the stack
//! grows on demand.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes `bytes` into `T` at any nesting depth.
///
/// # Errors
///
/// Returns the serde error if the bytes are not valid JSON for `T`.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Decodes an owned [`Value`] into `T` at any nesting depth.
///
/// # Errors
///
/// Returns the serde error if the value does not fit `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}

/// Decodes a borrowed [`Value`] into `T` at any nesting depth.
///
/// # Errors
///
/// Returns the serde error if the value does not fit `T`.
pub fn from_value_ref<'a, T: Deserialize<'a>>(value: &'a Value) -> Result<T, serde_json::Error> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}
