//! JSON envelope shared by every endpoint: `{"success": true, "data": ...}`
//! on the happy path, `{"success": false, "error": ...}` otherwise. The pages
//! consuming this API key off the `success` flag before reading anything
//! else, so the shape is part of the contract.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

pub fn success<T: Serialize>(data: T) -> Value {
    json!({ "success": true, "data": data })
}

pub fn failure(error: impl fmt::Display) -> Value {
    json!({ "success": false, "error": error.to_string() })
}
