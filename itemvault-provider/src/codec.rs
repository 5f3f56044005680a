//! Field encryption binding.
//!
//! Walks a shape's encrypted fields during serialization, replacing each
//! plain value with its sealed text form from the cipher set, and reverses
//! the substitution on read. The binding is generic over the field's value
//! type: the cipher sees only the encoded bytes.

use crate::error::{ProviderError, ProviderResult};
use itemvault_crypto::{CipherSet, CryptoError};
use itemvault_model::{FieldKind, ItemShape};
use serde_json::Value;
use std::sync::Arc;

fn field_key(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Returns a copy of `data` with every declared encrypted field replaced
/// by its sealed base64 form. Fields absent from the payload pass through.
pub(crate) fn encrypt_fields(
    shape: &ItemShape,
    ciphers: Option<&Arc<CipherSet>>,
    data: &Value,
) -> ProviderResult<Value> {
    if !shape.has_encrypted_fields() {
        return Ok(data.clone());
    }
    let ciphers = ciphers.ok_or_else(|| {
        ProviderError::Configuration(format!(
            "type {:?} declares encrypted fields but no cipher set is configured",
            shape.type_name().as_str()
        ))
    })?;

    let mut sealed = data.clone();
    if let Value::Object(fields) = &mut sealed {
        for spec in shape.fields_of_kind(FieldKind::Encrypted) {
            let key = field_key(&spec.path);
            if let Some(plain) = fields.get(key) {
                let encoded = ciphers.encrypt_value(plain)?;
                fields.insert(key.to_string(), Value::String(encoded));
            }
        }
    }
    Ok(sealed)
}

/// Reverses `encrypt_fields` on a record read back from the store.
pub(crate) fn decrypt_fields(
    shape: &ItemShape,
    ciphers: Option<&Arc<CipherSet>>,
    data: &Value,
) -> ProviderResult<Value> {
    if !shape.has_encrypted_fields() {
        return Ok(data.clone());
    }
    let ciphers = ciphers.ok_or_else(|| {
        ProviderError::Configuration(format!(
            "type {:?} declares encrypted fields but no cipher set is configured",
            shape.type_name().as_str()
        ))
    })?;

    let mut plain = data.clone();
    if let Value::Object(fields) = &mut plain {
        for spec in shape.fields_of_kind(FieldKind::Encrypted) {
            let key = field_key(&spec.path);
            if let Some(stored) = fields.get(key) {
                let encoded = stored.as_str().ok_or_else(|| {
                    ProviderError::Crypto(CryptoError::Encoding(format!(
                        "encrypted field {:?} is not stored as text",
                        spec.path
                    )))
                })?;
                let value = ciphers.decrypt_value(encoded)?;
                fields.insert(key.to_string(), value);
            }
        }
    }
    Ok(plain)
}
