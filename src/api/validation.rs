use crate::api::KvError;

/// Largest accepted key, in bytes.
pub const MAX_KEY_SIZE: usize = 1024;
/// Largest accepted value, in bytes.
pub const MAX_VALUE_SIZE: usize = 10 * 1024 * 1024;

pub(crate) fn validate_key(key: &[u8]) -> Result<(), KvError> {
    if key.is_empty() {
        return Err(KvError::invalid_argument("Key must not be empty"));
    }
    if key.len() > MAX_KEY_SIZE {
        return Err(KvError::invalid_argument(format!(
            "Key is {} bytes, the limit is {}",
            key.len(),
            MAX_KEY_SIZE
        )));
    }
    Ok(())
}

pub(crate) fn validate_value(value: &[u8]) -> Result<(), KvError> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(KvError::invalid_argument(format!(
            "Value is {} bytes, the limit is {}",
            value.len(),
            MAX_VALUE_SIZE
        )));
    }
    Ok(())
}

/// Scan bounds are optional, but one that is given obeys the key limit.
pub(crate) fn validate_bound(name: &str, bound: Option<&[u8]>) -> Result<(), KvError> {
    match bound {
        None => Ok(()),
        Some(bound) => validate_key(bound)
            .map_err(|e| KvError::invalid_argument(format!("Scan {} is invalid: {}", name, e))),
    }
}
