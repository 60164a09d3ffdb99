//! Naming policy.
//!
//! A reservation name is valid when it is non-empty and its first character
//! is an uppercase letter. The check uses Unicode case classification, so
//! `"Émile"` passes and `"émile"` does not.

use crate::error::{Error, Result};

/// Checks a candidate name against the naming policy.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name is empty or does not start
/// with an uppercase letter.
///
/// # Examples
///
/// ```
/// use reserva::validate_name;
///
/// assert!(validate_name("Mahee").is_ok());
/// assert!(validate_name("ayana").is_err());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    let Some(first) = name.chars().next() else {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    };

    if !first.is_uppercase() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name must start with an uppercase letter".into(),
        });
    }

    Ok(())
}
