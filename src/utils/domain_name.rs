//! Domain name grammar used to validate purchase candidates.

use regex::Regex;
use std::sync::LazyLock;

/// A single DNS label: letters, digits and inner hyphens.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").unwrap());

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Reasons a string is not an acceptable domain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainNameError {
    #[error("domain name must be between 1 and 253 characters")]
    Length,

    #[error("domain name contains an empty label")]
    EmptyLabel,

    #[error("label '{0}' is longer than 63 characters")]
    LabelTooLong(String),

    #[error("label '{0}' contains invalid characters")]
    InvalidLabel(String),
}

/// Validates a lower-cased domain name.
///
/// # Rules
///
/// - Total length 1-253
/// - Every dot-separated label is 1-63 characters long
/// - Labels use `a-z`, `0-9` and `-`, and never start or end with `-`
///
/// Callers are expected to lower-case input first; upper-case letters are
/// rejected.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_domain_name("example.com").is_ok());
/// assert!(validate_domain_name("example.").is_err());
/// assert!(validate_domain_name("-bad.com").is_err());
/// ```
pub fn validate_domain_name(domain: &str) -> Result<(), DomainNameError> {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return Err(DomainNameError::Length);
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(DomainNameError::EmptyLabel);
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainNameError::LabelTooLong(label.to_string()));
        }
        if !LABEL_REGEX.is_match(label) {
            return Err(DomainNameError::InvalidLabel(label.to_string()));
        }
    }

    Ok(())
}
