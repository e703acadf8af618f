//! Dot-separated identifier lists used for pre-release and build metadata

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An identifier list such as `rc.1` or `build.11.e0f985a`.
///
/// Equality and hashing follow the identifier comparison rule, so `beta.01`
/// and `beta.1` are the same metadata.
#[derive(Debug, Clone)]
pub struct MetadataVersion {
    identifiers: Vec<String>,
}

impl MetadataVersion {
    pub(crate) fn new(identifiers: Vec<String>) -> Self {
        MetadataVersion { identifiers }
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Increment the trailing numeric identifier, or append `1` if the last
    /// identifier is not numeric.
    pub fn increment(&self) -> Self {
        let mut identifiers = self.identifiers.clone();
        match identifiers.last_mut() {
            Some(last) if is_numeric(last) => *last = increment_decimal(last),
            _ => identifiers.push("1".to_string()),
        }
        MetadataVersion { identifiers }
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Add one to an arbitrarily long decimal string
fn increment_decimal(digits: &str) -> String {
    let mut bytes = trim_leading_zeros(digits).as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    bytes.insert(0, b'1');
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Compare two identifiers: numeric ones by value and below any
/// alphanumeric one, alphanumeric ones by ordinal text order.
pub(crate) fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            let a = trim_leading_zeros(a);
            let b = trim_leading_zeros(b);
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl Ord for MetadataVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.identifiers.iter().zip(&other.identifiers) {
            let result = compare_identifiers(a, b);
            if result != Ordering::Equal {
                return result;
            }
        }
        self.identifiers.len().cmp(&other.identifiers.len())
    }
}

impl PartialOrd for MetadataVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MetadataVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MetadataVersion {}

impl Hash for MetadataVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifiers.len().hash(state);
        for identifier in &self.identifiers {
            if is_numeric(identifier) {
                trim_leading_zeros(identifier).hash(state);
            } else {
                identifier.hash(state);
            }
        }
    }
}

impl fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifiers.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(text: &str) -> MetadataVersion {
        MetadataVersion::new(text.split('.').map(str::to_string).collect())
    }

    #[test]
    fn test_numeric_identifiers_compare_by_value() {
        assert!(meta("beta.2") < meta("beta.11"));
        assert!(meta("99999999999999999999999") > meta("4"));
        assert_eq!(meta("rc.01"), meta("rc.1"));
    }

    #[test]
    fn test_numeric_below_alphanumeric() {
        assert!(meta("1") < meta("alpha"));
        assert!(meta("999") < meta("-"));
        assert!(meta("alpha.1") < meta("alpha.beta"));
    }

    #[test]
    fn test_shorter_prefix_is_lower() {
        assert!(meta("alpha") < meta("alpha.1"));
        assert!(meta("build") < meta("build.2.b8f12d7"));
    }

    #[test]
    fn test_alphanumeric_ordinal_order() {
        assert!(meta("alpha") < meta("beta"));
        assert!(meta("RC") < meta("rc"));
    }

    #[test]
    fn test_increment() {
        assert_eq!(meta("beta.1").increment().to_string(), "beta.2");
        assert_eq!(meta("beta").increment().to_string(), "beta.1");
        assert_eq!(meta("rc.09").increment().to_string(), "rc.10");
        assert_eq!(meta("build.99").increment().to_string(), "build.100");
    }

    #[test]
    fn test_display_keeps_identifier_text() {
        assert_eq!(meta("build.11.e0f985a").to_string(), "build.11.e0f985a");
    }
}
