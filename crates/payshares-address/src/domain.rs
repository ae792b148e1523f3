//! Hostname grammar for the domain segment of a federated address.
//!
//! A domain is a sequence of labels separated by `.`. Each label is made of
//! ASCII letters, digits and hyphens, and may not start or end with a hyphen.
//! This is a small self-contained acceptor rather than a full DNS name
//! parser: no IDNA handling, no trailing root dot, no underscores.

/// Maximum length of a full domain name, in bytes.
pub const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Returns `true` if `domain` satisfies the hostname grammar.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    domain.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    if bytes.len() > MAX_LABEL_LEN || first == b'-' || last == b'-' {
        return false;
    }
    bytes
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-')
}
