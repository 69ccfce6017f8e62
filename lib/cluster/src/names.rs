//! Kubernetes object name rules.

const MAX_LABEL_LEN: usize = 63;
const MAX_SUBDOMAIN_LEN: usize = 253;

/// Returns true if `name` is an RFC 1123 label, the form namespace names take.
///
/// Lowercase alphanumerics and `-`, starting and ending alphanumeric, at
/// most 63 characters.
#[must_use]
pub fn is_dns_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_LABEL_LEN
                && is_alphanumeric(*first)
                && is_alphanumeric(*last)
                && bytes.iter().all(|b| is_alphanumeric(*b) || *b == b'-')
        }
        _ => false,
    }
}

/// Returns true if `name` is an RFC 1123 subdomain, the form deployment
/// names take: dot-separated labels, at most 253 characters.
#[must_use]
pub fn is_dns_subdomain(name: &str) -> bool {
    name.len() <= MAX_SUBDOMAIN_LEN && name.split('.').all(is_dns_label)
}

fn is_alphanumeric(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_namespace_names() {
        assert!(is_dns_label("payments"));
        assert!(is_dns_label("team-a-1"));
        assert!(is_dns_label("0"));
        assert!(is_dns_label(&"a".repeat(63)));
    }

    #[test]
    fn rejects_invalid_labels() {
        assert!(!is_dns_label(""));
        assert!(!is_dns_label("-payments"));
        assert!(!is_dns_label("payments-"));
        assert!(!is_dns_label("Payments"));
        assert!(!is_dns_label("a.b"));
        assert!(!is_dns_label("<script>alert(1)</script>"));
        assert!(!is_dns_label(&"a".repeat(64)));
    }

    #[test]
    fn subdomains_allow_dots_between_labels() {
        assert!(is_dns_subdomain("api"));
        assert!(is_dns_subdomain("api.v2"));
        assert!(!is_dns_subdomain("api..v2"));
        assert!(!is_dns_subdomain(".api"));
        assert!(!is_dns_subdomain("api\"onload=\"x"));
        assert!(!is_dns_subdomain(&"a.".repeat(127)));
    }
}
