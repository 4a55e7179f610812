//! Object name validation.

const DNS1123_SUBDOMAIN_MAX_LEN: usize = 253;

/// Whether `name` is a valid DNS-1123 subdomain: dot-separated labels of
/// lowercase alphanumerics and dashes, at most 253 characters overall.
pub fn is_dns1123_subdomain(name: &str) -> bool {
    if name.is_empty() || name.len() > DNS1123_SUBDOMAIN_MAX_LEN {
        return false;
    }
    name.split('.').all(is_dns1123_label)
}

fn is_dns1123_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let Some((&first, rest)) = bytes.split_first() else {
        return false;
    };
    let Some((&last, middle)) = rest.split_last() else {
        return first.is_ascii_lowercase() || first.is_ascii_digit();
    };
    (first.is_ascii_lowercase() || first.is_ascii_digit())
        && (last.is_ascii_lowercase() || last.is_ascii_digit())
        && middle
            .iter()
            .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Validate a pod name, or a generate-name prefix when `prefix` is true.
///
/// A prefix may end with the dash the generated suffix continues from; that
/// trailing dash is masked before validation since the completed name ends
/// with an alphanumeric suffix.
pub fn validate_pod_name(name: &str, prefix: bool) -> bool {
    if prefix {
        if let Some(base) = name.strip_suffix('-') {
            let mut masked = String::with_capacity(name.len());
            masked.push_str(base);
            masked.push('a');
            return is_dns1123_subdomain(&masked);
        }
    }
    is_dns1123_subdomain(name)
}
