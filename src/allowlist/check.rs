use std::collections::HashSet;

/// Splits a forwarded-address list ("12.34.45.56, 13.45.56.67") into its
/// candidate origins.
pub fn origin_candidates(remote_info: &str) -> impl Iterator<Item = &str> {
    remote_info
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
}

/// Checks whether any candidate origin is a member of the token set.
///
/// Membership is exact string match; CIDR expansion at population time is
/// what turned range membership into a lookup. An empty set matches nothing.
pub fn verify_origin(remote_info: &str, tokens: &HashSet<String>) -> bool {
    let allowed = origin_candidates(remote_info).any(|candidate| tokens.contains(candidate));
    if !allowed {
        tracing::warn!(origin = remote_info, "webhook request blocked");
    }
    allowed
}
