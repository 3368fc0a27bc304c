use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::WlResult;

use self::ip_range::{ip_range, is_ip_range};
use self::origin::Origin;

pub mod check;
pub mod ip_range;
pub mod origin;

/// The set of origins allowed to deliver webhooks.
///
/// CIDR entries are expanded into individual addresses at population time, so
/// membership is a plain string lookup. The token set is built aside and
/// swapped in behind the lock; a concurrent reader holds either the previous
/// set or the new one, never a half-built one.
#[derive(Debug, Default)]
pub struct AllowList {
    tokens: RwLock<Arc<HashSet<String>>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the token set from the configured origins, replacing whatever
    /// was published before.
    ///
    /// On an invalid address the error surfaces to the caller and the tokens
    /// gathered up to that point are published as-is; the caller is expected
    /// to fix the configuration and repopulate rather than keep the partial
    /// set.
    pub fn populate(&self, origins: &[Origin]) -> WlResult<()> {
        let mut next = HashSet::new();
        let result = insert_origins(&mut next, origins);
        tracing::debug!(tokens = next.len(), "allow list populated");
        *self.tokens.write() = Arc::new(next);
        result
    }

    /// Merges raw origin tokens into the published set. Range tokens are
    /// expanded, anything else (hostname or bare address) is kept verbatim.
    pub fn add_origins<I, S>(&self, origins: I) -> WlResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next: HashSet<String> = (**self.tokens.read()).clone();
        let mut result = Ok(());
        for origin in origins {
            let origin = origin.as_ref();
            if is_ip_range(origin) {
                match ip_range(origin) {
                    Ok(range) => next.extend(range),
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                }
            } else {
                next.insert(origin.to_string());
            }
        }
        *self.tokens.write() = Arc::new(next);
        result
    }

    /// The currently published token set.
    pub fn tokens(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.tokens.read())
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

fn insert_origins(tokens: &mut HashSet<String>, origins: &[Origin]) -> WlResult<()> {
    for origin in origins {
        if let Some(host) = origin.host.as_deref().filter(|h| !h.is_empty()) {
            tokens.insert(host.to_string());
        }
        if let Some(address) = origin.address.as_deref().filter(|a| !a.is_empty()) {
            tokens.extend(ip_range(address)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WlError;

    #[test]
    fn test_empty_allow_list() {
        let allow_list = AllowList::new();
        allow_list.populate(&[]).unwrap();
        assert!(allow_list.tokens().is_empty());
        assert!(allow_list.is_empty());
    }

    #[test]
    fn test_populate() {
        let allow_list = AllowList::new();
        allow_list
            .populate(&[
                Origin {
                    host: Some("squid-104-1.sc1.uc-inf.net".to_string()),
                    address: Some("165.254.226.119".to_string()),
                },
                Origin::address("107.23.104.0/31"),
            ])
            .unwrap();

        let tokens = allow_list.tokens();
        assert_eq!(tokens.len(), 4);
        assert!(tokens.contains("squid-104-1.sc1.uc-inf.net"));
        assert!(tokens.contains("165.254.226.119"));
        assert!(tokens.contains("107.23.104.0"));
        assert!(tokens.contains("107.23.104.1"));
    }

    #[test]
    fn test_populate_single_address() {
        let allow_list = AllowList::new();
        allow_list
            .populate(&[Origin::address("165.254.226.119")])
            .unwrap();
        assert_eq!(
            *allow_list.tokens(),
            HashSet::from(["165.254.226.119".to_string()])
        );
    }

    #[test]
    fn test_populate_replaces() {
        let allow_list = AllowList::new();
        allow_list.populate(&[Origin::host("first.example.org")]).unwrap();
        allow_list.populate(&[Origin::host("second.example.org")]).unwrap();

        let tokens = allow_list.tokens();
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains("second.example.org"));
    }

    #[test]
    fn test_populate_invalid_address() {
        let allow_list = AllowList::new();
        let result = allow_list.populate(&[Origin::address("256.1.1.1")]);
        assert!(matches!(result, Err(WlError::InvalidAddress(_))));
    }

    #[test]
    fn test_populate_invalid_address_publishes_partial_build() {
        let allow_list = AllowList::new();
        allow_list.populate(&[Origin::host("old.example.org")]).unwrap();

        let result = allow_list.populate(&[
            Origin::host("github.com"),
            Origin::address("256.1.1.1"),
        ]);
        assert!(result.is_err());

        // no rollback: the tokens gathered before the failure replace the
        // previous set, the caller is expected to repopulate
        let tokens = allow_list.tokens();
        assert!(tokens.contains("github.com"));
        assert!(!tokens.contains("old.example.org"));
    }

    #[test]
    fn test_populate_skips_empty_fields() {
        let allow_list = AllowList::new();
        allow_list
            .populate(&[
                Origin {
                    host: Some(String::new()),
                    address: None,
                },
                Origin::host("github.com"),
            ])
            .unwrap();
        assert_eq!(*allow_list.tokens(), HashSet::from(["github.com".to_string()]));
    }

    #[test]
    fn test_add_origins() {
        let allow_list = AllowList::new();
        allow_list
            .add_origins([
                "squid-104-1.sc1.uc-inf.net",
                "165.254.226.119",
                "107.23.104.0/31",
            ])
            .unwrap();

        let tokens = allow_list.tokens();
        assert_eq!(tokens.len(), 4);
        assert!(tokens.contains("squid-104-1.sc1.uc-inf.net"));
        assert!(tokens.contains("165.254.226.119"));
        assert!(tokens.contains("107.23.104.0"));
        assert!(tokens.contains("107.23.104.1"));
    }

    #[test]
    fn test_add_origins_merges() {
        let allow_list = AllowList::new();
        allow_list.populate(&[Origin::host("github.com")]).unwrap();
        allow_list.add_origins(["10.0.0.1"]).unwrap();

        let tokens = allow_list.tokens();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("github.com"));
        assert!(tokens.contains("10.0.0.1"));
    }

    #[test]
    fn test_reader_keeps_old_handle_across_repopulate() {
        let allow_list = AllowList::new();
        allow_list.populate(&[Origin::host("old.example.org")]).unwrap();
        let before = allow_list.tokens();
        allow_list.populate(&[Origin::host("new.example.org")]).unwrap();

        assert!(before.contains("old.example.org"));
        assert!(allow_list.tokens().contains("new.example.org"));
    }
}
