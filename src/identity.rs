//! Player identity
//!
//! The host shell (Telegram) may hand us a user id and a start/referral
//! parameter. Both are opaque. Without a host id we mint a guest id once and
//! keep it in the save.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix of generated ids
pub const GUEST_PREFIX: &str = "guest_";
/// Random characters after the prefix
pub const GUEST_ID_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Launch data injected by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostIdentity {
    pub user_id: Option<String>,
    /// Referral / deep-link parameter, passed through untouched
    pub start_param: Option<String>,
}

impl HostIdentity {
    pub fn new(user_id: Option<String>, start_param: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.is_empty()),
            start_param: start_param.filter(|p| !p.is_empty()),
        }
    }
}

/// Generate a guest id like `guest_k3j9x0a1b`
pub fn guest_id<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..GUEST_ID_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", GUEST_PREFIX, suffix)
}

/// Pick the id to play under: host id, then the saved id, then a new guest id.
/// Returns the id and whether it differs from what was saved.
pub fn resolve_user_id<R: Rng>(
    host: &HostIdentity,
    saved: Option<&str>,
    rng: &mut R,
) -> (String, bool) {
    if let Some(id) = &host.user_id {
        return (id.clone(), saved != Some(id.as_str()));
    }
    if let Some(id) = saved.filter(|id| !id.is_empty()) {
        return (id.to_string(), false);
    }
    (guest_id(rng), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_guest_id_format() {
        let mut rng = Pcg32::seed_from_u64(1);
        let id = guest_id(&mut rng);
        assert!(id.starts_with(GUEST_PREFIX));
        let suffix = &id[GUEST_PREFIX.len()..];
        assert_eq!(suffix.len(), GUEST_ID_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_host_id_wins() {
        let mut rng = Pcg32::seed_from_u64(1);
        let host = HostIdentity::new(Some("12345".into()), Some("ref_42".into()));
        assert_eq!(
            resolve_user_id(&host, Some("guest_old"), &mut rng),
            ("12345".to_string(), true)
        );
        assert_eq!(
            resolve_user_id(&host, Some("12345"), &mut rng),
            ("12345".to_string(), false)
        );
    }

    #[test]
    fn test_saved_id_kept_then_guest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let host = HostIdentity::default();
        assert_eq!(
            resolve_user_id(&host, Some("guest_abc"), &mut rng),
            ("guest_abc".to_string(), false)
        );
        let (id, changed) = resolve_user_id(&host, None, &mut rng);
        assert!(changed);
        assert!(id.starts_with(GUEST_PREFIX));
    }

    #[test]
    fn test_empty_host_values_ignored() {
        let host = HostIdentity::new(Some(String::new()), Some(String::new()));
        assert_eq!(host, HostIdentity::default());
    }
}
