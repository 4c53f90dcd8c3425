/// Allow-list gate consulted before anything reaches the router.
///
/// An empty allow-list authorizes everyone. That is fail-open on purpose: a
/// fresh deployment without ALLOWED_USER_IDS is a personal bot, not a locked
/// one. Denials are logged here; telling the user is the caller's job.
pub struct AuthGate {
    allowed: Vec<i64>,
}

impl AuthGate {
    pub fn new(allowed: Vec<i64>) -> Self {
        Self { allowed }
    }

    pub fn is_authorized(&self, user_id: i64) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        let ok = self.allowed.contains(&user_id);
        if !ok {
            tracing::warn!(user_id, "unauthorized command attempt");
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allow_list_authorizes_everyone() {
        let gate = AuthGate::new(vec![]);
        for id in [42, 0, -7, i64::MAX] {
            assert!(gate.is_authorized(id));
        }
    }

    #[test]
    fn allow_list_is_a_membership_test() {
        let gate = AuthGate::new(vec![42]);
        assert!(gate.is_authorized(42));
        assert!(!gate.is_authorized(43));
        assert!(!gate.is_authorized(-42));
    }
}
