//! Per-request identity supplied by the host platform.

/// Capability required for every domain purchase action.
pub const MANAGE_DOMAINS: &str = "manage_domains";

/// Placeholder cardholder shown when the user has no name on record.
pub const CARDHOLDER_PLACEHOLDER: &str = "Your name";

/// Who is asking, and on behalf of which site.
///
/// Replaces the host's global "current user" / "current site" lookups: every
/// operation receives it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: i64,
    pub site_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub capabilities: Vec<String>,
}

impl RequestContext {
    pub fn is_logged_in(&self) -> bool {
        self.user_id > 0
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Full name for the payment form, or [`CARDHOLDER_PLACEHOLDER`].
    pub fn cardholder(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();

        if name.is_empty() {
            CARDHOLDER_PLACEHOLDER.to_string()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardholder_full_name() {
        let ctx = RequestContext {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(ctx.cardholder(), "Jane Doe");
    }

    #[test]
    fn test_cardholder_partial_name_is_trimmed() {
        let ctx = RequestContext {
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(ctx.cardholder(), "Doe");
    }

    #[test]
    fn test_cardholder_placeholder() {
        let ctx = RequestContext::default();
        assert_eq!(ctx.cardholder(), CARDHOLDER_PLACEHOLDER);
    }

    #[test]
    fn test_capabilities() {
        let ctx = RequestContext {
            user_id: 1,
            capabilities: vec![MANAGE_DOMAINS.to_string()],
            ..Default::default()
        };
        assert!(ctx.is_logged_in());
        assert!(ctx.can(MANAGE_DOMAINS));
        assert!(!ctx.can("edit_posts"));
    }
}
