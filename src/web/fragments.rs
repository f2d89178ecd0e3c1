//! HTML fragments embedded in AJAX responses.

use askama::Template;
use chrono::{Datelike, Utc};
use url::Url;

use crate::domain::action::AjaxAction;
use crate::domain::countries::Country;
use crate::domain::entities::{CardType, DomainCheck};

/// Number of expiration years offered by the purchase form.
const EXPIRATION_YEARS: i32 = 10;

/// Notice shown when a domain can be bought.
///
/// Renders `templates/check_available.html` with the upper-cased domain, its
/// yearly price and a link to the purchase form.
#[derive(Template)]
#[template(path = "check_available.html")]
pub struct CheckAvailableFragment {
    pub domain_upper: String,
    pub price: String,
    pub purchase_url: String,
}

impl CheckAvailableFragment {
    pub fn new(check: &DomainCheck, purchase_url: &Url) -> Self {
        Self {
            domain_upper: check.domain.to_uppercase(),
            price: check.price.clone().unwrap_or_default(),
            purchase_url: purchase_url.to_string(),
        }
    }
}

/// Notice shown when a domain is taken.
#[derive(Template)]
#[template(path = "check_unavailable.html")]
pub struct CheckUnavailableFragment {
    pub domain: String,
}

/// Purchase form for the domain of the user's last check.
///
/// Renders `templates/purchase_form.html`. The form posts back to
/// `POST /ajax/purchase-domain` with its own anti-forgery token.
#[derive(Template)]
#[template(path = "purchase_form.html")]
pub struct PurchaseFormFragment<'a> {
    pub action_url: String,
    pub nonce: String,
    pub domain_upper: String,
    pub price: Option<String>,
    pub sld: String,
    pub tld: String,
    pub card_types: Vec<CardType>,
    pub cardholder: String,
    pub countries: &'a [Country],
    pub months: Vec<String>,
    pub years: Vec<i32>,
}

impl<'a> PurchaseFormFragment<'a> {
    pub fn new(
        check: &DomainCheck,
        card_types: Vec<CardType>,
        cardholder: String,
        countries: &'a [Country],
        action_url: &Url,
        nonce: String,
    ) -> Self {
        let this_year = Utc::now().year();

        Self {
            action_url: action_url.to_string(),
            nonce,
            domain_upper: check.domain.to_uppercase(),
            price: check.price.clone(),
            sld: check.sld.clone(),
            tld: check.tld.clone(),
            card_types,
            cardholder,
            countries,
            months: (1..=12).map(|m| format!("{:02}", m)).collect(),
            years: (this_year..this_year + EXPIRATION_YEARS).collect(),
        }
    }
}

/// Builds the absolute URL of an action's endpoint.
///
/// `base` is the service root and may carry a path prefix; the action's route
/// is resolved below it, with or without a trailing slash on `base`.
///
/// # Errors
///
/// Returns [`url::ParseError`] if the path cannot be joined onto `base`.
pub fn action_url(base: &Url, action: AjaxAction) -> Result<Url, url::ParseError> {
    let mut root = base.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.join(action.path().trim_start_matches('/'))
}

/// Builds the link carried by the "available" notice.
///
/// The query names the action the way the host platform does, followed by
/// the purchase form token and the checked TLD.
///
/// # Errors
///
/// Returns [`url::ParseError`] if the path cannot be joined onto `base`.
pub fn purchase_link(base: &Url, nonce: &str, tld: &str) -> Result<Url, url::ParseError> {
    let mut url = action_url(base, AjaxAction::GetPurchaseForm)?;
    url.query_pairs_mut()
        .append_pair("action", AjaxAction::GetPurchaseForm.as_str())
        .append_pair("nonce", nonce)
        .append_pair("tld", tld);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countries::countries;
    use crate::domain::entities::DomainCandidate;

    fn base() -> Url {
        Url::parse("https://sites.example.org").unwrap()
    }

    fn check(price: Option<&str>) -> DomainCheck {
        DomainCheck::new(
            &DomainCandidate::parse("example", "com").unwrap(),
            price.map(str::to_string),
        )
    }

    #[test]
    fn test_purchase_link() {
        let url = purchase_link(&base(), "abc123", "com").unwrap();

        assert_eq!(url.path(), "/ajax/purchase-form");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("action".into(), "domainmapping_get_purchase_form".into()),
                ("nonce".into(), "abc123".into()),
                ("tld".into(), "com".into()),
            ]
        );
    }

    #[test]
    fn test_links_keep_base_path_prefix() {
        for raw in [
            "https://sites.example.org/domainmap/",
            "https://sites.example.org/domainmap",
        ] {
            let base = Url::parse(raw).unwrap();

            let action = action_url(&base, AjaxAction::PurchaseDomain).unwrap();
            assert_eq!(
                action.as_str(),
                "https://sites.example.org/domainmap/ajax/purchase-domain"
            );

            let link = purchase_link(&base, "abc123", "com").unwrap();
            assert_eq!(link.path(), "/domainmap/ajax/purchase-form");
        }
    }

    #[test]
    fn test_available_fragment() {
        let url = purchase_link(&base(), "abc123", "com").unwrap();
        let html = CheckAvailableFragment::new(&check(Some("$12.50")), &url)
            .render()
            .unwrap();

        assert!(html.contains("domainmapping-info-success"));
        assert!(html.contains("<b>EXAMPLE.COM</b>"));
        assert!(html.contains("is available to purchase for <b>$12.50</b> per year."));
        assert!(html.contains("class=\"domainmapping-purchase-link\""));
        assert!(html.contains("nonce=abc123"));
        assert!(html.contains("tld=com"));
        assert!(html.contains("Purchase this domain."));
    }

    #[test]
    fn test_unavailable_fragment() {
        let html = CheckUnavailableFragment {
            domain: "taken.com".to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("domainmapping-info-error"));
        assert!(html.contains("<b>taken.com</b> is not available to purchase."));
    }

    #[test]
    fn test_fragment_escapes_input() {
        let html = CheckUnavailableFragment {
            domain: "<script>".to_string(),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_purchase_form_fragment() {
        let action = action_url(&base(), AjaxAction::PurchaseDomain).unwrap();
        let html = PurchaseFormFragment::new(
            &check(Some("$9.99")),
            vec![CardType::new("visa", "Visa")],
            "Jane Doe".to_string(),
            countries(),
            &action,
            "token42".to_string(),
        )
        .render()
        .unwrap();

        assert!(html.contains("action=\"https://sites.example.org/ajax/purchase-domain\""));
        assert!(html.contains("name=\"nonce\" value=\"token42\""));
        assert!(html.contains("name=\"sld\" value=\"example\""));
        assert!(html.contains("name=\"tld\" value=\"com\""));
        assert!(html.contains("EXAMPLE.COM"));
        assert!(html.contains("$9.99 per year"));
        assert!(html.contains("<option value=\"visa\">Visa</option>"));
        assert!(html.contains("value=\"Jane Doe\""));
        assert!(html.contains("<option value=\"US\">"));
        assert!(html.contains("<option value=\"12\">12</option>"));
    }

    #[test]
    fn test_purchase_form_without_price() {
        let action = action_url(&base(), AjaxAction::PurchaseDomain).unwrap();
        let html = PurchaseFormFragment::new(
            &check(None),
            vec![],
            "Your name".to_string(),
            countries(),
            &action,
            "token42".to_string(),
        )
        .render()
        .unwrap();

        assert!(html.contains("EXAMPLE.COM"));
        assert!(!html.contains("per year"));
    }
}
