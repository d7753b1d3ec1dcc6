//! Slot query URLs.

use slot_types::Target;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://ttp.cbp.dhs.gov";

const SLOTS_PATH: &str = "/schedulerapi/slots";

/// Build the "soonest slot" query for a target.
///
/// e.g. `https://ttp.cbp.dhs.gov/schedulerapi/slots?orderBy=soonest&limit=1&minimum=1&locationId=5446`
pub fn slots_url(api_base: &Url, target: &Target) -> Url {
    let mut url = api_base.clone();
    url.set_path(SLOTS_PATH);
    url.set_fragment(None);

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query
            .append_pair("orderBy", "soonest")
            .append_pair("limit", "1")
            .append_pair("minimum", &target.party_size().to_string());

        match target {
            Target::Location { id, .. } => {
                query.append_pair("locationId", &id.to_string());
            }
            Target::Remote { .. } => {
                query.append_pair("remote", "true");
            }
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> Url {
        Url::parse(DEFAULT_API_BASE).unwrap()
    }

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_location_url() {
        let url = slots_url(
            &base(),
            &Target::Location {
                id: 5446,
                party_size: 1,
            },
        );
        let params = params(&url);

        assert_eq!(url.host_str(), Some("ttp.cbp.dhs.gov"));
        assert_eq!(url.path(), "/schedulerapi/slots");
        assert_eq!(params.get("locationId").map(String::as_str), Some("5446"));
        assert!(!params.contains_key("remote"));
        assert_eq!(params.get("orderBy").map(String::as_str), Some("soonest"));
        assert_eq!(params.get("limit").map(String::as_str), Some("1"));
        assert_eq!(params.get("minimum").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_remote_url() {
        let url = slots_url(&base(), &Target::Remote { party_size: 3 });
        let params = params(&url);

        assert_eq!(params.get("remote").map(String::as_str), Some("true"));
        assert!(!params.contains_key("locationId"));
        assert_eq!(params.get("orderBy").map(String::as_str), Some("soonest"));
        assert_eq!(params.get("limit").map(String::as_str), Some("1"));
        assert_eq!(params.get("minimum").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_party_sizes_and_ids_carry_through() {
        for party_size in [1, 2, 5, 12] {
            for id in [0, 5140, 16496] {
                let url = slots_url(&base(), &Target::Location { id, party_size });
                let params = params(&url);
                assert_eq!(params["minimum"], party_size.to_string());
                assert_eq!(params["locationId"], id.to_string());
                assert_eq!(params.len(), 4);
            }
        }
    }

    #[test]
    fn test_base_path_and_query_replaced() {
        let base = Url::parse("http://127.0.0.1:8080/ignored?stale=1#frag").unwrap();
        let url = slots_url(&base, &Target::Remote { party_size: 1 });

        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/schedulerapi/slots");
        assert_eq!(url.fragment(), None);
        assert!(!params(&url).contains_key("stale"));
    }
}
