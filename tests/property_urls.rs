//! Properties of URL handling

use edwh_files_http::{default_output_name, require_protocol};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_require_protocol_is_idempotent(host in "[a-z]{1,10}\\.[a-z]{2,3}", path in "(/[a-z0-9]{1,8}){0,3}") {
        let once = require_protocol(&format!("{host}{path}"));
        prop_assert!(once.starts_with("https://"));
        prop_assert_eq!(require_protocol(&once), once.clone());
    }

    #[test]
    fn prop_plain_http_is_kept(host in "[a-z]{1,10}\\.[a-z]{2,3}") {
        let url = format!("http://{host}");
        prop_assert_eq!(require_protocol(&url), url);
    }

    #[test]
    fn prop_output_name_is_last_segment(id in "[A-Za-z0-9]{4,8}", name in "[a-z]{1,8}\\.[a-z]{1,4}") {
        let url = format!("https://files.edwh.nl/{id}/{name}");
        prop_assert_eq!(default_output_name(&url).unwrap(), name);
    }
}
