//! Reading options from the URL query.

use js_sys::Array;
use log::warn;
use web_sys::UrlSearchParams;

/// The `(key, value)` pairs of the page's query string, in order.
///
/// Values are already percent-decoded.
pub(crate) fn query_pairs() -> Vec<(String, String)> {
    let search = match gloo::utils::window().location().search() {
        Ok(search) => search,
        Err(e) => {
            warn!("Cannot read the URL query: {:?}", e);
            return Vec::new();
        }
    };
    let params = match UrlSearchParams::new_with_str(&search) {
        Ok(params) => params,
        Err(e) => {
            warn!("Malformed URL query {:?}: {:?}", search, e);
            return Vec::new();
        }
    };
    params
        .entries()
        .into_iter()
        .filter_map(|entry| {
            let entry = Array::from(&entry.ok()?);
            Some((entry.get(0).as_string()?, entry.get(1).as_string()?))
        })
        .collect()
}
