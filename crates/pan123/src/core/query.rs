//! URL query composition and signature placement.

use pan123_sign::SignaturePair;
use url::Url;

use crate::error::Result;

/// Parse `raw` and merge `params` into its query string.
///
/// Existing and added pairs are re-encoded in key order; pairs sharing a key
/// keep their relative order.
pub fn with_query(raw: &str, params: &[(String, String)]) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.extend(params.iter().cloned());
    write_sorted(&mut url, pairs);
    Ok(url)
}

/// Path component fed into the signature.
pub fn signing_path(url: &Url) -> &str { url.path() }

/// Add a signature pair to an already composed URL.
pub fn append_signature(url: &mut Url, pair: SignaturePair) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.push(pair.into_query_pair());
    write_sorted(url, pairs);
}

fn write_sorted(url: &mut Url, mut pairs: Vec<(String, String)>) {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(k: &str, v: &str) -> (String, String) { (k.to_string(), v.to_string()) }

    #[test]
    fn params_are_sorted_and_encoded() {
        let url = with_query(
            "https://www.123pan.com/api/file/list/new?limit=100",
            &[p("driveId", "0"), p("Page", "2"), p("q", "a b&c")],
        )
        .unwrap();
        assert_eq!(url.path(), "/api/file/list/new");
        assert_eq!(url.query(), Some("Page=2&driveId=0&limit=100&q=a+b%26c"));
    }

    #[test]
    fn no_params_leaves_no_query() {
        let url = with_query("https://www.123pan.com/b/api/user/info", &[]).unwrap();
        assert_eq!(url.as_str(), "https://www.123pan.com/b/api/user/info");
    }

    #[test]
    fn signature_is_merged_into_query() {
        let mut url = with_query("https://www.123pan.com/api/x", &[p("z", "1")]).unwrap();
        append_signature(
            &mut url,
            SignaturePair { key: "4040881778".into(), value: "1-2-3".into() },
        );
        assert_eq!(url.query(), Some("4040881778=1-2-3&z=1"));
        assert_eq!(signing_path(&url), "/api/x");
    }

    #[test]
    fn invalid_url_is_an_error() {
        assert!(with_query("not a url", &[]).is_err());
    }
}
