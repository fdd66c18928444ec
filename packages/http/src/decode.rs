//! Extraction of the API payload from a WFM page.
//!
//! A WFM server answers every API query with an ordinary HTML page. The
//! payload sits inside `<div id="wfm-api">...</div>`, with `<br>` for line
//! breaks; everything outside that region is presentation.

use lazy_static::lazy_static;
use regex::Regex;

/// Start of the payload region.
pub const OPEN_MARKER: &str = "<div id=\"wfm-api\">";

/// End of the payload region (the first one after [`OPEN_MARKER`]).
pub const CLOSE_MARKER: &str = "</div>";

/// Markup that becomes a line break in the payload.
pub const LINE_BREAK: &str = "<br>";

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Decode the payload of a response body.
///
/// Returns `None` when the body has no opening marker. A missing closing
/// marker leaves the payload running to the end of the body.
///
/// ```rust
/// use wfm_http::decode::decode_api_payload;
///
/// let body = "<p>x</p><div id=\"wfm-api\">a<br>a/b.txt</div>";
/// assert_eq!(decode_api_payload(body).as_deref(), Some("a\na/b.txt"));
/// ```
pub fn decode_api_payload(body: &str) -> Option<String> {
    let (_, after_open) = body.split_once(OPEN_MARKER)?;
    let region = after_open
        .split_once(CLOSE_MARKER)
        .map_or(after_open, |(inside, _)| inside);

    let text = region.trim().replace(LINE_BREAK, "\n");
    Some(TAG.replace_all(&text, "").into_owned())
}

/// Split a listing payload into paths.
///
/// Lines are kept verbatim apart from a trailing `\r`; spaces are legal in
/// server paths. Empty lines are dropped, so an empty payload is an empty
/// listing.
pub fn split_listing(payload: &str) -> Vec<String> {
    payload
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn payload() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9. /_-]{1,12}", 0..6).prop_map(|lines| lines.join(LINE_BREAK))
    }

    proptest! {
        #[test]
        fn prop_noise_outside_region_is_ignored(
            before in "[a-z <>/=\"\n\t]{0,40}",
            after in "[a-z <>/=\"\n\t]{0,40}",
            payload in payload(),
        ) {
            prop_assume!(!before.contains(OPEN_MARKER));

            let region = format!("{}{}{}", OPEN_MARKER, payload, CLOSE_MARKER);
            let noisy = format!("{}{}{}", before, region, after);

            prop_assert_eq!(decode_api_payload(&noisy), decode_api_payload(&region));
        }

        #[test]
        fn prop_line_breaks_split_listing(lines in prop::collection::vec("[a-z0-9./_-]{1,12}", 0..6)) {
            let body = format!("{}{}{}", OPEN_MARKER, lines.join(LINE_BREAK), CLOSE_MARKER);
            let decoded = decode_api_payload(&body).unwrap_or_default();

            prop_assert_eq!(split_listing(&decoded), lines);
        }
    }
}
