//! Query string parameter lookup

/// Look up `name` in a query string such as `?uploadDataId=42&tab=layers`.
///
/// Segments are split on `&`, then on the first `=`. The value is
/// percent-decoded the way `decodeURIComponent` does it, so `+` is kept
/// literally. The first matching segment wins. A segment without `=` matches
/// with an empty value; a segment whose value is not valid UTF-8 after
/// decoding is skipped.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .find_map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            if key != name {
                return None;
            }
            urlencoding::decode(value).ok().map(|v| v.into_owned())
        })
}
