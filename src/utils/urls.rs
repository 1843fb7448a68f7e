// url building helpers shared by config and the path resolver

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// characters escaped inside a path segment; `/` passes through
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const API_SUFFIX: &str = "/api";

/// true for `http://` and `https://` urls, case-insensitive
pub fn is_absolute_url(value: &str) -> bool {
    starts_with_ignore_case(value, "http://") || starts_with_ignore_case(value, "https://")
}

/// true for inline `data:` uris
pub fn is_data_uri(value: &str) -> bool {
    starts_with_ignore_case(value, "data:")
}

/// derive the backend origin from an api base url by dropping the `/api` suffix
pub fn strip_api_suffix(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed
        .strip_suffix(API_SUFFIX)
        .unwrap_or(trimmed)
        .to_string()
}

/// join an endpoint onto a base url unless the endpoint is already absolute
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    if is_absolute_url(endpoint) {
        return endpoint.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// build `<root>/<folder>/<filename>` with exactly one slash between parts
pub fn join_asset_path(root: &str, folder: &str, filename: &str) -> String {
    let mut path = root.trim_end_matches('/').to_string();

    let folder = folder.trim_matches('/');
    if !folder.is_empty() {
        path.push('/');
        path.push_str(&encode_path_segment(folder));
    }

    path.push('/');
    path.push_str(&encode_path_segment(filename.trim_start_matches('/')));
    path
}

/// percent-encode characters that would break a url path
///
/// Input is treated as a raw name, so a literal `%` is escaped too.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
