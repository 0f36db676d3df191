use http_client::Request;

/// User agent sent with every request
const USER_AGENT: &str = concat!("spotify-app-client/", env!("CARGO_PKG_VERSION"));

pub const AUTHORIZATION: &str = "Authorization";

/// Add headers shared by every call to the backend
pub fn add_common_headers(request: &mut Request) {
    request.insert_header("User-Agent", USER_AGENT);
    request.insert_header("Accept", "application/json");
}

/// Add a JSON content type for requests that carry a body
pub fn add_json_body_headers(request: &mut Request) {
    request.insert_header("Content-Type", "application/json");
}

/// Add caller supplied headers, replacing defaults of the same name
pub fn add_explicit_headers(request: &mut Request, headers: &[(&str, &str)]) {
    for (name, value) in headers {
        request.insert_header(*name, *value);
    }
}

/// Attach the session identity as a bearer credential.
///
/// Does nothing when the request already declares an `Authorization` header or
/// when there is no identity.
pub fn add_bearer(request: &mut Request, identity: Option<&str>) -> bool {
    if request.header(AUTHORIZATION).is_some() {
        return false;
    }
    match identity {
        Some(identity) => {
            request.insert_header(AUTHORIZATION, format!("Bearer {identity}"));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_types::{Method, Url};

    fn request() -> Request {
        Request::new(Method::Get, Url::parse("http://localhost/api/tracks/1").unwrap())
    }

    #[test]
    fn test_bearer_is_added_when_missing() {
        let mut req = request();
        assert!(add_bearer(&mut req, Some("user-42")));
        assert_eq!(req.header(AUTHORIZATION).unwrap().as_str(), "Bearer user-42");
    }

    #[test]
    fn test_explicit_authorization_wins() {
        let mut req = request();
        add_explicit_headers(&mut req, &[(AUTHORIZATION, "Bearer explicit")]);
        assert!(!add_bearer(&mut req, Some("user-42")));
        assert_eq!(req.header(AUTHORIZATION).unwrap().as_str(), "Bearer explicit");
    }

    #[test]
    fn test_no_identity_no_header() {
        let mut req = request();
        assert!(!add_bearer(&mut req, None));
        assert!(req.header(AUTHORIZATION).is_none());
    }
}
