use crate::types::{SearchRequest, SearchResponse};
use crate::{Result, Transport};

/// Build the `/search` path with its encoded query string.
pub fn search_path(request: &SearchRequest) -> String {
    format!(
        "/search?q={}&type={}&limit={}&offset={}",
        urlencoding::encode(&request.query),
        urlencoding::encode(&request.type_param()),
        request.limit,
        request.offset
    )
}

/// `GET /search?q=&type=&limit=&offset=`
///
/// Always calls the backend; deciding whether a search is worth sending is up to
/// the caller.
pub async fn search(transport: &Transport, request: &SearchRequest) -> Result<SearchResponse> {
    transport.get(&search_path(request)).await?.json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchType;

    #[test]
    fn test_search_path_encoding() {
        let request = SearchRequest::new("AC/DC & friends", vec![SearchType::Track], 20);
        assert_eq!(
            search_path(&request),
            "/search?q=AC%2FDC%20%26%20friends&type=track&limit=20&offset=0"
        );

        let request = SearchRequest::new("abba", vec![SearchType::Track, SearchType::Artist], 3)
            .with_offset(6);
        assert_eq!(
            search_path(&request),
            "/search?q=abba&type=track%2Cartist&limit=3&offset=6"
        );
    }
}
