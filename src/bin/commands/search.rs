use super::catalog::explain;
use super::output::{print_album_line, print_artist_line, print_track_line};
use spotify_app_client::{AppClient, SearchFilters, SearchResponse, SearchType};

pub async fn handle_search(
    app: &AppClient,
    query: &str,
    types: &[SearchType],
    limit: Option<u32>,
    pages: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = app.search();
    if !types.is_empty() {
        let mut filters = SearchFilters::none();
        for kind in types {
            filters.set(*kind, true);
        }
        context.set_filters(filters);
    }

    let results = context
        .search(query, limit)
        .await
        .map_err(|e| explain(app, e))?;
    if results.is_empty() {
        println!("No results for '{query}'");
        return Ok(());
    }
    print_results(&results);

    for _ in 1..pages {
        match context.fetch_next_page().await.map_err(|e| explain(app, e))? {
            Some(results) => print_results(&results),
            None => break,
        }
    }
    Ok(())
}

fn print_results(results: &SearchResponse) {
    if let Some(tracks) = results.tracks.as_ref().filter(|page| !page.is_empty()) {
        println!("🎵 Tracks");
        let offset = tracks.offset.unwrap_or(0) as usize;
        for (index, track) in tracks.items.iter().enumerate() {
            print_track_line(offset + index, track);
        }
    }
    if let Some(artists) = results.artists.as_ref().filter(|page| !page.is_empty()) {
        println!("🎤 Artists");
        let offset = artists.offset.unwrap_or(0) as usize;
        for (index, artist) in artists.items.iter().enumerate() {
            print_artist_line(offset + index, artist);
        }
    }
    if let Some(albums) = results.albums.as_ref().filter(|page| !page.is_empty()) {
        println!("💿 Albums");
        let offset = albums.offset.unwrap_or(0) as usize;
        for (index, album) in albums.items.iter().enumerate() {
            print_album_line(offset + index, album);
        }
    }
}
