use spotify_app_client::{Album, Artist, Paged, Track};

pub fn format_duration(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn print_track_line(index: usize, track: &Track) {
    println!(
        "  {:>3}. {track} ({})",
        index + 1,
        format_duration(track.duration_ms)
    );
}

pub fn print_artist_line(index: usize, artist: &Artist) {
    match artist.followers.as_ref().map(|f| f.total) {
        Some(total) => println!("  {:>3}. {artist} ({total} followers)", index + 1),
        None => println!("  {:>3}. {artist}", index + 1),
    }
}

pub fn print_album_line(index: usize, album: &Album) {
    match &album.release_date {
        Some(date) => println!("  {:>3}. {album} ({date})", index + 1),
        None => println!("  {:>3}. {album}", index + 1),
    }
}

/// Print a page footer when more results are available.
pub fn print_page_footer<T>(page: &Paged<T>) {
    if let Some(total) = page.total {
        let shown = page.offset.unwrap_or(0) as usize + page.items.len();
        if page.has_next_page() {
            println!("  … showing {shown} of {total}");
        }
    }
}
