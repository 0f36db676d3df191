use super::output::{
    format_duration, print_album_line, print_artist_line, print_page_footer, print_track_line,
};
use spotify_app_client::{AppClient, FetchError};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Add a login hint to failures that need a fresh session.
pub fn explain(app: &AppClient, error: FetchError) -> Box<dyn std::error::Error> {
    if error.requires_login() {
        format!("{error} Start at {}", app.login_url()).into()
    } else {
        error.into()
    }
}

pub async fn handle_profile(app: &AppClient) -> CommandResult {
    let profile = app
        .profile()
        .fetch_profile()
        .await
        .map_err(|e| explain(app, e))?;

    println!("👤 {}", profile.display_name.as_deref().unwrap_or(&profile.id));
    if let Some(email) = &profile.email {
        println!("   Email:   {email}");
    }
    if let Some(country) = &profile.country {
        println!("   Country: {country}");
    }
    if let Some(product) = &profile.product {
        println!("   Plan:    {product}");
    }
    if let Some(followers) = &profile.followers {
        println!("   Followers: {}", followers.total);
    }
    Ok(())
}

pub async fn handle_top_artists(app: &AppClient, limit: Option<u32>) -> CommandResult {
    let page = app
        .profile()
        .fetch_top_artists(limit)
        .await
        .map_err(|e| explain(app, e))?;

    println!("🎤 Top artists");
    for (index, artist) in page.items.iter().enumerate() {
        print_artist_line(index, artist);
    }
    print_page_footer(&page);
    Ok(())
}

pub async fn handle_top_tracks(app: &AppClient, limit: Option<u32>) -> CommandResult {
    let page = app
        .profile()
        .fetch_top_tracks(limit)
        .await
        .map_err(|e| explain(app, e))?;

    println!("🎵 Top tracks");
    for (index, track) in page.items.iter().enumerate() {
        print_track_line(index, track);
    }
    print_page_footer(&page);
    Ok(())
}

pub async fn handle_artist(app: &AppClient, artist_id: &str) -> CommandResult {
    let context = app.artist();
    context
        .fetch_all(artist_id)
        .await
        .map_err(|e| explain(app, e))?;

    if let Some(artist) = context.artist().payload() {
        println!("🎤 {artist}");
        if !artist.genres.is_empty() {
            println!("   Genres: {}", artist.genres.join(", "));
        }
    }
    if let Some(top_tracks) = context.top_tracks().payload() {
        println!("\n🎵 Top tracks");
        for (index, track) in top_tracks.tracks.iter().enumerate() {
            print_track_line(index, track);
        }
    }
    if let Some(albums) = context.albums().payload() {
        println!("\n💿 Albums");
        for (index, album) in albums.items.iter().enumerate() {
            print_album_line(index, album);
        }
        print_page_footer(&albums);
    }
    Ok(())
}

pub async fn handle_album(app: &AppClient, album_id: &str) -> CommandResult {
    let album = app
        .album()
        .fetch_album(album_id)
        .await
        .map_err(|e| explain(app, e))?;

    println!("💿 {album}");
    if let Some(date) = &album.release_date {
        println!("   Released: {date}");
    }
    if let Some(label) = &album.label {
        println!("   Label:    {label}");
    }

    let tracks = match album.tracks {
        Some(tracks) => tracks,
        None => app
            .album()
            .fetch_album_tracks(album_id)
            .await
            .map_err(|e| explain(app, e))?,
    };
    for (index, track) in tracks.items.iter().enumerate() {
        print_track_line(index, track);
    }
    print_page_footer(&tracks);
    Ok(())
}

pub async fn handle_track(app: &AppClient, track_id: &str) -> CommandResult {
    let track = app
        .track()
        .fetch_track(track_id)
        .await
        .map_err(|e| explain(app, e))?;

    println!("🎵 {track}");
    println!("   Duration: {}", format_duration(track.duration_ms));
    if let Some(popularity) = track.popularity {
        println!("   Popularity: {popularity}");
    }
    if let Some(url) = &track.external_urls.spotify {
        println!("   Open: {url}");
    }
    Ok(())
}
