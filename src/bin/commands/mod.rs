pub mod catalog;
pub mod output;
pub mod search;
pub mod session;

use clap::Subcommand;
use spotify_app_client::{AppClient, SearchType};

#[derive(Subcommand)]
pub enum Commands {
    /// Print the URL that starts the login redirect
    LoginUrl,

    /// Finish logging in from the callback URL
    ///
    /// Usage examples:
    /// spotify-app login "http://localhost:5173/auth/callback?user_id=abc123"
    /// spotify-app login "user_id=abc123"
    Login {
        /// Callback URL or query string carrying `user_id`
        callback: String,
    },

    /// End the session locally and on the backend
    Logout,

    /// Show whether a session is active
    Status,

    /// Show your profile
    Profile,

    /// List your most played artists
    TopArtists {
        #[arg(long)]
        limit: Option<u32>,
    },

    /// List your most played tracks
    TopTracks {
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show an artist with albums and top tracks
    Artist { id: String },

    /// Show an album and its tracks
    Album { id: String },

    /// Show a single track
    Track { id: String },

    /// Search the catalog
    ///
    /// Usage examples:
    /// spotify-app search "daft punk"
    /// spotify-app search "discovery" --type album --limit 5
    /// spotify-app search "one more time" --pages 3
    Search {
        query: String,

        /// Result sections to include; repeat for several (default: all)
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<SearchType>,

        #[arg(long)]
        limit: Option<u32>,

        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },
}

pub async fn execute_command(
    command: Commands,
    app: &AppClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::LoginUrl => {
            println!("{}", app.login_url());
            Ok(())
        }
        Commands::Login { callback } => session::handle_login(app, &callback),
        Commands::Logout => {
            session::handle_logout(app).await;
            Ok(())
        }
        Commands::Status => {
            session::handle_status(app);
            Ok(())
        }
        Commands::Profile => catalog::handle_profile(app).await,
        Commands::TopArtists { limit } => catalog::handle_top_artists(app, limit).await,
        Commands::TopTracks { limit } => catalog::handle_top_tracks(app, limit).await,
        Commands::Artist { id } => catalog::handle_artist(app, &id).await,
        Commands::Album { id } => catalog::handle_album(app, &id).await,
        Commands::Track { id } => catalog::handle_track(app, &id).await,
        Commands::Search {
            query,
            types,
            limit,
            pages,
        } => search::handle_search(app, &query, &types, limit, pages).await,
    }
}
