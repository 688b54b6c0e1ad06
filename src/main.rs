use clap::{Parser, Subcommand};
use slaymusic::constants::{APP_NAME, ROOT_PATH};
use slaymusic::models::TrackQuery;
use slaymusic::navigation::NavigationToken;
use slaymusic::services::EnrichedTrack;
use slaymusic::utils::error_handling::create_runtime;
use slaymusic::{ApiError, ClientConfig, MusicClient};
use std::error::Error;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "slaymusic", version, about = "Slay Music command-line client")]
struct Cli {
    /// Backend base URL (overrides SLAY_BACKEND_URL)
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the credential
    Login { username: String, password: String },
    /// Create an account and log in
    Register {
        name: String,
        username: String,
        password: String,
    },
    /// Forget the stored credential
    Logout,
    /// Show the logged-in user id
    Whoami,
    /// Resolve a page path through the session guard
    Navigate { path: String },
    /// List enriched tracks
    Tracks {
        #[command(flatten)]
        filter: TrackFilter,
    },
    /// List tracks in the favorites playlist
    Favorites,
    Like { track_id: u64 },
    Unlike { track_id: u64 },
    IsLiked { track_id: u64 },
    ToggleLike { track_id: u64 },
    /// Play a track until it ends (requires the `audio` feature)
    Play {
        track_id: u64,
        #[command(flatten)]
        filter: TrackFilter,
    },
}

#[derive(clap::Args)]
struct TrackFilter {
    #[arg(long)]
    playlist: Option<u64>,
    #[arg(long)]
    artist: Option<u64>,
    #[arg(long)]
    album: Option<u64>,
    #[arg(long)]
    genre: Option<u64>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    skip: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    /// Mark the listed tracks as liked
    #[arg(long)]
    liked: bool,
}

impl TrackFilter {
    fn query(&self) -> TrackQuery {
        TrackQuery {
            playlist_id: self.playlist,
            artist_id: self.artist,
            album_id: self.album,
            genre_id: self.genre,
            name: self.name.clone(),
            skip: self.skip,
            limit: self.limit,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .filter_module("rustls", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let mut config = ClientConfig::from_env()?;
    if let Some(backend) = cli.backend.as_deref() {
        config.backend_url = slaymusic::config::normalize_base_url(backend)?;
    }
    let client = MusicClient::new(config)?;
    let runtime = create_runtime()?;

    match cli.command {
        Command::Login { username, password } => {
            let response = runtime.block_on(client.session().login(&username, &password))?;
            println!("Logged in, now at {}", current_path(&client, &response.next));
        }
        Command::Register {
            name,
            username,
            password,
        } => {
            let response =
                runtime.block_on(client.session().register(&name, &username, &password))?;
            println!("Registered, now at {}", current_path(&client, &response.next));
        }
        Command::Logout => {
            let navigation = client.session().logout()?;
            println!("Logged out, now at {}", navigation.path);
        }
        Command::Whoami => match client.session().current_user_id() {
            Some(id) => println!("User {}", id),
            None => println!("Not logged in"),
        },
        Command::Navigate { path } => {
            let navigation = client.navigator().navigate(&path)?;
            println!(
                "{} -> {} ({:?}, player {})",
                navigation.requested,
                navigation.path,
                navigation.route.page,
                if navigation.route.shows_player { "shown" } else { "hidden" }
            );
            println!("Title: {}", client.navigator().document_title());
        }
        Command::Tracks { filter } => {
            let (token, _) = open_page(&client, ROOT_PATH)?;
            let tracks = runtime.block_on(client.tracks().fetch_tracks_in(
                &filter.query(),
                filter.liked,
                &token,
            ))?;
            print_tracks(&tracks);
        }
        Command::Favorites => {
            let (token, user_id) = open_page(&client, "/liked")?;
            let tracks = runtime.block_on(async {
                match client.likes().resolve_favorites_playlist(user_id).await? {
                    Some(playlist_id) => {
                        client
                            .tracks()
                            .fetch_tracks_in(&TrackQuery::playlist(playlist_id), true, &token)
                            .await
                    }
                    None => Ok::<_, ApiError>(Vec::new()),
                }
            })?;
            print_tracks(&tracks);
        }
        Command::Like { track_id } => {
            let (_, user_id) = open_page(&client, ROOT_PATH)?;
            let outcome = runtime.block_on(client.likes().like(track_id, user_id))?;
            println!("{:?}", outcome);
        }
        Command::Unlike { track_id } => {
            let (_, user_id) = open_page(&client, ROOT_PATH)?;
            let outcome = runtime.block_on(client.likes().unlike(track_id, user_id))?;
            println!("{:?}", outcome);
        }
        Command::IsLiked { track_id } => {
            let (token, user_id) = open_page(&client, ROOT_PATH)?;
            let liked = runtime.block_on(client.likes().is_liked_in(track_id, user_id, &token))?;
            println!("{}", liked);
        }
        Command::ToggleLike { track_id } => {
            let (_, user_id) = open_page(&client, ROOT_PATH)?;
            let liked = runtime.block_on(client.likes().toggle_like(track_id, user_id))?;
            println!("{}", if liked { "Liked" } else { "Not liked" });
        }
        Command::Play { track_id, filter } => {
            let (token, _) = open_page(&client, ROOT_PATH)?;
            let tracks = runtime.block_on(client.tracks().fetch_tracks_in(
                &filter.query(),
                filter.liked,
                &token,
            ))?;
            let track = tracks
                .into_iter()
                .map(|entry| entry.track)
                .find(|track| track.id == track_id)
                .ok_or_else(|| format!("Track {} not in the selected page", track_id))?;
            play(&client, track)?;
        }
    }

    Ok(())
}

/// Open a protected page; fails when the guard sends us to login
fn open_page(client: &MusicClient, path: &str) -> Result<(NavigationToken, u64), Box<dyn Error>> {
    let navigation = client.navigator().navigate(path)?;
    if navigation.redirected() {
        return Err(format!("Login required (redirected to {})", navigation.path).into());
    }
    let user_id = client
        .session()
        .current_user_id()
        .ok_or("Credential carries no user id")?;
    Ok((client.navigator().token(), user_id))
}

fn current_path(client: &MusicClient, fallback: &str) -> String {
    client
        .navigator()
        .current_path()
        .unwrap_or_else(|| fallback.to_string())
}

fn print_tracks(tracks: &[EnrichedTrack]) {
    for entry in tracks {
        let track = &entry.track;
        let marker = if entry.is_complete() { "" } else { " (partial)" };
        println!(
            "{}\t{}\t{}\t{}{}",
            track.id,
            track.name,
            track.artist_name(),
            if track.is_liked { "♥" } else { "" },
            marker
        );
    }
    println!("{} tracks", tracks.len());
}

#[cfg(feature = "audio")]
fn play(client: &MusicClient, track: slaymusic::models::Track) -> Result<(), Box<dyn Error>> {
    use slaymusic::state::TransportState;
    use slaymusic::utils::media::SinkElement;
    use std::time::Duration;

    let (tx, rx) = std::sync::mpsc::channel();
    let element = SinkElement::new(tx)?;
    let mut session = client.new_playback_session(Box::new(element), rx);

    session.set_track(track);
    println!("Playing {} - {}", session.author(), session.title());

    while session.state() == TransportState::Playing {
        std::thread::sleep(Duration::from_millis(500));
        session.sync();
        log::debug!(
            "[Player] {} / {:.0}s ({:.1}%)",
            session.formatted_time(),
            session.duration(),
            session.progress()
        );
    }

    match session.last_error() {
        Some(error) => Err(error.to_string().into()),
        None => Ok(()),
    }
}

#[cfg(not(feature = "audio"))]
fn play(_client: &MusicClient, track: slaymusic::models::Track) -> Result<(), Box<dyn Error>> {
    Err(format!(
        "Cannot play track {}: built without the `audio` feature",
        track.id
    )
    .into())
}
