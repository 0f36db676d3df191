use tokio::sync::watch;

/// What the embedded playback widget should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub current_track_id: Option<String>,
    pub visible: bool,
}

/// Holds the track selected for playback. Nothing here touches the network.
#[derive(Debug)]
pub struct PlayerContext {
    state: watch::Sender<PlayerState>,
}

impl PlayerContext {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PlayerState::default());
        Self { state }
    }

    /// Select a track and show the player.
    pub fn play_track(&self, track_id: &str) {
        let track_id = track_id.to_string();
        self.state.send_modify(|state| {
            state.current_track_id = Some(track_id);
            state.visible = true;
        });
    }

    /// Hide the player and forget the selected track.
    pub fn hide(&self) {
        self.state.send_replace(PlayerState::default());
    }

    pub fn state(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state.subscribe()
    }
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self::new()
    }
}
