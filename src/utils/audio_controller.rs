use crate::utils::error_handling::safe_lock;
use crate::utils::mediaplay::AudioPlayer;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub enum AudioCommand {
    Play {
        url: String,
        duration_hint: Option<Duration>,
    },
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
    Seek(Duration),
}

/// Owns the audio thread. Commands go in over a channel; position, duration
/// and the finished flag come back through shared state polled by the UI.
pub struct AudioController {
    command_tx: Sender<AudioCommand>,
    position: Arc<Mutex<Duration>>,
    duration: Arc<Mutex<Option<Duration>>>,
    is_finished: Arc<Mutex<bool>>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl AudioController {
    pub fn new() -> Self {
        let (command_tx, command_rx): (Sender<AudioCommand>, Receiver<AudioCommand>) = channel();
        let position = Arc::new(Mutex::new(Duration::ZERO));
        let duration = Arc::new(Mutex::new(None));
        let is_finished = Arc::new(Mutex::new(false));
        let last_error = Arc::new(Mutex::new(None));

        let position_clone = position.clone();
        let duration_clone = duration.clone();
        let is_finished_clone = is_finished.clone();
        let last_error_clone = last_error.clone();

        std::thread::spawn(move || {
            let rt = match crate::utils::error_handling::create_runtime() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("[AudioController] Failed to create audio runtime: {}", e);
                    return;
                }
            };
            let mut player: Option<AudioPlayer> = None;

            loop {
                while let Ok(cmd) = command_rx.try_recv() {
                    match cmd {
                        AudioCommand::Play { url, duration_hint } => {
                            log::info!("[AudioController] Received Play command");

                            // Reset finished flag BEFORE loading the new track
                            if let Some(mut lock) =
                                safe_lock(&is_finished_clone, "AudioController")
                            {
                                *lock = false;
                            }
                            if let Some(mut lock) = safe_lock(&last_error_clone, "AudioController")
                            {
                                *lock = None;
                            }

                            // Free the old player first
                            if let Some(mut old_player) = player.take() {
                                log::debug!("[AudioController] Stopping previous player");
                                old_player.stop();
                                drop(old_player);
                            }

                            match rt.block_on(AudioPlayer::new_and_play(&url, duration_hint)) {
                                Ok(p) => {
                                    log::info!("[AudioController] Audio playback started");
                                    if let Some(mut lock) =
                                        safe_lock(&duration_clone, "AudioController")
                                    {
                                        *lock = p.get_duration();
                                    }
                                    player = Some(p);
                                }
                                Err(e) => {
                                    log::error!("[AudioController] Error loading audio: {}", e);
                                    if let Some(mut lock) =
                                        safe_lock(&last_error_clone, "AudioController")
                                    {
                                        *lock = Some(e.to_string());
                                    }
                                    if let Some(mut lock) =
                                        safe_lock(&is_finished_clone, "AudioController")
                                    {
                                        *lock = true;
                                    }
                                }
                            }
                        }
                        AudioCommand::Pause => {
                            log::debug!("[AudioController] Received Pause command");
                            if let Some(p) = player.as_mut() {
                                p.pause();
                            }
                        }
                        AudioCommand::Resume => {
                            log::debug!("[AudioController] Received Resume command");
                            if let Some(p) = player.as_mut() {
                                p.resume();
                            }
                        }
                        AudioCommand::Stop => {
                            log::debug!("[AudioController] Received Stop command");
                            if let Some(mut p) = player.take() {
                                p.stop();
                                drop(p);
                            }
                            if let Some(mut lock) = safe_lock(&position_clone, "AudioController") {
                                *lock = Duration::ZERO;
                            }
                            if let Some(mut lock) = safe_lock(&duration_clone, "AudioController") {
                                *lock = None;
                            }
                            if let Some(mut lock) =
                                safe_lock(&is_finished_clone, "AudioController")
                            {
                                *lock = true;
                            }
                        }
                        AudioCommand::SetVolume(vol) => {
                            if let Some(p) = player.as_mut() {
                                p.set_volume(vol);
                            }
                        }
                        AudioCommand::Seek(pos) => {
                            log::debug!("[AudioController] Received Seek command to {:?}", pos);

                            // Reset finished flag BEFORE seeking so the seek is
                            // not mistaken for the track ending
                            if let Some(mut lock) =
                                safe_lock(&is_finished_clone, "AudioController")
                            {
                                *lock = false;
                            }

                            if let Some(p) = player.as_mut() {
                                if let Err(e) = rt.block_on(p.seek(pos)) {
                                    log::error!("[AudioController] Seek error: {}", e);
                                }
                            }
                        }
                    }
                }

                // Publish position and finished status
                if let Some(p) = player.as_ref() {
                    if let Some(mut lock) = safe_lock(&position_clone, "AudioController") {
                        *lock = p.get_position();
                    }
                    if let Some(mut lock) = safe_lock(&is_finished_clone, "AudioController") {
                        *lock = p.is_finished();
                    }
                }

                std::thread::sleep(Duration::from_millis(50));
            }
        });

        Self {
            command_tx,
            position,
            duration,
            is_finished,
            last_error,
        }
    }

    pub fn play(&self, url: String, duration_hint: Option<Duration>) {
        // Clear the finished flag synchronously: the audio thread may not
        // process the command before the next UI frame checks it, and a
        // leftover true would trigger a spurious auto-advance
        if let Some(mut lock) = safe_lock(&self.is_finished, "AudioController") {
            *lock = false;
        }
        let _ = self
            .command_tx
            .send(AudioCommand::Play { url, duration_hint });
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(AudioCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(AudioCommand::Resume);
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(AudioCommand::Stop);
    }

    pub fn set_volume(&self, volume: f32) {
        let _ = self.command_tx.send(AudioCommand::SetVolume(volume));
    }

    pub fn seek(&self, position: Duration) {
        if let Some(mut lock) = safe_lock(&self.is_finished, "AudioController") {
            *lock = false;
        }
        let _ = self.command_tx.send(AudioCommand::Seek(position));
    }

    pub fn get_position(&self) -> Duration {
        safe_lock(&self.position, "AudioController")
            .map(|lock| *lock)
            .unwrap_or(Duration::ZERO)
    }

    pub fn get_duration(&self) -> Option<Duration> {
        safe_lock(&self.duration, "AudioController").and_then(|lock| *lock)
    }

    pub fn is_finished(&self) -> bool {
        safe_lock(&self.is_finished, "AudioController")
            .map(|lock| *lock)
            .unwrap_or(true)
    }

    /// Last playback failure, if any. Cleared when a new track starts.
    pub fn take_last_error(&self) -> Option<String> {
        safe_lock(&self.last_error, "AudioController").and_then(|mut lock| lock.take())
    }
}

impl Default for AudioController {
    fn default() -> Self {
        Self::new()
    }
}
