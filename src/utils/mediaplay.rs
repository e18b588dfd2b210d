use minimp3::{Decoder as Mp3Decoder, Frame};
use rodio::{OutputStream, Sink, Source};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::utils::error_handling::safe_lock;

// Rough MP3 bitrate assumption used to turn a seek position into a byte
// offset for the Range request (128 kbps = 16 KB/s).
const SEEK_BYTES_PER_SECOND: u64 = 16_000;

// In-memory bound for the download buffer and the tail kept for frame
// continuity after a trim.
const STREAM_BUFFER_MAX_BYTES: usize = 5 * 1024 * 1024;
const STREAM_BUFFER_KEEP_BYTES: usize = 2 * 1024 * 1024;

pub struct AudioPlayer {
    sink: Sink,
    _stream: OutputStream,
    stream_handle: rodio::OutputStreamHandle,
    total_duration: Option<Duration>,
    start_time: Instant,
    start_position: Duration,
    paused_at: Option<Duration>,
    current_url: String,
    current_volume: f32,
}

/// Progressive streaming source that decodes MP3 chunks as they arrive.
struct StreamingSource {
    sample_rx: Receiver<Vec<i16>>,
    current_samples: Vec<i16>,
    sample_index: usize,
    sample_rate: u32,
    channels: u16,
    finished: Arc<Mutex<bool>>,
    buffering: bool,
    samples_received: usize,
    last_sample_time: Instant,
}

impl StreamingSource {
    fn new(
        sample_rx: Receiver<Vec<i16>>,
        sample_rate: u32,
        channels: u16,
        finished: Arc<Mutex<bool>>,
    ) -> Self {
        Self {
            sample_rx,
            current_samples: Vec::new(),
            sample_index: 0,
            sample_rate,
            channels,
            finished,
            buffering: true,
            samples_received: 0,
            last_sample_time: Instant::now(),
        }
    }
}

impl Iterator for StreamingSource {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sample_index < self.current_samples.len() {
            let sample = self.current_samples[self.sample_index];
            self.sample_index += 1;
            return Some(sample);
        }

        match self.sample_rx.try_recv() {
            Ok(samples) => {
                self.current_samples = samples;
                self.sample_index = 0;
                self.samples_received += self.current_samples.len();
                self.last_sample_time = Instant::now();

                // Consider ourselves buffered after ~1 second of audio
                if self.buffering && self.samples_received > 44_100 {
                    self.buffering = false;
                }

                if !self.current_samples.is_empty() {
                    let sample = self.current_samples[0];
                    self.sample_index = 1;
                    Some(sample)
                } else {
                    None
                }
            }
            Err(_) => {
                let timeout = self.last_sample_time.elapsed() > Duration::from_secs(5);
                let is_finished = safe_lock(&self.finished, "StreamingSource")
                    .map(|lock| *lock)
                    .unwrap_or(true);

                if is_finished && !self.buffering {
                    None
                } else if timeout {
                    // Stream stuck; force an end rather than infinite silence
                    log::error!("[StreamingSource] Stream timeout detected - ending playback");
                    if let Some(mut lock) = safe_lock(&self.finished, "StreamingSource") {
                        *lock = true;
                    }
                    None
                } else {
                    // Yield silence while waiting for more data
                    Some(0)
                }
            }
        }
    }
}

impl Source for StreamingSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

impl AudioPlayer {
    /// Start progressive streaming playback of a media URL. The catalog's
    /// duration is passed as a hint since the stream itself reports none.
    pub async fn new_and_play(
        url: &str,
        duration_hint: Option<Duration>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        log::info!("[AudioPlayer] Starting progressive streaming: {}", url);
        let (_stream, stream_handle) = OutputStream::try_default()?;

        let (sample_tx, sample_rx): (Sender<Vec<i16>>, Receiver<Vec<i16>>) = channel();
        let finished = Arc::new(Mutex::new(false));
        let finished_clone = Arc::clone(&finished);

        let url_owned = url.to_string();
        std::thread::spawn(move || {
            let rt = match crate::utils::error_handling::create_runtime() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("[AudioPlayer] Failed to create streaming runtime: {}", e);
                    *finished_clone.lock().unwrap_or_else(|p| p.into_inner()) = true;
                    return;
                }
            };
            let finished_for_stream = Arc::clone(&finished_clone);
            rt.block_on(async {
                if let Err(e) = stream_audio(&url_owned, 0, sample_tx, finished_for_stream).await {
                    log::error!("[AudioPlayer] Streaming error: {}", e);
                }
            });
            *finished_clone.lock().unwrap_or_else(|p| p.into_inner()) = true;
        });

        // MP3 streams from the catalog are 44.1 kHz stereo; the decoder
        // confirms this per frame but rodio needs the numbers up front
        let sample_rate = 44_100;
        let channels = 2;

        let source = StreamingSource::new(sample_rx, sample_rate, channels, finished);
        let sink = Sink::try_new(&stream_handle)?;
        sink.append(source);
        log::info!("[AudioPlayer] Progressive streaming started");

        Ok(Self {
            sink,
            _stream,
            stream_handle: stream_handle.clone(),
            total_duration: duration_hint,
            start_time: Instant::now(),
            start_position: Duration::ZERO,
            paused_at: None,
            current_url: url.to_string(),
            current_volume: 1.0,
        })
    }

    pub fn pause(&mut self) {
        if !self.sink.is_paused() {
            self.paused_at = Some(self.get_position());
            self.sink.pause();
            log::debug!("[AudioPlayer] Paused at {:?}", self.paused_at);
        }
    }

    pub fn resume(&mut self) {
        if self.sink.is_paused() {
            if let Some(paused) = self.paused_at {
                self.start_position = paused;
                self.start_time = Instant::now();
                log::debug!("[AudioPlayer] Resuming from {:?}", paused);
            }
            self.sink.play();
            self.paused_at = None;
        }
    }

    pub fn stop(&mut self) {
        log::debug!("[AudioPlayer] Stopping playback");
        self.sink.stop();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.current_volume = volume;
        self.sink.set_volume(volume);
    }

    pub fn is_finished(&self) -> bool {
        self.sink.empty() && self.paused_at.is_none()
    }

    pub fn get_duration(&self) -> Option<Duration> {
        self.total_duration
    }

    pub fn get_position(&self) -> Duration {
        if let Some(paused) = self.paused_at {
            paused
        } else {
            let elapsed = self.start_time.elapsed();
            let mut position = self.start_position.saturating_add(elapsed);
            if let Some(total) = self.total_duration {
                position = position.min(total);
            }
            position
        }
    }

    /// Seek by restarting the stream with a Range request at an estimated
    /// byte offset.
    pub async fn seek(&mut self, position: Duration) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("[AudioPlayer] Seeking to {:?} by restarting stream", position);

        self.sink.stop();

        let byte_offset = position.as_secs() * SEEK_BYTES_PER_SECOND;
        let url = self.current_url.clone();

        let (sample_tx, sample_rx): (Sender<Vec<i16>>, Receiver<Vec<i16>>) = channel();
        let finished = Arc::new(Mutex::new(false));
        let finished_clone = Arc::clone(&finished);

        std::thread::spawn(move || {
            let rt = match crate::utils::error_handling::create_runtime() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("[AudioPlayer] Failed to create seek runtime: {}", e);
                    *finished_clone.lock().unwrap_or_else(|p| p.into_inner()) = true;
                    return;
                }
            };
            let finished_for_stream = Arc::clone(&finished_clone);
            rt.block_on(async {
                if let Err(e) =
                    stream_audio(&url, byte_offset, sample_tx, finished_for_stream).await
                {
                    log::error!("[AudioPlayer] Seek streaming error: {}", e);
                }
            });
            *finished_clone.lock().unwrap_or_else(|p| p.into_inner()) = true;
        });

        let source = StreamingSource::new(sample_rx, 44_100, 2, finished);
        let new_sink = Sink::try_new(&self.stream_handle)?;
        new_sink.append(source);
        new_sink.set_volume(self.current_volume);

        self.sink = new_sink;
        self.start_position = position;
        self.start_time = Instant::now();
        self.paused_at = None;

        log::info!("[AudioPlayer] Seek completed, streaming from {:?}", position);
        Ok(())
    }
}

/// Stream audio bytes progressively and decode with minimp3, sending decoded
/// sample chunks to the playback source as they become available.
async fn stream_audio(
    url: &str,
    byte_offset: u64,
    sample_tx: Sender<Vec<i16>>,
    finished: Arc<Mutex<bool>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = crate::utils::http::stream_client();
    let mut request = client.get(url);
    if byte_offset > 0 {
        log::info!("[Streaming] Requesting byte range from offset {}", byte_offset);
        request = request.header("Range", format!("bytes={}-", byte_offset));
    }
    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(format!("media fetch returned {}", response.status()).into());
    }

    let expected_size = response
        .headers()
        .get("content-length")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok());

    if let Some(size) = expected_size {
        log::info!("[Streaming] Expected stream size: {} KB", size / 1024);
    }

    let mut mp3_buffer = Vec::new();
    let mut total_downloaded = 0usize;
    let mut total_frames_sent = 0usize;

    use futures_util::StreamExt;

    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        mp3_buffer.extend_from_slice(&chunk);
        total_downloaded += chunk.len();

        // Decode all complete frames but only send the ones not yet sent
        let mut decoder = Mp3Decoder::new(&mp3_buffer[..]);
        let mut frame_index = 0;

        loop {
            match decoder.next_frame() {
                Ok(Frame { data, .. }) => {
                    if frame_index >= total_frames_sent {
                        if sample_tx.send(data).is_err() {
                            log::debug!(
                                "[Streaming] Playback stopped, downloaded {} KB total",
                                total_downloaded / 1024
                            );
                            *finished.lock().unwrap_or_else(|p| p.into_inner()) = true;
                            return Ok(());
                        }
                        total_frames_sent += 1;
                    }
                    frame_index += 1;
                }
                Err(_) => break,
            }
        }

        total_frames_sent = trim_stream_buffer(&mut mp3_buffer, total_frames_sent);
    }

    // Decode any remaining frames we haven't sent
    let mut decoder = Mp3Decoder::new(&mp3_buffer[..]);
    let mut frame_index = 0;
    while let Ok(Frame { data, .. }) = decoder.next_frame() {
        if frame_index >= total_frames_sent {
            let _ = sample_tx.send(data);
        }
        frame_index += 1;
    }

    log::info!(
        "[Streaming] Stream complete, {} KB downloaded",
        total_downloaded / 1024
    );
    *finished.lock().unwrap_or_else(|p| p.into_inner()) = true;
    Ok(())
}

/// Bound the download buffer, keeping a tail for frame continuity. Returns
/// the sent-frame counter shifted down by the frames dropped with the prefix,
/// so frames decoded again from the tail are not re-sent. The frame straddling
/// the cut is lost to decoder resync; it was already sent long before the
/// buffer grew this large.
fn trim_stream_buffer(mp3_buffer: &mut Vec<u8>, total_frames_sent: usize) -> usize {
    if mp3_buffer.len() <= STREAM_BUFFER_MAX_BYTES {
        return total_frames_sent;
    }

    let trim_amount = mp3_buffer.len() - STREAM_BUFFER_KEEP_BYTES;
    let mut prefix = Mp3Decoder::new(&mp3_buffer[..trim_amount]);
    let mut trimmed_frames = 0usize;
    while prefix.next_frame().is_ok() {
        trimmed_frames += 1;
    }

    mp3_buffer.drain(0..trim_amount);
    log::debug!(
        "[Streaming] Trimmed buffer to {} KB ({} frames dropped)",
        mp3_buffer.len() / 1024,
        trimmed_frames
    );
    total_frames_sent.saturating_sub(trimmed_frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_is_noop_below_limit() {
        let mut buffer = vec![0u8; 1024];
        let sent = trim_stream_buffer(&mut buffer, 7);
        assert_eq!(buffer.len(), 1024);
        assert_eq!(sent, 7);
    }

    #[test]
    fn test_trim_preserves_sent_frame_count() {
        // Undecodable filler: no frames live in the dropped prefix, so the
        // counter must survive the trim unchanged instead of resetting and
        // replaying the retained tail
        let mut buffer = vec![0u8; STREAM_BUFFER_MAX_BYTES + 1024];
        let sent = trim_stream_buffer(&mut buffer, 4_000);
        assert_eq!(buffer.len(), STREAM_BUFFER_KEEP_BYTES);
        assert_eq!(sent, 4_000);
    }
}
