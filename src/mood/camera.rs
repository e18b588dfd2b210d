use crate::models::Mood;
use image::RgbaImage;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug)]
pub enum CameraError {
    PermissionDenied(String),
    Disconnected(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied(msg) => write!(f, "camera access denied: {}", msg),
            CameraError::Disconnected(msg) => write!(f, "camera disconnected: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}

/// A source of capture frames. Real capture backends implement this; the
/// built-in `StillImageSource` replays a file and tests use synthetic frames.
pub trait FrameSource: Send + 'static {
    fn next_frame(&mut self) -> Result<RgbaImage, CameraError>;
}

/// Frame source that replays a still image, for running the detection path
/// without camera hardware.
pub struct StillImageSource {
    frame: RgbaImage,
}

impl StillImageSource {
    pub fn open(path: &str) -> Result<Self, CameraError> {
        let bytes =
            std::fs::read(path).map_err(|e| CameraError::PermissionDenied(e.to_string()))?;
        let frame = image::load_from_memory(&bytes)
            .map_err(|e| CameraError::Disconnected(e.to_string()))?
            .to_rgba8();
        Ok(Self { frame })
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> Result<RgbaImage, CameraError> {
        Ok(self.frame.clone())
    }
}

/// Exclusive owner of an active capture stream. The app holds at most one
/// feed at a time; stopping or dropping it ends the sampling thread and
/// releases the source on every exit path.
pub struct CameraFeed {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CameraFeed {
    /// Start sampling frames on a fixed interval. Each sampled frame produces
    /// one detection result on the channel; a capture error ends the feed.
    pub fn start(
        mut source: Box<dyn FrameSource>,
        interval: Duration,
    ) -> (Self, Receiver<Option<Mood>>) {
        let (tx, rx) = channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            log::info!("[Camera] Capture feed started");
            while !stop_flag.load(Ordering::Relaxed) {
                match source.next_frame() {
                    Ok(frame) => {
                        if tx.send(super::detector::detect_mood(&frame)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("[Camera] Frame capture failed: {}", e);
                        break;
                    }
                }
                // Sleep in short slices so stop() never waits out a full
                // sampling interval
                let mut waited = Duration::ZERO;
                while waited < interval && !stop_flag.load(Ordering::Relaxed) {
                    let slice = Duration::from_millis(10).min(interval - waited);
                    std::thread::sleep(slice);
                    waited += slice;
                }
            }
            log::info!("[Camera] Capture feed released");
            // source drops here, releasing the capture device
        });

        (
            Self {
                stop,
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    struct SyntheticSource {
        frames_served: u32,
    }

    impl FrameSource for SyntheticSource {
        fn next_frame(&mut self) -> Result<RgbaImage, CameraError> {
            self.frames_served += 1;
            Ok(RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255])))
        }
    }

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn next_frame(&mut self) -> Result<RgbaImage, CameraError> {
            Err(CameraError::Disconnected("unplugged".to_string()))
        }
    }

    #[test]
    fn test_feed_delivers_detection_results() {
        let (mut feed, rx) = CameraFeed::start(
            Box::new(SyntheticSource { frames_served: 0 }),
            Duration::from_millis(1),
        );

        // Black frames contain no face
        let result = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(result, None);

        feed.stop();
    }

    #[test]
    fn test_feed_stops_on_capture_error() {
        let (mut feed, rx) = CameraFeed::start(Box::new(FailingSource), Duration::from_millis(1));

        // Channel closes without delivering a result
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_err());
        feed.stop();
    }

    #[test]
    fn test_stop_returns_promptly_despite_long_interval() {
        let (mut feed, rx) = CameraFeed::start(
            Box::new(SyntheticSource { frames_served: 0 }),
            Duration::from_secs(10),
        );
        // First result arrives before the interval wait begins
        rx.recv_timeout(Duration::from_secs(2)).unwrap();

        let started = std::time::Instant::now();
        feed.stop();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_stop_is_idempotent_and_drop_safe() {
        let (mut feed, _rx) = CameraFeed::start(
            Box::new(SyntheticSource { frames_served: 0 }),
            Duration::from_millis(1),
        );
        feed.stop();
        feed.stop();
        drop(feed);
    }
}
