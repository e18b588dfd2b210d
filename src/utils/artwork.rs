// Background artwork fetching for the now-playing view
use egui::ColorImage;
use std::sync::mpsc::{channel, Receiver};

/// Fetch and decode artwork on a background thread. The receiver yields at
/// most one image; on failure the sender is dropped and the app keeps its
/// placeholder.
pub fn fetch_artwork(url: String) -> Receiver<ColorImage> {
    let (tx, rx) = channel();

    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[Artwork] Failed to create runtime: {}", e);
                return;
            }
        };

        match rt.block_on(download_and_decode(&url)) {
            Ok(img) => {
                let _ = tx.send(img);
            }
            Err(e) => log::warn!("[Artwork] Failed to load {}: {}", url, e),
        }
    });

    rx
}

async fn download_and_decode(url: &str) -> Result<ColorImage, Box<dyn std::error::Error>> {
    let response = crate::utils::http::client().get(url).send().await?;
    if !response.status().is_success() {
        return Err(format!("artwork fetch returned {}", response.status()).into());
    }
    let bytes = response.bytes().await?;
    load_from_bytes(&bytes)
}

pub fn load_from_bytes(bytes: &[u8]) -> Result<ColorImage, Box<dyn std::error::Error>> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_bytes_decodes_png() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = load_from_bytes(&bytes).unwrap();
        assert_eq!(decoded.size, [4, 4]);
    }

    #[test]
    fn test_load_from_bytes_rejects_garbage() {
        assert!(load_from_bytes(&[0, 1, 2, 3]).is_err());
    }
}
