//! Provider-independent episode mapping helpers

use serde::Deserialize;

use crate::models::{Enclosure, Format, Quality};

/// Average bytes per second of the media the download endpoint serves
fn byte_rate(format: Format, quality: Quality) -> u64 {
    match (format, quality) {
        (Format::Video, Quality::High) => 350_000,
        (Format::Video, Quality::Low) => 100_000,
        (Format::Audio, Quality::High) => 16_000,
        (Format::Audio, Quality::Low) => 6_000,
    }
}

/// Estimate an asset size from its duration
///
/// `None` when there is nothing to go on or the duration is too large to be real.
pub fn estimate_size(duration_secs: u64, format: Format, quality: Quality) -> Option<u64> {
    if duration_secs == 0 {
        return None;
    }
    duration_secs.checked_mul(byte_rate(format, quality))
}

/// Enclosure pointing at this host's download endpoint
pub fn enclosure(
    download_base: &str,
    hash_id: &str,
    video_id: &str,
    format: Format,
    length: u64,
) -> Enclosure {
    Enclosure {
        url: format!(
            "{}/download/{}/{}.{}",
            download_base.trim_end_matches('/'),
            hash_id,
            video_id,
            format.extension()
        ),
        length,
        mime_type: format.mime_type().to_string(),
    }
}

/// One rendition of a provider thumbnail
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Picture {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, alias = "link")]
    pub url: String,
}

/// Picture matching the feed quality: largest for High, smallest for Low
pub fn select_picture(pictures: &[Picture], quality: Quality) -> Option<&str> {
    let candidates = pictures.iter().filter(|p| !p.url.is_empty());
    let picture = match quality {
        Quality::High => candidates.max_by_key(|p| p.width),
        Quality::Low => candidates.min_by_key(|p| p.width),
    };
    picture.map(|p| p.url.as_str())
}

/// Largest available picture, used for directory artwork
pub fn largest_picture(pictures: &[Picture]) -> Option<&str> {
    select_picture(pictures, Quality::High)
}

/// Treat blank strings as missing
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pictures() -> Vec<Picture> {
        vec![
            Picture {
                width: 640,
                height: 360,
                url: "https://i.test/640.jpg".to_string(),
            },
            Picture {
                width: 100,
                height: 75,
                url: "https://i.test/100.jpg".to_string(),
            },
            Picture {
                width: 1920,
                height: 1080,
                url: "https://i.test/1920.jpg".to_string(),
            },
        ]
    }

    #[test]
    fn test_select_picture_by_quality() {
        let pictures = pictures();
        assert_eq!(
            select_picture(&pictures, Quality::High),
            Some("https://i.test/1920.jpg")
        );
        assert_eq!(
            select_picture(&pictures, Quality::Low),
            Some("https://i.test/100.jpg")
        );
        assert_eq!(largest_picture(&[]), None);
    }

    #[rstest]
    #[case(0, Format::Video, Quality::High, None)]
    #[case(10, Format::Audio, Quality::Low, Some(60_000))]
    #[case(60, Format::Video, Quality::High, Some(21_000_000))]
    #[case(60, Format::Video, Quality::Low, Some(6_000_000))]
    #[case(u64::MAX / 1000, Format::Video, Quality::High, None)]
    #[case(u64::MAX, Format::Audio, Quality::Low, None)]
    fn test_estimate_size(
        #[case] duration_secs: u64,
        #[case] format: Format,
        #[case] quality: Quality,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(estimate_size(duration_secs, format, quality), expected);
    }

    #[test]
    fn test_enclosure_url() {
        let enclosure = enclosure("http://localhost:8080/", "abc", "42", Format::Audio, 10);
        assert_eq!(enclosure.url, "http://localhost:8080/download/abc/42.m4a");
        assert_eq!(enclosure.mime_type, "audio/mp4");
        assert_eq!(enclosure.length, 10);
    }
}
