// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Video Error: {0}")]
    Video(#[from] VideoError),
    #[error("Gallery Error: the image list is empty")]
    EmptyGallery,
}

/// Specific error types for video playback issues.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, Error)]
pub enum VideoError {
    /// The configured source does not exist.
    #[error("Video file not found: {0}")]
    NotFound(String),

    /// Video codec is not supported by the system's FFmpeg
    #[error("Unsupported video codec: {0}")]
    UnsupportedCodec(String),

    /// File exists but contains no video stream
    #[error("No video stream found")]
    NoVideoStream,

    /// Decoding failed during playback
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// A playback channel was closed because its task has exited.
    #[error("Playback pipeline stopped: {0}")]
    PipelineStopped(&'static str),

    /// Generic error with raw message
    #[error("{0}")]
    Other(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::NotFound(_) => "video-error-not-found",
            VideoError::UnsupportedCodec(_) => "video-error-unsupported-codec",
            VideoError::NoVideoStream => "video-error-no-video-stream",
            VideoError::DecodingFailed(_) => "video-error-decoding-failed",
            VideoError::PipelineStopped(_) | VideoError::Other(_) => "video-error-general",
        }
    }

    /// Categorizes a raw decoder message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("codec") || msg_lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&msg_lower) {
                return VideoError::UnsupportedCodec(codec);
            }
        }

        if msg_lower.contains("no such file") || msg_lower.contains("not found") {
            return VideoError::NotFound(msg.to_string());
        }

        if msg_lower.contains("no video stream") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("seek")
            || msg_lower.contains("decode")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        let codecs = [
            "h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2",
        ];
        codecs
            .iter()
            .find(|codec| msg.contains(*codec))
            .map(|codec| codec.to_uppercase())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn video_error_converts_into_error() {
        let err: Error = VideoError::NoVideoStream.into();
        assert!(matches!(err, Error::Video(VideoError::NoVideoStream)));
        assert_eq!(format!("{}", err), "Video Error: No video stream found");
    }

    #[test]
    fn video_error_from_message_not_found() {
        let err = VideoError::from_message("No such file or directory");
        assert!(matches!(err, VideoError::NotFound(_)));
    }

    #[test]
    fn video_error_from_message_codec() {
        let err = VideoError::from_message("Decoder h264 not found");
        assert!(matches!(err, VideoError::UnsupportedCodec(codec) if codec == "H264"));
    }

    #[test]
    fn video_error_from_message_decoding() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn video_error_i18n_keys() {
        assert_eq!(
            VideoError::NoVideoStream.i18n_key(),
            "video-error-no-video-stream"
        );
        assert_eq!(
            VideoError::NotFound(String::new()).i18n_key(),
            "video-error-not-found"
        );
        assert_eq!(
            VideoError::PipelineStopped("decoder").i18n_key(),
            "video-error-general"
        );
    }
}
