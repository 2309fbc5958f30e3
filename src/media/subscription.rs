// SPDX-License-Identifier: MPL-2.0
//! Iced subscription driving showreel playback.
//!
//! The subscription opens the audio device, spawns the decoder and then
//! relays in both directions: [`PlayerCommand`]s from the UI go to the
//! decoder and the audio output, decoder events come back as
//! [`PlaybackMessage`]s.

use super::audio_output::AudioOutput;
use super::decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent, StreamMetadata};
use super::Volume;
use crate::error::{Error, VideoError};
use iced::futures::SinkExt;
use iced::stream;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Subscription identity; a new session id restarts the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoPlaybackId(pub u64);

/// Commands the media element sends to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Seek(f64),
    SetVolume(Volume),
    SetMuted(bool),
}

/// Cloneable handle for sending [`PlayerCommand`]s.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl CommandSender {
    /// # Errors
    ///
    /// Returns an error if the playback subscription has stopped.
    pub fn send(&self, command: PlayerCommand) -> crate::error::Result<()> {
        self.tx
            .send(command)
            .map_err(|_| Error::Video(VideoError::PipelineStopped("playback subscription")))
    }
}

impl std::fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Pipeline is up; carries the command handle.
    Started(CommandSender),
    Metadata(StreamMetadata),
    FrameReady(DecodedFrame),
    EndOfStream,
    Error(VideoError),
}

enum State {
    Idle,
    Decoding {
        decoder: AsyncDecoder,
        audio_output: Option<AudioOutput>,
        command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    },
}

/// Creates the playback subscription for `video_path`.
///
/// `volume` and `muted` seed the audio output so the first samples already
/// play at the element's level.
pub fn video_playback(
    video_path: PathBuf,
    session_id: u64,
    volume: Volume,
    muted: bool,
) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with_id(
        VideoPlaybackId(session_id),
        stream::channel(100, move |mut output| async move {
            let mut state = State::Idle;

            loop {
                match &mut state {
                    State::Idle => {
                        let audio_output = match AudioOutput::new(volume, muted) {
                            Ok(audio) => Some(audio),
                            Err(e) => {
                                tracing::warn!(error = %e, "audio unavailable, showreel plays silently");
                                None
                            }
                        };

                        let decoder = match AsyncDecoder::new(
                            &video_path,
                            audio_output.as_ref().map(AudioOutput::config),
                        ) {
                            Ok(decoder) => decoder,
                            Err(e) => {
                                let error = match e {
                                    Error::Video(video_error) => video_error,
                                    other => VideoError::from_message(&other.to_string()),
                                };
                                let _ = output.send(PlaybackMessage::Error(error)).await;
                                break;
                            }
                        };

                        let (command_tx, command_rx) = mpsc::unbounded_channel();
                        let _ = output
                            .send(PlaybackMessage::Started(CommandSender { tx: command_tx }))
                            .await;

                        state = State::Decoding {
                            decoder,
                            audio_output,
                            command_rx,
                        };
                    }

                    State::Decoding {
                        decoder,
                        audio_output,
                        command_rx,
                    } => {
                        tokio::select! {
                            command = command_rx.recv() => {
                                let Some(command) = command else {
                                    let _ = decoder.send_command(DecoderCommand::Stop);
                                    break;
                                };
                                if let Some(audio) = audio_output.as_ref() {
                                    apply_to_audio(audio, &command);
                                }
                                if let Some(decoder_command) = to_decoder_command(&command) {
                                    if let Err(e) = decoder.send_command(decoder_command) {
                                        tracing::error!(error = %e, "decoder command dropped");
                                    }
                                }
                            }

                            event = decoder.recv_event() => {
                                let message = match event {
                                    Some(DecoderEvent::Metadata(metadata)) => {
                                        PlaybackMessage::Metadata(metadata)
                                    }
                                    Some(DecoderEvent::FrameReady(frame)) => {
                                        PlaybackMessage::FrameReady(frame)
                                    }
                                    Some(DecoderEvent::AudioReady(samples)) => {
                                        if let Some(audio) = audio_output.as_ref() {
                                            let _ = audio.play(samples);
                                        }
                                        continue;
                                    }
                                    Some(DecoderEvent::EndOfStream) => {
                                        if let Some(audio) = audio_output.as_ref() {
                                            let _ = audio.pause();
                                        }
                                        PlaybackMessage::EndOfStream
                                    }
                                    Some(DecoderEvent::Error(error)) => {
                                        tracing::error!(%error, "showreel playback error");
                                        PlaybackMessage::Error(error)
                                    }
                                    None => break,
                                };
                                let _ = output.send(message).await;
                            }
                        }
                    }
                }
            }

            // Keep the subscription alive so iced does not restart it.
            std::future::pending::<()>().await;
        }),
    )
}

fn apply_to_audio(audio: &AudioOutput, command: &PlayerCommand) {
    let result = match command {
        PlayerCommand::Play => audio.resume(),
        PlayerCommand::Pause => audio.pause(),
        PlayerCommand::Seek(_) => audio.clear_buffer(),
        PlayerCommand::SetVolume(volume) => audio.set_volume(*volume),
        PlayerCommand::SetMuted(muted) => audio.set_muted(*muted),
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, "audio command dropped");
    }
}

/// Maps a player command to the decoder, `None` for audio-only commands.
fn to_decoder_command(command: &PlayerCommand) -> Option<DecoderCommand> {
    match command {
        PlayerCommand::Play => Some(DecoderCommand::Play),
        PlayerCommand::Pause => Some(DecoderCommand::Pause),
        PlayerCommand::Seek(target_secs) => Some(DecoderCommand::Seek {
            target_secs: *target_secs,
        }),
        PlayerCommand::SetVolume(_) | PlayerCommand::SetMuted(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_and_mute_stay_out_of_the_decoder() {
        assert!(to_decoder_command(&PlayerCommand::SetVolume(Volume::new(0.3))).is_none());
        assert!(to_decoder_command(&PlayerCommand::SetMuted(true)).is_none());
    }

    #[test]
    fn seek_is_forwarded_with_target() {
        match to_decoder_command(&PlayerCommand::Seek(12.5)) {
            Some(DecoderCommand::Seek { target_secs }) => assert_eq!(target_secs, 12.5),
            other => panic!("expected seek, got {other:?}"),
        }
    }

    #[test]
    fn command_sender_reports_closed_pipeline() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender { tx };
        assert!(sender.send(PlayerCommand::Play).is_ok());
        drop(rx);
        assert!(matches!(
            sender.send(PlayerCommand::Pause),
            Err(Error::Video(VideoError::PipelineStopped(_)))
        ));
    }

    #[test]
    fn subscription_id_is_consistent() {
        assert_eq!(VideoPlaybackId(42), VideoPlaybackId(42));
        assert_ne!(VideoPlaybackId(42), VideoPlaybackId(43));
    }
}
