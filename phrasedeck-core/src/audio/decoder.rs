//! Symphonia-backed decoder for mp3, wav, flac and ogg/vorbis files.
//!
//! Every packet of the first decodable track is converted to interleaved f32
//! and averaged down to mono. The native sample rate is kept as-is.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use super::{check_input, mix_to_mono, AudioDecoder, AudioTrack};
use crate::error::{DeckError, Result};

/// Default decoder. Stateless; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<AudioTrack> {
        let extension = check_input(path)?;
        let decode_err = |reason: String| DeckError::Decode {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        hint.with_extension(&extension);

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| decode_err(format!("probe: {e}")))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| DeckError::NoAudioTrack {
                path: path.to_path_buf(),
            })?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| decode_err(format!("codec: {e}")))?;

        let mut samples: Vec<f32> = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;
        let mut decoded_packets = 0usize;
        let mut skipped_packets = 0usize;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(decode_err(format!("read packet: {e}"))),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    // Corrupt frame: skip it and keep going.
                    warn!(path = %path.display(), "skipping undecodable packet: {e}");
                    skipped_packets += 1;
                    continue;
                }
                Err(e) => return Err(decode_err(e.to_string())),
            };

            decoded_packets += 1;
            let spec = *decoded.spec();
            let channels = spec.channels.count();
            sample_rate.get_or_insert(spec.rate);

            let needed = decoded.capacity();
            if sample_buf
                .as_ref()
                .map_or(true, |buf| buf.capacity() < needed * channels)
            {
                sample_buf = Some(SampleBuffer::<f32>::new(needed as u64, spec));
            }
            if let Some(buf) = sample_buf.as_mut() {
                buf.copy_interleaved_ref(decoded);
                mix_to_mono(buf.samples(), channels, &mut samples);
            }
        }

        // Every packet was corrupt: unreadable, not silent.
        if decoded_packets == 0 && skipped_packets > 0 {
            return Err(decode_err(format!(
                "no decodable packets ({skipped_packets} skipped)"
            )));
        }

        let sample_rate =
            sample_rate.ok_or_else(|| decode_err("unknown sample rate".to_string()))?;
        debug!(
            path = %path.display(),
            samples = samples.len(),
            sample_rate,
            "decoded audio"
        );

        AudioTrack::new(samples, sample_rate)
            .ok_or_else(|| decode_err("sample rate is zero".to_string()))
    }
}
