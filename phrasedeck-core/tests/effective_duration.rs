//! End-to-end: synthesized WAV files through `SymphoniaDecoder` and the
//! default estimator.

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use phrasedeck_core::{
    AudioDecoder, DurationProbe, DurationResult, EffectiveDurationEstimator, EstimatorConfig,
    SymphoniaDecoder,
};

/// Write a 16-bit WAV whose samples are a 440 Hz tone inside `audible`
/// (seconds) and digital silence elsewhere. Every channel carries the same
/// signal.
fn write_tone_wav(
    path: &Path,
    sample_rate: u32,
    channels: u16,
    total_secs: f64,
    audible: &[(f64, f64)],
) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = (total_secs * sample_rate as f64).round() as usize;
    for i in 0..frames {
        let t = i as f64 / sample_rate as f64;
        let loud = audible.iter().any(|&(a, b)| t >= a && t < b);
        let value = if loud {
            (0.5 * (TAU * 440.0 * t as f32).sin() * i16::MAX as f32) as i16
        } else {
            0
        };
        for _ in 0..channels {
            writer.write_sample(value).unwrap();
        }
    }
    writer.finalize().unwrap();
}

/// Frames that tile the track exactly, so edges land on block boundaries.
fn block_config(block: usize) -> EstimatorConfig {
    EstimatorConfig {
        frame_length: block,
        hop_length: block,
        ..Default::default()
    }
}

fn scratch(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

#[test]
fn ten_second_clip_with_trimmed_edges() {
    let (_dir, path) = scratch("phrase.wav");
    write_tone_wav(&path, 8_000, 1, 10.0, &[(1.5, 9.0)]);

    let probe = DurationProbe::new(&block_config(400)).unwrap();
    assert_eq!(probe.probe(&path), DurationResult::Seconds(7.5));
}

#[test]
fn default_framing_is_close_to_exact_edges() {
    let (_dir, path) = scratch("phrase.wav");
    write_tone_wav(&path, 44_100, 1, 10.0, &[(1.5, 9.0)]);

    let probe = DurationProbe::new(&EstimatorConfig::default()).unwrap();
    let secs = probe.probe(&path).seconds().unwrap();
    assert_abs_diff_eq!(secs, 7.5, epsilon = 0.1);
}

#[test]
fn interior_pause_is_not_trimmed() {
    let (_dir, path) = scratch("two_words.wav");
    write_tone_wav(&path, 8_000, 1, 4.0, &[(0.5, 1.5), (2.5, 3.5)]);

    let probe = DurationProbe::new(&block_config(400)).unwrap();
    assert_eq!(probe.probe(&path), DurationResult::Seconds(3.0));
}

#[test]
fn stereo_clip_is_measured_like_mono() {
    let (_dir, mono) = scratch("mono.wav");
    let stereo = mono.with_file_name("stereo.wav");
    write_tone_wav(&mono, 16_000, 1, 3.0, &[(0.25, 2.5)]);
    write_tone_wav(&stereo, 16_000, 2, 3.0, &[(0.25, 2.5)]);

    let probe = DurationProbe::new(&block_config(400)).unwrap();
    assert_eq!(probe.probe(&mono), DurationResult::Seconds(2.25));
    assert_eq!(probe.probe(&stereo), probe.probe(&mono));
}

#[test]
fn fully_audible_clip_keeps_total_duration() {
    let (_dir, path) = scratch("full.wav");
    write_tone_wav(&path, 8_000, 1, 2.0, &[(0.0, 2.0)]);

    let track = SymphoniaDecoder::new().decode(&path).unwrap();
    let est = EffectiveDurationEstimator::default();
    assert_eq!(
        est.estimate(&track),
        DurationResult::Seconds(track.duration_secs())
    );
}

#[test]
fn silent_clip_is_zero() {
    let (_dir, path) = scratch("silence.wav");
    write_tone_wav(&path, 8_000, 1, 1.0, &[]);

    let probe = DurationProbe::new(&EstimatorConfig::default()).unwrap();
    assert_eq!(probe.probe(&path), DurationResult::Seconds(0.0));
}

#[test]
fn uppercase_extension_is_accepted() {
    let (_dir, path) = scratch("LOUD.WAV");
    write_tone_wav(&path, 8_000, 1, 1.0, &[(0.0, 1.0)]);

    let probe = DurationProbe::new(&EstimatorConfig::default()).unwrap();
    assert!(probe.probe(&path).is_available());
}

#[test]
fn estimate_stays_within_bounds() {
    let layouts: [&[(f64, f64)]; 5] = [
        &[],
        &[(0.0, 0.01)],
        &[(0.99, 1.0)],
        &[(0.1, 0.2), (0.5, 0.6), (0.8, 0.95)],
        &[(0.0, 1.0)],
    ];
    let probe = DurationProbe::new(&EstimatorConfig::default()).unwrap();
    for (i, layout) in layouts.iter().enumerate() {
        let (_dir, path) = scratch(&format!("layout_{i}.wav"));
        write_tone_wav(&path, 8_000, 1, 1.0, layout);

        let secs = probe.probe(&path).seconds().unwrap();
        assert!((0.0..=1.0).contains(&secs), "layout {i}: {secs}");
    }
}
