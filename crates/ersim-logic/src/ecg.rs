//! Fake ECG trace for the monitor display.
//!
//! Not signal processing: a fixed loop that lays down a small P wave, a
//! sharp QRS spike with linear decay and a rounded T wave once per beat.

use std::f32::consts::PI;

use crate::constants::{bounds, ecg as limits};

/// Fraction of the beat occupied by each feature.
const P_WAVE: (f32, f32) = (0.05, 0.15);
const QRS: (f32, f32) = (0.20, 0.26);
const T_WAVE: (f32, f32) = (0.40, 0.60);

const P_AMPLITUDE: f32 = 0.12;
const R_PEAK: f32 = 1.0;
const S_TROUGH: f32 = -0.25;
const T_AMPLITUDE: f32 = 0.3;

fn bump(phase: f32, window: (f32, f32), amplitude: f32) -> f32 {
    if phase < window.0 || phase >= window.1 {
        return 0.0;
    }
    amplitude * ((phase - window.0) / (window.1 - window.0) * PI).sin()
}

fn qrs(phase: f32) -> f32 {
    if phase < QRS.0 || phase >= QRS.1 {
        return 0.0;
    }
    let t = (phase - QRS.0) / (QRS.1 - QRS.0);
    if t < 0.25 {
        // upstroke to the R peak
        R_PEAK * t / 0.25
    } else if t < 0.6 {
        // decay through baseline into the S trough
        let k = (t - 0.25) / 0.35;
        R_PEAK + (S_TROUGH - R_PEAK) * k
    } else {
        let k = (t - 0.6) / 0.4;
        S_TROUGH * (1.0 - k)
    }
}

/// Amplitude at a point in the beat cycle, `phase` in `[0, 1)`.
pub fn beat_amplitude(phase: f32) -> f32 {
    bump(phase, P_WAVE, P_AMPLITUDE) + qrs(phase) + bump(phase, T_WAVE, T_AMPLITUDE)
}

/// Generate `duration_secs` of trace at `sample_rate` Hz for `heart_rate` bpm.
///
/// Non-finite durations give an empty trace; long ones are cut at
/// [`limits::MAX_SAMPLES`].
pub fn waveform(heart_rate: i32, duration_secs: f32, sample_rate: u32) -> Vec<f32> {
    let bpm = heart_rate.clamp(bounds::HEART_RATE_MIN, bounds::HEART_RATE_MAX) as f32;
    let period = 60.0 / bpm;
    let wanted = f64::from(duration_secs) * f64::from(sample_rate);
    let count = if wanted.is_finite() && wanted > 0.0 {
        (wanted.round() as usize).min(limits::MAX_SAMPLES)
    } else {
        0
    };
    let dt = 1.0 / sample_rate.max(1) as f32;

    (0..count)
        .map(|i| {
            let t = i as f32 * dt;
            let phase = (t % period) / period;
            beat_amplitude(phase)
        })
        .collect()
}

/// Number of R peaks in a trace (rising crossings of half the peak height).
pub fn count_beats(samples: &[f32]) -> usize {
    let threshold = R_PEAK * 0.5;
    samples
        .windows(2)
        .filter(|w| w[0] < threshold && w[1] >= threshold)
        .count()
}

/// Render a trace as `height` text rows, `width` columns wide.
pub fn render_strip(samples: &[f32], width: usize, height: usize) -> Vec<String> {
    if samples.is_empty() || width == 0 || height < 2 {
        return Vec::new();
    }

    let lo = S_TROUGH;
    let hi = R_PEAK;
    let mut grid = vec![vec![' '; width]; height];

    for col in 0..width {
        // take the extreme sample in this column's bucket so spikes survive
        let start = col * samples.len() / width;
        let end = ((col + 1) * samples.len() / width).max(start + 1).min(samples.len());
        let value = samples[start..end]
            .iter()
            .copied()
            .fold(0.0f32, |acc, v| if v.abs() > acc.abs() { v } else { acc });
        let norm = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        let row = ((1.0 - norm) * (height - 1) as f32).round() as usize;
        grid[row][col] = if value.abs() < 0.05 { '-' } else { '*' };
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(waveform(80, 3.0, 60).len(), 180);
        assert!(waveform(80, 0.0, 60).is_empty());
    }

    #[test]
    fn test_sample_count_is_capped() {
        assert_eq!(waveform(80, 1e10, 10_000).len(), limits::MAX_SAMPLES);
        assert!(waveform(80, f32::INFINITY, 250).is_empty());
        assert!(waveform(80, f32::NAN, 250).is_empty());
        assert!(waveform(80, -2.0, 250).is_empty());
    }

    #[test]
    fn test_beats_track_heart_rate() {
        // 60 bpm over 10 s → 10 beats; 120 bpm → 20 beats
        let slow = waveform(60, 10.0, 250);
        let fast = waveform(120, 10.0, 250);
        assert_eq!(count_beats(&slow), 10);
        assert_eq!(count_beats(&fast), 20);
    }

    #[test]
    fn test_amplitude_range() {
        for s in waveform(150, 5.0, 500) {
            assert!((S_TROUGH - 0.001..=R_PEAK + 0.001).contains(&s), "{}", s);
        }
    }

    #[test]
    fn test_baseline_between_features() {
        assert_eq!(beat_amplitude(0.0), 0.0);
        assert_eq!(beat_amplitude(0.3), 0.0);
        assert_eq!(beat_amplitude(0.8), 0.0);
        assert!(beat_amplitude(0.215) > 0.5);
    }

    #[test]
    fn test_heart_rate_out_of_range_is_clamped() {
        // 0 bpm would divide by zero; treated as the floor rate
        let trace = waveform(0, 4.0, 100);
        assert_eq!(trace.len(), 400);
        assert_eq!(count_beats(&trace), 2);
    }

    #[test]
    fn test_render_strip_dimensions() {
        let rows = render_strip(&waveform(90, 3.0, 500), 40, 6);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.chars().count() == 40));
        assert!(rows[0].contains('*'), "R peaks should reach the top row");
    }

    #[test]
    fn test_render_strip_degenerate() {
        assert!(render_strip(&[], 40, 6).is_empty());
        assert!(render_strip(&[0.0; 10], 0, 6).is_empty());
    }
}
