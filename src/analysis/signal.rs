/// Discretized stance of a backend trading signal, used only for chart
/// band coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Bullish,
    Neutral,
    Bearish,
}

impl SignalKind {
    /// Signal >= 1 is a buy stance, <= -1 a sell stance, anything in
    /// between (including NaN) is neutral.
    pub fn from_signal(signal: f64) -> Self {
        if signal >= 1.0 {
            SignalKind::Bullish
        } else if signal <= -1.0 {
            SignalKind::Bearish
        } else {
            SignalKind::Neutral
        }
    }
}

/// One background band behind the chart, spanning `[start, end]` on the
/// x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBand {
    pub start: f64,
    pub end: f64,
    pub kind: SignalKind,
}

/// Build one band per data point, colored by that point's signal. Each
/// band spans from the point's x to the next point's x; the final band
/// repeats its own x and is zero-width, matching the interval structure
/// of the source data.
pub fn signal_bands(xs: &[f64], signals: &[f64]) -> Vec<SignalBand> {
    let n = xs.len().min(signals.len());
    (0..n)
        .map(|i| SignalBand {
            start: xs[i],
            end: if i + 1 < n { xs[i + 1] } else { xs[i] },
            kind: SignalKind::from_signal(signals[i]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discretization_thresholds() {
        assert_eq!(SignalKind::from_signal(1.0), SignalKind::Bullish);
        assert_eq!(SignalKind::from_signal(2.5), SignalKind::Bullish);
        assert_eq!(SignalKind::from_signal(-1.0), SignalKind::Bearish);
        assert_eq!(SignalKind::from_signal(-3.0), SignalKind::Bearish);
        assert_eq!(SignalKind::from_signal(0.0), SignalKind::Neutral);
        assert_eq!(SignalKind::from_signal(0.99), SignalKind::Neutral);
        assert_eq!(SignalKind::from_signal(-0.99), SignalKind::Neutral);
        assert_eq!(SignalKind::from_signal(f64::NAN), SignalKind::Neutral);
    }

    #[test]
    fn one_band_per_point_with_degenerate_tail() {
        let d0 = 19700.0;
        let d1 = 19701.0;
        let d2 = 19704.0;
        let bands = signal_bands(&[d0, d1, d2], &[1.0, 0.0, -1.0]);

        assert_eq!(bands.len(), 3);
        assert_eq!(
            bands[0],
            SignalBand { start: d0, end: d1, kind: SignalKind::Bullish }
        );
        assert_eq!(
            bands[1],
            SignalBand { start: d1, end: d2, kind: SignalKind::Neutral }
        );
        assert_eq!(
            bands[2],
            SignalBand { start: d2, end: d2, kind: SignalKind::Bearish },
            "last band is zero-width"
        );
    }

    #[test]
    fn empty_and_mismatched_inputs() {
        assert!(signal_bands(&[], &[]).is_empty());
        // Extra signals without matching points are ignored
        let bands = signal_bands(&[0.0, 1.0], &[1.0, 0.0, -1.0]);
        assert_eq!(bands.len(), 2);
    }
}
