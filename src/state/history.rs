//! History Series Assembly
//!
//! Turns raw sample and state history rows into the parallel arrays the
//! chart renders: one shared time index, a temperature series, and the
//! set-point series split into heat-on and heat-off bands.

use crate::state::global::ControllerState;

/// Upper bound on chart points before resampling kicks in
pub const MAX_CHART_POINTS: usize = 50;

/// Never resample more finely than one minute
pub const MIN_BUCKET_SECS: i64 = 60;

/// A historical temperature sample from `GET /samples`
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct SamplePoint {
    /// Epoch milliseconds
    pub time: i64,
    pub temp: f64,
}

/// A historical controller state from `GET /states`
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct StatePoint {
    /// Epoch milliseconds
    pub time: i64,
    #[serde(flatten)]
    pub state: ControllerState,
}

/// Parallel arrays for the chart, all indexed by one shared time index.
///
/// A gap is a `None` entry at that index, never an omission; the four
/// sequences always have equal length.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub timestamps: Vec<i64>,
    pub temps: Vec<Option<f64>>,
    pub set_points_heat_on: Vec<Option<f64>>,
    pub set_points_heat_off: Vec<Option<f64>>,
}

impl ChartSeries {
    /// Assemble chart series from raw history rows.
    ///
    /// The sample and state time indexes are union-joined, resampled down
    /// to at most `max_points` buckets (no finer than one minute), and the
    /// series are filled against the joined index:
    ///
    /// - temperature takes the first sample per bucket, `None` elsewhere
    ///   (the renderer interpolates across those gaps);
    /// - states hold as step functions, and while the set point is enabled
    ///   its value lands in exactly one band per index depending on
    ///   `heat_on`; while disabled both bands gap.
    pub fn assemble(samples: &[SamplePoint], states: &[StatePoint], max_points: usize) -> Self {
        let mut samples = samples.to_vec();
        samples.sort_by_key(|s| s.time);
        let mut states = states.to_vec();
        states.sort_by_key(|s| s.time);

        let index = resample_index(&merged_index(&samples, &states), max_points);
        if index.is_empty() {
            return Self::default();
        }

        let mut temps = vec![None; index.len()];
        for sample in &samples {
            let slot = slot_for(&index, sample.time);
            if temps[slot].is_none() {
                temps[slot] = Some(sample.temp);
            }
        }

        let mut set_points_heat_on = vec![None; index.len()];
        let mut set_points_heat_off = vec![None; index.len()];
        let mut cursor = 0;
        let mut current: Option<&StatePoint> = None;
        for (i, &t) in index.iter().enumerate() {
            while cursor < states.len() && states[cursor].time <= t {
                current = Some(&states[cursor]);
                cursor += 1;
            }
            if let Some(point) = current {
                if point.state.set_point_enabled {
                    if point.state.heat_on {
                        set_points_heat_on[i] = Some(point.state.set_point);
                    } else {
                        set_points_heat_off[i] = Some(point.state.set_point);
                    }
                }
            }
        }

        let span = index[index.len() - 1] - index[0];
        let labels = index.iter().map(|&t| format_label(t, span)).collect();

        Self {
            labels,
            timestamps: index,
            temps,
            set_points_heat_on,
            set_points_heat_off,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Union of the sample and state time indexes, ordered and de-duplicated.
fn merged_index(samples: &[SamplePoint], states: &[StatePoint]) -> Vec<i64> {
    let mut index: Vec<i64> = samples
        .iter()
        .map(|s| s.time)
        .chain(states.iter().map(|s| s.time))
        .collect();
    index.sort_unstable();
    index.dedup();
    index
}

/// Resample an oversized index into first-point-per-bucket buckets.
///
/// Bucket width is `total_secs / (max_points + 1)`, clamped to at least
/// one minute.
fn resample_index(index: &[i64], max_points: usize) -> Vec<i64> {
    if index.len() <= max_points {
        return index.to_vec();
    }
    let first = index[0];
    let last = index[index.len() - 1];
    let total_secs = (last - first) / 1000;
    if total_secs <= 1 {
        return index.to_vec();
    }
    let bucket_ms = (total_secs / (max_points as i64 + 1)).max(MIN_BUCKET_SECS) * 1000;

    let mut out = Vec::new();
    let mut last_bucket = None;
    for &t in index {
        let bucket = (t - first) / bucket_ms;
        if last_bucket != Some(bucket) {
            out.push(t);
            last_bucket = Some(bucket);
        }
    }
    out
}

/// Index slot holding the given time: the last index point at or before it.
fn slot_for(index: &[i64], t: i64) -> usize {
    match index.binary_search(&t) {
        Ok(i) => i,
        Err(0) => 0,
        Err(i) => i - 1,
    }
}

/// Format a timestamp label; windows beyond two days carry the date.
fn format_label(t: i64, span_ms: i64) -> String {
    const TWO_DAYS_MS: i64 = 2 * 24 * 60 * 60 * 1000;
    let fmt = if span_ms > TWO_DAYS_MS {
        "%m/%d %H:%M"
    } else {
        "%H:%M"
    };
    chrono::DateTime::from_timestamp_millis(t)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60 * 1000;

    fn sample(time: i64, temp: f64) -> SamplePoint {
        SamplePoint { time, temp }
    }

    fn state(time: i64, set_point: f64, enabled: bool, heat_on: bool) -> StatePoint {
        StatePoint {
            time,
            state: ControllerState {
                set_point,
                set_point_enabled: enabled,
                heat_on,
            },
        }
    }

    #[test]
    fn test_sequences_share_one_length() {
        let samples = [sample(0, 65.0), sample(2 * MINUTE, 66.0)];
        let states = [state(MINUTE, 70.0, true, true)];
        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);

        assert_eq!(series.len(), 3);
        assert_eq!(series.labels.len(), 3);
        assert_eq!(series.temps.len(), 3);
        assert_eq!(series.set_points_heat_on.len(), 3);
        assert_eq!(series.set_points_heat_off.len(), 3);
    }

    #[test]
    fn test_temperature_gaps_at_state_only_indexes() {
        let samples = [sample(0, 65.0), sample(2 * MINUTE, 66.0)];
        let states = [state(MINUTE, 70.0, true, false)];
        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);

        assert_eq!(series.temps, vec![Some(65.0), None, Some(66.0)]);
    }

    #[test]
    fn test_set_point_lands_in_exactly_one_band() {
        let samples = [sample(0, 65.0)];
        let states = [
            state(MINUTE, 70.0, true, true),
            state(2 * MINUTE, 70.0, true, false),
        ];
        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);

        for i in 0..series.len() {
            assert!(
                series.set_points_heat_on[i].is_none() || series.set_points_heat_off[i].is_none()
            );
        }
        assert_eq!(series.set_points_heat_on[1], Some(70.0));
        assert_eq!(series.set_points_heat_off[1], None);
        assert_eq!(series.set_points_heat_on[2], None);
        assert_eq!(series.set_points_heat_off[2], Some(70.0));
    }

    #[test]
    fn test_disabled_set_point_gaps_both_bands() {
        let states = [
            state(0, 70.0, true, false),
            state(MINUTE, 70.0, false, false),
            state(2 * MINUTE, 70.0, true, false),
        ];
        let series = ChartSeries::assemble(&[], &states, MAX_CHART_POINTS);

        assert_eq!(series.set_points_heat_off, vec![Some(70.0), None, Some(70.0)]);
        assert_eq!(series.set_points_heat_on, vec![None, None, None]);
    }

    #[test]
    fn test_states_hold_between_rows() {
        let samples = [sample(0, 65.0), sample(MINUTE, 65.5), sample(2 * MINUTE, 66.0)];
        let states = [state(0, 70.0, true, true)];
        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);

        // the single state row holds across every later index point
        assert_eq!(
            series.set_points_heat_on,
            vec![Some(70.0), Some(70.0), Some(70.0)]
        );
    }

    #[test]
    fn test_no_band_before_first_state() {
        let samples = [sample(0, 65.0)];
        let states = [state(MINUTE, 70.0, true, false)];
        let series = ChartSeries::assemble(&samples, &states, MAX_CHART_POINTS);

        assert_eq!(series.set_points_heat_off[0], None);
        assert_eq!(series.set_points_heat_off[1], Some(70.0));
    }

    #[test]
    fn test_resample_caps_point_count() {
        // ten hours of one-minute samples, far over the cap
        let samples: Vec<_> = (0..600).map(|i| sample(i * MINUTE, 65.0)).collect();
        let series = ChartSeries::assemble(&samples, &[], MAX_CHART_POINTS);

        // floor division on the bucket width can leave one extra bucket
        assert!(series.len() <= MAX_CHART_POINTS + 2);
        assert!(series.len() > 1);
    }

    #[test]
    fn test_resample_keeps_first_value_per_bucket() {
        let samples: Vec<_> = (0..600).map(|i| sample(i * MINUTE, i as f64)).collect();
        let series = ChartSeries::assemble(&samples, &[], MAX_CHART_POINTS);

        // first bucket starts at the first sample
        assert_eq!(series.temps[0], Some(0.0));
        assert_eq!(series.timestamps[0], 0);
    }

    #[test]
    fn test_resample_respects_minute_floor() {
        // sixty points over two minutes: buckets clamp to one minute
        let samples: Vec<_> = (0..60).map(|i| sample(i * 2000, 65.0)).collect();
        let series = ChartSeries::assemble(&samples, &[], 10);

        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let series = ChartSeries::assemble(&[], &[], MAX_CHART_POINTS);
        assert!(series.is_empty());
    }

    #[test]
    fn test_labels_carry_date_for_long_windows() {
        let day = 24 * 60 * 60 * 1000;
        let samples = [sample(0, 65.0), sample(3 * day, 66.0)];
        let series = ChartSeries::assemble(&samples, &[], MAX_CHART_POINTS);

        assert_eq!(series.labels[0], "01/01 00:00");
    }

    #[test]
    fn test_state_point_json() {
        let parsed: StatePoint = serde_json::from_str(
            r#"{"time": 1000, "set_point": 72.0, "set_point_enabled": true, "heat_on": false}"#,
        )
        .unwrap();
        assert_eq!(parsed, state(1000, 72.0, true, false));
    }
}
