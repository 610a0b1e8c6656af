//! Small statistics helpers shared by the feature builders.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1), 0 with fewer than two samples
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Most frequent known channel (non-zero) in observation order.
///
/// Ties go to the channel seen most recently; no known channel gives 0.
pub fn channel_mode(channels: &[u16]) -> u16 {
    // (channel, count, last index)
    let mut tally: Vec<(u16, usize, usize)> = Vec::new();

    for (i, &ch) in channels.iter().enumerate().filter(|(_, ch)| **ch > 0) {
        match tally.iter_mut().find(|(c, _, _)| *c == ch) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 = i;
            }
            None => tally.push((ch, 1, i)),
        }
    }

    tally
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)))
        .map(|(ch, _, _)| ch)
        .unwrap_or(0)
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
