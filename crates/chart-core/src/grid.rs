// File: crates/chart-core/src/grid.rs
// Summary: Tick placement for the date axis and the rank axis.

const DAY_MS: f64 = 86_400_000.0;
/// Candidate tick spacings in days, smallest first.
const DAY_STEPS: [u32; 10] = [1, 2, 3, 7, 14, 30, 61, 91, 182, 365];

/// Day-aligned ticks (epoch ms) covering `[min, max]`, at most `max_ticks` of them.
/// Returns the tick positions and the chosen spacing in days.
pub fn time_ticks(min: f64, max: f64, max_ticks: usize) -> (Vec<f64>, u32) {
    if max_ticks == 0 || !min.is_finite() || !max.is_finite() || max < min {
        return (Vec::new(), 1);
    }
    let span_days = (max - min) / DAY_MS;
    let mut step = *DAY_STEPS.last().unwrap_or(&365);
    for s in DAY_STEPS {
        if span_days / s as f64 + 1.0 <= max_ticks as f64 {
            step = s;
            break;
        }
    }
    let step_ms = step as f64 * DAY_MS;
    let mut t = (min / DAY_MS).ceil() * DAY_MS;
    let mut out = Vec::new();
    while t <= max + 1e-6 && out.len() < max_ticks {
        out.push(t);
        t += step_ms;
    }
    (out, step)
}

/// "Nice" value ticks (1/2/5 x 10^k spacing) inside `[lo, hi]`.
pub fn value_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || target < 2 {
        return vec![lo];
    }
    let raw = (hi - lo) / (target - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * mag;
    let mut v = (lo / step).ceil() * step;
    let mut out = Vec::new();
    // `v += step` stalls once step drops below the spacing of f64 near v
    let cap = target * 4;
    while v <= hi + step * 1e-9 && out.len() < cap {
        out.push(v);
        v += step;
    }
    out
}
