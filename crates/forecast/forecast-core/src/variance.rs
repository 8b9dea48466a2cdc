//! Period-aligned variance between a base and a compare series.

use std::collections::BTreeMap;

use forecast_spi::{MissingDataPolicy, Result, VarianceConfig, VariancePoint, VarianceReport};
use history_spi::Observation;

/// Compute `(compare - base) * sign` for every period of either series.
///
/// Periods present on one side only are skipped or zero-filled according to
/// `config.missing`; points under the noise threshold are suppressed.
pub fn compute_variance(
    base: &[Observation],
    compare: &[Observation],
    config: &VarianceConfig,
) -> Result<VarianceReport> {
    config.validate()?;

    let mut aligned: BTreeMap<i64, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for obs in base {
        aligned.entry(obs.period).or_default().0 = Some(obs.value);
    }
    for obs in compare {
        aligned.entry(obs.period).or_default().1 = Some(obs.value);
    }

    let sign = config.direction.sign();
    let mut report = VarianceReport::default();

    for (period, pair) in aligned {
        let (base_value, compare_value) = match (pair, config.missing) {
            ((Some(b), Some(c)), _) => (b, c),
            (_, MissingDataPolicy::Skip) => {
                report.skipped += 1;
                continue;
            }
            ((b, c), MissingDataPolicy::Zero) => (b.unwrap_or(0.0), c.unwrap_or(0.0)),
        };

        let delta = (compare_value - base_value) * sign;
        if delta.abs() < config.noise_threshold {
            report.suppressed += 1;
            continue;
        }

        let percent = (config.output_percent && base_value != 0.0)
            .then(|| delta / base_value);

        report.points.push(VariancePoint {
            period,
            base: base_value,
            compare: compare_value,
            delta,
            percent,
        });
    }

    Ok(report)
}
