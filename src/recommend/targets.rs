use crate::types::AudioFeatures;

/// Audio-feature targets biasing a recommendation request.
///
/// Each target is the arithmetic mean of the corresponding feature over the
/// sampled liked tracks. A mean that falls outside `[0, 1]` is treated as
/// invalid and the target is omitted rather than clamped; with no usable
/// features at all, no target parameters are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub valence: Option<f64>,
}

impl TargetFeatures {
    pub fn from_features(features: &[AudioFeatures]) -> Self {
        TargetFeatures {
            danceability: unit_mean(features.iter().map(|f| f.danceability)),
            energy: unit_mean(features.iter().map(|f| f.energy)),
            valence: unit_mean(features.iter().map(|f| f.valence)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.danceability.is_none() && self.energy.is_none() && self.valence.is_none()
    }

    /// Renders the present targets as `target_*` query parameters.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(danceability) = self.danceability {
            params.push(("target_danceability".to_string(), format_target(danceability)));
        }
        if let Some(energy) = self.energy {
            params.push(("target_energy".to_string(), format_target(energy)));
        }
        if let Some(valence) = self.valence {
            params.push(("target_valence".to_string(), format_target(valence)));
        }
        params
    }
}

fn format_target(value: f64) -> String {
    format!("{value:.4}")
}

/// Arithmetic mean restricted to the unit interval; `None` for an empty
/// iterator or an out-of-range result.
fn unit_mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return None;
    }

    let mean = sum / count as f64;
    if (0.0..=1.0).contains(&mean) {
        Some(mean)
    } else {
        None
    }
}
