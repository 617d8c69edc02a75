use crate::models::TokenObservation;

/// Holder count above this contributes no extra weight, so a handful of
/// whale tokens cannot dominate the shares.
pub const HOLDER_CAP: u64 = 10_000;

/// Importance weight of one observation.
///
/// Volume is the base signal; positive price momentum and (capped) holder
/// count scale it up. Negative price change is clamped to zero here because
/// bearish pressure is already captured on the sentiment side.
pub fn weight(obs: &TokenObservation) -> f64 {
    let volume = obs.volume_24h.max(0.0);
    let price_factor = 1.0 + obs.price_change_24h.max(0.0) / 100.0;
    let holder_factor = 1.0 + obs.holders.min(HOLDER_CAP) as f64 / 100.0 / 100.0;
    volume * price_factor * holder_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(volume_24h: f64, price_change_24h: f64, holders: u64) -> TokenObservation {
        TokenObservation {
            name: "token".to_string(),
            symbol: "TKN".to_string(),
            description: None,
            volume_24h,
            price_change_24h,
            holders,
            created_at: 0,
        }
    }

    #[test]
    fn test_weight_formula() {
        // 1000 * 1.1 * 1.5 = 1650
        let w = weight(&obs(1000.0, 10.0, 5000));
        assert!((w - 1650.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_price_change_contributes_no_penalty() {
        let w = weight(&obs(1000.0, -50.0, 0));
        assert!((w - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_holder_count_is_capped() {
        let capped = weight(&obs(1000.0, 0.0, HOLDER_CAP));
        let whale = weight(&obs(1000.0, 0.0, 1_000_000));
        assert_eq!(capped, whale);
        assert!((capped - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_volume_yields_zero_weight() {
        assert_eq!(weight(&obs(0.0, 25.0, 500)), 0.0);
    }
}
