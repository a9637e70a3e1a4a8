//! Rising, fading notice banner ("coming soon").
//!
//! The animation is a pure function of elapsed time, so it is driven by the
//! same tick as the rest of the bench.

use crate::config::BannerConfig;

/// Banner placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerFrame {
    /// Upward offset from the banner's resting position
    pub offset_y: f32,
    /// 1.0 is fully visible, 0.0 is invisible
    pub opacity: f32,
}

/// Banner animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Banner {
    pub rise: f32,
    pub duration: f32,
}

impl Banner {
    /// Create from configuration.
    pub fn new(config: &BannerConfig) -> Self {
        Self {
            rise: config.rise,
            duration: config.duration,
        }
    }

    /// Banner frame `elapsed` seconds after it was shown, or `None` once
    /// the animation is over.
    pub fn sample(&self, elapsed: f32) -> Option<BannerFrame> {
        if self.duration <= 0.0 || elapsed >= self.duration {
            return None;
        }

        let p = (elapsed / self.duration).max(0.0);
        Some(BannerFrame {
            offset_y: self.rise * p,
            opacity: 1.0 - p,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn banner() -> Banner {
        Banner::new(&BannerConfig {
            rise: 100.0,
            duration: 2.0,
        })
    }

    #[test]
    fn test_banner_starts_visible() {
        let frame = banner().sample(0.0).unwrap();
        assert_eq!(frame.offset_y, 0.0);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn test_banner_halfway() {
        let frame = banner().sample(1.0).unwrap();
        assert_relative_eq!(frame.offset_y, 50.0);
        assert_relative_eq!(frame.opacity, 0.5);
    }

    #[test]
    fn test_banner_ends() {
        assert!(banner().sample(2.0).is_none());
        assert!(banner().sample(10.0).is_none());
    }
}
