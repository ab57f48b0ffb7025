//! Tier policy resolution
//!
//! Clamps a creation request to what the caller's feature level permits.
//! Standard callers get the standard page-size ceiling and fixed High/Video
//! output. ExtendedFeatures keeps the requested quality and format.
//! ExtendedPagination additionally raises the page-size ceiling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TierConfig;
use crate::models::{CreateFeedRequest, FeatureLevel, Format, Identity, Quality};

/// Request parameters after policy enforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedParams {
    pub page_size: u32,
    pub quality: Quality,
    pub format: Format,
}

/// Pure mapping from (request, identity) to permitted parameters
#[derive(Debug, Clone)]
pub struct TierPolicy {
    tiers: TierConfig,
}

impl TierPolicy {
    pub fn new(tiers: TierConfig) -> Self {
        Self { tiers }
    }

    /// Page-size ceiling for a feature level
    pub fn ceiling(&self, level: FeatureLevel) -> u32 {
        match level {
            FeatureLevel::Standard => self.tiers.standard_page_size,
            FeatureLevel::ExtendedFeatures => self.tiers.extended_features_page_size,
            FeatureLevel::ExtendedPagination => self.tiers.extended_pagination_page_size,
        }
    }

    /// Resolve the effective page size, quality and format
    ///
    /// A requested page size of 0 means "as many as allowed".
    pub fn resolve(&self, request: &CreateFeedRequest, identity: &Identity) -> ResolvedParams {
        let level = identity.feature_level;
        let ceiling = self.ceiling(level);
        let page_size = match request.page_size {
            0 => ceiling,
            requested => requested.min(ceiling),
        };

        let resolved = match level {
            FeatureLevel::Standard => ResolvedParams {
                page_size,
                quality: Quality::High,
                format: Format::Video,
            },
            FeatureLevel::ExtendedFeatures | FeatureLevel::ExtendedPagination => ResolvedParams {
                page_size,
                quality: request.quality,
                format: request.format,
            },
        };

        debug!(
            "Resolved {} request (page_size {}, {}, {}) to {:?}",
            level, request.page_size, request.quality, request.format, resolved
        );
        resolved
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self::new(TierConfig::default())
    }
}
