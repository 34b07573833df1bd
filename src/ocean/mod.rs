//! Ocean environment models for acoustic propagation.
//!
//! This package describes the synthetic natural environment that a
//! ray-tracing propagation engine samples: the sound-speed profile of the
//! water column, the geometry and reflection behavior of the surface and
//! bottom boundaries, scattering layers in the volume, and the ambient
//! noise background.
//!
//! Many propagation workers share one ocean at a time. Every model here is
//! immutable after construction and shared through `Arc`, so read access
//! needs no locking; the only mutable location in the whole package is the
//! single publish slot of the [`shared`] registry. Builders therefore
//! configure a model completely before wrapping it, and a published
//! handle is never modified again.
//!
//! Composition replaces inheritance: a profile owns an attenuation
//! delegate, a boundary owns a reflection-loss delegate and a scattering
//! delegate, all injected at construction. Delegates are immutable and may
//! be aliased freely across hosts.

pub mod ambient;
pub mod attenuation;
pub mod boundary;
pub mod model;
pub mod profile;
pub mod reflect_loss;
pub mod scattering;
pub mod shared;
pub mod utils;
pub mod volume;
pub mod wave_height;

pub use ambient::{AmbientConstant, AmbientModel, AmbientWenz, RainRate};
pub use attenuation::{AttenuationConstant, AttenuationModel, AttenuationThorp};
pub use boundary::{BoundaryFlat, BoundaryGrid, BoundaryModel, BoundarySlope};
pub use model::OceanModel;
pub use profile::{
    ProfileCatenary, ProfileGrid, ProfileLinear, ProfileModel, ProfileMunk, ProfileN2,
};
pub use reflect_loss::{
    BottomType, ReflectLossBeckmann, ReflectLossConstant, ReflectLossEckart, ReflectLossModel,
    ReflectLossRayleigh,
};
pub use scattering::{
    ScatteringChapman, ScatteringConstant, ScatteringLambert, ScatteringModel,
};
pub use volume::{VolumeFlat, VolumeModel};

use thiserror::Error;

/// Error raised when a model is configured with physically invalid
/// parameters.
///
/// Raised at construction only; a constructed model answers every query.
#[derive(Debug, Error)]
pub enum OceanError {
    /// Wind-driven models need a non-negative wind speed
    #[error("wind speed must be non-negative (got {value} m/s)")]
    NegativeWindSpeed {
        /// The offending wind speed
        value: f64,
    },

    /// A physical parameter that must be positive was not
    #[error("{name} must be positive (got {value})")]
    NonPositiveParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// A physical parameter that must be non-negative was not
    #[error("{name} must be non-negative (got {value})")]
    NegativeParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Wenz shipping activity is a normalized level
    #[error("shipping level must lie in [0, 1] (got {value})")]
    ShippingOutOfRange {
        /// The offending level
        value: f64,
    },
}

/// Serializes unit tests that publish through the process-wide registry.
#[cfg(test)]
pub(crate) static REGISTRY_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
