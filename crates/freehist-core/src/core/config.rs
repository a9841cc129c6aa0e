use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const HISTOGRAM_SUFFIX: &str = "_hist.dat";
pub const FREE_ENERGY_SUFFIX: &str = "_free_energy.dat";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Missing range for axis {axis}")]
    MissingAxis { axis: usize },

    #[error("Invalid range for axis {axis}: max ({max}) must be greater than min ({min})")]
    InvalidRange { axis: usize, min: f64, max: f64 },

    #[error("Invalid bin width for axis {axis}: {width} (must be finite and positive)")]
    InvalidWidth { axis: usize, width: f64 },

    #[error("Axis {axis} yields no representable bin count for range {min}..{max} and width {width}")]
    InvalidBinCount {
        axis: usize,
        min: f64,
        max: f64,
        width: f64,
    },

    #[error("Invalid temperature: {0} K (must be finite and positive)")]
    InvalidTemperature(f64),
}

/// Range and bin width along a single histogram axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub width: f64,
}

impl AxisSpec {
    pub fn new(min: f64, max: f64, width: f64) -> Self {
        Self { min, max, width }
    }

    pub(crate) fn validate(&self, axis: usize) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.max > self.min) {
            return Err(ConfigError::InvalidRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::InvalidWidth {
                axis,
                width: self.width,
            });
        }
        Ok(())
    }
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) width {}", self.min, self.max, self.width)
    }
}

/// Validated parameters of one histogram run over `D` axes.
///
/// Instances can only be obtained through [`HistogramConfigBuilder::build`], which enforces
/// `max > min` and `width > 0` on every axis, a positive temperature and a non-empty output
/// prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramConfig<const D: usize> {
    axes: [AxisSpec; D],
    temperature: f64,
    strict_out_of_range: bool,
    output_prefix: String,
}

impl<const D: usize> HistogramConfig<D> {
    pub fn axes(&self) -> &[AxisSpec; D] {
        &self.axes
    }

    /// Temperature in Kelvin.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn strict_out_of_range(&self) -> bool {
        self.strict_out_of_range
    }

    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    pub fn histogram_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.output_prefix, HISTOGRAM_SUFFIX))
    }

    pub fn free_energy_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.output_prefix, FREE_ENERGY_SUFFIX))
    }
}

pub struct HistogramConfigBuilder<const D: usize> {
    axes: [Option<AxisSpec>; D],
    temperature: Option<f64>,
    strict_out_of_range: bool,
    output_prefix: Option<String>,
}

impl<const D: usize> Default for HistogramConfigBuilder<D> {
    fn default() -> Self {
        Self {
            axes: [None; D],
            temperature: None,
            strict_out_of_range: false,
            output_prefix: None,
        }
    }
}

impl<const D: usize> HistogramConfigBuilder<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the range of `axis`. Indices past `D` are ignored.
    pub fn axis(mut self, axis: usize, spec: AxisSpec) -> Self {
        if let Some(slot) = self.axes.get_mut(axis) {
            *slot = Some(spec);
        }
        self
    }
    pub fn axes(mut self, specs: [AxisSpec; D]) -> Self {
        self.axes = specs.map(Some);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn strict_out_of_range(mut self, strict: bool) -> Self {
        self.strict_out_of_range = strict;
        self
    }
    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> Result<HistogramConfig<D>, ConfigError> {
        let mut axes = [AxisSpec::new(0.0, 0.0, 0.0); D];
        for (axis, (slot, spec)) in axes.iter_mut().zip(self.axes).enumerate() {
            let spec = spec.ok_or(ConfigError::MissingAxis { axis })?;
            spec.validate(axis)?;
            *slot = spec;
        }

        let temperature = self
            .temperature
            .ok_or(ConfigError::MissingParameter("temperature"))?;
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ConfigError::InvalidTemperature(temperature));
        }

        let output_prefix = self
            .output_prefix
            .filter(|prefix| !prefix.trim().is_empty())
            .ok_or(ConfigError::MissingParameter("output_prefix"))?;

        Ok(HistogramConfig {
            axes,
            temperature,
            strict_out_of_range: self.strict_out_of_range,
            output_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> HistogramConfigBuilder<3> {
        HistogramConfigBuilder::new()
            .axes([
                AxisSpec::new(-1.0, 1.0, 0.5),
                AxisSpec::new(0.0, 2.0, 1.0),
                AxisSpec::new(-3.0, 3.0, 2.0),
            ])
            .temperature(300.0)
            .output_prefix("out")
    }

    #[test]
    fn build_succeeds_with_all_parameters_set() {
        let config = complete_builder().strict_out_of_range(true).build().unwrap();
        assert_eq!(config.axes()[1], AxisSpec::new(0.0, 2.0, 1.0));
        assert_eq!(config.temperature(), 300.0);
        assert!(config.strict_out_of_range());
        assert_eq!(config.output_prefix(), "out");
    }

    #[test]
    fn strict_mode_defaults_to_off() {
        let config = complete_builder().build().unwrap();
        assert!(!config.strict_out_of_range());
    }

    #[test]
    fn output_paths_append_fixed_suffixes_to_prefix() {
        let config = complete_builder().output_prefix("runs/phi").build().unwrap();
        assert_eq!(config.histogram_path(), PathBuf::from("runs/phi_hist.dat"));
        assert_eq!(
            config.free_energy_path(),
            PathBuf::from("runs/phi_free_energy.dat")
        );
    }

    #[test]
    fn build_fails_when_max_equals_min() {
        let result = complete_builder()
            .axis(2, AxisSpec::new(1.0, 1.0, 0.1))
            .build();
        assert_eq!(
            result,
            Err(ConfigError::InvalidRange {
                axis: 2,
                min: 1.0,
                max: 1.0
            })
        );
    }

    #[test]
    fn build_fails_when_max_is_below_min() {
        let result = HistogramConfigBuilder::<1>::new()
            .axis(0, AxisSpec::new(10.0, -10.0, 0.1))
            .temperature(300.0)
            .output_prefix("out")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidRange { axis: 0, .. })));
    }

    #[test]
    fn build_fails_for_non_positive_width() {
        let result = complete_builder()
            .axis(0, AxisSpec::new(0.0, 1.0, 0.0))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidWidth { axis: 0, .. })));

        let result = complete_builder()
            .axis(1, AxisSpec::new(0.0, 1.0, -0.5))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidWidth { axis: 1, .. })));
    }

    #[test]
    fn build_fails_for_nan_range() {
        let result = complete_builder()
            .axis(0, AxisSpec::new(f64::NAN, 1.0, 0.1))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidRange { axis: 0, .. })));
    }

    #[test]
    fn build_fails_when_an_axis_is_missing() {
        let result = HistogramConfigBuilder::<3>::new()
            .axis(0, AxisSpec::new(0.0, 1.0, 0.1))
            .axis(2, AxisSpec::new(0.0, 1.0, 0.1))
            .temperature(300.0)
            .output_prefix("out")
            .build();
        assert_eq!(result, Err(ConfigError::MissingAxis { axis: 1 }));
    }

    #[test]
    fn build_fails_without_output_prefix() {
        let result = HistogramConfigBuilder::<1>::new()
            .axis(0, AxisSpec::new(0.0, 1.0, 0.1))
            .temperature(300.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("output_prefix")));
    }

    #[test]
    fn build_fails_with_blank_output_prefix() {
        let result = complete_builder().output_prefix("   ").build();
        assert_eq!(result, Err(ConfigError::MissingParameter("output_prefix")));
    }

    #[test]
    fn build_fails_for_non_positive_temperature() {
        let result = complete_builder().temperature(0.0).build();
        assert_eq!(result, Err(ConfigError::InvalidTemperature(0.0)));
    }

    #[test]
    fn axis_index_past_dimension_is_ignored() {
        let config = HistogramConfigBuilder::<1>::new()
            .axis(0, AxisSpec::new(0.0, 1.0, 0.1))
            .axis(1, AxisSpec::new(5.0, 1.0, 0.1))
            .temperature(300.0)
            .output_prefix("out")
            .build()
            .unwrap();
        assert_eq!(config.axes().len(), 1);
    }
}
