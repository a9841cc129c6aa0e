pub mod defaults;
pub mod file;

use crate::cli::{CommonArgs, Hist1dArgs, Hist3dArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::FileConfig;
use freehist::core::config::{AxisSpec, ConfigError, HistogramConfig, HistogramConfigBuilder};
use tracing::{debug, warn};

const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// Per-axis values given on the command line; unset values fall back to the file, then to the
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisArgs {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub width: Option<f64>,
}

impl Hist1dArgs {
    pub fn axis_args(&self) -> [AxisArgs; 1] {
        [AxisArgs {
            min: self.min,
            max: self.max,
            width: self.dx,
        }]
    }
}

impl Hist3dArgs {
    pub fn axis_args(&self) -> [AxisArgs; 3] {
        [
            AxisArgs {
                min: self.minx,
                max: self.maxx,
                width: self.dx,
            },
            AxisArgs {
                min: self.miny,
                max: self.maxy,
                width: self.dy,
            },
            AxisArgs {
                min: self.minz,
                max: self.maxz,
                width: self.dz,
            },
        ]
    }
}

/// Loads the optional config file and merges it with the command line and the defaults.
pub fn resolve<const D: usize>(
    axes: [AxisArgs; D],
    common: &CommonArgs,
) -> Result<HistogramConfig<D>> {
    let file = match &common.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    merge(axes, common, &file, &DefaultsConfig::default())
}

/// Precedence is command line, then config file, then defaults. Validation happens once, in
/// the core builder.
pub fn merge<const D: usize>(
    axes: [AxisArgs; D],
    common: &CommonArgs,
    file: &FileConfig,
    defaults: &DefaultsConfig,
) -> Result<HistogramConfig<D>> {
    for (axis, name) in AXIS_NAMES.iter().enumerate().skip(D) {
        if file.axis(axis).is_some() {
            warn!(
                "Ignoring the [{}] table of the config file: this histogram has {} axis/axes.",
                name, D
            );
        }
    }

    let mut builder = HistogramConfigBuilder::<D>::new();
    for (axis, cli_axis) in axes.iter().enumerate() {
        let from_file = file.axis(axis).cloned().unwrap_or_default();
        let spec = AxisSpec::new(
            cli_axis.min.or(from_file.min).unwrap_or(defaults.min),
            cli_axis.max.or(from_file.max).unwrap_or(defaults.max),
            cli_axis.width.or(from_file.width).unwrap_or(defaults.width),
        );
        debug!("Resolved axis {} ({}): {}", axis, AXIS_NAMES[axis], spec);
        builder = builder.axis(axis, spec);
    }

    let histogram = file.histogram.clone().unwrap_or_default();
    builder = builder
        .temperature(
            common
                .temperature
                .or(histogram.temperature)
                .unwrap_or(defaults.temperature),
        )
        .strict_out_of_range(
            common
                .strict_out_of_range
                .or(histogram.strict_out_of_range)
                .unwrap_or(defaults.strict_out_of_range),
        );
    if let Some(prefix) = common.output_prefix.clone().or(histogram.output_prefix) {
        builder = builder.output_prefix(prefix);
    }

    builder.build().map_err(|e| match e {
        ConfigError::MissingParameter("output_prefix") => CliError::Argument(
            "--fout-prefix is mandatory (or set `output-prefix` in the [histogram] table of the config file)"
                .to_string(),
        ),
        other => CliError::from(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(prefix: Option<&str>) -> CommonArgs {
        CommonArgs {
            output_prefix: prefix.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = merge(
            [AxisArgs::default()],
            &common(Some("out")),
            &FileConfig::default(),
            &DefaultsConfig::default(),
        )
        .unwrap();
        assert_eq!(config.axes()[0], AxisSpec::new(-10.0, 10.0, 0.1));
        assert_eq!(config.temperature(), 300.0);
        assert!(!config.strict_out_of_range());
        assert_eq!(config.output_prefix(), "out");
    }

    #[test]
    fn command_line_overrides_file_which_overrides_defaults() {
        let file = FileConfig::from_toml(
            r#"
            [histogram]
            temperature = 310.0
            output-prefix = "from-file"

            [x]
            min = 0.0
            max = 5.0
            width = 1.0
            "#,
        )
        .unwrap();
        let axes = [AxisArgs {
            max: Some(8.0),
            ..Default::default()
        }];

        let config = merge(axes, &common(Some("cli")), &file, &DefaultsConfig::default()).unwrap();
        assert_eq!(config.axes()[0], AxisSpec::new(0.0, 8.0, 1.0));
        assert_eq!(config.temperature(), 310.0);
        assert_eq!(config.output_prefix(), "cli");
    }

    #[test]
    fn output_prefix_can_come_from_file() {
        let file = FileConfig::from_toml("[histogram]\noutput-prefix = \"phi\"\n").unwrap();
        let config = merge(
            [AxisArgs::default()],
            &common(None),
            &file,
            &DefaultsConfig::default(),
        )
        .unwrap();
        assert_eq!(config.output_prefix(), "phi");
    }

    #[test]
    fn missing_output_prefix_is_an_argument_error() {
        let result = merge(
            [AxisArgs::default()],
            &common(None),
            &FileConfig::default(),
            &DefaultsConfig::default(),
        );
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn strict_flag_on_command_line_wins_over_file() {
        let file =
            FileConfig::from_toml("[histogram]\nstrict-out-of-range = false\n").unwrap();
        let mut args = common(Some("out"));
        args.strict_out_of_range = Some(true);
        let config = merge([AxisArgs::default()], &args, &file, &DefaultsConfig::default()).unwrap();
        assert!(config.strict_out_of_range());
    }

    #[test]
    fn explicit_false_on_command_line_disables_strict_mode_from_file() {
        let file = FileConfig::from_toml("[histogram]\nstrict-out-of-range = true\n").unwrap();
        let mut args = common(Some("out"));

        let config = merge([AxisArgs::default()], &args, &file, &DefaultsConfig::default()).unwrap();
        assert!(config.strict_out_of_range());

        args.strict_out_of_range = Some(false);
        let config = merge([AxisArgs::default()], &args, &file, &DefaultsConfig::default()).unwrap();
        assert!(!config.strict_out_of_range());
    }

    #[test]
    fn file_axes_map_to_x_y_z_in_order() {
        let file = FileConfig::from_toml(
            "[y]\nmin = 1.0\nmax = 2.0\nwidth = 0.5\n[z]\nwidth = 2.0\n",
        )
        .unwrap();
        let config = merge(
            [AxisArgs::default(); 3],
            &common(Some("cube")),
            &file,
            &DefaultsConfig::default(),
        )
        .unwrap();
        assert_eq!(config.axes()[0], AxisSpec::new(-10.0, 10.0, 0.1));
        assert_eq!(config.axes()[1], AxisSpec::new(1.0, 2.0, 0.5));
        assert_eq!(config.axes()[2], AxisSpec::new(-10.0, 10.0, 2.0));
    }

    #[test]
    fn inverted_range_is_a_configuration_error() {
        let axes = [AxisArgs {
            min: Some(5.0),
            max: Some(-5.0),
            width: None,
        }];
        let result = merge(axes, &common(Some("out")), &FileConfig::default(), &DefaultsConfig::default());
        assert!(matches!(
            result,
            Err(CliError::InvalidConfig(ConfigError::InvalidRange { axis: 0, .. }))
        ));
    }

    #[test]
    fn three_dimensional_args_map_to_axes_in_order() {
        let args = Hist3dArgs {
            dx: Some(1.0),
            minx: Some(-1.0),
            maxx: None,
            dy: None,
            miny: Some(-2.0),
            maxy: None,
            dz: None,
            minz: None,
            maxz: Some(3.0),
            common: CommonArgs::default(),
        };
        let axes = args.axis_args();
        assert_eq!(axes[0].width, Some(1.0));
        assert_eq!(axes[0].min, Some(-1.0));
        assert_eq!(axes[1].min, Some(-2.0));
        assert_eq!(axes[2].max, Some(3.0));
    }
}
