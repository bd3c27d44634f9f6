//! Simulation configuration.

use crate::{
    driver::Driver,
    error::Error,
    render::Viewport,
    rules::{NeighborRange, Rule},
    world::World,
};
use educe::Educe;
use log::warn;
use rand::{rngs::StdRng, SeedableRng};
use std::{str::FromStr, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest accepted `view_height` and `view_width`.
pub const MAX_VIEW_SIZE: i64 = 1 << 16;

/// Simulation configuration.
///
/// The initial generation and the driver will be generated from this
/// configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Config {
    /// Height of the randomly seeded rectangle.
    #[educe(Default = 100)]
    pub height: i64,

    /// Width of the randomly seeded rectangle.
    #[educe(Default = 100)]
    pub width: i64,

    /// Probability that a cell in the seeded rectangle is alive.
    #[educe(Default = 0.5)]
    pub density: f64,

    /// Pause between two generations, in milliseconds.
    #[educe(Default = 500)]
    pub delay: u64,

    /// Only rows `[0, view_height)` are rendered.
    ///
    /// `None` means the rows follow the bounding box.
    pub view_height: Option<i64>,

    /// Only columns `[0, view_width)` are rendered.
    ///
    /// `None` means the columns follow the bounding box.
    pub view_width: Option<i64>,

    /// Neighbor counts for which a living cell stays alive.
    #[educe(Default(expression = "NeighborRange::bounded(2, 4)"))]
    pub survival: NeighborRange,

    /// Neighbor counts for which a dead cell becomes alive.
    #[educe(Default(expression = "NeighborRange::bounded(3, 4)"))]
    pub birth: NeighborRange,

    /// Stop after rendering this many generations.
    ///
    /// `None` means running until stopped from outside.
    pub generations: Option<u64>,

    /// Seed of the random number generator.
    ///
    /// `None` means seeding from the operating system.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with the given seeding rectangle.
    pub fn new(height: i64, width: i64) -> Self {
        Config {
            height,
            width,
            ..Config::default()
        }
    }

    /// Builds a configuration from `(key, value)` pairs, on top of the default.
    ///
    /// See [`set_option`](Config::set_option) for the keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Config::default();
        for (key, value) in pairs {
            config.set_option(key.as_ref(), value.as_ref())?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Sets one option from its textual form.
    ///
    /// Keys are matched ignoring case, `-` and `_`, so `viewHeight`,
    /// `view-height` and `view_height` are the same key. An empty value
    /// clears an optional setting. Unknown keys are ignored.
    ///
    /// Values are only parsed here; call [`validate`](Config::validate)
    /// to check them.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let normalized: String = key
            .chars()
            .filter(|&c| c != '-' && c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let value = value.trim();
        match normalized.as_str() {
            "height" => self.height = parse_number(key, value)?,
            "width" => self.width = parse_number(key, value)?,
            "density" => self.density = parse_number(key, value)?,
            "delay" => self.delay = parse_number(key, value)?,
            "viewheight" => self.view_height = parse_optional(key, value)?,
            "viewwidth" => self.view_width = parse_optional(key, value)?,
            "survival" => self.survival = value.parse()?,
            "birth" => self.birth = value.parse()?,
            "rule" => self.set_rule_mut(value.parse()?),
            "generations" => self.generations = parse_optional(key, value)?,
            "seed" => self.seed = parse_optional(key, value)?,
            _ => warn!("Ignoring unknown option {:?}", key),
        }
        Ok(())
    }

    /// Sets the density.
    pub fn set_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the delay in milliseconds.
    pub fn set_delay(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the viewport.
    pub fn set_view<H, W>(mut self, view_height: H, view_width: W) -> Self
    where
        H: Into<Option<i64>>,
        W: Into<Option<i64>>,
    {
        self.view_height = view_height.into();
        self.view_width = view_width.into();
        self
    }

    /// Sets the rule.
    pub fn set_rule(mut self, rule: Rule) -> Self {
        self.set_rule_mut(rule);
        self
    }

    fn set_rule_mut(&mut self, rule: Rule) {
        self.survival = rule.survival;
        self.birth = rule.birth;
    }

    /// Sets the generation limit.
    pub fn set_generations<T: Into<Option<u64>>>(mut self, generations: T) -> Self {
        self.generations = generations.into();
        self
    }

    /// Sets the seed of the random number generator.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// The rule of the cellular automaton.
    pub fn rule(&self) -> Rule {
        Rule::new(self.survival, self.birth)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view_height, self.view_width)
    }

    /// Checks every value in the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        let dimensions = [
            ("height", Some(self.height)),
            ("width", Some(self.width)),
            ("viewHeight", self.view_height),
            ("viewWidth", self.view_width),
        ];
        for &(name, value) in dimensions.iter() {
            if let Some(value) = value {
                if value <= 0 {
                    return Err(Error::InvalidDimension { name, value });
                }
            }
        }
        let views = [("viewHeight", self.view_height), ("viewWidth", self.view_width)];
        for &(name, value) in views.iter() {
            if let Some(value) = value.filter(|&value| value > MAX_VIEW_SIZE) {
                return Err(Error::ViewTooLarge { name, value });
            }
        }
        if self.generations == Some(0) {
            return Err(Error::InvalidDimension {
                name: "generations",
                value: 0,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(Error::DensityOutOfRange(self.density));
        }
        self.rule().validate()
    }

    /// Creates the initial generation from the configuration.
    /// Returns an error if the configuration is invalid.
    pub fn world(&self) -> Result<World, Error> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        World::seed(self.height, self.width, self.density, self.rule(), &mut rng)
    }

    /// Creates a driver that starts from a new initial generation.
    /// Returns an error if the configuration is invalid.
    pub fn driver(&self) -> Result<Driver, Error> {
        let driver = Driver::new(self.world()?, Duration::from_millis(self.delay))
            .set_viewport(self.viewport())
            .set_generations(self.generations);
        Ok(driver)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| Error::InvalidNumber {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_optional<T: FromStr>(name: &str, value: &str) -> Result<Option<T>, Error> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_number(name, value).map(Some)
    }
}
