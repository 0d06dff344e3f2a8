//! Conversion orchestrator: runs one or all strategies on an image.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::Result;
use crate::sampler::PixelBuffer;
use crate::voxel::{
    HeightParams, HueLayerParams, Method, MethodSelector, Strategy, StrategyResult, StructureParams,
};

/// Per-method parameters for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionParams {
    pub height: HeightParams,
    pub color: HueLayerParams,
    pub structure: StructureParams,
}

impl ConversionParams {
    /// Use the same x/y resolution for every strategy.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.height.resolution = resolution;
        self.color.resolution = resolution;
        self.structure.resolution = resolution;
        self
    }

    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.height.max_height = max_height;
        self
    }

    pub fn with_layers(mut self, layers: usize) -> Self {
        self.color.layers = layers;
        self
    }

    pub fn with_depth_levels(mut self, depth_levels: usize) -> Self {
        self.structure.depth_levels = depth_levels;
        self
    }

    /// The configured strategy for `method`.
    pub fn strategy(&self, method: Method) -> Strategy {
        match method {
            Method::Height => Strategy::Height(self.height),
            Method::Color => Strategy::HueLayer(self.color),
            Method::Structure => Strategy::StructureDepth(self.structure),
        }
    }
}

/// Strategy results keyed by method, iterated in run order.
#[derive(Debug, Clone, Default)]
pub struct ConversionResults {
    results: BTreeMap<Method, StrategyResult>,
}

impl ConversionResults {
    pub fn get(&self, method: Method) -> Option<&StrategyResult> {
        self.results.get(&method)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.results.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Method, &StrategyResult)> {
        self.results.iter().map(|(m, r)| (*m, r))
    }
}

impl IntoIterator for ConversionResults {
    type Item = (Method, StrategyResult);
    type IntoIter = std::collections::btree_map::IntoIter<Method, StrategyResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Runs voxelization strategies on decoded images.
#[derive(Debug, Clone)]
pub struct Converter {
    params: ConversionParams,
    parallel: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionParams::default())
    }
}

impl Converter {
    pub fn new(params: ConversionParams) -> Self {
        Self {
            params,
            parallel: true,
        }
    }

    /// Run multiple strategies as independent tasks (default: on).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn params(&self) -> &ConversionParams {
        &self.params
    }

    /// Run the selected strategies on `image`.
    ///
    /// Every requested strategy is validated before any of them runs, so a
    /// bad parameter fails the call without doing any work. Failures are not
    /// isolated: the first error in run order is returned and no partial
    /// results are exposed.
    pub fn convert(&self, image: &PixelBuffer, selector: MethodSelector) -> Result<ConversionResults> {
        let strategies: Vec<Strategy> = selector
            .methods()
            .into_iter()
            .map(|m| self.params.strategy(m))
            .collect();

        for strategy in &strategies {
            strategy.validate()?;
        }

        log::info!(
            "Processing image: {} x {} ({} strateg{})",
            image.width(),
            image.height(),
            strategies.len(),
            if strategies.len() == 1 { "y" } else { "ies" }
        );

        let run_one = |strategy: &Strategy| -> Result<StrategyResult> {
            let started = Instant::now();
            log::debug!("Running {} method at {}", strategy.method(), strategy.shape());
            let result = strategy.run(image)?;
            log::info!(
                "Created {} voxels using {} method in {:?}",
                result.count(),
                result.method(),
                started.elapsed()
            );
            Ok(result)
        };

        // Join every task, then report the first error in run order.
        let outcomes: Vec<Result<StrategyResult>> = if self.parallel && strategies.len() > 1 {
            strategies.par_iter().map(run_one).collect()
        } else {
            strategies.iter().map(run_one).collect()
        };
        let results = outcomes.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(ConversionResults {
            results: results.into_iter().map(|r| (r.method(), r)).collect(),
        })
    }

    /// Convenience for a single strategy.
    pub fn run(&self, image: &PixelBuffer, method: Method) -> Result<StrategyResult> {
        let strategy = self.params.strategy(method);
        strategy.run(image)
    }
}
