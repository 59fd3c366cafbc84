// Card feature extraction pipeline: normalize -> filter -> flatten -> join
// -> derive -> dedupe -> project, wrapped by an existence-gated result cache.

pub mod dedupe;
pub mod derive;
pub mod energy;
pub mod features;
pub mod filter;
pub mod flatten;
pub mod join;
pub mod normalize;
pub mod project;
pub mod tags;

use std::fs;

use tracing::info;

use crate::acquire;
use crate::config::PipelineConfig;
use crate::domain::FeatureRow;
use crate::error::Result;

/// Stage-by-stage row counts from a full (non-cached) run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub raw_records: usize,
    pub filtered_cards: usize,
    pub ability_entries: usize,
    pub attack_entries: usize,
    pub joined_rows: usize,
    pub output_rows: usize,
    pub energy_rows: usize,
    pub trainer_rows: usize,
}

/// Outcome of a pipeline invocation. `stats` is present only when the
/// stages actually ran; a cache hit skips them entirely.
#[derive(Debug)]
pub struct PipelineResult {
    pub rows: Vec<FeatureRow>,
    pub from_cache: bool,
    pub stats: Option<RunStats>,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs the feature pipeline, short-circuiting on a cached artifact.
    ///
    /// The cache is existence-gated only: a present artifact is returned
    /// unconditionally with no staleness check against the raw input.
    /// Rerunning after a raw-data change requires `invalidate_cache`.
    pub fn run(&self) -> Result<PipelineResult> {
        if self.config.output_path.is_file() {
            info!(path = %self.config.output_path.display(), "returning cached feature table");
            let rows = project::read_features(&self.config.output_path)?;
            return Ok(PipelineResult {
                rows,
                from_cache: true,
                stats: None,
            });
        }

        let (rows, stats) = self.run_stages()?;
        project::write_features(&self.config.output_path, &rows)?;
        Ok(PipelineResult {
            rows,
            from_cache: false,
            stats: Some(stats),
        })
    }

    /// Removes a previously persisted output artifact, returning whether one
    /// existed. Side tables are left in place; the next run rewrites them.
    pub fn invalidate_cache(&self) -> Result<bool> {
        if self.config.output_path.is_file() {
            fs::remove_file(&self.config.output_path)?;
            info!(path = %self.config.output_path.display(), "removed cached feature table");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Stages 1-7, in strict forward order over the in-memory table.
    fn run_stages(&self) -> Result<(Vec<FeatureRow>, RunStats)> {
        let raw = acquire::read_raw_cards(&self.config.raw_cards_path)?;
        let raw_records = raw.rows.len();

        let cards = normalize::normalize(&raw)?;

        let energy = energy::prepare_energy(&cards, &self.config)?;
        flatten::write_side_table(&self.config.energy_path, &energy)?;
        let trainer_tags = tags::tag_trainers(&cards)?;
        flatten::write_side_table(&self.config.trainers_path, &trainer_tags)?;

        let cards = filter::apply(cards, &self.config);
        let filtered_cards = cards.len();

        let abilities = flatten::ability_entries(&cards);
        let attacks = flatten::attack_entries(&cards)?;
        flatten::write_side_table(&self.config.abilities_path, &abilities)?;
        flatten::write_side_table(&self.config.attacks_path, &attacks)?;

        let joined = join::join(cards, &abilities, &attacks);
        let joined_rows = joined.len();

        let rows = derive::derive(joined)?;
        let rows = dedupe::dedupe(rows);
        let rows = project::sort(rows);

        let stats = RunStats {
            raw_records,
            filtered_cards,
            ability_entries: abilities.len(),
            attack_entries: attacks.len(),
            joined_rows,
            output_rows: rows.len(),
            energy_rows: energy.len(),
            trainer_rows: trainer_tags.len(),
        };
        info!(?stats, "pipeline stages complete");
        Ok((rows, stats))
    }
}
