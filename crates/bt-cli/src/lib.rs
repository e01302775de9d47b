//! besttime: run an Oort scenario, compare it with the best recorded time,
//! and commit new bests.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bt_compare::publish::publish_best;
use bt_compare::{HistoryStore, PublishPlan, Publisher, RenderOptions, RunFlags, evaluate};
use bt_runner::config::{DEFAULT_SOURCE, DEFAULT_TIMES_FILE};
use bt_runner::{Config, GitPublisher, RunnerError, Simulator};

/// Run an Oort scenario and track best times
#[derive(Parser, Debug)]
#[command(name = "besttime")]
#[command(author, version, about = "Run an Oort scenario and track best times", long_about = None)]
pub struct Args {
    /// Name of the scenario to run
    pub scenario_name: String,

    /// Run the scenario without committing changes
    #[arg(short = 'n', long = "no-commit")]
    pub no_commit: bool,

    /// Force saving even if not a new best time
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Path to the source file, relative to the AI repository
    #[arg(long = "source", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Oort checkout (default ~/repos/oort3)
    #[arg(long = "oort-root", env = "OORT_ROOT")]
    pub oort_root: Option<PathBuf>,

    /// AI repository, where new bests are committed (default ~/repos/oort_ai)
    #[arg(long = "ai-root", env = "OORT_AI_ROOT")]
    pub ai_root: Option<PathBuf>,

    /// Simulator binary (default <oort-root>/target/debug/battle)
    #[arg(long = "battle")]
    pub battle: Option<PathBuf>,

    /// Best times file
    #[arg(long = "times", default_value = DEFAULT_TIMES_FILE)]
    pub times: PathBuf,

    /// Disable coloured diffs
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    pub fn flags(&self) -> RunFlags {
        RunFlags {
            force: self.force,
            no_commit: self.no_commit,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            color: !self.no_color,
        }
    }

    /// Build the run configuration from the command line.
    pub fn config(&self) -> Result<Config, RunnerError> {
        let mut config = Config::from_roots(self.oort_root.clone(), self.ai_root.clone())?
            .with_source(&self.source)
            .with_times_path(self.times.clone());
        if let Some(battle) = &self.battle {
            config = config.with_battle(battle.clone());
        }
        Ok(config)
    }

    /// Default log filter, overridden by `RUST_LOG`.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// Run one scenario end to end, publishing new bests with git in the AI
/// repository.
///
/// Missing input files print a diagnostic and return `Ok`; simulator and
/// parse failures are returned as errors.
pub fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    let mut git = GitPublisher::new(&config.ai_root);
    run_with(args, &config, &mut git)
}

/// Run with an explicit config and publisher.
///
/// Publication failures never reach the user; they are only visible in the
/// debug log.
pub fn run_with(args: &Args, config: &Config, publisher: &mut dyn Publisher) -> Result<()> {
    let scenario = config.resolve_scenario(&args.scenario_name);

    println!("Running scenario: {}", scenario.name);
    println!("Source file: {}", config.source.display());
    if let Err(e) = config.check_source() {
        println!("{}", e);
        return Ok(());
    }
    println!("Enemy AI file: {}", scenario.enemy.display());
    if let Err(e) = scenario.check_enemy() {
        println!("{}", e);
        return Ok(());
    }

    let result = Simulator::from_config(config)
        .run(&scenario)
        .with_context(|| format!("running scenario {}", scenario.name))?;

    let store = HistoryStore::load_or_init(&config.times_path)
        .with_context(|| format!("loading {}", config.times_path.display()))?;

    let evaluation = evaluate(&result, store, args.flags());
    evaluation.print(&args.render_options());

    if !evaluation.decision.should_persist() {
        return Ok(());
    }

    if let Err(e) = evaluation.decision.store.save(&config.times_path) {
        log::error!("Failed to save {}: {}", config.times_path.display(), e);
        return Ok(());
    }

    let plan = PublishPlan::new(&scenario.name, &scenario.requested, result.average_time);
    let report = publish_best(publisher, &plan);
    log::debug!(
        "Published {}: {} step(s) ok, {} failed",
        plan.tag,
        report.completed.len(),
        report.failures.len()
    );

    Ok(())
}
