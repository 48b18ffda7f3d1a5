//! Drive `dictstress` sessions between two registered dict implementations.

use clap::Parser;
use dictstress::{KeyValueFactory, RunConfig};
use kv_generator::{AllKeyValueFactory, IntKeyValueFactory};
use pydict::Obj;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod registry;
pub use registry::ImplName;

/// Upper bound of the random initial size picked when none is given.
pub const MAX_RANDOM_INITIAL_SIZE: usize = 100;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kv {
    Numbers,
    All,
}

#[derive(Parser, Debug)]
#[command(about = "Stress-test dict reimplementations against a reference layout")]
pub struct CommandArgs {
    #[arg(long, value_enum)]
    pub reference_implementation: ImplName,
    #[arg(long, value_enum)]
    pub test_implementation: ImplName,
    #[arg(long, value_enum)]
    pub kv: Kv,
    #[arg(long, default_value_t = 500)]
    pub num_inserts: usize,
    /// Negative picks a random size in [0, 100] for every session.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub initial_size: i64,
    #[arg(long)]
    pub no_extra_getitem_checks: bool,
    #[arg(long)]
    pub forever: bool,
    #[arg(long)]
    pub verbose: bool,
    /// Seed for the session RNG. A random one is picked and logged otherwise.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CommandArgs {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            n_inserts: self.num_inserts,
            extra_checks: !self.no_extra_getitem_checks,
            ..RunConfig::default()
        }
    }
}

/// Run one session, or sessions until failure with `--forever`.
pub fn drive(args: &CommandArgs) -> dictstress::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    match args.kv {
        Kv::Numbers => run_sessions(args, IntKeyValueFactory::new(args.num_inserts), &mut rng),
        Kv::All => run_sessions(args, AllKeyValueFactory::new(args.num_inserts), &mut rng),
    }
}

fn run_sessions<F, G>(args: &CommandArgs, mut kv: F, rng: &mut G) -> dictstress::Result<()>
where
    F: KeyValueFactory<Obj, Obj>,
    G: Rng,
{
    let reference = args.reference_implementation.implementation();
    let candidate = args.test_implementation.implementation();
    let config = args.run_config();

    let mut session_no = 0u64;
    loop {
        session_no += 1;

        let initial_size = match usize::try_from(args.initial_size) {
            Ok(n) => n,
            Err(_) => rng.random_range(0..=MAX_RANDOM_INITIAL_SIZE),
        };
        let initial_state: Vec<(Obj, Obj)> = (0..initial_size)
            .map(|_| (kv.generate_key(rng), kv.generate_value(rng)))
            .collect();

        log::info!(
            "session {session_no}: {} vs {}, initial size {initial_size}, {} inserts",
            reference.name,
            candidate.name,
            config.n_inserts
        );
        let stats = dictstress::run(reference, candidate, &config, &mut kv, &initial_state, rng)?;
        log::info!("session {session_no} passed: {stats:?}");

        if !args.forever {
            return Ok(());
        }
    }
}
