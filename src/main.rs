use anyhow::{Context, Result};
use clap::{arg, ArgAction, ArgMatches, Command};
use sat_anneal::anneal::AcceptancePolicy;
use sat_anneal::batch::BatchRunner;
use sat_anneal::dimacs::read_cnf_file;
use sat_anneal::report::{write_curve_csv, Summary};
use sat_anneal::settings::SolverSettings;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("sat-anneal")
        .about("Searches CNF instances for low-energy assignments with simulated annealing")
        .arg(
            arg!(<CNF> "Path to a DIMACS CNF file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--config <PATH> "JSON settings file; command-line flags override it")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"initial-temp" <T0> "Initial temperature [default: 1000]")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"min-temp" <TMIN> "Minimum temperature [default: 1e-5]")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"cooling-rate" <ALPHA> "Geometric cooling factor in (0, 1) [default: 0.99]")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"sa-max" <N> "Attempts per temperature level [default: 1]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"max-iterations" <N> "Cap on temperature levels [default: 1000]")
                .value_parser(clap::value_parser!(usize))
                .conflicts_with("no-iteration-cap"),
        )
        .arg(
            arg!(--"no-iteration-cap" "Cool all the way down to the minimum temperature")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--executions <N> "Number of independent trajectories [default: 1000]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--policy <POLICY> "Acceptance policy [default: strict]")
                .value_parser(["strict", "metropolis"]),
        )
        .arg(
            arg!(--arity <K> "Keep only clauses with exactly K literals")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--seed <SEED> "Base seed for reproducible batches").value_parser(clap::value_parser!(u64)))
        .arg(arg!(--parallel "Run trajectories on all cores").action(ArgAction::SetTrue))
        .arg(
            arg!(--curve <PATH> "Write the mean energy curve as CSV")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--json "Print the summary as JSON").action(ArgAction::SetTrue))
        .arg(arg!(-v --verbose "Log per-execution progress").action(ArgAction::SetTrue))
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let settings = load_settings(matches)?;
    settings.validate().context("invalid settings")?;

    let cnf_path = matches
        .get_one::<PathBuf>("CNF")
        .context("missing CNF path")?;
    let cnf = read_cnf_file(cnf_path)
        .with_context(|| format!("failed to read {}", cnf_path.display()))?;
    let mut problem = cnf.into_problem().context("invalid CNF instance")?;

    if let Some(arity) = settings.clause_arity_filter {
        let before = problem.num_clauses();
        problem = problem.restrict_to_arity(arity);
        info!(
            arity,
            kept = problem.num_clauses(),
            dropped = before - problem.num_clauses(),
            "applied clause arity filter"
        );
    }

    let aggregate = BatchRunner::run_many(
        &problem,
        &settings.anneal_config(),
        &settings.batch_config(),
    )?;
    let summary = Summary::from_aggregate(&problem, &aggregate)?;

    if let Some(path) = matches.get_one::<PathBuf>("curve") {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_curve_csv(BufWriter::new(file), &aggregate.mean_energy_curve)?;
        info!(path = %path.display(), levels = aggregate.mean_energy_curve.len(), "wrote mean energy curve");
    }

    if matches.get_flag("json") {
        println!("{}", summary.to_json()?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn load_settings(matches: &ArgMatches) -> Result<SolverSettings> {
    let mut settings = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SolverSettings::from_json_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SolverSettings::default(),
    };

    if let Some(&t) = matches.get_one::<f64>("initial-temp") {
        settings.initial_temp = t;
    }
    if let Some(&t) = matches.get_one::<f64>("min-temp") {
        settings.min_temp = t;
    }
    if let Some(&alpha) = matches.get_one::<f64>("cooling-rate") {
        settings.cooling_rate = alpha;
    }
    if let Some(&n) = matches.get_one::<usize>("sa-max") {
        settings.sa_max = n;
    }
    if let Some(&n) = matches.get_one::<usize>("max-iterations") {
        settings.max_iterations = Some(n);
    }
    if matches.get_flag("no-iteration-cap") {
        settings.max_iterations = None;
    }
    if let Some(&n) = matches.get_one::<usize>("executions") {
        settings.num_executions = n;
    }
    if let Some(policy) = matches.get_one::<String>("policy") {
        settings.acceptance_policy = match policy.as_str() {
            "metropolis" => AcceptancePolicy::Metropolis,
            _ => AcceptancePolicy::StrictImprovement,
        };
    }
    if let Some(&k) = matches.get_one::<usize>("arity") {
        settings.clause_arity_filter = Some(k);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        settings.seed = Some(seed);
    }
    if matches.get_flag("parallel") {
        settings.parallel = true;
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = cli()
            .try_get_matches_from([
                "sat-anneal",
                "uf20-01.cnf",
                "--sa-max",
                "25",
                "--policy",
                "metropolis",
                "--no-iteration-cap",
                "--seed",
                "9",
                "--arity",
                "3",
            ])
            .unwrap();
        let settings = load_settings(&matches).unwrap();
        assert_eq!(settings.sa_max, 25);
        assert_eq!(settings.acceptance_policy, AcceptancePolicy::Metropolis);
        assert_eq!(settings.max_iterations, None);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.clause_arity_filter, Some(3));
        assert_eq!(settings.num_executions, 1000);
    }

    #[test]
    fn test_cap_flags_conflict() {
        let result = cli().try_get_matches_from([
            "sat-anneal",
            "x.cnf",
            "--max-iterations",
            "5",
            "--no-iteration-cap",
        ]);
        assert!(result.is_err());
    }
}
