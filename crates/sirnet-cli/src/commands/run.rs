use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use sirnet_core::{ContactGraph, RngHandle, RunProvenance, SchemaVersion, SirError, Status};
use sirnet_epi::determinism::run_seed;
use sirnet_epi::export::{save_aligned_csv, save_series_csv};
use sirnet_epi::manifest::RunManifest;
use sirnet_epi::{align, AlignmentConfig, RunPlan, SeriesSummary, Simulation, TimeColumn};
use sirnet_graph::{
    canonical_hash, network_from_bytes, network_from_json, read_edge_list, ContactNetwork,
};
use tracing::{info, warn};

use super::display_name;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Contact network: an edge list, or `.json`/`.bin` produced by sirnet-graph.
    #[arg(long)]
    pub graph: PathBuf,
    /// YAML run plan. Defaults apply when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Output directory for series, aligned series and manifests.
    #[arg(long)]
    pub out: PathBuf,
    /// Overrides the plan's master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Overrides the plan's number of runs.
    #[arg(long)]
    pub runs: Option<usize>,
    /// Aligns every run on this count of the plan's criterion compartment.
    #[arg(long)]
    pub threshold: Option<usize>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let plan = resolve_plan(args)?;
    let graph = load_graph(&args.graph)?;
    let graph_hash = canonical_hash(&graph);
    plan.epidemic.validate(graph.node_count())?;
    let config_hash = plan.epidemic.canonical_hash()?;
    fs::create_dir_all(&args.out)?;
    fs::write(args.out.join("plan.yaml"), plan.to_yaml()?)?;

    info!(
        graph = %args.graph.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        runs = plan.runs,
        seed = plan.seed,
        "starting batch"
    );

    for run_index in 0..plan.runs {
        let seed = run_seed(plan.seed, run_index);
        let mut sampler = RngHandle::from_seed(seed);
        let mut simulation = Simulation::new(&graph, &plan.epidemic, &mut sampler)?;
        simulation.run_to_end();
        let stats = simulation.stats().clone();
        let series = simulation.finish();
        let summary = SeriesSummary::from_series(&series);

        let stem = format!("{}-{run_index}", plan.output.prefix);
        let series_path = args.out.join(format!("{stem}.csv"));
        save_series_csv(&series, &series_path)?;

        let mut aligned_file = None;
        let mut alignment_offset = None;
        if let Some(alignment) = &plan.alignment {
            match align(
                &series,
                alignment.threshold,
                alignment.criterion,
                TimeColumn::Time,
            ) {
                Ok(aligned) => {
                    let aligned_path = args.out.join(format!("{stem}-aligned.csv"));
                    save_aligned_csv(&aligned, &aligned_path)?;
                    aligned_file = Some(PathBuf::from(display_name(&aligned_path)));
                    alignment_offset = Some(aligned.offset());
                }
                Err(SirError::ThresholdNeverReached(detail)) => {
                    warn!(run = run_index, %detail, "skipping alignment");
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(
            run = run_index,
            seed,
            snapshots = summary.snapshots,
            peak_infected = summary.peak_infected,
            final_size = summary.final_size,
            duration = summary.duration,
            discarded = stats.discarded,
            "run complete"
        );

        if plan.output.manifest {
            let manifest = RunManifest {
                config: plan.epidemic.clone(),
                provenance: RunProvenance {
                    schema_version: SchemaVersion::default(),
                    config_hash: config_hash.clone(),
                    graph_hash: graph_hash.clone(),
                    seed,
                    run_index: run_index as u64,
                    tool_versions: tool_versions(),
                },
                series_file: PathBuf::from(display_name(&series_path)),
                aligned_file,
                alignment_offset,
                summary,
                stats,
            };
            manifest.write(&args.out.join(format!("{stem}.json")))?;
        }
    }
    Ok(())
}

fn resolve_plan(args: &RunArgs) -> Result<RunPlan, Box<dyn Error>> {
    let mut plan = match &args.plan {
        Some(path) => RunPlan::from_yaml(&fs::read_to_string(path)?)?,
        None => RunPlan::default(),
    };
    if let Some(seed) = args.seed {
        plan.seed = seed;
    }
    if let Some(runs) = args.runs {
        plan.runs = runs;
    }
    if let Some(threshold) = args.threshold {
        plan.alignment = Some(AlignmentConfig {
            threshold,
            criterion: plan
                .alignment
                .as_ref()
                .map(|alignment| alignment.criterion)
                .unwrap_or(Status::Infected),
        });
    }
    Ok(plan)
}

fn load_graph(path: &Path) -> Result<ContactNetwork, Box<dyn Error>> {
    let graph = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => network_from_json(&fs::read_to_string(path)?)?,
        Some("bin") => network_from_bytes(&fs::read(path)?)?,
        _ => read_edge_list(path)?,
    };
    Ok(graph)
}

fn tool_versions() -> BTreeMap<String, String> {
    let mut versions = BTreeMap::new();
    versions.insert("sirnet".to_string(), env!("CARGO_PKG_VERSION").to_string());
    versions
}
