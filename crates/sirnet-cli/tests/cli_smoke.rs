use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::tempdir;

fn sirnet() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sirnet"))
}

fn write_ring(dir: &Path, nodes: usize) -> PathBuf {
    let graph = dir.join("ring.edges");
    let edges: String = (0..nodes)
        .map(|node| format!("{node} {}\n", (node + 1) % nodes))
        .collect();
    fs::write(&graph, edges).unwrap();
    graph
}

#[test]
fn run_align_and_summarize_a_small_ring() {
    let dir = tempdir().unwrap();
    let graph = write_ring(dir.path(), 12);
    let plan = dir.path().join("plan.yaml");
    fs::write(
        &plan,
        "epidemic:\n  infection_rate: 2.0\n  recovery_rate: 1.0\n  horizon: 30.0\nruns: 2\noutput:\n  prefix: ring\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    let status = sirnet()
        .arg("run")
        .arg("--graph")
        .arg(&graph)
        .arg("--plan")
        .arg(&plan)
        .arg("--out")
        .arg(&out)
        .args(["--seed", "11"])
        .status()
        .expect("run sirnet run");
    assert!(status.success(), "run command failed");
    for name in ["ring-0.csv", "ring-1.csv", "ring-0.json", "ring-1.json", "plan.yaml"] {
        assert!(out.join(name).exists(), "missing {name}");
    }

    let aligned = out.join("ring-0-aligned.csv");
    let status = sirnet()
        .arg("align")
        .arg("--input")
        .arg(out.join("ring-0.csv"))
        .args(["--threshold", "1", "--criterion", "I"])
        .arg("--out")
        .arg(&aligned)
        .status()
        .expect("run sirnet align");
    assert!(status.success(), "align command failed");
    let header = fs::read_to_string(&aligned).unwrap();
    assert!(header.starts_with("time,Susceptible,Infected,Recovered,time_adj"));

    let output = sirnet()
        .arg("summarize")
        .arg("--input")
        .arg(out.join("ring-0.csv"))
        .arg("--input")
        .arg(&aligned)
        .output()
        .expect("run sirnet summarize");
    assert!(output.status.success(), "summarize command failed");
    let summaries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["total_nodes"], 12);
    assert_eq!(summaries[0], {
        let mut second = summaries[1].clone();
        second["file"] = summaries[0]["file"].clone();
        second
    });
}

#[test]
fn run_threshold_writes_aligned_series() {
    let dir = tempdir().unwrap();
    let graph = write_ring(dir.path(), 10);
    let out = dir.path().join("out");
    let status = sirnet()
        .arg("run")
        .arg("--graph")
        .arg(&graph)
        .arg("--out")
        .arg(&out)
        .args(["--runs", "2", "--threshold", "1"])
        .status()
        .expect("run sirnet run");
    assert!(status.success(), "run command failed");
    for run in 0..2 {
        let aligned = fs::read_to_string(out.join(format!("run-{run}-aligned.csv"))).unwrap();
        let mut lines = aligned.lines();
        assert_eq!(
            lines.next(),
            Some("time,Susceptible,Infected,Recovered,time_adj")
        );
        assert_eq!(lines.next(), Some("0,9,1,0,0"));

        let manifest: serde_json::Value =
            serde_json::from_slice(&fs::read(out.join(format!("run-{run}.json"))).unwrap())
                .unwrap();
        assert_eq!(
            manifest["aligned_file"],
            serde_json::json!(format!("run-{run}-aligned.csv"))
        );
        assert_eq!(manifest["alignment_offset"], serde_json::json!(0.0));
    }
}

#[test]
fn run_has_no_time_column_option() {
    let dir = tempdir().unwrap();
    let graph = write_ring(dir.path(), 10);
    let out = dir.path().join("out");
    let status = sirnet()
        .arg("run")
        .arg("--graph")
        .arg(&graph)
        .arg("--out")
        .arg(&out)
        .args(["--threshold", "1", "--time-column", "time_adj"])
        .status()
        .expect("run sirnet run");
    assert!(!status.success());
    assert!(!out.exists());
}

#[test]
fn rejected_plans_leave_no_output() {
    let dir = tempdir().unwrap();
    let graph = write_ring(dir.path(), 10);
    let cases = [
        "alignment:\n  threshold: 1\n  time_column: time_adj\n",
        "epidemic:\n  initial_infected: 11\n",
        "epidemic:\n  recovery_rate: 0.0\n",
    ];
    for (index, plan_text) in cases.iter().enumerate() {
        let plan = dir.path().join(format!("plan-{index}.yaml"));
        fs::write(&plan, plan_text).unwrap();
        let out = dir.path().join(format!("out-{index}"));
        let status = sirnet()
            .arg("run")
            .arg("--graph")
            .arg(&graph)
            .arg("--plan")
            .arg(&plan)
            .arg("--out")
            .arg(&out)
            .status()
            .expect("run sirnet run");
        assert!(!status.success(), "plan {index} should be rejected");
        assert!(!out.exists(), "plan {index} left output behind");
    }
}

#[test]
fn unreachable_threshold_fails_alignment() {
    let dir = tempdir().unwrap();
    let series = dir.path().join("series.csv");
    fs::write(
        &series,
        "time,Susceptible,Infected,Recovered\n0,3,1,0\n1,3,0,1\n",
    )
    .unwrap();
    let status = sirnet()
        .arg("align")
        .arg("--input")
        .arg(&series)
        .args(["--threshold", "2"])
        .arg("--out")
        .arg(dir.path().join("aligned.csv"))
        .status()
        .expect("run sirnet align");
    assert!(!status.success());
}

#[test]
fn version_prints_package_version() {
    let output = sirnet().arg("version").output().expect("run sirnet version");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        env!("CARGO_PKG_VERSION")
    );
}
