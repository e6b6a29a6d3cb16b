use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Load a baseline from a JSON file. Returns None if the file is missing or unreadable.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(baseline) => Some(baseline),
        Err(e) => {
            log::warn!("Ignoring malformed baseline {}: {e}", path.display());
            None
        }
    }
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// A scene whose mean meshing time grew past the threshold, with the
/// geometry drift that may explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene_name: String,
    pub baseline_mean_ms: f64,
    pub current_mean_ms: f64,
    pub pct_change: f64,
    /// Current minus baseline vertex count.
    pub vertex_delta: i64,
    /// Current minus baseline index count.
    pub index_delta: i64,
}

impl Regression {
    /// Same scene produced the same buffers in both runs.
    pub fn same_geometry(&self) -> bool {
        self.vertex_delta == 0 && self.index_delta == 0
    }
}

fn count_delta(current: usize, baseline: usize) -> i64 {
    current as i64 - baseline as i64
}

/// Scenes whose mean time rose more than `threshold_pct` over the baseline.
/// Scenes missing from the baseline are skipped.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    current
        .iter()
        .filter_map(|result| {
            let base = baseline
                .results
                .iter()
                .find(|b| b.scene_name == result.scene_name)?;
            // Sub-timer-resolution scenes (e.g. empty) have no meaningful ratio
            if base.timings.mean_ms <= 0.0 {
                return None;
            }
            let pct_change = (result.timings.mean_ms / base.timings.mean_ms - 1.0) * 100.0;
            (pct_change > threshold_pct).then(|| Regression {
                scene_name: result.scene_name.clone(),
                baseline_mean_ms: base.timings.mean_ms,
                current_mean_ms: result.timings.mean_ms,
                pct_change,
                vertex_delta: count_delta(result.vertex_count, base.vertex_count),
                index_delta: count_delta(result.index_count, base.index_count),
            })
        })
        .collect()
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Solid | Vertices | Indices | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Min (ms) | Max (ms) |\n");
    out.push_str("|-------|-------|----------|---------|-----------|-------------|----------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.solid_voxels,
            r.vertex_count,
            r.index_count,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.min_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Plain-text verdict for a baseline comparison. Each regressed scene gets
/// one line with its timing change and vertex/index drift.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!("Mesh timings within +{threshold_pct:.0}% of baseline.\n");
    }
    let mut out = format!(
        "{} scene(s) slower than baseline by more than {threshold_pct:.0}%:\n",
        regressions.len()
    );
    for r in regressions {
        let geometry = if r.same_geometry() {
            "geometry unchanged".to_string()
        } else {
            format!("vertices {:+}, indices {:+}", r.vertex_delta, r.index_delta)
        };
        out.push_str(&format!(
            "  {}: {:.3} ms -> {:.3} ms ({:+.1}%), {geometry}\n",
            r.scene_name, r.baseline_mean_ms, r.current_mean_ms, r.pct_change
        ));
    }
    out
}
