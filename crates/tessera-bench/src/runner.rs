use std::hint::black_box;
use std::time::Instant;

use tessera_core::error::GridError;
use tessera_mesh::ChunkMesher;

use crate::scenes::{self, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub chunk_size: usize,
    pub solid_voxels: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub iterations: u32,
    pub timings: TimingSeries,
}

/// Meshes each scene's grid repeatedly on the CPU and times every pass.
#[derive(Debug)]
pub struct BenchmarkRunner {
    mesher: ChunkMesher,
    iterations: u32,
}

impl BenchmarkRunner {
    pub fn new(iterations: u32) -> Self {
        Self {
            mesher: ChunkMesher::new(),
            iterations,
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<BenchmarkResult, GridError> {
        log::info!(
            "Running scene '{}' ({} iterations)...",
            config.name,
            self.iterations
        );

        let grid = scenes::build_scene_grid(config)?;
        let solid_voxels = grid.solid_count();

        // Warm-up pass; also yields the output sizes
        let mesh = self.mesher.mesh(&grid);
        let (vertex_count, index_count) = (mesh.vertex_count(), mesh.index_count());
        drop(mesh);

        let mut frame_times = Vec::with_capacity(self.iterations as usize);
        for _ in 0..self.iterations {
            let start = Instant::now();
            let mesh = self.mesher.mesh(black_box(&grid));
            black_box(&mesh);
            frame_times.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, {} vertices",
            timings.mean_ms,
            timings.p95_ms,
            vertex_count
        );

        Ok(BenchmarkResult {
            scene_name: config.name.clone(),
            chunk_size: config.chunk_size,
            solid_voxels,
            vertex_count,
            index_count,
            iterations: self.iterations,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: nearest_rank(&sorted, 0.95),
        p99_ms: nearest_rank(&sorted, 0.99),
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

/// Nearest-rank percentile of ascending, non-empty samples: the value at
/// 1-based rank `ceil(n * p)`.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() as f64 * p).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::ScenePattern;

    #[test]
    fn test_compute_timings_empty() {
        let t = compute_timings(&[]);
        assert_eq!(t.mean_ms, 0.0);
        assert_eq!(t.max_ms, 0.0);
    }

    #[test]
    fn test_compute_timings_odd_and_even() {
        let t = compute_timings(&[3.0, 1.0, 2.0]);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 3.0);
        assert_eq!(t.median_ms, 2.0);
        assert_eq!(t.mean_ms, 2.0);

        let t = compute_timings(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(t.median_ms, 2.5);
        assert_eq!(t.p95_ms, 4.0);
        assert_eq!(t.p99_ms, 4.0);
    }

    #[test]
    fn test_percentiles_on_hundred_samples() {
        let times: Vec<f64> = (1..=100).map(f64::from).collect();
        let t = compute_timings(&times);
        assert_eq!(t.p95_ms, 95.0);
        assert_eq!(t.p99_ms, 99.0);
        assert_eq!(t.median_ms, 50.5);
    }

    #[test]
    fn test_percentiles_use_nearest_rank() {
        let times: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        let t = compute_timings(&times);
        assert_eq!(t.p95_ms, 19.0);
        assert_eq!(t.p99_ms, 20.0);

        let single = compute_timings(&[7.5]);
        assert_eq!(single.p95_ms, 7.5);
        assert_eq!(single.p99_ms, 7.5);
    }

    #[test]
    fn test_run_scene_reports_mesh_sizes() {
        let runner = BenchmarkRunner::new(3);
        let config = SceneConfig {
            name: "solid-4".to_string(),
            pattern: ScenePattern::Solid,
            chunk_size: 4,
        };
        let result = runner.run_scene(&config).expect("valid scene");
        assert_eq!(result.scene_name, "solid-4");
        assert_eq!(result.solid_voxels, 64);
        assert_eq!(result.vertex_count, 64 * 24);
        assert_eq!(result.index_count, 64 * 36);
        assert_eq!(result.iterations, 3);
        assert!(result.timings.min_ms <= result.timings.max_ms);
    }
}
