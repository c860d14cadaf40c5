//! Feeds configured surfaces through the worker pool.

use relief_config::SurfaceConfig;
use relief_mesh::{SurfacePipeline, SurfaceResult, SurfaceSource, SurfaceTask, default_worker_count};
use tracing::debug;

/// Layer paths of a configured surface.
pub fn source_of(surface: &SurfaceConfig) -> SurfaceSource {
    SurfaceSource {
        elevation: surface.elevation.clone(),
        thickness: surface.thickness.clone(),
        temperature: surface.temperature.clone(),
    }
}

/// Build every surface, returning results in input order.
///
/// `workers == 0` uses one worker per CPU. At most `budget` surfaces are queued
/// at once; further submissions wait for earlier results.
pub fn build_surfaces(
    surfaces: &[&SurfaceConfig],
    workers: usize,
    budget: usize,
) -> Vec<SurfaceResult> {
    let workers = match workers {
        0 => default_worker_count(),
        n => n,
    }
    .min(surfaces.len().max(1));
    debug!(workers, budget, count = surfaces.len(), "Starting surface pipeline");

    let pipeline = SurfacePipeline::new(workers, budget);
    let mut results = Vec::with_capacity(surfaces.len());
    let mut outstanding = 0;

    for surface in surfaces {
        let task = SurfaceTask {
            name: surface.name.clone(),
            source: source_of(surface),
        };
        while !pipeline.submit(task.clone()) {
            let done = pipeline.wait_for(1);
            if done.is_empty() {
                break;
            }
            outstanding -= done.len();
            results.extend(done);
        }
        outstanding += 1;
    }
    results.extend(pipeline.wait_for(outstanding));

    results.sort_by_key(|r| surfaces.iter().position(|s| s.name == r.name));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_grid(dir: &Path, name: &str, rows: usize) -> std::path::PathBuf {
        let mut text = format!(
            "ncols 2\nnrows {rows}\nxllcorner 0\nyllcorner 0\ncellsize 1\nNODATA_value -9999\n"
        );
        for r in 0..rows {
            text.push_str(&format!("{r} {}\n", r + 1));
        }
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_source_of_copies_paths() {
        let mut surface = SurfaceConfig::new("s", "dem.asc");
        surface.temperature = Some("t.asc".into());
        let source = source_of(&surface);
        assert_eq!(source.elevation, Path::new("dem.asc"));
        assert!(source.thickness.is_none());
        assert_eq!(source.temperature.as_deref(), Some(Path::new("t.asc")));
    }

    #[test]
    fn test_results_follow_input_order_beyond_budget() {
        let dir = tempfile::tempdir().unwrap();
        let configs: Vec<SurfaceConfig> = (1..=5)
            .map(|n| SurfaceConfig::new(format!("s{n}"), write_grid(dir.path(), &format!("{n}.asc"), n)))
            .collect();
        let refs: Vec<&SurfaceConfig> = configs.iter().collect();

        let results = build_surfaces(&refs, 2, 1);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["s1", "s2", "s3", "s4", "s5"]);
        for (n, result) in (1..=5).zip(&results) {
            let surface = result.surface.as_ref().unwrap();
            assert_eq!(surface.mesh().triangle_count(), 2 * 2 * n);
        }
    }

    #[test]
    fn test_failures_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SurfaceConfig::new("missing", dir.path().join("none.asc"));
        let results = build_surfaces(&[&missing], 0, 4);
        assert_eq!(results.len(), 1);
        assert!(results[0].surface.is_err());
    }
}
