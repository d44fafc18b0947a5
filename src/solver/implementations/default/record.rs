use super::*;
use crate::algebra::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type returned by trajectory recording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Trajectory is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("Record index {index} out of range for trajectory of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A single trajectory record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryEntry<T> {
    /// step index (count - 1) at which the record was taken
    pub step: u32,
    /// independent copy of the iterates
    pub iterates: Iterates<T>,
    pub info: ConvergenceInfo<T>,
}

/// Fixed capacity, append-only record of a solve.
///
/// Also holds the step indices at which restarts fired.
#[derive(Debug, Clone)]
pub struct Recorder<T = f64> {
    entries: Vec<TrajectoryEntry<T>>,
    capacity: usize,
    restart_idx: Vec<u32>,
}

impl<T> Recorder<T>
where
    T: FloatT,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            restart_idx: Vec::new(),
        }
    }

    /// Append a snapshot of `iterates` and their latest convergence info.
    pub fn append(&mut self, iterates: &Iterates<T>) -> Result<(), RecordError> {
        if self.entries.len() >= self.capacity {
            return Err(RecordError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.entries.push(TrajectoryEntry {
            step: iterates.step(),
            iterates: iterates.clone(),
            info: iterates.info,
        });
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&TrajectoryEntry<T>, RecordError> {
        self.entries.get(index).ok_or(RecordError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[TrajectoryEntry<T>] {
        &self.entries
    }

    pub fn push_restart(&mut self, step: u32) {
        self.restart_idx.push(step);
    }

    pub fn restart_indices(&self) -> &[u32] {
        &self.restart_idx
    }

    /// Write `step,normalized_duality_gap,kkt_error` rows to
    /// `<dir>/<method>/<dataset>/<filename>.csv`, creating directories
    /// as needed.  An absent gap is written as `nan`.
    pub fn save_convergence_info(
        &self,
        dir: impl AsRef<Path>,
        method: &str,
        dataset: &str,
        filename: &str,
    ) -> io::Result<PathBuf> {
        let path = output_path(dir.as_ref(), method, dataset, &format!("{filename}.csv"))?;
        let mut out = BufWriter::new(File::create(&path)?);

        writeln!(out, "step,normalized_duality_gap,kkt_error")?;
        for entry in &self.entries {
            let gap = match entry.info.normalized_duality_gap {
                Some(gap) => format!("{gap:.10e}"),
                None => "nan".to_string(),
            };
            writeln!(out, "{},{},{:.10e}", entry.step, gap, entry.info.kkt_error)?;
        }
        out.flush()?;
        Ok(path)
    }

    /// Write one restart index per line to
    /// `<dir>/<method>/<dataset>/<filename>_restart_idx.csv`.
    pub fn save_restart_indices(
        &self,
        dir: impl AsRef<Path>,
        method: &str,
        dataset: &str,
        filename: &str,
    ) -> io::Result<PathBuf> {
        let path = output_path(
            dir.as_ref(),
            method,
            dataset,
            &format!("{filename}_restart_idx.csv"),
        )?;
        let mut out = BufWriter::new(File::create(&path)?);
        for idx in &self.restart_idx {
            writeln!(out, "{idx}")?;
        }
        out.flush()?;
        Ok(path)
    }
}

fn output_path(dir: &Path, method: &str, dataset: &str, file: &str) -> io::Result<PathBuf> {
    let dir = dir.join(method).join(dataset);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(step: u32, kkt: f64, gap: Option<f64>) -> Iterates<f64> {
        let mut iterates = Iterates::new(2, 1);
        iterates.count = step + 1;
        iterates.info = ConvergenceInfo::new(kkt, gap);
        iterates
    }

    #[test]
    fn test_append_and_get() {
        let mut recorder = Recorder::new(2);
        recorder.append(&snapshot(0, 1.0, None)).unwrap();
        recorder.append(&snapshot(30, 0.5, Some(0.1))).unwrap();

        assert_eq!(
            recorder.append(&snapshot(60, 0.1, None)),
            Err(RecordError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.get(1).unwrap().step, 30);
        assert_eq!(recorder.get(1).unwrap().info.normalized_duality_gap, Some(0.1));
        assert_eq!(
            recorder.get(2).unwrap_err(),
            RecordError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut recorder = Recorder::new(1);
        let mut iterates = snapshot(0, 1.0, None);
        recorder.append(&iterates).unwrap();
        iterates.z[0] = 42.0;
        assert_eq!(recorder.get(0).unwrap().iterates.z[0], 0.0);
    }

    #[test]
    fn test_save_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::new(4);
        recorder.append(&snapshot(0, 2.0, None)).unwrap();
        recorder.append(&snapshot(30, 0.25, Some(0.5))).unwrap();
        recorder.push_restart(30);
        recorder.push_restart(60);

        let path = recorder
            .save_convergence_info(dir.path(), "adaptive", "example_lp", "run")
            .unwrap();
        assert_eq!(path, dir.path().join("adaptive/example_lp/run.csv"));
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "step,normalized_duality_gap,kkt_error");
        assert_eq!(lines[1], "0,nan,2.0000000000e0");
        assert_eq!(lines[2], "30,5.0000000000e-1,2.5000000000e-1");

        let path = recorder
            .save_restart_indices(dir.path(), "adaptive", "example_lp", "run")
            .unwrap();
        assert!(path.ends_with("run_restart_idx.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "30\n60\n");
    }
}
