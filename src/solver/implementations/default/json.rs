use super::*;
use crate::algebra::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// One (step, gap, kkt) record as written to JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct JsonRecord<T: FloatT> {
    pub step: u32,
    #[serde(flatten)]
    pub info: ConvergenceInfo<T>,
}

/// The convergence history of a solve, without the iterate snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct JsonTrajectory<T: FloatT> {
    pub records: Vec<JsonRecord<T>>,
    pub restart_idx: Vec<u32>,
}

impl<T> JsonTrajectory<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let trajectory = serde_json::from_str(&buffer)?;
        Ok(trajectory)
    }
}

impl<T> Recorder<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Write the recorded convergence history and restart indices as JSON.
    pub fn write_to_json(&self, file: &mut File) -> Result<(), io::Error> {
        let json_data = JsonTrajectory {
            records: self
                .entries()
                .iter()
                .map(|e| JsonRecord {
                    step: e.step,
                    info: e.info,
                })
                .collect(),
            restart_idx: self.restart_indices().to_vec(),
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let mut recorder = Recorder::<f64>::new(3);
    let mut iterates = Iterates::new(2, 1);
    iterates.info = ConvergenceInfo::new(0.5, None);
    recorder.append(&iterates).unwrap();
    iterates.count = 31;
    iterates.info = ConvergenceInfo::new(0.125, Some(1e-3));
    recorder.append(&iterates).unwrap();
    recorder.push_restart(30);

    let mut file = tempfile::tempfile().unwrap();
    recorder.write_to_json(&mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let trajectory = JsonTrajectory::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(trajectory.restart_idx, vec![30]);
    assert_eq!(trajectory.records.len(), 2);
    assert_eq!(trajectory.records[1].step, 30);
    assert_eq!(trajectory.records[1].info.normalized_duality_gap, Some(1e-3));
    assert_eq!(trajectory.records[0].info.normalized_duality_gap, None);
}
