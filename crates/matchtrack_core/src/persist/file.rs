use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::{GatewayError, PersistenceGateway, SaveAck, SessionPatch, StoredSession};
use crate::models::MatchSession;

/// Document store backed by one JSON file per match.
///
/// Writes are atomic: serialize to a temp file, flush, fsync, then rename
/// over the real path, so readers never observe a partial document.
pub struct JsonFileGateway {
    dir: PathBuf,
}

impl JsonFileGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a fresh record, failing if the match already exists.
    pub fn create(&self, match_id: &str, session: MatchSession) -> Result<(), GatewayError> {
        let path = self.path_for(match_id);
        if path.exists() {
            return Err(GatewayError::AlreadyExists { match_id: match_id.to_string() });
        }
        self.write_record(&path, &StoredSession::new(session))
    }

    pub fn exists(&self, match_id: &str) -> bool {
        self.path_for(match_id).exists()
    }

    fn path_for(&self, match_id: &str) -> PathBuf {
        self.dir.join(format!("{match_id}.json"))
    }

    fn read_record(&self, path: &Path, match_id: &str) -> Result<StoredSession, GatewayError> {
        if !path.exists() {
            return Err(GatewayError::NotFound { match_id: match_id.to_string() });
        }
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let record = serde_json::from_str(&data)?;
        log::debug!("loaded {} bytes from {:?}", data.len(), path);
        Ok(record)
    }

    fn write_record(&self, path: &Path, record: &StoredSession) -> Result<(), GatewayError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(record)?;
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }
        rename(&temp_path, path)?;

        log::debug!("saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn load(&self, match_id: &str) -> Result<StoredSession, GatewayError> {
        self.read_record(&self.path_for(match_id), match_id)
    }

    fn save(&mut self, match_id: &str, patch: SessionPatch) -> Result<SaveAck, GatewayError> {
        let path = self.path_for(match_id);
        let mut record = self.read_record(&path, match_id)?;
        let applied = record.apply_patch(patch);
        if applied {
            self.write_record(&path, &record)?;
        }
        Ok(SaveAck { applied, seq: record.last_seq })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ByPeriod, Period};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn patch(seq: u64, local_score: u32) -> SessionPatch {
        SessionPatch {
            seq,
            is_finished: false,
            current_period: Period::FirstHalf,
            local_score,
            visitor_score: 0,
            events: Vec::new(),
            timeouts: ByPeriod::default(),
            player_stats: HashMap::new(),
            opponent_stats: Default::default(),
        }
    }

    #[test]
    fn create_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let gw = JsonFileGateway::new(dir.path());

        gw.create("m1", MatchSession::new("Lions", "Tigers", "Lions")).unwrap();
        let stored = gw.load("m1").unwrap();
        assert_eq!(stored.session.local_team_name, "Lions");
        assert_eq!(stored.last_seq, 0);
    }

    #[test]
    fn create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let gw = JsonFileGateway::new(dir.path());
        gw.create("m1", MatchSession::new("Lions", "Tigers", "Lions")).unwrap();
        assert!(matches!(
            gw.create("m1", MatchSession::new("Lions", "Tigers", "Lions")),
            Err(GatewayError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn save_merges_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let mut gw = JsonFileGateway::new(dir.path());
        gw.create("m1", MatchSession::new("Lions", "Tigers", "Lions")).unwrap();

        let ack = gw.save("m1", patch(1, 3)).unwrap();
        assert!(ack.applied);

        let stored = gw.load("m1").unwrap();
        assert_eq!(stored.session.local_score, 3);
        assert_eq!(stored.last_seq, 1);
        assert!(!dir.path().join("m1.tmp").exists());
    }

    #[test]
    fn stale_patch_is_not_written() {
        let dir = TempDir::new().unwrap();
        let mut gw = JsonFileGateway::new(dir.path());
        gw.create("m1", MatchSession::new("Lions", "Tigers", "Lions")).unwrap();

        gw.save("m1", patch(5, 1)).unwrap();
        let ack = gw.save("m1", patch(4, 7)).unwrap();
        assert!(!ack.applied);
        assert_eq!(gw.load("m1").unwrap().session.local_score, 1);
    }

    #[test]
    fn missing_match_is_not_found() {
        let dir = TempDir::new().unwrap();
        let gw = JsonFileGateway::new(dir.path());
        assert!(matches!(gw.load("ghost"), Err(GatewayError::NotFound { .. })));
    }
}
