use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::report::{Report, ReportKind};

/// Report metadata plus the artifact directory. Metadata is volatile
/// (in-process); the PDF artifacts live on disk under `dir`.
#[derive(Clone)]
pub struct ReportStore {
    reports: Arc<Mutex<Vec<Report>>>,
    dir: PathBuf,
}

impl ReportStore {
    /// Opens the store, creating the artifact directory if missing.
    pub fn open(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            dir: dir.canonicalize()?,
        })
    }

    pub fn list(&self) -> Vec<Report> {
        self.reports.lock().expect("report store poisoned").clone()
    }

    pub fn get(&self, id: Uuid) -> Result<Report, AppError> {
        self.reports
            .lock()
            .expect("report store poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))
    }

    /// Writes the rendered artifact and records its metadata. The write
    /// happens first: no metadata record ever points at a file that was not
    /// persisted.
    pub fn create(
        &self,
        kind: ReportKind,
        description: String,
        pdf_bytes: &[u8],
    ) -> Result<Report, AppError> {
        let id = Uuid::new_v4();
        let file_path = self.artifact_path(id);
        fs::write(&file_path, pdf_bytes)?;

        let name = match kind {
            ReportKind::Generated => "Generated Report",
            ReportKind::FromText => "API Report",
        };

        let report = Report {
            id,
            name: name.to_string(),
            description,
            kind,
            file_path,
            file_size: pdf_bytes.len() as u64,
            generated_at: Utc::now(),
        };

        self.reports
            .lock()
            .expect("report store poisoned")
            .push(report.clone());
        Ok(report)
    }

    /// Reads the artifact bytes for a report.
    pub fn read_artifact(&self, id: Uuid) -> Result<(Report, Vec<u8>), AppError> {
        let report = self.get(id)?;
        let bytes = fs::read(&report.file_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                AppError::NotFound(format!("Artifact for report {id} is missing"))
            } else {
                AppError::Io(e)
            }
        })?;
        Ok((report, bytes))
    }

    /// Deletes a report's artifact and metadata. An already-missing artifact
    /// is tolerated; an unknown id is not.
    pub fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut reports = self.reports.lock().expect("report store poisoned");
        let position = reports
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;

        match fs::remove_file(&reports[position].file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Io(e)),
        }

        reports.remove(position);
        Ok(())
    }

    fn artifact_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("report_{id}.pdf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> (tempfile::TempDir, ReportStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path().join("reports")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_directory_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports");
        ReportStore::open(path.clone()).unwrap();
        ReportStore::open(path.clone()).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_create_writes_artifact_and_captures_size() {
        let (_dir, store) = make_store();
        let bytes = b"%PDF-1.4 fake";
        let report = store
            .create(ReportKind::FromText, "hello".to_string(), bytes)
            .unwrap();

        assert_eq!(report.name, "API Report");
        assert_eq!(report.description, "hello");
        assert_eq!(report.file_size, bytes.len() as u64);
        assert!(report.file_path.is_file());
        assert_eq!(fs::read(&report.file_path).unwrap(), bytes);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_create_failure_leaves_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::open(dir.path().join("reports")).unwrap();
        // Remove the directory out from under the store to force a write failure.
        fs::remove_dir_all(dir.path().join("reports")).unwrap();

        let result = store.create(ReportKind::Generated, String::new(), b"%PDF");
        assert!(result.is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_removes_metadata_and_artifact() {
        let (_dir, store) = make_store();
        let report = store
            .create(ReportKind::Generated, String::new(), b"%PDF")
            .unwrap();

        store.delete(report.id).unwrap();
        assert!(store.list().is_empty());
        assert!(!report.file_path.exists());
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let (_dir, store) = make_store();
        let report = store
            .create(ReportKind::Generated, String::new(), b"%PDF")
            .unwrap();

        store.delete(report.id).unwrap();
        assert!(matches!(
            store.delete(report.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_tolerates_missing_artifact() {
        let (_dir, store) = make_store();
        let report = store
            .create(ReportKind::Generated, String::new(), b"%PDF")
            .unwrap();

        fs::remove_file(&report.file_path).unwrap();
        store.delete(report.id).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_read_artifact_missing_file_is_not_found() {
        let (_dir, store) = make_store();
        let report = store
            .create(ReportKind::Generated, String::new(), b"%PDF")
            .unwrap();

        fs::remove_file(&report.file_path).unwrap();
        assert!(matches!(
            store.read_artifact(report.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (_dir, store) = make_store();
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }
}
