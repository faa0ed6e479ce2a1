//! Line-list store: reads and writes the flat list files shared with the
//! build environment.
//!
//! Pure I/O and parsing. Dedup policy belongs to the callers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{RelativePath, TargetRecord},
    error::FirmkitResult,
};

/// Access to line-list files under one project directory.
#[derive(Clone)]
pub struct LineListStore {
    filesystem: Arc<dyn Filesystem>,
    project_dir: PathBuf,
}

impl LineListStore {
    pub fn new(filesystem: Arc<dyn Filesystem>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Host path of a project-relative file.
    pub fn path_of(&self, path: &RelativePath) -> PathBuf {
        path.under(&self.project_dir)
    }

    pub fn exists(&self, path: &RelativePath) -> bool {
        self.filesystem.exists(&self.path_of(path))
    }

    /// Lines of a list file in stored order, duplicates kept.
    ///
    /// Line terminators are stripped and blank lines skipped.
    #[instrument(skip(self), fields(path = %path))]
    pub fn read_list(&self, path: &RelativePath) -> FirmkitResult<Vec<String>> {
        let content = self.filesystem.read_to_string(&self.path_of(path))?;
        let lines: Vec<String> = content
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        debug!(entries = lines.len(), "Read list");
        Ok(lines)
    }

    /// Key → values records. A repeated key replaces the earlier one.
    #[instrument(skip(self), fields(path = %path))]
    pub fn read_registry(&self, path: &RelativePath) -> FirmkitResult<BTreeMap<String, Vec<String>>> {
        Ok(self
            .read_records(path)?
            .into_iter()
            .map(|r| (r.name, r.attributes))
            .collect())
    }

    /// Registry records in file order, duplicates kept.
    pub fn read_records(&self, path: &RelativePath) -> FirmkitResult<Vec<TargetRecord>> {
        let content = self.filesystem.read_to_string(&self.path_of(path))?;
        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if let Some(record) = TargetRecord::parse(line, path.as_str(), index + 1)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Append `line` on a new line unless the file already contains it.
    ///
    /// Containment is a substring test over the whole file, so `Sensor`
    /// is considered present once `SensorArray` is. Returns whether the file
    /// was written. An absent file is created.
    #[instrument(skip(self), fields(path = %path))]
    pub fn append_line_if_absent(&self, path: &RelativePath, line: &str) -> FirmkitResult<bool> {
        let host = self.path_of(path);
        let current = if self.filesystem.exists(&host) {
            self.filesystem.read_to_string(&host)?
        } else {
            self.ensure_parent(&host)?;
            String::new()
        };

        if current.contains(line) {
            debug!(line, "Already present");
            return Ok(false);
        }

        self.filesystem.append_file(&host, &format!("\n{line}"))?;
        debug!(line, "Appended");
        Ok(true)
    }

    /// Replace a list file with `lines`, one per line.
    #[instrument(skip(self, lines), fields(path = %path, count = lines.len()))]
    pub fn overwrite_list(&self, path: &RelativePath, lines: &[String]) -> FirmkitResult<()> {
        let host = self.path_of(path);
        self.ensure_parent(&host)?;
        self.filesystem.write_file(&host, &lines.join("\n"))
    }

    /// Write an arbitrary project file, creating its directory.
    pub fn write(&self, path: &RelativePath, content: &str) -> FirmkitResult<()> {
        let host = self.path_of(path);
        self.ensure_parent(&host)?;
        self.filesystem.write_file(&host, content)
    }

    fn ensure_parent(&self, host: &Path) -> FirmkitResult<()> {
        match host.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.filesystem.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::application::{ApplicationError, ports::MockFilesystem};
    use crate::error::FirmkitError;

    fn rel(p: &str) -> RelativePath {
        RelativePath::try_new(p).unwrap()
    }

    fn store_with(content: &'static str) -> LineListStore {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(move |_| Ok(content.to_string()));
        LineListStore::new(Arc::new(fs), "/p")
    }

    #[test]
    fn read_list_strips_terminators_and_blank_lines() {
        let store = store_with("./a.cpp\r\n\n./b.cpp\n./a.cpp\n");
        assert_eq!(
            store.read_list(&rel("list")).unwrap(),
            vec!["./a.cpp", "./b.cpp", "./a.cpp"]
        );
    }

    #[test]
    fn read_list_propagates_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string().returning(|p| {
            Err(ApplicationError::NotFound {
                path: p.to_path_buf(),
            }
            .into())
        });
        let store = LineListStore::new(Arc::new(fs), "/p");
        let err = store.read_list(&rel("missing")).unwrap_err();
        assert!(matches!(
            err,
            FirmkitError::Application(ApplicationError::NotFound { .. })
        ));
    }

    #[test]
    fn registry_last_duplicate_wins() {
        let store = store_with("Sensor Drivers/Sensor\nGpio Hal\nSensor Other\n");
        let reg = store.read_registry(&rel("reg")).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg["Sensor"], vec!["Other"]);
    }

    #[test]
    fn registry_key_without_value_is_malformed() {
        let store = store_with("Sensor Drivers/Sensor\nBroken\n");
        let err = store.read_registry(&rel("reg")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn append_is_substring_deduplicated() {
        let written: Arc<Mutex<HashMap<PathBuf, String>>> = Arc::default();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("./Drivers/SensorArray/include".to_string()));
        let sink = Arc::clone(&written);
        fs.expect_append_file().returning(move |p, c| {
            sink.lock().unwrap().insert(p.to_path_buf(), c.to_string());
            Ok(())
        });
        let store = LineListStore::new(Arc::new(fs), "/p");

        assert!(!store.append_line_if_absent(&rel("inc"), "./Drivers/Sensor").unwrap());
        assert!(store.append_line_if_absent(&rel("inc"), "./Hal").unwrap());
        assert_eq!(written.lock().unwrap()[&PathBuf::from("/p/inc")], "\n./Hal");
    }

    #[test]
    fn append_to_absent_file_creates_parent() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("/p/Build/SCons_UTest"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_append_file().times(1).returning(|_, _| Ok(()));
        let store = LineListStore::new(Arc::new(fs), "/p");

        assert!(
            store
                .append_line_if_absent(&rel("Build/SCons_UTest/UTestTargets.scons"), "Sensor .")
                .unwrap()
        );
    }

    #[test]
    fn overwrite_joins_lines_with_newline() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|_, c| c == "./a\n./b")
            .times(1)
            .returning(|_, _| Ok(()));
        let store = LineListStore::new(Arc::new(fs), "/p");
        store
            .overwrite_list(&rel("dir/list"), &["./a".into(), "./b".into()])
            .unwrap();
    }
}
