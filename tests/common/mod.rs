//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Header row of every raw batch
pub const BATCH_HEADER: &str =
    "id,author,content,date_time,language,latitude,longitude,number_of_likes,number_of_shares";

/// Relative location of the raw batch inside a test directory
pub const BATCH_FILE: &str = "raw_data/tweets.csv";

/// Relative location of the hourly summary inside a test directory
pub const SUMMARY_FILE: &str = "output_data/hourly_output.csv";

/// Batch exercising every repair rule and the hour-10 aggregation
pub fn scenario_batch() -> String {
    batch(&[
        "1,,hi,08/11/2020 23:10,xx,95,-200,,3",
        "5,a,x,08/11/2020 10:01,en,10,10,2,1",
        "5,a,y,08/11/2020 10:02,es,10,10,4,1",
        "7,b,z,08/11/2020 10:03,fr,10,10,6,1",
    ])
}

/// Join data rows under the batch header
pub fn batch(rows: &[&str]) -> String {
    let mut content = String::from(BATCH_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Test context builder for setting up test environments
pub struct TestContextBuilder {
    temp_dir: TempDir,
    initial_files: Vec<(PathBuf, String)>,
    config: Option<String>,
}

impl TestContextBuilder {
    /// Create a new test context builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            initial_files: Vec::new(),
            config: None,
        })
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Place a raw batch at [`BATCH_FILE`]
    pub fn with_batch(self, content: &str) -> Self {
        self.with_file(BATCH_FILE, content)
    }

    /// Write `tweetflow.toml` pointing source and sink into the test directory.
    ///
    /// `extra` is appended verbatim to the top-level table.
    pub fn with_config(mut self, extra: &str) -> Self {
        self.config = Some(extra.to_string());
        self
    }

    /// Build the test context
    pub fn build(self) -> Result<TestContext> {
        let path = self.temp_dir.path();

        for (file_path, content) in self.initial_files {
            let full_path = path.join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        if let Some(extra) = self.config {
            fs::write(path.join("tweetflow.toml"), config_toml(path, &extra))?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

/// File-backed configuration rooted at `dir`
pub fn config_toml(dir: &Path, extra: &str) -> String {
    // TOML literal strings keep Windows separators intact
    format!(
        "{extra}\n\n[source]\nbackend = \"file\"\npath = '{}'\n\n[sink]\nbackend = \"file\"\npath = '{}'\n\n[schedule]\nretries = 0\nretry_delay = \"1ms\"\n",
        dir.join(BATCH_FILE).display(),
        dir.join(SUMMARY_FILE).display(),
    )
}

/// Test context that manages temporary directories and cleanup
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    /// Get the path to the test directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("tweetflow.toml")
    }

    pub fn batch_path(&self) -> PathBuf {
        self.path().join(BATCH_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.path().join(SUMMARY_FILE)
    }

    /// Read a file from the test directory
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.temp_dir.path().join(path);
        Ok(fs::read_to_string(full_path)?)
    }

    /// Check if a file exists
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.temp_dir.path().join(path).exists()
    }
}
