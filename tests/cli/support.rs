use capcomp::config::ConfigLoader;
use capcomp::tooling::cli::CliContext;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workspace with a catalog under `capabilities/` and a `manifests/` directory.
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let fixture = Self { temp };
        fixture.write(
            "capabilities/org-kb.yaml",
            "id: org-kb\nversion: 1.0.0\ncategory: knowledge\ncomposable_with: [supervisor]\n",
        );
        fixture.write(
            "capabilities/domain-knowledge.yaml",
            "id: domain-knowledge\nversion: 1.0.0\ncategory: knowledge\n",
        );
        fixture.write(
            "capabilities/collaboration.yaml",
            "id: collaboration\nversion: 1.0.0\ncategory: coordination\nprerequisites: [domain-knowledge]\nbehaviors: [handoff]\n",
        );
        fixture.write(
            "capabilities/memory-management.yaml",
            "id: memory-management\nversion: 1.2.0\ncategory: memory\nbehaviors:\n  - name: recall\n    attributes:\n      depth: 3\n",
        );
        fixture
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }

    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn manifest(&self, name: &str, base: &str, capabilities: &[&str]) -> PathBuf {
        let mut content = format!("composition:\n  base_template: {}\n", base);
        content.push_str(if capabilities.is_empty() {
            "  capabilities: []\n"
        } else {
            "  capabilities:\n"
        });
        for capability in capabilities {
            content.push_str(&format!("    - name: {}\n", capability));
        }
        self.write(&format!("manifests/{}", name), &content)
    }

    /// Context over this workspace with default configuration and no color.
    pub fn context(&self) -> CliContext {
        CliContext::from_config(
            self.root().to_path_buf(),
            ConfigLoader::default(),
            Some(self.root().join("capabilities").as_path()),
        )
        .unwrap()
        .with_color(false)
    }
}
