#![allow(dead_code)]

pub mod temp_files {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Write `content` to `dir/relative`, creating parent directories.
    pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// A template base holding `<app>/view/<controller>/<view>.html` and
    /// `<app>/layout/<layout>.html` for each entry.
    pub fn template_base(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (relative, content) in files {
            write_file(dir.path(), relative, content);
        }
        dir
    }
}

pub mod manifests {
    /// Controllers of the `Skel` application used by the routing tests.
    pub const SKEL: &str = r#"
controllers:
  "Skel\\Controller\\Main":
    tags: [noModel]
    default_action: main
    actions:
      - name: main
        args: [[], [null]]
  "Skel\\Controller\\Blog":
    default_action: index
    actions:
      - name: index
        args: [[]]
      - name: show
        args: [["id"], ["id", "slug"]]
      - name: archive
        args: [["year", null]]
  "Skel\\Controller\\Strict":
    actions:
      - name: only
        args: [["x"]]
  "Skel\\Controller\\Bare":
    default_action: home
    actions:
      - name: home
"#;
}
