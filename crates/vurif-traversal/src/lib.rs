use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::BTreeMap;
use std::path::Path;
use vfs::VfsPath;

use vurif_core::{LogLevel, Logger, VUE_EXTENSION, is_vue_file, normalize_path, relative_path};

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

struct GitIgnoreEntry {
    prefix: String,
    gi: Gitignore,
}

pub struct WalkBuilder {
    root: VfsPath,
    dir: String,
    ignore_patterns: Vec<String>,
}

impl WalkBuilder {
    pub fn new(root: &VfsPath) -> Self {
        Self {
            root: root.clone(),
            dir: String::new(),
            ignore_patterns: Vec::new(),
        }
    }

    /// Directory (relative to the root) to scan. Defaults to the root itself.
    pub fn dir(mut self, dir: &str) -> Self {
        self.dir = normalize_path(dir).to_string();
        self
    }

    /// Glob patterns, matched against root-relative paths, to skip.
    pub fn ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns.to_vec();
        self
    }

    pub fn build(self) -> Walk {
        Walk {
            root: self.root,
            dir: self.dir,
            ignore_patterns: self.ignore_patterns,
        }
    }
}

/// Recursive discovery of component files below a directory, respecting
/// `.gitignore` files and skipping `node_modules`.
pub struct Walk {
    root: VfsPath,
    dir: String,
    ignore_patterns: Vec<String>,
}

impl Walk {
    /// Root-relative paths of all component files, sorted.
    pub fn collect_files(&self, logger: &dyn Logger) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();
        let start = if self.dir.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&self.dir)?
        };
        if !start.exists()? {
            logger.log(
                LogLevel::Error,
                &format!("failed to walk {}: no such directory", self.dir),
            );
            return Ok(files);
        }
        if start.is_file()? {
            let rel = relative_path(&self.root, &start);
            if is_vue_file(&rel) {
                files.push(rel);
            }
            return Ok(files);
        }

        let patterns = self.compile_patterns(logger);
        let mut ignores = Vec::new();
        // .gitignore files of the directories above the scanned one
        let mut current = self.root.clone();
        let components: Vec<&str> = self.dir.split('/').filter(|c| !c.is_empty()).collect();
        if !components.is_empty() {
            self.load_gitignore(&current, &mut ignores, logger);
            for comp in &components[..components.len() - 1] {
                current = current.join(comp)?;
                self.load_gitignore(&current, &mut ignores, logger);
            }
        }

        self.visit(&start, &patterns, &mut ignores, &mut files, logger)?;
        files.sort();
        logger.log(
            LogLevel::Debug,
            &format!(
                "found {} .{} files in {}",
                files.len(),
                VUE_EXTENSION,
                if self.dir.is_empty() { "." } else { &self.dir }
            ),
        );
        Ok(files)
    }

    fn compile_patterns(&self, logger: &dyn Logger) -> Vec<glob::Pattern> {
        self.ignore_patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    logger.log(
                        LogLevel::Error,
                        &format!("invalid ignore pattern {p}: {e}"),
                    );
                    None
                }
            })
            .collect()
    }

    fn visit(
        &self,
        dir: &VfsPath,
        patterns: &[glob::Pattern],
        ignores: &mut Vec<GitIgnoreEntry>,
        files: &mut Vec<String>,
        logger: &dyn Logger,
    ) -> anyhow::Result<()> {
        let pushed = self.load_gitignore(dir, ignores, logger);
        let mut entries: Vec<VfsPath> = match dir.read_dir() {
            Ok(it) => it.collect(),
            Err(e) => {
                logger.log(
                    LogLevel::Error,
                    &format!("failed to read {}: {e}", dir.as_str()),
                );
                Vec::new()
            }
        };
        entries.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        for path in entries {
            let rel = relative_path(&self.root, &path);
            let is_dir = match path.is_dir() {
                Ok(d) => d,
                Err(e) => {
                    logger.log(
                        LogLevel::Error,
                        &format!("metadata error on {}: {e}", path.as_str()),
                    );
                    continue;
                }
            };
            if is_dir && SKIPPED_DIRS.contains(&path.filename().as_str()) {
                continue;
            }
            if patterns.iter().any(|p| p.matches(&rel)) || is_ignored(&rel, is_dir, ignores) {
                continue;
            }
            if is_dir {
                self.visit(&path, patterns, ignores, files, logger)?;
            } else if is_vue_file(&rel) {
                files.push(rel);
            }
        }

        if pushed {
            ignores.pop();
        }
        Ok(())
    }

    fn load_gitignore(
        &self,
        dir: &VfsPath,
        ignores: &mut Vec<GitIgnoreEntry>,
        logger: &dyn Logger,
    ) -> bool {
        let Ok(path) = dir.join(".gitignore") else {
            return false;
        };
        if !path.exists().unwrap_or(false) {
            return false;
        }
        let contents = match path.read_to_string() {
            Ok(c) => c,
            Err(e) => {
                logger.log(
                    LogLevel::Error,
                    &format!("failed to read .gitignore: {e}"),
                );
                return false;
            }
        };
        let mut builder = GitignoreBuilder::new(Path::new(dir.as_str()));
        for line in contents.lines() {
            let _ = builder.add_line(None, line);
        }
        match builder.build() {
            Ok(gi) => {
                ignores.push(GitIgnoreEntry {
                    prefix: relative_path(&self.root, dir),
                    gi,
                });
                true
            }
            Err(e) => {
                logger.log(
                    LogLevel::Error,
                    &format!("failed to parse {}: {e}", path.as_str()),
                );
                false
            }
        }
    }
}

/// Deeper `.gitignore` files take precedence, so a nested whitelist can
/// re-include a path ignored further up.
fn is_ignored(rel: &str, is_dir: bool, ignores: &[GitIgnoreEntry]) -> bool {
    for entry in ignores.iter().rev() {
        let sub = if entry.prefix.is_empty() {
            rel
        } else if let Some(rest) = rel.strip_prefix(&format!("{}/", entry.prefix)) {
            rest
        } else {
            continue;
        };
        match entry.gi.matched_path_or_any_parents(Path::new(sub), is_dir) {
            Match::Ignore(_) => return true,
            Match::Whitelist(_) => return false,
            Match::None => {}
        }
    }
    false
}

/// Registry entries for every component file under the walk's directory,
/// keyed by file name without its extension.
pub fn discover_components(
    walk: &Walk,
    logger: &dyn Logger,
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut components = BTreeMap::new();
    for rel in walk.collect_files(logger)? {
        let Some(key) = Path::new(&rel).file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let key = key.to_string();
        if let Some(previous) = components.insert(key.clone(), rel.clone()) {
            logger.log(
                LogLevel::Debug,
                &format!("duplicate component key {key}: {rel} replaces {previous}"),
            );
        }
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vurif_core::test_util::TestFS;
    use vurif_core::{EmptyLogger, MemoryLogger};

    fn files(fs: &TestFS, dir: &str) -> Vec<String> {
        WalkBuilder::new(&fs.root())
            .dir(dir)
            .build()
            .collect_files(&EmptyLogger)
            .unwrap()
    }

    #[test]
    fn test_empty_directory() {
        let fs = TestFS::new([] as [(&str, &str); 0]).with_dirs(["components"]);
        let walk = WalkBuilder::new(&fs.root()).dir("components").build();
        let dict = discover_components(&walk, &EmptyLogger).unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn test_flat_components() {
        let fs = TestFS::new([
            ("components/App.vue", "<template></template>"),
            ("components/index.vue", "<template></template>"),
        ]);
        let walk = WalkBuilder::new(&fs.root()).dir("components").build();
        let dict = discover_components(&walk, &EmptyLogger).unwrap();
        assert_eq!(
            dict,
            BTreeMap::from([
                ("App".to_string(), "components/App.vue".to_string()),
                ("index".to_string(), "components/index.vue".to_string()),
            ])
        );
    }

    #[test]
    fn test_nested_components_are_flattened() {
        let fs = TestFS::new([
            ("components/atoms/Button.vue", ""),
            ("components/atoms/InputText.vue", ""),
            ("components/App.vue", ""),
            ("components/index.vue", ""),
        ]);
        let walk = WalkBuilder::new(&fs.root()).dir("./components/").build();
        let dict = discover_components(&walk, &EmptyLogger).unwrap();
        assert_eq!(dict.len(), 4);
        assert_eq!(dict["Button"], "components/atoms/Button.vue");
        assert_eq!(dict["InputText"], "components/atoms/InputText.vue");
        assert_eq!(dict["App"], "components/App.vue");
        assert_eq!(dict["index"], "components/index.vue");
    }

    #[test]
    fn test_only_vue_files() {
        let fs = TestFS::new([
            ("components/App.vue", ""),
            ("components/App.spec.ts", ""),
            ("components/README.md", ""),
        ]);
        assert_eq!(files(&fs, "components"), vec!["components/App.vue"]);
    }

    #[test]
    fn test_duplicate_names_later_path_wins() {
        let fs = TestFS::new([
            ("components/a/Card.vue", ""),
            ("components/b/Card.vue", ""),
        ]);
        let logger = MemoryLogger::new();
        let walk = WalkBuilder::new(&fs.root()).dir("components").build();
        let dict = discover_components(&walk, &logger).unwrap();
        assert_eq!(dict["Card"], "components/b/Card.vue");
        assert_eq!(logger.messages(LogLevel::Debug).len(), 2);
    }

    #[test]
    fn test_gitignore_and_node_modules() {
        let fs = TestFS::new([
            (".gitignore", "legacy/\n"),
            ("components/App.vue", ""),
            ("components/legacy/Old.vue", ""),
            ("components/node_modules/lib/Lib.vue", ""),
            ("components/atoms/.gitignore", "Draft.vue\n"),
            ("components/atoms/Draft.vue", ""),
            ("components/atoms/Button.vue", ""),
        ]);
        assert_eq!(
            files(&fs, "components"),
            vec!["components/App.vue", "components/atoms/Button.vue"]
        );
    }

    #[test]
    fn test_ignore_patterns() {
        let fs = TestFS::new([
            ("components/App.vue", ""),
            ("components/__tests__/AppFixture.vue", ""),
        ]);
        let walk = WalkBuilder::new(&fs.root())
            .dir("components")
            .ignore_patterns(&["**/__tests__/**".to_string()])
            .build();
        assert_eq!(
            walk.collect_files(&EmptyLogger).unwrap(),
            vec!["components/App.vue"]
        );
    }

    #[test]
    fn test_missing_dir_is_logged() {
        let fs = TestFS::new([("pages/index.vue", "")]);
        let logger = MemoryLogger::new();
        let walk = WalkBuilder::new(&fs.root()).dir("missing").build();
        assert!(walk.collect_files(&logger).unwrap().is_empty());
        assert_eq!(logger.messages(LogLevel::Error).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_every_component_is_registered(names in proptest::collection::btree_set("[A-Z][a-z]{1,6}", 1..6)) {
            let entries: Vec<(String, String)> = names
                .iter()
                .enumerate()
                .map(|(i, n)| (format!("components/d{i}/{n}.vue"), String::new()))
                .collect();
            let fs = TestFS::new(entries.iter().map(|(p, c)| (p.as_str(), c.as_str())));
            let walk = WalkBuilder::new(&fs.root()).dir("components").build();
            let dict = discover_components(&walk, &EmptyLogger).unwrap();
            prop_assert_eq!(dict.len(), names.len());
            for (i, n) in names.iter().enumerate() {
                prop_assert_eq!(&dict[n], &format!("components/d{i}/{n}.vue"));
            }
        }
    }
}
