/// In-memory file tree for tests.
pub struct TestFS {
    root: vfs::VfsPath,
}

impl TestFS {
    pub fn new<I, P, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: AsRef<[u8]>,
    {
        let fs = vfs::MemoryFS::new();
        let root: vfs::VfsPath = fs.into();
        for (path, content) in entries {
            let p = root.join(path.as_ref()).unwrap();
            let parent = p.parent();
            if parent.as_str() != p.as_str() {
                parent.create_dir_all().unwrap();
            }
            let mut f = p.create_file().unwrap();
            use std::io::Write;
            f.write_all(content.as_ref()).unwrap();
        }
        Self { root }
    }

    /// Create empty directories in addition to the files.
    pub fn with_dirs<D: AsRef<str>>(self, dirs: impl IntoIterator<Item = D>) -> Self {
        for dir in dirs {
            self.root.join(dir.as_ref()).unwrap().create_dir_all().unwrap();
        }
        self
    }

    pub fn root(&self) -> vfs::VfsPath {
        self.root.clone()
    }
}
