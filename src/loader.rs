//! Loading `.proto` schemas from the filesystem.

use std::path::{Path, PathBuf};

use log::{debug, trace};
use prost_reflect::{DynamicMessage, FileDescriptor};
use prost_types::FileDescriptorSet;

use crate::registry::{MessageResolver, Registry};
use crate::{Error, Result};

/// Import roots and `.proto` files to load.
///
/// # Example
///
/// ```rust,no_run
/// let schema = pb::Config::new()
///     .include("protos")
///     .file("geometry/point.proto")
///     .load()?;
/// # Ok::<(), pb::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    includes: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Adds a directory in which to search for `.proto` files and their imports.
    ///
    /// Directories are searched in the order they are added. If none are added,
    /// the current directory is the only import root.
    pub fn include<P>(&mut self, path: P) -> &mut Self
    where
        P: AsRef<Path>,
    {
        self.includes.push(path.as_ref().to_owned());
        self
    }

    /// Adds several import directories, see [`Config::include`].
    pub fn includes<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.include(path);
        }
        self
    }

    /// Adds a `.proto` file to load, relative to one of the import directories.
    pub fn file<P>(&mut self, path: P) -> &mut Self
    where
        P: AsRef<Path>,
    {
        self.files.push(path.as_ref().to_owned());
        self
    }

    /// Adds several `.proto` files, see [`Config::file`].
    pub fn files<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.file(path);
        }
        self
    }

    /// Parses the configured files, following their imports, and registers
    /// every declared message.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Parse`](crate::ErrorKind::Parse) on invalid
    /// syntax, an import that cannot be found in the import directories, or
    /// conflicting type definitions.
    pub fn load(&self) -> Result<Schema> {
        let includes: Vec<&Path> = if self.includes.is_empty() {
            vec![Path::new(".")]
        } else {
            self.includes.iter().map(PathBuf::as_path).collect()
        };
        trace!("includes: {:?}, files: {:?}", includes, self.files);

        let mut compiler = protox::Compiler::new(includes).map_err(Error::parse)?;
        compiler.include_imports(true);
        compiler.open_files(&self.files).map_err(Error::parse)?;

        let schema = Schema {
            registry: Registry::new(compiler.descriptor_pool()),
        };
        for file in schema.files() {
            debug!("file: {:?}, package: {:?}", file.name(), file.package_name());
        }
        Ok(schema)
    }
}

/// A loaded set of `.proto` files.
///
/// Files are kept in load order: every file comes after the files it imports.
/// The schema is never mutated once loaded.
#[derive(Debug, Clone)]
pub struct Schema {
    registry: Registry,
}

impl Schema {
    /// Iterates over the loaded files, transitive imports included, in load order.
    pub fn files(&self) -> impl ExactSizeIterator<Item = FileDescriptor> + '_ {
        self.registry.pool().files()
    }

    /// The registry of messages declared by the loaded files.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The loaded files as a `FileDescriptorSet`, in load order.
    pub fn file_descriptor_set(&self) -> FileDescriptorSet {
        FileDescriptorSet {
            file: self
                .registry
                .pool()
                .file_descriptor_protos()
                .cloned()
                .collect(),
        }
    }
}

impl MessageResolver for Schema {
    fn resolve(&self, name: &str) -> Result<DynamicMessage> {
        self.registry.resolve(name)
    }
}
