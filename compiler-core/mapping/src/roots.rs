use std::path::PathBuf;

use crate::{MappingError, Result};

/// How the asset roots are presented to the compiler.
///
/// A single root relativizes output paths correctly. The main/test split
/// needs a root-directories list instead: a single shared root would make
/// the compiler collapse the two diverging subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootDirectories {
    Single(PathBuf),
    Split { main: PathBuf, test: PathBuf },
}

impl RootDirectories {
    pub fn from_assets(assets: &[PathBuf]) -> Result<RootDirectories> {
        match assets {
            [root] => Ok(RootDirectories::Single(root.clone())),
            [main, test] => Ok(RootDirectories::Split { main: main.clone(), test: test.clone() }),
            _ => Err(MappingError::AssetRootCount(assets.len())),
        }
    }
}
