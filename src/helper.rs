// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::copy;
use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::error::Fallible;
use crate::store::STORE_FILE;

pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let target: PathBuf = tempdir()?.path().to_path_buf();
    create_dir_all(&target)?;
    Ok(target.canonicalize()?)
}

/// Copy the committed `test/` deck into a temporary directory, minus any
/// progress record, so tests never dirty the fixture.
pub fn create_tmp_copy_of_test_directory() -> Fallible<PathBuf> {
    let source: PathBuf = PathBuf::from("./test").canonicalize()?;
    let target: PathBuf = create_tmp_directory()?;
    copy_tree(&source, &target)?;
    Ok(target)
}

fn copy_tree(source: &Path, target: &PathBuf) -> Fallible<()> {
    for entry in source.read_dir()? {
        let entry = entry?;
        let path = entry.path();
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if path.is_dir() {
            let sub_target = target.join(file_name);
            create_dir_all(&sub_target)?;
            copy_tree(&path, &sub_target)?;
        } else if file_name != STORE_FILE {
            copy(&path, target.join(file_name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_copy_of_test_directory() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        assert!(dir.join("clips.json").exists());
        assert!(dir.join("species.json").exists());
        assert!(dir.join("clips").is_dir());
        Ok(())
    }
}
