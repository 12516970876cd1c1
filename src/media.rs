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

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// The media loader takes deck-relative clip and image paths and returns
/// the absolute path to the file, if it exists.
///
/// Requests reach this with unsafe strings from the client, so there must
/// be no possibility of directory traversal.
pub struct MediaLoader {
    /// Absolute path to the deck root directory.
    root: PathBuf,
}

/// Errors that can occur when resolving a path.
#[derive(Debug, PartialEq)]
pub enum MediaLoaderError {
    /// Path is absolute.
    Absolute,
    /// Path does not exist.
    NotFound,
    /// Path is not a file.
    NotFile,
    /// Path points to a symbolic link.
    SymbolicLink,
    /// Path contains parent (`..`) components.
    ParentComponent,
}

impl MediaLoader {
    /// Construct a new [`MediaLoader`].
    pub fn new(root: PathBuf) -> Self {
        assert!(root.is_absolute());
        Self { root }
    }

    /// Given a path string from the client, check that a file exists at
    /// that location within the deck root directory.
    ///
    /// Symbolic links and absolute paths are rejected.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, MediaLoaderError> {
        let path: PathBuf = PathBuf::from(path);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(MediaLoaderError::ParentComponent);
        }
        if path.is_absolute() {
            return Err(MediaLoaderError::Absolute);
        }
        let path: PathBuf = self.root.join(path);
        if !path.exists() {
            return Err(MediaLoaderError::NotFound);
        }
        if !path.is_file() {
            return Err(MediaLoaderError::NotFile);
        }
        if path.is_symlink() {
            return Err(MediaLoaderError::SymbolicLink);
        }
        Ok(path)
    }
}

/// Content type for a clip or image file, by extension.
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::fs::create_dir;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    /// A clip in a subdirectory resolves to its absolute path.
    #[test]
    fn test_resolve_valid() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let clips = root.join("clips");
        create_dir(&clips)?;
        let clip = clips.join("robin.mp3");
        File::create(&clip)?;
        let loader = MediaLoader::new(root);
        assert_eq!(loader.resolve("clips/robin.mp3"), Ok(clip));
        Ok(())
    }

    /// Absolute paths are rejected.
    #[test]
    fn test_abs_rejected() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let loader = MediaLoader::new(root);
        assert_eq!(
            loader.resolve("/etc/passwd"),
            Err(MediaLoaderError::Absolute)
        );
        Ok(())
    }

    /// Paths with parent components are rejected.
    #[test]
    fn test_parent() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let loader = MediaLoader::new(root);
        assert_eq!(
            loader.resolve("../../../../../../../../../../etc/passwd"),
            Err(MediaLoaderError::ParentComponent)
        );
        Ok(())
    }

    /// Nonexistent files are rejected.
    #[test]
    fn test_not_found() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let loader = MediaLoader::new(root);
        assert_eq!(
            loader.resolve("clips/nope.mp3"),
            Err(MediaLoaderError::NotFound)
        );
        Ok(())
    }

    /// Directories are rejected.
    #[test]
    fn test_not_file() -> Fallible<()> {
        let root = create_tmp_directory()?;
        create_dir(root.join("clips"))?;
        let loader = MediaLoader::new(root);
        assert_eq!(loader.resolve("clips"), Err(MediaLoaderError::NotFile));
        Ok(())
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("clips/robin.mp3")), "audio/mpeg");
        assert_eq!(content_type(Path::new("clips/robin.OGG")), "audio/ogg");
        assert_eq!(content_type(Path::new("images/robin.jpg")), "image/jpeg");
        assert_eq!(
            content_type(Path::new("clips/robin")),
            "application/octet-stream"
        );
    }
}
