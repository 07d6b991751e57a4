// Copyright (c) 2025-2026 Lintel and contributors

// SPDX-License-Identifier: MIT
// All contributions are certified under the DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Uploaded file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use crate::params::Value;
use crate::stream::Stream;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Chunk size for stream-backed moves.
const MOVE_CHUNK_SIZE: usize = 4096;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Upload outcome reported by the server for one file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UploadStatus {
    /// The file uploaded successfully.
    Ok,
    /// The file exceeds the server-wide size limit.
    IniSize,
    /// The file exceeds the size limit declared by the form.
    FormSize,
    /// The file was only partially uploaded.
    Partial,
    /// No file was uploaded.
    NoFile,
    /// No temporary directory is available.
    NoTmpDir,
    /// The file could not be written to disk.
    CantWrite,
    /// An extension stopped the upload.
    Extension,
}

/// Storage backing an uploaded file.
///
/// Mutually exclusive: a successfully uploaded file is backed either by its
/// temporary path on disk or by an already open stream. Files in an error
/// state carry no backing at all.
#[derive(Debug)]
enum Backing {
    /// A temporary file path.
    Path(PathBuf),
    /// An already open stream.
    Stream(Stream),
    /// No backing, for files in an error state.
    None,
}

/// Node in the uploaded files tree.
///
/// Multi-file form fields produce nested mappings whose leaves are the
/// uploaded files.
#[derive(Debug)]
pub enum UploadNode {
    /// An uploaded file.
    File(UploadedFile),
    /// A nested mapping of uploaded files.
    Nested(UploadMap),
}

/// Raw source handle in an upload specification.
#[derive(Debug)]
pub enum UploadSource {
    /// The temporary path the server stored the file under.
    Path(PathBuf),
    /// An already open stream.
    Stream(Stream),
    /// No source, for files in an error state.
    None,
}

/// Node in a raw files specification.
#[derive(Debug)]
pub enum UploadSpec {
    /// A raw upload specification.
    Raw(RawUpload),
    /// An already normalized uploaded file.
    File(UploadedFile),
    /// A nested mapping of specifications.
    Nested(BTreeMap<String, UploadSpec>),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Uploaded file.
///
/// Represents one file of a form submission: the client-declared metadata,
/// the upload outcome, and the backing storage. The contents can be
/// consumed either through [`UploadedFile::stream`] or moved to their final
/// location with [`UploadedFile::move_to`] - and moving is permitted
/// exactly once. After a successful move both operations fail permanently.
#[derive(Debug)]
pub struct UploadedFile {
    /// Backing storage, populated when the upload succeeded.
    backing: Backing,
    /// Cached stream over a path backing.
    stream: Option<Stream>,
    /// Declared size in bytes.
    size: u64,
    /// Upload outcome.
    status: UploadStatus,
    /// Filename as declared by the client.
    client_filename: Option<String>,
    /// Media type as declared by the client.
    client_media_type: Option<String>,
    /// Whether the file has been moved.
    moved: bool,
}

/// Raw upload specification as handed over by the server.
///
/// Sizes and error codes arrive as loosely typed values and are validated
/// when the specification is normalized into an [`UploadedFile`].
#[derive(Debug)]
pub struct RawUpload {
    /// Temporary source handle.
    pub source: UploadSource,
    /// Declared size in bytes.
    pub size: i64,
    /// Upload error code.
    pub error: i64,
    /// Filename as declared by the client.
    pub client_filename: Option<String>,
    /// Media type as declared by the client.
    pub client_media_type: Option<String>,
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Uploaded files tree, keyed by form field name.
pub type UploadMap = BTreeMap<String, UploadNode>;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl UploadStatus {
    /// Attempts to create an upload status from its wire code.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidErrorStatus`] for codes with no
    /// assigned outcome, including the historically unassigned code 5.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(UploadStatus::Ok),
            1 => Ok(UploadStatus::IniSize),
            2 => Ok(UploadStatus::FormSize),
            3 => Ok(UploadStatus::Partial),
            4 => Ok(UploadStatus::NoFile),
            6 => Ok(UploadStatus::NoTmpDir),
            7 => Ok(UploadStatus::CantWrite),
            8 => Ok(UploadStatus::Extension),
            _ => Err(Error::InvalidErrorStatus(code)),
        }
    }

    /// Returns the wire code of the status.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            UploadStatus::Ok => 0,
            UploadStatus::IniSize => 1,
            UploadStatus::FormSize => 2,
            UploadStatus::Partial => 3,
            UploadStatus::NoFile => 4,
            UploadStatus::NoTmpDir => 6,
            UploadStatus::CantWrite => 7,
            UploadStatus::Extension => 8,
        }
    }

    /// Returns the standard message for the status.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            UploadStatus::Ok => {
                "there is no error, the file uploaded with success"
            }
            UploadStatus::IniSize => {
                "the uploaded file exceeds the maximum upload size"
            }
            UploadStatus::FormSize => {
                "the uploaded file exceeds the size limit specified in the form"
            }
            UploadStatus::Partial => {
                "the uploaded file was only partially uploaded"
            }
            UploadStatus::NoFile => "no file was uploaded",
            UploadStatus::NoTmpDir => "missing a temporary folder",
            UploadStatus::CantWrite => "failed to write file to disk",
            UploadStatus::Extension => "an extension stopped the file upload",
        }
    }
}

impl UploadedFile {
    /// Attempts to create an uploaded file.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidErrorStatus`] for an unknown
    /// error code, [`Error::InvalidSize`] for a negative size, and
    /// [`Error::InvalidStreamOrFile`], if the status reports success but no
    /// source is given. For non-success statuses the source is not
    /// validated, as error-state files have no contents to begin with.
    pub fn from_spec(spec: RawUpload) -> Result<Self> {
        let status = UploadStatus::from_code(spec.error)?;
        let size = u64::try_from(spec.size)
            .map_err(|_| Error::InvalidSize(spec.size))?;

        let backing = if status == UploadStatus::Ok {
            match spec.source {
                UploadSource::Path(path) => Backing::Path(path),
                UploadSource::Stream(stream) => Backing::Stream(stream),
                UploadSource::None => return Err(Error::InvalidStreamOrFile),
            }
        } else {
            Backing::None
        };

        Ok(UploadedFile {
            backing,
            stream: None,
            size,
            status,
            client_filename: spec.client_filename,
            client_media_type: spec.client_media_type,
            moved: false,
        })
    }

    /// Returns a stream over the contents of the uploaded file.
    ///
    /// For a path-backed file the stream is opened on first use and cached.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Upload`], if the upload did not
    /// complete successfully, and [`Error::AlreadyMoved`] after a
    /// successful [`UploadedFile::move_to`].
    pub fn stream(&mut self) -> Result<&mut Stream> {
        if self.status != UploadStatus::Ok {
            return Err(Error::Upload(self.status));
        }
        if self.moved {
            return Err(Error::AlreadyMoved);
        }
        match &mut self.backing {
            Backing::Stream(stream) => Ok(stream),
            Backing::Path(path) => {
                if self.stream.is_none() {
                    self.stream = Some(Stream::open(path, "r")?);
                }
                Ok(self.stream.as_mut().expect("invariant"))
            }
            Backing::None => Err(Error::InvalidStreamOrFile),
        }
    }

    /// Moves the uploaded file to the given target path.
    ///
    /// Path-backed files are renamed, falling back to a copy when the
    /// target lies on another filesystem. Stream-backed files are rewound
    /// and copied over in fixed-size chunks. The move is permitted exactly
    /// once.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::AlreadyMoved`] on the second and any
    /// subsequent call, [`Error::Upload`], if the upload did not complete
    /// successfully, [`Error::InvalidTargetPath`] for an empty target,
    /// [`Error::TargetDirectoryNotWritable`], if the target directory does
    /// not exist or is not writable, and [`Error::WriteFailure`], if the
    /// destination cannot be written.
    pub fn move_to<P>(&mut self, target: P) -> Result
    where
        P: AsRef<Path>,
    {
        let target = target.as_ref();
        if self.moved {
            return Err(Error::AlreadyMoved);
        }
        if self.status != UploadStatus::Ok {
            return Err(Error::Upload(self.status));
        }
        if target.as_os_str().is_empty() {
            return Err(Error::InvalidTargetPath);
        }

        // The parent of a relative single-segment target is the current
        // directory
        let directory = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };
        if !is_writable_directory(&directory) {
            return Err(Error::TargetDirectoryNotWritable(directory));
        }

        if let Backing::Path(path) = &self.backing {
            // Rename, falling back to copy for cross-device targets
            let path = path.clone();
            if fs::rename(&path, target).is_err() {
                fs::copy(&path, target).map_err(|_| Error::WriteFailure)?;
                let _ = fs::remove_file(&path);
            }
        } else {
            let mut destination = Stream::open(target, "w+b")
                .map_err(|_| Error::WriteFailure)?;
            let stream = self.stream()?;
            stream.rewind()?;
            while !stream.eof() {
                let chunk = stream.read(MOVE_CHUNK_SIZE)?;
                destination.write(&chunk)?;
            }
        }
        self.moved = true;
        Ok(())
    }
}

#[allow(clippy::must_use_candidate)]
impl UploadedFile {
    /// Returns the declared size in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the upload outcome.
    #[inline]
    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Returns the filename as declared by the client.
    #[inline]
    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    /// Returns the media type as declared by the client.
    #[inline]
    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    /// Returns whether the file has been moved.
    #[inline]
    pub fn is_moved(&self) -> bool {
        self.moved
    }
}

impl UploadSpec {
    /// Attempts to create a files specification from a parameter tree.
    ///
    /// A map carrying a `tmp_name` key is read as one raw upload
    /// specification; any other map recurses into a nested specification.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::InvalidUploadSpec`] for any other leaf
    /// shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Map(map) if map.contains_key("tmp_name") => {
                let field = |key: &str| {
                    map.get(key).and_then(Value::as_str).map(str::to_string)
                };
                let number = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .and_then(|value| value.parse::<i64>().ok())
                };
                let source = field("tmp_name")
                    .filter(|path| !path.is_empty())
                    .map_or(UploadSource::None, |path| {
                        UploadSource::Path(PathBuf::from(path))
                    });
                Ok(UploadSpec::Raw(RawUpload {
                    source,
                    size: number("size").unwrap_or_default(),
                    error: number("error").unwrap_or_default(),
                    client_filename: field("name"),
                    client_media_type: field("type"),
                }))
            }
            Value::Map(map) => {
                let mut nested = BTreeMap::new();
                for (key, value) in map {
                    nested.insert(key.clone(), Self::from_value(value)?);
                }
                Ok(UploadSpec::Nested(nested))
            }
            _ => Err(Error::InvalidUploadSpec),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Normalizes a raw files specification into an uploaded files tree.
///
/// Raw specifications are validated and converted into [`UploadedFile`]
/// leaves, already normalized files pass through, and nested mappings
/// recurse.
///
/// # Errors
///
/// This function returns an error if a specification fails validation, see
/// [`UploadedFile::from_spec`].
pub fn normalize(
    specs: BTreeMap<String, UploadSpec>,
) -> Result<UploadMap> {
    let mut files = UploadMap::new();
    for (key, spec) in specs {
        let node = match spec {
            UploadSpec::Raw(raw) => {
                UploadNode::File(UploadedFile::from_spec(raw)?)
            }
            UploadSpec::File(file) => UploadNode::File(file),
            UploadSpec::Nested(nested) => {
                UploadNode::Nested(normalize(nested)?)
            }
        };
        files.insert(key, node);
    }
    Ok(files)
}

/// Returns whether the given path is a writable directory.
fn is_writable_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_dir() && !meta.permissions().readonly())
        .unwrap_or(false)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn stream_with(contents: &[u8]) -> Stream {
        let mut stream = Stream::memory();
        stream.write(contents).expect("writable");
        stream
    }

    fn upload_from_stream(contents: &[u8]) -> UploadedFile {
        UploadedFile::from_spec(RawUpload {
            source: UploadSource::Stream(stream_with(contents)),
            size: contents.len() as i64,
            error: 0,
            client_filename: None,
            client_media_type: None,
        })
        .expect("valid spec")
    }

    #[test]
    fn test_from_spec_validates_error_code() {
        for code in [-1, 5, 9, 100] {
            let result = UploadedFile::from_spec(RawUpload {
                source: UploadSource::Stream(Stream::memory()),
                size: 0,
                error: code,
                client_filename: None,
                client_media_type: None,
            });
            assert!(
                matches!(result, Err(Error::InvalidErrorStatus(_))),
                "{code}"
            );
        }
    }

    #[test]
    fn test_from_spec_validates_size() {
        let result = UploadedFile::from_spec(RawUpload {
            source: UploadSource::Stream(Stream::memory()),
            size: -1,
            error: 0,
            client_filename: None,
            client_media_type: None,
        });
        assert!(matches!(result, Err(Error::InvalidSize(-1))));
    }

    #[test]
    fn test_from_spec_requires_source_on_success() {
        let result = UploadedFile::from_spec(RawUpload {
            source: UploadSource::None,
            size: 0,
            error: 0,
            client_filename: None,
            client_media_type: None,
        });
        assert!(matches!(result, Err(Error::InvalidStreamOrFile)));
    }

    #[test]
    fn test_from_spec_skips_source_on_error_status() -> Result {
        for code in [1, 2, 3, 4, 6, 7, 8] {
            let file = UploadedFile::from_spec(RawUpload {
                source: UploadSource::None,
                size: 0,
                error: code,
                client_filename: None,
                client_media_type: None,
            })?;
            assert_eq!(file.status().code(), code);
        }
        Ok(())
    }

    #[test]
    fn test_metadata_accessors() -> Result {
        let file = UploadedFile::from_spec(RawUpload {
            source: UploadSource::Stream(Stream::memory()),
            size: 123,
            error: 0,
            client_filename: Some("photo.jpg".to_string()),
            client_media_type: Some("image/jpeg".to_string()),
        })?;
        assert_eq!(file.size(), 123);
        assert_eq!(file.client_filename(), Some("photo.jpg"));
        assert_eq!(file.client_media_type(), Some("image/jpeg"));
        assert!(!file.is_moved());
        Ok(())
    }

    #[test]
    fn test_stream_returns_contents() -> Result {
        let mut file = upload_from_stream(b"Foo bar!");
        let stream = file.stream()?;
        stream.rewind()?;
        assert_eq!(stream.contents()?, "Foo bar!");
        Ok(())
    }

    #[test]
    fn test_stream_opens_path_backing() -> Result {
        let mut source = tempfile::NamedTempFile::new().expect("tempfile");
        source.write_all(b"Foo bar!").expect("write");

        let mut file = UploadedFile::from_spec(RawUpload {
            source: UploadSource::Path(source.path().to_path_buf()),
            size: 8,
            error: 0,
            client_filename: None,
            client_media_type: None,
        })?;
        assert_eq!(file.stream()?.contents()?, "Foo bar!");
        Ok(())
    }

    #[test]
    fn test_move_stream_backing_to_path() -> Result {
        let directory = tempfile::tempdir().expect("tempdir");
        let target = directory.path().join("moved.txt");

        let mut file = upload_from_stream(b"Foo bar!");
        file.move_to(&target)?;
        assert!(file.is_moved());
        assert_eq!(fs::read_to_string(&target).expect("read"), "Foo bar!");
        Ok(())
    }

    #[test]
    fn test_move_path_backing_to_path() -> Result {
        let directory = tempfile::tempdir().expect("tempdir");
        let source = directory.path().join("source.txt");
        fs::write(&source, b"Foo bar!").expect("write");
        let target = directory.path().join("moved.txt");

        let mut file = UploadedFile::from_spec(RawUpload {
            source: UploadSource::Path(source.clone()),
            size: 8,
            error: 0,
            client_filename: None,
            client_media_type: None,
        })?;
        file.move_to(&target)?;
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target).expect("read"), "Foo bar!");
        Ok(())
    }

    #[test]
    fn test_move_cannot_be_called_twice() -> Result {
        let directory = tempfile::tempdir().expect("tempdir");
        let target = directory.path().join("moved.txt");

        let mut file = upload_from_stream(b"Foo bar!");
        file.move_to(&target)?;
        assert!(matches!(
            file.move_to(&target),
            Err(Error::AlreadyMoved)
        ));
        Ok(())
    }

    #[test]
    fn test_stream_fails_after_move() -> Result {
        let directory = tempfile::tempdir().expect("tempdir");
        let target = directory.path().join("moved.txt");

        let mut file = upload_from_stream(b"Foo bar!");
        file.move_to(&target)?;
        assert!(matches!(file.stream(), Err(Error::AlreadyMoved)));
        Ok(())
    }

    #[test]
    fn test_move_to_empty_path_fails() {
        let mut file = upload_from_stream(b"Foo bar!");
        assert!(matches!(
            file.move_to(""),
            Err(Error::InvalidTargetPath)
        ));
    }

    #[test]
    fn test_move_to_missing_directory_fails() {
        let mut file = upload_from_stream(b"Foo bar!");
        assert!(matches!(
            file.move_to("/nonexistent/upload-test/moved.txt"),
            Err(Error::TargetDirectoryNotWritable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_move_to_readonly_directory_fails() {
        use std::os::unix::fs::PermissionsExt as _;

        let directory = tempfile::tempdir().expect("tempdir");
        let mut permissions =
            fs::metadata(directory.path()).expect("metadata").permissions();
        permissions.set_mode(0o555);
        fs::set_permissions(directory.path(), permissions).expect("chmod");

        let mut file = upload_from_stream(b"Foo bar!");
        assert!(matches!(
            file.move_to(directory.path().join("moved.txt")),
            Err(Error::TargetDirectoryNotWritable(_))
        ));
    }

    #[test]
    fn test_stream_and_move_fail_on_error_status() -> Result {
        for code in [1, 2, 3, 4, 6, 7, 8] {
            let mut file = UploadedFile::from_spec(RawUpload {
                source: UploadSource::None,
                size: 0,
                error: code,
                client_filename: None,
                client_media_type: None,
            })?;
            assert!(matches!(file.stream(), Err(Error::Upload(_))));
            assert!(matches!(file.move_to("x"), Err(Error::Upload(_))));
        }
        Ok(())
    }

    #[test]
    fn test_normalize_nested_specs() -> Result {
        let mut inner = BTreeMap::new();
        inner.insert(
            "avatar".to_string(),
            UploadSpec::Raw(RawUpload {
                source: UploadSource::Stream(Stream::memory()),
                size: 0,
                error: 0,
                client_filename: Some("avatar.png".to_string()),
                client_media_type: None,
            }),
        );

        let mut specs = BTreeMap::new();
        specs.insert("user".to_string(), UploadSpec::Nested(inner));

        let files = normalize(specs)?;
        match files.get("user") {
            Some(UploadNode::Nested(nested)) => {
                assert!(matches!(
                    nested.get("avatar"),
                    Some(UploadNode::File(_))
                ));
            }
            _ => panic!("expected nested node"),
        }
        Ok(())
    }

    #[test]
    fn test_spec_from_value() -> Result {
        let mut map = BTreeMap::new();
        map.insert("tmp_name".to_string(), Value::from("/tmp/upload-1"));
        map.insert("size".to_string(), Value::from("123"));
        map.insert("error".to_string(), Value::from("0"));
        map.insert("name".to_string(), Value::from("photo.jpg"));

        let spec = UploadSpec::from_value(&Value::Map(map))?;
        match spec {
            UploadSpec::Raw(raw) => {
                assert_eq!(raw.size, 123);
                assert_eq!(raw.error, 0);
                assert_eq!(raw.client_filename.as_deref(), Some("photo.jpg"));
            }
            _ => panic!("expected raw spec"),
        }

        assert!(matches!(
            UploadSpec::from_value(&Value::from("bogus")),
            Err(Error::InvalidUploadSpec)
        ));
        Ok(())
    }
}
