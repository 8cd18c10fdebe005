use indexmap::IndexMap;

use crate::{FileMap, Upload, VariablePath};

/// The `map` field of a multipart request: the name of each file part mapped to the variable
/// paths it fills.
pub type MultipartIndexMap = IndexMap<String, Vec<VariablePath>>;

/// Number the files for a multipart request.
///
/// Indices start at `0` and follow the iteration order of `files`. Each returned file carries
/// the index used both as its key in the map and as the name of its form part.
pub fn build_index_map(files: FileMap) -> (MultipartIndexMap, Vec<(usize, Upload)>) {
    let mut map = MultipartIndexMap::with_capacity(files.len());
    let mut ordered = Vec::with_capacity(files.len());
    for (idx, (path, upload)) in files.into_iter().enumerate() {
        map.insert(idx.to_string(), vec![path]);
        ordered.push((idx, upload));
    }
    (map, ordered)
}

/// The fields of a multipart request, in the order they must be written.
///
/// Encoding the boundary and the parts is left to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartForm {
    /// The `operations` field: the operation as JSON with `null` in place of every file.
    pub operations: String,

    /// The `map` field: a JSON object of part names to variable paths.
    pub map: String,

    /// The file parts. The name of each part is its index in `map`.
    pub files: Vec<(String, Upload)>,
}

impl MultipartForm {
    /// Create the form from serialized operations and the files extracted from them.
    pub fn new(operations: String, files: FileMap) -> serde_json::Result<Self> {
        let (map, files) = build_index_map(files);
        Ok(Self {
            operations,
            map: serde_json::to_string(&map)?,
            files: files
                .into_iter()
                .map(|(idx, upload)| (idx.to_string(), upload))
                .collect(),
        })
    }
}
