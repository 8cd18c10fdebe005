//! Extracting files from variables.
//!
//! Every file found in the variables is replaced by `null` and recorded with its path, so the
//! remaining variables can be serialized as JSON while the files travel as separate form parts.

use indexmap::IndexMap;

use crate::{Error, Result, Upload, Value, VariablePath, Variables};

/// Files found in the variables, in the order they were discovered.
pub type FileMap = IndexMap<VariablePath, Upload>;

/// The result of [`extract_files`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// The variables with every file replaced by `null`.
    pub variables: serde_json::Map<String, serde_json::Value>,

    /// The files, keyed by their path in the variables.
    pub files: FileMap,
}

impl Extracted {
    /// Returns `true` if no file was found.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.files.is_empty()
    }
}

/// Split the variables into JSON-safe variables and the files they contain.
///
/// Files are discovered depth first, left to right, starting from the `variables` path. Apart
/// from the `null` placeholders the returned variables are identical to the input.
///
/// Fails with [`Error::DuplicateFilePath`](enum.Error.html#variant.DuplicateFilePath) if two
/// files share a path, which happens when an object key contains a `.`.
///
/// # Examples
///
/// ```
/// use graphql_multipart_client::*;
/// use serde_json::json;
///
/// let icon = Upload::new("icon.png", vec![0u8; 16]);
/// let mut variables = Variables::default();
/// variables.insert("title", "x");
/// variables.insert("icon", icon.clone());
///
/// let extracted = extract_files(&variables)?;
/// assert_eq!(
///     serde_json::Value::Object(extracted.variables),
///     json!({ "title": "x", "icon": null })
/// );
/// assert_eq!(
///     extracted.files.get_index(0),
///     Some((&VariablePath::root().child("icon"), &icon))
/// );
/// # Ok::<(), Error>(())
/// ```
pub fn extract_files(variables: &Variables) -> Result<Extracted> {
    let (variables, found) = extract_object(variables, &VariablePath::root());
    let mut files = FileMap::with_capacity(found.len());
    for (path, upload) in found {
        if files.contains_key(&path) {
            return Err(Error::DuplicateFilePath(path));
        }
        files.insert(path, upload);
    }
    Ok(Extracted { variables, files })
}

/// Extract files from a single value located at `path`.
///
/// Returns the value with files replaced by `null` together with the files found, in discovery
/// order.
pub fn extract_value(
    value: &Value,
    path: &VariablePath,
) -> (serde_json::Value, Vec<(VariablePath, Upload)>) {
    match value {
        Value::Null => (serde_json::Value::Null, Vec::new()),
        Value::Boolean(b) => (serde_json::Value::Bool(*b), Vec::new()),
        Value::Number(n) => (serde_json::Value::Number(n.clone()), Vec::new()),
        Value::String(s) => (serde_json::Value::String(s.clone()), Vec::new()),
        Value::Upload(upload) => (
            serde_json::Value::Null,
            vec![(path.clone(), upload.clone())],
        ),
        Value::UploadList(uploads) => (
            serde_json::Value::Array(vec![serde_json::Value::Null; uploads.len()]),
            uploads
                .iter()
                .enumerate()
                .map(|(idx, upload)| (path.index(idx), upload.clone()))
                .collect(),
        ),
        Value::List(items) => {
            let mut cleaned = Vec::with_capacity(items.len());
            let mut files = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                let (item, item_files) = extract_value(item, &path.index(idx));
                cleaned.push(item);
                files.extend(item_files);
            }
            (serde_json::Value::Array(cleaned), files)
        }
        Value::Object(map) => {
            let (map, files) = extract_object(map, path);
            (serde_json::Value::Object(map), files)
        }
    }
}

fn extract_object(
    map: &IndexMap<String, Value>,
    path: &VariablePath,
) -> (serde_json::Map<String, serde_json::Value>, Vec<(VariablePath, Upload)>) {
    let mut cleaned = serde_json::Map::with_capacity(map.len());
    let mut files = Vec::new();
    for (key, value) in map {
        let (value, value_files) = extract_value(value, &path.child(key));
        cleaned.insert(key.clone(), value);
        files.extend(value_files);
    }
    (cleaned, files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(name: &str) -> Upload {
        Upload::new(name, name.as_bytes().to_vec())
    }

    fn paths(files: &FileMap) -> Vec<&str> {
        files.keys().map(VariablePath::as_str).collect()
    }

    #[test]
    fn test_no_files() {
        let input = json!({
            "name": "Wiring",
            "price": 12.5,
            "tags": ["a", "b"],
            "meta": { "visible": true, "parent": null },
        });
        let variables = Variables::from_json(input.clone());
        let extracted = extract_files(&variables).unwrap();
        assert!(extracted.is_plain());
        assert_eq!(serde_json::Value::Object(extracted.variables), input);
    }

    #[test]
    fn test_single_file() {
        let icon = file("icon.png");
        let mut variables = Variables::default();
        variables.insert("title", "x").insert("icon", icon.clone());

        let extracted = extract_files(&variables).unwrap();
        assert_eq!(
            serde_json::Value::Object(extracted.variables),
            json!({ "title": "x", "icon": null })
        );
        assert_eq!(paths(&extracted.files), vec!["variables.icon"]);
        assert_eq!(extracted.files["variables.icon"], icon);
    }

    #[test]
    fn test_file_list() {
        let mut variables = Variables::default();
        variables.insert("images", vec![file("1.png"), file("2.png")]);

        let extracted = extract_files(&variables).unwrap();
        assert_eq!(
            serde_json::Value::Object(extracted.variables),
            json!({ "images": [null, null] })
        );
        assert_eq!(
            paths(&extracted.files),
            vec!["variables.images.0", "variables.images.1"]
        );
        assert_eq!(extracted.files[0].filename(), "1.png");
        assert_eq!(extracted.files[1].filename(), "2.png");
    }

    #[test]
    fn test_empty_file_list() {
        let mut variables = Variables::default();
        variables.insert("images", Vec::<Upload>::new());

        let extracted = extract_files(&variables).unwrap();
        assert!(extracted.is_plain());
        assert_eq!(
            serde_json::Value::Object(extracted.variables),
            json!({ "images": [] })
        );
    }

    #[test]
    fn test_nested_object() {
        let mut meta = IndexMap::new();
        meta.insert("alt".to_string(), Value::from("thumbnail"));
        meta.insert("thumb".to_string(), Value::from(file("t.png")));
        let mut input = IndexMap::new();
        input.insert("name".to_string(), Value::from("Lamp"));
        input.insert("meta".to_string(), Value::Object(meta));
        let mut variables = Variables::default();
        variables.insert("input", Value::Object(input));

        let extracted = extract_files(&variables).unwrap();
        assert_eq!(
            serde_json::Value::Object(extracted.variables),
            json!({ "input": { "name": "Lamp", "meta": { "alt": "thumbnail", "thumb": null } } })
        );
        assert_eq!(paths(&extracted.files), vec!["variables.input.meta.thumb"]);
    }

    #[test]
    fn test_mixed_list_of_objects() {
        let gallery = Value::List(vec![
            Value::from(1),
            Value::from(file("a.png")),
            vec![
                ("caption".to_string(), Value::from("second")),
                ("image".to_string(), Value::from(file("b.png"))),
            ]
            .into_iter()
            .collect(),
            Value::List(vec![Value::Null, Value::from(file("c.png"))]),
        ]);
        let mut variables = Variables::default();
        variables
            .insert("cover", file("cover.png"))
            .insert("gallery", gallery)
            .insert("published", true);

        let extracted = extract_files(&variables).unwrap();
        assert_eq!(
            serde_json::Value::Object(extracted.variables),
            json!({
                "cover": null,
                "gallery": [1, null, { "caption": "second", "image": null }, [null, null]],
                "published": true,
            })
        );
        assert_eq!(
            paths(&extracted.files),
            vec![
                "variables.cover",
                "variables.gallery.1",
                "variables.gallery.2.image",
                "variables.gallery.3.1",
            ]
        );
        let names: Vec<_> = extracted.files.values().map(Upload::filename).collect();
        assert_eq!(names, vec!["cover.png", "a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_extract_is_pure() {
        let mut variables = Variables::default();
        variables
            .insert("icon", file("icon.png"))
            .insert("images", vec![file("1.png"), file("2.png")]);

        let first = extract_files(&variables).unwrap();
        let second = extract_files(&variables).unwrap();
        assert_eq!(first, second);
        assert!(variables.contains_upload());
    }

    #[test]
    fn test_every_file_path_is_null_placeholder() {
        let mut variables = Variables::default();
        variables
            .insert("a", vec![file("1"), file("2")])
            .insert(
                "b",
                Value::List(vec![vec![("f".to_string(), Value::from(file("3")))]
                    .into_iter()
                    .collect()]),
            );

        let extracted = extract_files(&variables).unwrap();
        let root = serde_json::Value::Object(extracted.variables);
        for path in extracted.files.keys() {
            let pointer = path
                .as_str()
                .trim_start_matches("variables")
                .replace('.', "/");
            assert_eq!(root.pointer(&pointer), Some(&serde_json::Value::Null), "{}", path);
        }
    }

    #[test]
    fn test_colliding_file_paths() {
        let nested: Value = vec![("b".to_string(), Value::from(file("nested")))]
            .into_iter()
            .collect();
        let mut variables = Variables::default();
        variables
            .insert("a.b", file("dotted"))
            .insert("a", nested);

        match extract_files(&variables).unwrap_err() {
            Error::DuplicateFilePath(path) => assert_eq!(path, "variables.a.b"),
            err => panic!("unexpected error {:?}", err),
        }
    }
}
