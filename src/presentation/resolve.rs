use std::path::{Path, PathBuf};

/// Resolve a client-supplied video reference to a local path under the
/// managed directories. Accepts the full URL returned by `/upload`, any
/// path containing a managed prefix, or a bare filename.
///
/// Precedence: everything through a `/uploads/` prefix is stripped first;
/// failing that, `/outputs/`; otherwise the value is treated as a bare
/// filename against the upload directory, falling back to the output
/// directory only when the upload candidate does not exist and the output
/// candidate does. The tail is flattened to its final path component, so
/// a reference can never escape the managed directories.
pub fn resolve_video_reference(
    reference: &str,
    upload_dir: &Path,
    output_dir: &Path,
) -> PathBuf {
    if let Some(tail) = tail_after(reference, "/uploads/") {
        return upload_dir.join(flatten(tail));
    }
    if let Some(tail) = tail_after(reference, "/outputs/") {
        return output_dir.join(flatten(tail));
    }

    let name = flatten(reference);
    let primary = upload_dir.join(&name);
    if !primary.exists() {
        let fallback = output_dir.join(&name);
        if fallback.exists() {
            return fallback;
        }
    }
    primary
}

fn tail_after<'a>(reference: &'a str, prefix: &str) -> Option<&'a str> {
    reference
        .find(prefix)
        .map(|idx| &reference[idx + prefix.len()..])
}

fn flatten(tail: &str) -> String {
    Path::new(tail)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(tail)
        .to_string()
}
