use std::fs;
use std::path::PathBuf;
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use super::error::Error;




const VOLUME_EXTENSION: &str = ".h5";




/**
 * Find the volume files belonging to a run by expanding the shell pattern
 * `file_prefix*.h5`. Wildcards may appear anywhere in the prefix, including
 * its directory components, and do not match a leading dot. The returned
 * paths are spelled the way the pattern spells them and are sorted, so that
 * the first file (which defines the set of observations) does not depend on
 * directory iteration order.
 */
pub fn discover_volume_files(file_prefix: &str) -> Result<Vec<PathBuf>, Error> {
    let pattern = format!("{}*{}", file_prefix, VOLUME_EXTENSION);
    let mut components = pattern.split('/').peekable();

    // Spelled paths matched so far; each is empty or ends in a separator.
    let mut candidates = vec![String::new()];

    while let Some(component) = components.next() {
        let is_last = components.peek().is_none();
        let mut matched = Vec::new();

        if component.is_empty() {
            candidates.iter_mut().for_each(|dir| dir.push('/'));
            continue;
        }
        if !has_wildcard(component) {
            for dir in &candidates {
                let path = format!("{}{}", dir, component);
                if is_kind(&path, is_last) {
                    matched.push(spell(path, is_last));
                }
            }
        } else {
            let matcher = component_matcher(component)?;

            for dir in &candidates {
                for name in list_dir(dir) {
                    if name.starts_with('.') && !component.starts_with('.') {
                        continue;
                    }
                    let path = format!("{}{}", dir, name);
                    if matcher.is_match(&name) && is_kind(&path, is_last) {
                        matched.push(spell(path, is_last));
                    }
                }
            }
        }
        candidates = matched;
    }
    if candidates.is_empty() {
        return Err(Error::NoVolumeFiles(file_prefix.to_string()));
    }
    candidates.sort();
    Ok(candidates.into_iter().map(PathBuf::from).collect())
}

fn has_wildcard(component: &str) -> bool {
    component.contains(|c| matches!(c, '*' | '?' | '['))
}

fn component_matcher(component: &str) -> Result<GlobMatcher, Error> {
    let glob = GlobBuilder::new(component)
        .literal_separator(true)
        .backslash_escape(false)
        .build()
        .map_err(Error::Pattern)?;
    Ok(glob.compile_matcher())
}

fn is_kind(path: &str, is_file: bool) -> bool {
    match fs::metadata(path) {
        Ok(meta) if is_file => !meta.is_dir(),
        Ok(meta) => meta.is_dir(),
        Err(_) => false,
    }
}

fn spell(mut path: String, is_last: bool) -> String {
    if !is_last {
        path.push('/');
    }
    path
}

/**
 * Names in a directory (the working directory when `dir` is empty). A
 * directory that cannot be read contributes nothing, as with a shell glob.
 */
fn list_dir(dir: &str) -> Vec<String> {
    let search = if dir.is_empty() { "." } else { dir };

    match fs::read_dir(search) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect(),
        Err(e) => {
            debug!("Skipping {}: {}", search, e);
            Vec::new()
        }
    }
}
