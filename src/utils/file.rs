use std::fs;
use std::io;
use std::path::Path;

/// Characters replaced when turning a zone name or host into a file name.
///
/// | from        | to  |
/// |-------------|-----|
/// | `:`         | `_` |
/// | `/`         | `_` |
/// | `.`         | `_` |
/// | `\`         | `_` |
/// | whitespace  | `_` |
pub const FILE_NAME_REPLACEMENTS: [char; 4] = [':', '/', '.', '\\'];

/// Make a name safe to embed in a file name, using [`FILE_NAME_REPLACEMENTS`].
pub fn sanitize_file_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if FILE_NAME_REPLACEMENTS.contains(&c) || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Read a whole file as UTF-8 text.
pub fn file_get(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file. Returns the number of bytes written.
pub fn file_write(path: impl AsRef<Path>, content: &str) -> io::Result<u64> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(content.len() as u64)
}

/// Non-empty trimmed lines of a text file, skipping `#` comments.
pub fn read_list_file(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    Ok(parse_list(&file_get(path)?))
}

/// Non-empty trimmed lines of `content`, skipping `#` comments.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
