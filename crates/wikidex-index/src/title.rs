//! Display titles derived from path names.

/// Turn a path name into a display title.
///
/// Underscores become spaces and every word is title-cased: the first letter
/// of each alphabetic run is uppercased and the rest lowercased.
///
/// ```
/// use wikidex_index::title::humanize;
///
/// assert_eq!(humanize("getting_started"), "Getting Started");
/// assert_eq!(humanize("API-v2"), "Api-V2");
/// ```
pub fn humanize(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}

/// Display title for a file name, ignoring its extension.
///
/// ```
/// use wikidex_index::title::humanize_file_name;
///
/// assert_eq!(humanize_file_name("release_notes.html"), "Release Notes");
/// ```
pub fn humanize_file_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    humanize(stem)
}
