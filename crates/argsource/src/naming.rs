//! Flag name to document key mapping.

/// `my-flag` -> `my_flag`.
pub fn underscore(name: &str) -> String {
    name.replace('-', "_")
}

/// `my-flag` -> `myFlag`.
///
/// Each hyphen-separated word is capitalised and the words are joined; only the
/// first character of the result is then lower-cased. Empty words are skipped.
pub fn camel(name: &str) -> String {
    let joined: String = name.split('-').map(capitalize).collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Segments of the nested document path a flag name addresses.
///
/// Dotted names (`server.read-timeout`) split on `.` with each segment in
/// underscore form; otherwise the name splits on `-` (`server-port`).
pub fn path_segments(name: &str) -> Vec<String> {
    if name.contains('.') {
        name.split('.').map(underscore).collect()
    } else {
        name.split('-').map(str::to_string).collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscore_and_camel_forms() {
        assert_eq!(underscore("my-flag"), "my_flag");
        assert_eq!(camel("my-flag"), "myFlag");
        assert_eq!(underscore("a-b-c"), "a_b_c");
        assert_eq!(camel("a-b-c"), "aBC");
        assert_eq!(camel("plain"), "plain");
    }

    #[test]
    fn empty_words_do_not_panic() {
        assert_eq!(camel(""), "");
        assert_eq!(camel("a--b"), "aB");
        assert_eq!(camel("-lead"), "lead");
        assert_eq!(underscore("a--b"), "a__b");
    }

    #[test]
    fn path_segments_prefer_dots() {
        assert_eq!(path_segments("a-b"), ["a", "b"]);
        assert_eq!(path_segments("server.read-timeout"), ["server", "read_timeout"]);
        assert_eq!(path_segments("single"), ["single"]);
    }
}
