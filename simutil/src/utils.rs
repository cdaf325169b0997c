pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// The file name without its directory or extension. Falls back to the whole input.
pub fn basename<I: AsRef<str>>(path: I) -> String {
    std::path::Path::new(path.as_ref())
        .file_stem()
        .and_then(|x| x.to_str())
        .map(|x| x.to_string())
        .unwrap_or_else(|| path.as_ref().to_string())
}
