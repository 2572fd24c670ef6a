//! Author name normalization

/// Turn a `Last, First; Last, First` author field into `First Last & First Last`
///
/// Blank input yields an empty string. A name without a comma is kept as is.
pub fn normalize_author(raw: &str) -> String {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(swap_name)
        .collect::<Vec<_>>()
        .join(" & ")
}

fn swap_name(name: &str) -> String {
    name.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .rev()
        .collect::<Vec<_>>()
        .join(" ")
}
