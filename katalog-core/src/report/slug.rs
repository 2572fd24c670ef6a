//! File name slugs for publisher and season names

/// Generate a lowercase, hyphen-separated ASCII slug
///
/// German umlauts and `ß` are transliterated (`ü` -> `ue`), other accented
/// letters lose their accent, everything else that is not alphanumeric
/// becomes a separator.
///
/// ```
/// use katalog_core::report::slugify;
///
/// assert_eq!(slugify("Frühjahr"), "fruehjahr");
/// assert_eq!(slugify("Beltz & Gelberg"), "beltz-gelberg");
/// ```
pub fn slugify(text: &str) -> String {
    let mut ascii = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate(c) {
            Some(replacement) => ascii.push_str(replacement),
            None => ascii.push(c),
        }
    }

    ascii
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn transliterate(c: char) -> Option<&'static str> {
    let replacement = match c {
        'Ä' => "AE",
        'ä' => "ae",
        'Ö' => "OE",
        'ö' => "oe",
        'Ü' => "UE",
        'ü' => "ue",
        'ß' => "ss",
        'Æ' => "AE",
        'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        'Ø' => "O",
        'ø' => "o",
        'À' | 'Á' | 'Â' | 'Ã' | 'Å' => "A",
        'à' | 'á' | 'â' | 'ã' | 'å' => "a",
        'Ç' => "C",
        'ç' => "c",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ñ' => "N",
        'ñ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' => "O",
        'ò' | 'ó' | 'ô' | 'õ' => "o",
        'Ù' | 'Ú' | 'Û' => "U",
        'ù' | 'ú' | 'û' => "u",
        'Ý' => "Y",
        'ý' | 'ÿ' => "y",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_transliteration() {
        assert_eq!(slugify("Herbst"), "herbst");
        assert_eq!(slugify("Frühjahr"), "fruehjahr");
        assert_eq!(slugify("Bücherbär"), "buecherbaer");
        assert_eq!(slugify("Öttinger"), "oettinger");
        assert_eq!(slugify("Gerstenberg Straße"), "gerstenberg-strasse");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(slugify("  Beltz & Gelberg  "), "beltz-gelberg");
        assert_eq!(slugify("dtv/Reihe Hanser"), "dtv-reihe-hanser");
        assert_eq!(slugify("Éditions Zoé"), "editions-zoe");
        assert_eq!(slugify("!!!"), "");
    }
}
