//! URL slugs for generated Markdown files.

/// Turns a title into a URL slug.
///
/// Latin accented letters are folded to ASCII, letters without an ASCII
/// form are dropped, and every other run of non-alphanumeric characters
/// becomes a single hyphen. The result has no leading or trailing hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            push_word(&mut slug, &mut pending_separator, c.encode_utf8(&mut [0; 4]));
        } else if let Some(folded) = fold(c) {
            push_word(&mut slug, &mut pending_separator, folded);
        } else if !c.is_alphanumeric() {
            pending_separator = true;
        }
    }

    slug
}

fn push_word(slug: &mut String, pending_separator: &mut bool, text: &str) {
    if *pending_separator && !slug.is_empty() {
        slug.push('-');
    }
    *pending_separator = false;
    slug.push_str(text);
}

fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ß' => "ss",
        'ś' | 'š' | 'ş' => "s",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Hello, World! 2024";
        assert_eq!(slugify(title), slugify(title));
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Été à Paris: cœur & ÂME"), "ete-a-paris-coeur-ame");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_trims_and_collapses() {
        assert_eq!(slugify("  --Rust -- async__await!!  "), "rust-async-await");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_drops_unfoldable_letters() {
        assert_eq!(slugify("Привет world"), "world");
    }
}
