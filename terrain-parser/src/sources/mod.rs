pub mod grid;
pub mod survey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Asc,
    Survey,
}

/// Map an input file extension to the source that reads it.
///
/// Survey files come as a numbered series (`.001`, `.002`, ...); raster
/// grids are `.asc`.
pub fn get_extension(extension: &str) -> Option<Extension> {
    let extension = extension.to_lowercase();
    match extension.as_str() {
        "asc" => Some(Extension::Asc),
        "lss" => Some(Extension::Survey),
        ext if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_digit()) => {
            Some(Extension::Survey)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_extensions() {
        assert_eq!(get_extension("asc"), Some(Extension::Asc));
        assert_eq!(get_extension("ASC"), Some(Extension::Asc));
        assert_eq!(get_extension("001"), Some(Extension::Survey));
        assert_eq!(get_extension("002"), Some(Extension::Survey));
        assert_eq!(get_extension("lss"), Some(Extension::Survey));
        assert_eq!(get_extension("csv"), None);
        assert_eq!(get_extension(""), None);
    }
}
