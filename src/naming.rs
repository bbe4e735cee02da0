//! Random download-name generation for binary results.
//!
//! File-mode results need a filename; callers rarely care what it is. Names
//! look like `img_1x3f9ka8b2.jpg` — a base-36 rendering of a random 64-bit
//! value, with the extension derived from the result's MIME type. Not
//! cryptographically unique; collision probability is accepted as negligible.

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a pseudo-random filename for a MIME type.
///
/// # Examples
/// ```
/// # use shrinkray::naming::random_name;
/// let name = random_name("image/jpeg");
/// assert!(name.starts_with("img_"));
/// assert!(name.ends_with(".jpg"));
/// ```
pub fn random_name(mime: &str) -> String {
    format!("img_{}.{}", base36(rand::random::<u64>()), extension_for(mime))
}

/// Map a MIME type to a filename extension.
///
/// Strips the `image/` prefix and normalizes `jpeg` to `jpg`. An empty MIME
/// type falls back to `jpg`, matching the default output format.
pub fn extension_for(mime: &str) -> String {
    let ext = mime.strip_prefix("image/").unwrap_or(mime);
    match ext {
        "" => "jpg".to_string(),
        "jpeg" => "jpg".to_string(),
        other => other.to_string(),
    }
}

fn base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_has_prefix_and_extension() {
        let name = random_name("image/png");
        assert!(name.starts_with("img_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn jpeg_normalizes_to_jpg() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/jpg"), "jpg");
    }

    #[test]
    fn other_types_keep_their_subtype() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/webp"), "webp");
    }

    #[test]
    fn bare_subtype_without_prefix_is_accepted() {
        assert_eq!(extension_for("png"), "png");
        assert_eq!(extension_for(""), "jpg");
    }

    #[test]
    fn base36_known_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(46655), "zzz");
    }

    #[test]
    fn consecutive_names_differ() {
        assert_ne!(random_name("image/png"), random_name("image/png"));
    }
}
