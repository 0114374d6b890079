use plume_types::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS};

use crate::error::{PostError, PostResult};

/// Check a title against the non-emptiness and length rules.
///
/// Limits count Unicode scalar values, not bytes, matching the record's
/// documented character limits.
pub fn validate_title(title: &str) -> PostResult<()> {
    if title.is_empty() {
        return Err(PostError::TitleEmpty);
    }
    let chars = title.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(PostError::TitleTooLong { chars });
    }
    Ok(())
}

/// Check post content against the non-emptiness and length rules.
pub fn validate_content(content: &str) -> PostResult<()> {
    if content.is_empty() {
        return Err(PostError::ContentEmpty);
    }
    let chars = content.chars().count();
    if chars > CONTENT_MAX_CHARS {
        return Err(PostError::ContentTooLong { chars });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_title_rejected() {
        assert_eq!(validate_title("").unwrap_err(), PostError::TitleEmpty);
    }

    #[test]
    fn title_at_limit_accepted() {
        assert!(validate_title(&"t".repeat(100)).is_ok());
    }

    #[test]
    fn title_over_limit_rejected() {
        assert_eq!(
            validate_title(&"t".repeat(101)).unwrap_err(),
            PostError::TitleTooLong { chars: 101 }
        );
    }

    #[test]
    fn empty_content_rejected() {
        assert_eq!(validate_content("").unwrap_err(), PostError::ContentEmpty);
    }

    #[test]
    fn content_at_limit_accepted() {
        assert!(validate_content(&"c".repeat(1000)).is_ok());
    }

    #[test]
    fn content_over_limit_rejected() {
        assert_eq!(
            validate_content(&"c".repeat(1001)).unwrap_err(),
            PostError::ContentTooLong { chars: 1001 }
        );
    }

    #[test]
    fn limits_count_chars_not_bytes() {
        // 100 two-byte characters: 200 bytes but exactly at the char limit.
        assert!(validate_title(&"é".repeat(100)).is_ok());
        assert!(validate_content(&"é".repeat(1000)).is_ok());
    }

    proptest! {
        #[test]
        fn any_title_within_limits_is_accepted(title in ".{1,100}") {
            prop_assume!(title.chars().count() <= 100);
            prop_assert!(validate_title(&title).is_ok());
        }

        #[test]
        fn any_title_over_limit_is_rejected(extra in 1usize..50) {
            let title = "x".repeat(100 + extra);
            prop_assert_eq!(
                validate_title(&title).unwrap_err(),
                PostError::TitleTooLong { chars: 100 + extra }
            );
        }

        #[test]
        fn any_content_within_limits_is_accepted(content in ".{1,1000}") {
            prop_assume!(content.chars().count() <= 1000);
            prop_assert!(validate_content(&content).is_ok());
        }
    }
}
