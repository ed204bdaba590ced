//! The infix for rotated files contains an index number.
use super::{list_and_cleanup::list_of_rotated_files, CURRENT_INFIX};
use crate::FileSpec;
use std::path::Path;

const NUMBER_DIGITS: usize = 5;

pub(super) fn number_infix(idx: u32) -> String {
    format!("r{idx:0>5}")
}

// Accepts "r00042", and "r00042.log" (the stem of a compressed file)
pub(super) fn is_number_infix(infix: &str) -> bool {
    index_from_infix(infix).is_some()
}

fn index_from_infix(infix: &str) -> Option<u32> {
    let digits = infix.strip_prefix('r')?.get(..NUMBER_DIGITS)?;
    let rest = &infix[1 + NUMBER_DIGITS..];
    if (rest.is_empty() || rest.starts_with('.')) && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

// Renames the rCURRENT file, if it exists, to the given index,
// and returns the index for the next rotation
pub(super) fn rotate_rcurrent(file_spec: &FileSpec, index: u32) -> Result<u32, std::io::Error> {
    match std::fs::rename(
        file_spec.as_pathbuf(Some(CURRENT_INFIX)),
        file_spec.as_pathbuf(Some(&number_infix(index))),
    ) {
        Ok(()) => Ok(index + 1),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(index),
        Err(e) => Err(e),
    }
}

pub(super) fn get_highest_index(file_spec: &FileSpec) -> Option<u32> {
    let fixed_name_part = file_spec.fixed_name_part();
    list_of_rotated_files(file_spec)
        .iter()
        .filter_map(|path| index_of(path, &fixed_name_part))
        .max()
}

fn index_of(path: &Path, fixed_name_part: &str) -> Option<u32> {
    let stem = path.file_stem()?.to_string_lossy();
    let infix_start = if fixed_name_part.is_empty() {
        0
    } else {
        fixed_name_part.len() + 1
    };
    index_from_infix(stem.get(infix_start..)?)
}

#[cfg(test)]
mod test {
    #[test]
    fn test_infix() {
        assert_eq!(super::number_infix(42), "r00042");
        assert!(super::is_number_infix("r00042"));
        assert!(super::is_number_infix("r00042.log"));
        assert!(!super::is_number_infix("rCURRENT"));
        assert!(!super::is_number_infix("r0004"));
        assert!(!super::is_number_infix("r00042x"));
        assert_eq!(super::index_from_infix("r00042.log"), Some(42));
    }
}
