//! Per-file counting: drives the line classifier over one file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::classifier::{Classifier, LineClass};
use crate::error::ScanError;
use crate::language::LanguageDescriptor;
use crate::stats::FileRecord;

/// Count one file and return its per-line statistics.
///
/// Reads lines byte-wise so both `\n` and `\r\n` endings are accepted and a
/// final line without a trailing newline is still counted. Non-UTF-8 bytes
/// are decoded lossily rather than failing the file. I/O failures come back
/// as a [`ScanError`]; the caller records them and the scan continues.
///
/// An empty file yields an all-zero record and still counts toward the
/// language's file total.
pub fn count_file(
    path: impl AsRef<Path>,
    lang: &'static LanguageDescriptor,
) -> Result<FileRecord, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScanError::file(path, &e))?;
    let reader = BufReader::new(file);
    count_lines(reader, path, lang)
}

/// Drive the classifier over every line of `reader`.
fn count_lines<R: BufRead>(
    mut reader: R,
    path: &Path,
    lang: &'static LanguageDescriptor,
) -> Result<FileRecord, ScanError> {
    let mut classifier = Classifier::new(lang);
    let mut record = FileRecord::new(path.to_path_buf(), lang.name);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ScanError::file(path, &e))?;
        if n == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        match classifier.classify_line(&line) {
            LineClass::Code => record.code += 1,
            LineClass::Comment => record.comment += 1,
            LineClass::Blank => record.blank += 1,
        }
        record.total += 1;
    }

    debug_assert_eq!(record.total, record.code + record.comment + record.blank);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn c_lang() -> &'static LanguageDescriptor {
        language::resolve(Path::new("x.c")).unwrap()
    }

    fn count_str(text: &str) -> FileRecord {
        count_lines(Cursor::new(text), Path::new("x.c"), c_lang()).unwrap()
    }

    #[test]
    fn test_empty_file() {
        let record = count_str("");
        assert_eq!(record.total, 0);
        assert_eq!(record.code, 0);
        assert_eq!(record.comment, 0);
        assert_eq!(record.blank, 0);
    }

    #[test]
    fn test_basic_counts() {
        let record = count_str("int main() {\n// entry\n\nreturn 0;\n}\n");
        assert_eq!(record.code, 3);
        assert_eq!(record.comment, 1);
        assert_eq!(record.blank, 1);
        assert_eq!(record.total, 5);
    }

    #[test]
    fn test_crlf_line_endings() {
        let record = count_str("int x;\r\n// c\r\n\r\n");
        assert_eq!(record.code, 1);
        assert_eq!(record.comment, 1);
        assert_eq!(record.blank, 1);
        assert_eq!(record.total, 3);
    }

    #[test]
    fn test_final_line_without_newline() {
        let record = count_str("int x;\nint y;");
        assert_eq!(record.code, 2);
        assert_eq!(record.total, 2);
    }

    #[test]
    fn test_unterminated_block_comment_single_line() {
        let record = count_str("/* comment");
        assert_eq!(record.comment, 1);
        assert_eq!(record.code, 0);
        assert_eq!(record.blank, 0);
        assert_eq!(record.total, 1);
    }

    #[test]
    fn test_invariant_holds() {
        let record = count_str("a\n/*\n*/\n\nb // c\n\"//\"\n");
        assert_eq!(record.total, record.code + record.comment + record.blank);
        assert_eq!(record.total, 6);
    }

    #[test]
    fn test_count_file_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("hello.c");
        fs::write(&path, "// hello\nint main() { return 0; }\n").unwrap();

        let record = count_file(&path, c_lang()).unwrap();
        assert_eq!(record.language, "C");
        assert_eq!(record.comment, 1);
        assert_eq!(record.code, 1);
        assert_eq!(record.total, 2);
    }

    #[test]
    fn test_missing_file_is_recorded_error() {
        let err = count_file("/nonexistent/void.c", c_lang()).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::NotFound);
        assert_eq!(err.target, crate::error::ErrorTarget::File);
    }

    #[test]
    fn test_non_utf8_bytes_are_tolerated() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("latin.c");
        fs::write(&path, b"// caf\xe9\nint x;\n").unwrap();

        let record = count_file(&path, c_lang()).unwrap();
        assert_eq!(record.comment, 1);
        assert_eq!(record.code, 1);
    }
}
