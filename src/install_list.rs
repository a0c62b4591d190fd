use crate::error::InstallError;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Line reader over the installer list.
///
/// Line 1 is the minimum Java version, line 2 the Java installer and every
/// following line another installer to run. The file is closed when the
/// reader is dropped.
pub struct InstallList<R> {
    reader: R,
    first: bool,
}

impl InstallList<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, InstallError> {
        let file = File::open(path).map_err(|source| InstallError::ConfigOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> InstallList<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            first: true,
        }
    }

    /// Next line with surrounding whitespace removed, or `None` at end of file.
    ///
    /// Bytes that aren't UTF-8 (lists saved in an ANSI codepage) are replaced
    /// rather than ending the list early.
    pub fn next_line(&mut self) -> Result<Option<String>, InstallError> {
        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(InstallError::ConfigRead)?;
        if read == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&buf);
        let mut line = line.as_ref();
        if std::mem::take(&mut self.first) {
            line = line.trim_start_matches('\u{feff}');
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn list(text: &str) -> InstallList<Cursor<Vec<u8>>> {
        InstallList::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn trims_lines_and_stops_at_end() {
        let mut list = list("  1.5.0 \r\njre\\setup.exe\r\n\tdash.jar\n");
        assert_eq!(list.next_line().unwrap().as_deref(), Some("1.5.0"));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("jre\\setup.exe"));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("dash.jar"));
        assert_eq!(list.next_line().unwrap(), None);
        assert_eq!(list.next_line().unwrap(), None);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut list = list("1.5\nsetup.exe");
        list.next_line().unwrap();
        assert_eq!(list.next_line().unwrap().as_deref(), Some("setup.exe"));
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut list = list("\u{feff}1.6\n");
        assert_eq!(list.next_line().unwrap().as_deref(), Some("1.6"));
    }

    #[test]
    fn blank_line_is_not_end_of_input() {
        let mut list = list("\n\nlast\n");
        assert_eq!(list.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(list.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("last"));
    }

    #[test]
    fn open_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = InstallList::open(&tmp.path().join("config.ini")).err().unwrap();
        assert!(matches!(err, InstallError::ConfigOpen { .. }));
    }

    #[test]
    fn open_reads_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.ini");
        std::fs::write(&path, "1.5\njre.exe\n").unwrap();

        let mut list = InstallList::open(&path).unwrap();
        assert_eq!(list.next_line().unwrap().as_deref(), Some("1.5"));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("jre.exe"));
        assert_eq!(list.next_line().unwrap(), None);
    }

    #[test]
    fn non_utf8_line_does_not_end_the_list() {
        let mut list = InstallList::new(Cursor::new(b"a.exe\nsetup\xE9.exe\nlast.exe\n".to_vec()));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("a.exe"));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("setup\u{fffd}.exe"));
        assert_eq!(list.next_line().unwrap().as_deref(), Some("last.exe"));
        assert_eq!(list.next_line().unwrap(), None);
    }

    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk gone"))
        }
    }

    #[test]
    fn read_error_is_reported() {
        let mut list = InstallList::new(std::io::BufReader::new(Broken));
        assert!(matches!(list.next_line(), Err(InstallError::ConfigRead(_))));
    }
}
