/* 📖 # PAL parity tests

MockPal and RealPal must behave the same for everything the server does through the PAL,
otherwise tests written against MockPal say nothing about production. These tests run the
same checks against both implementations through a PalHandle.
*/

#[cfg(test)]
mod pal_trait_tests {
    use crate::ErrorKind;
    use crate::pal::{FilePath, MockPal, PalHandle, RealPal};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "[server]\nport = 8080\n";

    fn handles() -> (TempDir, Vec<PalHandle>) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("integer_server.toml"), CONFIG).unwrap();
        fs::write(temp_dir.path().join("binary.dat"), [0xFF, 0xFE]).unwrap();

        let mock = MockPal::new();
        mock.add_file(FilePath::from("integer_server.toml"), CONFIG.as_bytes().to_vec());
        mock.add_file(FilePath::from("binary.dat"), vec![0xFF, 0xFE]);

        let real = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, vec![PalHandle::new(mock), PalHandle::new(real)])
    }

    #[test]
    fn test_file_exists_parity() {
        let (_temp_dir, pals) = handles();
        for pal in pals {
            assert!(pal.file_exists(&FilePath::from("integer_server.toml")).unwrap());
            assert!(!pal.file_exists(&FilePath::from("missing.toml")).unwrap());
        }
    }

    #[test]
    fn test_read_file_to_string_parity() {
        let (_temp_dir, pals) = handles();
        for pal in pals {
            let content = pal
                .read_file_to_string(&FilePath::from("integer_server.toml"))
                .unwrap();
            assert_eq!(content, CONFIG);
        }
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let (_temp_dir, pals) = handles();
        for pal in pals {
            let err = pal
                .read_file_to_string(&FilePath::from("missing.toml"))
                .unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::FileError { .. }), "{:?}", pal);
        }
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let (_temp_dir, pals) = handles();
        for pal in pals {
            let err = pal
                .read_file_to_string(&FilePath::from("binary.dat"))
                .unwrap_err();
            assert_eq!(err.to_string(), "File is not valid UTF-8: binary.dat");
        }
    }

    #[test]
    fn test_pal_handle_clone_shares_state() {
        let mock = MockPal::new();
        let handle = PalHandle::new(mock.clone());
        let clone = handle.clone();

        mock.add_file(FilePath::from("late.toml"), b"".to_vec());
        assert!(clone.file_exists(&FilePath::from("late.toml")).unwrap());
    }
}
