/* 📖 # Why use a separate file for these error tests?

The Debug rendering is snapshot-tested with expect-test. Keeping the snapshots out of the
main error module keeps that module readable and lets the snapshots be updated in one place.

No tracing subscriber is installed here, so no span trace is rendered in the snapshots.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{IntegerError, IntegerResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_sequence_kind() {
        let error = IntegerError::invalid_sequence("primes");

        match error.kind() {
            ErrorKind::InvalidSequence { name } => assert_eq!(name, "primes"),
            _ => panic!("Expected InvalidSequence variant"),
        }
        assert_eq!(error.to_string(), "Invalid sequence: primes");
    }

    #[test]
    fn test_invalid_element_kind() {
        let error = IntegerError::invalid_element(-3);

        match error.kind() {
            ErrorKind::InvalidElement { element } => assert_eq!(*element, -3),
            _ => panic!("Expected InvalidElement variant"),
        }
        assert_eq!(error.to_string(), "Invalid element num: -3");
    }

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("integer_server.toml");
        let error = IntegerError::new(ErrorKind::FileError {
            path: path.clone(),
            source: io_err,
        });

        match error.kind() {
            ErrorKind::FileError { path: p, .. } => {
                assert_eq!(p, &path);
            }
            _ => panic!("Expected FileError variant"),
        }
        assert!(error.source().is_some());
        assert_eq!(error.root_cause().to_string(), "file not found");
    }

    #[test]
    fn test_config_error_display() {
        let error = IntegerError::new(ErrorKind::Config {
            path: PathBuf::from("integer_server.toml"),
            message: "unsupported status 418".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Invalid configuration in integer_server.toml: unsupported status 418"
        );
    }

    #[test]
    fn test_error_context_attachment() {
        let error = IntegerError::message("original error")
            .context("first context")
            .with_context(|| "second context".to_string());

        assert_eq!(error.get_context().len(), 2);
        assert_eq!(error.get_context()[0], "first context");
        assert_eq!(error.get_context()[1], "second context");
        assert_eq!(
            error.to_string(),
            "first context: second context: original error"
        );
    }

    #[test]
    fn test_kind_display_ignores_context() {
        let error = IntegerError::invalid_element(0).context("computing happy numbers");
        assert_eq!(error.kind().to_string(), "Invalid element num: 0");
    }

    #[test]
    fn test_error_source_follows_cause() {
        let inner = IntegerError::message("inner");
        let outer = IntegerError::message("outer").caused_by(inner);

        assert_eq!(outer.source().map(|e| e.to_string()), Some("inner".to_string()));
        assert_eq!(outer.root_cause().to_string(), "inner");
        assert!(outer.cause().is_some());
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: IntegerResult<i32> = Ok(42);
        assert_eq!(result.context("operation failed").unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: IntegerResult<i32> = Err(Box::new(IntegerError::message("root")));
        let err = result
            .context("step 1")
            .with_context(|| "step 2".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: root");
    }

    #[test]
    fn test_err_macro_formats_message() {
        let err = crate::err!("port {} is taken", 5000);
        assert_eq!(err.to_string(), "port 5000 is taken");
    }

    #[test]
    fn test_debug_pretty_print_format() {
        let error = IntegerError::message("something went wrong")
            .context("while loading configuration")
            .context("during startup");

        expect![[r#"
            something went wrong
            ├─ while loading configuration
            └─ during startup

        "#]]
        .assert_debug_eq(&error);
    }

    #[test]
    fn test_debug_nested_errors() {
        let inner_error = IntegerError::message("inner error").context("inner context");
        let outer_error = IntegerError::message("outer error")
            .context("outer context")
            .caused_by(inner_error);

        expect![[r#"
            outer error
            ├─ outer context
            └─ cause: inner error
               └─ inner context

        "#]]
        .assert_debug_eq(&outer_error);
    }

    #[test]
    fn test_debug_multiple_nested_errors() {
        let error_1 = IntegerError::message("error 1").context("context 1");
        let error_2 = IntegerError::message("error 2")
            .context("context 2")
            .caused_by(error_1);
        let error_3 = IntegerError::invalid_sequence("primes")
            .context("context 3")
            .caused_by(error_2);

        expect![[r#"
            Invalid sequence: primes
            ├─ context 3
            └─ cause: error 2
               ├─ context 2
               └─ cause: error 1
                  └─ context 1

        "#]]
        .assert_debug_eq(&error_3);
    }
}
