//! Process-wide instances. Each test binary is one process, so every test
//! here observes the same statics.

use doclog_logger::LoggerExt;
use doclog_logger_file::{
    EAGER_FILE_NAME, Error, FileLoggerConfig, FixedDirResolver, InitPolicy, LAZY_FILE_NAME,
    configure_lazy, eager, init_eager_with_resolver, lazy,
};
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

#[tokio::test]
#[serial]
async fn test_lazy_instance_is_created_once() {
    let dir = tempdir().unwrap();
    configure_lazy(FileLoggerConfig::builder().directory(dir.path()).build()).unwrap();

    let first = lazy().unwrap();
    for _ in 0..10 {
        assert!(Arc::ptr_eq(&first, &lazy().unwrap()));
    }

    let handles: Vec<_> = (0..8).map(|_| thread::spawn(|| lazy().unwrap())).collect();
    for handle in handles {
        let other = handle.join().unwrap();
        assert!(Arc::ptr_eq(&first, &other));
        assert_eq!(first.id(), other.id());
    }

    assert_eq!(first.policy(), InitPolicy::Lazy);
    assert!(matches!(
        configure_lazy(FileLoggerConfig::default()),
        Err(Error::AlreadyInitialized("lazy"))
    ));

    lazy().unwrap().message("startup complete");
    first.flush_async().await.unwrap();

    let contents = tokio::fs::read_to_string(dir.path().join(LAZY_FILE_NAME))
        .await
        .unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.trim_end().ends_with(": startup complete"));
}

#[tokio::test]
#[serial]
async fn test_eager_instance_is_installed_once() {
    let dir = tempdir().unwrap();

    // eager policy is forced regardless of what the config says
    let config = FileLoggerConfig::builder()
        .policy(InitPolicy::Lazy)
        .build();
    let installed =
        init_eager_with_resolver(config, Arc::new(FixedDirResolver::new(dir.path()))).unwrap();
    assert_eq!(installed.policy(), InitPolicy::Eager);

    for _ in 0..10 {
        let shared = eager().unwrap();
        assert!(Arc::ptr_eq(&installed, &shared));
    }

    assert!(matches!(
        init_eager_with_resolver(
            FileLoggerConfig::default(),
            Arc::new(FixedDirResolver::new(dir.path()))
        ),
        Err(Error::AlreadyInitialized("eager"))
    ));

    let path = installed.wait_resolved().await.unwrap();
    assert_eq!(path, dir.path().join(EAGER_FILE_NAME));

    eager().unwrap().message("ready");
    installed.flush_async().await.unwrap();

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(contents.trim_end().ends_with(": ready"));
}
