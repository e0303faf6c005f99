// Host platform boundary
// The UI never talks to the OS directly; everything goes through this trait

use thiserror::Error;

/// Errors from host platform calls
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The system browser could not be launched for the requested URL
    #[error("Failed to open browser tab: {0}")]
    OpenTab(#[from] std::io::Error),
}

/// Host platform services consumed by the UI
///
/// `get_version` is read once at startup; `open_tab` is fire-and-forget
/// navigation (callers log failures and continue).
pub trait Platform {
    /// Return the running application's version string
    fn get_version(&self) -> String;

    /// Open the given URL in the system browser
    fn open_tab(&self, url: &str) -> Result<(), PlatformError>;
}

/// Platform implementation backed by the build metadata and the OS shell
pub struct NativePlatform;

impl Platform for NativePlatform {
    fn get_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn open_tab(&self, url: &str) -> Result<(), PlatformError> {
        open::that(url)?;
        Ok(())
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// Test double that records every `open_tab` call instead of launching
    /// a browser
    pub struct RecordingPlatform {
        pub version: String,
        pub opened: RefCell<Vec<String>>,
    }

    impl RecordingPlatform {
        pub fn new(version: &str) -> Self {
            Self {
                version: version.to_string(),
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl Platform for RecordingPlatform {
        fn get_version(&self) -> String {
            self.version.clone()
        }

        fn open_tab(&self, url: &str) -> Result<(), PlatformError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingPlatform;
    use super::*;

    #[test]
    fn test_native_version_is_crate_version() {
        let platform = NativePlatform;
        assert_eq!(platform.get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_recording_platform_counts_open_tab_calls() {
        let platform = RecordingPlatform::new("1.2.3");
        platform.open_tab("https://example.org/source").unwrap();
        platform.open_tab("https://example.org/source").unwrap();

        assert_eq!(platform.get_version(), "1.2.3");
        assert_eq!(
            platform.opened.borrow().as_slice(),
            ["https://example.org/source", "https://example.org/source"]
        );
    }
}
