//! Test doubles for exercising `each_case` without a real test framework.
//!
//! [`RecordingHost`] records every registration and can execute the recorded
//! cases; [`LoggerHandle`] captures the library's log output.
//!
//! ```rust
//! use each_case::{TestBody, with_parameters};
//! use each_case_testing::RecordingHost;
//! use serde_json::json;
//!
//! let host = RecordingHost::new().shared();
//! with_parameters(vec![json!("Alis"), json!("Bob")])
//!     .host(host.clone())
//!     .it("greets %s", TestBody::sync(|_| {}))
//!     .expect("cases registered");
//! assert_eq!(host.titles(), ["greets Alis", "greets Bob"]);
//! ```

pub mod logging;
pub mod recording;

pub use logging::{LoggerHandle, logger};
pub use recording::{Kind, RecordingHost, Registration, recording_host};
