//! Wire and artifact constants shared between the emitters and the CLI.

/// Leading magic of a client binary artifact.
pub const MAGIC_CLIENT: &[u8; 5] = b"BUSc\0";
/// Leading magic of the server binary artifact.
pub const MAGIC_SERVER: &[u8; 5] = b"BUSs\0";

/// Value written into the unused alignment slots of every binary record.
pub const PADDING_VALUE: u8 = 0xAA;

/// Common prefix of every generated file name.
pub const ARTIFACT_PREFIX: &str = "busconfig_";

/// Name used for the implicit server entity in artifacts and errors.
pub const SERVER_NAME: &str = "Server";

/// Default output directory, created next to the input file.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";
