// Host-side implementations of the engine's download and error-display seams
pub mod download;
pub mod notifier;

pub use download::DirectoryDownloadHost;
pub use notifier::ConsoleErrorDisplay;
