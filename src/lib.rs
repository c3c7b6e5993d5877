/*!
 * # subcustomizer - restyle the subtitle of the playing video
 *
 * A Rust library for a media-player subtitle add-on that finds the subtitle
 * of the video being played, follows generated files back to their original,
 * and re-emits the subtitle with a uniform, user-chosen default style.
 *
 * ## Features
 *
 * - Match subtitle files to the playing video by name and language tag
 * - Newest-file selection with a first-seen tie-break
 * - Provenance markers so converted files always point at their original
 * - Locale-based text encoding resolution
 * - Deterministic default-style override with forced rendering invariants
 * - ISO 639-1, ISO 639-2/T and ISO 639-2/B language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `locator`: Subtitle file matching over a directory listing
 * - `provenance`: Marker formatting and original-path resolution
 * - `encoding`: Country code to text encoding resolution
 * - `style`: Style configuration to style record mapping
 * - `document`: Subtitle document model and the codec trait
 * - `pipeline`: Conversion pipeline tying the stages together
 * - `app_controller`: Add-on shell (subtitle folder, actions, conversion)
 * - `host`: Player and settings capabilities
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `logging`: Terminal logger
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod encoding;
pub mod errors;
pub mod file_utils;
pub mod host;
pub mod language_utils;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod provenance;
pub mod style;

// Re-export main types for easier usage
pub use app_config::{Config, StyleConfiguration};
pub use app_controller::{Controller, SubtitleAction};
pub use document::{SubtitleCodec, SubtitleDocument};
pub use encoding::EncodingResolver;
pub use errors::{AppError, CodecError, HostError, ProvenanceError, SubtitleError};
pub use locator::{DirectoryEntry, PlaybackContext, ResolvedSubtitle, SubtitleLocator};
pub use pipeline::ConversionPipeline;
pub use provenance::{ProvenanceMarker, ToolIdentity, resolve_original};
pub use style::{StyleMapper, StyleRecord};
