/*!
 * # tbxmin - TBX to TBX-Min conversion
 *
 * A Rust library for converting TermBase eXchange (TBX) termbases into the
 * minimal TBX-Min dialect.
 *
 * ## Features
 *
 * - Single streaming pass over the source markup
 * - Keeps exactly the requested source/target language pair
 * - Maps subject field, status, part of speech, customer and note
 * - Keeps other term-level categories as `category:text` note lines
 * - Structured diagnostics for everything that could not be converted
 * - TBX-Min markup or JSON output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `conversion`: The conversion engine:
 *   - `conversion::traversal`: Single-pass walk over the source
 *   - `conversion::categories`: Category tables and node classification
 *   - `conversion::language_filter`: Language pair filtering and checks
 *   - `conversion::notes`: Fallback note composition
 *   - `conversion::diagnostics`: Structured diagnostics
 * - `tbx_min`: Target document model and serialization
 * - `app_config`: Configuration management
 * - `file_utils`: Input sources and file system operations
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod conversion;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod tbx_min;

// Re-export main types for easier usage
pub use app_config::Config;
pub use conversion::{
    convert, convert_str, convert_with_report, Conversion, Diagnostic, DiagnosticKind,
};
pub use errors::{AppError, ConvertError};
pub use file_utils::InputSource;
pub use tbx_min::{Entry, LangGroup, Status, TbxMin, TermGroup};
