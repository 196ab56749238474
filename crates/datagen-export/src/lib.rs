//! Loads generated document files into a document store.
//!
//! Every `<TypeName>.json` file in the output directory becomes one
//! collection, named by lowercasing and pluralizing the type name. Documents
//! are inserted one at a time through a [`DocumentSink`]; [`MongoSink`] is the
//! MongoDB implementation.

pub mod credentials;
pub mod errors;
pub mod exporter;
pub mod files;
pub mod sink;

pub use credentials::Credentials;
pub use errors::ExportError;
pub use exporter::{CollectionReport, ExportReport, export_all};
pub use files::{ExportFile, collection_name, read_documents, scan_output_dir};
pub use sink::{DocumentSink, MongoSink};
