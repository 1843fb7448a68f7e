// upload workflow public api

pub mod credentials;
pub mod field;
pub mod file;
pub mod normalize;
pub mod resolver;
pub mod service;
pub mod transport;
pub mod validator;

pub use credentials::{CredentialProvider, SessionStore, StaticCredential};
pub use field::{FieldError, FieldPhase, UploadField, UploadTicket};
pub use file::CandidateFile;
pub use normalize::{extract_location, extract_location_with, MissingLocation};
pub use resolver::PathResolver;
pub use service::UploadService;
pub use transport::{TransportError, UploadTransport};
pub use validator::{FileKind, FilePolicy, ValidationError};
