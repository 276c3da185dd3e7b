use dataroom_naming::NameError;
use dataroom_state::Target;
use dataroom_types::{FileId, FolderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0} not found")]
    NotFound(Target),

    #[error("the root folder of a data room cannot be deleted: {0}")]
    RootFolderProtected(FolderId),

    #[error("name cannot be empty")]
    InvalidName,

    #[error("{name:?} must keep the .{expected} extension")]
    ExtensionMismatch { name: String, expected: String },

    #[error("unsupported file type for {name:?} ({mime_type}); accepted: {accepted}")]
    UnsupportedFileType {
        name: String,
        mime_type: String,
        accepted: String,
    },

    #[error("no folder is open")]
    NoCurrentFolder,

    #[error("content for {0} is not available in this session")]
    ContentUnavailable(FileId),

    #[error("content store error: {0}")]
    Content(#[from] dataroom_content::ContentError),

    #[error("persistence error: {0}")]
    Persist(#[from] dataroom_persist::PersistError),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot encode config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NameError> for SessionError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Empty => Self::InvalidName,
            NameError::ExtensionChanged { name, expected } => {
                Self::ExtensionMismatch { name, expected }
            }
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
